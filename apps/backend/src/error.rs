//! Application-level error type.
//!
//! Domain errors convert into `AppError` on their way out of the core; the
//! ws layer maps each variant to a wire error code, the HTTP layer to a
//! status code. Stable string codes let clients match without parsing
//! human-readable text.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    detail: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },
    #[error("Room is full: {room_id}")]
    RoomFull { room_id: String },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn room_not_found(room_id: impl Into<String>) -> Self {
        Self::RoomNotFound {
            room_id: room_id.into(),
        }
    }

    pub fn room_full(room_id: impl Into<String>) -> Self {
        Self::RoomFull {
            room_id: room_id.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::RoomNotFound { .. } => "ROOM_NOT_FOUND",
            AppError::RoomFull { .. } => "ROOM_FULL",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Internal { .. } => "INTERNAL",
            AppError::Domain(err) => match err {
                DomainError::IllegalMove(_) => "ILLEGAL_MOVE",
                DomainError::OutOfTurn => "OUT_OF_TURN",
                DomainError::DeckExhausted { .. } => "DECK_EXHAUSTED",
                DomainError::SessionFinished => "SESSION_FINISHED",
                DomainError::Validation(_) => "VALIDATION",
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RoomNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RoomFull { .. } => StatusCode::CONFLICT,
            AppError::BadRequest { .. } | AppError::Domain(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            code: self.code(),
            detail: self.to_string(),
        })
    }
}
