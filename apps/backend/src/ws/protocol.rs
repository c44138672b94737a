//! Wire protocol between clients and the room broker.
//!
//! Drops are public by game rules and travel in full; everything else a
//! client learns about its opponent or the undrawn deck is a bare count.

use serde::{Deserialize, Serialize};

use crate::domain::Card;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateRoom,
    JoinRoom { room_id: String },
    SubmitMove { room_id: String, mv: WireMove },
    Rematch { room_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMove {
    Drop {
        cards: Vec<Card>,
    },
    /// `count` is the client's claim of the owed draw; the broker verifies
    /// it against the authoritative session and may omit requiring it.
    Draw {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<u8>,
    },
}

/// The opponent's accepted move as relayed to the other seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpponentMoveView {
    Drop { cards: Vec<Card>, finished: bool },
    /// Count only, never card identities.
    Draw { count: u8 },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    RoomCreated {
        room_id: String,
    },

    RoomJoined {
        room_id: String,
    },

    /// Sent to each participant with that participant's own projection:
    /// the own hand in full, the opponent and deck as counts.
    GameStart {
        room_id: String,
        hand: Vec<Card>,
        top_card: Card,
        opponent_count: usize,
        deck_count: usize,
        you_are_first: bool,
        your_wins: u32,
        opponent_wins: u32,
        rematch: bool,
    },

    /// Echo to the mover. Drawn card identities appear here and nowhere
    /// else.
    MoveAccepted {
        drawn: Option<Vec<Card>>,
        finished: bool,
    },

    OpponentMove {
        mv: OpponentMoveView,
    },

    GameFinished {
        you_won: bool,
        your_wins: u32,
        opponent_wins: u32,
    },

    OpponentLeft,

    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RoomNotFound,
    RoomFull,
    IllegalMove,
    OutOfTurn,
    DeckExhausted,
    SessionFinished,
    BadRequest,
    Internal,
}

impl From<&AppError> for ErrorCode {
    fn from(err: &AppError) -> Self {
        use crate::errors::domain::DomainError;
        match err {
            AppError::RoomNotFound { .. } => ErrorCode::RoomNotFound,
            AppError::RoomFull { .. } => ErrorCode::RoomFull,
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Domain(domain) => match domain {
                DomainError::IllegalMove(_) => ErrorCode::IllegalMove,
                DomainError::OutOfTurn => ErrorCode::OutOfTurn,
                DomainError::DeckExhausted { .. } => ErrorCode::DeckExhausted,
                DomainError::SessionFinished => ErrorCode::SessionFinished,
                DomainError::Validation(_) => ErrorCode::BadRequest,
            },
        }
    }
}

impl ServerMsg {
    pub fn error(err: &AppError) -> Self {
        ServerMsg::Error {
            code: err.into(),
            message: err.to_string(),
        }
    }
}
