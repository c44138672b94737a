//! Domain-level error type used across the rule engine and services.
//!
//! This error type is transport-agnostic. The ws and HTTP layers convert it
//! into `crate::error::AppError` via the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The proposed move fails rule validation. Recoverable: resubmit or draw.
    IllegalMove(String),
    /// A move arrived from the seat that does not own the turn.
    OutOfTurn,
    /// A draw was requested beyond the combined deck and discard supply.
    DeckExhausted { requested: u8, remaining: usize },
    /// The session already finished; no further moves are accepted.
    SessionFinished,
    /// Structurally invalid input (bad card string, bad payload shape).
    Validation(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::IllegalMove(d) => write!(f, "illegal move: {d}"),
            DomainError::OutOfTurn => write!(f, "not this player's turn"),
            DomainError::DeckExhausted {
                requested,
                remaining,
            } => write!(f, "deck exhausted: {requested} requested, {remaining} left"),
            DomainError::SessionFinished => write!(f, "session already finished"),
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn illegal_move(detail: impl Into<String>) -> Self {
        Self::IllegalMove(detail.into())
    }
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
}
