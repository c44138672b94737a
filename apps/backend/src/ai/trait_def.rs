//! AI player trait definition.

use std::fmt;

use crate::domain::{Card, TableView};

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// A chosen move: drop a sequence, or draw the owed cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveChoice {
    Drop(Vec<Card>),
    Draw,
}

/// Trait for AI opponents.
///
/// Implementations receive exactly the projection a human player would see
/// ([`TableView`]) and choose a move. Callers validate the choice like any
/// other submission; a choice the validator rejects falls back to a draw.
pub trait AiPlayer: Send + Sync {
    fn choose_move(&self, view: &TableView) -> Result<MoveChoice, AiError>;
}
