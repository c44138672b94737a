//! Single-process match against an AI opponent.
//!
//! Owns one `GameTable` with the human at seat 0 and the AI at seat 1 and
//! exposes the submit/snapshot interface the presentation layer drives.
//! `ai_take_turn` runs the search synchronously; any "thinking" delay shown
//! to the user is cosmetic and belongs to the caller.

use tracing::{debug, warn};

use crate::ai::{AiPlayer, MoveChoice};
use crate::domain::turns::{apply_drop, apply_draw};
use crate::domain::{view_for, Card, GameTable, Seat, TableStatus, TableView};
use crate::errors::domain::DomainError;

pub const HUMAN_SEAT: Seat = 0;
pub const AI_SEAT: Seat = 1;

/// Result of an accepted human submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerOutcome {
    Dropped { finished: bool },
    /// The drawn cards go back to the caller; nobody else learns them.
    Drew { cards: Vec<Card> },
}

/// What the AI did, handed to the presentation layer for visual replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentEvent {
    Dropped { cards: Vec<Card>, finished: bool },
    Drew { count: u8 },
}

pub struct LocalMatch {
    table: GameTable,
    ai: Box<dyn AiPlayer>,
    wins: [u32; 2],
}

impl LocalMatch {
    pub fn new(seed: u64, ai: Box<dyn AiPlayer>) -> Self {
        Self {
            table: GameTable::deal(seed),
            ai,
            wins: [0, 0],
        }
    }

    /// The human seat's view. The presentation layer reads this, never the
    /// table itself.
    pub fn snapshot(&self) -> TableView {
        view_for(&self.table, HUMAN_SEAT)
    }

    /// Match score: games won per seat since this match began.
    pub fn wins(&self) -> [u32; 2] {
        self.wins
    }

    pub fn submit_drop(&mut self, cards: &[Card]) -> Result<PlayerOutcome, DomainError> {
        let outcome = apply_drop(&mut self.table, HUMAN_SEAT, cards)?;
        if outcome.finished {
            self.wins[HUMAN_SEAT as usize] += 1;
        }
        Ok(PlayerOutcome::Dropped {
            finished: outcome.finished,
        })
    }

    pub fn submit_draw(&mut self) -> Result<PlayerOutcome, DomainError> {
        let outcome = apply_draw(&mut self.table, HUMAN_SEAT, None)?;
        Ok(PlayerOutcome::Drew {
            cards: outcome.cards,
        })
    }

    /// Run the AI once if it owns the turn; `None` when it does not.
    ///
    /// The AI's choice goes through the same validation as any submission.
    /// A failing or illegal choice degrades to a draw rather than wedging
    /// the match.
    pub fn ai_take_turn(&mut self) -> Result<Option<OpponentEvent>, DomainError> {
        if self.table.status != TableStatus::Active || self.table.turn != AI_SEAT {
            return Ok(None);
        }

        let view = view_for(&self.table, AI_SEAT);
        let choice = match self.ai.choose_move(&view) {
            Ok(choice) => choice,
            Err(err) => {
                warn!(error = %err, "AI failed to choose a move, falling back to a draw");
                MoveChoice::Draw
            }
        };

        match choice {
            MoveChoice::Drop(cards) => match apply_drop(&mut self.table, AI_SEAT, &cards) {
                Ok(outcome) => {
                    debug!(count = cards.len(), finished = outcome.finished, "AI dropped");
                    if outcome.finished {
                        self.wins[AI_SEAT as usize] += 1;
                    }
                    Ok(Some(OpponentEvent::Dropped {
                        cards,
                        finished: outcome.finished,
                    }))
                }
                Err(err) => {
                    warn!(error = %err, "AI chose an illegal drop, drawing instead");
                    self.ai_draw()
                }
            },
            MoveChoice::Draw => self.ai_draw(),
        }
    }

    fn ai_draw(&mut self) -> Result<Option<OpponentEvent>, DomainError> {
        let outcome = apply_draw(&mut self.table, AI_SEAT, None)?;
        Ok(Some(OpponentEvent::Drew {
            count: outcome.cards.len() as u8,
        }))
    }

    /// Fresh deal on the same match; the win tally carries over.
    pub fn rematch(&mut self, seed: u64) {
        self.table = GameTable::deal(seed);
    }

    #[cfg(test)]
    pub(crate) fn table(&self) -> &GameTable {
        &self.table
    }
}
