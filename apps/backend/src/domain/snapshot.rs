//! Per-seat projections of table state.
//!
//! The presentation layer and the AI only ever see a [`TableView`]: the own
//! hand in full, the opponent's hand and the undrawn deck as bare counts.
//! Building the view is the one place concealment is decided, so nothing
//! downstream can leak what it never received.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::state::{other_seat, GameTable, PendingDraw, Seat, TableStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Active,
    Won,
    Lost,
}

/// Everything one seat is entitled to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub top_card: Card,
    pub hand: Vec<Card>,
    pub opponent_count: usize,
    pub deck_count: usize,
    /// Display tail of the discard pile, oldest first. Never used for rule
    /// evaluation.
    pub recent_discards: Vec<Card>,
    pub pending_draw: PendingDraw,
    pub your_turn: bool,
    pub status: ViewStatus,
}

impl TableView {
    /// Cards this seat owes the deck right now: the active forced draw,
    /// else the default single card.
    pub fn owed_draw(&self) -> u8 {
        if self.pending_draw.active {
            self.pending_draw.count
        } else {
            1
        }
    }
}

pub fn view_for(table: &GameTable, seat: Seat) -> TableView {
    let status = match table.status {
        TableStatus::Active => ViewStatus::Active,
        TableStatus::Finished { winner } if winner == seat => ViewStatus::Won,
        TableStatus::Finished { .. } => ViewStatus::Lost,
    };
    TableView {
        top_card: table.top_card,
        hand: table.hands[seat as usize].clone(),
        opponent_count: table.hands[other_seat(seat) as usize].len(),
        deck_count: table.deck.len(),
        recent_discards: table.recent_discards(),
        pending_draw: table.pending_draw,
        your_turn: table.status == TableStatus::Active && table.turn == seat,
        status,
    }
}
