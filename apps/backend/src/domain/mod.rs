//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod turns;

#[cfg(test)]
pub mod test_gens;
#[cfg(test)]
mod tests_props;

// Re-exports for ergonomics
pub use cards_logic::{
    feeder_penalty, is_feeder, is_plain_finishable, is_question, is_wild, matches_face,
};
pub use cards_types::{Card, Rank, Suit};
pub use rules::{playable_first_cards, validate_sequence};
pub use snapshot::{view_for, TableView, ViewStatus};
pub use state::{other_seat, GameTable, PendingDraw, Seat, TableStatus};
pub use turns::{apply_drop, apply_draw, DrawOutcome, DropOutcome};
