//! Application services built on the domain layer.

pub mod local_match;

pub use local_match::{LocalMatch, OpponentEvent, PlayerOutcome, AI_SEAT, HUMAN_SEAT};
