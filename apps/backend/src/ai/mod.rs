//! AI opponent module.
//!
//! This module provides:
//! - the `AiPlayer` trait plus `MoveChoice`
//! - `Strategist`: exhaustive chain search with heuristic scoring
//! - `RandomPlayer`: random legal baseline (seedable for tests)
//! - a static registry for lookup by name

mod random;
mod registry;
mod search;
mod trait_def;

pub use random::RandomPlayer;
pub use registry::{by_name, registered_ais, AiFactory};
pub use search::{enumerate_sequences, Strategist};
pub use trait_def::{AiError, AiPlayer, MoveChoice};
