//! Random AI player - plays a random playable card or draws.
//!
//! Baseline opponent used in tests and as a fallback. Thread-safe interior
//! mutability via `Mutex<StdRng>`, deterministic when seeded.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::trait_def::{AiError, AiPlayer, MoveChoice};
use crate::domain::playable_first_cards;
use crate::domain::TableView;

pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `seed` makes behavior reproducible; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_move(&self, view: &TableView) -> Result<MoveChoice, AiError> {
        let playable = playable_first_cards(view.top_card, &view.hand, view.pending_draw);
        if playable.is_empty() {
            return Ok(MoveChoice::Draw);
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        let choice = playable
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("failed to choose a random card".into()))?;
        Ok(MoveChoice::Drop(vec![choice]))
    }
}
