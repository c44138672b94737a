//! Strategist — exhaustive move search over legal sequence chains.
//!
//! Enumeration: depth-first over every sequence the rule validator would
//! accept, backtracking through the hand. Discovery order is pre-order with
//! candidates tried in hand order, so behavior is deterministic for a fixed
//! hand ordering.
//!
//! Scoring, applied to the hand left after hypothetically playing a
//! candidate:
//! - base −50 per remaining card;
//! - +10 × (count − 1) for each rank still held more than once (keeps
//!   future stacks together);
//! - a candidate that empties the hand on a plain finishable card scores a
//!   dominant maximum.
//!
//! Ties keep the first-discovered candidate. A lone question card as the
//! best move is occasionally held back in favor of drawing (the bluff), so
//! opponents cannot read a question card as forced.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_def::{AiError, AiPlayer, MoveChoice};
use crate::domain::rules::may_follow;
use crate::domain::{is_plain_finishable, is_question, Card, PendingDraw, Rank, TableView};

/// Dominant score for a candidate that wins outright.
const WIN_SCORE: i32 = 99_999;

/// Default probability of holding back a lone question card.
const BLUFF_RATE: f64 = 0.25;

pub struct Strategist {
    rng: Mutex<StdRng>,
    bluff_rate: f64,
}

impl Strategist {
    pub const NAME: &'static str = "Strategist";
    pub const VERSION: &'static str = "1.0.0";

    /// `seed` pins the bluff RNG for reproducible behavior; `None` seeds
    /// from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_bluff_rate(seed, BLUFF_RATE)
    }

    /// Same, with an explicit bluff probability in `[0, 1]`. Tests use the
    /// endpoints to force or forbid the bluff.
    pub fn with_bluff_rate(seed: Option<u64>, bluff_rate: f64) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            bluff_rate: bluff_rate.clamp(0.0, 1.0),
        }
    }
}

/// Every legal sequence playable from `hand`, in deterministic depth-first
/// discovery order. Does not include the empty sequence; "no candidates"
/// means draw.
pub fn enumerate_sequences(top: Card, hand: &[Card], pending: PendingDraw) -> Vec<Vec<Card>> {
    let mut found = Vec::new();
    let mut remaining = hand.to_vec();
    let mut path = Vec::new();
    walk(top, pending, &mut remaining, &mut path, &mut found);
    found
}

fn walk(
    prev: Card,
    pending: PendingDraw,
    remaining: &mut Vec<Card>,
    path: &mut Vec<Card>,
    found: &mut Vec<Vec<Card>>,
) {
    if !path.is_empty() {
        found.push(path.clone());
    }
    for i in 0..remaining.len() {
        let card = remaining[i];
        if !may_follow(prev, card, path.len(), pending) {
            continue;
        }
        remaining.remove(i);
        path.push(card);
        walk(card, pending, remaining, path, found);
        path.pop();
        remaining.insert(i, card);
    }
}

/// Score a candidate by the hand it would leave behind.
fn score_candidate(hand: &[Card], candidate: &[Card]) -> i32 {
    // A hand never holds two equal cards (single 52-card deck), so value
    // filtering is exact removal.
    let remaining: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| !candidate.contains(c))
        .collect();

    if remaining.is_empty() {
        if let Some(&last) = candidate.last() {
            if is_plain_finishable(last) {
                return WIN_SCORE;
            }
        }
    }

    let mut score = -50 * remaining.len() as i32;
    let mut per_rank: HashMap<Rank, i32> = HashMap::new();
    for card in &remaining {
        *per_rank.entry(card.rank).or_insert(0) += 1;
    }
    for &count in per_rank.values() {
        if count > 1 {
            score += (count - 1) * 10;
        }
    }
    score
}

impl AiPlayer for Strategist {
    fn choose_move(&self, view: &TableView) -> Result<MoveChoice, AiError> {
        let candidates = enumerate_sequences(view.top_card, &view.hand, view.pending_draw);

        let mut best: Option<(&Vec<Card>, i32)> = None;
        for candidate in &candidates {
            let score = score_candidate(&view.hand, candidate);
            match best {
                None => best = Some((candidate, score)),
                Some((_, top_score)) if score > top_score => best = Some((candidate, score)),
                _ => {}
            }
        }

        let Some((choice, _)) = best else {
            return Ok(MoveChoice::Draw);
        };

        if choice.len() == 1 && is_question(choice[0]) {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
            if rng.random_bool(self.bluff_rate) {
                return Ok(MoveChoice::Draw);
            }
        }

        Ok(MoveChoice::Drop(choice.clone()))
    }
}
