//! Legality of proposed card sequences against the current top card.
//!
//! A move is a non-empty sequence of cards dropped in one action. Legality
//! is all-or-nothing: the first failing step rejects the whole sequence and
//! nothing anywhere is mutated.

use super::cards_logic::{is_question, is_wild, matches_face};
use super::cards_types::Card;
use super::state::PendingDraw;
use crate::errors::domain::DomainError;

/// Whether `card` may legally extend a sequence whose previous card is
/// `prev`. `depth` 0 means `prev` is the table's top card itself.
///
/// Forced-draw mode: the opener must rank-match the top card or be wild;
/// afterwards only exact rank stacking continues the counter chain.
/// Normal mode: the opener must match the top card by suit, rank, or
/// wildness; a question card re-opens suit/rank/wild matching for the card
/// covering it, anything else only stacks by exact rank.
pub fn may_follow(prev: Card, card: Card, depth: usize, pending: PendingDraw) -> bool {
    if pending.active {
        if depth == 0 {
            card.rank == prev.rank || is_wild(card)
        } else {
            card.rank == prev.rank
        }
    } else if depth == 0 || is_question(prev) {
        matches_face(card, prev)
    } else {
        card.rank == prev.rank
    }
}

/// Validate a whole proposed sequence against the top card and forced-draw
/// state. Pure; every caller runs this before committing anything.
pub fn validate_sequence(
    top: Card,
    seq: &[Card],
    pending: PendingDraw,
) -> Result<(), DomainError> {
    if seq.is_empty() {
        return Err(DomainError::illegal_move("empty sequence"));
    }
    let mut prev = top;
    for (depth, &card) in seq.iter().enumerate() {
        if !may_follow(prev, card, depth, pending) {
            return Err(DomainError::illegal_move(format!(
                "{card} cannot follow {prev}"
            )));
        }
        prev = card;
    }
    Ok(())
}

/// Cards in `hand` that could open a legal sequence right now.
pub fn playable_first_cards(top: Card, hand: &[Card], pending: PendingDraw) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&card| may_follow(top, card, 0, pending))
        .collect()
}
