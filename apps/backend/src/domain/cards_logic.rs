//! Rank classes and the face-match rule.

use super::cards_types::{Card, Rank};

/// Aces match any top card and cancel or continue a forced-draw chain.
pub fn is_wild(card: Card) -> bool {
    card.rank == Rank::Ace
}

/// Twos and threes force the next player to draw unless countered.
pub fn is_feeder(card: Card) -> bool {
    matches!(card.rank, Rank::Two | Rank::Three)
}

/// How many cards an uncountered feeder makes the next player draw.
/// Zero for non-feeders.
pub fn feeder_penalty(card: Card) -> u8 {
    match card.rank {
        Rank::Two => 2,
        Rank::Three => 3,
        _ => 0,
    }
}

/// Question cards keep the turn with their player until covered.
pub fn is_question(card: Card) -> bool {
    matches!(
        card.rank,
        Rank::Eight | Rank::Jack | Rank::Queen | Rank::King
    )
}

/// Only ranks with no side effect may legally empty a hand.
pub fn is_plain_finishable(card: Card) -> bool {
    matches!(
        card.rank,
        Rank::Four | Rank::Five | Rank::Six | Rank::Seven | Rank::Nine | Rank::Ten
    )
}

/// A card may be played onto `face` when the suits or ranks match, or the
/// card is wild.
pub fn matches_face(card: Card, face: Card) -> bool {
    card.suit == face.suit || card.rank == face.rank || is_wild(card)
}
