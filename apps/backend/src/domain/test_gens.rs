// Proptest generators for domain types.

use proptest::prelude::*;

use super::cards_types::{Card, Rank, Suit};
use super::dealing::full_deck;
use super::state::PendingDraw;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(crate::domain::cards_types::RANKS.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// A hand of up to `max` distinct cards drawn from one 52-card deck.
pub fn hand_up_to(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(full_deck(), 0..=max)
}

/// Forced-draw state: inactive, or an owed 2 or 3.
pub fn pending_draw() -> impl Strategy<Value = PendingDraw> {
    prop_oneof![
        Just(PendingDraw::default()),
        Just(PendingDraw::owed(2)),
        Just(PendingDraw::owed(3)),
    ]
}
