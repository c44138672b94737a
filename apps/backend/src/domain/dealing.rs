//! Deck construction.

use super::cards_types::{Card, RANKS, SUITS};

pub const DECK_SIZE: usize = 52;

/// Full 52-card deck in standard order. No jokers, no duplicate values.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in SUITS {
        for rank in RANKS {
            deck.push(Card { suit, rank });
        }
    }
    deck
}
