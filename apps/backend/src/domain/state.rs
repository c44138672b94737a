//! Authoritative table state for one match.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::dealing::full_deck;

pub type Seat = u8; // 0 or 1

pub const SEATS: usize = 2;
pub const OPENING_HAND: usize = 4;

/// How many dead cards players get to see.
pub const RECENT_DISCARDS: usize = 5;

#[inline]
pub fn other_seat(seat: Seat) -> Seat {
    1 - seat
}

/// An owed forced draw, set by an uncountered feeder card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingDraw {
    pub count: u8,
    pub active: bool,
}

impl PendingDraw {
    pub fn owed(count: u8) -> Self {
        Self {
            count,
            active: true,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    /// Terminal. Entered exactly once; no further moves are accepted.
    Finished { winner: Seat },
}

/// The single source of truth for a match: deck, both hands, discard pile,
/// top card, forced-draw state, and turn owner. All mutation goes through
/// `domain::turns`; everything a player may see comes out of
/// `domain::snapshot`.
///
/// The table owns a seeded RNG, so a seed fully determines the deal, the
/// opening turn owner, and any later reshuffle.
#[derive(Debug, Clone)]
pub struct GameTable {
    pub(crate) rng: ChaCha8Rng,
    pub deck: Vec<Card>,
    pub hands: [Vec<Card>; SEATS],
    /// Dead cards in play order. Only the tail is ever shown.
    pub discard: Vec<Card>,
    pub top_card: Card,
    pub pending_draw: PendingDraw,
    pub turn: Seat,
    pub status: TableStatus,
}

impl GameTable {
    /// Shuffle a fresh deck, deal four cards to each seat, and turn up one
    /// top card.
    pub fn deal(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = full_deck();
        deck.shuffle(&mut rng);

        // Seat 0 takes the first four cards, seat 1 the next four, then the
        // opening top card; the rest stays undealt.
        let hands = [
            deck[..OPENING_HAND].to_vec(),
            deck[OPENING_HAND..2 * OPENING_HAND].to_vec(),
        ];
        let top_card = deck[2 * OPENING_HAND];
        let deck = deck.split_off(2 * OPENING_HAND + 1);

        let turn = rng.random_range(0..SEATS as Seat);
        Self {
            rng,
            deck,
            hands,
            discard: Vec::new(),
            top_card,
            pending_draw: PendingDraw::default(),
            turn,
            status: TableStatus::Active,
        }
    }

    /// Total cards across deck, hands, discard, and the top card. Equals 52
    /// after every legal mutation (closed-deck invariant).
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(Vec::len).sum::<usize>()
            + self.discard.len()
            + 1
    }

    /// Display tail of the discard pile, oldest first.
    pub fn recent_discards(&self) -> Vec<Card> {
        let skip = self.discard.len().saturating_sub(RECENT_DISCARDS);
        self.discard[skip..].to_vec()
    }
}
