//! Property-based tests for sequence legality and card conservation.

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::turns::{apply_drop, apply_draw};
use crate::domain::{
    is_plain_finishable, is_wild, playable_first_cards, validate_sequence, view_for, Card,
    GameTable, PendingDraw, Rank, TableStatus,
};
use crate::errors::domain::DomainError;

proptest! {
    /// Validator soundness: a single card is accepted exactly when it
    /// matches the top card by suit, by rank, or is wild.
    #[test]
    fn prop_single_card_soundness(top in test_gens::card(), card in test_gens::card()) {
        let accepted = validate_sequence(top, &[card], PendingDraw::default()).is_ok();
        let expected = card.suit == top.suit || card.rank == top.rank || is_wild(card);
        prop_assert_eq!(accepted, expected);
    }

    /// Under a forced draw only a rank match or a wild counters.
    #[test]
    fn prop_single_card_soundness_forced(
        top in test_gens::card(),
        card in test_gens::card(),
        count in 2u8..=3,
    ) {
        let accepted = validate_sequence(top, &[card], PendingDraw::owed(count)).is_ok();
        let expected = card.rank == top.rank || is_wild(card);
        prop_assert_eq!(accepted, expected);
    }

    /// Everything the AI enumerates passes the validator.
    #[test]
    fn prop_enumerated_sequences_are_valid(
        top in test_gens::card(),
        hand in test_gens::hand_up_to(8),
        pending in test_gens::pending_draw(),
    ) {
        for seq in crate::ai::enumerate_sequences(top, &hand, pending) {
            prop_assert!(validate_sequence(top, &seq, pending).is_ok());
        }
    }

    /// Closed-deck invariant: 52 cards across deck, hands, discard, and the
    /// top card after every accepted drop or draw, reshuffles included.
    #[test]
    fn prop_closed_deck_invariant(
        seed in any::<u64>(),
        steps in proptest::collection::vec(0u8..8, 0..80),
    ) {
        let mut table = GameTable::deal(seed);
        prop_assert_eq!(table.card_count(), 52);
        for step in steps {
            if table.status != TableStatus::Active {
                break;
            }
            let seat = table.turn;
            let view = view_for(&table, seat);
            let playable = playable_first_cards(view.top_card, &view.hand, view.pending_draw);
            let acted = if !playable.is_empty() && step > 0 {
                let card = playable[step as usize % playable.len()];
                apply_drop(&mut table, seat, &[card]).map(|_| ())
            } else {
                apply_draw(&mut table, seat, None).map(|_| ())
            };
            match acted {
                Ok(()) | Err(DomainError::DeckExhausted { .. }) => {}
                Err(err) => prop_assert!(false, "unexpected error: {err}"),
            }
            prop_assert_eq!(table.card_count(), 52);
        }
    }

    /// Emptying the hand ends the session exactly for plain finishable
    /// ranks.
    #[test]
    fn prop_finish_legality(
        seed in any::<u64>(),
        suit in test_gens::suit(),
        rank in test_gens::rank(),
    ) {
        let mut table = GameTable::deal(seed);
        let seat = table.turn;
        let last = Card { suit, rank };
        let top_rank = if rank == Rank::Nine { Rank::Ten } else { Rank::Nine };
        table.top_card = Card { suit, rank: top_rank };
        table.hands[seat as usize] = vec![last];
        table.pending_draw = PendingDraw::default();

        let outcome = apply_drop(&mut table, seat, &[last]);
        prop_assert!(outcome.is_ok());
        let finished = outcome.map(|o| o.finished).unwrap_or(false);
        prop_assert_eq!(finished, is_plain_finishable(last));
        prop_assert_eq!(
            matches!(table.status, TableStatus::Finished { .. }),
            is_plain_finishable(last)
        );
    }

    /// A feeder as the last card always obligates the other seat for the
    /// matching count; a question always retains the turn.
    #[test]
    fn prop_side_effects_of_last_card(
        seed in any::<u64>(),
        suit in test_gens::suit(),
        rank in test_gens::rank(),
    ) {
        let mut table = GameTable::deal(seed);
        let seat = table.turn;
        let last = Card { suit, rank };
        let top_rank = if rank == Rank::Nine { Rank::Ten } else { Rank::Nine };
        table.top_card = Card { suit, rank: top_rank };
        // A second card keeps the hand non-empty so finishing never
        // interferes with the property.
        let filler = Card {
            suit,
            rank: if rank == Rank::King { Rank::Queen } else { Rank::King },
        };
        table.hands[seat as usize] = vec![last, filler];
        table.pending_draw = PendingDraw::default();

        apply_drop(&mut table, seat, &[last]).unwrap();
        match rank {
            Rank::Two => {
                prop_assert_eq!(table.pending_draw, PendingDraw::owed(2));
                prop_assert_eq!(table.turn, 1 - seat);
            }
            Rank::Three => {
                prop_assert_eq!(table.pending_draw, PendingDraw::owed(3));
                prop_assert_eq!(table.turn, 1 - seat);
            }
            Rank::Eight | Rank::Jack | Rank::Queen | Rank::King => {
                prop_assert!(!table.pending_draw.active);
                prop_assert_eq!(table.turn, seat);
            }
            _ => {
                prop_assert!(!table.pending_draw.active);
                prop_assert_eq!(table.turn, 1 - seat);
            }
        }
    }
}
