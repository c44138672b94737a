//! Turn transitions: committing validated drops and draws.
//!
//! Every operation is validate-then-commit: all checks run before the
//! first mutation, so a rejected move leaves the table untouched.

use rand::seq::SliceRandom;

use super::cards_logic::{feeder_penalty, is_feeder, is_plain_finishable, is_question};
use super::cards_types::Card;
use super::rules::validate_sequence;
use super::state::{other_seat, GameTable, PendingDraw, Seat, TableStatus};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// The drop emptied the mover's hand on a finishable card.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The cards that moved from the deck into the drawer's hand.
    pub cards: Vec<Card>,
    /// The discard pile was folded back into the deck to cover the draw.
    pub reshuffled: bool,
}

fn ensure_active_turn(table: &GameTable, seat: Seat) -> Result<(), DomainError> {
    if let TableStatus::Finished { .. } = table.status {
        return Err(DomainError::SessionFinished);
    }
    if table.turn != seat {
        return Err(DomainError::OutOfTurn);
    }
    Ok(())
}

/// Drop a sequence of cards from `seat`'s hand onto the table.
pub fn apply_drop(
    table: &mut GameTable,
    seat: Seat,
    cards: &[Card],
) -> Result<DropOutcome, DomainError> {
    ensure_active_turn(table, seat)?;

    let hand = &table.hands[seat as usize];
    for (i, card) in cards.iter().enumerate() {
        if !hand.contains(card) {
            return Err(DomainError::illegal_move(format!("{card} is not in hand")));
        }
        if cards[..i].contains(card) {
            return Err(DomainError::illegal_move(format!(
                "{card} appears twice in one move"
            )));
        }
    }
    validate_sequence(table.top_card, cards, table.pending_draw)?;

    // Commit. The previous top card and everything but the last played card
    // join the discard pile; the last card becomes the new top.
    let last = cards[cards.len() - 1];
    table.discard.push(table.top_card);
    table.discard.extend_from_slice(&cards[..cards.len() - 1]);
    table.top_card = last;
    table.hands[seat as usize].retain(|c| !cards.contains(c));

    if is_question(last) {
        // The mover keeps the turn: their own question card must be covered.
        table.pending_draw.clear();
    } else if is_feeder(last) {
        table.pending_draw = PendingDraw::owed(feeder_penalty(last));
        table.turn = other_seat(seat);
    } else {
        table.pending_draw.clear();
        table.turn = other_seat(seat);
    }

    // An empty hand only wins on a plain finishable card; emptying on a
    // question or feeder leaves the game running and the side effect live.
    let finished = table.hands[seat as usize].is_empty() && is_plain_finishable(last);
    if finished {
        table.status = TableStatus::Finished { winner: seat };
    }
    Ok(DropOutcome { finished })
}

/// Draw the owed number of cards (the active forced draw, else one) from
/// the deck into `seat`'s hand.
///
/// `claimed` is an optional caller-stated count; the authoritative owed
/// count always decides, a mismatching claim is rejected.
///
/// When the deck cannot cover the draw, the discard pile is shuffled back
/// under the deck first; only if the combined supply is still short does
/// the draw fail, leaving the table untouched.
pub fn apply_draw(
    table: &mut GameTable,
    seat: Seat,
    claimed: Option<u8>,
) -> Result<DrawOutcome, DomainError> {
    ensure_active_turn(table, seat)?;

    let owed = if table.pending_draw.active {
        table.pending_draw.count
    } else {
        1
    };
    if let Some(count) = claimed {
        if count != owed {
            return Err(DomainError::illegal_move(format!(
                "claimed a draw of {count}, but {owed} cards are owed"
            )));
        }
    }

    let available = table.deck.len() + table.discard.len();
    if (owed as usize) > available {
        return Err(DomainError::DeckExhausted {
            requested: owed,
            remaining: available,
        });
    }

    let mut reshuffled = false;
    if table.deck.len() < owed as usize {
        let mut recycled = std::mem::take(&mut table.discard);
        recycled.shuffle(&mut table.rng);
        // Whatever was left of the deck stays on top of the recycled pile.
        recycled.append(&mut table.deck);
        table.deck = recycled;
        reshuffled = true;
    }

    let split = table.deck.len() - owed as usize;
    let cards = table.deck.split_off(split);
    table.hands[seat as usize].extend_from_slice(&cards);
    table.pending_draw.clear();
    table.turn = other_seat(seat);
    Ok(DrawOutcome { cards, reshuffled })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards_types::{Rank, Suit};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    /// A table with fully controlled contents for transition tests.
    fn fixed_table(top: Card, hand0: Vec<Card>, hand1: Vec<Card>, turn: Seat) -> GameTable {
        let mut table = GameTable::deal(0);
        let mut pool = crate::domain::dealing::full_deck();
        pool.retain(|c| *c != top && !hand0.contains(c) && !hand1.contains(c));
        table.deck = pool;
        table.hands = [hand0, hand1];
        table.discard = Vec::new();
        table.top_card = top;
        table.pending_draw = PendingDraw::default();
        table.turn = turn;
        table.status = TableStatus::Active;
        table
    }

    #[test]
    fn rejected_drop_mutates_nothing() {
        let top = card(Suit::Hearts, Rank::Nine);
        let table = fixed_table(top, vec![card(Suit::Clubs, Rank::Four)], vec![], 0);
        let mut after = table.clone();
        let err = apply_drop(&mut after, 0, &[card(Suit::Clubs, Rank::Four)]);
        assert!(matches!(err, Err(DomainError::IllegalMove(_))));
        assert_eq!(after.hands, table.hands);
        assert_eq!(after.top_card, table.top_card);
        assert_eq!(after.turn, table.turn);
    }

    #[test]
    fn drop_from_wrong_seat_is_out_of_turn() {
        let top = card(Suit::Hearts, Rank::Nine);
        let mut table = fixed_table(top, vec![], vec![card(Suit::Hearts, Rank::Four)], 0);
        let err = apply_drop(&mut table, 1, &[card(Suit::Hearts, Rank::Four)]);
        assert_eq!(err, Err(DomainError::OutOfTurn));
    }

    #[test]
    fn drop_of_unheld_card_is_rejected() {
        let top = card(Suit::Hearts, Rank::Nine);
        let mut table = fixed_table(top, vec![card(Suit::Hearts, Rank::Four)], vec![], 0);
        let err = apply_drop(&mut table, 0, &[card(Suit::Hearts, Rank::Five)]);
        assert!(matches!(err, Err(DomainError::IllegalMove(_))));
    }

    #[test]
    fn plain_drop_flips_turn_and_feeds_discard() {
        let top = card(Suit::Hearts, Rank::Nine);
        let four_h = card(Suit::Hearts, Rank::Four);
        let four_c = card(Suit::Clubs, Rank::Four);
        let mut table = fixed_table(top, vec![four_h, four_c, card(Suit::Spades, Rank::King)], vec![], 0);
        let outcome = apply_drop(&mut table, 0, &[four_h, four_c]).unwrap();
        assert!(!outcome.finished);
        assert_eq!(table.top_card, four_c);
        assert_eq!(table.discard, vec![top, four_h]);
        assert_eq!(table.turn, 1);
        assert!(!table.pending_draw.active);
        assert_eq!(table.card_count(), 52);
    }

    #[test]
    fn question_drop_retains_turn() {
        let top = card(Suit::Hearts, Rank::Nine);
        let jack = card(Suit::Hearts, Rank::Jack);
        let mut table = fixed_table(top, vec![jack, card(Suit::Clubs, Rank::Four)], vec![], 0);
        apply_drop(&mut table, 0, &[jack]).unwrap();
        assert_eq!(table.turn, 0);
        assert!(!table.pending_draw.active);
    }

    #[test]
    fn feeder_drop_sets_pending_and_flips_turn() {
        let top = card(Suit::Hearts, Rank::Nine);
        let two = card(Suit::Hearts, Rank::Two);
        let mut table = fixed_table(top, vec![two, card(Suit::Clubs, Rank::Four)], vec![], 0);
        apply_drop(&mut table, 0, &[two]).unwrap();
        assert_eq!(table.pending_draw, PendingDraw::owed(2));
        assert_eq!(table.turn, 1);

        let three = card(Suit::Hearts, Rank::Three);
        let mut table = fixed_table(top, vec![], vec![three, card(Suit::Clubs, Rank::Four)], 1);
        apply_drop(&mut table, 1, &[three]).unwrap();
        assert_eq!(table.pending_draw, PendingDraw::owed(3));
        assert_eq!(table.turn, 0);
    }

    #[test]
    fn emptying_on_finishable_wins() {
        let top = card(Suit::Hearts, Rank::Nine);
        let five = card(Suit::Hearts, Rank::Five);
        let mut table = fixed_table(top, vec![five], vec![card(Suit::Clubs, Rank::Four)], 0);
        let outcome = apply_drop(&mut table, 0, &[five]).unwrap();
        assert!(outcome.finished);
        assert_eq!(table.status, TableStatus::Finished { winner: 0 });
        // A finished table accepts no further moves.
        let err = apply_draw(&mut table, 1, None);
        assert_eq!(err, Err(DomainError::SessionFinished));
    }

    #[test]
    fn emptying_on_question_does_not_win() {
        let top = card(Suit::Hearts, Rank::Nine);
        let king = card(Suit::Hearts, Rank::King);
        let mut table = fixed_table(top, vec![king], vec![card(Suit::Clubs, Rank::Four)], 0);
        let outcome = apply_drop(&mut table, 0, &[king]).unwrap();
        assert!(!outcome.finished);
        assert_eq!(table.status, TableStatus::Active);
        assert!(table.hands[0].is_empty());
        // Still seat 0's turn: their question card awaits a cover, which an
        // empty hand can only satisfy by drawing.
        assert_eq!(table.turn, 0);
    }

    #[test]
    fn emptying_on_feeder_does_not_win() {
        let top = card(Suit::Hearts, Rank::Nine);
        let two = card(Suit::Hearts, Rank::Two);
        let mut table = fixed_table(top, vec![two], vec![card(Suit::Clubs, Rank::Four)], 0);
        let outcome = apply_drop(&mut table, 0, &[two]).unwrap();
        assert!(!outcome.finished);
        assert_eq!(table.status, TableStatus::Active);
        assert_eq!(table.pending_draw, PendingDraw::owed(2));
    }

    #[test]
    fn voluntary_draw_takes_one_card() {
        let mut table = GameTable::deal(42);
        let seat = table.turn;
        let deck_before = table.deck.len();
        let hand_before = table.hands[seat as usize].len();
        let outcome = apply_draw(&mut table, seat, None).unwrap();
        assert_eq!(outcome.cards.len(), 1);
        assert!(!outcome.reshuffled);
        assert_eq!(table.deck.len(), deck_before - 1);
        assert_eq!(table.hands[seat as usize].len(), hand_before + 1);
        assert_eq!(table.turn, other_seat(seat));
        assert_eq!(table.card_count(), 52);
    }

    #[test]
    fn forced_draw_takes_owed_count_and_clears_pending() {
        let mut table = GameTable::deal(42);
        let seat = table.turn;
        table.pending_draw = PendingDraw::owed(3);
        let outcome = apply_draw(&mut table, seat, Some(3)).unwrap();
        assert_eq!(outcome.cards.len(), 3);
        assert!(!table.pending_draw.active);
        assert_eq!(table.card_count(), 52);
    }

    #[test]
    fn mismatching_claim_is_rejected() {
        let mut table = GameTable::deal(42);
        let seat = table.turn;
        table.pending_draw = PendingDraw::owed(2);
        let err = apply_draw(&mut table, seat, Some(1));
        assert!(matches!(err, Err(DomainError::IllegalMove(_))));
        assert!(table.pending_draw.active);
    }

    #[test]
    fn exhausted_deck_reshuffles_discard() {
        let top = card(Suit::Hearts, Rank::Nine);
        let mut table = fixed_table(top, vec![card(Suit::Clubs, Rank::Four)], vec![], 0);
        // Move all but one deck card to the discard pile.
        let rest = table.deck.split_off(1);
        table.discard.extend(rest);
        table.pending_draw = PendingDraw::owed(3);
        let outcome = apply_draw(&mut table, 0, None).unwrap();
        assert_eq!(outcome.cards.len(), 3);
        assert!(outcome.reshuffled);
        assert!(table.discard.is_empty());
        assert_eq!(table.card_count(), 52);
    }

    #[test]
    fn truly_exhausted_draw_fails_without_mutation() {
        let top = card(Suit::Hearts, Rank::Nine);
        let mut table = fixed_table(top, vec![card(Suit::Clubs, Rank::Four)], vec![], 0);
        table.deck.truncate(1);
        table.discard.clear();
        table.pending_draw = PendingDraw::owed(3);
        let before_deck = table.deck.clone();
        let err = apply_draw(&mut table, 0, None);
        assert_eq!(
            err,
            Err(DomainError::DeckExhausted {
                requested: 3,
                remaining: 1
            })
        );
        assert_eq!(table.deck, before_deck);
        assert!(table.pending_draw.active);
        assert_eq!(table.turn, 0);
    }
}
