//! Assertion utilities for robot testing
//!
//! Helpers that check the deck's geometric invariants with a tolerance, so
//! tests read the same whether cards landed exactly or within a fraction of a
//! pixel.

use decklayout_ui::{Card, Deck};
use decklayout_ui_graphics::Span;

/// Default tolerance for offsets, in pixels.
pub const OFFSET_TOLERANCE: f32 = 0.5;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that every card's offset matches `expected`, back to front.
pub fn assert_offsets_approx(deck: &Deck, expected: &[f32], msg: &str) {
    let cards = deck.cards();
    assert_eq!(
        cards.len(),
        expected.len(),
        "{}: expected {} cards, got {}",
        msg,
        expected.len(),
        cards.len()
    );
    for (index, (card, &offset)) in cards.iter().zip(expected).enumerate() {
        assert_approx_eq(
            card.offset(),
            offset,
            OFFSET_TOLERANCE,
            &format!("{} - card {}", msg, index),
        );
    }
}

/// Assert that the deck rests: nothing animates, the back-most visible card
/// and everything behind it is parked at the minimum bound, and every card
/// in front is chained to its predecessor. The front card may instead be
/// clamped against the deck's right edge. A deck of one card rests with
/// that card at the maximum bound.
pub fn assert_resting_configuration(deck: &Deck, msg: &str) {
    assert!(!deck.is_animating(), "{}: deck is still animating", msg);
    let cards = deck.cards();
    let Some(left) = deck.left_card_position() else {
        return;
    };
    let config = deck.config();
    if let [lone] = cards.as_slice() {
        // A lone card rests at the maximum bound.
        assert_approx_eq(
            lone.left(),
            config.left_most.max,
            OFFSET_TOLERANCE,
            &format!("{} - lone card", msg),
        );
        return;
    }
    let min = config.left_most.min;

    for (index, card) in cards[..=left].iter().enumerate() {
        if card.is_visible() {
            assert_approx_eq(
                card.left(),
                min,
                OFFSET_TOLERANCE,
                &format!("{} - parked card {}", msg, index),
            );
        }
    }

    let last = cards.len() - 1;
    for index in left + 1..cards.len() {
        let chained = cards[index - 1].right() + config.spacing;
        let card = &cards[index];
        if index == last && (card.left() - chained).abs() > OFFSET_TOLERANCE {
            assert_approx_eq(
                card.right(),
                deck.width(),
                OFFSET_TOLERANCE,
                &format!("{} - front card clamped to the right edge", msg),
            );
        } else {
            assert_approx_eq(
                card.left(),
                chained,
                OFFSET_TOLERANCE,
                &format!("{} - card {} chained", msg, index),
            );
        }
    }
}

/// Assert that every hidden card lies inside the span of a card in front of it.
pub fn assert_hidden_cards_covered(deck: &Deck, msg: &str) {
    let cards = deck.cards();
    for (index, card) in cards.iter().enumerate() {
        if card.is_visible() {
            continue;
        }
        assert!(
            covered_by_any(card, &cards[index + 1..]),
            "{}: hidden card {} at {:?} is not covered",
            msg,
            index,
            card.span()
        );
    }
}

fn covered_by_any(card: &Card, in_front: &[Card]) -> bool {
    let span = card.span();
    in_front.iter().any(|other| {
        let cover = other.span();
        Span::new(cover.start - OFFSET_TOLERANCE, cover.end + OFFSET_TOLERANCE).covers(&span)
    })
}

/// Assert that the front card does not run past the deck's right edge.
pub fn assert_front_card_inside(deck: &Deck, msg: &str) {
    if let Some(front) = deck.cards().last() {
        assert!(
            front.right() <= deck.width() + OFFSET_TOLERANCE,
            "{}: front card ends at {} past the deck width {}",
            msg,
            front.right(),
            deck.width()
        );
    }
}
