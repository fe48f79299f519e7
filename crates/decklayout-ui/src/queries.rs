//! Read-only position queries. Indices count cards only; the side panel is
//! never part of them. `None` stands for "no such card".
//!
//! Stacking queries answer for resting offsets; hit testing answers for what
//! is drawn.

use crate::{Card, LayoutContext};

impl<'a> LayoutContext<'a> {
    pub fn card_count(&self) -> usize {
        self.cards().len()
    }

    pub fn first_card_position(&self) -> Option<usize> {
        if self.cards().is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn last_card_position(&self) -> Option<usize> {
        self.cards().len().checked_sub(1)
    }

    /// Back-most card that is still visible: walking back from the front, the
    /// first card parked at the minimum bound, or the first card of the deck
    /// when none is parked.
    pub fn left_card_position(&self) -> Option<usize> {
        let last = self.last_card_position()?;
        let mut position = last;
        for (index, card) in self.cards()[..last].iter().enumerate().rev() {
            position = index;
            if self.is_parked(card) {
                break;
            }
        }
        Some(position)
    }

    /// Front-most card straddling the deck's right edge.
    pub fn right_card_position(&self) -> Option<usize> {
        let edge = self.width();
        self.cards()
            .iter()
            .rposition(|card| card.resting_span().straddles(edge))
    }

    /// Front-most visible card whose content contains `x`.
    pub fn card_at(&self, x: f32) -> Option<&'a Card> {
        self.cards()
            .iter()
            .rev()
            .find(|card| card.is_visible() && card.contains_point(x))
    }
}
