//! Applying drag deltas to the stack.

use crate::{Card, LayoutContext, Visibility};

impl<'a> LayoutContext<'a> {
    /// Hide cards lying completely behind the back-most visible card.
    ///
    /// Everything before the card directly behind the left card is covered,
    /// so it can be skipped when drawing.
    pub(crate) fn hide_under_cards(&self) {
        let Some(left) = self.left_card_position() else {
            return;
        };
        let covered = left.saturating_sub(1);
        for card in &self.cards()[..covered] {
            if card.is_visible() {
                log::trace!("hiding covered {}", card.id());
            }
            card.set_visibility(Visibility::Hidden);
        }
    }

    /// Move the stack by `delta` pixels, positive towards the left.
    pub(crate) fn apply_drag(&self, delta: f32) {
        if delta > 0.0 {
            self.compress(delta);
        } else if delta < 0.0 {
            self.expand(-delta);
        }
    }

    /// Leftward drag. The front card leads, cards behind it follow until they
    /// reach the parking position, cards already parked stay put.
    fn compress(&self, distance: f32) {
        self.hide_under_cards();

        let floor = if self.card_count() > 1 {
            self.min_left()
        } else {
            0.0
        };
        let mut cards = self.cards().iter().rev();
        if let Some(front) = cards.next() {
            let moved = front.offset() - distance;
            front.set_offset(moved.max(front.offset_for_left(floor)));
        }
        for card in cards.filter(|card| self.is_past_min(card)) {
            let moved = card.offset() - distance;
            card.set_offset(moved.max(card.offset_for_left(self.min_left())));
        }
    }

    /// Rightward drag. The front card moves freely and pulls the cards
    /// behind it along whenever the gap to its neighbour would exceed the
    /// configured spacing.
    fn expand(&self, distance: f32) {
        if let Some(left) = self.left_card_position() {
            for card in &self.cards()[left.saturating_sub(1)..] {
                card.set_visibility(Visibility::Visible);
            }
        }

        let mut in_front: Option<&Card> = None;
        for card in self.cards().iter().rev() {
            match in_front {
                None => card.set_offset(card.offset() + distance),
                Some(neighbour) => {
                    let limit = neighbour.left() - self.spacing();
                    if card.right() < limit {
                        card.set_offset(card.offset_for_right(limit));
                    }
                }
            }
            in_front = Some(card);
        }
    }
}
