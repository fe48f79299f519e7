//! Card sizing and chaining.
//!
//! Widths are settled before anything is positioned: every placement rule
//! below reads the final widths.

use decklayout_ui_graphics::Size;

use crate::{Card, LayoutContext, LeftMost, SizingMode};

/// Minimum content width of a `Default` card for a deck of `size`.
///
/// Portrait decks give a card everything right of `max`; landscape decks fit
/// two cards side by side right of `min`.
pub fn min_card_width(size: Size, left_most: LeftMost) -> f32 {
    if size.is_portrait() {
        size.width - left_most.max
    } else {
        (size.width - left_most.min) / 2.0
    }
}

/// Offset that puts `card`'s left edge `spacing` after `previous_right`.
pub fn chained_offset(previous_right: f32, card: &Card, spacing: f32) -> f32 {
    previous_right + spacing - card.padding().left
}

impl<'a> LayoutContext<'a> {
    /// Width the deck wants for `card`, or `None` when the card sizes itself.
    pub fn target_width(&self, card: &Card) -> Option<f32> {
        let padding = card.padding().horizontal_sum();
        match card.sizing_mode() {
            SizingMode::Fixed => None,
            SizingMode::Fill => Some(self.width() - self.min_left() + padding),
            SizingMode::Default => Some(self.min_card_width() + padding),
        }
    }

    /// Apply the sizing rules to every visible card. Hidden cards keep their
    /// width until they are measured again.
    pub(crate) fn measure_cards(&self) {
        for card in self.cards().iter().filter(|card| card.is_visible()) {
            if let Some(width) = self.target_width(card) {
                card.set_width(width);
            }
        }
    }

    /// Widen a card that is about to join the deck. Insertion never shrinks a
    /// card, and `Default` cards wait until a measure pass has produced a
    /// minimum width.
    pub(crate) fn size_new_card(&self, card: &Card) {
        if card.sizing_mode() == SizingMode::Default && self.min_card_width() <= 0.0 {
            return;
        }
        if let Some(width) = self.target_width(card) {
            let current = card.width();
            if current <= 0.0 || current < width {
                card.set_width(width);
            }
        }
    }

    /// Re-chain every card in front of the back-most visible card so each
    /// starts `spacing` after its predecessor's right edge.
    pub(crate) fn chain_from_left_card(&self) {
        let Some(start) = self.left_card_position() else {
            return;
        };
        let mut previous: Option<&Card> = None;
        for card in self.cards()[start..].iter().filter(|card| card.is_visible()) {
            if let Some(previous) = previous {
                card.set_offset(chained_offset(previous.right(), card, self.spacing()));
            }
            previous = Some(card);
        }
    }
}
