use decklayout_ui_graphics::Size;

use crate::{Card, DeckConfig};

/// Distance under which two card edges count as the same position.
pub const POSITION_TOLERANCE: f32 = 0.5;

/// Snapshot of the deck geometry one layout, drag or navigation pass works on.
///
/// Passes read the deck size and configuration from here instead of from the
/// deck, so a pass never observes values changing underneath it. Stacking
/// decisions use each card's resting offset, so a pass issued while cards
/// are still sliding works from where they are headed.
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    cards: &'a [Card],
    size: Size,
    config: DeckConfig,
    min_card_width: f32,
}

impl<'a> LayoutContext<'a> {
    pub fn new(cards: &'a [Card], size: Size, config: DeckConfig, min_card_width: f32) -> Self {
        Self {
            cards,
            size,
            config,
            min_card_width,
        }
    }

    /// Cards in drawing order, back-most first.
    pub fn cards(&self) -> &'a [Card] {
        self.cards
    }

    pub fn card(&self, index: usize) -> Option<&'a Card> {
        self.cards.get(index)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn spacing(&self) -> f32 {
        self.config.spacing
    }

    pub fn min_left(&self) -> f32 {
        self.config.left_most.min
    }

    pub fn max_left(&self) -> f32 {
        self.config.left_most.max
    }

    pub fn min_card_width(&self) -> f32 {
        self.min_card_width
    }

    /// Whether the card rests at the minimum left-most bound.
    pub fn is_parked(&self, card: &Card) -> bool {
        (card.resting_left() - self.min_left()).abs() < POSITION_TOLERANCE
    }

    /// Whether the card rests right of the parking position.
    pub fn is_past_min(&self, card: &Card) -> bool {
        card.resting_left() > self.min_left() && !self.is_parked(card)
    }
}
