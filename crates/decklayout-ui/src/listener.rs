use crate::{Card, Deck};

/// Observer of deck layout and of drags that may end in removing a card.
///
/// The deck never removes a card on its own; a listener that decides a card
/// should go calls [`Deck::remove_card`] itself.
pub trait DeckListener {
    /// A layout pass completed.
    fn on_layout(&self, _deck: &Deck) {}

    /// Fired on every move of a drag with the back-most card, whose
    /// displacement drives any removal feedback.
    fn on_remove_drag(&self, _deck: &Deck, _first_card: &Card) {}

    /// The drag ended, right before the deck flings to rest.
    fn on_remove_drag_end(&self, _deck: &Deck) {}
}
