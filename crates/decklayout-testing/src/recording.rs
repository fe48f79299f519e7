//! A [`DeckListener`] that remembers what it was told.

use std::cell::RefCell;
use std::rc::Rc;

use decklayout_ui::{Card, CardId, Deck, DeckListener};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckEvent {
    Layout,
    /// A drag frame moved the stack; carries the deck's first card.
    RemoveDrag(CardId),
    RemoveDragEnd,
}

/// Records every listener callback. Clones share one log, so a test keeps a
/// clone after installing the listener on a deck.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<DeckEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeckEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: DeckEvent) -> usize {
        self.events.borrow().iter().filter(|seen| **seen == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: DeckEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl DeckListener for RecordingListener {
    fn on_layout(&self, _deck: &Deck) {
        self.push(DeckEvent::Layout);
    }

    fn on_remove_drag(&self, _deck: &Deck, first: &Card) {
        self.push(DeckEvent::RemoveDrag(first.id()));
    }

    fn on_remove_drag_end(&self, _deck: &Deck) {
        self.push(DeckEvent::RemoveDragEnd);
    }
}
