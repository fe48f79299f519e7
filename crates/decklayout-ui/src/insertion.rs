//! Adding and removing deck children.

use crate::arrangement::chained_offset;
use crate::{Card, Deck, DeckChild, SidePanel};

impl Deck {
    /// Append `card` on top of the stack.
    ///
    /// The first card rests at the maximum left-most bound. Any later card
    /// lands right of the previous front card as if that card were parked,
    /// pulled back so it never runs past the deck's right edge, and every
    /// card standing right of the parking position slides back to it.
    pub fn add_card(&self, card: Card) {
        let config = self.config();
        let parked_cards = self.with_layout_context(|ctx| {
            ctx.size_new_card(&card);
            let Some(last) = ctx.cards().last() else {
                card.set_offset(card.offset_for_left(ctx.max_left()));
                return Vec::new();
            };

            let parked_right = ctx.min_left() + last.width() - last.padding().horizontal_sum();
            let chained = chained_offset(parked_right, &card, ctx.spacing());
            card.set_offset(chained.min(card.offset_for_right(ctx.width())));

            ctx.cards()
                .iter()
                .filter(|existing| ctx.is_past_min(existing))
                .map(|existing| {
                    let target = existing.offset_for_left(ctx.min_left());
                    (existing.clone(), existing.offset(), target)
                })
                .collect()
        });

        log::debug!(
            "adding {} at {} ({} cards slide back)",
            card.id(),
            card.offset(),
            parked_cards.len()
        );
        self.inner.cards.borrow_mut().push(card);

        for (existing, from, to) in parked_cards {
            let on_end = self.hide_under_cards_later();
            self.inner.animator.slide(
                &existing,
                from,
                to,
                None,
                config.bounce_duration_millis,
                Some(on_end),
            );
        }
    }

    /// Remove `card` from the deck, dropping its animation. Returns false when
    /// the card is not part of this deck.
    pub fn remove_card(&self, card: &Card) -> bool {
        let removed = {
            let mut cards = self.inner.cards.borrow_mut();
            cards
                .iter()
                .position(|existing| existing.ptr_eq(card))
                .map(|index| cards.remove(index))
        };
        match removed {
            Some(card) => {
                self.inner.animator.forget(card.id());
                log::debug!("removed {}", card.id());
                true
            }
            None => false,
        }
    }

    /// Install `panel` beneath the cards, replacing any previous panel.
    pub fn set_side_panel(&self, panel: SidePanel) {
        if let Some(previous) = self.inner.side_panel.borrow_mut().replace(panel) {
            log::debug!("replaced side panel {:?}", previous.name());
        }
    }

    pub fn remove_side_panel(&self) -> Option<SidePanel> {
        self.inner.side_panel.borrow_mut().take()
    }

    pub fn side_panel(&self) -> Option<SidePanel> {
        self.inner.side_panel.borrow().clone()
    }

    /// Every child in drawing order: the side panel first, then the cards.
    pub fn children(&self) -> Vec<DeckChild> {
        let panel = self.side_panel().map(DeckChild::SidePanel);
        panel
            .into_iter()
            .chain(self.cards().into_iter().map(DeckChild::Card))
            .collect()
    }

    pub fn child_count(&self) -> usize {
        usize::from(self.inner.side_panel.borrow().is_some()) + self.card_count()
    }
}
