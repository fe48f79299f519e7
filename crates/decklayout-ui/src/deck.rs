//! The deck container.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use decklayout_core::FrameClock;
use decklayout_foundation::{PointerEvent, ViewConfiguration};
use decklayout_ui_graphics::Size;

use crate::animator::CardAnimator;
use crate::arrangement::min_card_width;
use crate::{
    Card, DeckConfig, DeckConfigError, DeckListener, DragGestureDetector, GestureAction,
    GestureState, LayoutContext, LeftMost, NavigationPlan, SidePanel, Visibility,
};

pub(crate) struct DeckInner {
    pub(crate) cards: RefCell<Vec<Card>>,
    pub(crate) side_panel: RefCell<Option<SidePanel>>,
    pub(crate) config: Cell<DeckConfig>,
    size: Cell<Size>,
    min_card_width: Cell<f32>,
    gesture: RefCell<DragGestureDetector>,
    pub(crate) animator: CardAnimator,
    listener: RefCell<Option<Rc<dyn DeckListener>>>,
}

/// Horizontally stacked cards that the user drags and flings through.
///
/// Later cards draw on top of earlier ones. Card positions are only ever
/// changed from the thread driving the deck, including the animation frames
/// of its [`FrameClock`].
///
/// Clones share the same deck.
#[derive(Clone)]
pub struct Deck {
    pub(crate) inner: Rc<DeckInner>,
}

impl Deck {
    pub fn new(clock: FrameClock) -> Self {
        Self::from_parts(clock, DeckConfig::default())
    }

    pub fn with_config(clock: FrameClock, config: DeckConfig) -> Result<Self, DeckConfigError> {
        config.validate()?;
        Ok(Self::from_parts(clock, config))
    }

    fn from_parts(clock: FrameClock, config: DeckConfig) -> Self {
        Self {
            inner: Rc::new(DeckInner {
                cards: RefCell::new(Vec::new()),
                side_panel: RefCell::new(None),
                config: Cell::new(config),
                size: Cell::new(Size::ZERO),
                min_card_width: Cell::new(0.0),
                gesture: RefCell::new(DragGestureDetector::default()),
                animator: CardAnimator::new(clock),
                listener: RefCell::new(None),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<DeckInner> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(inner: &Weak<DeckInner>) -> Option<Deck> {
        inner.upgrade().map(|inner| Deck { inner })
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.inner.animator.clock().clone()
    }

    pub fn ptr_eq(&self, other: &Deck) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` against a snapshot of the current geometry.
    pub fn with_layout_context<R>(&self, f: impl FnOnce(&LayoutContext<'_>) -> R) -> R {
        let cards = self.inner.cards.borrow();
        let ctx = LayoutContext::new(
            &cards,
            self.inner.size.get(),
            self.inner.config.get(),
            self.inner.min_card_width.get(),
        );
        f(&ctx)
    }

    // ------------------------------------------------------------------
    // Configuration

    pub fn config(&self) -> DeckConfig {
        self.inner.config.get()
    }

    /// Replace the whole configuration after validating it.
    pub fn set_config(&self, config: DeckConfig) -> Result<(), DeckConfigError> {
        config.validate()?;
        self.inner.config.set(config);
        Ok(())
    }

    fn update_config(&self, update: impl FnOnce(&mut DeckConfig)) {
        let mut config = self.inner.config.get();
        update(&mut config);
        if let Err(err) = config.validate() {
            log::warn!("storing questionable deck configuration: {err}");
        }
        self.inner.config.set(config);
    }

    pub fn spacing(&self) -> f32 {
        self.config().spacing
    }

    pub fn set_spacing(&self, spacing: f32) {
        self.update_config(|config| config.spacing = spacing);
    }

    pub fn bounce(&self) -> f32 {
        self.config().bounce
    }

    pub fn set_bounce(&self, bounce: f32) {
        self.update_config(|config| config.bounce = bounce);
    }

    pub fn bounce_duration_millis(&self) -> u64 {
        self.config().bounce_duration_millis
    }

    pub fn set_bounce_duration(&self, millis: u64) {
        self.update_config(|config| config.bounce_duration_millis = millis);
    }

    pub fn left_most(&self) -> LeftMost {
        self.config().left_most
    }

    /// Takes effect on the next measure pass.
    pub fn set_left_most(&self, min: f32, max: f32) {
        self.update_config(|config| config.left_most = LeftMost::new(min, max));
    }

    pub fn drag_weight(&self) -> f32 {
        self.config().drag_weight
    }

    pub fn set_drag_weight(&self, drag_weight: f32) {
        self.update_config(|config| config.drag_weight = drag_weight);
    }

    pub fn view_configuration(&self) -> ViewConfiguration {
        self.inner.gesture.borrow().view_configuration()
    }

    pub fn set_view_configuration(&self, config: ViewConfiguration) {
        self.inner.gesture.borrow_mut().set_view_configuration(config);
    }

    pub fn set_listener(&self, listener: impl DeckListener + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn clear_listener(&self) {
        self.inner.listener.borrow_mut().take();
    }

    fn listener(&self) -> Option<Rc<dyn DeckListener>> {
        self.inner.listener.borrow().clone()
    }

    // ------------------------------------------------------------------
    // Measure and layout

    pub fn size(&self) -> Size {
        self.inner.size.get()
    }

    pub fn width(&self) -> f32 {
        self.inner.size.get().width
    }

    /// Minimum content width of `Default` cards, known after the first measure.
    pub fn min_card_width(&self) -> f32 {
        self.inner.min_card_width.get()
    }

    /// Adopt a new deck size and resize the cards for it.
    pub fn measure(&self, width: f32, height: f32) {
        let size = Size::new(width, height);
        let min_width = min_card_width(size, self.left_most());
        log::debug!(
            "measure {width}x{height} ({}), min card width {min_width}",
            if size.is_portrait() { "portrait" } else { "landscape" }
        );
        self.inner.size.set(size);
        self.inner.min_card_width.set(min_width);
        self.with_layout_context(|ctx| ctx.measure_cards());
    }

    /// Finish a layout pass. When the deck's bounds `changed`, running slides
    /// stop and cards in front of the back-most visible card are chained
    /// again.
    pub fn layout(&self, changed: bool) {
        if changed {
            if self.is_animating() {
                self.cancel_animations();
            }
            self.with_layout_context(|ctx| ctx.chain_from_left_card());
        }
        if let Some(listener) = self.listener() {
            listener.on_layout(self);
        }
    }

    // ------------------------------------------------------------------
    // Gestures

    pub fn gesture_state(&self) -> GestureState {
        self.inner.gesture.borrow().state()
    }

    /// Let a nested interactive child keep the current gesture for itself.
    pub fn request_disallow_intercept(&self) {
        self.inner.gesture.borrow_mut().request_disallow_intercept();
    }

    /// Handle one pointer event. Returns whether the deck consumed it; taps
    /// and presses pass through to the cards until the gesture turns into a
    /// drag.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let has_cards = !self.inner.cards.borrow().is_empty();
        let drag_weight = self.drag_weight();
        let action = self
            .inner
            .gesture
            .borrow_mut()
            .on_event(event, has_cards, drag_weight);

        let consumed = match action {
            GestureAction::None => self.inner.gesture.borrow().is_dragging(),
            GestureAction::StartDrag => {
                // Drags pick the cards up where the running animations left them.
                self.cancel_animations();
                true
            }
            GestureAction::Drag { delta } => {
                self.drag_by(delta);
                true
            }
            GestureAction::Fling { velocity } => {
                if self.card_count() > 0 {
                    if let Some(listener) = self.listener() {
                        listener.on_remove_drag_end(self);
                    }
                    self.fling(velocity);
                }
                true
            }
            GestureAction::Cancel => true,
        };
        if consumed {
            event.consume();
        }
        consumed
    }

    /// Move the stack by `delta` pixels, positive towards the left, as one
    /// drag frame would. Running slides stop where they are first.
    pub fn drag_by(&self, delta: f32) {
        if self.is_animating() {
            self.cancel_animations();
        }
        self.with_layout_context(|ctx| ctx.apply_drag(delta));
        let first = self.inner.cards.borrow().first().cloned();
        if let (Some(first), Some(listener)) = (first, self.listener()) {
            listener.on_remove_drag(self, &first);
        }
    }

    // ------------------------------------------------------------------
    // Navigation

    /// Settle after a drag: leftward velocities show the next card, anything
    /// else the previous one.
    pub fn fling(&self, velocity: f32) {
        let plan = self.with_layout_context(|ctx| ctx.plan_fling(velocity));
        self.apply_plan(&plan);
    }

    pub fn show_next(&self) {
        let plan = self.with_layout_context(|ctx| ctx.plan_show_next());
        self.apply_plan(&plan);
    }

    pub fn show_previous(&self) {
        let plan = self.with_layout_context(|ctx| ctx.plan_show_previous());
        self.apply_plan(&plan);
    }

    pub fn show_first(&self) {
        let plan = self.with_layout_context(|ctx| ctx.plan_show_first());
        self.apply_plan(&plan);
    }

    /// Hide the cards completely covered by the back-most visible card.
    pub fn hide_under_cards(&self) {
        self.with_layout_context(|ctx| ctx.hide_under_cards());
    }

    pub(crate) fn hide_under_cards_later(&self) -> Box<dyn FnOnce()> {
        let deck = self.downgrade();
        Box::new(move || {
            if let Some(deck) = Deck::upgrade(&deck) {
                deck.hide_under_cards();
            }
        })
    }

    fn apply_plan(&self, plan: &NavigationPlan) {
        let config = self.config();
        let cards = self.inner.cards.borrow();
        for card in plan.reveal.iter().filter_map(|&index| cards.get(index)) {
            card.set_visibility(Visibility::Visible);
        }
        for card_move in &plan.moves {
            let Some(card) = cards.get(card_move.index) else {
                continue;
            };
            let bounce = card_move.bounce.then(|| {
                if card_move.from < card_move.to {
                    config.bounce
                } else {
                    -config.bounce
                }
            });
            let on_end = card_move
                .hide_under_on_end
                .then(|| self.hide_under_cards_later());
            self.inner.animator.slide(
                card,
                card_move.from,
                card_move.to,
                bounce,
                config.bounce_duration_millis,
                on_end,
            );
        }
        if let Some(settle) = plan.settle {
            if let Some(card) = cards.get(settle.index) {
                self.inner.animator.bounce_in_place(
                    card,
                    settle.delay_millis,
                    settle.amplitude,
                    config.bounce_duration_millis,
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Animation control

    pub fn is_animating(&self) -> bool {
        self.inner.animator.is_animating()
    }

    pub fn is_card_animating(&self, card: &Card) -> bool {
        self.inner.animator.is_card_animating(card.id())
    }

    /// Stop every running slide and bounce, leaving cards where they are.
    pub fn cancel_animations(&self) {
        self.inner.animator.cancel_all();
    }

    // ------------------------------------------------------------------
    // Queries

    pub fn cards(&self) -> Vec<Card> {
        self.inner.cards.borrow().clone()
    }

    pub fn card(&self, index: usize) -> Option<Card> {
        self.inner.cards.borrow().get(index).cloned()
    }

    pub fn card_count(&self) -> usize {
        self.inner.cards.borrow().len()
    }

    pub fn first_card_position(&self) -> Option<usize> {
        self.with_layout_context(|ctx| ctx.first_card_position())
    }

    pub fn last_card_position(&self) -> Option<usize> {
        self.with_layout_context(|ctx| ctx.last_card_position())
    }

    pub fn left_card_position(&self) -> Option<usize> {
        self.with_layout_context(|ctx| ctx.left_card_position())
    }

    pub fn right_card_position(&self) -> Option<usize> {
        self.with_layout_context(|ctx| ctx.right_card_position())
    }

    /// Front-most visible card under `x`, for hit testing taps.
    pub fn card_at(&self, x: f32) -> Option<Card> {
        self.with_layout_context(|ctx| ctx.card_at(x).cloned())
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("size", &self.size())
            .field("config", &self.config())
            .field("cards", &*self.inner.cards.borrow())
            .field("side_panel", &*self.inner.side_panel.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
