//! Robot-style driver for headless deck tests.
//!
//! A [`DeckRobot`] owns a deck, its frame clock and a simulated time line.
//! Pointer events are stamped with the simulated time, and frames only run
//! when the test advances time, so animations are fully deterministic.
//!
//! # Example
//!
//! ```
//! use decklayout_testing::DeckRobot;
//! use decklayout_ui::SizingMode;
//!
//! let mut robot = DeckRobot::new(1200.0, 800.0);
//! robot.add_cards(3, SizingMode::Default);
//!
//! // Spread the stack out and let it settle.
//! robot.swipe(600.0, 900.0);
//! assert!(!robot.deck().is_animating());
//! ```

use decklayout_core::FrameClock;
use decklayout_foundation::{PointerEvent, PointerId};
use decklayout_ui::{Card, Deck, DeckConfig, DeckConfigError, SizingMode};
use decklayout_ui_graphics::Point;

/// Simulated frame interval, roughly 60 frames per second.
pub const FRAME_INTERVAL_NANOS: u64 = 16_000_000;

/// Frames [`DeckRobot::wait_for_idle`] runs before giving up.
pub const MAX_IDLE_FRAMES: usize = 1_000;

/// Pointer moves [`DeckRobot::drag`] sends between press and release.
pub const DRAG_STEPS: usize = 10;

const POINTER_Y: f32 = 400.0;

/// Headless controller for one deck.
pub struct DeckRobot {
    clock: FrameClock,
    deck: Deck,
    time_nanos: u64,
    pointer: Option<(PointerId, Point)>,
    next_pointer: PointerId,
}

impl DeckRobot {
    /// Create a deck of the given size with the default configuration.
    pub fn new(width: f32, height: f32) -> Self {
        let clock = FrameClock::new();
        let deck = Deck::new(clock.clone());
        Self::from_deck(clock, deck, width, height)
    }

    /// Create a deck of the given size with `config`.
    pub fn with_config(width: f32, height: f32, config: DeckConfig) -> Result<Self, DeckConfigError> {
        let clock = FrameClock::new();
        let deck = Deck::with_config(clock.clone(), config)?;
        Ok(Self::from_deck(clock, deck, width, height))
    }

    fn from_deck(clock: FrameClock, deck: Deck, width: f32, height: f32) -> Self {
        deck.measure(width, height);
        deck.layout(true);
        Self {
            clock,
            deck,
            time_nanos: 0,
            pointer: None,
            next_pointer: 0,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Simulated time in milliseconds, as stamped on pointer events.
    pub fn time_millis(&self) -> i64 {
        (self.time_nanos / 1_000_000) as i64
    }

    /// Resize the deck (simulates a window resize) and run a layout pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.deck.measure(width, height);
        self.deck.layout(true);
    }

    /// Add `card` and let the insertion animations finish.
    pub fn add_card(&mut self, card: Card) -> Card {
        self.deck.add_card(card.clone());
        self.wait_for_idle();
        card
    }

    /// Add `count` cards with the same sizing mode, settling after each.
    pub fn add_cards(&mut self, count: usize, mode: SizingMode) -> Vec<Card> {
        (0..count).map(|_| self.add_card(Card::new(mode))).collect()
    }

    /// Current offset of every card, back to front.
    pub fn card_offsets(&self) -> Vec<f32> {
        self.deck.cards().iter().map(Card::offset).collect()
    }

    // ------------------------------------------------------------------
    // Pointer input

    /// Touch down at `(x, y)`. Returns whether the deck consumed the event.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let id = self.next_pointer;
        self.next_pointer += 1;
        self.pointer = Some((id, Point::new(x, y)));
        self.send(PointerEvent::down(x, y).with_id(id))
    }

    /// Move the pressed pointer to `(x, y)`. Does nothing without a press.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        let Some((id, _)) = self.pointer else {
            log::warn!("move_to({x}, {y}) without a pressed pointer");
            return false;
        };
        self.pointer = Some((id, Point::new(x, y)));
        self.send(PointerEvent::moved(x, y).with_id(id))
    }

    /// Lift the pressed pointer where it is.
    pub fn release(&mut self) -> bool {
        let Some((id, position)) = self.pointer.take() else {
            log::warn!("release without a pressed pointer");
            return false;
        };
        self.send(PointerEvent::up(position.x, position.y).with_id(id))
    }

    /// Abandon the gesture as a host would when taking the pointer away.
    pub fn cancel(&mut self) -> bool {
        self.pointer = None;
        self.send(PointerEvent::cancel())
    }

    fn send(&mut self, event: PointerEvent) -> bool {
        let event = event.at_time(self.time_millis());
        self.deck.on_pointer_event(&event)
    }

    /// Press at `from_x`, move to `to_x` in [`DRAG_STEPS`] steps one frame
    /// apart, and release. Animations started by the release keep running.
    pub fn drag(&mut self, from_x: f32, to_x: f32) {
        self.press(from_x, POINTER_Y);
        for step in 1..=DRAG_STEPS {
            self.advance_frame();
            let t = step as f32 / DRAG_STEPS as f32;
            self.move_to(from_x + (to_x - from_x) * t, POINTER_Y);
        }
        self.advance_frame();
        self.release();
    }

    /// [`drag`](Self::drag), then wait for the deck to settle.
    pub fn swipe(&mut self, from_x: f32, to_x: f32) {
        self.drag(from_x, to_x);
        self.wait_for_idle();
    }

    // ------------------------------------------------------------------
    // Time

    /// Run one frame at the current time, then advance by one frame interval.
    pub fn advance_frame(&mut self) {
        self.clock.drain_frame_callbacks(self.time_nanos);
        self.time_nanos += FRAME_INTERVAL_NANOS;
    }

    /// Advance simulated time by `millis`, running every frame on the way.
    pub fn advance_time(&mut self, millis: u64) {
        let end = self.time_nanos + millis * 1_000_000;
        while self.time_nanos < end {
            self.advance_frame();
        }
    }

    /// Run frames until no animation is pending. Returns the frame count.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.clock.has_frame_callbacks() {
            if frames == MAX_IDLE_FRAMES {
                log::warn!("deck still animating after {frames} frames");
                break;
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }
}
