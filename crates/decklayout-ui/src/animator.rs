//! Per-card slide and bounce animations.

use std::cell::RefCell;

use decklayout_animation::{Animatable, AnimationSpec, Easing, RepeatMode, TweenSequence};
use decklayout_core::FrameClock;
use rustc_hash::FxHashMap;

use crate::{Card, CardId};

/// Milliseconds of slide per pixel of distance (0.85 px/ms scaled by 0.8).
pub const SLIDE_MILLIS_PER_PIXEL: f32 = 0.000_85 * 0.8 * 1000.0;
/// Upper bound for any slide, however far the card travels.
pub const MAX_SLIDE_DURATION_MILLIS: u64 = 300;

/// Linear slide duration for a card travelling from `from` to `to`.
pub fn slide_duration_millis(from: f32, to: f32) -> u64 {
    let millis = ((from - to).abs() * SLIDE_MILLIS_PER_PIXEL) as u64;
    millis.min(MAX_SLIDE_DURATION_MILLIS)
}

/// Overshoot by `amplitude` from `at` and come back.
fn bounce_spec(duration_millis: u64) -> AnimationSpec {
    AnimationSpec::tween(duration_millis, Easing::DecelerateEasing).repeated(2, RepeatMode::Reverse)
}

struct CardAnimation {
    card: Card,
    animation: Animatable<f32>,
}

/// Owns one [`Animatable`] per animated card, each writing the card's drawn
/// offset. Scheduling a slide commits its destination as the card's resting
/// offset right away, so later plans start from where the card is headed.
pub(crate) struct CardAnimator {
    clock: FrameClock,
    animations: RefCell<FxHashMap<CardId, CardAnimation>>,
}

impl CardAnimator {
    pub(crate) fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            animations: RefCell::new(FxHashMap::default()),
        }
    }

    pub(crate) fn clock(&self) -> &FrameClock {
        &self.clock
    }

    fn animation_for(&self, card: &Card) -> Animatable<f32> {
        self.animations
            .borrow_mut()
            .entry(card.id())
            .or_insert_with(|| {
                let target = card.clone();
                let animation =
                    Animatable::with_listener(card.offset(), self.clock.clone(), move |offset| {
                        target.set_drawn_offset(*offset)
                    });
                CardAnimation {
                    card: card.clone(),
                    animation,
                }
            })
            .animation
            .clone()
    }

    /// Slide `card` linearly from `from` to `to`, optionally followed by a
    /// bounce of `bounce` pixels (signed) lasting `bounce_duration_millis`
    /// each way. Returns the slide duration.
    pub(crate) fn slide(
        &self,
        card: &Card,
        from: f32,
        to: f32,
        bounce: Option<f32>,
        bounce_duration_millis: u64,
        on_end: Option<Box<dyn FnOnce()>>,
    ) -> u64 {
        let duration = slide_duration_millis(from, to);
        let mut sequence = TweenSequence::single(from, to, AnimationSpec::linear(duration));
        if let Some(bounce) = bounce {
            sequence = sequence.then(to, to + bounce, bounce_spec(bounce_duration_millis));
        }
        log::trace!(
            "slide {} {from} -> {to} in {duration}ms, bounce {bounce:?}",
            card.id()
        );
        card.set_resting_offset(to);
        self.play(card, from, sequence, on_end);
        duration
    }

    /// Bounce `card` at its resting offset after `delay_millis`. A card still
    /// on its way there finishes the trip first, within the delay when it can.
    pub(crate) fn bounce_in_place(
        &self,
        card: &Card,
        delay_millis: u64,
        amplitude: f32,
        bounce_duration_millis: u64,
    ) {
        let from = card.offset();
        let at = card.resting_offset();
        let travel = slide_duration_millis(from, at);
        let mut sequence = TweenSequence::new();
        if travel > 0 {
            sequence = sequence.then(from, at, AnimationSpec::linear(travel));
        }
        let hold = delay_millis.saturating_sub(travel);
        if hold > 0 {
            sequence = sequence.hold(at, hold);
        }
        let sequence = sequence.then(at, at + amplitude, bounce_spec(bounce_duration_millis));
        log::trace!(
            "bounce {} at {at} by {amplitude} after {delay_millis}ms",
            card.id()
        );
        self.play(card, from, sequence, None);
    }

    fn play(
        &self,
        card: &Card,
        start: f32,
        sequence: TweenSequence<f32>,
        on_end: Option<Box<dyn FnOnce()>>,
    ) {
        let animation = self.animation_for(card);
        animation.snap_to(start);
        match on_end {
            Some(on_end) => animation.animate_with_end(sequence, on_end),
            None => animation.animate(sequence),
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.animations
            .borrow()
            .values()
            .any(|entry| entry.animation.is_running())
    }

    pub(crate) fn is_card_animating(&self, id: CardId) -> bool {
        self.animations
            .borrow()
            .get(&id)
            .is_some_and(|entry| entry.animation.is_running())
    }

    /// Stop every animation, leaving each card at rest where it currently is.
    pub(crate) fn cancel_all(&self) {
        let animations: Vec<(Card, Animatable<f32>)> = self
            .animations
            .borrow()
            .values()
            .map(|entry| (entry.card.clone(), entry.animation.clone()))
            .collect();
        for (card, animation) in animations {
            animation.stop();
            card.set_offset(card.offset());
        }
    }

    /// Stop and drop the animation of a card leaving the deck.
    pub(crate) fn forget(&self, id: CardId) {
        let removed = self.animations.borrow_mut().remove(&id);
        if let Some(entry) = removed {
            entry.animation.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decklayout_ui_graphics::Size;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME_NANOS: u64 = 16_000_000;

    fn settle(clock: &FrameClock) -> usize {
        let mut frames = 0;
        while clock.has_frame_callbacks() && frames < 200 {
            clock.drain_frame_callbacks(frames as u64 * FRAME_NANOS);
            frames += 1;
        }
        frames
    }

    #[test]
    fn slide_duration_scales_with_distance_and_is_capped() {
        assert_eq!(slide_duration_millis(0.0, 0.0), 0);
        let hundred = slide_duration_millis(0.0, 100.0);
        assert!((67..=68).contains(&hundred), "got {hundred}");
        assert_eq!(
            slide_duration_millis(100.0, 0.0),
            slide_duration_millis(0.0, 100.0)
        );
        assert_eq!(slide_duration_millis(0.0, 1000.0), MAX_SLIDE_DURATION_MILLIS);
    }

    #[test]
    fn slide_writes_card_offset_and_rests_on_target() {
        let clock = FrameClock::new();
        let animator = CardAnimator::new(clock.clone());
        let card = Card::fixed(Size::new(100.0, 100.0)).with_offset(300.0);

        animator.slide(&card, 300.0, 40.0, Some(-20.0), 100, None);
        assert_eq!(card.offset(), 300.0);
        assert_eq!(card.resting_offset(), 40.0);
        assert!(animator.is_animating());

        let frames = settle(&clock);
        assert!(frames > 2);
        assert_eq!(card.offset(), 40.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn end_hook_runs_when_the_slide_finishes() {
        let clock = FrameClock::new();
        let animator = CardAnimator::new(clock.clone());
        let card = Card::fixed(Size::new(100.0, 100.0));
        let ended = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ended);

        animator.slide(&card, 0.0, 50.0, None, 100, Some(Box::new(move || flag.set(true))));
        assert!(!ended.get());
        settle(&clock);
        assert!(ended.get());
    }

    #[test]
    fn bounce_in_place_returns_to_start() {
        let clock = FrameClock::new();
        let animator = CardAnimator::new(clock.clone());
        let card = Card::fixed(Size::new(100.0, 100.0)).with_offset(40.0);

        animator.bounce_in_place(&card, 50, 20.0, 100);
        let mut time = 0;
        let mut peak = card.offset();
        while clock.has_frame_callbacks() {
            clock.drain_frame_callbacks(time);
            peak = peak.max(card.offset());
            time += FRAME_NANOS;
        }
        assert!(peak > 50.0, "peak {peak}");
        assert_eq!(card.offset(), 40.0);
    }

    #[test]
    fn cancel_freezes_and_forget_drops() {
        let clock = FrameClock::new();
        let animator = CardAnimator::new(clock.clone());
        let card = Card::fixed(Size::new(100.0, 100.0));

        animator.slide(&card, 0.0, 200.0, None, 100, None);
        clock.drain_frame_callbacks(0);
        clock.drain_frame_callbacks(68_000_000);
        animator.cancel_all();
        let frozen = card.offset();
        assert!(frozen > 0.0 && frozen < 200.0);
        assert_eq!(card.resting_offset(), frozen);
        assert!(!clock.has_frame_callbacks());

        animator.slide(&card, frozen, 0.0, None, 100, None);
        assert!(animator.is_card_animating(card.id()));
        animator.forget(card.id());
        assert!(!animator.is_card_animating(card.id()));
        assert!(!clock.has_frame_callbacks());
    }

    #[test]
    fn bounce_in_place_finishes_a_running_slide_first() {
        let clock = FrameClock::new();
        let animator = CardAnimator::new(clock.clone());
        let card = Card::fixed(Size::new(100.0, 100.0)).with_offset(0.0);

        animator.slide(&card, 0.0, 200.0, None, 100, None);
        clock.drain_frame_callbacks(0);
        animator.bounce_in_place(&card, 0, 20.0, 100);
        assert_eq!(card.resting_offset(), 200.0);

        let mut time = FRAME_NANOS;
        let mut peak = card.offset();
        while clock.has_frame_callbacks() {
            clock.drain_frame_callbacks(time);
            peak = peak.max(card.offset());
            time += FRAME_NANOS;
        }
        assert!(peak > 210.0, "peak {peak}");
        assert_eq!(card.offset(), 200.0);
    }
}
