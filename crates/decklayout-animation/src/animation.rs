//! Easing curves, tween specs and the frame-driven [`Animatable`].

use std::cell::RefCell;
use std::rc::Rc;

use decklayout_core::{FrameCallbackRegistration, FrameClock};

use crate::TweenSequence;

/// Trait for types that can be linearly interpolated.
///
/// Fractions of exactly 0.0 and 1.0 must return the endpoints unchanged so
/// a finished animation rests exactly on its target.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        if fraction >= 1.0 {
            return *target;
        }
        self + (target - self) * fraction
    }
}

/// Easing functions mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Quadratic deceleration, `1 - (1 - t)^2`.
    ///
    /// Starts at twice the linear speed and comes to rest at the end, the
    /// curve Android's `DecelerateInterpolator` uses with its default factor.
    DecelerateEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::DecelerateEasing => {
                let inverse = 1.0 - fraction.clamp(0.0, 1.0);
                1.0 - inverse * inverse
            }
        }
    }
}

/// How a repeated tween plays its later iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Every iteration runs from start to end.
    Restart,
    /// Odd iterations run backwards, end to start.
    Reverse,
}

/// Animation specification combining duration, easing, delay and repetition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration of one iteration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before the first iteration in milliseconds.
    pub delay_millis: u64,
    /// Number of iterations played, at least one.
    pub iterations: u32,
    pub repeat_mode: RepeatMode,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
            iterations: 1,
            repeat_mode: RepeatMode::Restart,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Play the tween `iterations` times.
    ///
    /// `repeated(2, RepeatMode::Reverse)` runs out and back once, ending
    /// where it started.
    pub fn repeated(mut self, iterations: u32, repeat_mode: RepeatMode) -> Self {
        self.iterations = iterations.max(1);
        self.repeat_mode = repeat_mode;
        self
    }

    /// Delay plus every iteration, in milliseconds.
    pub fn total_duration_millis(&self) -> u64 {
        self.delay_millis + self.duration_millis * u64::from(self.iterations)
    }

    /// Eased progress once every iteration has played.
    pub fn final_fraction(&self) -> f32 {
        let ends_reversed =
            self.repeat_mode == RepeatMode::Reverse && self.iterations % 2 == 0;
        if ends_reversed {
            0.0
        } else {
            1.0
        }
    }

    /// Eased progress `elapsed_millis` after the spec started.
    pub fn fraction_at(&self, elapsed_millis: f32) -> f32 {
        let delay = self.delay_millis as f32;
        if elapsed_millis < delay {
            return 0.0;
        }
        let duration = self.duration_millis as f32;
        let played = elapsed_millis - delay;
        if self.duration_millis == 0 || played >= duration * self.iterations as f32 {
            return self.final_fraction();
        }

        let iteration = (played / duration).floor();
        let mut linear = (played - iteration * duration) / duration;
        if self.repeat_mode == RepeatMode::Reverse && (iteration as u32) % 2 == 1 {
            linear = 1.0 - linear;
        }
        self.easing.transform(linear)
    }
}

type ValueListener<T> = Rc<dyn Fn(&T)>;

/// Animated value advanced once per frame of a [`FrameClock`].
///
/// Clones share the same animation. Starting a new animation replaces the
/// running one from the current interpolated value; the replaced
/// animation's end callback never fires.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    current: T,
    sequence: Option<TweenSequence<T>>,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_value: Option<ValueListener<T>>,
    on_end: Option<Box<dyn FnOnce()>>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, clock: FrameClock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatableInner {
                clock,
                current: initial,
                sequence: None,
                start_time_nanos: None,
                registration: None,
                on_value: None,
                on_end: None,
            })),
        }
    }

    /// Create an animatable that reports every new value to `on_value`.
    pub fn with_listener(initial: T, clock: FrameClock, on_value: impl Fn(&T) + 'static) -> Self {
        let animatable = Self::new(initial, clock);
        animatable.inner.borrow_mut().on_value = Some(Rc::new(on_value));
        animatable
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// Where the running animation ends, or the current value when idle.
    pub fn target(&self) -> T {
        let inner = self.inner.borrow();
        match inner.sequence.as_ref().and_then(TweenSequence::end_value) {
            Some(end) => end,
            None => inner.current.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().sequence.is_some()
    }

    /// Play `sequence`, replacing any running animation.
    pub fn animate(&self, sequence: TweenSequence<T>) {
        self.start(sequence, None);
    }

    /// Play `sequence` and run `on_end` once it has fully played.
    pub fn animate_with_end(&self, sequence: TweenSequence<T>, on_end: impl FnOnce() + 'static) {
        self.start(sequence, Some(Box::new(on_end)));
    }

    /// Snap immediately to `value` without animating.
    pub fn snap_to(&self, value: T) {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            Self::cancel_locked(&mut inner);
            inner.current = value.clone();
            inner.on_value.clone()
        };
        if let Some(listener) = listener {
            listener(&value);
        }
    }

    /// Stop the running animation and keep the current interpolated value.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        Self::cancel_locked(&mut inner);
    }

    fn start(&self, sequence: TweenSequence<T>, on_end: Option<Box<dyn FnOnce()>>) {
        if sequence.is_empty() {
            log::warn!("ignoring an empty tween sequence");
            return;
        }
        {
            let mut inner = self.inner.borrow_mut();
            Self::cancel_locked(&mut inner);
            inner.sequence = Some(sequence);
            inner.on_end = on_end;
        }
        Self::schedule_frame(&self.inner);
    }

    fn cancel_locked(inner: &mut AnimatableInner<T>) {
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.sequence = None;
        inner.start_time_nanos = None;
        inner.on_end = None;
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (value, listener, finished, on_end) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_millis = frame_time_nanos.saturating_sub(start_time) as f32 / 1_000_000.0;
            let Some(sequence) = inner.sequence.as_ref() else {
                return;
            };
            let finished = elapsed_millis >= sequence.total_duration_millis() as f32;
            let sampled = if finished {
                sequence.end_value()
            } else {
                sequence.value_at(elapsed_millis)
            };
            let Some(value) = sampled else {
                return;
            };

            inner.current = value.clone();
            let on_end = if finished {
                inner.sequence = None;
                inner.start_time_nanos = None;
                inner.on_end.take()
            } else {
                None
            };
            (value, inner.on_value.clone(), finished, on_end)
        };

        if let Some(listener) = listener {
            listener(&value);
        }

        if finished {
            if let Some(on_end) = on_end {
                on_end();
            }
        } else {
            Self::schedule_frame(this);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
