//! Tweens played back to back.

use smallvec::SmallVec;

use crate::{AnimationSpec, Lerp};

/// One tween of a [`TweenSequence`].
#[derive(Debug, Clone, PartialEq)]
struct TweenSegment<T> {
    from: T,
    to: T,
    spec: AnimationSpec,
}

impl<T: Lerp + Clone> TweenSegment<T> {
    fn value_at(&self, elapsed_millis: f32) -> T {
        self.from.lerp(&self.to, self.spec.fraction_at(elapsed_millis))
    }

    fn end_value(&self) -> T {
        self.from.lerp(&self.to, self.spec.final_fraction())
    }
}

/// Ordered tweens where each one starts when the previous one ends.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSequence<T> {
    segments: SmallVec<[TweenSegment<T>; 2]>,
}

impl<T> Default for TweenSequence<T> {
    fn default() -> Self {
        Self {
            segments: SmallVec::new(),
        }
    }
}

impl<T: Lerp + Clone> TweenSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence of a single tween.
    pub fn single(from: T, to: T, spec: AnimationSpec) -> Self {
        Self::new().then(from, to, spec)
    }

    /// Append a tween from `from` to `to`.
    pub fn then(mut self, from: T, to: T, spec: AnimationSpec) -> Self {
        self.segments.push(TweenSegment { from, to, spec });
        self
    }

    /// Append a zero-distance tween that keeps `value` for `duration_millis`.
    pub fn hold(self, value: T, duration_millis: u64) -> Self {
        self.then(value.clone(), value, AnimationSpec::linear(duration_millis))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_duration_millis(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| segment.spec.total_duration_millis())
            .sum()
    }

    /// Value once every segment has played.
    pub fn end_value(&self) -> Option<T> {
        self.segments.last().map(TweenSegment::end_value)
    }

    /// Value `elapsed_millis` after the sequence started.
    pub fn value_at(&self, elapsed_millis: f32) -> Option<T> {
        let mut remaining = elapsed_millis.max(0.0);
        for segment in &self.segments {
            let length = segment.spec.total_duration_millis() as f32;
            if remaining < length {
                return Some(segment.value_at(remaining));
            }
            remaining -= length;
        }
        self.end_value()
    }
}
