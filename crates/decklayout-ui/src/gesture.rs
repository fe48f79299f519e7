//! Pointer tracking for the deck's horizontal drag.
//!
//! [`DragGestureDetector`] turns raw pointer events into [`GestureAction`]s
//! and owns nothing but the gesture session; the deck decides what an action
//! does to the cards.

use decklayout_foundation::{
    PointerEvent, PointerEventKind, PointerId, Point, VelocityTracker1D, ViewConfiguration,
};
use smallvec::SmallVec;

/// Where the gesture session stands between events.
///
/// Flinging and cancelling are not states of their own: a release reports
/// [`GestureAction::Fling`] and a cancel [`GestureAction::Cancel`], and both
/// return the detector to `Idle` within the same event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    /// No drag in progress. Pointers may be down, waiting to pass the slop.
    Idle,
    Dragging,
}

/// What the deck should do in response to one pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    None,
    /// The gesture just became a drag.
    StartDrag,
    /// Move the stack by `delta`, positive towards the left.
    Drag { delta: f32 },
    /// The drag ended with the last pointer lifting.
    Fling { velocity: f32 },
    /// The drag was taken away without a release.
    Cancel,
}

#[derive(Clone, Copy, Debug)]
struct TrackedPointer {
    id: PointerId,
    position: Point,
}

/// Single-pointer horizontal drag detection.
///
/// A session starts with the first pointer down and ends when the last
/// pointer lifts or the gesture is cancelled. Only the active pointer drives
/// the drag; when it lifts while others remain, another one takes over.
#[derive(Debug)]
pub struct DragGestureDetector {
    state: GestureState,
    config: ViewConfiguration,
    pointers: SmallVec<[TrackedPointer; 4]>,
    active_pointer: Option<PointerId>,
    last_position: Point,
    disallow_intercept: bool,
    velocity: VelocityTracker1D,
}

impl DragGestureDetector {
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            state: GestureState::Idle,
            config,
            pointers: SmallVec::new(),
            active_pointer: None,
            last_position: Point::ZERO,
            disallow_intercept: false,
            velocity: VelocityTracker1D::new(),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn view_configuration(&self) -> ViewConfiguration {
        self.config
    }

    pub fn set_view_configuration(&mut self, config: ViewConfiguration) {
        self.config = config;
    }

    /// Keep the current gesture from turning into a drag. Lasts until the
    /// last pointer lifts.
    pub fn request_disallow_intercept(&mut self) {
        self.disallow_intercept = true;
    }

    pub fn is_intercept_disallowed(&self) -> bool {
        self.disallow_intercept
    }

    /// Feed one event. `has_cards` tells whether a new session may start and
    /// `drag_weight` scales the resulting deltas.
    pub fn on_event(
        &mut self,
        event: &PointerEvent,
        has_cards: bool,
        drag_weight: f32,
    ) -> GestureAction {
        match event.kind {
            PointerEventKind::Down => self.on_down(event, has_cards),
            PointerEventKind::Move => self.on_move(event, drag_weight),
            PointerEventKind::Up => self.on_up(event),
            PointerEventKind::Cancel => self.on_cancel(),
        }
    }

    fn on_down(&mut self, event: &PointerEvent, has_cards: bool) -> GestureAction {
        if self.pointers.iter().any(|pointer| pointer.id == event.id) {
            return GestureAction::None;
        }
        if self.pointers.is_empty() {
            if !has_cards || event.is_consumed() {
                return GestureAction::None;
            }
            self.reset();
            self.active_pointer = Some(event.id);
            self.last_position = event.position;
            self.velocity
                .add_data_point(event.uptime_millis, event.position.x);
        }
        self.pointers.push(TrackedPointer {
            id: event.id,
            position: event.position,
        });
        GestureAction::None
    }

    fn on_move(&mut self, event: &PointerEvent, drag_weight: f32) -> GestureAction {
        let Some(pointer) = self.pointers.iter_mut().find(|pointer| pointer.id == event.id) else {
            return GestureAction::None;
        };
        pointer.position = event.position;
        if self.active_pointer != Some(event.id) {
            return GestureAction::None;
        }
        self.velocity
            .add_data_point(event.uptime_millis, event.position.x);

        let x = event.position.x;
        match self.state {
            GestureState::Idle => {
                if self.disallow_intercept {
                    return GestureAction::None;
                }
                let dx = (x - self.last_position.x).abs();
                let dy = (event.position.y - self.last_position.y).abs();
                if dx >= dy && dx > self.config.touch_slop {
                    log::debug!("pointer {} started dragging after {dx}px", event.id);
                    self.state = GestureState::Dragging;
                    self.last_position.x = x;
                    GestureAction::StartDrag
                } else {
                    GestureAction::None
                }
            }
            GestureState::Dragging => {
                let delta = (self.last_position.x - x) * drag_weight;
                self.last_position.x = x;
                GestureAction::Drag { delta }
            }
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> GestureAction {
        let Some(index) = self.pointers.iter().position(|pointer| pointer.id == event.id) else {
            return GestureAction::None;
        };
        self.pointers.remove(index);

        if !self.pointers.is_empty() {
            if self.active_pointer == Some(event.id) {
                let successor = self.pointers[0];
                log::debug!(
                    "pointer {} lifted, pointer {} takes over",
                    event.id,
                    successor.id
                );
                self.active_pointer = Some(successor.id);
                self.last_position.x = successor.position.x;
                self.velocity.reset();
            }
            return GestureAction::None;
        }

        let action = if self.is_dragging() {
            if self.active_pointer == Some(event.id) {
                self.velocity
                    .add_data_point(event.uptime_millis, event.position.x);
            }
            let velocity = self
                .velocity
                .calculate_velocity_with_max(self.config.max_fling_velocity);
            log::debug!("drag released at {velocity}px/s");
            GestureAction::Fling { velocity }
        } else {
            GestureAction::None
        };
        self.reset();
        action
    }

    fn on_cancel(&mut self) -> GestureAction {
        let action = if self.is_dragging() {
            log::debug!("drag cancelled");
            GestureAction::Cancel
        } else {
            GestureAction::None
        };
        self.reset();
        action
    }

    fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.pointers.clear();
        self.active_pointer = None;
        self.disallow_intercept = false;
        self.velocity.reset();
    }
}

impl Default for DragGestureDetector {
    fn default() -> Self {
        Self::new(ViewConfiguration::default())
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
