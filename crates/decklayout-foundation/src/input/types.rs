use decklayout_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

use super::uptime_millis;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A pointer touched down. The first pointer of a gesture or an extra finger.
    Down,
    Move,
    /// A pointer lifted. Other pointers of the gesture may still be down.
    Up,
    /// The host took the gesture away; every pointer is gone.
    Cancel,
}

/// Pointer event with consumption tracking.
///
/// Handlers consume an event to keep it from reaching other handlers, so a
/// card does not receive a tap once the deck has started dragging.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Position in the deck's coordinate space.
    pub position: Point,
    /// Event time in milliseconds on a monotonic clock.
    pub uptime_millis: i64,
    /// Shared via Rc<Cell> so consumption can be tracked across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    /// Event for pointer 0 stamped with the current [`uptime_millis`].
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_millis: uptime_millis(),
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn at_time(mut self, uptime_millis: i64) -> Self {
        self.uptime_millis = uptime_millis;
        self
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }

    pub fn cancel() -> Self {
        Self::new(PointerEventKind::Cancel, Point::ZERO)
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Copy of this event in another coordinate space, sharing the consumption state.
    pub fn copy_with_local_position(&self, position: Point) -> Self {
        Self {
            position,
            consumed: self.consumed.clone(),
            ..self.clone()
        }
    }
}
