//! Card deck widget engine.
//!
//! A [`Deck`] stacks [`Card`]s horizontally, later cards on top. Dragging
//! left pushes the stack together, dragging right spreads it out, and
//! releasing flings it to one of a few deterministic resting configurations
//! with a short slide and bounce driven by the deck's
//! [`FrameClock`](decklayout_core::FrameClock).

mod animator;
mod arrangement;
mod card;
mod config;
mod context;
mod deck;
mod drag;
mod gesture;
mod insertion;
mod listener;
mod navigation;
mod queries;

pub use animator::{slide_duration_millis, MAX_SLIDE_DURATION_MILLIS, SLIDE_MILLIS_PER_PIXEL};
pub use arrangement::{chained_offset, min_card_width};
pub use card::*;
pub use config::*;
pub use context::*;
pub use deck::Deck;
pub use gesture::*;
pub use listener::DeckListener;
pub use navigation::*;

pub use decklayout_foundation::{PointerEvent, PointerEventKind, PointerId, ViewConfiguration};
pub use decklayout_ui_graphics::{EdgeInsets, Point, Size};

pub mod prelude {
    pub use crate::{
        Card, Deck, DeckConfig, DeckListener, EdgeInsets, PointerEvent, SizingMode, Size,
        Visibility,
    };
}
