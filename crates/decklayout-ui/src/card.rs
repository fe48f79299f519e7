//! Cards and the optional side panel held by a [`Deck`](crate::Deck).

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use decklayout_ui_graphics::{EdgeInsets, Size, Span};

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a card for as long as it lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u64);

impl CardId {
    fn next() -> Self {
        Self(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// How the deck sizes a card's width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizingMode {
    /// The deck never touches the width.
    Fixed,
    /// Deck width minus the minimum left-most bound.
    Fill,
    /// The orientation-dependent minimum card width.
    Default,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Visible,
    /// Fully covered by cards in front of it and skipped when drawing.
    Hidden,
}

struct CardState {
    id: CardId,
    sizing_mode: SizingMode,
    offset: Cell<f32>,
    resting_offset: Cell<f32>,
    size: Cell<Size>,
    padding: Cell<EdgeInsets>,
    visibility: Cell<Visibility>,
}

/// Shared handle to one panel of the stack.
///
/// Clones refer to the same card. The deck moves cards by writing their
/// offset; the padded content span `[left, right]` is what the stacking rules
/// reason about, the padding itself being the card's drop shadow.
#[derive(Clone)]
pub struct Card {
    state: Rc<CardState>,
}

impl Card {
    pub fn new(sizing_mode: SizingMode) -> Self {
        Self {
            state: Rc::new(CardState {
                id: CardId::next(),
                sizing_mode,
                offset: Cell::new(0.0),
                resting_offset: Cell::new(0.0),
                size: Cell::new(Size::ZERO),
                padding: Cell::new(EdgeInsets::default()),
                visibility: Cell::new(Visibility::Visible),
            }),
        }
    }

    /// A card whose size is owned by the caller.
    pub fn fixed(size: Size) -> Self {
        Self::new(SizingMode::Fixed).with_size(size)
    }

    pub fn fill() -> Self {
        Self::new(SizingMode::Fill)
    }

    pub fn with_size(self, size: Size) -> Self {
        self.state.size.set(size);
        self
    }

    pub fn with_padding(self, padding: EdgeInsets) -> Self {
        self.state.padding.set(padding);
        self
    }

    pub fn with_offset(self, offset: f32) -> Self {
        self.set_offset(offset);
        self
    }

    pub fn id(&self) -> CardId {
        self.state.id
    }

    pub fn sizing_mode(&self) -> SizingMode {
        self.state.sizing_mode
    }

    /// Horizontal position of the card's outer box, padding included, as
    /// currently drawn.
    pub fn offset(&self) -> f32 {
        self.state.offset.get()
    }

    /// Place the card at `offset` immediately, making it its resting offset.
    pub fn set_offset(&self, offset: f32) {
        self.state.offset.set(offset);
        self.state.resting_offset.set(offset);
    }

    /// Where the card comes to rest once its running slide finishes. Equal to
    /// [`offset`](Self::offset) while the card is not animating.
    pub fn resting_offset(&self) -> f32 {
        self.state.resting_offset.get()
    }

    /// Animation frame: move the drawn card without touching its destination.
    pub(crate) fn set_drawn_offset(&self, offset: f32) {
        self.state.offset.set(offset);
    }

    /// A slide towards `offset` has been scheduled.
    pub(crate) fn set_resting_offset(&self, offset: f32) {
        self.state.resting_offset.set(offset);
    }

    pub fn size(&self) -> Size {
        self.state.size.get()
    }

    pub fn set_size(&self, size: Size) {
        self.state.size.set(size);
    }

    pub fn width(&self) -> f32 {
        self.state.size.get().width
    }

    pub fn height(&self) -> f32 {
        self.state.size.get().height
    }

    pub fn set_width(&self, width: f32) {
        let size = self.state.size.get();
        self.state.size.set(Size::new(width, size.height));
    }

    pub fn padding(&self) -> EdgeInsets {
        self.state.padding.get()
    }

    pub fn set_padding(&self, padding: EdgeInsets) {
        self.state.padding.set(padding);
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility.get()
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.state.visibility.set(visibility);
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    /// Left edge of the padded content.
    pub fn left(&self) -> f32 {
        self.offset() + self.padding().left
    }

    /// Right edge of the padded content.
    pub fn right(&self) -> f32 {
        self.offset() + self.width() - self.padding().right
    }

    pub fn span(&self) -> Span {
        Span::new(self.left(), self.right())
    }

    /// Left content edge at the resting offset.
    pub fn resting_left(&self) -> f32 {
        self.resting_offset() + self.padding().left
    }

    /// Right content edge at the resting offset.
    pub fn resting_right(&self) -> f32 {
        self.resting_offset() + self.width() - self.padding().right
    }

    pub fn resting_span(&self) -> Span {
        Span::new(self.resting_left(), self.resting_right())
    }

    /// Offset that puts the content's left edge at `left`.
    pub fn offset_for_left(&self, left: f32) -> f32 {
        left - self.padding().left
    }

    /// Offset that puts the content's right edge at `right`.
    pub fn offset_for_right(&self, right: f32) -> f32 {
        right - self.width() + self.padding().right
    }

    /// Whether `x` falls on the card's content. Taps there belong to the
    /// card and must not reach whatever lies underneath.
    pub fn contains_point(&self, x: f32) -> bool {
        self.span().contains(x)
    }

    pub fn ptr_eq(&self, other: &Card) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Card {}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id())
            .field("sizing_mode", &self.sizing_mode())
            .field("offset", &self.offset())
            .field("resting_offset", &self.resting_offset())
            .field("size", &self.size())
            .field("padding", &self.padding())
            .field("visibility", &self.visibility())
            .finish()
    }
}

/// Non-card child drawn beneath the stack, such as a navigation menu.
#[derive(Clone, Debug, PartialEq)]
pub struct SidePanel {
    name: String,
    size: Size,
}

impl SidePanel {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// One entry of a deck in drawing order.
#[derive(Clone, Debug, PartialEq)]
pub enum DeckChild {
    SidePanel(SidePanel),
    Card(Card),
}

impl DeckChild {
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            DeckChild::Card(card) => Some(card),
            DeckChild::SidePanel(_) => None,
        }
    }
}
