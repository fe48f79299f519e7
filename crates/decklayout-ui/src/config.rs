use std::fmt;

/// Overshoot of a settle bounce, in pixels.
pub const DEFAULT_BOUNCE: f32 = 20.0;
pub const DEFAULT_BOUNCE_DURATION_MILLIS: u64 = 100;
pub const DEFAULT_DRAG_WEIGHT: f32 = 1.0;

/// Bounds for the left edge of the back-most visible card.
///
/// `min` is where stacked cards park, `max` is where the first card rests
/// when the whole deck is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeftMost {
    pub min: f32,
    pub max: f32,
}

impl LeftMost {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Tunables of a [`Deck`](crate::Deck).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckConfig {
    /// Gap between a card's right edge and the next card's left edge.
    pub spacing: f32,
    pub bounce: f32,
    pub bounce_duration_millis: u64,
    pub left_most: LeftMost,
    /// Multiplier applied to pointer movement while dragging.
    pub drag_weight: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            bounce: DEFAULT_BOUNCE,
            bounce_duration_millis: DEFAULT_BOUNCE_DURATION_MILLIS,
            left_most: LeftMost::default(),
            drag_weight: DEFAULT_DRAG_WEIGHT,
        }
    }
}

impl DeckConfig {
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_bounce_duration(mut self, millis: u64) -> Self {
        self.bounce_duration_millis = millis;
        self
    }

    pub fn with_left_most(mut self, min: f32, max: f32) -> Self {
        self.left_most = LeftMost::new(min, max);
        self
    }

    pub fn with_drag_weight(mut self, drag_weight: f32) -> Self {
        self.drag_weight = drag_weight;
        self
    }

    pub fn validate(&self) -> Result<(), DeckConfigError> {
        let finite = [
            ("spacing", self.spacing),
            ("bounce", self.bounce),
            ("left_most.min", self.left_most.min),
            ("left_most.max", self.left_most.max),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DeckConfigError::NonFinite(name));
        }
        if self.spacing < 0.0 {
            return Err(DeckConfigError::NegativeSpacing(self.spacing));
        }
        if self.left_most.min > self.left_most.max {
            return Err(DeckConfigError::InvertedLeftMost {
                min: self.left_most.min,
                max: self.left_most.max,
            });
        }
        if !self.drag_weight.is_finite() || self.drag_weight <= 0.0 {
            return Err(DeckConfigError::InvalidDragWeight(self.drag_weight));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeckConfigError {
    InvertedLeftMost { min: f32, max: f32 },
    NegativeSpacing(f32),
    InvalidDragWeight(f32),
    NonFinite(&'static str),
}

impl fmt::Display for DeckConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckConfigError::InvertedLeftMost { min, max } => {
                write!(f, "left-most bounds are inverted: min {min} > max {max}")
            }
            DeckConfigError::NegativeSpacing(spacing) => {
                write!(f, "card spacing must not be negative, got {spacing}")
            }
            DeckConfigError::InvalidDragWeight(weight) => {
                write!(f, "drag weight must be finite and positive, got {weight}")
            }
            DeckConfigError::NonFinite(name) => write!(f, "{name} must be finite"),
        }
    }
}

impl std::error::Error for DeckConfigError {}
