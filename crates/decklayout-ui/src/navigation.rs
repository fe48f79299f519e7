//! Resting configurations reached after a fling.
//!
//! Each algorithm produces a [`NavigationPlan`] from the cards' resting
//! offsets without touching any card; the deck then applies the plan
//! through its animator. Moves start from the drawn offset, so a plan issued
//! mid-slide takes over from where the card is on screen. A deck already
//! headed for the target configuration yields an empty plan.

use smallvec::SmallVec;

use crate::animator::slide_duration_millis;
use crate::arrangement::chained_offset;
use crate::{Card, LayoutContext, POSITION_TOLERANCE};

/// A slide of one card from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardMove {
    pub index: usize,
    /// Drawn offset the slide starts from.
    pub from: f32,
    pub to: f32,
    /// Overshoot and return after arriving.
    pub bounce: bool,
    /// Hide covered cards once the slide has finished.
    pub hide_under_on_end: bool,
}

impl CardMove {
    pub fn duration_millis(&self) -> u64 {
        slide_duration_millis(self.from, self.to)
    }
}

/// A bounce of a card that stays where it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleBounce {
    pub index: usize,
    pub delay_millis: u64,
    /// Signed overshoot in pixels.
    pub amplitude: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationPlan {
    /// Cards made visible before anything moves.
    pub reveal: SmallVec<[usize; 4]>,
    pub moves: SmallVec<[CardMove; 8]>,
    pub settle: Option<SettleBounce>,
}

impl NavigationPlan {
    /// True when applying the plan changes nothing on screen.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.settle.is_none()
    }

    pub fn target_of(&self, index: usize) -> Option<f32> {
        self.moves
            .iter()
            .find(|card_move| card_move.index == index)
            .map(|card_move| card_move.to)
    }

    /// Record a slide of `card`, unless it already rests at the target.
    fn push_move(&mut self, card: &Card, card_move: CardMove) -> bool {
        if (card_move.to - card.resting_offset()).abs() < POSITION_TOLERANCE {
            return false;
        }
        self.moves.push(card_move);
        true
    }

    /// Drop a settle bounce that would add nothing: nothing moved at all, or
    /// the card already bounces at the end of its own slide.
    fn finish(mut self) -> Self {
        if let Some(settle) = self.settle {
            if self.moves.is_empty() || self.target_of(settle.index).is_some() {
                self.settle = None;
            }
        }
        self
    }
}

/// Which resting configuration a released drag goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlingDirection {
    Next,
    Previous,
}

impl FlingDirection {
    /// A finger moving left reveals the next card; anything else, including
    /// a release at rest, goes back.
    pub fn from_velocity(velocity: f32) -> Self {
        if velocity < 0.0 {
            FlingDirection::Next
        } else {
            FlingDirection::Previous
        }
    }
}

impl<'a> LayoutContext<'a> {
    pub fn plan_fling(&self, velocity: f32) -> NavigationPlan {
        match FlingDirection::from_velocity(velocity) {
            FlingDirection::Next => self.plan_show_next(),
            FlingDirection::Previous => self.plan_show_previous(),
        }
    }

    /// Slide the stack left until the front card is fully shown.
    ///
    /// Cards that are not parked are chained from the minimum bound. The
    /// front card is chained to its predecessor and never overlaps it, but it
    /// is pulled back against the deck's right edge when it would run past
    /// it; the predecessor then bounces the other way, as if it hit a wall.
    pub fn plan_show_next(&self) -> NavigationPlan {
        let mut plan = NavigationPlan::default();
        let cards = self.cards();
        let Some(last) = self.last_card_position() else {
            return plan;
        };

        if last == 0 {
            let card = &cards[0];
            plan.push_move(card, CardMove {
                index: 0,
                from: card.offset(),
                to: card.offset_for_left(self.max_left()),
                bounce: true,
                hide_under_on_end: false,
            });
            return plan;
        }

        let width = self.width();
        let spacing = self.spacing();
        let mut base = self.min_left() - spacing;
        let mut previous: Option<(&Card, f32)> = None;
        // Predecessor of the front card and its resting offset.
        let mut wall_card: Option<(usize, f32)> = None;
        let mut amplitude = self.config().bounce;
        let mut hide_pending = true;
        let mut last_duration = 0;

        for (index, card) in cards.iter().enumerate() {
            if !self.is_parked(card) || index == last {
                let mut to = chained_offset(base, card, spacing);
                if index == last {
                    if let Some((previous_card, previous_offset)) = previous {
                        base = previous_offset + previous_card.width()
                            - previous_card.padding().right;
                        to = chained_offset(base, card, spacing);
                        let right = to + card.width() - card.padding().right;
                        // Also when the predecessor already reaches the edge:
                        // the front card then covers it rather than resting
                        // off screen.
                        if right > width {
                            to = card.offset_for_right(width);
                            amplitude = -amplitude;
                        }
                        wall_card = Some((index - 1, previous_offset));
                    }
                }
                let card_move = CardMove {
                    index,
                    from: card.offset(),
                    to,
                    bounce: true,
                    hide_under_on_end: hide_pending,
                };
                if plan.push_move(card, card_move) {
                    hide_pending = false;
                    last_duration = card_move.duration_millis();
                }
                base = to + card.width() - card.padding().right;
                previous = Some((card, to));
            } else {
                previous = Some((card, card.resting_offset()));
            }
        }

        if let Some((index, offset)) = wall_card {
            let left = offset + cards[index].padding().left;
            if (left - self.min_left()).abs() < POSITION_TOLERANCE {
                plan.settle = Some(SettleBounce {
                    index,
                    delay_millis: last_duration,
                    amplitude,
                });
            }
        }
        let plan = plan.finish();
        log::debug!(
            "show_next: {} moves, settle {:?}",
            plan.moves.len(),
            plan.settle
        );
        plan
    }

    /// Slide the stack right, revealing the card behind the back-most
    /// visible one.
    ///
    /// The anchor is the front-most parked card other than the front card.
    /// Every card in front of it is chained from its right edge and the
    /// anchor itself bounces. Without an anchor the whole deck is chained
    /// from the maximum bound.
    pub fn plan_show_previous(&self) -> NavigationPlan {
        let mut plan = NavigationPlan::default();
        let cards = self.cards();
        let Some(last) = self.last_card_position() else {
            return plan;
        };

        let anchor = cards[..last]
            .iter()
            .rposition(|card| self.is_parked(card));
        let spacing = self.spacing();
        let (mut base, first_moving) = match anchor {
            Some(index) => (cards[index].resting_right(), index + 1),
            None => (self.max_left() - spacing, 0),
        };

        let first_revealed = anchor.map_or(0, |index| index.saturating_sub(1));
        plan.reveal.extend(
            (first_revealed..cards.len()).filter(|&index| !cards[index].is_visible()),
        );

        let mut last_duration = 0;
        for (index, card) in cards.iter().enumerate().skip(first_moving) {
            let to = chained_offset(base, card, spacing);
            let card_move = CardMove {
                index,
                from: card.offset(),
                to,
                bounce: true,
                hide_under_on_end: false,
            };
            if plan.push_move(card, card_move) {
                last_duration = card_move.duration_millis();
            }
            base = to + card.width() - card.padding().right;
        }

        plan.settle = anchor.map(|index| SettleBounce {
            index,
            delay_millis: last_duration,
            amplitude: self.config().bounce,
        });
        let plan = plan.finish();
        log::debug!(
            "show_previous: anchor {:?}, {} moves, settle {:?}",
            anchor,
            plan.moves.len(),
            plan.settle
        );
        plan
    }

    /// Reveal the whole deck from the maximum bound. Does nothing while the
    /// first card is already shown right of the parking position.
    pub fn plan_show_first(&self) -> NavigationPlan {
        let mut plan = NavigationPlan::default();
        let cards = self.cards();
        match cards.first() {
            Some(first) if !self.is_past_min(first) => {}
            _ => return plan,
        }

        let spacing = self.spacing();
        let mut base = self.max_left() - spacing;
        for (index, card) in cards.iter().enumerate() {
            if !card.is_visible() {
                plan.reveal.push(index);
            }
            let to = chained_offset(base, card, spacing);
            plan.push_move(card, CardMove {
                index,
                from: card.offset(),
                to,
                bounce: true,
                hide_under_on_end: false,
            });
            base = to + card.width() - card.padding().right;
        }
        let plan = plan.finish();
        log::debug!("show_first: {} moves", plan.moves.len());
        plan
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
