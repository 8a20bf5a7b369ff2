// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-state hover machine.
//!
//! [`HoverState`] holds at most one hovered shape. [`HoverState::update`]
//! returns the transition as a leave (for the previous target) followed by an
//! enter (for the new one), so callers dispatch them in that order and the
//! sequence seen by listeners strictly alternates.

use crate::shape::ShapeId;

/// A hover change produced by [`HoverState::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTransition {
    /// Shape that lost hover; dispatch its leave first.
    pub leave: Option<ShapeId>,
    /// Shape that gained hover; dispatch its enter second.
    pub enter: Option<ShapeId>,
}

impl HoverTransition {
    /// Whether hover did not change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leave.is_none() && self.enter.is_none()
    }
}

/// Either `NoHover` (`None`) or `Hovering(shape)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Option<ShapeId>,
}

impl HoverState {
    /// Creates the `NoHover` state.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The hovered shape.
    #[must_use]
    pub fn current(&self) -> Option<ShapeId> {
        self.current
    }

    /// Moves hover to `candidate` (the topmost hit, if any).
    pub fn update(&mut self, candidate: Option<ShapeId>) -> HoverTransition {
        if candidate == self.current {
            return HoverTransition::default();
        }
        let leave = self.current.take();
        self.current = candidate;
        HoverTransition {
            leave,
            enter: candidate,
        }
    }

    /// Clears hover, returning the shape that must receive a leave.
    pub fn clear(&mut self) -> Option<ShapeId> {
        self.current.take()
    }

    /// Clears hover only if `id` is the hovered shape.
    pub fn forget(&mut self, id: ShapeId) -> bool {
        if self.current == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::*;
    use crate::shape::{Shape, ShapeStore};

    fn two_shapes() -> (ShapeId, ShapeId) {
        let mut store = ShapeStore::new();
        let a = store.insert(Shape::polyline(vec![vec![Point::ZERO]]));
        let b = store.insert(Shape::polyline(vec![vec![Point::ZERO]]));
        (a, b)
    }

    #[test]
    fn enter_then_switch_emits_leave_before_enter() {
        let (a, b) = two_shapes();
        let mut hover = HoverState::new();

        let t = hover.update(Some(a));
        assert_eq!(t, HoverTransition { leave: None, enter: Some(a) });

        let t = hover.update(Some(b));
        assert_eq!(t, HoverTransition { leave: Some(a), enter: Some(b) });
        assert_eq!(hover.current(), Some(b));
    }

    #[test]
    fn same_candidate_is_no_transition() {
        let (a, _) = two_shapes();
        let mut hover = HoverState::new();
        hover.update(Some(a));
        assert!(hover.update(Some(a)).is_empty());
        assert!(HoverState::new().update(None).is_empty());
    }

    #[test]
    fn transitions_strictly_alternate() {
        let (a, b) = two_shapes();
        let mut hover = HoverState::new();
        let mut log = Vec::new();
        for candidate in [Some(a), Some(a), Some(b), None, Some(b), Some(a), None] {
            let t = hover.update(candidate);
            if let Some(id) = t.leave {
                log.push((false, id));
            }
            if let Some(id) = t.enter {
                log.push((true, id));
            }
        }
        for pair in log.windows(2) {
            assert_ne!(pair[0].0, pair[1].0, "two enters or two leaves in a row: {log:?}");
        }
    }

    #[test]
    fn forget_only_clears_matching_shape() {
        let (a, b) = two_shapes();
        let mut hover = HoverState::new();
        hover.update(Some(a));
        assert!(!hover.forget(b));
        assert!(hover.forget(a));
        assert_eq!(hover.current(), None);
        assert_eq!(hover.clear(), None);
    }
}
