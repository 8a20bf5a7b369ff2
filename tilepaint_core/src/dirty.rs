// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invalidation channels and the dirty-region accumulator.
//!
//! Two kinds of bookkeeping happen between repaints:
//!
//! - **Which shapes changed, and how.** Render services mark the invalidated
//!   shape's slot index on one of the [`understory_dirty`] channels below and
//!   drain them when the frame runs, so a repaint can report what it was for.
//!   All channels are local-only: a change to one shape never implies a
//!   change to another.
//! - **Which pixels must be repainted.** [`DirtyRegion`] unions the padded
//!   bounds of every invalidated shape into one rectangle and hands it out
//!   as a [`Damage`] when the frame runs.

use kurbo::Rect;
use understory_dirty::Channel;

use crate::shape::Shape;

/// Style changed (colors, opacity, width, dash).
pub const STYLE: Channel = Channel::new(0);

/// Geometry changed (parts, marker position).
pub const GEOMETRY: Channel = Channel::new(1);

/// Shape registered or removed.
pub const TOPOLOGY: Channel = Channel::new(2);

/// The area a repaint has to cover.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Damage {
    /// Nothing changed; a repaint is a no-op.
    #[default]
    None,
    /// The whole surface.
    Full,
    /// One rectangle in surface-local pixels.
    Rect(Rect),
}

impl Damage {
    /// Returns `true` if nothing needs repainting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage into this one.
    pub fn merge(&mut self, other: Self) {
        *self = match (*self, other) {
            (Self::Full, _) | (_, Self::Full) => Self::Full,
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(a.union(b)),
        };
    }
}

/// Accumulates the area invalidated since the last repaint.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirtyRegion {
    damage: Damage,
}

impl DirtyRegion {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            damage: Damage::None,
        }
    }

    /// Unions `bounds`, grown by `padding` on every side, into the region.
    pub fn extend(&mut self, bounds: Rect, padding: f64) {
        self.damage
            .merge(Damage::Rect(bounds.inflate(padding, padding)));
    }

    /// Unions a shape's bounds padded by its stroke width plus one pixel.
    ///
    /// Shapes without bounds contribute nothing.
    pub fn extend_shape(&mut self, shape: &Shape) {
        if let Some(bounds) = shape.bounds() {
            self.extend(bounds, shape.style.redraw_padding());
        }
    }

    /// Marks the whole surface dirty.
    pub fn mark_full(&mut self) {
        self.damage = Damage::Full;
    }

    /// Returns `true` if nothing has been invalidated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
    }

    /// Returns the pending damage without consuming it (not rounded).
    #[must_use]
    pub fn pending(&self) -> Damage {
        self.damage
    }

    /// Takes the pending damage, rounding a rectangle outward to whole
    /// pixels, and resets the accumulator.
    pub fn consume(&mut self) -> Damage {
        match core::mem::take(&mut self.damage) {
            Damage::Rect(rect) => Damage::Rect(rect.expand()),
            other => other,
        }
    }
}
