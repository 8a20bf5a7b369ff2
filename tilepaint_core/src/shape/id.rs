// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape identity.

use core::fmt;

/// Sentinel value meaning "no shape" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a shape in a [`ShapeStore`](super::ShapeStore).
///
/// Carries a slot index and a generation counter so that a handle to a
/// removed shape never aliases the shape that later reuses its slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ShapeId {
    /// Returns the raw slot index (for diagnostics and slot-indexed side tables).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({}@gen{})", self.idx, self.generation)
    }
}
