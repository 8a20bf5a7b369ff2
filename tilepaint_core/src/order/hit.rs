// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing against paint order.

use alloc::vec::Vec;

use kurbo::Point;

use super::registry::ShapeOrder;
use crate::shape::{ShapeId, ShapeStore};

impl ShapeOrder {
    /// Iterates interactive shapes containing `point`, bottom to top.
    ///
    /// Shapes missing from `shapes` (stale handles) are skipped.
    pub fn hits<'a>(
        &'a self,
        shapes: &'a ShapeStore,
        point: Point,
        tolerance: f64,
    ) -> impl Iterator<Item = ShapeId> + 'a {
        self.iter().filter(move |&id| {
            shapes.get(id).is_some_and(|shape| {
                shape.style.interactive && shape.contains_point(point, tolerance)
            })
        })
    }

    /// Collects every interactive shape containing `point` in paint order.
    ///
    /// The last element is the topmost hit.
    #[must_use]
    pub fn layers_at(&self, shapes: &ShapeStore, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.hits(shapes, point, tolerance).collect()
    }

    /// The topmost interactive shape containing `point`.
    #[must_use]
    pub fn topmost_at(&self, shapes: &ShapeStore, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.hits(shapes, point, tolerance).last()
    }
}
