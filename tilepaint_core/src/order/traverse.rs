// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order traversal.

use super::registry::ShapeOrder;
use crate::shape::{INVALID, ShapeId};

/// Iterator over registered shapes, bottom to top.
///
/// Created by [`ShapeOrder::iter`].
#[derive(Debug)]
pub struct Traverse<'a> {
    order: &'a ShapeOrder,
    current: u32,
}

impl<'a> Traverse<'a> {
    pub(crate) fn new(order: &'a ShapeOrder, first: u32) -> Self {
        Self {
            order,
            current: first,
        }
    }
}

impl Iterator for Traverse<'_> {
    type Item = ShapeId;

    fn next(&mut self) -> Option<ShapeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.order.next[idx as usize];
        self.order.member_at(idx)
    }
}
