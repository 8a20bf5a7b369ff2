// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order registry: a doubly linked list of shapes.

use alloc::vec::Vec;

use super::traverse::Traverse;
use crate::shape::{INVALID, ShapeId};

/// Paint order of the shapes registered with one surface.
///
/// Entries are stored in arrays indexed by the shape's slot index, with
/// `prev`/`next` links forming a doubly linked list from `first` (bottom,
/// painted first) to `last` (top, painted last and hit first).
#[derive(Clone, Debug)]
pub struct ShapeOrder {
    pub(crate) prev: Vec<u32>,
    pub(crate) next: Vec<u32>,
    pub(crate) member: Vec<Option<ShapeId>>,
    pub(crate) first: u32,
    pub(crate) last: u32,
    len: usize,
}

impl Default for ShapeOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeOrder {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prev: Vec::new(),
            next: Vec::new(),
            member: Vec::new(),
            first: INVALID,
            last: INVALID,
            len: 0,
        }
    }

    /// Appends `id` on top of the current paint order.
    ///
    /// Returns `false` (and changes nothing) if `id` is already registered.
    pub fn register(&mut self, id: ShapeId) -> bool {
        let idx = id.idx;
        let slot = idx as usize;
        if self.member.len() <= slot {
            self.prev.resize(slot + 1, INVALID);
            self.next.resize(slot + 1, INVALID);
            self.member.resize(slot + 1, None);
        }
        match self.member[slot] {
            Some(current) if current == id => return false,
            // The slot's previous owner was dropped from the store without
            // being removed here; its entry is dead.
            Some(stale) => {
                self.remove(stale);
            }
            None => {}
        }

        self.member[slot] = Some(id);
        self.prev[slot] = self.last;
        self.next[slot] = INVALID;
        if self.last != INVALID {
            self.next[self.last as usize] = idx;
        } else {
            self.first = idx;
        }
        self.last = idx;
        self.len += 1;
        true
    }

    /// Unlinks `id`, rebinding `first`/`last` as needed.
    ///
    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let idx = id.idx;
        let prev = self.prev[idx as usize];
        let next = self.next[idx as usize];
        debug_assert!(
            prev == INVALID || self.next[prev as usize] == idx,
            "paint-order links out of sync at slot {idx}"
        );

        if prev != INVALID {
            self.next[prev as usize] = next;
        } else {
            self.first = next;
        }
        if next != INVALID {
            self.prev[next as usize] = prev;
        } else {
            self.last = prev;
        }

        self.member[idx as usize] = None;
        self.prev[idx as usize] = INVALID;
        self.next[idx as usize] = INVALID;
        self.len -= 1;
        true
    }

    /// The registered shape holding slot `index`, of any generation.
    #[must_use]
    pub fn occupant(&self, index: u32) -> Option<ShapeId> {
        self.member.get(index as usize).copied().flatten()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.member.get(id.idx as usize).copied().flatten() == Some(id)
    }

    /// The bottom-most shape.
    #[must_use]
    pub fn first(&self) -> Option<ShapeId> {
        self.member_at(self.first)
    }

    /// The top-most shape.
    #[must_use]
    pub fn last(&self) -> Option<ShapeId> {
        self.member_at(self.last)
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates shapes bottom to top (paint order).
    ///
    /// The iterator is lazy and borrows the registry, so a fresh call always
    /// restarts from `first`.
    #[must_use]
    pub fn iter(&self) -> Traverse<'_> {
        Traverse::new(self, self.first)
    }

    pub(crate) fn member_at(&self, idx: u32) -> Option<ShapeId> {
        if idx == INVALID {
            None
        } else {
            self.member[idx as usize]
        }
    }
}

impl<'a> IntoIterator for &'a ShapeOrder {
    type Item = ShapeId;
    type IntoIter = Traverse<'a>;

    fn into_iter(self) -> Traverse<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::shape::{Shape, ShapeStore};

    fn shapes(n: usize) -> (ShapeStore, Vec<ShapeId>) {
        let mut store = ShapeStore::new();
        let ids = (0..n)
            .map(|_| store.insert(Shape::polyline(vec![vec![Point::ZERO]])))
            .collect();
        (store, ids)
    }

    #[test]
    fn traversal_follows_registration_order() {
        let (_, ids) = shapes(3);
        let mut order = ShapeOrder::new();
        // Register out of slot order.
        order.register(ids[2]);
        order.register(ids[0]);
        order.register(ids[1]);
        let seen: Vec<_> = order.iter().collect();
        assert_eq!(seen, vec![ids[2], ids[0], ids[1]]);
        assert_eq!(order.first(), Some(ids[2]));
        assert_eq!(order.last(), Some(ids[1]));
    }

    #[test]
    fn traversal_is_restartable() {
        let (_, ids) = shapes(2);
        let mut order = ShapeOrder::new();
        order.register(ids[0]);
        order.register(ids[1]);
        assert_eq!(order.iter().count(), 2);
        assert_eq!(order.iter().count(), 2);
    }

    #[test]
    fn duplicate_register_is_ignored() {
        let (_, ids) = shapes(1);
        let mut order = ShapeOrder::new();
        assert!(order.register(ids[0]));
        assert!(!order.register(ids[0]));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn remove_middle_head_and_tail() {
        let (_, ids) = shapes(4);
        let mut order = ShapeOrder::new();
        for &id in &ids {
            order.register(id);
        }

        assert!(order.remove(ids[1]));
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![ids[0], ids[2], ids[3]]);

        assert!(order.remove(ids[0]));
        assert_eq!(order.first(), Some(ids[2]));

        assert!(order.remove(ids[3]));
        assert_eq!(order.last(), Some(ids[2]));
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![ids[2]]);

        assert!(order.remove(ids[2]));
        assert!(order.is_empty());
        assert_eq!(order.first(), None);
        assert_eq!(order.last(), None);
        assert!(!order.remove(ids[2]), "already removed");
    }

    #[test]
    fn removed_shape_can_be_registered_again_on_top() {
        let (_, ids) = shapes(2);
        let mut order = ShapeOrder::new();
        order.register(ids[0]);
        order.register(ids[1]);
        order.remove(ids[0]);
        order.register(ids[0]);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![ids[1], ids[0]]);
    }

    #[test]
    fn stale_handle_is_not_contained() {
        let (mut store, ids) = shapes(1);
        let mut order = ShapeOrder::new();
        order.register(ids[0]);
        // Dropped from the store while still registered.
        store.remove(ids[0]);
        let reused = store.insert(Shape::polyline(Vec::new()));
        assert_eq!(order.occupant(reused.index()), Some(ids[0]));
        order.register(reused);
        assert_eq!(order.occupant(reused.index()), Some(reused));
        assert!(!order.contains(ids[0]));
        assert!(order.contains(reused));
        assert_eq!(order.len(), 1);
    }
}
