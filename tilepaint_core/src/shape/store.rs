// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-owned shape storage with generational handles.

use alloc::vec::Vec;

use super::geometry::Shape;
use super::id::ShapeId;

/// Owns the shapes a host renders.
///
/// Render services never own shapes: they keep [`ShapeId`]s and read the
/// current shape from the store passed into each call. Removed slots are
/// recycled through a free list, and the generation counter makes handles
/// to removed shapes resolve to `None` instead of to the slot's new owner.
#[derive(Debug, Default)]
pub struct ShapeStore {
    slots: Vec<Option<Shape>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl ShapeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape and returns its handle.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot count is bounded by u32 handles"
    )]
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.slots[idx as usize] = Some(shape);
            ShapeId {
                idx,
                generation: self.generation[idx as usize],
            }
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Some(shape));
            self.generation.push(0);
            ShapeId { idx, generation: 0 }
        }
    }

    /// Removes a shape, returning it if the handle was live.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        if !self.contains(id) {
            return None;
        }
        let shape = self.slots[id.idx as usize].take();
        self.free_list.push(id.idx);
        shape
    }

    /// Whether the handle refers to a live shape.
    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.generation.get(id.idx as usize) == Some(&id.generation)
            && self.slots[id.idx as usize].is_some()
    }

    /// Returns the shape for a live handle.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        if self.generation.get(id.idx as usize) != Some(&id.generation) {
            return None;
        }
        self.slots[id.idx as usize].as_ref()
    }

    /// Returns the shape for a live handle, mutably.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if self.generation.get(id.idx as usize) != Some(&id.generation) {
            return None;
        }
        self.slots[id.idx as usize].as_mut()
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Whether no shapes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates live shapes in slot order (not paint order).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot count is bounded by u32 handles"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let idx = idx as u32;
            slot.as_ref().map(|shape| {
                (
                    ShapeId {
                        idx,
                        generation: self.generation[idx as usize],
                    },
                    shape,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;

    fn line() -> Shape {
        Shape::polyline(vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]])
    }

    #[test]
    fn insert_and_remove() {
        let mut store = ShapeStore::new();
        let id = store.insert(line());
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
        assert!(store.remove(id).is_some());
        assert!(!store.contains(id));
        assert!(store.is_empty());
        assert!(store.remove(id).is_none(), "second removal is a no-op");
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut store = ShapeStore::new();
        let old = store.insert(line());
        store.remove(old);
        let new = store.insert(line());
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(store.get(old).is_none());
        assert!(store.get(new).is_some());
    }

    #[test]
    fn iter_skips_removed() {
        let mut store = ShapeStore::new();
        let a = store.insert(line());
        let b = store.insert(line());
        store.remove(a);
        let ids: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
    }
}
