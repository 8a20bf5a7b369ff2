// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by this crate's unit tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tilepaint_core::backend::{NodeKey, TargetIndex};
use tilepaint_core::shape::ShapeId;

use crate::document::{NodeKind, VectorDocument};

/// A [`VectorDocument`] kept as plain maps; nodes are numbered from 1.
#[derive(Debug, Default)]
pub(crate) struct RecordingDocument {
    next: u64,
    pub(crate) size: Size,
    pub(crate) view_box: Option<Rect>,
    pub(crate) kinds: BTreeMap<u64, NodeKind>,
    pub(crate) attrs: BTreeMap<(u64, String), String>,
    pub(crate) classes: BTreeMap<u64, Vec<String>>,
    pub(crate) pointer_events: BTreeMap<u64, bool>,
    /// Children of the root group, bottom to top.
    pub(crate) children: Vec<u64>,
}

impl RecordingDocument {
    pub(crate) fn attr(&self, node: u64, name: &str) -> Option<&str> {
        self.attrs.get(&(node, name.into())).map(String::as_str)
    }

    pub(crate) fn has_class(&self, node: u64, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|classes| classes.iter().any(|c| c == class))
    }

    pub(crate) fn receives_pointer(&self, node: u64) -> bool {
        self.pointer_events.get(&node).copied().unwrap_or(false)
    }
}

impl VectorDocument for RecordingDocument {
    type Node = u64;

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    fn create_node(&mut self, kind: NodeKind) -> Option<u64> {
        self.next += 1;
        self.kinds.insert(self.next, kind);
        Some(self.next)
    }

    fn node_key(&self, node: &u64) -> NodeKey {
        NodeKey(*node)
    }

    fn set_attribute(&mut self, node: &u64, name: &str, value: &str) {
        self.attrs.insert((*node, name.into()), value.into());
    }

    fn remove_attribute(&mut self, node: &u64, name: &str) {
        self.attrs.remove(&(*node, name.into()));
    }

    fn add_class(&mut self, node: &u64, class: &str) {
        self.classes.entry(*node).or_default().push(class.into());
    }

    fn set_pointer_events(&mut self, node: &u64, enabled: bool) {
        self.pointer_events.insert(*node, enabled);
    }

    fn append(&mut self, node: &u64) {
        self.children.retain(|n| n != node);
        self.children.push(*node);
    }

    fn replace(&mut self, old: &u64, new: &u64) {
        if let Some(slot) = self.children.iter_mut().find(|n| **n == *old) {
            *slot = *new;
        }
    }

    fn remove(&mut self, node: &u64) {
        self.children.retain(|n| n != node);
    }
}

/// A [`TargetIndex`] backed by a map.
#[derive(Debug, Default)]
pub(crate) struct MapTargets(pub(crate) BTreeMap<NodeKey, ShapeId>);

impl TargetIndex for MapTargets {
    fn insert(&mut self, key: NodeKey, shape: ShapeId) {
        self.0.insert(key, shape);
    }

    fn remove(&mut self, key: NodeKey) {
        self.0.remove(&key);
    }
}
