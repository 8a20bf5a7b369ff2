// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The vector document a retained service keeps its nodes in.

use kurbo::{Rect, Size};
use tilepaint_core::backend::NodeKey;

/// Element type of a retained node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A `<path>` for polylines and polygons.
    Path,
    /// An `<image>` for icon markers.
    Image,
}

/// A vector document: a root element holding one group whose children are
/// painted in order.
///
/// On the web this is an `<svg>` element with a single `<g>`.
pub trait VectorDocument {
    /// Handle to one node.
    type Node;

    /// Sets the root element's `width` and `height`.
    fn set_size(&mut self, size: Size);

    /// Sets the root element's `viewBox`.
    fn set_view_box(&mut self, view_box: Rect);

    /// Creates a detached node, or `None` if the document cannot.
    fn create_node(&mut self, kind: NodeKind) -> Option<Self::Node>;

    /// Unique identity of `node`, stable for its lifetime.
    fn node_key(&self, node: &Self::Node) -> NodeKey;

    /// Sets an attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Removes an attribute if present.
    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    /// Adds a class name.
    fn add_class(&mut self, node: &Self::Node, class: &str);

    /// Sets the node's `pointer-events` style.
    fn set_pointer_events(&mut self, node: &Self::Node, enabled: bool);

    /// Appends `node` as the group's last (topmost) child.
    fn append(&mut self, node: &Self::Node);

    /// Puts `new` where `old` is in the group and drops `old`.
    fn replace(&mut self, old: &Self::Node, new: &Self::Node);

    /// Removes `node` from the group.
    fn remove(&mut self, node: &Self::Node);
}
