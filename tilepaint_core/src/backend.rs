// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render service contract.
//!
//! Tilepaint renders into tiles through one of two *render services*:
//!
//! - **Immediate mode** (`tilepaint_canvas`) repaints a raster surface. Every
//!   invalidation extends a dirty region and requests a frame; the host calls
//!   the service's frame entry point when it fires, and the service clears the
//!   dirty area and repaints every shape touching it in paint order.
//! - **Retained mode** (`tilepaint_svg`) keeps one vector node per shape and
//!   updates its attributes synchronously. There is no frame.
//!
//! Both implement [`RenderService`], so a tile (see [`crate::tile`]) can be
//! driven without knowing which one it holds.
//!
//! # Ownership
//!
//! Shapes are owned by the caller's [`ShapeStore`]. Services keep non-owning
//! registrations keyed by [`ShapeId`] and read the store whenever they need a
//! shape; ids that no longer resolve are skipped.
//!
//! # Pointer targets
//!
//! Hosts that route pointer events by DOM target keep a [`TargetIndex`]. The
//! retained service fills it with one entry per node while attached; the
//! immediate service hit tests itself and leaves it untouched.

use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::shape::{ShapeId, ShapeStore};

/// Unique identity of one retained node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub u64);

/// The host's pointer-event target index.
pub trait TargetIndex {
    /// Routes events on node `key` to `shape`.
    fn insert(&mut self, key: NodeKey, shape: ShapeId);

    /// Stops routing events on node `key`.
    fn remove(&mut self, key: NodeKey);
}

/// A render service for one tile surface.
pub trait RenderService {
    /// The element the host inserts into its tile container.
    type Surface;

    /// Returns the surface element.
    fn surface(&self) -> &Self::Surface;

    /// Sets the surface's pixel size.
    fn set_size(&mut self, size: Size);

    /// Attaches the surface to the host.
    fn attach(&mut self, shapes: &ShapeStore, targets: &mut dyn TargetIndex);

    /// Detaches the surface from the host, cancelling pending work.
    fn detach(&mut self, targets: &mut dyn TargetIndex);

    /// Whether the surface is attached.
    fn is_attached(&self) -> bool;

    /// Registers `id` on top of the paint order.
    ///
    /// Returns `false` if `id` does not resolve or is already registered.
    fn register(&mut self, shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex)
    -> bool;

    /// Unregisters `id`.
    ///
    /// `shapes` may or may not still contain the shape.
    fn remove(&mut self, shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex) -> bool;

    /// Reacts to a change of `id`'s style.
    ///
    /// A change of the shape's interactivity may add or drop its target.
    fn notify_style_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    );

    /// Reacts to a change of `id`'s geometry.
    ///
    /// Retained services that swap a node for one of another element type
    /// move its target to the new node.
    fn notify_geometry_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    );

    /// Interactive shapes containing the surface-local `point`, bottom to
    /// top.
    fn layers_at(&self, shapes: &ShapeStore, point: Point) -> Vec<ShapeId>;
}

/// A [`TargetIndex`] for hosts that do not route by target.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTargets;

impl TargetIndex for NoTargets {
    fn insert(&mut self, key: NodeKey, shape: ShapeId) {
        _ = (key, shape);
    }

    fn remove(&mut self, key: NodeKey) {
        _ = key;
    }
}
