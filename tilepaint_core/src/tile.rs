// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile adapter.
//!
//! A [`Tile`] pairs a tile coordinate and pixel size with the render service
//! that draws it, and forwards the host's calls to that service.

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};

use crate::backend::{RenderService, TargetIndex};
use crate::shape::{ShapeId, ShapeStore};

/// Position of a tile in the host's tile grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Zoom level.
    pub z: u8,
}

impl TileCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Origin of this tile's surface in map pixel space.
    #[must_use]
    pub fn offset(self, tile_size: Size) -> Vec2 {
        Vec2::new(
            f64::from(self.x) * tile_size.width,
            f64::from(self.y) * tile_size.height,
        )
    }
}

/// One tile surface and the service rendering it.
#[derive(Debug)]
pub struct Tile<S> {
    coord: TileCoord,
    size: Size,
    service: S,
}

impl<S: RenderService> Tile<S> {
    /// Wraps `service`, sizing its surface to `size`.
    ///
    /// The service should have been created with `coord.offset(size)` as its
    /// surface offset.
    pub fn new(coord: TileCoord, size: Size, mut service: S) -> Self {
        service.set_size(size);
        Self {
            coord,
            size,
            service,
        }
    }

    /// The tile coordinate.
    #[must_use]
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// The tile's pixel size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Surface origin in map pixel space.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.coord.offset(self.size)
    }

    /// The surface element.
    #[must_use]
    pub fn surface(&self) -> &S::Surface {
        self.service.surface()
    }

    /// The render service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The render service, mutably.
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Resizes the surface.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.service.set_size(size);
    }

    /// See [`RenderService::attach`].
    pub fn attach(&mut self, shapes: &ShapeStore, targets: &mut dyn TargetIndex) {
        self.service.attach(shapes, targets);
    }

    /// See [`RenderService::detach`].
    pub fn detach(&mut self, targets: &mut dyn TargetIndex) {
        self.service.detach(targets);
    }

    /// See [`RenderService::register`].
    pub fn register(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) -> bool {
        self.service.register(shapes, id, targets)
    }

    /// See [`RenderService::remove`].
    pub fn remove(&mut self, shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex) -> bool {
        self.service.remove(shapes, id, targets)
    }

    /// See [`RenderService::notify_style_changed`].
    pub fn notify_style_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) {
        self.service.notify_style_changed(shapes, id, targets);
    }

    /// See [`RenderService::notify_geometry_changed`].
    pub fn notify_geometry_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) {
        self.service.notify_geometry_changed(shapes, id, targets);
    }

    /// See [`RenderService::layers_at`].
    #[must_use]
    pub fn layers_at(&self, shapes: &ShapeStore, point: Point) -> Vec<ShapeId> {
        self.service.layers_at(shapes, point)
    }
}
