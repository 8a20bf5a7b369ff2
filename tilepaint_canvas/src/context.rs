// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D drawing context a canvas service paints into.

use kurbo::{BezPath, Point, Rect, Size, Stroke};
use tilepaint_core::shape::{Color, FillRule};

/// A 2D raster drawing context with an image cache.
///
/// Modelled on the HTML canvas: state is saved and restored around each
/// repaint, and clipping narrows every subsequent draw until the matching
/// restore.
pub trait Canvas2d {
    /// Pixel size of the surface.
    fn size(&self) -> Size;

    /// Resizes the surface. Resizing discards its pixels.
    fn set_size(&mut self, size: Size);

    /// Pushes the drawing state.
    fn save(&mut self);

    /// Pops the drawing state, dropping clips set since the matching save.
    fn restore(&mut self);

    /// Narrows drawing to `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fills `path` with `color` at global alpha `alpha`.
    fn fill(&mut self, path: &BezPath, color: Color, alpha: f32, rule: FillRule);

    /// Strokes `path` with the width, caps, join and dashes of `stroke`.
    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color, alpha: f32);

    /// Whether the image at `url` has finished loading.
    fn image_ready(&self, url: &str) -> bool;

    /// Draws the loaded image at `url` into `origin`/`size`.
    fn draw_image(&mut self, url: &str, origin: Point, size: Size);

    /// Draws the image at `url` into `origin`/`size` once it loads.
    ///
    /// The placement is fixed now; the draw happens exactly once.
    fn draw_when_loaded(&mut self, url: &str, origin: Point, size: Size);

    /// Lets the surface receive pointer events.
    fn enable_pointer_events(&mut self) {}
}
