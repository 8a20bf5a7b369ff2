// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration-selected web tile.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use tilepaint_canvas::{CanvasRenderService, RedrawReport};
use tilepaint_core::backend::TargetIndex;
use tilepaint_core::config::{BackendKind, TileOptions};
use tilepaint_core::pointer::{DispatchOutcome, EventSink, PointerEvent, View};
use tilepaint_core::shape::{ShapeId, ShapeStore};
use tilepaint_core::tile::{Tile, TileCoord};
use tilepaint_core::time::HostTime;
use tilepaint_core::trace::TraceSink;
use tilepaint_svg::SvgRenderService;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::canvas::WebCanvas;
use crate::raf::RafFrames;
use crate::svg::SvgDocument;

/// Canvas tile service on the web.
pub type WebCanvasService = CanvasRenderService<WebCanvas, RafFrames>;

/// SVG tile service on the web.
pub type WebSvgService = SvgRenderService<SvgDocument>;

/// A tile rendered by whichever service [`TileOptions::backend`] selects.
#[derive(Debug)]
pub enum WebTile {
    /// `<canvas>` tile, repainted per dirty frame.
    Canvas(Tile<WebCanvasService>),
    /// Inline `<svg>` tile, one node per shape.
    Svg(Tile<WebSvgService>),
}

/// Runs `$body` with `$tile` bound to the inner [`Tile`] of either variant.
macro_rules! with_tile {
    ($self:expr, $tile:ident => $body:expr) => {
        match $self {
            WebTile::Canvas($tile) => $body,
            WebTile::Svg($tile) => $body,
        }
    };
}

impl WebTile {
    /// Creates the tile at `coord` with its surface in `document`.
    ///
    /// `on_frame` is called when a requested repaint frame fires; it should
    /// call [`run_frame`](Self::run_frame). SVG tiles never request frames.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if the surface element cannot be created.
    pub fn new(
        document: &Document,
        coord: TileCoord,
        size: Size,
        options: TileOptions,
        on_frame: impl FnMut(HostTime) + 'static,
    ) -> Result<Self, JsValue> {
        Ok(match options.backend {
            BackendKind::Canvas => {
                let service = CanvasRenderService::new(
                    WebCanvas::new(document)?,
                    RafFrames::new(on_frame),
                    coord.offset(size),
                    options.service,
                );
                Self::Canvas(Tile::new(coord, size, service))
            }
            BackendKind::Svg => {
                let service = SvgRenderService::new(SvgDocument::new(document)?, options.service);
                Self::Svg(Tile::new(coord, size, service))
            }
        })
    }

    /// Which service renders this tile.
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::Canvas(_) => BackendKind::Canvas,
            Self::Svg(_) => BackendKind::Svg,
        }
    }

    /// The surface element to insert into the tile container.
    #[must_use]
    pub fn element(&self) -> &Element {
        match self {
            Self::Canvas(tile) => AsRef::<Element>::as_ref(tile.surface().element()),
            Self::Svg(tile) => AsRef::<Element>::as_ref(tile.surface().element()),
        }
    }

    /// The tile coordinate.
    #[must_use]
    pub fn coord(&self) -> TileCoord {
        with_tile!(self, tile => tile.coord())
    }

    /// Installs a trace sink on the service.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        with_tile!(self, tile => tile.service_mut().set_trace_sink(sink));
    }

    /// Resizes the surface.
    pub fn set_size(&mut self, size: Size) {
        with_tile!(self, tile => tile.set_size(size));
    }

    /// Attaches the surface to the host.
    pub fn attach(&mut self, shapes: &ShapeStore, targets: &mut dyn TargetIndex) {
        with_tile!(self, tile => tile.attach(shapes, targets));
    }

    /// Detaches the surface from the host.
    pub fn detach(&mut self, targets: &mut dyn TargetIndex) {
        with_tile!(self, tile => tile.detach(targets));
    }

    /// Registers `id` on top of the paint order.
    pub fn register(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) -> bool {
        with_tile!(self, tile => tile.register(shapes, id, targets))
    }

    /// Unregisters `id`.
    pub fn remove(&mut self, shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex) -> bool {
        with_tile!(self, tile => tile.remove(shapes, id, targets))
    }

    /// Reacts to a style change of `id`.
    pub fn notify_style_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) {
        with_tile!(self, tile => tile.notify_style_changed(shapes, id, targets));
    }

    /// Reacts to a geometry change of `id`.
    pub fn notify_geometry_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) {
        with_tile!(self, tile => tile.notify_geometry_changed(shapes, id, targets));
    }

    /// Interactive shapes under the surface-local `point`, bottom to top.
    #[must_use]
    pub fn layers_at(&self, shapes: &ShapeStore, point: Point) -> Vec<ShapeId> {
        with_tile!(self, tile => tile.layers_at(shapes, point))
    }

    /// Frame entry point for canvas tiles; `None` for SVG tiles.
    pub fn run_frame(&mut self, shapes: &ShapeStore, now: HostTime) -> Option<RedrawReport> {
        match self {
            Self::Canvas(tile) => Some(tile.service_mut().run_frame(shapes, now)),
            Self::Svg(_) => None,
        }
    }

    /// Forwards a pointer event to a canvas tile.
    ///
    /// SVG tiles route events by DOM target instead and ignore this.
    pub fn handle_pointer(
        &mut self,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        event: PointerEvent,
    ) -> DispatchOutcome {
        match self {
            Self::Canvas(tile) => tile
                .service_mut()
                .handle_pointer(shapes, view, sink, event),
            Self::Svg(_) => DispatchOutcome::default(),
        }
    }

    /// Delivers a throttled pointer move due at `now` (canvas tiles).
    pub fn flush_pointer(
        &mut self,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        now: HostTime,
    ) -> DispatchOutcome {
        match self {
            Self::Canvas(tile) => tile.service_mut().flush_pointer(shapes, view, sink, now),
            Self::Svg(_) => DispatchOutcome::default(),
        }
    }

    /// When a throttled move is due, for arming a timer.
    #[must_use]
    pub fn next_pointer_deadline(&self) -> Option<HostTime> {
        match self {
            Self::Canvas(tile) => tile.service().next_pointer_deadline(),
            Self::Svg(_) => None,
        }
    }
}
