// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by this crate's unit tests.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Shape as _, Size, Stroke};
use tilepaint_core::frame::FrameRequester;
use tilepaint_core::pointer::{EventSink, PointerEvent, PointerKind};
use tilepaint_core::shape::{Color, FillRule, ShapeId};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Save,
    Restore,
    Clip(Rect),
    Clear(Rect),
    Fill {
        bounds: Rect,
        color: Color,
        alpha: f32,
        rule: FillRule,
    },
    Stroke {
        bounds: Rect,
        width: f64,
        alpha: f32,
        dashes: Vec<f64>,
    },
    DrawImage(String, Point, Size),
    DrawWhenLoaded(String, Point, Size),
}

/// A [`Canvas2d`](crate::Canvas2d) that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub(crate) size: Size,
    pub(crate) ops: Vec<Op>,
    pub(crate) loaded: Vec<String>,
    pub(crate) pointer_events: bool,
}

impl RecordingCanvas {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Bounds of every filled or stroked path, in call order.
    pub(crate) fn drawn_bounds(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Stroke { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }
}

impl crate::Canvas2d for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Clip(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Clear(rect));
    }

    fn fill(&mut self, path: &BezPath, color: Color, alpha: f32, rule: FillRule) {
        self.ops.push(Op::Fill {
            bounds: path.bounding_box(),
            color,
            alpha,
            rule,
        });
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, _color: Color, alpha: f32) {
        self.ops.push(Op::Stroke {
            bounds: path.bounding_box(),
            width: stroke.width,
            alpha,
            dashes: stroke.dash_pattern.to_vec(),
        });
    }

    fn image_ready(&self, url: &str) -> bool {
        self.loaded.iter().any(|u| u == url)
    }

    fn draw_image(&mut self, url: &str, origin: Point, size: Size) {
        self.ops.push(Op::DrawImage(url.into(), origin, size));
    }

    fn draw_when_loaded(&mut self, url: &str, origin: Point, size: Size) {
        self.ops.push(Op::DrawWhenLoaded(url.into(), origin, size));
    }

    fn enable_pointer_events(&mut self) {
        self.pointer_events = true;
    }
}

/// A [`FrameRequester`] whose callbacks the test fires by hand.
#[derive(Debug, Default)]
pub(crate) struct ManualFrames {
    next: u32,
    pub(crate) requested: u32,
    pub(crate) cancelled: Vec<u32>,
}

impl FrameRequester for ManualFrames {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next += 1;
        self.requested += 1;
        self.next
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

/// An [`EventSink`] that records dispatched events.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) fired: Vec<(PointerKind, ShapeId)>,
    pub(crate) cursor: bool,
}

impl EventSink for RecordingSink {
    fn fire(&mut self, target: ShapeId, kind: PointerKind, _event: &PointerEvent) {
        self.fired.push((kind, target));
    }

    fn set_interactive_cursor(&mut self, on: bool) {
        self.cursor = on;
    }
}
