// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::fmt;
use std::io::Write;

use tilepaint_core::dirty::Damage;
use tilepaint_core::time::{HostTime, Timebase};
use tilepaint_core::trace::{
    DispatchEvent, FrameRequestEvent, HoverEvent, IconDeferredEvent, InvalidateEvent,
    InvalidateKind, RedrawBeginEvent, RedrawEndEvent, SurfaceEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn kind_name(kind: InvalidateKind) -> &'static str {
    match kind {
        InvalidateKind::Register => "register",
        InvalidateKind::Style => "style",
        InvalidateKind::Geometry => "geometry",
        InvalidateKind::Remove => "remove",
        InvalidateKind::Resize => "resize",
        InvalidateKind::Attach => "attach",
    }
}

/// Formats damage as `none`, `full` or `x0,y0..x1,y1`.
struct DamageDisplay(Damage);

impl fmt::Display for DamageDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Damage::None => f.write_str("none"),
            Damage::Full => f.write_str("full"),
            Damage::Rect(r) => write!(f, "{},{}..{},{}", r.x0, r.y0, r.x1, r.y1),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_invalidate(&mut self, e: &InvalidateEvent) {
        let _ = match e.shape_index {
            Some(shape) => writeln!(
                self.writer,
                "[invalidate] {} shape={shape} pending={}",
                kind_name(e.kind),
                DamageDisplay(e.pending),
            ),
            None => writeln!(
                self.writer,
                "[invalidate] {} pending={}",
                kind_name(e.kind),
                DamageDisplay(e.pending),
            ),
        };
    }

    fn on_frame_request(&mut self, e: &FrameRequestEvent) {
        let what = if e.coalesced { "coalesced" } else { "requested" };
        let _ = writeln!(self.writer, "[frame-request] {what}");
    }

    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[redraw:begin] frame={} at {:.1}µs damage={}",
            e.frame_index,
            self.host_us(e.timestamp),
            DamageDisplay(e.damage),
        );
    }

    fn on_redraw_end(&mut self, e: &RedrawEndEvent) {
        let _ = writeln!(
            self.writer,
            "[redraw:end] frame={} at {:.1}µs painted={} skipped={}",
            e.frame_index,
            self.host_us(e.timestamp),
            e.painted,
            e.skipped,
        );
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        let what = if e.entered { "enter" } else { "leave" };
        let _ = writeln!(
            self.writer,
            "[hover] {what} shape={} at {:.1}µs",
            e.shape_index,
            self.host_us(e.timestamp),
        );
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let _ = writeln!(
            self.writer,
            "[dispatch] {} shape={} at {:.1}µs",
            e.kind.as_str(),
            e.shape_index,
            self.host_us(e.timestamp),
        );
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        let what = if e.attached { "attach" } else { "detach" };
        let _ = writeln!(self.writer, "[surface] {what} shapes={}", e.shapes);
    }

    fn on_icon_deferred(&mut self, e: &IconDeferredEvent) {
        let _ = writeln!(
            self.writer,
            "[icon-deferred] shape={} origin={},{}",
            e.shape_index, e.origin.x, e.origin.y,
        );
    }
}
