// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render services.
//!
//! Render services report what they do through a [`TraceSink`]: every
//! invalidation, every frame request (and every request that was coalesced
//! into one already pending), the begin and end of each repaint, hover
//! transitions, pointer dispatch, surface attach/detach and deferred icon
//! draws. All sink methods default to no-ops.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Services own their sink as a `Box<dyn TraceSink>` installed with
//! `set_trace_sink`; `tilepaint_debug` provides ready-made sinks.

use alloc::boxed::Box;

use kurbo::Point;

use crate::dirty::Damage;
use crate::pointer::PointerKind;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why the dirty region was extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidateKind {
    /// A shape was registered.
    Register,
    /// A shape's style changed.
    Style,
    /// A shape's geometry changed.
    Geometry,
    /// A shape was removed.
    Remove,
    /// The surface was resized.
    Resize,
    /// The surface was attached.
    Attach,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a change invalidates part of the surface.
#[derive(Clone, Copy, Debug)]
pub struct InvalidateEvent {
    /// Slot index of the invalidated shape, or `None` for surface-wide
    /// invalidations.
    pub shape_index: Option<u32>,
    /// What happened.
    pub kind: InvalidateKind,
    /// Pending damage after the invalidation was accumulated.
    pub pending: Damage,
}

/// Emitted whenever an invalidation needs a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameRequestEvent {
    /// `true` if a frame was already pending and no new request was issued.
    pub coalesced: bool,
}

/// Marks the beginning of a repaint.
#[derive(Clone, Copy, Debug)]
pub struct RedrawBeginEvent {
    /// Monotonic repaint counter.
    pub frame_index: u64,
    /// Host time the frame callback fired.
    pub timestamp: HostTime,
    /// Area being repainted (rounded outward).
    pub damage: Damage,
}

/// Marks the end of a repaint.
#[derive(Clone, Copy, Debug)]
pub struct RedrawEndEvent {
    /// Monotonic repaint counter.
    pub frame_index: u64,
    /// Host time the frame callback fired.
    pub timestamp: HostTime,
    /// Number of shapes rasterized.
    pub painted: u32,
    /// Number of shapes skipped because they lie outside the damage.
    pub skipped: u32,
}

/// Emitted on a hover transition.
#[derive(Clone, Copy, Debug)]
pub struct HoverEvent {
    /// Slot index of the shape gaining or losing hover.
    pub shape_index: u32,
    /// `true` for enter, `false` for leave.
    pub entered: bool,
    /// Time of the pointer event that caused the transition.
    pub timestamp: HostTime,
}

/// Emitted when a pointer event is dispatched to a shape.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEvent {
    /// Slot index of the target shape.
    pub shape_index: u32,
    /// Event kind as delivered to the shape.
    pub kind: PointerKind,
    /// Time of the pointer event.
    pub timestamp: HostTime,
}

/// Emitted on attach and detach.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceEvent {
    /// `true` on attach, `false` on detach.
    pub attached: bool,
    /// Number of registered shapes at the time.
    pub shapes: u32,
}

/// Emitted when an icon draw waits for its image to load.
#[derive(Clone, Copy, Debug)]
pub struct IconDeferredEvent {
    /// Slot index of the marker shape.
    pub shape_index: u32,
    /// Draw origin captured for the deferred draw.
    pub origin: Point,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from render services.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an invalidation is accumulated.
    fn on_invalidate(&mut self, e: &InvalidateEvent) {
        _ = e;
    }

    /// Called when an invalidation needs a frame.
    fn on_frame_request(&mut self, e: &FrameRequestEvent) {
        _ = e;
    }

    /// Called before a repaint clears its damage.
    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        _ = e;
    }

    /// Called after a repaint.
    fn on_redraw_end(&mut self, e: &RedrawEndEvent) {
        _ = e;
    }

    /// Called on hover enter and leave.
    fn on_hover(&mut self, e: &HoverEvent) {
        _ = e;
    }

    /// Called when a pointer event reaches a shape.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called on attach and detach.
    fn on_surface(&mut self, e: &SurfaceEvent) {
        _ = e;
    }

    /// Called when an icon draw is deferred until its image loads.
    fn on_icon_deferred(&mut self, e: &IconDeferredEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer over a service's installed sink, if any.
    #[inline]
    #[must_use]
    pub fn from_boxed(sink: &'a mut Option<Box<dyn TraceSink>>) -> Self {
        match sink {
            Some(sink) => Self::new(&mut **sink),
            None => Self::none(),
        }
    }

    /// Emits an [`InvalidateEvent`].
    #[inline]
    pub fn invalidate(&mut self, e: &InvalidateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_invalidate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameRequestEvent`].
    #[inline]
    pub fn frame_request(&mut self, e: &FrameRequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawBeginEvent`].
    #[inline]
    pub fn redraw_begin(&mut self, e: &RedrawBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_redraw_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawEndEvent`].
    #[inline]
    pub fn redraw_end(&mut self, e: &RedrawEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_redraw_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HoverEvent`].
    #[inline]
    pub fn hover(&mut self, e: &HoverEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hover(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DispatchEvent`].
    #[inline]
    pub fn dispatch(&mut self, e: &DispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispatch(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SurfaceEvent`].
    #[inline]
    pub fn surface(&mut self, e: &SurfaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_surface(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`IconDeferredEvent`].
    #[inline]
    pub fn icon_deferred(&mut self, e: &IconDeferredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_icon_deferred(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invalidate() -> InvalidateEvent {
        InvalidateEvent {
            shape_index: Some(3),
            kind: InvalidateKind::Style,
            pending: Damage::Full,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_invalidate(&sample_invalidate());
        sink.on_frame_request(&FrameRequestEvent { coalesced: false });
        sink.on_redraw_end(&RedrawEndEvent {
            frame_index: 0,
            timestamp: HostTime(0),
            painted: 0,
            skipped: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.invalidate(&sample_invalidate());
        tracer.frame_request(&FrameRequestEvent { coalesced: true });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            kinds: Vec<InvalidateKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_invalidate(&mut self, e: &InvalidateEvent) {
                self.kinds.push(e.kind);
            }
        }

        let mut sink = RecordingSink { kinds: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.invalidate(&sample_invalidate());
        drop(tracer);
        assert_eq!(sink.kinds, &[InvalidateKind::Style]);
    }
}
