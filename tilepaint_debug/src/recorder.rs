// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary trace recorder.
//!
//! [`RecorderSink`] appends every trace event to a byte buffer. Each record is
//! a one-byte tag followed by the event's fields in little-endian order.
//! [`decode`] turns a buffer back into [`RecordedEvent`]s.

use kurbo::{Point, Rect};
use tilepaint_core::dirty::Damage;
use tilepaint_core::pointer::PointerKind;
use tilepaint_core::time::HostTime;
use tilepaint_core::trace::{
    DispatchEvent, FrameRequestEvent, HoverEvent, IconDeferredEvent, InvalidateEvent,
    InvalidateKind, RedrawBeginEvent, RedrawEndEvent, SurfaceEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

const TAG_INVALIDATE: u8 = 1;
const TAG_FRAME_REQUEST: u8 = 2;
const TAG_REDRAW_BEGIN: u8 = 3;
const TAG_REDRAW_END: u8 = 4;
const TAG_HOVER: u8 = 5;
const TAG_DISPATCH: u8 = 6;
const TAG_SURFACE: u8 = 7;
const TAG_ICON_DEFERRED: u8 = 8;

const DAMAGE_NONE: u8 = 0;
const DAMAGE_FULL: u8 = 1;
const DAMAGE_RECT: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that records events into a compact byte buffer.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(x) => {
                self.write_u8(1);
                self.write_u32(x);
            }
            None => self.write_u8(0),
        }
    }

    fn write_damage(&mut self, damage: Damage) {
        match damage {
            Damage::None => self.write_u8(DAMAGE_NONE),
            Damage::Full => self.write_u8(DAMAGE_FULL),
            Damage::Rect(r) => {
                self.write_u8(DAMAGE_RECT);
                self.write_f64(r.x0);
                self.write_f64(r.y0);
                self.write_f64(r.x1);
                self.write_f64(r.y1);
            }
        }
    }
}

fn invalidate_kind_to_u8(kind: InvalidateKind) -> u8 {
    match kind {
        InvalidateKind::Register => 0,
        InvalidateKind::Style => 1,
        InvalidateKind::Geometry => 2,
        InvalidateKind::Remove => 3,
        InvalidateKind::Resize => 4,
        InvalidateKind::Attach => 5,
    }
}

fn invalidate_kind_from_u8(v: u8) -> Option<InvalidateKind> {
    Some(match v {
        0 => InvalidateKind::Register,
        1 => InvalidateKind::Style,
        2 => InvalidateKind::Geometry,
        3 => InvalidateKind::Remove,
        4 => InvalidateKind::Resize,
        5 => InvalidateKind::Attach,
        _ => return None,
    })
}

fn pointer_kind_to_u8(kind: PointerKind) -> u8 {
    match kind {
        PointerKind::Enter => 0,
        PointerKind::Leave => 1,
        PointerKind::Move => 2,
        PointerKind::Click => 3,
        PointerKind::DoubleClick => 4,
        PointerKind::Down => 5,
        PointerKind::Up => 6,
        PointerKind::ContextMenu => 7,
    }
}

fn pointer_kind_from_u8(v: u8) -> Option<PointerKind> {
    Some(match v {
        0 => PointerKind::Enter,
        1 => PointerKind::Leave,
        2 => PointerKind::Move,
        3 => PointerKind::Click,
        4 => PointerKind::DoubleClick,
        5 => PointerKind::Down,
        6 => PointerKind::Up,
        7 => PointerKind::ContextMenu,
        _ => return None,
    })
}

impl TraceSink for RecorderSink {
    fn on_invalidate(&mut self, e: &InvalidateEvent) {
        self.write_u8(TAG_INVALIDATE);
        self.write_option_u32(e.shape_index);
        self.write_u8(invalidate_kind_to_u8(e.kind));
        self.write_damage(e.pending);
    }

    fn on_frame_request(&mut self, e: &FrameRequestEvent) {
        self.write_u8(TAG_FRAME_REQUEST);
        self.write_bool(e.coalesced);
    }

    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        self.write_u8(TAG_REDRAW_BEGIN);
        self.write_u64(e.frame_index);
        self.write_u64(e.timestamp.ticks());
        self.write_damage(e.damage);
    }

    fn on_redraw_end(&mut self, e: &RedrawEndEvent) {
        self.write_u8(TAG_REDRAW_END);
        self.write_u64(e.frame_index);
        self.write_u64(e.timestamp.ticks());
        self.write_u32(e.painted);
        self.write_u32(e.skipped);
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        self.write_u8(TAG_HOVER);
        self.write_u32(e.shape_index);
        self.write_bool(e.entered);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_u32(e.shape_index);
        self.write_u8(pointer_kind_to_u8(e.kind));
        self.write_u64(e.timestamp.ticks());
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.write_u8(TAG_SURFACE);
        self.write_bool(e.attached);
        self.write_u32(e.shapes);
    }

    fn on_icon_deferred(&mut self, e: &IconDeferredEvent) {
        self.write_u8(TAG_ICON_DEFERRED);
        self.write_u32(e.shape_index);
        self.write_f64(e.origin.x);
        self.write_f64(e.origin.y);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A decoded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_invalidate`].
    Invalidate(InvalidateEvent),
    /// See [`TraceSink::on_frame_request`].
    FrameRequest(FrameRequestEvent),
    /// See [`TraceSink::on_redraw_begin`].
    RedrawBegin(RedrawBeginEvent),
    /// See [`TraceSink::on_redraw_end`].
    RedrawEnd(RedrawEndEvent),
    /// See [`TraceSink::on_hover`].
    Hover(HoverEvent),
    /// See [`TraceSink::on_dispatch`].
    Dispatch(DispatchEvent),
    /// See [`TraceSink::on_surface`].
    Surface(SurfaceEvent),
    /// See [`TraceSink::on_icon_deferred`].
    IconDeferred(IconDeferredEvent),
}

/// Decodes a byte buffer produced by [`RecorderSink`].
///
/// Iteration stops at the end of the buffer, at an unknown tag, or at a
/// truncated record.
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over [`RecordedEvent`]s in a byte buffer.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes<const N: usize>(&mut self) -> Option<[u8; N]> {
        if self.remaining() < N {
            return None;
        }
        let mut out = [0_u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Some(out)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.read_bytes().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.read_bytes().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_bytes().map(f64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        match self.read_u8()? {
            0 => Some(None),
            _ => self.read_u32().map(Some),
        }
    }

    fn read_damage(&mut self) -> Option<Damage> {
        match self.read_u8()? {
            DAMAGE_NONE => Some(Damage::None),
            DAMAGE_FULL => Some(Damage::Full),
            DAMAGE_RECT => {
                let x0 = self.read_f64()?;
                let y0 = self.read_f64()?;
                let x1 = self.read_f64()?;
                let y1 = self.read_f64()?;
                Some(Damage::Rect(Rect::new(x0, y0, x1, y1)))
            }
            _ => None,
        }
    }

    fn decode_invalidate(&mut self) -> Option<RecordedEvent> {
        let shape_index = self.read_option_u32()?;
        let kind = invalidate_kind_from_u8(self.read_u8()?)?;
        let pending = self.read_damage()?;
        Some(RecordedEvent::Invalidate(InvalidateEvent {
            shape_index,
            kind,
            pending,
        }))
    }

    fn decode_frame_request(&mut self) -> Option<RecordedEvent> {
        let coalesced = self.read_bool()?;
        Some(RecordedEvent::FrameRequest(FrameRequestEvent { coalesced }))
    }

    fn decode_redraw_begin(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let timestamp = HostTime(self.read_u64()?);
        let damage = self.read_damage()?;
        Some(RecordedEvent::RedrawBegin(RedrawBeginEvent {
            frame_index,
            timestamp,
            damage,
        }))
    }

    fn decode_redraw_end(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let timestamp = HostTime(self.read_u64()?);
        let painted = self.read_u32()?;
        let skipped = self.read_u32()?;
        Some(RecordedEvent::RedrawEnd(RedrawEndEvent {
            frame_index,
            timestamp,
            painted,
            skipped,
        }))
    }

    fn decode_hover(&mut self) -> Option<RecordedEvent> {
        let shape_index = self.read_u32()?;
        let entered = self.read_bool()?;
        let timestamp = HostTime(self.read_u64()?);
        Some(RecordedEvent::Hover(HoverEvent {
            shape_index,
            entered,
            timestamp,
        }))
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        let shape_index = self.read_u32()?;
        let kind = pointer_kind_from_u8(self.read_u8()?)?;
        let timestamp = HostTime(self.read_u64()?);
        Some(RecordedEvent::Dispatch(DispatchEvent {
            shape_index,
            kind,
            timestamp,
        }))
    }

    fn decode_surface(&mut self) -> Option<RecordedEvent> {
        let attached = self.read_bool()?;
        let shapes = self.read_u32()?;
        Some(RecordedEvent::Surface(SurfaceEvent { attached, shapes }))
    }

    fn decode_icon_deferred(&mut self) -> Option<RecordedEvent> {
        let shape_index = self.read_u32()?;
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        Some(RecordedEvent::IconDeferred(IconDeferredEvent {
            shape_index,
            origin: Point::new(x, y),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        match self.read_u8()? {
            TAG_INVALIDATE => self.decode_invalidate(),
            TAG_FRAME_REQUEST => self.decode_frame_request(),
            TAG_REDRAW_BEGIN => self.decode_redraw_begin(),
            TAG_REDRAW_END => self.decode_redraw_end(),
            TAG_HOVER => self.decode_hover(),
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_SURFACE => self.decode_surface(),
            TAG_ICON_DEFERRED => self.decode_icon_deferred(),
            _ => None,
        }
    }
}
