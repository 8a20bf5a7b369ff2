// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Repaints become `B`/`E` duration pairs; everything else is an instant.
//! Invalidations, frame requests, surface changes and deferred icons carry no
//! time of their own and are placed at the most recent timestamp seen.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use tilepaint_core::dirty::Damage;
use tilepaint_core::time::{HostTime, Timebase};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_us = 0.0;

    for recorded in decode(bytes) {
        if let Some(t) = timestamp(&recorded) {
            last_us = ticks_to_us(t.ticks(), timebase);
        }
        match recorded {
            RecordedEvent::Invalidate(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Invalidate",
                    "cat": "Dirty",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "shape_index": e.shape_index,
                        "kind": format!("{:?}", e.kind),
                        "pending": damage_json(e.pending),
                    }
                }));
            }
            RecordedEvent::FrameRequest(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameRequest",
                    "cat": "Frame",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "coalesced": e.coalesced,
                    }
                }));
            }
            RecordedEvent::RedrawBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Redraw",
                    "cat": "Frame",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "damage": damage_json(e.damage),
                    }
                }));
            }
            RecordedEvent::RedrawEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Redraw",
                    "cat": "Frame",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "painted": e.painted,
                        "skipped": e.skipped,
                    }
                }));
            }
            RecordedEvent::Hover(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": if e.entered { "HoverEnter" } else { "HoverLeave" },
                    "cat": "Pointer",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "shape_index": e.shape_index,
                    }
                }));
            }
            RecordedEvent::Dispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.as_str(),
                    "cat": "Pointer",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "shape_index": e.shape_index,
                    }
                }));
            }
            RecordedEvent::Surface(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": if e.attached { "Attach" } else { "Detach" },
                    "cat": "Surface",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "shapes": e.shapes,
                    }
                }));
            }
            RecordedEvent::IconDeferred(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "IconDeferred",
                    "cat": "Frame",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "shape_index": e.shape_index,
                        "x": e.origin.x,
                        "y": e.origin.y,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

/// The host time carried by `event`, if any.
fn timestamp(event: &RecordedEvent) -> Option<HostTime> {
    match event {
        RecordedEvent::RedrawBegin(e) => Some(e.timestamp),
        RecordedEvent::RedrawEnd(e) => Some(e.timestamp),
        RecordedEvent::Hover(e) => Some(e.timestamp),
        RecordedEvent::Dispatch(e) => Some(e.timestamp),
        _ => None,
    }
}

fn damage_json(damage: Damage) -> Value {
    match damage {
        Damage::None => json!("none"),
        Damage::Full => json!("full"),
        Damage::Rect(r) => json!([r.x0, r.y0, r.x1, r.y1]),
    }
}
