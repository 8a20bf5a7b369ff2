// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for tilepaint.
//!
//! This crate provides the browser side of both render services:
//!
//! - [`WebCanvas`]: `<canvas>` 2D context for the immediate-mode service
//! - [`SvgDocument`]: inline `<svg>` document for the retained-mode service
//! - [`RafFrames`]: `requestAnimationFrame` frame requester
//! - [`WebTile`]: a tile whose service is picked by
//!   [`TileOptions`](tilepaint_core::config::TileOptions)
//! - [`pointer_event`]: DOM mouse event conversion

#![no_std]

extern crate alloc;

mod canvas;
mod event;
mod raf;
mod svg;
mod tile;

pub use canvas::WebCanvas;
pub use event::{SURFACE_EVENTS, container_point, pointer_event, pointer_kind};
pub use raf::RafFrames;
pub use svg::{SvgDocument, SvgNode};
pub use tile::{WebCanvasService, WebSvgService, WebTile};

use tilepaint_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    raf::ms_to_host_time(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
///
/// This is the timebase [`ServiceConfig::new`] assumes for its pointer move
/// throttle.
///
/// [`ServiceConfig::new`]: tilepaint_core::config::ServiceConfig::new
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}
