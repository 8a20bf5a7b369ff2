// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode tile render service.
//!
//! [`CanvasRenderService`] paints registered shapes into a [`Canvas2d`]
//! raster context. Nothing is drawn when a shape changes: the change extends
//! a dirty region and requests a frame through a
//! [`FrameRequester`](tilepaint_core::frame::FrameRequester). Any number of
//! changes before the frame fires coalesce into that one frame, whose
//! [`run_frame`](CanvasRenderService::run_frame) clips to the dirty area,
//! clears it and repaints every shape touching it in paint order.
//!
//! ```text
//!   notify_*() ──► DirtyRegion::extend ──► PendingFrame::request (once)
//!                                                 │
//!   host frame callback ──► run_frame ──► save, clip, clear
//!                                          └─► draw_shape × N (paint order)
//!                                          └─► restore
//! ```
//!
//! The service also hit tests pointer events against the paint order itself
//! (see [`CanvasRenderService::handle_pointer`]).

#![no_std]

extern crate alloc;

mod context;
pub mod raster;
mod service;

#[cfg(test)]
mod testing;

pub use context::Canvas2d;
pub use service::{CanvasRenderService, RedrawReport};
