// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for rendering z-ordered vector shapes into tile surfaces.
//!
//! `tilepaint_core` holds everything both render services share: the shape
//! model, the paint-order registry, dirty-region accumulation, frame request
//! bookkeeping, hit testing and pointer dispatch. It is `no_std` compatible
//! (with `alloc`); shapes live in a struct-of-arrays store addressed by
//! generational handles.
//!
//! # Architecture
//!
//! ```text
//!   host ──register/notify──► RenderService ──extend──► DirtyRegion
//!                                  │                        │
//!                                  └──request──► PendingFrame
//!                                                           │
//!   host ──frame fired──► repaint (clip, clear, draw in ShapeOrder)
//!
//!   host ──PointerEvent──► PointerDispatcher ──layers_at──► ShapeOrder
//!                                  │
//!                                  └──HoverState──► EventSink
//! ```
//!
//! **[`shape`]** — Geometry, style, dash patterns, icon markers, and the
//! [`ShapeStore`](shape::ShapeStore) that owns them.
//!
//! **[`order`]** — The paint-order registry ([`ShapeOrder`](order::ShapeOrder))
//! and hit testing against it.
//!
//! **[`dirty`]** — `understory_dirty` channels for per-shape invalidation and
//! the [`DirtyRegion`](dirty::DirtyRegion) pixel accumulator.
//!
//! **[`frame`]** — The [`FrameRequester`](frame::FrameRequester) contract and
//! the one-pending-request token.
//!
//! **[`hover`]** and **[`pointer`]** — The hover state machine, move
//! throttling and pointer dispatch.
//!
//! **[`backend`]** — The [`RenderService`](backend::RenderService) trait both
//! render services implement.
//!
//! **[`tile`]** — Tile coordinates and the [`Tile`](tile::Tile) adapter.
//!
//! **[`config`]** — Service and tile options.
//!
//! **[`time`]** — Host time for pointer throttling.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) instrumentation with a
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dirty;
pub mod frame;
pub mod hover;
pub mod order;
pub mod pointer;
pub mod shape;
pub mod tile;
pub mod time;
pub mod trace;
