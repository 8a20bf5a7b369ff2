// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode tile render service.
//!
//! [`SvgRenderService`] keeps one node per registered shape in a
//! [`VectorDocument`]: a `<path>` for polylines and polygons, an `<image>`
//! for icon markers. Registration appends the node to the document's root
//! group, so document order is paint order. Style and geometry changes
//! rewrite the node's attributes on the spot.
//!
//! ```text
//!   <svg width=W height=H viewBox="0 0 W H">   (pointer-events: none)
//!     <g>
//!       <path d="M.. L.. z" stroke=.. fill=.. class="leaflet-interactive"/>
//!       <image x=.. y=.. width="24px" height="40px" href=".."/>
//!     </g>
//!   </svg>
//! ```
//!
//! The service does not hit test pointer events itself. While attached with an
//! interactive config, every node gets `pointer-events` turned on and is
//! entered into the host's
//! [`TargetIndex`](tilepaint_core::backend::TargetIndex), and the host routes
//! DOM events by target.

#![no_std]

extern crate alloc;

pub mod attrs;
mod document;
mod service;

#[cfg(test)]
mod testing;

pub use document::{NodeKind, VectorDocument};
pub use service::{INTERACTIVE_CLASS, SvgRenderService};
