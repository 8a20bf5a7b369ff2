// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape data model.
//!
//! A *shape* is a styled vector geometry drawn into a tile surface:
//!
//! - [`Geometry`]: polyline/polygon parts in surface-local pixels, or an
//!   [`Icon`] marker at a point.
//! - [`Style`]: fill and stroke attributes plus a cached [`DashPattern`].
//! - A bounding box kept in sync with the geometry, read by dirty-region
//!   tracking and hit testing.
//!
//! Shapes live in a caller-owned [`ShapeStore`] and are addressed by
//! generational [`ShapeId`] handles.

mod dash;
mod geometry;
mod icon;
mod id;
mod store;
mod style;

pub use dash::{DashParseError, DashParseErrorKind, DashPattern};
pub use geometry::{Geometry, Shape, rects_intersect};
pub use icon::Icon;
pub use id::{INVALID, ShapeId};
pub use store::ShapeStore;
pub use style::{Color, FillRule, LineCap, LineJoin, Style};
