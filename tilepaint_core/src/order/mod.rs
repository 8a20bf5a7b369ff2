// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order registry and hit testing.
//!
//! [`ShapeOrder`] fixes the paint order of the shapes registered with one
//! surface. Shapes are appended on registration and unlinked on removal;
//! nothing is ever moved in between, so traversal order always equals
//! registration order.
//!
//! The same order drives both painting ([`ShapeOrder::iter`], bottom to top)
//! and hit testing ([`ShapeOrder::layers_at`], whose last element is the
//! topmost hit).

mod hit;
mod registry;
mod traverse;

pub use registry::ShapeOrder;
pub use traverse::Traverse;
