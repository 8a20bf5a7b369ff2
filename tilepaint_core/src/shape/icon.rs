// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image-based marker icons.

use alloc::string::String;

use kurbo::{Point, Rect, Size, Vec2};

/// An image drawn with its anchor at a marker's position.
#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    /// Image location, resolved by the backend's image loader.
    pub url: String,
    /// Drawn size in pixels.
    pub size: Size,
    /// Offset from the image's top-left corner to the point placed on the
    /// marker position. Defaults to the rounded center of the image.
    pub anchor: Option<Vec2>,
}

impl Icon {
    /// Creates an icon anchored at its center.
    #[must_use]
    pub fn new(url: impl Into<String>, size: Size) -> Self {
        Self {
            url: url.into(),
            size,
            anchor: None,
        }
    }

    /// Sets an explicit anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// The effective anchor offset.
    #[must_use]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
            .unwrap_or_else(|| (self.size.to_vec2() / 2.0).round())
    }

    /// Top-left corner of the image when the marker sits at `position`.
    #[must_use]
    pub fn origin(&self, position: Point) -> Point {
        position - self.anchor()
    }

    /// Area covered by the image when the marker sits at `position`.
    #[must_use]
    pub fn rect(&self, position: Point) -> Rect {
        Rect::from_origin_size(self.origin(position), self.size)
    }
}
