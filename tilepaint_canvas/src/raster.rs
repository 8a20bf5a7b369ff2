// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape rasterization.

use kurbo::{Cap, Join, Point, Stroke};
use tilepaint_core::shape::{Geometry, Icon, LineCap, LineJoin, Shape, Style};

use crate::context::Canvas2d;

/// What drawing one shape did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drawn {
    /// Nothing to draw (no points, or neither fill nor stroke).
    Nothing,
    /// The path was filled and/or stroked, or the icon drawn.
    Painted,
    /// The icon image is still loading; it draws at `origin` once loaded.
    Deferred {
        /// Draw origin fixed at the time of the repaint.
        origin: Point,
    },
}

/// Stroke parameters for `style`: width, caps, join and dash pattern.
#[must_use]
pub fn stroke_for(style: &Style) -> Stroke {
    let stroke = Stroke::new(style.weight)
        .with_caps(match style.line_cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        })
        .with_join(match style.line_join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        });
    let dash = style.dash();
    if dash.is_solid() {
        stroke
    } else {
        stroke.with_dashes(style.dash_offset.unwrap_or(0.0), dash.as_slice())
    }
}

/// Draws one shape.
pub fn draw_shape<C: Canvas2d + ?Sized>(canvas: &mut C, shape: &Shape) -> Drawn {
    match shape.geometry() {
        Geometry::Marker { position, icon } => draw_icon(canvas, *position, icon),
        Geometry::Path { .. } => {
            let Some(path) = shape.outline() else {
                return Drawn::Nothing;
            };
            let style = &shape.style;
            let mut drawn = Drawn::Nothing;
            if style.fill {
                canvas.fill(
                    &path,
                    style.effective_fill_color(),
                    style.fill_opacity,
                    style.fill_rule,
                );
                drawn = Drawn::Painted;
            }
            if style.strokes() {
                canvas.stroke(&path, &stroke_for(style), style.color, style.opacity);
                drawn = Drawn::Painted;
            }
            drawn
        }
    }
}

/// Draws `icon` anchored at `position`, deferring until its image loads.
pub fn draw_icon<C: Canvas2d + ?Sized>(canvas: &mut C, position: Point, icon: &Icon) -> Drawn {
    let origin = icon.origin(position);
    if canvas.image_ready(&icon.url) {
        canvas.draw_image(&icon.url, origin, icon.size);
        Drawn::Painted
    } else {
        canvas.draw_when_loaded(&icon.url, origin, icon.size);
        Drawn::Deferred { origin }
    }
}
