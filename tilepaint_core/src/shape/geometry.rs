// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape geometry, bounds and point containment.

use alloc::vec::Vec;

use kurbo::{BezPath, Line, ParamCurveNearest, Point, Rect, Shape as _};

use super::icon::Icon;
use super::style::{FillRule, Style};

/// What a shape draws.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// One or more parts of connected points.
    ///
    /// Closed geometry (polygons) closes every part back to its first point
    /// and can be filled.
    Path {
        /// Point sequences in surface-local pixels.
        parts: Vec<Vec<Point>>,
        /// Whether each part is closed.
        closed: bool,
    },
    /// An icon placed at a single point.
    Marker {
        /// Marker position in surface-local pixels.
        position: Point,
        /// The icon drawn there.
        icon: Icon,
    },
}

/// A styled vector shape.
///
/// The bounding box is kept in sync with the geometry: every geometry setter
/// recomputes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Presentation attributes.
    pub style: Style,
    geometry: Geometry,
    bounds: Option<Rect>,
}

impl Shape {
    /// Creates a shape from geometry and style.
    #[must_use]
    pub fn new(geometry: Geometry, style: Style) -> Self {
        let bounds = compute_bounds(&geometry);
        Self {
            style,
            geometry,
            bounds,
        }
    }

    /// An open polyline with the default line style.
    #[must_use]
    pub fn polyline(parts: Vec<Vec<Point>>) -> Self {
        Self::new(
            Geometry::Path {
                parts,
                closed: false,
            },
            Style::default(),
        )
    }

    /// A closed polygon with the default polygon style.
    #[must_use]
    pub fn polygon(parts: Vec<Vec<Point>>) -> Self {
        Self::new(
            Geometry::Path {
                parts,
                closed: true,
            },
            Style::polygon(),
        )
    }

    /// An icon marker.
    #[must_use]
    pub fn marker(position: Point, icon: Icon) -> Self {
        Self::new(Geometry::Marker { position, icon }, Style::default())
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Replaces the geometry and recomputes the bounds.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.bounds = compute_bounds(&geometry);
        self.geometry = geometry;
    }

    /// Replaces the parts of path geometry, keeping its closedness.
    ///
    /// Markers are left untouched.
    pub fn set_parts(&mut self, new_parts: Vec<Vec<Point>>) {
        if let Geometry::Path { parts, .. } = &mut self.geometry {
            *parts = new_parts;
            self.bounds = compute_bounds(&self.geometry);
        }
    }

    /// Moves a marker. Path geometry is left untouched.
    pub fn set_position(&mut self, new_position: Point) {
        if let Geometry::Marker { position, .. } = &mut self.geometry {
            *position = new_position;
            self.bounds = compute_bounds(&self.geometry);
        }
    }

    /// Axis-aligned bounds in surface-local pixels, `None` for empty geometry.
    ///
    /// Path bounds cover the points only; stroke width is added by callers
    /// that need it.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether parts are closed (polygon semantics).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.geometry, Geometry::Path { closed: true, .. })
    }

    /// Builds the outline path: one subpath per part, closed for polygons.
    ///
    /// Returns `None` for markers and for geometry without points.
    #[must_use]
    pub fn outline(&self) -> Option<BezPath> {
        let Geometry::Path { parts, closed } = &self.geometry else {
            return None;
        };
        let mut path = BezPath::new();
        for part in parts {
            let Some((first, rest)) = part.split_first() else {
                continue;
            };
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            if *closed {
                path.close_path();
            }
        }
        (!path.elements().is_empty()).then_some(path)
    }

    /// Whether `point` hits this shape.
    ///
    /// Markers are hit inside their icon rectangle. Paths are hit within
    /// half the stroke width plus `tolerance` of any segment, and closed
    /// filled paths anywhere inside under their fill rule.
    #[must_use]
    pub fn contains_point(&self, point: Point, tolerance: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        match &self.geometry {
            Geometry::Marker { .. } => rect_contains(bounds, point),
            Geometry::Path { parts, closed } => {
                let reach = self.style.weight / 2.0 + tolerance;
                if !rect_contains(bounds.inflate(reach, reach), point) {
                    return false;
                }
                if *closed
                    && self.style.fill
                    && self
                        .outline()
                        .is_some_and(|path| inside(&path, point, self.style.fill_rule))
                {
                    return true;
                }
                near_outline(parts, *closed, point, reach)
            }
        }
    }
}

/// Inclusive-edge containment, matching pixel-bounds semantics.
pub(crate) fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Inclusive-edge overlap test; touching rectangles intersect.
#[must_use]
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x1 >= b.x0 && a.x0 <= b.x1 && a.y1 >= b.y0 && a.y0 <= b.y1
}

fn compute_bounds(geometry: &Geometry) -> Option<Rect> {
    match geometry {
        Geometry::Path { parts, .. } => parts
            .iter()
            .flatten()
            .fold(None, |acc: Option<Rect>, &p| match acc {
                Some(r) => Some(r.union_pt(p)),
                None => Some(Rect::from_points(p, p)),
            }),
        Geometry::Marker { position, icon } => Some(icon.rect(*position)),
    }
}

fn inside(path: &BezPath, point: Point, rule: FillRule) -> bool {
    let winding = path.winding(point);
    match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => winding % 2 != 0,
    }
}

fn near_outline(parts: &[Vec<Point>], closed: bool, point: Point, reach: f64) -> bool {
    let reach_sq = reach * reach;
    let near = |a: Point, b: Point| Line::new(a, b).nearest(point, 1e-9).distance_sq <= reach_sq;
    for part in parts {
        match part.as_slice() {
            [] => {}
            [only] => {
                if only.distance_squared(point) <= reach_sq {
                    return true;
                }
            }
            _ => {
                if part.windows(2).any(|w| near(w[0], w[1])) {
                    return true;
                }
                if closed && part.len() > 2 && near(part[part.len() - 1], part[0]) {
                    return true;
                }
            }
        }
    }
    false
}
