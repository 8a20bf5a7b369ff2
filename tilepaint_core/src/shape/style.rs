// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke style records.

use alloc::string::String;
use core::fmt;

use super::dash::{DashParseError, DashPattern};

/// An 8-bit sRGB color with alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Color {
    /// The default stroke color, `#3388ff`.
    pub const DEFAULT_STROKE: Self = Self::from_rgb8(0x33, 0x88, 0xff);

    /// Creates an opaque color.
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with alpha.
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Formats as a CSS color: `#rrggbb` when opaque, `rgba(...)` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({},{},{},{})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Fill rule for closed shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Non-zero winding.
    NonZero,
    /// Even-odd.
    #[default]
    EvenOdd,
}

impl FillRule {
    /// The SVG / canvas keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

/// Shape drawn at the ends of open stroked parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat, ending exactly at the endpoint.
    Butt,
    /// Semicircular.
    #[default]
    Round,
    /// Square, extending half the stroke width.
    Square,
}

impl LineCap {
    /// The SVG / canvas keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Shape drawn where stroked segments meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Cut-off corner.
    Bevel,
}

impl LineJoin {
    /// The SVG / canvas keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// Presentation attributes of a shape.
///
/// Defaults match a plain polyline: a 3px round-capped `#3388ff` stroke and
/// no fill. [`Style::polygon`] turns the fill on.
///
/// The dash text and its parsed [`DashPattern`] are kept together; change
/// them through [`set_dash_array`](Self::set_dash_array) so the cached
/// pattern never goes stale.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Whether the outline is stroked.
    pub stroke: bool,
    /// Stroke color (also the fill color when `fill_color` is unset).
    pub color: Color,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f32,
    /// Line cap.
    pub line_cap: LineCap,
    /// Line join.
    pub line_join: LineJoin,
    /// Offset into the dash pattern.
    pub dash_offset: Option<f64>,
    /// Whether the interior is filled.
    pub fill: bool,
    /// Fill color; falls back to `color`.
    pub fill_color: Option<Color>,
    /// Fill opacity.
    pub fill_opacity: f32,
    /// Fill rule.
    pub fill_rule: FillRule,
    /// Whether the shape takes part in hit testing.
    pub interactive: bool,
    /// Extra class name put on retained nodes.
    pub class_name: Option<String>,
    dash_array: Option<String>,
    dash: DashPattern,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: true,
            color: Color::DEFAULT_STROKE,
            weight: 3.0,
            opacity: 1.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash_offset: None,
            fill: false,
            fill_color: None,
            fill_opacity: 0.2,
            fill_rule: FillRule::EvenOdd,
            interactive: true,
            class_name: None,
            dash_array: None,
            dash: DashPattern::solid(),
        }
    }
}

impl Style {
    /// Default style for closed shapes: stroked and filled.
    #[must_use]
    pub fn polygon() -> Self {
        Self {
            fill: true,
            ..Self::default()
        }
    }

    /// The color used for filling.
    #[must_use]
    pub fn effective_fill_color(&self) -> Color {
        self.fill_color.unwrap_or(self.color)
    }

    /// Whether anything is stroked at all.
    #[must_use]
    pub fn strokes(&self) -> bool {
        self.stroke && self.weight != 0.0
    }

    /// The raw dash text, if any.
    #[must_use]
    pub fn dash_array(&self) -> Option<&str> {
        self.dash_array.as_deref()
    }

    /// The parsed dash pattern (solid if no dash text is set).
    #[must_use]
    pub fn dash(&self) -> &DashPattern {
        &self.dash
    }

    /// Sets the dash text and re-parses the cached pattern.
    ///
    /// `None` or empty text removes dashing.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed text; the previous dash text and
    /// pattern are kept in that case.
    pub fn set_dash_array(&mut self, text: Option<&str>) -> Result<(), DashParseError> {
        let dash = match text {
            Some(text) => DashPattern::parse(text)?,
            None => DashPattern::solid(),
        };
        self.dash_array = if dash.is_solid() {
            None
        } else {
            text.map(String::from)
        };
        self.dash = dash;
        Ok(())
    }

    /// Builder form of [`set_dash_array`](Self::set_dash_array).
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed text.
    pub fn with_dash_array(mut self, text: &str) -> Result<Self, DashParseError> {
        self.set_dash_array(Some(text))?;
        Ok(self)
    }

    /// Stroke padding used when extending dirty regions.
    #[must_use]
    pub fn redraw_padding(&self) -> f64 {
        self.weight + 1.0
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn colors_format_as_css() {
        assert_eq!(Color::DEFAULT_STROKE.to_string(), "#3388ff");
        assert_eq!(
            Color::from_rgba8(255, 0, 0, 0).to_string(),
            "rgba(255,0,0,0)"
        );
    }

    #[test]
    fn fill_color_falls_back_to_stroke_color() {
        let mut style = Style::polygon();
        assert_eq!(style.effective_fill_color(), Color::DEFAULT_STROKE);
        style.fill_color = Some(Color::from_rgb8(1, 2, 3));
        assert_eq!(style.effective_fill_color(), Color::from_rgb8(1, 2, 3));
    }

    #[test]
    fn dash_cache_follows_text() {
        let mut style = Style::default();
        style.set_dash_array(Some("5,3")).unwrap();
        assert_eq!(style.dash().as_slice(), &[5.0, 3.0]);
        assert_eq!(style.dash_array(), Some("5,3"));

        style.set_dash_array(None).unwrap();
        assert!(style.dash().is_solid());
        assert_eq!(style.dash_array(), None);
    }

    #[test]
    fn malformed_dash_keeps_previous_pattern() {
        let mut style = Style::default().with_dash_array("4,2").unwrap();
        assert!(style.set_dash_array(Some("4,abc")).is_err());
        assert_eq!(style.dash().as_slice(), &[4.0, 2.0]);
        assert_eq!(style.dash_array(), Some("4,2"));
    }

    #[test]
    fn zero_weight_does_not_stroke() {
        let style = Style {
            weight: 0.0,
            ..Style::default()
        };
        assert!(!style.strokes());
    }
}
