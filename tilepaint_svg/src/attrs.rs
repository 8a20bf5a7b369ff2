// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute serialization for retained nodes.

use alloc::string::{String, ToString};
use core::fmt::Write as _;

use kurbo::Point;
use tilepaint_core::shape::{Icon, Style};

use crate::document::VectorDocument;

/// Path data for an empty shape, so the node stays valid.
pub const EMPTY_PATH: &str = "M0 0";

/// Serializes parts as SVG path data: `M x y L x y ...`, with `z` after each
/// part when `closed`.
///
/// Parts without points are skipped; nothing at all yields [`EMPTY_PATH`].
#[must_use]
pub fn path_data(parts: &[impl AsRef<[Point]>], closed: bool) -> String {
    let mut d = String::new();
    for part in parts {
        let points = part.as_ref();
        if points.is_empty() {
            continue;
        }
        for (i, p) in points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            // Writing into a String cannot fail.
            let _ = write!(d, "{cmd}{} {}", p.x, p.y);
        }
        if closed {
            d.push('z');
        }
    }
    if d.is_empty() {
        d.push_str(EMPTY_PATH);
    }
    d
}

/// Writes the presentation attributes of `style` onto a path node.
///
/// A disabled stroke or fill is written as `none`; optional attributes that
/// are unset are removed so stale values never linger.
pub fn apply_style<D: VectorDocument + ?Sized>(doc: &mut D, node: &D::Node, style: &Style) {
    if style.stroke {
        doc.set_attribute(node, "stroke", &style.color.to_string());
        doc.set_attribute(node, "stroke-opacity", &style.opacity.to_string());
        doc.set_attribute(node, "stroke-width", &style.weight.to_string());
        doc.set_attribute(node, "stroke-linecap", style.line_cap.as_str());
        doc.set_attribute(node, "stroke-linejoin", style.line_join.as_str());
        match style.dash_array() {
            Some(dashes) => doc.set_attribute(node, "stroke-dasharray", dashes),
            None => doc.remove_attribute(node, "stroke-dasharray"),
        }
        match style.dash_offset.filter(|offset| *offset != 0.0) {
            Some(offset) => doc.set_attribute(node, "stroke-dashoffset", &offset.to_string()),
            None => doc.remove_attribute(node, "stroke-dashoffset"),
        }
    } else {
        doc.set_attribute(node, "stroke", "none");
    }

    if style.fill {
        doc.set_attribute(node, "fill", &style.effective_fill_color().to_string());
        doc.set_attribute(node, "fill-opacity", &style.fill_opacity.to_string());
        doc.set_attribute(node, "fill-rule", style.fill_rule.as_str());
    } else {
        doc.set_attribute(node, "fill", "none");
    }
}

/// Writes an icon's placement onto an image node.
pub fn apply_icon<D: VectorDocument + ?Sized>(
    doc: &mut D,
    node: &D::Node,
    position: Point,
    icon: &Icon,
) {
    let origin = icon.origin(position);
    doc.set_attribute(node, "x", &origin.x.to_string());
    doc.set_attribute(node, "y", &origin.y.to_string());
    doc.set_attribute(node, "width", &px(icon.size.width));
    doc.set_attribute(node, "height", &px(icon.size.height));
    doc.set_attribute(node, "href", &icon.url);
}

fn px(v: f64) -> String {
    let mut s = v.to_string();
    s.push_str("px");
    s
}
