// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<canvas>` drawing context.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use kurbo::{BezPath, Cap, Join, PathEl, Point, Rect, Size, Stroke};
use tilepaint_canvas::Canvas2d;
use tilepaint_core::shape::{Color, FillRule};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    CanvasRenderingContext2d, CanvasWindingRule, Document, HtmlCanvasElement, HtmlImageElement,
    Path2d,
};

/// A [`Canvas2d`] over an HTML `<canvas>` element.
///
/// Icon images are loaded once per URL and cached for the life of the
/// canvas.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: BTreeMap<String, HtmlImageElement>,
}

impl core::fmt::Debug for WebCanvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebCanvas")
            .field("element", &"HtmlCanvasElement")
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}

impl WebCanvas {
    /// Creates a detached `<canvas>` in `document`.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if the element or its 2D context cannot be
    /// created.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let element: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
        Self::from_element(element)
    }

    /// Wraps an existing `<canvas>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element has no 2D context.
    pub fn from_element(element: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = element
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .unchecked_into();
        Ok(Self {
            element,
            ctx,
            images: BTreeMap::new(),
        })
    }

    /// The `<canvas>` element.
    #[must_use]
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    /// The image for `url`, created and set loading on first use.
    fn image(&mut self, url: &str) -> Option<HtmlImageElement> {
        if let Some(img) = self.images.get(url) {
            return Some(img.clone());
        }
        let img = HtmlImageElement::new().ok()?;
        img.set_src(url);
        self.images.insert(url.to_string(), img.clone());
        Some(img)
    }
}

impl Canvas2d for WebCanvas {
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.element.width()),
            f64::from(self.element.height()),
        )
    }

    fn set_size(&mut self, size: Size) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "tile sizes are small positive pixel counts"
        )]
        let (w, h) = (size.width as u32, size.height as u32);
        self.element.set_width(w);
        self.element.set_height(h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx
            .rect(rect.x0, rect.y0, rect.width(), rect.height());
        self.ctx.clip();
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill(&mut self, path: &BezPath, color: Color, alpha: f32, rule: FillRule) {
        let Some(path) = to_path2d(path) else {
            return;
        };
        self.ctx.set_global_alpha(f64::from(alpha));
        self.ctx.set_fill_style_str(&color.to_string());
        let winding = match rule {
            FillRule::EvenOdd => CanvasWindingRule::Evenodd,
            FillRule::NonZero => CanvasWindingRule::Nonzero,
        };
        self.ctx.fill_with_path_2d_and_winding(&path, winding);
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color, alpha: f32) {
        let Some(path) = to_path2d(path) else {
            return;
        };
        let dashes = js_sys::Array::new();
        for &d in stroke.dash_pattern.iter() {
            dashes.push(&JsValue::from_f64(d));
        }
        let _ = self.ctx.set_line_dash(&dashes);
        self.ctx.set_line_dash_offset(stroke.dash_offset);
        self.ctx.set_global_alpha(f64::from(alpha));
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_cap(cap_str(stroke.start_cap));
        self.ctx.set_line_join(join_str(stroke.join));
        self.ctx.stroke_with_path(&path);
    }

    fn image_ready(&self, url: &str) -> bool {
        self.images
            .get(url)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw_image(&mut self, url: &str, origin: Point, size: Size) {
        if let Some(img) = self.images.get(url) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                origin.x,
                origin.y,
                size.width,
                size.height,
            );
        }
    }

    fn draw_when_loaded(&mut self, url: &str, origin: Point, size: Size) {
        let Some(img) = self.image(url) else {
            return;
        };
        let ctx = self.ctx.clone();
        let target = img.clone();
        // A listener per waiter; `onload` would keep only the last one.
        let on_load = Closure::once_into_js(move || {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &target,
                origin.x,
                origin.y,
                size.width,
                size.height,
            );
        });
        let _ = img.add_event_listener_with_callback("load", on_load.unchecked_ref());
    }

    fn enable_pointer_events(&mut self) {
        let _ = self.element.style().set_property("pointer-events", "auto");
    }
}

/// Builds a `Path2D` from kurbo path elements.
fn to_path2d(path: &BezPath) -> Option<Path2d> {
    let out = Path2d::new().ok()?;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(p.x, p.y),
            PathEl::LineTo(p) => out.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => out.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => out.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => out.close_path(),
        }
    }
    Some(out)
}

/// `lineCap` value for a kurbo cap.
pub(crate) fn cap_str(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

/// `lineJoin` value for a kurbo join.
pub(crate) fn join_str(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

#[cfg(test)]
mod tests {
    use tilepaint_canvas::raster::stroke_for;
    use tilepaint_core::shape::{LineCap, LineJoin, Style};

    use super::*;

    #[test]
    fn stroke_parameters_map_to_canvas_keywords() {
        let mut style = Style::default();
        assert_eq!(cap_str(stroke_for(&style).start_cap), "round");
        assert_eq!(join_str(stroke_for(&style).join), "round");

        style.line_cap = LineCap::Butt;
        style.line_join = LineJoin::Miter;
        assert_eq!(cap_str(stroke_for(&style).start_cap), "butt");
        assert_eq!(join_str(stroke_for(&style).join), "miter");
    }
}
