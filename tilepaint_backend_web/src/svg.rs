// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline `<svg>` vector document.

use alloc::format;
use alloc::string::String;

use kurbo::{Rect, Size};
use tilepaint_core::backend::NodeKey;
use tilepaint_svg::{NodeKind, VectorDocument};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, SvgElement};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// One element in an [`SvgDocument`].
#[derive(Clone, Debug)]
pub struct SvgNode {
    element: Element,
    key: NodeKey,
}

impl SvgNode {
    /// The DOM element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

/// A [`VectorDocument`] over an `<svg>` element with one root `<g>`.
///
/// The `<svg>` itself never takes pointer events; individual nodes are
/// switched on by the retained service.
pub struct SvgDocument {
    document: Document,
    root: SvgElement,
    group: Element,
    next_key: u64,
}

impl core::fmt::Debug for SvgDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgDocument")
            .field("root", &"SvgElement")
            .field("next_key", &self.next_key)
            .finish_non_exhaustive()
    }
}

impl SvgDocument {
    /// Creates a detached `<svg><g/></svg>` in `document`.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if the elements cannot be created.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let root: SvgElement = document
            .create_element_ns(Some(SVG_NS), "svg")?
            .unchecked_into();
        let _ = root.style().set_property("pointer-events", "none");
        let group = document.create_element_ns(Some(SVG_NS), "g")?;
        root.append_child(&group)?;
        Ok(Self {
            document: document.clone(),
            root,
            group,
            next_key: 0,
        })
    }

    /// The `<svg>` element.
    #[must_use]
    pub fn element(&self) -> &SvgElement {
        &self.root
    }
}

impl VectorDocument for SvgDocument {
    type Node = SvgNode;

    fn set_size(&mut self, size: Size) {
        let _ = self.root.set_attribute("width", &format!("{}", size.width));
        let _ = self.root.set_attribute("height", &format!("{}", size.height));
    }

    fn set_view_box(&mut self, view_box: Rect) {
        let _ = self.root.set_attribute("viewBox", &view_box_attr(view_box));
    }

    fn create_node(&mut self, kind: NodeKind) -> Option<SvgNode> {
        let name = match kind {
            NodeKind::Path => "path",
            NodeKind::Image => "image",
        };
        let element = self.document.create_element_ns(Some(SVG_NS), name).ok()?;
        self.next_key += 1;
        Some(SvgNode {
            element,
            key: NodeKey(self.next_key),
        })
    }

    fn node_key(&self, node: &SvgNode) -> NodeKey {
        node.key
    }

    fn set_attribute(&mut self, node: &SvgNode, name: &str, value: &str) {
        let _ = node.element.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, node: &SvgNode, name: &str) {
        let _ = node.element.remove_attribute(name);
    }

    fn add_class(&mut self, node: &SvgNode, class: &str) {
        let _ = node.element.class_list().add_1(class);
    }

    fn set_pointer_events(&mut self, node: &SvgNode, enabled: bool) {
        let value = if enabled { "auto" } else { "none" };
        let style = node.element.unchecked_ref::<SvgElement>().style();
        let _ = style.set_property("pointer-events", value);
    }

    fn append(&mut self, node: &SvgNode) {
        let _ = self.group.append_child(&node.element);
    }

    fn replace(&mut self, old: &SvgNode, new: &SvgNode) {
        let _ = self.group.replace_child(&new.element, &old.element);
    }

    fn remove(&mut self, node: &SvgNode) {
        node.element.remove();
    }
}

/// `viewBox` attribute value: `min-x min-y width height`.
fn view_box_attr(view_box: Rect) -> String {
    format!(
        "{} {} {} {}",
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height()
    )
}
