// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained-mode render service.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use tilepaint_core::backend::{NodeKey, RenderService, TargetIndex};
use tilepaint_core::config::ServiceConfig;
use tilepaint_core::dirty::Damage;
use tilepaint_core::order::ShapeOrder;
use tilepaint_core::shape::{Geometry, Shape, ShapeId, ShapeStore};
use tilepaint_core::trace::{InvalidateEvent, InvalidateKind, SurfaceEvent, TraceSink, Tracer};

use crate::attrs::{apply_icon, apply_style, path_data};
use crate::document::{NodeKind, VectorDocument};

/// Class put on nodes of interactive shapes, for host cursor styling.
pub const INTERACTIVE_CLASS: &str = "leaflet-interactive";

/// One shape's node.
#[derive(Debug)]
struct Entry<N> {
    id: ShapeId,
    node: N,
    key: NodeKey,
    kind: NodeKind,
    /// Pointer events enabled and present in the target index.
    targeted: bool,
}

/// Retained-mode render service over a [`VectorDocument`].
///
/// Every registered shape owns one node in the document's root group, in
/// paint order. Changes rewrite that node's attributes immediately; there is
/// no frame and no dirty region.
///
/// While attached with an interactive config, every node receives pointer
/// events and is listed in the host's [`TargetIndex`], so the host can route
/// DOM events back to shapes. Per-shape interactivity is carried by
/// [`INTERACTIVE_CLASS`].
pub struct SvgRenderService<D: VectorDocument> {
    doc: D,
    config: ServiceConfig,
    order: ShapeOrder,
    /// Node per slot index.
    nodes: Vec<Option<Entry<D::Node>>>,
    attached: bool,
    trace: Option<Box<dyn TraceSink>>,
}

impl<D: VectorDocument> core::fmt::Debug for SvgRenderService<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgRenderService")
            .field("config", &self.config)
            .field("shapes", &self.order.len())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl<D: VectorDocument> SvgRenderService<D> {
    /// Creates a detached service over `doc`.
    pub fn new(doc: D, config: ServiceConfig) -> Self {
        Self {
            doc,
            config,
            order: ShapeOrder::new(),
            nodes: Vec::new(),
            attached: false,
            trace: None,
        }
    }

    /// Installs a trace sink (events flow only with the `trace` feature).
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    /// The document.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// The document, mutably.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// The paint order.
    pub fn order(&self) -> &ShapeOrder {
        &self.order
    }

    /// The node holding `id`, if registered.
    pub fn node(&self, id: ShapeId) -> Option<&D::Node> {
        self.entry(id).map(|entry| &entry.node)
    }

    fn entry(&self, id: ShapeId) -> Option<&Entry<D::Node>> {
        self.nodes
            .get(id.index() as usize)?
            .as_ref()
            .filter(|entry| entry.id == id)
    }

    fn wants_target(&self) -> bool {
        self.attached && self.config.interactive
    }

    fn trace_invalidate(&mut self, id: ShapeId, kind: InvalidateKind) {
        Tracer::from_boxed(&mut self.trace).invalidate(&InvalidateEvent {
            shape_index: Some(id.index()),
            kind,
            pending: Damage::None,
        });
    }

    fn trace_surface(&mut self, attached: bool) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shape count capped at u32::MAX for tracing"
        )]
        let count = self.order.len().min(u32::MAX as usize) as u32;
        Tracer::from_boxed(&mut self.trace).surface(&SurfaceEvent {
            attached,
            shapes: count,
        });
    }
}

impl<D: VectorDocument> RenderService for SvgRenderService<D> {
    type Surface = D;

    fn surface(&self) -> &D {
        &self.doc
    }

    fn set_size(&mut self, size: Size) {
        self.doc.set_size(size);
        self.doc
            .set_view_box(Rect::from_origin_size(Point::ZERO, size));
    }

    fn attach(&mut self, _shapes: &ShapeStore, targets: &mut dyn TargetIndex) {
        if self.attached {
            return;
        }
        self.attached = true;
        let on = self.wants_target();
        for id in self.order.iter() {
            if let Some(Some(entry)) = self.nodes.get_mut(id.index() as usize) {
                set_target(&mut self.doc, entry, on, targets);
            }
        }
        self.trace_surface(true);
    }

    fn detach(&mut self, targets: &mut dyn TargetIndex) {
        if !self.attached {
            return;
        }
        self.attached = false;
        for entry in self.nodes.iter_mut().flatten() {
            set_target(&mut self.doc, entry, false, targets);
        }
        self.trace_surface(false);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn register(&mut self, shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex) -> bool {
        let Some(shape) = shapes.get(id) else {
            return false;
        };
        if self.order.contains(id) {
            return false;
        }
        let Some(mut entry) = create_entry(&mut self.doc, id, shape) else {
            return false;
        };
        self.order.register(id);
        let slot = id.index() as usize;
        if self.nodes.len() <= slot {
            self.nodes.resize_with(slot + 1, || None);
        }
        // A node left over from an earlier shape in this slot.
        if let Some(mut stale) = self.nodes[slot].take() {
            set_target(&mut self.doc, &mut stale, false, targets);
            self.doc.remove(&stale.node);
        }

        self.doc.append(&entry.node);
        let on = self.wants_target();
        set_target(&mut self.doc, &mut entry, on, targets);
        self.nodes[slot] = Some(entry);

        self.trace_invalidate(id, InvalidateKind::Register);
        true
    }

    fn remove(&mut self, _shapes: &ShapeStore, id: ShapeId, targets: &mut dyn TargetIndex) -> bool {
        if !self.order.remove(id) {
            return false;
        }
        let taken = match self.nodes.get_mut(id.index() as usize) {
            Some(slot) if slot.as_ref().is_some_and(|entry| entry.id == id) => slot.take(),
            _ => None,
        };
        if let Some(mut entry) = taken {
            set_target(&mut self.doc, &mut entry, false, targets);
            self.doc.remove(&entry.node);
        }
        self.trace_invalidate(id, InvalidateKind::Remove);
        true
    }

    fn notify_style_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        _targets: &mut dyn TargetIndex,
    ) {
        let Some(shape) = shapes.get(id) else {
            return;
        };
        let Some(Some(entry)) = self.nodes.get(id.index() as usize) else {
            return;
        };
        if entry.id != id {
            return;
        }
        if entry.kind == NodeKind::Path {
            apply_style(&mut self.doc, &entry.node, &shape.style);
        }
        self.trace_invalidate(id, InvalidateKind::Style);
    }

    fn notify_geometry_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        targets: &mut dyn TargetIndex,
    ) {
        let Some(shape) = shapes.get(id) else {
            return;
        };
        let Some(current) = self.entry(id).map(|entry| entry.kind) else {
            return;
        };
        let slot = id.index() as usize;
        if node_kind(shape) == current {
            if let Some(Some(entry)) = self.nodes.get(slot) {
                apply_geometry(&mut self.doc, &entry.node, shape);
            }
        } else if let Some(mut entry) = create_entry(&mut self.doc, id, shape)
            && let Some(mut old) = self.nodes[slot].take()
        {
            // A marker became a path or the reverse: swap in a node of the
            // new element type at the same place in the paint order.
            self.doc.replace(&old.node, &entry.node);
            let on = old.targeted;
            set_target(&mut self.doc, &mut old, false, targets);
            set_target(&mut self.doc, &mut entry, on, targets);
            self.nodes[slot] = Some(entry);
        }
        self.trace_invalidate(id, InvalidateKind::Geometry);
    }

    fn layers_at(&self, shapes: &ShapeStore, point: Point) -> Vec<ShapeId> {
        self.order.layers_at(shapes, point, self.config.tolerance)
    }
}

fn node_kind(shape: &Shape) -> NodeKind {
    match shape.geometry() {
        Geometry::Path { .. } => NodeKind::Path,
        Geometry::Marker { .. } => NodeKind::Image,
    }
}

/// Creates and fills a detached node for `shape`.
fn create_entry<D: VectorDocument>(
    doc: &mut D,
    id: ShapeId,
    shape: &Shape,
) -> Option<Entry<D::Node>> {
    let kind = node_kind(shape);
    let node = doc.create_node(kind)?;
    if let Some(class_name) = &shape.style.class_name {
        for class in class_name.split_whitespace() {
            doc.add_class(&node, class);
        }
    }
    if shape.style.interactive {
        doc.add_class(&node, INTERACTIVE_CLASS);
    }
    if kind == NodeKind::Path {
        apply_style(doc, &node, &shape.style);
    }
    apply_geometry(doc, &node, shape);
    let key = doc.node_key(&node);
    Some(Entry {
        id,
        node,
        key,
        kind,
        targeted: false,
    })
}

fn apply_geometry<D: VectorDocument + ?Sized>(doc: &mut D, node: &D::Node, shape: &Shape) {
    match shape.geometry() {
        Geometry::Path { parts, closed } => {
            doc.set_attribute(node, "d", &path_data(parts, *closed));
        }
        Geometry::Marker { position, icon } => apply_icon(doc, node, *position, icon),
    }
}

fn set_target<D: VectorDocument>(
    doc: &mut D,
    entry: &mut Entry<D::Node>,
    on: bool,
    targets: &mut dyn TargetIndex,
) {
    if entry.targeted == on {
        return;
    }
    entry.targeted = on;
    doc.set_pointer_events(&entry.node, on);
    if on {
        targets.insert(entry.key, entry.id);
    } else {
        targets.remove(entry.key);
    }
}
