// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immediate-mode render service.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use tilepaint_core::backend::{RenderService, TargetIndex};
use tilepaint_core::config::ServiceConfig;
use tilepaint_core::dirty::{self, Damage, DirtyRegion};
use tilepaint_core::frame::{FrameRequester, PendingFrame};
use tilepaint_core::order::ShapeOrder;
use tilepaint_core::pointer::{DispatchOutcome, EventSink, PointerDispatcher, PointerEvent, View};
use tilepaint_core::shape::{Geometry, Shape, ShapeId, ShapeStore, rects_intersect};
use tilepaint_core::time::HostTime;
use tilepaint_core::trace::{
    FrameRequestEvent, IconDeferredEvent, InvalidateEvent, InvalidateKind, RedrawBeginEvent,
    RedrawEndEvent, SurfaceEvent, TraceSink, Tracer,
};
use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::context::Canvas2d;
use crate::raster::{Drawn, draw_shape};

/// What one frame callback did.
///
/// A frame with nothing pending reports [`Damage::None`] and paints nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedrawReport {
    /// Repaint counter; unchanged by frames that paint nothing.
    pub frame_index: u64,
    /// Area cleared and repainted, rounded outward to whole pixels.
    pub damage: Damage,
    /// Shapes rasterized, in paint order.
    pub painted: Vec<ShapeId>,
    /// Slot indices whose style changed since the last frame.
    pub style: Vec<u32>,
    /// Slot indices whose geometry changed since the last frame.
    pub geometry: Vec<u32>,
    /// Slot indices registered or removed since the last frame.
    pub topology: Vec<u32>,
}

impl RedrawReport {
    /// Whether the frame repainted nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.damage.is_empty()
    }
}

/// Immediate-mode render service over a [`Canvas2d`] and a
/// [`FrameRequester`].
///
/// Invalidations accumulate in a [`DirtyRegion`] and request at most one
/// frame. When the host fires it, [`run_frame`](Self::run_frame) clips to
/// the damage, clears it and repaints every registered shape that touches it,
/// in paint order.
pub struct CanvasRenderService<C, F: FrameRequester> {
    canvas: C,
    frames: F,
    config: ServiceConfig,
    order: ShapeOrder,
    /// Padded bounds each shape covered when last painted, by slot index.
    painted: Vec<Option<Rect>>,
    dirty: DirtyRegion,
    changes: DirtyTracker<u32>,
    pending: PendingFrame<F::Handle>,
    pointer: PointerDispatcher,
    attached: bool,
    drawing: bool,
    frame_index: u64,
    trace: Option<Box<dyn TraceSink>>,
}

impl<C, F: FrameRequester> core::fmt::Debug for CanvasRenderService<C, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasRenderService")
            .field("config", &self.config)
            .field("shapes", &self.order.len())
            .field("dirty", &self.dirty)
            .field("pending", &self.pending.is_pending())
            .field("attached", &self.attached)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl<C: Canvas2d, F: FrameRequester> CanvasRenderService<C, F> {
    /// Creates a detached service drawing into `canvas`.
    ///
    /// `offset` is the surface origin in map pixel space (see
    /// [`TileCoord::offset`](tilepaint_core::tile::TileCoord::offset)).
    pub fn new(mut canvas: C, frames: F, offset: Vec2, config: ServiceConfig) -> Self {
        if config.interactive {
            canvas.enable_pointer_events();
        }
        Self {
            canvas,
            frames,
            config,
            order: ShapeOrder::new(),
            painted: Vec::new(),
            dirty: DirtyRegion::new(),
            changes: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending: PendingFrame::new(),
            pointer: PointerDispatcher::new(offset, &config),
            attached: false,
            drawing: false,
            frame_index: 0,
            trace: None,
        }
    }

    /// Installs a trace sink (events flow only with the `trace` feature).
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    /// The drawing context.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The drawing context, mutably.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// The frame requester.
    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// The paint order.
    pub fn order(&self) -> &ShapeOrder {
        &self.order
    }

    /// Whether a frame is requested and has not fired yet.
    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Damage accumulated for the next frame (not yet rounded).
    pub fn pending_damage(&self) -> Damage {
        self.dirty.pending()
    }

    /// Whether a repaint is in progress.
    ///
    /// Icons are drawn only while this holds.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The hovered shape.
    pub fn hovered(&self) -> Option<ShapeId> {
        self.pointer.hovered()
    }

    /// Frame entry point: call when the requested frame fires.
    ///
    /// Repaints the accumulated damage, or does nothing if no frame was
    /// pending or nothing was invalidated.
    pub fn run_frame(&mut self, shapes: &ShapeStore, now: HostTime) -> RedrawReport {
        if !self.pending.fired() {
            return RedrawReport {
                frame_index: self.frame_index,
                ..RedrawReport::default()
            };
        }
        let mut report = RedrawReport {
            damage: self.dirty.consume(),
            style: drain(&mut self.changes, dirty::STYLE),
            geometry: drain(&mut self.changes, dirty::GEOMETRY),
            topology: drain(&mut self.changes, dirty::TOPOLOGY),
            ..RedrawReport::default()
        };
        let clip = match report.damage {
            Damage::None => {
                report.frame_index = self.frame_index;
                return report;
            }
            Damage::Full => None,
            Damage::Rect(rect) => Some(rect),
        };

        self.frame_index += 1;
        report.frame_index = self.frame_index;
        let mut tracer = Tracer::from_boxed(&mut self.trace);
        tracer.redraw_begin(&RedrawBeginEvent {
            frame_index: self.frame_index,
            timestamp: now,
            damage: report.damage,
        });

        self.drawing = true;
        let area = clip.unwrap_or_else(|| Rect::from_origin_size(Point::ZERO, self.canvas.size()));
        self.canvas.save();
        self.canvas.clip_rect(area);
        self.canvas.clear_rect(area);

        let mut skipped = 0_u32;
        for id in self.order.iter() {
            let Some(shape) = shapes.get(id) else {
                continue;
            };
            let Some(footprint) = paint_bounds(shape) else {
                continue;
            };
            if clip.is_some_and(|clip| !rects_intersect(footprint, clip)) {
                skipped += 1;
                continue;
            }
            match draw_shape(&mut self.canvas, shape) {
                Drawn::Nothing => {}
                Drawn::Painted => report.painted.push(id),
                Drawn::Deferred { origin } => {
                    tracer.icon_deferred(&IconDeferredEvent {
                        shape_index: id.index(),
                        origin,
                    });
                    report.painted.push(id);
                }
            }
            set_painted(&mut self.painted, id, Some(dirty_bounds(shape, footprint)));
        }

        self.canvas.restore();
        self.drawing = false;

        #[expect(
            clippy::cast_possible_truncation,
            reason = "painted count capped at u32::MAX for tracing"
        )]
        let painted = report.painted.len().min(u32::MAX as usize) as u32;
        tracer.redraw_end(&RedrawEndEvent {
            frame_index: self.frame_index,
            timestamp: now,
            painted,
            skipped,
        });
        report
    }

    /// Forwards a raw pointer event. Ignored while detached.
    pub fn handle_pointer(
        &mut self,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        event: PointerEvent,
    ) -> DispatchOutcome {
        if !self.attached {
            return DispatchOutcome::default();
        }
        let mut tracer = Tracer::from_boxed(&mut self.trace);
        self.pointer
            .handle(&self.order, shapes, view, sink, event, &mut tracer)
    }

    /// Delivers a throttled pointer move that has come due at `now`.
    pub fn flush_pointer(
        &mut self,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        now: HostTime,
    ) -> DispatchOutcome {
        if !self.attached {
            return DispatchOutcome::default();
        }
        let mut tracer = Tracer::from_boxed(&mut self.trace);
        self.pointer
            .flush(&self.order, shapes, view, sink, now, &mut tracer)
    }

    /// When a throttled pointer move is due, for hosts that arm a timer.
    pub fn next_pointer_deadline(&self) -> Option<HostTime> {
        self.pointer.next_deadline()
    }

    /// Accumulates damage and requests a frame. Skipped while detached.
    fn invalidate(
        &mut self,
        shape_index: Option<u32>,
        kind: InvalidateKind,
        extend: impl FnOnce(&mut DirtyRegion),
    ) {
        if !self.attached {
            return;
        }
        extend(&mut self.dirty);
        let issued = self.pending.request(&mut self.frames);

        let mut tracer = Tracer::from_boxed(&mut self.trace);
        tracer.invalidate(&InvalidateEvent {
            shape_index,
            kind,
            pending: self.dirty.pending(),
        });
        tracer.frame_request(&FrameRequestEvent { coalesced: !issued });
    }

    fn last_painted(&self, id: ShapeId) -> Option<Rect> {
        self.painted.get(id.index() as usize).copied().flatten()
    }

    fn mark(&mut self, id: ShapeId, channel: Channel) {
        if self.attached {
            self.changes.mark(id.index(), channel);
        }
    }
}

impl<C: Canvas2d, F: FrameRequester> RenderService for CanvasRenderService<C, F> {
    type Surface = C;

    fn surface(&self) -> &C {
        &self.canvas
    }

    fn set_size(&mut self, size: Size) {
        self.canvas.set_size(size);
        self.invalidate(None, InvalidateKind::Resize, DirtyRegion::mark_full);
    }

    fn attach(&mut self, _shapes: &ShapeStore, _targets: &mut dyn TargetIndex) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.invalidate(None, InvalidateKind::Attach, DirtyRegion::mark_full);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shape count capped at u32::MAX for tracing"
        )]
        let count = self.order.len().min(u32::MAX as usize) as u32;
        Tracer::from_boxed(&mut self.trace).surface(&SurfaceEvent {
            attached: true,
            shapes: count,
        });
    }

    fn detach(&mut self, _targets: &mut dyn TargetIndex) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.pending.cancel(&mut self.frames);
        self.dirty = DirtyRegion::new();
        self.pointer.reset();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shape count capped at u32::MAX for tracing"
        )]
        let count = self.order.len().min(u32::MAX as usize) as u32;
        Tracer::from_boxed(&mut self.trace).surface(&SurfaceEvent {
            attached: false,
            shapes: count,
        });
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn register(&mut self, shapes: &ShapeStore, id: ShapeId, _targets: &mut dyn TargetIndex) -> bool {
        let Some(shape) = shapes.get(id) else {
            return false;
        };
        // An older shape in this slot that was never removed gets unlinked by
        // the registry; its pixels still have to be cleared.
        let stale = self.order.occupant(id.index()).filter(|&other| other != id);
        if !self.order.register(id) {
            return false;
        }
        let old = match stale {
            Some(stale) => {
                self.pointer.forget(stale);
                self.last_painted(stale)
            }
            None => None,
        };
        set_painted(&mut self.painted, id, None);
        self.mark(id, dirty::TOPOLOGY);
        self.invalidate(Some(id.index()), InvalidateKind::Register, |dirty| {
            if let Some(old) = old {
                dirty.extend(old, 0.0);
            }
            dirty.extend_shape(shape);
        });
        true
    }

    fn remove(&mut self, shapes: &ShapeStore, id: ShapeId, _targets: &mut dyn TargetIndex) -> bool {
        if !self.order.remove(id) {
            return false;
        }
        self.changes.remove_key(id.index());
        self.mark(id, dirty::TOPOLOGY);
        self.pointer.forget(id);
        let old = self.last_painted(id);
        set_painted(&mut self.painted, id, None);
        let current = shapes.get(id);
        self.invalidate(Some(id.index()), InvalidateKind::Remove, |dirty| {
            match (old, current) {
                (Some(old), _) => dirty.extend(old, 0.0),
                (None, Some(shape)) => dirty.extend_shape(shape),
                (None, None) => {}
            }
        });
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
        if !self.order.contains(id) {
            return;
        }
        self.mark(id, dirty::STYLE);
        let old = self.last_painted(id);
        self.invalidate(Some(id.index()), InvalidateKind::Style, |dirty| {
            if let Some(old) = old {
                dirty.extend(old, 0.0);
            }
            dirty.extend_shape(shape);
        });
    }

    fn notify_geometry_changed(
        &mut self,
        shapes: &ShapeStore,
        id: ShapeId,
        _targets: &mut dyn TargetIndex,
    ) {
        let Some(shape) = shapes.get(id) else {
            return;
        };
        if !self.order.contains(id) {
            return;
        }
        self.mark(id, dirty::GEOMETRY);
        let old = self.last_painted(id);
        self.invalidate(Some(id.index()), InvalidateKind::Geometry, |dirty| {
            if let Some(old) = old {
                dirty.extend(old, 0.0);
            }
            dirty.extend_shape(shape);
        });
    }

    fn layers_at(&self, shapes: &ShapeStore, point: Point) -> Vec<ShapeId> {
        self.order
            .layers_at(shapes, point, self.pointer.tolerance())
    }
}

/// Area a shape's pixels can cover: stroke half-width around paths, the icon
/// rectangle for markers.
fn paint_bounds(shape: &Shape) -> Option<Rect> {
    let bounds = shape.bounds()?;
    Some(match shape.geometry() {
        Geometry::Marker { .. } => bounds,
        Geometry::Path { .. } => {
            let half = shape.style.weight / 2.0;
            bounds.inflate(half, half)
        }
    })
}

/// Area to invalidate when a painted shape later changes or goes away.
fn dirty_bounds(shape: &Shape, footprint: Rect) -> Rect {
    shape.bounds().map_or(footprint, |bounds| {
        let pad = shape.style.redraw_padding();
        bounds.inflate(pad, pad)
    })
}

fn set_painted(painted: &mut Vec<Option<Rect>>, id: ShapeId, bounds: Option<Rect>) {
    let slot = id.index() as usize;
    if painted.len() <= slot {
        if bounds.is_none() {
            return;
        }
        painted.resize(slot + 1, None);
    }
    painted[slot] = bounds;
}

fn drain(changes: &mut DirtyTracker<u32>, channel: Channel) -> Vec<u32> {
    changes.drain(channel).deterministic().run().collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;
    use tilepaint_core::backend::NoTargets;
    use tilepaint_core::pointer::{PointerKind, View};
    use tilepaint_core::shape::Icon;

    use super::*;
    use crate::testing::{ManualFrames, Op, RecordingCanvas, RecordingSink};

    type Service = CanvasRenderService<RecordingCanvas, ManualFrames>;

    struct OriginView;

    impl View for OriginView {
        fn pixel_origin(&self) -> Point {
            Point::ZERO
        }
    }

    fn square(x0: f64, y0: f64, side: f64) -> Shape {
        Shape::polygon(vec![vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ]])
    }

    fn service() -> Service {
        CanvasRenderService::new(
            RecordingCanvas::new(Size::new(256.0, 256.0)),
            ManualFrames::default(),
            Vec2::ZERO,
            ServiceConfig::new(),
        )
    }

    /// Attached service with S1 (bottom) and S2 (top) overlapping, after the
    /// initial full repaint.
    fn settled() -> (ShapeStore, Service, ShapeId, ShapeId) {
        let mut shapes = ShapeStore::new();
        let s1 = shapes.insert(square(10.0, 10.0, 100.0));
        let s2 = shapes.insert(square(60.0, 60.0, 100.0));
        let mut svc = service();
        svc.attach(&shapes, &mut NoTargets);
        svc.register(&shapes, s1, &mut NoTargets);
        svc.register(&shapes, s2, &mut NoTargets);
        let report = svc.run_frame(&shapes, HostTime(0));
        assert_eq!(report.damage, Damage::Full);
        assert_eq!(report.painted, vec![s1, s2]);
        svc.canvas_mut().ops.clear();
        (shapes, svc, s1, s2)
    }

    #[test]
    fn new_interactive_service_enables_pointer_events() {
        assert!(service().canvas().pointer_events);
        let passive = CanvasRenderService::new(
            RecordingCanvas::new(Size::new(256.0, 256.0)),
            ManualFrames::default(),
            Vec2::ZERO,
            ServiceConfig::passive(),
        );
        assert!(!passive.canvas().pointer_events);
    }

    #[test]
    fn attach_forces_full_repaint() {
        let shapes = ShapeStore::new();
        let mut svc = service();
        assert!(!svc.is_frame_pending());
        svc.attach(&shapes, &mut NoTargets);
        assert!(svc.is_frame_pending());
        let report = svc.run_frame(&shapes, HostTime(0));
        assert_eq!(report.damage, Damage::Full);
        let full = Rect::new(0.0, 0.0, 256.0, 256.0);
        assert_eq!(
            svc.canvas().ops,
            vec![Op::Save, Op::Clip(full), Op::Clear(full), Op::Restore]
        );
    }

    #[test]
    fn invalidations_coalesce_into_one_frame() {
        let (mut shapes, mut svc, s1, s2) = settled();

        shapes.get_mut(s1).unwrap().style.opacity = 0.5;
        svc.notify_style_changed(&shapes, s1, &mut NoTargets);
        shapes.get_mut(s2).unwrap().set_parts(vec![vec![
            Point::new(150.0, 150.0),
            Point::new(170.0, 150.0),
            Point::new(170.0, 170.0),
        ]]);
        svc.notify_geometry_changed(&shapes, s2, &mut NoTargets);
        svc.notify_style_changed(&shapes, s1, &mut NoTargets);

        assert_eq!(svc.frames().requested, 2, "initial frame plus one");

        let report = svc.run_frame(&shapes, HostTime(16));
        assert!(!report.is_noop());
        assert_eq!(report.style, vec![s1.index()]);
        assert_eq!(report.geometry, vec![s2.index()]);
        assert_eq!(report.painted, vec![s1, s2], "S1 then S2, in paint order");

        // Second frame with nothing pending.
        let again = svc.run_frame(&shapes, HostTime(32));
        assert!(again.is_noop());
        assert!(again.painted.is_empty());
    }

    #[test]
    fn damage_is_the_rounded_union_of_padded_bounds() {
        let mut shapes = ShapeStore::new();
        let a = shapes.insert(Shape::polyline(vec![vec![
            Point::new(10.5, 10.5),
            Point::new(20.5, 10.5),
        ]]));
        let b = shapes.insert(Shape::polyline(vec![vec![
            Point::new(40.2, 30.0),
            Point::new(50.0, 35.7),
        ]]));
        let mut svc = service();
        svc.register(&shapes, a, &mut NoTargets);
        svc.register(&shapes, b, &mut NoTargets);
        // Registered while detached: nothing pending until attach.
        assert!(!svc.is_frame_pending());

        svc.attach(&shapes, &mut NoTargets);
        svc.run_frame(&shapes, HostTime(0));

        svc.notify_style_changed(&shapes, a, &mut NoTargets);
        svc.notify_style_changed(&shapes, b, &mut NoTargets);
        let report = svc.run_frame(&shapes, HostTime(16));
        // Weight 3 pads by 4: (6.5, 6.5)..(54, 39.7), rounded outward.
        assert_eq!(report.damage, Damage::Rect(Rect::new(6.0, 6.0, 54.0, 40.0)));
    }

    #[test]
    fn shapes_outside_damage_are_untouched() {
        let mut shapes = ShapeStore::new();
        let near = shapes.insert(square(0.0, 0.0, 20.0));
        let far = shapes.insert(square(200.0, 200.0, 20.0));
        let mut svc = service();
        svc.attach(&shapes, &mut NoTargets);
        svc.register(&shapes, near, &mut NoTargets);
        svc.register(&shapes, far, &mut NoTargets);
        svc.run_frame(&shapes, HostTime(0));
        svc.canvas_mut().ops.clear();

        svc.notify_style_changed(&shapes, near, &mut NoTargets);
        let report = svc.run_frame(&shapes, HostTime(16));
        assert_eq!(report.painted, vec![near]);
        assert_eq!(
            svc.canvas().drawn_bounds(),
            vec![Rect::new(0.0, 0.0, 20.0, 20.0)],
            "far shape not redrawn"
        );
        assert!(matches!(svc.canvas().ops[1], Op::Clip(_)), "clip precedes clear");
        assert!(matches!(svc.canvas().ops[2], Op::Clear(_)));
    }

    #[test]
    fn geometry_change_clears_old_footprint() {
        let mut shapes = ShapeStore::new();
        let id = shapes.insert(square(0.0, 0.0, 20.0));
        let mut svc = service();
        svc.attach(&shapes, &mut NoTargets);
        svc.register(&shapes, id, &mut NoTargets);
        svc.run_frame(&shapes, HostTime(0));

        shapes.get_mut(id).unwrap().set_parts(vec![vec![
            Point::new(100.0, 100.0),
            Point::new(120.0, 100.0),
            Point::new(120.0, 120.0),
        ]]);
        svc.notify_geometry_changed(&shapes, id, &mut NoTargets);
        let report = svc.run_frame(&shapes, HostTime(16));
        assert_eq!(report.damage, Damage::Rect(Rect::new(-4.0, -4.0, 124.0, 124.0)));
    }

    #[test]
    fn removal_repaints_last_painted_area() {
        let (shapes, mut svc, s1, s2) = settled();
        assert!(svc.remove(&shapes, s2, &mut NoTargets));
        assert!(!svc.remove(&shapes, s2, &mut NoTargets));
        let report = svc.run_frame(&shapes, HostTime(16));
        assert_eq!(report.damage, Damage::Rect(Rect::new(56.0, 56.0, 164.0, 164.0)));
        assert_eq!(report.painted, vec![s1]);
        assert_eq!(report.topology, vec![s2.index()]);
    }

    #[test]
    fn detach_cancels_pending_frame_and_skips_invalidations() {
        let (shapes, mut svc, s1, _) = settled();
        svc.notify_style_changed(&shapes, s1, &mut NoTargets);
        assert!(svc.is_frame_pending());
        svc.detach(&mut NoTargets);
        assert_eq!(svc.frames().cancelled, vec![2]);
        assert!(!svc.is_frame_pending());

        svc.notify_style_changed(&shapes, s1, &mut NoTargets);
        assert!(!svc.is_frame_pending(), "detached invalidation skipped");
        assert!(svc.run_frame(&shapes, HostTime(16)).is_noop(), "stale callback");
    }

    #[test]
    fn resize_schedules_full_repaint() {
        let (shapes, mut svc, s1, s2) = settled();
        svc.set_size(Size::new(512.0, 512.0));
        let report = svc.run_frame(&shapes, HostTime(16));
        assert_eq!(report.damage, Damage::Full);
        assert_eq!(report.painted, vec![s1, s2]);
        assert_eq!(svc.canvas().ops[1], Op::Clip(Rect::new(0.0, 0.0, 512.0, 512.0)));
    }

    #[test]
    fn stale_ids_are_skipped() {
        let (mut shapes, mut svc, s1, s2) = settled();
        shapes.remove(s1);
        svc.notify_style_changed(&shapes, s1, &mut NoTargets);
        svc.notify_geometry_changed(&shapes, s2, &mut NoTargets);
        let report = svc.run_frame(&shapes, HostTime(16));
        assert_eq!(report.painted, vec![s2]);

        let mut other = ShapeStore::new();
        let unknown = other.insert(square(0.0, 0.0, 1.0));
        other.remove(unknown);
        assert!(!svc.register(&other, unknown, &mut NoTargets));
    }

    #[test]
    fn icons_draw_only_during_repaint_and_defer_until_loaded() {
        let mut shapes = ShapeStore::new();
        let pin = shapes.insert(Shape::marker(
            Point::new(50.0, 50.0),
            Icon::new("pin.png", Size::new(20.0, 20.0)),
        ));
        let mut svc = service();
        svc.attach(&shapes, &mut NoTargets);
        svc.register(&shapes, pin, &mut NoTargets);
        assert!(!svc.is_drawing());
        assert!(svc.canvas().ops.is_empty(), "nothing drawn before the frame");

        let report = svc.run_frame(&shapes, HostTime(0));
        assert_eq!(report.painted, vec![pin]);
        assert!(svc.canvas().ops.contains(&Op::DrawWhenLoaded(
            "pin.png".into(),
            Point::new(40.0, 40.0),
            Size::new(20.0, 20.0)
        )));
    }

    #[test]
    fn scenario_hover_and_removal_of_hovered_shape() {
        let (shapes, mut svc, s1, s2) = settled();
        let mut sink = RecordingSink::default();
        let event = PointerEvent::new(PointerKind::Move, Point::new(80.0, 80.0), HostTime(0));
        let outcome = svc.handle_pointer(&shapes, &OriginView, &mut sink, event);
        assert_eq!(outcome.entered, Some(s2));
        assert_eq!(svc.hovered(), Some(s2));
        assert_eq!(
            sink.fired,
            vec![(PointerKind::Enter, s2), (PointerKind::Move, s2)]
        );
        assert_eq!(svc.layers_at(&shapes, Point::new(80.0, 80.0)), vec![s1, s2]);

        assert!(sink.cursor);

        svc.remove(&shapes, s2, &mut NoTargets);
        assert_eq!(svc.hovered(), None, "removal clears hover silently");
        assert_eq!(sink.fired.len(), 2);

        // Past the move throttle, into empty space.
        let event = PointerEvent::new(PointerKind::Move, Point::new(250.0, 5.0), HostTime(1_000_000));
        svc.handle_pointer(&shapes, &OriginView, &mut sink, event);
        assert!(!sink.cursor, "cursor follows hover after removal");
        assert_eq!(sink.fired.len(), 2, "no leave for a removed shape");
    }

    #[test]
    fn reused_slot_repaints_stale_footprint() {
        let (mut shapes, mut svc, s1, s2) = settled();
        // Dropped from the store without being removed from the service.
        shapes.remove(s2);
        let fresh = shapes.insert(square(200.0, 200.0, 10.0));
        assert_eq!(fresh.index(), s2.index());

        assert!(svc.register(&shapes, fresh, &mut NoTargets));
        assert_eq!(svc.order().len(), 2);
        let report = svc.run_frame(&shapes, HostTime(32));
        assert_eq!(report.damage, Damage::Rect(Rect::new(56.0, 56.0, 214.0, 214.0)));
        assert_eq!(report.painted, vec![s1, fresh]);
    }

    #[test]
    fn pointer_ignored_while_detached() {
        let (shapes, mut svc, _, _) = settled();
        svc.detach(&mut NoTargets);
        let mut sink = RecordingSink::default();
        let event = PointerEvent::new(PointerKind::Click, Point::new(80.0, 80.0), HostTime(0));
        let outcome = svc.handle_pointer(&shapes, &OriginView, &mut sink, event);
        assert_eq!(outcome, DispatchOutcome::default());
        assert!(sink.fired.is_empty());
    }
}
