// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit testing and dispatch.
//!
//! Hosts forward raw pointer events in view (layer) pixel space. The
//! [`PointerDispatcher`] maps them into surface-local space, hit tests against
//! the paint order and delivers them to shapes through an [`EventSink`]:
//!
//! - **Moves** are throttled ([`Throttle`]), suppressed while the [`View`] is
//!   panning or zoom-animating, and drive the [`HoverState`] machine: a leave
//!   for the previous target, an enter for the new one, then a plain move to
//!   whichever shape is hovered.
//! - **Surface leave** ends hover.
//! - **Clicks, presses, releases and context menus** go to the topmost hit
//!   that the host is not currently drag-moving; the event's default action
//!   is suppressed when a shape takes it.

use kurbo::{Point, Vec2};

use crate::config::ServiceConfig;
use crate::hover::HoverState;
use crate::order::ShapeOrder;
use crate::shape::{ShapeId, ShapeStore};
use crate::time::{Duration, HostTime};
use crate::trace::{DispatchEvent, HoverEvent, Tracer};

/// Kind of a pointer event, incoming or as delivered to a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer entered a shape (delivered only).
    Enter,
    /// Pointer left a shape, or left the surface.
    Leave,
    /// Pointer moved.
    Move,
    /// Primary click.
    Click,
    /// Double click.
    DoubleClick,
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Context-menu request.
    ContextMenu,
}

impl PointerKind {
    /// DOM event type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "mouseover",
            Self::Leave => "mouseout",
            Self::Move => "mousemove",
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::Down => "mousedown",
            Self::Up => "mouseup",
            Self::ContextMenu => "contextmenu",
        }
    }

    /// Kinds dispatched to the topmost hit only.
    #[must_use]
    pub const fn is_click_like(self) -> bool {
        matches!(
            self,
            Self::Click | Self::DoubleClick | Self::Down | Self::Up | Self::ContextMenu
        )
    }
}

/// A raw pointer event as forwarded by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Position in view (layer) pixel space.
    pub position: Point,
    /// When it happened.
    pub time: HostTime,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point, time: HostTime) -> Self {
        Self {
            kind,
            position,
            time,
        }
    }
}

/// The host's current view of the map.
pub trait View {
    /// Pixel origin of the view; surface offsets are relative to it.
    fn pixel_origin(&self) -> Point;

    /// Whether the view is being dragged.
    fn is_panning(&self) -> bool {
        false
    }

    /// Whether a zoom animation is running.
    fn is_zoom_animating(&self) -> bool {
        false
    }

    /// Whether the host is currently drag-moving `shape`.
    fn is_drag_moved(&self, shape: ShapeId) -> bool {
        _ = shape;
        false
    }
}

/// Receives events for shapes.
pub trait EventSink {
    /// Delivers `event` to `target` as `kind`.
    fn fire(&mut self, target: ShapeId, kind: PointerKind, event: &PointerEvent);

    /// Suppresses the raw event's default action and propagation.
    fn stop_default(&mut self, event: &PointerEvent) {
        _ = event;
    }

    /// Turns the surface's interactive cursor on or off.
    fn set_interactive_cursor(&mut self, on: bool) {
        _ = on;
    }
}

/// Leading plus trailing rate limiter for pointer moves.
///
/// The first move is delivered at once and opens an interval. Moves inside the
/// interval replace each other; the last one is delivered by [`Throttle::poll`]
/// once the interval has elapsed, which opens the next interval.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    interval: Duration,
    ready_at: Option<HostTime>,
    pending: Option<PointerEvent>,
}

impl Throttle {
    /// Creates a throttle with the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            ready_at: None,
            pending: None,
        }
    }

    /// Offers an event, returning it if it may be delivered now.
    pub fn offer(&mut self, event: PointerEvent) -> Option<PointerEvent> {
        match self.ready_at {
            Some(ready) if event.time < ready => {
                self.pending = Some(event);
                None
            }
            _ => {
                self.ready_at = Some(event.time.saturating_add(self.interval));
                Some(event)
            }
        }
    }

    /// Releases the deferred event if its interval has elapsed at `now`.
    pub fn poll(&mut self, now: HostTime) -> Option<PointerEvent> {
        let ready = self.ready_at?;
        if now < ready {
            return None;
        }
        match self.pending.take() {
            Some(event) => {
                self.ready_at = Some(now.saturating_add(self.interval));
                Some(event)
            }
            None => {
                self.ready_at = None;
                None
            }
        }
    }

    /// When [`poll`](Self::poll) will release the deferred event, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<HostTime> {
        self.pending.and(self.ready_at)
    }

    /// Drops any deferred event and closes the interval.
    pub fn reset(&mut self) {
        self.ready_at = None;
        self.pending = None;
    }
}

/// What a dispatched pointer event reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Shape that lost hover.
    pub left: Option<ShapeId>,
    /// Shape that gained hover.
    pub entered: Option<ShapeId>,
    /// Shape that received the event itself.
    pub target: Option<ShapeId>,
}

/// Per-surface pointer state: hover, move throttle and surface offset.
#[derive(Clone, Copy, Debug)]
pub struct PointerDispatcher {
    hover: HoverState,
    throttle: Throttle,
    offset: Vec2,
    tolerance: f64,
    interactive: bool,
    cursor_on: bool,
}

impl PointerDispatcher {
    /// Creates a dispatcher for a surface whose origin sits at `offset` in
    /// map pixel space.
    #[must_use]
    pub fn new(offset: Vec2, config: &ServiceConfig) -> Self {
        Self {
            hover: HoverState::new(),
            throttle: Throttle::new(config.move_throttle),
            offset,
            tolerance: config.tolerance,
            interactive: config.interactive,
            cursor_on: false,
        }
    }

    /// The hovered shape.
    #[must_use]
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hover.current()
    }

    /// Surface origin in map pixel space.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Hit-test slack beyond the stroke half-width.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maps a view-space position into surface-local pixels.
    #[must_use]
    pub fn to_local(&self, view: &dyn View, position: Point) -> Point {
        position - (self.offset - view.pixel_origin().to_vec2())
    }

    /// When a throttled move is due, for hosts that arm a timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.throttle.deadline()
    }

    /// Handles one raw pointer event.
    pub fn handle(
        &mut self,
        order: &ShapeOrder,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        event: PointerEvent,
        tracer: &mut Tracer<'_>,
    ) -> DispatchOutcome {
        if !self.interactive {
            return DispatchOutcome::default();
        }
        match event.kind {
            PointerKind::Move => match self.throttle.offer(event) {
                Some(event) => self.hover_move(order, shapes, view, sink, &event, tracer),
                None => DispatchOutcome::default(),
            },
            PointerKind::Leave => {
                self.throttle.reset();
                DispatchOutcome {
                    left: self.leave(sink, &event, tracer),
                    ..DispatchOutcome::default()
                }
            }
            PointerKind::Enter => DispatchOutcome::default(),
            _ => self.click(order, shapes, view, sink, &event, tracer),
        }
    }

    /// Delivers a throttled move whose interval has elapsed at `now`.
    pub fn flush(
        &mut self,
        order: &ShapeOrder,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> DispatchOutcome {
        match self.throttle.poll(now) {
            Some(event) => self.hover_move(order, shapes, view, sink, &event, tracer),
            None => DispatchOutcome::default(),
        }
    }

    /// Forgets `id` if it is hovered, without dispatching anything.
    ///
    /// The interactive cursor is switched off by the next move or surface
    /// leave.
    pub fn forget(&mut self, id: ShapeId) -> bool {
        self.hover.forget(id)
    }

    /// Drops hover and any deferred move, without dispatching anything.
    pub fn reset(&mut self) {
        self.hover.clear();
        self.throttle.reset();
    }

    fn hover_move(
        &mut self,
        order: &ShapeOrder,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        event: &PointerEvent,
        tracer: &mut Tracer<'_>,
    ) -> DispatchOutcome {
        if view.is_panning() || view.is_zoom_animating() {
            return DispatchOutcome::default();
        }
        let point = self.to_local(view, event.position);
        let candidate = order.topmost_at(shapes, point, self.tolerance);

        let transition = self.hover.update(candidate);
        if let Some(id) = transition.leave {
            self.fire_hover(sink, id, false, event, tracer);
        }
        if let Some(id) = transition.enter {
            self.fire_hover(sink, id, true, event, tracer);
        }
        self.sync_cursor(sink);

        let target = self.hover.current();
        if let Some(id) = target {
            fire(sink, id, PointerKind::Move, event, tracer);
        }
        DispatchOutcome {
            left: transition.leave,
            entered: transition.enter,
            target,
        }
    }

    fn leave(
        &mut self,
        sink: &mut dyn EventSink,
        event: &PointerEvent,
        tracer: &mut Tracer<'_>,
    ) -> Option<ShapeId> {
        let left = self.hover.clear();
        if let Some(id) = left {
            self.fire_hover(sink, id, false, event, tracer);
        }
        self.sync_cursor(sink);
        left
    }

    fn fire_hover(
        &self,
        sink: &mut dyn EventSink,
        id: ShapeId,
        entered: bool,
        event: &PointerEvent,
        tracer: &mut Tracer<'_>,
    ) {
        let kind = if entered {
            PointerKind::Enter
        } else {
            PointerKind::Leave
        };
        fire(sink, id, kind, event, tracer);
        tracer.hover(&HoverEvent {
            shape_index: id.index(),
            entered,
            timestamp: event.time,
        });
    }

    /// Shows the interactive cursor exactly while a shape is hovered.
    fn sync_cursor(&mut self, sink: &mut dyn EventSink) {
        let on = self.hover.current().is_some();
        if on != self.cursor_on {
            sink.set_interactive_cursor(on);
            self.cursor_on = on;
        }
    }

    fn click(
        &mut self,
        order: &ShapeOrder,
        shapes: &ShapeStore,
        view: &dyn View,
        sink: &mut dyn EventSink,
        event: &PointerEvent,
        tracer: &mut Tracer<'_>,
    ) -> DispatchOutcome {
        let point = self.to_local(view, event.position);
        let target = order
            .hits(shapes, point, self.tolerance)
            .filter(|&id| !view.is_drag_moved(id))
            .last();
        if let Some(id) = target {
            sink.stop_default(event);
            fire(sink, id, event.kind, event, tracer);
        }
        DispatchOutcome {
            target,
            ..DispatchOutcome::default()
        }
    }
}

fn fire(
    sink: &mut dyn EventSink,
    id: ShapeId,
    kind: PointerKind,
    event: &PointerEvent,
    tracer: &mut Tracer<'_>,
) {
    sink.fire(id, kind, event);
    tracer.dispatch(&DispatchEvent {
        shape_index: id.index(),
        kind,
        timestamp: event.time,
    });
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::shape::Shape;

    #[derive(Default)]
    struct FakeView {
        origin: Point,
        panning: bool,
        dragging: Option<ShapeId>,
    }

    impl View for FakeView {
        fn pixel_origin(&self) -> Point {
            self.origin
        }

        fn is_panning(&self) -> bool {
            self.panning
        }

        fn is_drag_moved(&self, shape: ShapeId) -> bool {
            self.dragging == Some(shape)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        fired: Vec<(PointerKind, ShapeId)>,
        stopped: usize,
        cursor: bool,
    }

    impl EventSink for RecordingSink {
        fn fire(&mut self, target: ShapeId, kind: PointerKind, _event: &PointerEvent) {
            self.fired.push((kind, target));
        }

        fn stop_default(&mut self, _event: &PointerEvent) {
            self.stopped += 1;
        }

        fn set_interactive_cursor(&mut self, on: bool) {
            self.cursor = on;
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

    struct Fixture {
        shapes: ShapeStore,
        order: ShapeOrder,
        s1: ShapeId,
        s2: ShapeId,
        dispatcher: PointerDispatcher,
        view: FakeView,
        sink: RecordingSink,
    }

    impl Fixture {
        /// S1 (bottom) and S2 (top) overlapping in 50..100.
        fn new() -> Self {
            let mut shapes = ShapeStore::new();
            let s1 = shapes.insert(square(0.0, 0.0, 100.0));
            let s2 = shapes.insert(square(50.0, 50.0, 100.0));
            let mut order = ShapeOrder::new();
            order.register(s1);
            order.register(s2);
            Self {
                shapes,
                order,
                s1,
                s2,
                dispatcher: PointerDispatcher::new(Vec2::ZERO, &ServiceConfig::new()),
                view: FakeView::default(),
                sink: RecordingSink::default(),
            }
        }

        fn send(&mut self, kind: PointerKind, x: f64, y: f64, t: u64) -> DispatchOutcome {
            self.dispatcher.handle(
                &self.order,
                &self.shapes,
                &self.view,
                &mut self.sink,
                PointerEvent::new(kind, Point::new(x, y), HostTime(t)),
                &mut Tracer::none(),
            )
        }
    }

    #[test]
    fn move_into_overlap_hovers_topmost() {
        let mut f = Fixture::new();
        let outcome = f.send(PointerKind::Move, 75.0, 75.0, 0);
        assert_eq!(outcome.entered, Some(f.s2));
        assert_eq!(f.dispatcher.hovered(), Some(f.s2));
        assert_eq!(
            f.sink.fired,
            vec![(PointerKind::Enter, f.s2), (PointerKind::Move, f.s2)]
        );
        assert!(f.sink.cursor, "cursor follows hover");
    }

    #[test]
    fn switching_target_leaves_before_entering() {
        let mut f = Fixture::new();
        f.send(PointerKind::Move, 75.0, 75.0, 0);
        f.sink.fired.clear();
        // Past the throttle interval.
        f.send(PointerKind::Move, 10.0, 10.0, 1_000_000_000);
        assert_eq!(
            f.sink.fired,
            vec![
                (PointerKind::Leave, f.s2),
                (PointerKind::Enter, f.s1),
                (PointerKind::Move, f.s1)
            ]
        );
    }

    #[test]
    fn surface_leave_ends_hover() {
        let mut f = Fixture::new();
        f.send(PointerKind::Move, 10.0, 10.0, 0);
        f.sink.fired.clear();
        let outcome = f.send(PointerKind::Leave, 10.0, 10.0, 5);
        assert_eq!(outcome.left, Some(f.s1));
        assert_eq!(f.sink.fired, vec![(PointerKind::Leave, f.s1)]);
        assert!(!f.sink.cursor);
        assert_eq!(f.dispatcher.hovered(), None);
        // A second leave has nothing to end.
        assert_eq!(f.send(PointerKind::Leave, 0.0, 0.0, 6), DispatchOutcome::default());
    }

    #[test]
    fn forgotten_hover_turns_cursor_off_on_next_move_or_leave() {
        let mut f = Fixture::new();
        f.send(PointerKind::Move, 140.0, 140.0, 0);
        assert!(f.sink.cursor);
        assert!(f.dispatcher.forget(f.s2));
        f.sink.fired.clear();

        f.send(PointerKind::Move, 250.0, 5.0, 1_000_000_000);
        assert!(!f.sink.cursor, "nothing hovered after the move");
        assert!(f.sink.fired.is_empty(), "no leave for a forgotten shape");

        f.send(PointerKind::Move, 140.0, 140.0, 2_000_000_000);
        assert!(f.dispatcher.forget(f.s2));
        f.send(PointerKind::Leave, 140.0, 140.0, 2_000_000_001);
        assert!(!f.sink.cursor, "surface leave resets the cursor");
    }

    #[test]
    fn moves_are_suppressed_while_panning() {
        let mut f = Fixture::new();
        f.view.panning = true;
        f.send(PointerKind::Move, 10.0, 10.0, 0);
        assert!(f.sink.fired.is_empty());
        assert_eq!(f.dispatcher.hovered(), None);
    }

    #[test]
    fn click_goes_to_topmost_only_and_stops_default() {
        let mut f = Fixture::new();
        let outcome = f.send(PointerKind::Click, 75.0, 75.0, 0);
        assert_eq!(outcome.target, Some(f.s2));
        assert_eq!(f.sink.fired, vec![(PointerKind::Click, f.s2)]);
        assert_eq!(f.sink.stopped, 1);
    }

    #[test]
    fn click_skips_drag_moved_shape() {
        let mut f = Fixture::new();
        f.view.dragging = Some(f.s2);
        let outcome = f.send(PointerKind::Click, 75.0, 75.0, 0);
        assert_eq!(outcome.target, Some(f.s1), "S1 covers the point");

        f.sink = RecordingSink::default();
        let outcome = f.send(PointerKind::Click, 140.0, 140.0, 1);
        assert_eq!(outcome.target, None, "only S2 covers the point");
        assert!(f.sink.fired.is_empty());
        assert_eq!(f.sink.stopped, 0);
    }

    #[test]
    fn offset_maps_view_space_into_surface_space() {
        let mut f = Fixture::new();
        // Surface at (256, 0) in map pixels; view origin at (200, -10).
        f.dispatcher = PointerDispatcher::new(Vec2::new(256.0, 0.0), &ServiceConfig::new());
        f.view.origin = Point::new(200.0, -10.0);
        let local = f.dispatcher.to_local(&f.view, Point::new(66.0, 0.0));
        assert_eq!(local, Point::new(10.0, -10.0));
        let outcome = f.send(PointerKind::Click, 66.0, 20.0, 0);
        assert_eq!(outcome.target, Some(f.s1));
    }

    #[test]
    fn non_interactive_service_ignores_pointer() {
        let mut f = Fixture::new();
        let config = ServiceConfig {
            interactive: false,
            ..ServiceConfig::new()
        };
        f.dispatcher = PointerDispatcher::new(Vec2::ZERO, &config);
        assert_eq!(f.send(PointerKind::Click, 10.0, 10.0, 0), DispatchOutcome::default());
        assert!(f.sink.fired.is_empty());
    }

    #[test]
    fn throttle_delivers_leading_then_trailing() {
        let mut throttle = Throttle::new(Duration(32));
        let at = |t| PointerEvent::new(PointerKind::Move, Point::new(t as f64, 0.0), HostTime(t));

        assert_eq!(throttle.offer(at(0)), Some(at(0)));
        assert_eq!(throttle.offer(at(10)), None);
        assert_eq!(throttle.offer(at(20)), None);
        assert_eq!(throttle.deadline(), Some(HostTime(32)));
        assert_eq!(throttle.poll(HostTime(31)), None);
        assert_eq!(throttle.poll(HostTime(32)), Some(at(20)), "last deferred move wins");
        assert_eq!(throttle.deadline(), None);
        // Interval reopened at 32.
        assert_eq!(throttle.offer(at(40)), None);
        assert_eq!(throttle.poll(HostTime(64)), Some(at(40)));
        assert_eq!(throttle.poll(HostTime(100)), None);
        assert_eq!(throttle.offer(at(101)), Some(at(101)));
    }

    #[test]
    fn flush_delivers_deferred_move() {
        let mut f = Fixture::new();
        f.send(PointerKind::Move, 10.0, 10.0, 0);
        f.send(PointerKind::Move, 75.0, 75.0, 1);
        assert_eq!(f.dispatcher.hovered(), Some(f.s1), "second move deferred");
        let deadline = f.dispatcher.next_deadline().expect("deferred move");
        let outcome = f.dispatcher.flush(
            &f.order,
            &f.shapes,
            &f.view,
            &mut f.sink,
            deadline,
            &mut Tracer::none(),
        );
        assert_eq!(outcome.entered, Some(f.s2));
    }
}
