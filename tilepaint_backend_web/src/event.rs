// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM mouse event conversion.

use kurbo::{Point, Vec2};
use tilepaint_core::pointer::{PointerEvent, PointerKind};
use tilepaint_core::time::HostTime;
use web_sys::{Element, MouseEvent};

/// Surface event types a canvas tile listens for.
pub const SURFACE_EVENTS: [&str; 7] = [
    "mousemove",
    "mouseout",
    "click",
    "dblclick",
    "mousedown",
    "mouseup",
    "contextmenu",
];

/// Maps a DOM event type to the pointer kind it is forwarded as.
///
/// `mouseover` is not forwarded: hover begins with the first move.
#[must_use]
pub fn pointer_kind(event_type: &str) -> Option<PointerKind> {
    Some(match event_type {
        "mousemove" => PointerKind::Move,
        "mouseout" => PointerKind::Leave,
        "click" => PointerKind::Click,
        "dblclick" => PointerKind::DoubleClick,
        "mousedown" => PointerKind::Down,
        "mouseup" => PointerKind::Up,
        "contextmenu" => PointerKind::ContextMenu,
        _ => return None,
    })
}

/// Position of `event` relative to the padding box of `container`.
#[must_use]
pub fn container_point(event: &MouseEvent, container: &Element) -> Point {
    let rect = container.get_bounding_client_rect();
    Point::new(
        f64::from(event.client_x()) - rect.left() - f64::from(container.client_left()),
        f64::from(event.client_y()) - rect.top() - f64::from(container.client_top()),
    )
}

/// Converts a DOM mouse event into a [`PointerEvent`] in layer pixel space.
///
/// `container` is the map container and `pane_offset` the current position
/// of the layer pane inside it. Returns `None` for event types that are not
/// forwarded.
#[must_use]
pub fn pointer_event(
    event: &MouseEvent,
    container: &Element,
    pane_offset: Vec2,
    time: HostTime,
) -> Option<PointerEvent> {
    let kind = pointer_kind(&event.type_())?;
    let position = container_point(event, container) - pane_offset;
    Some(PointerEvent::new(kind, position, time))
}
