// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame requester.
//!
//! [`RafFrames`] registers one long-lived JS closure and hands it to
//! `requestAnimationFrame` whenever a canvas service asks for a frame. The
//! callback receives a [`DOMHighResTimeStamp`][mdn] in milliseconds, which
//! is converted to microsecond [`HostTime`] ticks before it reaches the host.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;

use tilepaint_core::frame::FrameRequester;
use tilepaint_core::time::HostTime;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so no
// Window/Performance lookup happens per frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// A [`FrameRequester`] backed by `requestAnimationFrame`.
///
/// `on_frame` runs once per fired request. It is where the host calls the
/// canvas service's `run_frame`; since the service owns this requester, the
/// callback should reach the service through a weak handle to avoid a
/// reference cycle.
///
/// Dropping the requester cancels the last outstanding request.
pub struct RafFrames {
    closure: RafClosure,
    last: Option<i32>,
}

impl core::fmt::Debug for RafFrames {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafFrames")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl RafFrames {
    /// Creates a requester that calls `on_frame` with the frame time.
    pub fn new(mut on_frame: impl FnMut(HostTime) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            on_frame(ms_to_host_time(timestamp_ms));
        }) as Box<dyn FnMut(f64)>);
        Self {
            closure,
            last: None,
        }
    }
}

impl FrameRequester for RafFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> i32 {
        let id = request_animation_frame(self.closure.as_ref().unchecked_ref());
        self.last = Some(id);
        id
    }

    fn cancel_frame(&mut self, handle: i32) {
        cancel_animation_frame(handle);
        if self.last == Some(handle) {
            self.last = None;
        }
    }
}

impl Drop for RafFrames {
    fn drop(&mut self) {
        // The closure is freed with `self`; a callback still queued would
        // call into freed memory.
        if let Some(id) = self.last.take() {
            cancel_animation_frame(id);
        }
    }
}

/// Converts a `DOMHighResTimeStamp` (ms) to microsecond ticks.
pub(crate) fn ms_to_host_time(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "timestamps are small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_become_microseconds() {
        assert_eq!(ms_to_host_time(16.5), HostTime(16_500));
        assert_eq!(ms_to_host_time(0.0), HostTime(0));
        assert_eq!(ms_to_host_time(-3.0), HostTime(0), "negative clamps to zero");
    }
}
