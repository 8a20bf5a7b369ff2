// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Next-frame scheduling.
//!
//! Hosts provide a [`FrameRequester`] (on the web, `requestAnimationFrame` and
//! `cancelAnimationFrame`). Render services keep one [`PendingFrame`] per
//! surface, which holds at most one outstanding request handle: a second
//! request while one is pending is coalesced into it.
//!
//! The requester only schedules. When the frame fires, the host calls the
//! service's frame entry point, which in turn calls [`PendingFrame::fired`].

/// Schedules a callback for the next animation frame.
pub trait FrameRequester {
    /// Token identifying one scheduled callback.
    type Handle;

    /// Schedules the next-frame callback and returns its handle.
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancels a callback that has not fired yet.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// At most one pending next-frame request.
#[derive(Debug)]
pub struct PendingFrame<H> {
    handle: Option<H>,
}

impl<H> Default for PendingFrame<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PendingFrame<H> {
    /// Creates an idle token.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Whether a frame has been requested and not yet fired or cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Requests a frame unless one is already pending.
    ///
    /// Returns `true` if a new request was issued, `false` if it was
    /// coalesced into the pending one.
    pub fn request<F>(&mut self, frames: &mut F) -> bool
    where
        F: FrameRequester<Handle = H> + ?Sized,
    {
        if self.handle.is_some() {
            return false;
        }
        self.handle = Some(frames.request_frame());
        true
    }

    /// Marks the pending frame as fired, returning to idle.
    ///
    /// Returns `false` if nothing was pending (a stale or spurious callback).
    pub fn fired(&mut self) -> bool {
        self.handle.take().is_some()
    }

    /// Cancels the pending frame, if any.
    pub fn cancel<F>(&mut self, frames: &mut F) -> bool
    where
        F: FrameRequester<Handle = H> + ?Sized,
    {
        match self.handle.take() {
            Some(handle) => {
                frames.cancel_frame(handle);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct ManualFrames {
        next: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
    }

    impl FrameRequester for ManualFrames {
        type Handle = u32;

        fn request_frame(&mut self) -> u32 {
            self.next += 1;
            self.requested.push(self.next);
            self.next
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn second_request_is_coalesced() {
        let mut frames = ManualFrames::default();
        let mut pending = PendingFrame::new();
        assert!(pending.request(&mut frames));
        assert!(!pending.request(&mut frames));
        assert!(!pending.request(&mut frames));
        assert_eq!(frames.requested, &[1], "only one callback scheduled");
        assert!(pending.is_pending());
    }

    #[test]
    fn firing_returns_to_idle() {
        let mut frames = ManualFrames::default();
        let mut pending = PendingFrame::new();
        pending.request(&mut frames);
        assert!(pending.fired());
        assert!(!pending.is_pending());
        assert!(!pending.fired(), "spurious callback");
        assert!(pending.request(&mut frames));
        assert_eq!(frames.requested, &[1, 2]);
    }

    #[test]
    fn cancel_hands_the_handle_back() {
        let mut frames = ManualFrames::default();
        let mut pending = PendingFrame::new();
        assert!(!pending.cancel(&mut frames));
        pending.request(&mut frames);
        assert!(pending.cancel(&mut frames));
        assert_eq!(frames.cancelled, &[1]);
        assert!(!pending.is_pending());
    }
}
