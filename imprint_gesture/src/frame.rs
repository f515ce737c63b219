// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame coalescing: bound visible updates to one per animation frame.
//!
//! ## Usage
//!
//! 1) A controller owns a [`FrameSlot`]. On every input event it calls
//!    [`FrameSlot::schedule`] with the newest value. The return value says
//!    whether a frame callback must be requested (it is `false` while one is
//!    already outstanding).
//! 2) The host keeps one [`FrameScheduler`] per surface and records which
//!    owners asked for a frame. On the animation frame it drains the scheduler
//!    and calls each owner, which takes its value with [`FrameSlot::take`].
//! 3) When the gesture ends, [`FrameSlot::flush`] returns the pending value
//!    synchronously; on teardown [`FrameSlot::cancel`] discards it.
//!
//! ```
//! use imprint_gesture::frame::{FrameScheduler, FrameSlot};
//!
//! let mut scheduler = FrameScheduler::new();
//! let mut slot = FrameSlot::new();
//!
//! if slot.schedule(1.0) {
//!     scheduler.request("a");
//! }
//! assert!(!slot.schedule(2.0));
//! assert!(!scheduler.request("a"));
//!
//! for owner in scheduler.begin_frame() {
//!     assert_eq!(owner, "a");
//!     assert_eq!(slot.take(), Some(2.0));
//! }
//! ```

/// A single-slot, latest-value-wins queue flushed once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSlot<T> {
    pending: Option<T>,
    requested: bool,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameSlot<T> {
    /// Creates an empty slot with no outstanding frame request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            requested: false,
        }
    }

    /// Stores `value`, replacing any value not yet taken.
    ///
    /// Returns `true` if the caller must request a frame callback, that is, if
    /// no request was outstanding.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending = Some(value);
        if self.requested {
            false
        } else {
            self.requested = true;
            true
        }
    }

    /// Takes the pending value on a frame tick and clears the request.
    pub fn take(&mut self) -> Option<T> {
        self.requested = false;
        self.pending.take()
    }

    /// Takes the pending value outside a frame tick, for example when the
    /// gesture ends. The outstanding request, if any, becomes stale.
    pub fn flush(&mut self) -> Option<T> {
        self.take()
    }

    /// Discards any pending value and forgets the outstanding request.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.requested = false;
    }

    /// Returns `true` while a frame callback has been requested and not yet run.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Returns the pending value without taking it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}

/// Tracks which owners are waiting for the next animation frame.
///
/// Each owner has at most one pending request. Owners are served in the order
/// they first asked.
#[derive(Clone, Debug)]
pub struct FrameScheduler<K> {
    pending: Vec<K>,
    frame: u64,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FrameScheduler<K> {
    /// Creates a scheduler with no pending requests.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            frame: 0,
        }
    }

    /// Returns `true` if any owner is waiting for a frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of frames started with [`FrameScheduler::begin_frame`].
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Starts a frame: returns every owner that requested one, in request
    /// order, and clears them. Owners that still need frames must request
    /// again.
    pub fn begin_frame(&mut self) -> Vec<K> {
        self.frame = self.frame.wrapping_add(1);
        core::mem::take(&mut self.pending)
    }
}

impl<K: PartialEq> FrameScheduler<K> {
    /// Requests a frame for `owner`.
    ///
    /// Returns `false` if the owner already had a pending request.
    pub fn request(&mut self, owner: K) -> bool {
        if self.pending.contains(&owner) {
            return false;
        }
        self.pending.push(owner);
        true
    }

    /// Cancels the pending request for `owner`, returning whether one existed.
    pub fn cancel(&mut self, owner: &K) -> bool {
        if let Some(idx) = self.pending.iter().position(|k| k == owner) {
            self.pending.remove(idx);
            true
        } else {
            false
        }
    }

    /// Returns `true` if `owner` has a pending request.
    #[must_use]
    pub fn is_pending(&self, owner: &K) -> bool {
        self.pending.contains(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameScheduler, FrameSlot};

    #[test]
    fn slot_coalesces_to_latest_value() {
        let mut slot = FrameSlot::new();
        let mut requests = 0;
        for v in 0..10 {
            if slot.schedule(v) {
                requests += 1;
            }
        }
        assert_eq!(requests, 1);
        assert_eq!(slot.take(), Some(9));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_requested());
    }

    #[test]
    fn slot_requests_again_after_a_frame() {
        let mut slot = FrameSlot::new();
        assert!(slot.schedule(1));
        slot.take();
        assert!(slot.schedule(2));
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut slot = FrameSlot::new();
        slot.schedule("late");
        slot.cancel();
        assert_eq!(slot.peek(), None);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn flush_returns_pending_value() {
        let mut slot = FrameSlot::new();
        slot.schedule(5);
        assert_eq!(slot.flush(), Some(5));
        assert!(!slot.is_requested());
    }

    #[test]
    fn scheduler_keeps_one_request_per_owner() {
        let mut scheduler = FrameScheduler::new();
        assert!(scheduler.request(1));
        assert!(scheduler.request(2));
        assert!(!scheduler.request(1));
        assert_eq!(scheduler.begin_frame(), vec![1, 2]);
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn scheduler_cancel_removes_owner() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request("a");
        scheduler.request("b");
        assert!(scheduler.cancel(&"a"));
        assert!(!scheduler.cancel(&"a"));
        assert!(!scheduler.is_pending(&"a"));
        assert_eq!(scheduler.begin_frame(), vec!["b"]);
    }
}
