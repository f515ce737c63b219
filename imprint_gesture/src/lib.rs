// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=imprint_gesture --heading-base-level=0

//! Imprint Gesture: small state machines that turn pointer input into element
//! transforms.
//!
//! Each controller handles one gesture and mutates one quantity:
//!
//! - [`drag`]: moves an element, tracking the pointer 1:1 under canvas zoom.
//! - [`zoom`]: scales an element from a corner handle.
//! - [`pinch`]: scales and rotates an element with two touch points.
//! - [`rotate`]: rotates an element from a handle, with cardinal snapping.
//!
//! All controllers share the same shape: `idle → active → idle`. A start
//! request is refused while the controller is disabled or already active.
//! Moves never apply immediately; they are written into a single-slot
//! [`frame::FrameSlot`] and picked up on the next animation frame, so any
//! number of moves between two frames collapses into one update carrying the
//! latest value. Ending a gesture flushes the pending value synchronously so
//! the final value is never lost, and cancelling drops it.
//!
//! ```rust
//! use kurbo::Point;
//! use imprint_gesture::drag::DragController;
//!
//! let mut drag = DragController::new();
//! assert!(drag.press(Point::new(10.0, 10.0), Point::new(0.0, 0.0)));
//!
//! // Ten moves inside one frame only ask for one frame callback.
//! let mut requests = 0;
//! for i in 1..=10 {
//!     if drag.move_to(Point::new(10.0 + f64::from(i), 10.0)) {
//!         requests += 1;
//!     }
//! }
//! assert_eq!(requests, 1);
//!
//! // The frame applies only the latest candidate.
//! assert_eq!(drag.on_frame(), Some(Point::new(10.0, 0.0)));
//! assert_eq!(drag.on_frame(), None);
//! ```
//!
//! The crate does not know about DOM nodes or event targets. Hosts decide
//! which controller a pointer press belongs to and forward positions in one
//! consistent screen space.

pub mod drag;
pub mod frame;
pub mod pinch;
pub mod rotate;
pub mod zoom;

/// Minimum distance, in screen pixels, between a handle press and the element
/// center (or between two touch points) for ratio-based gestures to start.
///
/// Presses closer than this would divide by a near-zero distance.
pub const MIN_GESTURE_RADIUS: f64 = 1.0;
