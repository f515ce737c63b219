// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle rotation with cardinal snapping.
//!
//! The element angle follows the change in the pointer's bearing around the
//! element center. Bearings are unwrapped move by move, so several full turns
//! accumulate instead of jumping at ±180°.
//!
//! ## Snapping
//!
//! [`RotationSnap`] uses two thresholds. While the raw angle is within
//! `threshold` degrees of a multiple of 90° it locks to that multiple. Once
//! locked, it stays locked until the raw angle is more than `break_threshold`
//! degrees away. A single threshold would flip between snapped and free on
//! every tiny pointer jitter at the boundary.
//!
//! ```
//! use imprint_gesture::rotate::RotationSnap;
//!
//! let mut snap = RotationSnap::new(5.0, 10.0);
//! assert_eq!(snap.apply(92.0), 90.0);
//! assert_eq!(snap.apply(97.0), 90.0); // still locked
//! assert_eq!(snap.apply(101.0), 101.0); // released
//! ```

use kurbo::Point;

use imprint_geometry::{distance_to_cardinal, nearest_cardinal};

use crate::MIN_GESTURE_RADIUS;
use crate::frame::FrameSlot;

/// Two-threshold cardinal snapping with hysteresis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSnap {
    threshold: f64,
    break_threshold: f64,
    locked: Option<f64>,
}

impl RotationSnap {
    /// Creates a snap with the given engage and release thresholds, in degrees.
    ///
    /// `break_threshold` is raised to `threshold` if given smaller. A
    /// non-positive `threshold` disables snapping.
    #[must_use]
    pub fn new(threshold: f64, break_threshold: f64) -> Self {
        Self {
            threshold,
            break_threshold: break_threshold.max(threshold),
            locked: None,
        }
    }

    /// Snapping that never engages.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }

    /// The cardinal angle currently locked to, if any.
    #[must_use]
    pub fn locked(&self) -> Option<f64> {
        self.locked
    }

    /// Releases any lock.
    pub fn reset(&mut self) {
        self.locked = None;
    }

    /// Maps a raw angle to the reported angle, updating the lock.
    pub fn apply(&mut self, raw: f64) -> f64 {
        if self.threshold.is_nan() || self.threshold <= 0.0 || !raw.is_finite() {
            self.locked = None;
            return raw;
        }
        if let Some(cardinal) = self.locked {
            if distance_to_cardinal(raw, cardinal) <= self.break_threshold {
                return cardinal;
            }
            self.locked = None;
        }
        let cardinal = nearest_cardinal(raw);
        if distance_to_cardinal(raw, cardinal) <= self.threshold {
            self.locked = Some(cardinal);
            cardinal
        } else {
            raw
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct RotateTrack {
    center: Point,
    last_bearing: f64,
    raw_angle: f64,
}

/// Rotate gesture controller with frame-coalesced angle updates.
#[derive(Clone, Debug)]
pub struct RotateController {
    disabled: bool,
    active: Option<RotateTrack>,
    snap: RotationSnap,
    slot: FrameSlot<f64>,
}

impl RotateController {
    /// Creates an idle controller using `snap` for cardinal snapping.
    #[must_use]
    pub fn new(snap: RotationSnap) -> Self {
        Self {
            disabled: false,
            active: None,
            snap,
            slot: FrameSlot::new(),
        }
    }

    /// Returns `true` while rotating.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the snap state.
    #[must_use]
    pub fn snap(&self) -> &RotationSnap {
        &self.snap
    }

    /// Enables or disables the controller; disabling mid-gesture ends it and
    /// returns the pending angle.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<f64> {
        self.disabled = disabled;
        if disabled && self.is_rotating() {
            return self.release();
        }
        None
    }

    /// Starts rotating from a handle press at `pointer` around `center` for
    /// an element currently at `angle` degrees.
    pub fn press(&mut self, pointer: Point, center: Point, angle: f64) -> bool {
        if self.disabled || self.is_rotating() {
            tracing::debug!(disabled = self.disabled, "rotate press ignored");
            return false;
        }
        let arm = pointer - center;
        if arm.hypot() < MIN_GESTURE_RADIUS || !angle.is_finite() {
            return false;
        }
        self.active = Some(RotateTrack {
            center,
            last_bearing: arm.atan2().to_degrees(),
            raw_angle: angle,
        });
        self.snap.reset();
        self.slot.cancel();
        true
    }

    /// Schedules the angle matching `pointer`; returns `true` if a frame must
    /// be requested.
    pub fn move_to(&mut self, pointer: Point) -> bool {
        let Some(track) = self.active.as_mut() else {
            return false;
        };
        let arm = pointer - track.center;
        if arm.hypot() < MIN_GESTURE_RADIUS {
            // Bearing is meaningless on top of the center.
            return false;
        }
        let bearing = arm.atan2().to_degrees();
        let mut delta = bearing - track.last_bearing;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta <= -180.0 {
            delta += 360.0;
        }
        track.last_bearing = bearing;
        track.raw_angle += delta;
        let reported = self.snap.apply(track.raw_angle);
        self.slot.schedule(reported)
    }

    /// Takes the coalesced angle on an animation frame.
    pub fn on_frame(&mut self) -> Option<f64> {
        self.slot.take()
    }

    /// Ends the gesture and returns the last angle not yet applied.
    pub fn release(&mut self) -> Option<f64> {
        self.active.take()?;
        self.snap.reset();
        self.slot.flush()
    }

    /// Tears the gesture down without applying anything.
    pub fn cancel(&mut self) {
        self.active = None;
        self.snap.reset();
        self.slot.cancel();
    }
}
