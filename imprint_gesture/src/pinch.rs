// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch: scale by the finger-distance ratio and rotate by the
//! change in the finger vector's direction.

use kurbo::Point;

use crate::MIN_GESTURE_RADIUS;
use crate::frame::FrameSlot;

/// Scale and angle produced by a pinch frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    /// New element scale, clamped to the controller limits.
    pub scale: f64,
    /// New element angle in degrees (not normalized).
    pub angle: f64,
}

#[derive(Clone, Copy, Debug)]
struct PinchStart {
    distance: f64,
    bearing: f64,
    scale: f64,
    angle: f64,
}

/// Pinch gesture controller.
#[derive(Clone, Debug)]
pub struct PinchController {
    min_zoom: f64,
    max_zoom: f64,
    disabled: bool,
    start: Option<PinchStart>,
    slot: FrameSlot<PinchUpdate>,
}

impl PinchController {
    /// Creates an idle controller with scale limits `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: max_zoom.max(min_zoom),
            disabled: false,
            start: None,
            slot: FrameSlot::new(),
        }
    }

    /// Returns `true` while pinching.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.start.is_some()
    }

    /// Enables or disables the controller; disabling mid-gesture ends it and
    /// returns the pending update.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<PinchUpdate> {
        self.disabled = disabled;
        if disabled && self.is_pinching() {
            return self.release();
        }
        None
    }

    /// Starts a pinch with touch points `a` and `b` on an element with the
    /// given `scale` and `angle`.
    ///
    /// Returns `false` if disabled, already pinching, or the fingers are too
    /// close together.
    pub fn press(&mut self, a: Point, b: Point, scale: f64, angle: f64) -> bool {
        if self.disabled || self.is_pinching() {
            tracing::debug!(disabled = self.disabled, "pinch start ignored");
            return false;
        }
        let span = b - a;
        let distance = span.hypot();
        if distance.is_nan() || distance < MIN_GESTURE_RADIUS {
            return false;
        }
        self.start = Some(PinchStart {
            distance,
            bearing: span.atan2().to_degrees(),
            scale,
            angle,
        });
        self.slot.cancel();
        true
    }

    /// Schedules the update for the current touch points; returns `true` if
    /// a frame must be requested.
    pub fn move_to(&mut self, a: Point, b: Point) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let span = b - a;
        let ratio = span.hypot() / start.distance;
        let mut turn = span.atan2().to_degrees() - start.bearing;
        if turn > 180.0 {
            turn -= 360.0;
        } else if turn <= -180.0 {
            turn += 360.0;
        }
        let update = PinchUpdate {
            scale: (start.scale * ratio).clamp(self.min_zoom, self.max_zoom),
            angle: start.angle + turn,
        };
        self.slot.schedule(update)
    }

    /// Takes the coalesced update on an animation frame.
    pub fn on_frame(&mut self) -> Option<PinchUpdate> {
        self.slot.take()
    }

    /// Ends the pinch and returns the last update not yet applied.
    pub fn release(&mut self) -> Option<PinchUpdate> {
        self.start.take()?;
        self.slot.flush()
    }

    /// Tears the pinch down without applying anything.
    pub fn cancel(&mut self) {
        self.start = None;
        self.slot.cancel();
    }
}
