// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner-handle zoom: scale an element by dragging a handle away from or
//! toward its center.
//!
//! The new scale is `start_scale * |pointer - center| / |press - center|`,
//! clamped into the configured `[min_zoom, max_zoom]` range.
//!
//! ```
//! use kurbo::Point;
//! use imprint_gesture::zoom::ZoomController;
//!
//! let mut zoom = ZoomController::new(0.5, 3.0);
//! let center = Point::new(100.0, 100.0);
//! zoom.press(Point::new(150.0, 100.0), center, 1.0);
//! zoom.move_to(Point::new(200.0, 100.0));
//! assert_eq!(zoom.release(), Some(2.0));
//! ```

use kurbo::Point;

use crate::MIN_GESTURE_RADIUS;
use crate::frame::FrameSlot;

#[derive(Clone, Copy, Debug)]
struct ZoomAnchor {
    center: Point,
    start_radius: f64,
    start_scale: f64,
}

/// Zoom gesture controller with frame-coalesced scale updates.
#[derive(Clone, Debug)]
pub struct ZoomController {
    min_zoom: f64,
    max_zoom: f64,
    disabled: bool,
    active: Option<ZoomAnchor>,
    slot: FrameSlot<f64>,
}

impl ZoomController {
    /// Creates an idle controller limited to `[min_zoom, max_zoom]`.
    ///
    /// The limits are reordered if given backwards.
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        let mut zoom = Self {
            min_zoom: 0.0,
            max_zoom: 0.0,
            disabled: false,
            active: None,
            slot: FrameSlot::new(),
        };
        zoom.set_limits(min_zoom, max_zoom);
        zoom
    }

    /// Sets the scale limits, normalizing so that `min <= max`.
    pub fn set_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
    }

    /// Returns the configured `(min, max)` limits.
    #[must_use]
    pub fn limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Returns `true` while zooming.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.active.is_some()
    }

    /// Enables or disables the controller; disabling mid-gesture ends it and
    /// returns the pending scale.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<f64> {
        self.disabled = disabled;
        if disabled && self.is_zooming() {
            return self.release();
        }
        None
    }

    /// Starts zooming from a handle press at `pointer` around `center`.
    ///
    /// Returns `false` if disabled, already active, or the press is too close
    /// to the center to derive a ratio.
    pub fn press(&mut self, pointer: Point, center: Point, scale: f64) -> bool {
        if self.disabled || self.is_zooming() {
            tracing::debug!(disabled = self.disabled, "zoom press ignored");
            return false;
        }
        let start_radius = (pointer - center).hypot();
        if start_radius.is_nan() || start_radius < MIN_GESTURE_RADIUS || !scale.is_finite() {
            return false;
        }
        self.active = Some(ZoomAnchor {
            center,
            start_radius,
            start_scale: scale,
        });
        self.slot.cancel();
        true
    }

    /// Schedules the scale matching `pointer`; returns `true` if a frame must
    /// be requested.
    pub fn move_to(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.active else {
            return false;
        };
        let radius = (pointer - anchor.center).hypot();
        let scale = self.clamp(anchor.start_scale * radius / anchor.start_radius);
        self.slot.schedule(scale)
    }

    /// Takes the coalesced scale on an animation frame.
    pub fn on_frame(&mut self) -> Option<f64> {
        self.slot.take()
    }

    /// Ends the gesture and returns the last scale not yet applied.
    pub fn release(&mut self) -> Option<f64> {
        self.active.take()?;
        self.slot.flush()
    }

    /// Tears the gesture down without applying anything.
    pub fn cancel(&mut self) {
        self.active = None;
        self.slot.cancel();
    }

    /// Clamps `scale` into the configured limits.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }
}
