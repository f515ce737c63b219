// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture: move an element so it tracks the pointer.
//!
//! ## Usage
//!
//! 1) On pointer-down on the element's drag handle call
//!    [`DragController::press`] with the pointer and the element's current
//!    position. It records the pointer-to-origin offset (scaled by the canvas
//!    zoom) and refuses if the controller is disabled or already dragging.
//! 2) On each pointer-move call [`DragController::move_to`]. The candidate
//!    position is coalesced; request a frame when it returns `true`.
//! 3) On the animation frame call [`DragController::on_frame`] and apply the
//!    returned position.
//! 4) On pointer-up call [`DragController::release`] and apply any returned
//!    position: it is the last candidate that no frame picked up yet.
//!
//! The global drag cursor is switched on by `press` and restored on every
//! exit path: `release`, `set_disabled(true)`, `cancel`, and `Drop`.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use imprint_gesture::drag::DragController;
//!
//! let mut drag = DragController::new();
//! drag.set_canvas_zoom(2.0);
//!
//! // Element at (10, 10) shows at (20, 20) on a 2x canvas; press inside it.
//! drag.press(Point::new(25.0, 25.0), Point::new(10.0, 10.0));
//! drag.move_to(Point::new(45.0, 25.0));
//!
//! // 20 screen pixels are 10 canvas pixels.
//! assert_eq!(drag.release(), Some(Point::new(20.0, 10.0)));
//! assert!(!drag.is_dragging());
//! ```

use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Vec2};

use crate::frame::FrameSlot;

/// Tracks pointer travel during a drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Pointer position when the drag started.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during the drag.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Starts tracking a new drag from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records a new pointer position, returning the delta since the last one.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Total pointer travel from the drag start to `current_pos`.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Ends the drag and resets state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Receives the document-wide cursor/selection style toggles of a drag.
///
/// Implementations typically set `cursor: move; user-select: none` on the
/// document body while `active` is `true`. The style is cosmetic and never
/// part of element state.
pub trait CursorStyle {
    /// Switches the drag cursor style on or off.
    fn set_drag_cursor(&self, active: bool);
}

/// Drag gesture controller with frame-coalesced position updates.
pub struct DragController {
    track: DragState,
    offset: Vec2,
    canvas_zoom: f64,
    disabled: bool,
    slot: FrameSlot<Point>,
    cursor: Option<Rc<dyn CursorStyle>>,
    cursor_active: bool,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("track", &self.track)
            .field("offset", &self.offset)
            .field("canvas_zoom", &self.canvas_zoom)
            .field("disabled", &self.disabled)
            .field("slot", &self.slot)
            .field("cursor", &self.cursor.is_some())
            .field("cursor_active", &self.cursor_active)
            .finish()
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    /// Creates an idle, enabled controller with canvas zoom `1.0` and no
    /// cursor sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            track: DragState::default(),
            offset: Vec2::ZERO,
            canvas_zoom: 1.0,
            disabled: false,
            slot: FrameSlot::new(),
            cursor: None,
            cursor_active: false,
        }
    }

    /// Creates a controller that toggles `cursor` for the duration of drags.
    #[must_use]
    pub fn with_cursor(cursor: Rc<dyn CursorStyle>) -> Self {
        let mut drag = Self::new();
        drag.cursor = Some(cursor);
        drag
    }

    /// Sets the zoom factor of the editing canvas.
    ///
    /// Pointer positions are screen-space; element positions are canvas-space.
    /// Non-finite or non-positive factors are ignored.
    pub fn set_canvas_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.canvas_zoom = zoom;
        }
    }

    /// Current canvas zoom factor.
    #[must_use]
    pub fn canvas_zoom(&self) -> f64 {
        self.canvas_zoom
    }

    /// Returns `true` while dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.track.is_dragging()
    }

    /// Returns `true` if new drags are refused.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns `true` while a coalesced position waits for a frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.slot.peek().is_some()
    }

    /// Total pointer travel since the press, in screen pixels.
    #[must_use]
    pub fn travel(&self) -> Option<Vec2> {
        let last = self.track.last_pos?;
        self.track.total_offset(last)
    }

    /// Starts a drag from `pointer` for an element currently at `current`.
    ///
    /// Returns `false` (and changes nothing) if disabled or already dragging.
    pub fn press(&mut self, pointer: Point, current: Point) -> bool {
        if self.disabled || self.is_dragging() {
            tracing::debug!(disabled = self.disabled, "drag press ignored");
            return false;
        }
        self.offset = pointer.to_vec2() - current.to_vec2() * self.canvas_zoom;
        self.track.start(pointer);
        self.slot.cancel();
        self.set_cursor(true);
        true
    }

    /// Schedules the position matching `pointer`.
    ///
    /// Returns `true` if the caller must request an animation frame.
    pub fn move_to(&mut self, pointer: Point) -> bool {
        if self.disabled || !self.is_dragging() {
            return false;
        }
        self.track.update(pointer);
        let candidate = (pointer - self.offset).to_vec2() / self.canvas_zoom;
        self.slot.schedule(candidate.to_point())
    }

    /// Takes the coalesced position on an animation frame.
    pub fn on_frame(&mut self) -> Option<Point> {
        self.slot.take()
    }

    /// Ends the drag, returning the last candidate not yet applied.
    pub fn release(&mut self) -> Option<Point> {
        if !self.is_dragging() {
            return None;
        }
        self.finish()
    }

    /// Enables or disables the controller.
    ///
    /// Disabling during a drag ends it immediately and returns the pending
    /// candidate, exactly like [`DragController::release`].
    pub fn set_disabled(&mut self, disabled: bool) -> Option<Point> {
        self.disabled = disabled;
        if disabled && self.is_dragging() {
            return self.finish();
        }
        None
    }

    /// Tears the drag down without applying any pending candidate.
    pub fn cancel(&mut self) {
        self.track.end();
        self.slot.cancel();
        self.set_cursor(false);
    }

    fn finish(&mut self) -> Option<Point> {
        self.track.end();
        self.set_cursor(false);
        self.slot.flush()
    }

    fn set_cursor(&mut self, active: bool) {
        // Restoring is unconditional so a missed press never leaves the style on.
        if active == self.cursor_active && active {
            return;
        }
        self.cursor_active = active;
        if let Some(cursor) = &self.cursor {
            cursor.set_drag_cursor(active);
        }
    }
}

impl Drop for DragController {
    fn drop(&mut self) {
        if self.cursor_active {
            self.cancel();
        }
    }
}
