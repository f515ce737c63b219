// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element orchestration of gestures, setters, and placement snapshots.
//!
//! ## Frame protocol
//!
//! 1) Input handlers ([`ElementControl::pointer_down`],
//!    [`ElementControl::pointer_move`], touch variants, setters) update the
//!    gesture controllers or the visual state directly.
//! 2) While [`ElementControl::needs_frame`] is `true` the host calls
//!    [`ElementControl::frame`] once per animation frame. A frame applies the
//!    coalesced gesture values, advances the snapshot capture countdown, and
//!    runs the settle pass when it is due.
//! 3) Every committed change restarts the capture countdown. The snapshot is
//!    written `capture_delay_frames` frames later, once layout has settled.

use std::rc::Rc;

use imprint_geometry::{
    BoundaryMode, clamp_box_to_area, constrain_move, normalize_angle, scale_offset, to_percent,
};
use imprint_gesture::drag::{CursorStyle, DragController};
use imprint_gesture::pinch::{PinchController, PinchUpdate};
use imprint_gesture::rotate::{RotateController, RotationSnap};
use imprint_gesture::zoom::ZoomController;
use imprint_layers::{ElementKind, LayerRegistry};
use kurbo::{Point, Rect, Size};

use crate::{
    AnchorRects, EditEvent, ElementConfig, ElementId, GestureSet, PersistedPlacement,
    PlacementError, PlacementMetadata, RestoreEntry,
};

/// Slack, in pixels, allowed before a visible box counts as out of bounds.
const BOUNDS_TOLERANCE: f64 = 0.5;

/// The rendered transform of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    /// CSS-space top-left of the unscaled box, container-local pixels.
    pub position: Point,
    /// Scale applied around the box center.
    pub scale: f64,
    /// Rotation in degrees, not normalized.
    pub angle: f64,
    /// Paint order derived from the layer rank.
    pub z_index: i32,
}

/// Where the initial state of a mounting element comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MountType {
    /// A freshly added element; missing values use the configured defaults.
    #[default]
    FromNew,
    /// An element restored from a saved design.
    FromSaved,
}

/// Initial values for [`ElementControl::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountParams {
    /// Origin of the values below.
    pub mount_type: MountType,
    /// Initial position.
    pub position: Option<Point>,
    /// Initial scale. Saved scales are normalized first, see
    /// [`normalize_saved_scale`].
    pub scale: Option<f64>,
    /// Initial angle.
    pub angle: Option<f64>,
    /// Saved z-index, used to order restored layers.
    pub z_index: Option<i32>,
    /// Measured unscaled element size.
    pub size: Option<Size>,
}

impl MountParams {
    /// Parameters for a new element with everything defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for an element restored from a saved design.
    #[must_use]
    pub fn saved(position: Point, scale: f64, angle: f64, z_index: i32) -> Self {
        Self {
            mount_type: MountType::FromSaved,
            position: Some(position),
            scale: Some(scale),
            angle: Some(angle),
            z_index: Some(z_index),
            size: None,
        }
    }

    /// Sets the measured element size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the initial position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }
}

/// Normalizes a scale read from a saved design.
///
/// Older designs stored scale as a percentage. Values above `10` are read as
/// percent; zero, negative, and non-finite values fall back to `1`.
#[must_use]
pub fn normalize_saved_scale(scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        1.0
    } else if scale > 10.0 {
        scale / 100.0
    } else {
        scale
    }
}

/// The element handle a pointer press lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    /// The element body or its move handle.
    Drag,
    /// The corner scale handle.
    Zoom,
    /// The rotate handle.
    Rotate,
}

/// Partial update for [`ElementControl::set_state`]. `None` leaves a value
/// untouched; `Some(0.0)` sets it to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatePatch {
    /// New x position.
    pub x: Option<f64>,
    /// New y position.
    pub y: Option<f64>,
    /// New scale, clamped.
    pub scale: Option<f64>,
    /// New angle.
    pub angle: Option<f64>,
}

/// Shared state an element reads and writes during frames and resizes.
#[derive(Debug)]
pub struct ControlCx<'a> {
    /// Current anchor rectangles, `None` while unmounted.
    pub anchor: Option<&'a AnchorRects>,
    /// Placement snapshots of every element.
    pub metadata: &'a mut PlacementMetadata,
    /// Outgoing notifications.
    pub events: &'a mut Vec<EditEvent>,
}

/// Controls the transform of one element.
#[derive(Debug)]
pub struct ElementControl {
    id: ElementId,
    kind: ElementKind,
    config: ElementConfig,
    gestures: GestureSet,
    state: VisualState,
    size: Option<Size>,
    drag: DragController,
    zoom: ZoomController,
    rotate: RotateController,
    pinch: PinchController,
    frame_requested: bool,
    capture_in: Option<u32>,
    settle_at: Option<u64>,
    layers_revision: Option<u64>,
}

impl ElementControl {
    /// Mounts a control without a drag cursor sink.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, config: &ElementConfig, params: MountParams) -> Self {
        Self::build(id, kind, config, params, DragController::new())
    }

    /// Mounts a control whose drags toggle `cursor`.
    #[must_use]
    pub fn with_cursor(
        id: ElementId,
        kind: ElementKind,
        config: &ElementConfig,
        params: MountParams,
        cursor: Rc<dyn CursorStyle>,
    ) -> Self {
        Self::build(id, kind, config, params, DragController::with_cursor(cursor))
    }

    fn build(
        id: ElementId,
        kind: ElementKind,
        config: &ElementConfig,
        params: MountParams,
        drag: DragController,
    ) -> Self {
        let (min_zoom, max_zoom) = config.zoom_limits();
        let gestures = config.gestures.to_set();
        let mut control = Self {
            state: initial_state(config, &params),
            id,
            kind,
            config: config.clone(),
            gestures,
            size: params.size.filter(|s| imprint_geometry::is_usable_size(*s)),
            drag,
            zoom: ZoomController::new(min_zoom, max_zoom),
            rotate: RotateController::new(RotationSnap::new(
                config.snap_threshold,
                config.snap_break_threshold,
            )),
            pinch: PinchController::new(min_zoom, max_zoom),
            frame_requested: false,
            capture_in: None,
            settle_at: None,
            layers_revision: None,
        };
        control.drag.set_disabled(!gestures.contains(GestureSet::DRAG));
        control.zoom.set_disabled(!gestures.contains(GestureSet::ZOOM));
        control.rotate.set_disabled(!gestures.contains(GestureSet::ROTATE));
        control.pinch.set_disabled(!gestures.contains(GestureSet::PINCH));
        control.mark_changed();
        control
    }

    /// The element id.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// The element kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The current visual state.
    #[must_use]
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// The angle normalized into `[0, 360)` for display.
    #[must_use]
    pub fn display_angle(&self) -> f64 {
        normalize_angle(self.state.angle)
    }

    /// Measured unscaled size, if known.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Gestures enabled by configuration.
    #[must_use]
    pub fn gestures(&self) -> GestureSet {
        self.gestures
    }

    /// Returns `true` while dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns `true` while zooming with the corner handle.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zoom.is_zooming()
    }

    /// Returns `true` while rotating with the rotate handle.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotate.is_rotating()
    }

    /// Returns `true` while pinching.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_pinching()
    }

    /// Returns `true` while any gesture is active.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.is_dragging() || self.is_zooming() || self.is_rotating() || self.is_pinching()
    }

    /// Returns `true` while the control has work for upcoming frames.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frame_requested || self.capture_in.is_some() || self.settle_at.is_some()
    }

    /// Records the measured unscaled size; unusable sizes forget it.
    pub fn set_size(&mut self, size: Size) {
        let size = Some(size).filter(|s| imprint_geometry::is_usable_size(*s));
        if size != self.size {
            self.size = size;
            self.mark_changed();
        }
    }

    /// Sets the canvas zoom used to map screen-space pointer input.
    pub fn set_canvas_zoom(&mut self, zoom: f64) {
        self.drag.set_canvas_zoom(zoom);
    }

    /// Sets either axis of the position. `None` leaves an axis untouched.
    ///
    /// Non-finite values are ignored. Returns `true` if the position changed.
    pub fn set_position(&mut self, x: Option<f64>, y: Option<f64>) -> bool {
        let mut next = self.state.position;
        if let Some(x) = x.filter(|v| v.is_finite()) {
            next.x = x;
        }
        if let Some(y) = y.filter(|v| v.is_finite()) {
            next.y = y;
        }
        self.commit_position(next)
    }

    /// Sets the scale, clamped into the zoom limits.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            tracing::debug!(element = %self.id, scale, "non-finite scale ignored");
            return false;
        }
        self.commit_scale(self.config.clamp_scale(scale))
    }

    /// Sets the angle in degrees.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        if !angle.is_finite() {
            tracing::debug!(element = %self.id, angle, "non-finite angle ignored");
            return false;
        }
        self.commit_angle(angle)
    }

    /// Applies every present field of `patch`.
    pub fn set_state(&mut self, patch: StatePatch) -> bool {
        let moved = self.set_position(patch.x, patch.y);
        let scaled = patch.scale.is_some_and(|s| self.set_scale(s));
        let turned = patch.angle.is_some_and(|a| self.set_angle(a));
        moved | scaled | turned
    }

    /// Moves this element to `rank` in `layers` and picks up its new z-index.
    ///
    /// Other elements observe the reorder through [`ElementControl::sync_layers`].
    pub fn set_z_index(&mut self, rank: usize, layers: &mut LayerRegistry<ElementId>) -> bool {
        if layers.update_element_layer_index(&self.id, rank).is_none() {
            tracing::debug!(element = %self.id, rank, "element has no layer");
            return false;
        }
        self.sync_layers(layers)
    }

    /// Re-derives the z-index from `layers` if they changed since the last call.
    pub fn sync_layers(&mut self, layers: &LayerRegistry<ElementId>) -> bool {
        let revision = layers.revision();
        if self.layers_revision == Some(revision) {
            return false;
        }
        self.layers_revision = Some(revision);
        let Some(z_index) = layers.z_index_of(&self.id, self.config.z_index_scale()) else {
            return false;
        };
        if z_index == self.state.z_index {
            return false;
        }
        self.state.z_index = z_index;
        self.mark_changed();
        true
    }

    /// Starts the gesture belonging to `handle`.
    ///
    /// Returns `false` if the gesture is disabled, another gesture is active,
    /// or (for zoom and rotate) the anchor or element size is unknown.
    pub fn pointer_down(
        &mut self,
        handle: Handle,
        pointer: Point,
        anchor: Option<&AnchorRects>,
    ) -> bool {
        if self.is_busy() {
            tracing::debug!(element = %self.id, ?handle, "press ignored, gesture in progress");
            return false;
        }
        match handle {
            Handle::Drag => self.drag.press(pointer, self.state.position),
            Handle::Zoom | Handle::Rotate => {
                let Some(center) = self.screen_center(anchor) else {
                    tracing::debug!(element = %self.id, ?handle, "press ignored, element not measured");
                    return false;
                };
                let started = if handle == Handle::Zoom {
                    self.zoom.press(pointer, center, self.state.scale)
                } else {
                    self.rotate.press(pointer, center, self.state.angle)
                };
                if started {
                    self.drag.set_disabled(true);
                }
                started
            }
        }
    }

    /// Feeds a pointer move to the active gesture.
    ///
    /// Returns `true` if a frame must be requested.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let requested = if self.drag.is_dragging() {
            self.drag.move_to(pointer)
        } else if self.zoom.is_zooming() {
            self.zoom.move_to(pointer)
        } else if self.rotate.is_rotating() {
            self.rotate.move_to(pointer)
        } else {
            false
        };
        self.frame_requested |= requested;
        requested
    }

    /// Ends the active pointer gesture, applying its last pending value.
    ///
    /// Schedules the settle pass. Returns `true` if a gesture ended.
    pub fn pointer_up(&mut self, now: u64, anchor: Option<&AnchorRects>) -> bool {
        if self.drag.is_dragging() {
            if let Some(candidate) = self.drag.release() {
                self.apply_drag_candidate(candidate, anchor);
            }
        } else if self.zoom.is_zooming() {
            if let Some(scale) = self.zoom.release() {
                self.commit_scale(scale);
            }
            self.resume_drag();
        } else if self.rotate.is_rotating() {
            if let Some(angle) = self.rotate.release() {
                self.commit_angle(angle);
            }
            self.resume_drag();
        } else {
            return false;
        }
        self.schedule_settle(now);
        true
    }

    /// Handles touches landing on the element.
    ///
    /// One touch starts a drag. Two touches start a pinch when enabled; a drag
    /// already in progress is flushed and suspended.
    pub fn touch_start(&mut self, touches: &[Point], anchor: Option<&AnchorRects>) -> bool {
        match touches {
            [] => false,
            [single] => self.pointer_down(Handle::Drag, *single, anchor),
            [a, b, ..] => {
                if !self.gestures.contains(GestureSet::PINCH)
                    || self.is_zooming()
                    || self.is_rotating()
                    || self.is_pinching()
                {
                    tracing::debug!(element = %self.id, "pinch ignored");
                    return false;
                }
                if let Some(candidate) = self.drag.set_disabled(true) {
                    self.apply_drag_candidate(candidate, anchor);
                }
                let started = self.pinch.press(*a, *b, self.state.scale, self.state.angle);
                if !started {
                    self.resume_drag();
                }
                started
            }
        }
    }

    /// Feeds moved touches to the active gesture.
    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        let requested = match touches {
            [a, b, ..] if self.pinch.is_pinching() => self.pinch.move_to(*a, *b),
            [first, ..] if self.drag.is_dragging() => self.drag.move_to(*first),
            _ => false,
        };
        self.frame_requested |= requested;
        requested
    }

    /// Handles lifted touches; `remaining` are the touches still down.
    ///
    /// A pinch ends when fewer than two touches remain, a drag when none do.
    pub fn touch_end(&mut self, remaining: &[Point], now: u64, anchor: Option<&AnchorRects>) -> bool {
        if self.pinch.is_pinching() {
            if remaining.len() >= 2 {
                return false;
            }
            if let Some(update) = self.pinch.release() {
                self.apply_pinch(update);
            }
            self.resume_drag();
            self.schedule_settle(now);
            return true;
        }
        if self.drag.is_dragging() && remaining.is_empty() {
            return self.pointer_up(now, anchor);
        }
        false
    }

    /// Tears every gesture down without applying pending values.
    pub fn cancel_gestures(&mut self) {
        self.drag.cancel();
        self.zoom.cancel();
        self.rotate.cancel();
        self.pinch.cancel();
        self.resume_drag();
        self.frame_requested = false;
    }

    /// Runs one animation frame. Returns `true` if the visual state changed.
    pub fn frame(&mut self, now: u64, cx: &mut ControlCx<'_>) -> bool {
        self.frame_requested = false;

        // The countdown advances before this frame's changes restart it.
        match self.capture_in {
            Some(frames) if frames <= 1 => {
                self.capture_in = None;
                if let Err(err) = self.capture(cx) {
                    tracing::debug!(element = %self.id, %err, "snapshot capture skipped");
                }
            }
            Some(frames) => self.capture_in = Some(frames - 1),
            None => {}
        }

        let mut changed = false;
        if let Some(candidate) = self.drag.on_frame() {
            changed |= self.apply_drag_candidate(candidate, cx.anchor);
        }
        if let Some(scale) = self.zoom.on_frame() {
            changed |= self.commit_scale(scale);
        }
        if let Some(angle) = self.rotate.on_frame() {
            changed |= self.commit_angle(angle);
        }
        if let Some(update) = self.pinch.on_frame() {
            changed |= self.apply_pinch(update);
        }
        if self.settle_at.is_some_and(|at| now >= at) && !self.is_busy() {
            self.settle_at = None;
            changed |= self.settle(cx);
        }
        tracing::trace!(element = %self.id, now, changed, "frame");
        changed
    }

    /// Captures a pending snapshot right away against `cx.anchor`.
    ///
    /// Call this with the outgoing anchor before a resize so changes still
    /// waiting for their capture frame are not lost. Returns `true` if a
    /// snapshot was written.
    pub fn flush_capture(&mut self, cx: &mut ControlCx<'_>) -> bool {
        if self.capture_in.is_none() {
            return false;
        }
        match self.capture(cx) {
            Ok(()) => {
                self.capture_in = None;
                true
            }
            Err(err) => {
                tracing::debug!(element = %self.id, %err, "early capture skipped");
                false
            }
        }
    }

    /// Re-projects the element from its snapshot after the anchor changed.
    ///
    /// Without an anchor, size, or snapshot this is a no-op. A snapshot older
    /// than the current state (a capture is still pending) is not used; the
    /// live state is kept instead. A corrupted snapshot is logged and
    /// skipped. Returns `true` if the state changed.
    pub fn reanchor(&mut self, cx: &mut ControlCx<'_>) -> bool {
        if self.is_busy() {
            tracing::debug!(element = %self.id, "re-anchor skipped, gesture in progress");
            return false;
        }
        if self.capture_in.is_some() {
            tracing::debug!(element = %self.id, "re-anchor skipped, snapshot is stale");
            return false;
        }
        match self.try_reanchor(cx) {
            Ok(changed) => changed,
            Err(PlacementError::MissingSnapshot) => false,
            Err(err) => {
                tracing::debug!(element = %self.id, %err, "re-anchor skipped");
                false
            }
        }
    }

    /// Applies one entry of a bulk restore.
    pub fn apply(&mut self, entry: &RestoreEntry) -> bool {
        if let Err(err) = entry.validate() {
            tracing::debug!(element = %self.id, %err, "restore entry ignored");
            return false;
        }
        let moved = self.commit_position(entry.position());
        let scaled = self.commit_scale(self.config.clamp_scale(entry.scale));
        moved | scaled
    }

    /// Position and scale as a bulk restore entry.
    #[must_use]
    pub fn restore_entry(&self) -> RestoreEntry {
        RestoreEntry::new(self.state.position, self.state.scale)
    }

    /// Runs the settle pass at the first frame at or after
    /// `now + settle_delay_ms`.
    pub fn schedule_settle(&mut self, now: u64) {
        self.settle_at = Some(now.saturating_add(self.config.settle_delay_ms));
    }

    /// Returns `true` if the visible box leaves the print area of `anchor`.
    #[must_use]
    pub fn is_out_of_bounds(&self, anchor: &AnchorRects) -> bool {
        let Some(size) = self.size else {
            return false;
        };
        let visible = self.visible_box(size);
        let area = anchor.print_area;
        visible.x0 < area.x0 - BOUNDS_TOLERANCE
            || visible.y0 < area.y0 - BOUNDS_TOLERANCE
            || visible.x1 > area.x1 + BOUNDS_TOLERANCE
            || visible.y1 > area.y1 + BOUNDS_TOLERANCE
    }

    fn visible_box(&self, size: Size) -> Rect {
        let origin = self.state.position - scale_offset(size, self.state.scale);
        Rect::from_origin_size(origin, size * self.state.scale)
    }

    fn screen_center(&self, anchor: Option<&AnchorRects>) -> Option<Point> {
        let anchor = anchor?;
        let size = self.size?;
        let center = self.state.position + size.to_vec2() / 2.0;
        Some(anchor.to_screen(center, self.drag.canvas_zoom()))
    }

    fn resume_drag(&mut self) {
        self.drag
            .set_disabled(!self.gestures.contains(GestureSet::DRAG));
    }

    fn mark_changed(&mut self) {
        self.capture_in = Some(self.config.capture_delay_frames.max(1));
    }

    fn commit_position(&mut self, position: Point) -> bool {
        if position == self.state.position {
            return false;
        }
        self.state.position = position;
        self.mark_changed();
        true
    }

    fn commit_scale(&mut self, scale: f64) -> bool {
        if scale == self.state.scale {
            return false;
        }
        self.state.scale = scale;
        self.mark_changed();
        true
    }

    fn commit_angle(&mut self, angle: f64) -> bool {
        if angle == self.state.angle {
            return false;
        }
        self.state.angle = angle;
        self.mark_changed();
        true
    }

    fn apply_pinch(&mut self, update: PinchUpdate) -> bool {
        let scaled = self.commit_scale(self.config.clamp_scale(update.scale));
        let turned = self.commit_angle(update.angle);
        scaled | turned
    }

    /// Applies a drag candidate after the eager boundary check.
    ///
    /// The check keeps the visible box inside the container. Without an
    /// anchor or size the candidate is applied as is.
    fn apply_drag_candidate(&mut self, candidate: Point, anchor: Option<&AnchorRects>) -> bool {
        let (Some(anchor), Some(size)) = (anchor, self.size) else {
            return self.commit_position(candidate);
        };
        if self.config.boundary_mode == BoundaryMode::None {
            return self.commit_position(candidate);
        }
        let offset = scale_offset(size, self.state.scale);
        let visible = constrain_move(
            self.state.position - offset,
            candidate - offset,
            size * self.state.scale,
            anchor.local_container_size(self.drag.canvas_zoom()),
            self.config.boundary_margin,
            self.config.boundary_mode,
        );
        self.commit_position(visible + offset)
    }

    fn capture(&self, cx: &mut ControlCx<'_>) -> Result<(), PlacementError> {
        let anchor = cx.anchor.ok_or(PlacementError::MissingAnchor)?;
        let size = self.size.ok_or(PlacementError::DegenerateAnchor)?;
        let percent = to_percent(self.state.position, size, self.state.scale, anchor.print_area)
            .ok_or(PlacementError::DegenerateAnchor)?;
        let placement = PersistedPlacement::new(percent, self.state.scale, anchor.print_area.size());
        cx.metadata.store(&self.id, &placement)?;
        tracing::trace!(element = %self.id, x = percent.x, y = percent.y, "snapshot captured");
        Ok(())
    }

    fn try_reanchor(&mut self, cx: &ControlCx<'_>) -> Result<bool, PlacementError> {
        let anchor = cx.anchor.ok_or(PlacementError::MissingAnchor)?;
        let size = self.size.ok_or(PlacementError::DegenerateAnchor)?;
        let snapshot = cx.metadata.load(&self.id)?;
        let config = &self.config;
        let (position, scale) =
            snapshot.project(size, anchor.print_area, |s| config.clamp_scale(s))?;
        let moved = self.commit_position(position);
        let scaled = self.commit_scale(scale);
        Ok(moved | scaled)
    }

    fn settle(&mut self, cx: &mut ControlCx<'_>) -> bool {
        if self.config.boundary_mode == BoundaryMode::None {
            return false;
        }
        let (Some(anchor), Some(size)) = (cx.anchor, self.size) else {
            return false;
        };
        let from = self.state.position;
        let to = clamp_box_to_area(
            from,
            size,
            self.state.scale,
            anchor.print_area,
            self.config.boundary_margin,
        );
        if !self.commit_position(to) {
            return false;
        }
        tracing::debug!(element = %self.id, ?from, ?to, "element nudged into print area");
        cx.events.push(EditEvent::ElementNudged {
            id: self.id.clone(),
            from,
            to,
        });
        true
    }
}

fn initial_state(config: &ElementConfig, params: &MountParams) -> VisualState {
    let scale = match params.mount_type {
        MountType::FromSaved => {
            normalize_saved_scale(params.scale.unwrap_or(config.initial_scale))
        }
        MountType::FromNew => params
            .scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(config.initial_scale),
    };
    VisualState {
        position: params
            .position
            .filter(|p| p.is_finite())
            .unwrap_or(Point::new(config.initial_x, config.initial_y)),
        scale: config.clamp_scale(scale),
        angle: params
            .angle
            .filter(|a| a.is_finite())
            .unwrap_or(config.initial_angle),
        z_index: params.z_index.unwrap_or(config.initial_z_index),
    }
}
