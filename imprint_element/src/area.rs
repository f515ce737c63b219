// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas-level owner of every element being edited.
//!
//! An [`EditArea`] holds the state elements share: the measured anchor
//! rectangles, the layer order, the placement snapshots, and the frame
//! scheduler. Hosts forward input by element id and tick
//! [`EditArea::on_animation_frame`] while [`EditArea::needs_frame`] says so.
//!
//! ```
//! use imprint_element::{AnchorRects, EditArea, ElementConfig, ElementId, ElementKind, Handle, MountParams};
//! use kurbo::{Point, Rect, Size};
//!
//! let mut area = EditArea::new(ElementConfig::default());
//! area.on_anchor_resized(
//!     Some(AnchorRects::new(
//!         Rect::new(0.0, 0.0, 400.0, 300.0),
//!         Rect::new(50.0, 50.0, 350.0, 250.0),
//!     )),
//!     0,
//! );
//!
//! let id = ElementId::from("logo");
//! area.mount(
//!     id.clone(),
//!     ElementKind::PrintedImage,
//!     MountParams::new()
//!         .with_position(Point::new(60.0, 60.0))
//!         .with_size(Size::new(50.0, 50.0)),
//! );
//!
//! area.pointer_down(&id, Handle::Drag, Point::new(70.0, 70.0));
//! area.pointer_move(&id, Point::new(90.0, 75.0));
//! area.on_animation_frame(16);
//! assert_eq!(area.state(&id).unwrap().position, Point::new(80.0, 65.0));
//! ```

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use imprint_gesture::drag::CursorStyle;
use imprint_gesture::frame::FrameScheduler;
use imprint_layers::{ElementKind, LayerEntry, LayerRegistry};
use kurbo::{Point, Size};

use crate::{
    AnchorRects, ControlCx, EditEvent, ElementConfig, ElementControl, ElementId, Handle,
    MountParams, MountType, PlacementError, PlacementMetadata, RestoreEntry, RestorePayload,
    StatePatch, VisualState,
};

/// A stepwise change of an element's layer rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerMove {
    /// One rank up.
    Forward,
    /// One rank down.
    Backward,
    /// To the top.
    ToFront,
    /// To the bottom.
    ToBack,
}

/// Owns the elements of one editing canvas and the state they share.
pub struct EditArea {
    config: ElementConfig,
    controls: HashMap<ElementId, ElementControl>,
    layers: LayerRegistry<ElementId>,
    layers_seen: u64,
    metadata: PlacementMetadata,
    frozen: Option<PlacementMetadata>,
    anchor: Option<AnchorRects>,
    scheduler: FrameScheduler<ElementId>,
    canvas_zoom: f64,
    cursor: Option<Rc<dyn CursorStyle>>,
    events: Vec<EditEvent>,
    out_of_bounds: Vec<ElementId>,
}

impl fmt::Debug for EditArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditArea")
            .field("elements", &self.controls.len())
            .field("layers", &self.layers)
            .field("anchor", &self.anchor)
            .field("canvas_zoom", &self.canvas_zoom)
            .field("frozen", &self.frozen.is_some())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl EditArea {
    /// Creates an empty area with no anchor measured yet.
    #[must_use]
    pub fn new(config: ElementConfig) -> Self {
        Self {
            config,
            controls: HashMap::new(),
            layers: LayerRegistry::new(),
            layers_seen: 0,
            metadata: PlacementMetadata::new(),
            frozen: None,
            anchor: None,
            scheduler: FrameScheduler::new(),
            canvas_zoom: 1.0,
            cursor: None,
            events: Vec::new(),
            out_of_bounds: Vec::new(),
        }
    }

    /// Creates an area whose drags toggle `cursor`.
    #[must_use]
    pub fn with_cursor(config: ElementConfig, cursor: Rc<dyn CursorStyle>) -> Self {
        Self {
            cursor: Some(cursor),
            ..Self::new(config)
        }
    }

    /// Configuration applied to newly mounted elements.
    #[must_use]
    pub fn config(&self) -> &ElementConfig {
        &self.config
    }

    /// Current anchor rectangles.
    #[must_use]
    pub fn anchor(&self) -> Option<&AnchorRects> {
        self.anchor.as_ref()
    }

    /// Shared layer order.
    #[must_use]
    pub fn layers(&self) -> &LayerRegistry<ElementId> {
        &self.layers
    }

    /// Placement snapshots.
    #[must_use]
    pub fn metadata(&self) -> &PlacementMetadata {
        &self.metadata
    }

    /// Current canvas zoom.
    #[must_use]
    pub fn canvas_zoom(&self) -> f64 {
        self.canvas_zoom
    }

    /// Number of mounted elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Returns `true` if `id` is mounted.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.controls.contains_key(id)
    }

    /// The control for `id`.
    #[must_use]
    pub fn control(&self, id: &ElementId) -> Option<&ElementControl> {
        self.controls.get(id)
    }

    /// Visual state of `id`.
    #[must_use]
    pub fn state(&self, id: &ElementId) -> Option<VisualState> {
        self.controls.get(id).map(ElementControl::state)
    }

    /// Elements whose visible box currently leaves the print area, sorted.
    #[must_use]
    pub fn out_of_bounds(&self) -> &[ElementId] {
        &self.out_of_bounds
    }

    /// Returns `true` while any element waits for an animation frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Takes the queued notifications.
    pub fn drain_events(&mut self) -> Vec<EditEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mounts an element. Returns `false` if `id` is already mounted.
    ///
    /// The element gets a layer on top of the stack unless one was restored
    /// for it already. A saved element with a z-index is ordered among the
    /// restored layers by that value.
    pub fn mount(&mut self, id: ElementId, kind: ElementKind, params: MountParams) -> bool {
        if self.controls.contains_key(&id) {
            tracing::debug!(element = %id, "already mounted");
            return false;
        }
        let mut control = match &self.cursor {
            Some(cursor) => {
                ElementControl::with_cursor(id.clone(), kind, &self.config, params, cursor.clone())
            }
            None => ElementControl::new(id.clone(), kind, &self.config, params),
        };
        control.set_canvas_zoom(self.canvas_zoom);
        if !self.layers.contains(&id) {
            match (params.mount_type, params.z_index) {
                (MountType::FromSaved, Some(z_index)) => self
                    .layers
                    .add_element_layers_on_restore([(LayerEntry::new(id.clone(), kind), z_index)]),
                _ => {
                    self.layers.add_element_layer(id.clone(), kind);
                }
            }
        }
        tracing::info!(element = %id, ?kind, mount_type = ?params.mount_type, "element mounted");
        self.controls.insert(id.clone(), control);
        self.scheduler.request(id);
        self.sync_layers();
        self.update_out_of_bounds();
        true
    }

    /// Unmounts an element together with its layer, snapshot, and pending
    /// frame. Returns `false` if `id` is not mounted.
    pub fn unmount(&mut self, id: &ElementId) -> bool {
        let Some(mut control) = self.controls.remove(id) else {
            tracing::debug!(element = %id, "unmount of unknown element");
            return false;
        };
        control.cancel_gestures();
        self.layers.remove_element_layers([id]);
        self.metadata.remove(id);
        if let Some(frozen) = &mut self.frozen {
            frozen.remove(id);
        }
        self.scheduler.cancel(id);
        tracing::info!(element = %id, "element unmounted");
        self.sync_layers();
        self.update_out_of_bounds();
        true
    }

    /// Unmounts every element and drops all shared element state.
    pub fn clear(&mut self) {
        for control in self.controls.values_mut() {
            control.cancel_gestures();
        }
        self.controls.clear();
        self.layers.clear();
        self.metadata.clear();
        self.frozen = None;
        self.scheduler = FrameScheduler::new();
        self.sync_layers();
        self.update_out_of_bounds();
    }

    /// Sets the canvas zoom for every element. Non-positive values are ignored.
    pub fn set_canvas_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            tracing::debug!(zoom, "invalid canvas zoom ignored");
            return;
        }
        self.canvas_zoom = zoom;
        for control in self.controls.values_mut() {
            control.set_canvas_zoom(zoom);
        }
    }

    /// Routes a pointer press on one of the element's handles.
    pub fn pointer_down(&mut self, id: &ElementId, handle: Handle, pointer: Point) -> bool {
        self.route(id, |control, anchor| {
            control.pointer_down(handle, pointer, anchor)
        })
        .unwrap_or(false)
    }

    /// Routes a pointer move.
    pub fn pointer_move(&mut self, id: &ElementId, pointer: Point) -> bool {
        let requested = self
            .route(id, |control, _| control.pointer_move(pointer))
            .unwrap_or(false);
        self.schedule(id);
        requested
    }

    /// Routes a pointer release.
    pub fn pointer_up(&mut self, id: &ElementId, now: u64) -> bool {
        let ended = self
            .route(id, |control, anchor| control.pointer_up(now, anchor))
            .unwrap_or(false);
        self.after_change(id);
        ended
    }

    /// Routes touches landing on an element.
    pub fn touch_start(&mut self, id: &ElementId, touches: &[Point]) -> bool {
        let started = self
            .route(id, |control, anchor| control.touch_start(touches, anchor))
            .unwrap_or(false);
        self.after_change(id);
        started
    }

    /// Routes moved touches.
    pub fn touch_move(&mut self, id: &ElementId, touches: &[Point]) -> bool {
        let requested = self
            .route(id, |control, _| control.touch_move(touches))
            .unwrap_or(false);
        self.schedule(id);
        requested
    }

    /// Routes lifted touches; `remaining` are the touches still down.
    pub fn touch_end(&mut self, id: &ElementId, remaining: &[Point], now: u64) -> bool {
        let ended = self
            .route(id, |control, anchor| control.touch_end(remaining, now, anchor))
            .unwrap_or(false);
        self.after_change(id);
        ended
    }

    /// See [`ElementControl::set_position`].
    pub fn set_position(&mut self, id: &ElementId, x: Option<f64>, y: Option<f64>) -> bool {
        let changed = self
            .route(id, |control, _| control.set_position(x, y))
            .unwrap_or(false);
        self.after_change(id);
        changed
    }

    /// See [`ElementControl::set_scale`].
    pub fn set_scale(&mut self, id: &ElementId, scale: f64) -> bool {
        let changed = self
            .route(id, |control, _| control.set_scale(scale))
            .unwrap_or(false);
        self.after_change(id);
        changed
    }

    /// See [`ElementControl::set_angle`].
    pub fn set_angle(&mut self, id: &ElementId, angle: f64) -> bool {
        let changed = self
            .route(id, |control, _| control.set_angle(angle))
            .unwrap_or(false);
        self.after_change(id);
        changed
    }

    /// See [`ElementControl::set_state`].
    pub fn set_state(&mut self, id: &ElementId, patch: StatePatch) -> bool {
        let changed = self
            .route(id, |control, _| control.set_state(patch))
            .unwrap_or(false);
        self.after_change(id);
        changed
    }

    /// Records the measured unscaled size of an element.
    pub fn set_element_size(&mut self, id: &ElementId, size: Size) {
        self.route(id, |control, _| control.set_size(size));
        self.after_change(id);
    }

    /// Moves an element to `rank` in the layer order.
    pub fn set_z_index(&mut self, id: &ElementId, rank: usize) -> bool {
        let Some(control) = self.controls.get_mut(id) else {
            log_unknown(id);
            return false;
        };
        let changed = control.set_z_index(rank, &mut self.layers);
        self.sync_layers();
        changed
    }

    /// Moves an element one step or to either end of the layer order.
    pub fn move_layer(&mut self, id: &ElementId, step: LayerMove) -> bool {
        if !self.controls.contains_key(id) {
            log_unknown(id);
            return false;
        }
        let moved = match step {
            LayerMove::Forward => self.layers.bring_forward(id),
            LayerMove::Backward => self.layers.send_backward(id),
            LayerMove::ToFront => self.layers.bring_to_front(id),
            LayerMove::ToBack => self.layers.send_to_back(id),
        };
        self.sync_layers();
        moved
    }

    /// Restores the layer order of a saved design.
    ///
    /// Entries carry the saved z-index of each element. Call this before
    /// mounting the restored elements, or after; either way every mounted
    /// element picks up its new z-index.
    pub fn restore_layers<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (ElementId, ElementKind, i32)>,
    {
        self.layers.add_element_layers_on_restore(
            entries
                .into_iter()
                .map(|(id, kind, z_index)| (LayerEntry::new(id, kind), z_index)),
        );
        tracing::info!(layers = self.layers.len(), "layers restored");
        self.sync_layers();
    }

    /// Runs one animation frame for every element that asked for it.
    ///
    /// Returns `true` if any visual state changed.
    pub fn on_animation_frame(&mut self, now: u64) -> bool {
        let owners = self.scheduler.begin_frame();
        let mut changed = false;
        for id in owners {
            let Some(control) = self.controls.get_mut(&id) else {
                continue;
            };
            let mut cx = ControlCx {
                anchor: self.anchor.as_ref(),
                metadata: &mut self.metadata,
                events: &mut self.events,
            };
            changed |= control.frame(now, &mut cx);
            if control.needs_frame() {
                self.scheduler.request(id);
            }
        }
        if changed {
            self.update_out_of_bounds();
        }
        changed
    }

    /// Stores new anchor rectangles and re-projects every element from its
    /// snapshot. `None` records that the anchor is gone.
    ///
    /// Changes still waiting for their snapshot are captured against the
    /// outgoing anchor first, so they carry over. Every element also
    /// schedules a settle pass.
    pub fn on_anchor_resized(&mut self, rects: Option<AnchorRects>, now: u64) {
        let previous = std::mem::replace(&mut self.anchor, rects);
        let mut cx = ControlCx {
            anchor: previous.as_ref(),
            metadata: &mut self.metadata,
            events: &mut self.events,
        };
        for control in self.controls.values_mut() {
            control.flush_capture(&mut cx);
        }

        let Some(anchor) = self.anchor.as_ref() else {
            tracing::debug!("anchor unmounted");
            self.update_out_of_bounds();
            return;
        };
        let mut cx = ControlCx {
            anchor: Some(anchor),
            metadata: &mut self.metadata,
            events: &mut self.events,
        };
        let mut moved = 0_usize;
        for (id, control) in &mut self.controls {
            if control.reanchor(&mut cx) {
                moved += 1;
            }
            control.schedule_settle(now);
            self.scheduler.request(id.clone());
        }
        tracing::debug!(moved, "anchor resized");
        self.update_out_of_bounds();
    }

    /// Pushes position and scale into many elements at once.
    ///
    /// Entries for unknown ids and entries with non-finite numbers are
    /// skipped. Returns the number of entries applied.
    pub fn apply(&mut self, payload: &RestorePayload) -> usize {
        let mut applied = 0;
        for (id, entry) in payload.iter() {
            let Some(control) = self.controls.get_mut(id) else {
                log_unknown(id);
                continue;
            };
            control.apply(entry);
            applied += 1;
            if control.needs_frame() {
                self.scheduler.request(id.clone());
            }
        }
        tracing::info!(entries = payload.len(), applied, "bulk restore applied");
        self.update_out_of_bounds();
        applied
    }

    /// Parses and applies a bulk restore payload. Malformed JSON applies
    /// nothing.
    pub fn apply_json(&mut self, json: &str) -> usize {
        match RestorePayload::from_json(json) {
            Ok(payload) => self.apply(&payload),
            Err(err) => {
                tracing::debug!(%err, "bulk restore ignored");
                0
            }
        }
    }

    /// Position and scale of every mounted element.
    #[must_use]
    pub fn export_placements(&self) -> RestorePayload {
        let mut payload = RestorePayload::new();
        for (id, control) in &self.controls {
            payload.insert(id.clone(), control.restore_entry());
        }
        payload
    }

    /// Copies the current snapshots so a later
    /// [`EditArea::relayout_to_print_area`] is not affected by intermediate
    /// resizes. Returns the number of snapshots frozen.
    pub fn freeze_placements(&mut self) -> usize {
        let frozen = self.metadata.clone();
        let count = frozen.len();
        self.frozen = Some(frozen);
        count
    }

    /// Moves every element to the same relative placement inside a new print
    /// area, typically after the product photo changed.
    ///
    /// Uses the snapshots frozen by [`EditArea::freeze_placements`], or the
    /// live ones if nothing was frozen. Returns the number of elements moved.
    pub fn relayout_to_print_area(&mut self, rects: AnchorRects, now: u64) -> usize {
        let snapshots = self.frozen.take().unwrap_or_else(|| self.metadata.clone());
        let mut payload = RestorePayload::new();
        for (id, control) in &self.controls {
            match relayout_entry(&snapshots, id, control, &rects, &self.config) {
                Ok(entry) => payload.insert(id.clone(), entry),
                Err(PlacementError::MissingSnapshot) => {}
                Err(err) => tracing::debug!(element = %id, %err, "relayout skipped"),
            }
        }
        self.anchor = Some(rects);
        for control in self.controls.values_mut() {
            control.schedule_settle(now);
        }
        for id in self.controls.keys() {
            self.scheduler.request(id.clone());
        }
        self.apply(&payload)
    }

    fn route<R>(
        &mut self,
        id: &ElementId,
        f: impl FnOnce(&mut ElementControl, Option<&AnchorRects>) -> R,
    ) -> Option<R> {
        let Some(control) = self.controls.get_mut(id) else {
            log_unknown(id);
            return None;
        };
        Some(f(control, self.anchor.as_ref()))
    }

    fn schedule(&mut self, id: &ElementId) {
        if self.controls.get(id).is_some_and(ElementControl::needs_frame) {
            self.scheduler.request(id.clone());
        }
    }

    fn after_change(&mut self, id: &ElementId) {
        self.schedule(id);
        self.update_out_of_bounds();
    }

    fn sync_layers(&mut self) {
        for (id, control) in &mut self.controls {
            if control.sync_layers(&self.layers) {
                self.scheduler.request(id.clone());
            }
        }
        let revision = self.layers.revision();
        if revision != self.layers_seen {
            self.layers_seen = revision;
            self.events.push(EditEvent::LayersChanged { revision });
        }
    }

    fn update_out_of_bounds(&mut self) {
        let mut ids: Vec<ElementId> = match &self.anchor {
            Some(anchor) => self
                .controls
                .iter()
                .filter(|(_, control)| control.is_out_of_bounds(anchor))
                .map(|(id, _)| id.clone())
                .collect(),
            None => Vec::new(),
        };
        ids.sort();
        if ids != self.out_of_bounds {
            self.out_of_bounds = ids.clone();
            self.events.push(EditEvent::ElementsOutOfBoundsChanged { ids });
        }
    }
}

fn relayout_entry(
    snapshots: &PlacementMetadata,
    id: &ElementId,
    control: &ElementControl,
    rects: &AnchorRects,
    config: &ElementConfig,
) -> Result<RestoreEntry, PlacementError> {
    let snapshot = snapshots.load(id)?;
    let size = control.size().ok_or(PlacementError::DegenerateAnchor)?;
    let (position, scale) =
        snapshot.project(size, rects.print_area, |s| config.clamp_scale(s))?;
    Ok(RestoreEntry::new(position, scale))
}

fn log_unknown(id: &ElementId) {
    let err = PlacementError::UnknownElement(id.clone());
    tracing::debug!(%err, "input ignored");
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{EditArea, LayerMove};
    use crate::{
        AnchorRects, EditEvent, ElementConfig, ElementId, ElementKind, MountParams,
    };

    fn area_with(ids: &[&str]) -> EditArea {
        let mut area = EditArea::new(ElementConfig::default());
        area.on_anchor_resized(
            Some(AnchorRects::new(
                Rect::new(0.0, 0.0, 400.0, 300.0),
                Rect::new(0.0, 0.0, 400.0, 300.0),
            )),
            0,
        );
        for id in ids {
            area.mount(
                ElementId::from(*id),
                ElementKind::Sticker,
                MountParams::new().with_size(Size::new(10.0, 10.0)),
            );
        }
        area
    }

    #[test]
    fn layer_moves_re_derive_z_indices() {
        let mut area = area_with(&["a", "b", "c"]);
        let a = ElementId::from("a");
        assert_eq!(area.state(&a).unwrap().z_index, 11);
        area.drain_events();

        assert!(area.move_layer(&a, LayerMove::ToFront));
        assert_eq!(area.state(&a).unwrap().z_index, 31);
        assert_eq!(area.state(&ElementId::from("c")).unwrap().z_index, 21);
        assert!(matches!(
            area.drain_events().as_slice(),
            [EditEvent::LayersChanged { .. }]
        ));
        assert!(!area.move_layer(&a, LayerMove::Forward));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut area = area_with(&[]);
        let ghost = ElementId::from("ghost");
        assert!(!area.pointer_move(&ghost, Point::ZERO));
        assert!(!area.set_scale(&ghost, 2.0));
        assert!(!area.unmount(&ghost));
        assert!(!area.move_layer(&ghost, LayerMove::ToBack));
    }

    #[test]
    fn mount_twice_is_refused() {
        let mut area = area_with(&["a"]);
        assert!(!area.mount(ElementId::from("a"), ElementKind::Text, MountParams::new()));
        assert_eq!(area.layers().len(), 1);
    }

    #[test]
    fn out_of_bounds_changes_are_reported() {
        let mut area = area_with(&["a"]);
        let a = ElementId::from("a");
        area.drain_events();
        area.set_position(&a, Some(395.0), None);
        assert_eq!(area.out_of_bounds(), &[a.clone()]);
        assert!(matches!(
            area.drain_events().as_slice(),
            [EditEvent::ElementsOutOfBoundsChanged { ids }] if ids == &[a.clone()]
        ));
        area.set_position(&a, Some(10.0), None);
        assert!(area.out_of_bounds().is_empty());
    }
}
