// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `EditArea`, driven the way a host page drives it: mount
//! elements, forward input, tick animation frames, and report resizes.

use std::cell::Cell;
use std::rc::Rc;

use imprint_element::{
    AnchorRects, CursorStyle, EditArea, EditEvent, ElementConfig, ElementId, ElementKind, Handle,
    MountParams, RestoreEntry, RestorePayload,
};
use kurbo::{Point, Rect, Size};

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn assert_point(actual: Point, expected: Point) {
    assert!(
        close(actual.x, expected.x) && close(actual.y, expected.y),
        "expected {expected:?}, got {actual:?}"
    );
}

/// Container 400×300 with a 200×200 print area at (50, 50).
fn anchor() -> AnchorRects {
    AnchorRects::new(
        Rect::new(0.0, 0.0, 400.0, 300.0),
        Rect::new(50.0, 50.0, 250.0, 250.0),
    )
}

/// Container 800×600 with a 400×400 print area at (100, 100).
fn doubled_anchor() -> AnchorRects {
    AnchorRects::new(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Rect::new(100.0, 100.0, 500.0, 500.0),
    )
}

fn area() -> EditArea {
    init_logging();
    let mut area = EditArea::new(ElementConfig::default());
    area.on_anchor_resized(Some(anchor()), 0);
    area
}

fn mount_at(area: &mut EditArea, id: &str, position: Point) -> ElementId {
    let id = ElementId::from(id);
    assert!(area.mount(
        id.clone(),
        ElementKind::Sticker,
        MountParams::new()
            .with_position(position)
            .with_size(Size::new(20.0, 20.0)),
    ));
    id
}

#[test]
fn unmount_removes_every_trace_of_an_element() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));
    let b = mount_at(&mut area, "b", Point::new(90.0, 60.0));
    let c = mount_at(&mut area, "c", Point::new(120.0, 60.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);
    assert_eq!(area.metadata().len(), 3);
    assert_eq!(area.state(&c).unwrap().z_index, 31);

    assert!(area.unmount(&b));

    assert!(!area.contains(&b));
    assert!(area.state(&b).is_none());
    assert!(!area.layers().contains(&b));
    assert!(!area.metadata().contains(&b));
    let ids: Vec<_> = area.layers().ids().cloned().collect();
    assert_eq!(ids, vec![a.clone(), c.clone()]);
    assert_eq!(area.layers().rank_of(&c), Some(1));
    assert_eq!(area.state(&a).unwrap().z_index, 11);
    assert_eq!(area.state(&c).unwrap().z_index, 21);

    // Input for the removed element goes nowhere.
    assert!(!area.pointer_down(&b, Handle::Drag, Point::ZERO));
}

#[test]
fn ten_moves_between_frames_apply_once() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));

    assert!(area.pointer_down(&a, Handle::Drag, Point::new(100.0, 100.0)));
    let requests = (1..=10)
        .filter(|i| area.pointer_move(&a, Point::new(100.0 + f64::from(*i), 100.0)))
        .count();
    assert_eq!(requests, 1);
    assert_eq!(area.state(&a).unwrap().position, Point::new(60.0, 60.0));

    assert!(area.needs_frame());
    assert!(area.on_animation_frame(16));
    assert_eq!(area.state(&a).unwrap().position, Point::new(70.0, 60.0));
    assert!(!area.on_animation_frame(32));
    assert_eq!(area.state(&a).unwrap().position, Point::new(70.0, 60.0));

    assert!(area.pointer_up(&a, 48));
    assert!(!area.control(&a).unwrap().is_busy());
}

#[test]
fn release_flushes_the_last_move() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));
    area.pointer_down(&a, Handle::Drag, Point::new(100.0, 100.0));
    area.pointer_move(&a, Point::new(130.0, 110.0));
    assert!(area.pointer_up(&a, 16));
    assert_eq!(area.state(&a).unwrap().position, Point::new(90.0, 70.0));
}

#[test]
fn snapshot_is_captured_two_frames_after_a_change() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));

    area.on_animation_frame(16);
    assert!(!area.metadata().contains(&a));
    area.on_animation_frame(32);
    let snapshot = area.metadata().load(&a).unwrap();
    assert!(close(snapshot.element_x_percent, 20.0));
    assert!(close(snapshot.element_y_percent, 10.0));
    assert_eq!(snapshot.element_scale, 1.0);
    assert_eq!(snapshot.print_area_size(), Size::new(200.0, 200.0));

    // A new change restarts the countdown.
    area.set_position(&a, Some(150.0), None);
    area.on_animation_frame(48);
    assert!(close(area.metadata().load(&a).unwrap().element_x_percent, 20.0));
    area.on_animation_frame(64);
    assert!(close(area.metadata().load(&a).unwrap().element_x_percent, 50.0));
}

#[test]
fn resize_keeps_relative_placement() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);

    area.on_anchor_resized(Some(doubled_anchor()), 100);

    let state = area.state(&a).unwrap();
    assert!(close(state.scale, 2.0));
    assert_point(state.position, Point::new(190.0, 150.0));

    // The settle pass finds nothing to nudge.
    area.on_animation_frame(900);
    assert_point(area.state(&a).unwrap().position, Point::new(190.0, 150.0));
    assert!(
        !area
            .drain_events()
            .iter()
            .any(|event| matches!(event, EditEvent::ElementNudged { .. }))
    );
}

#[test]
fn resize_before_first_capture_uses_current_state() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));
    area.on_anchor_resized(Some(doubled_anchor()), 0);
    let state = area.state(&a).unwrap();
    assert!(close(state.scale, 2.0));
    assert_point(state.position, Point::new(190.0, 150.0));
}

#[test]
fn resize_right_after_a_change_keeps_the_change() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);

    // Setter, then a resize notification before the next capture.
    area.set_position(&a, Some(150.0), None);
    area.on_anchor_resized(Some(anchor()), 40);
    assert_point(area.state(&a).unwrap().position, Point::new(150.0, 70.0));

    // Bulk restore, then a resize that changes the print area.
    let mut payload = RestorePayload::new();
    payload.insert(a.clone(), RestoreEntry::new(Point::new(120.0, 120.0), 1.0));
    area.apply(&payload);
    area.on_anchor_resized(Some(anchor()), 50);
    assert_point(area.state(&a).unwrap().position, Point::new(120.0, 120.0));
    area.on_anchor_resized(Some(doubled_anchor()), 60);
    let state = area.state(&a).unwrap();
    assert!(close(state.scale, 2.0));
    // Visible corner was 35% in on both axes.
    assert_point(state.position, Point::new(250.0, 250.0));
}

#[test]
fn drag_release_right_before_resize_is_kept() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);

    area.pointer_down(&a, Handle::Drag, Point::new(100.0, 100.0));
    area.pointer_move(&a, Point::new(130.0, 110.0));
    area.pointer_up(&a, 40);
    area.on_anchor_resized(Some(anchor()), 48);
    assert_point(area.state(&a).unwrap().position, Point::new(90.0, 70.0));
}

#[test]
fn anchor_loss_is_tolerated() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));
    area.on_anchor_resized(None, 0);
    assert!(area.anchor().is_none());

    // The pending snapshot was taken against the outgoing anchor.
    assert!(close(area.metadata().load(&a).unwrap().element_x_percent, 20.0));

    // Without an anchor, drags apply unconstrained and nothing is captured.
    area.pointer_down(&a, Handle::Drag, Point::ZERO);
    area.pointer_move(&a, Point::new(-500.0, 0.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);
    assert_eq!(area.state(&a).unwrap().position, Point::new(-410.0, 70.0));
    assert!(close(area.metadata().load(&a).unwrap().element_x_percent, 20.0));
    assert!(area.out_of_bounds().is_empty());
}

#[test]
fn bulk_restore_skips_unknown_elements() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));

    let mut payload = RestorePayload::new();
    payload.insert(a.clone(), RestoreEntry::new(Point::new(120.0, 80.0), 1.5));
    payload.insert(ElementId::from("ghost"), RestoreEntry::new(Point::ZERO, 1.0));
    assert_eq!(area.apply(&payload), 1);

    let state = area.state(&a).unwrap();
    assert_eq!(state.position, Point::new(120.0, 80.0));
    assert_eq!(state.scale, 1.5);
}

#[test]
fn bulk_restore_from_json() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));

    let applied = area.apply_json(r#"{ "a": { "posXPixel": 100, "posYPixel": 90, "scale": 9 } }"#);
    assert_eq!(applied, 1);
    let state = area.state(&a).unwrap();
    assert_eq!(state.position, Point::new(100.0, 90.0));
    // Clamped to the configured maximum.
    assert_eq!(state.scale, 5.0);

    assert_eq!(area.apply_json("{ \"a\": { \"posXPixel\": "), 0);
    assert_eq!(area.apply_json(r#"{ "a": { "posXPixel": 1 } }"#), 0);
    assert_eq!(area.state(&a).unwrap().position, Point::new(100.0, 90.0));
}

#[test]
fn export_matches_current_state() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));
    let b = mount_at(&mut area, "b", Point::new(80.0, 90.0));
    area.set_scale(&b, 2.0);

    let exported = area.export_placements();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported.get(&a), Some(&RestoreEntry::new(Point::new(60.0, 60.0), 1.0)));
    assert_eq!(exported.get(&b), Some(&RestoreEntry::new(Point::new(80.0, 90.0), 2.0)));

    let json = exported.to_json().unwrap();
    let mut other = EditArea::new(ElementConfig::default());
    mount_at(&mut other, "a", Point::ZERO);
    mount_at(&mut other, "b", Point::ZERO);
    assert_eq!(other.apply_json(&json), 2);
    assert_eq!(other.state(&b).unwrap().scale, 2.0);
}

#[test]
fn saved_elements_are_normalized_and_layered_by_saved_z() {
    let mut area = area();
    let x = ElementId::from("x");
    let y = ElementId::from("y");
    area.restore_layers([
        (x.clone(), ElementKind::PrintedImage, 31),
        (y.clone(), ElementKind::Text, 11),
    ]);

    assert!(area.mount(
        x.clone(),
        ElementKind::PrintedImage,
        MountParams::saved(Point::new(70.0, 70.0), 150.0, 45.0, 31),
    ));
    assert!(area.mount(
        y.clone(),
        ElementKind::Text,
        MountParams::saved(Point::new(80.0, 80.0), 0.0, 0.0, 11),
    ));

    let x_state = area.state(&x).unwrap();
    assert_eq!(x_state.scale, 1.5);
    assert_eq!(x_state.angle, 45.0);
    assert_eq!(x_state.z_index, 21);
    let y_state = area.state(&y).unwrap();
    assert_eq!(y_state.scale, 1.0);
    assert_eq!(y_state.z_index, 11);
    assert_eq!(area.layers().len(), 2);
}

#[test]
fn relayout_uses_frozen_snapshots() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(90.0, 70.0));
    area.on_animation_frame(16);
    area.on_animation_frame(32);
    assert_eq!(area.freeze_placements(), 1);

    // An intermediate, tiny print area clamps the scale to the minimum and
    // the live snapshot follows it.
    area.on_anchor_resized(
        Some(AnchorRects::new(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            Rect::new(0.0, 0.0, 20.0, 20.0),
        )),
        40,
    );
    assert!(close(area.state(&a).unwrap().scale, 0.2));
    area.on_animation_frame(48);
    area.on_animation_frame(64);

    assert_eq!(area.relayout_to_print_area(doubled_anchor(), 100), 1);
    let state = area.state(&a).unwrap();
    assert!(close(state.scale, 2.0));
    assert_point(state.position, Point::new(190.0, 150.0));
    assert_eq!(area.anchor(), Some(&doubled_anchor()));

    area.on_animation_frame(1000);
    assert_point(area.state(&a).unwrap().position, Point::new(190.0, 150.0));
}

#[test]
fn settle_nudges_and_reports() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(240.0, 100.0));
    assert_eq!(area.out_of_bounds(), &[a.clone()]);
    area.drain_events();

    area.on_anchor_resized(Some(anchor()), 0);
    area.on_animation_frame(500);
    assert_eq!(area.state(&a).unwrap().position, Point::new(240.0, 100.0));
    area.on_animation_frame(700);
    assert_eq!(area.state(&a).unwrap().position, Point::new(230.0, 100.0));

    let events = area.drain_events();
    assert!(events.contains(&EditEvent::ElementNudged {
        id: a.clone(),
        from: Point::new(240.0, 100.0),
        to: Point::new(230.0, 100.0),
    }));
    assert!(events.contains(&EditEvent::ElementsOutOfBoundsChanged { ids: Vec::new() }));
    assert!(area.out_of_bounds().is_empty());
}

#[test]
fn settle_waits_for_the_gesture_to_end() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::new(240.0, 100.0));
    area.on_anchor_resized(Some(anchor()), 0);
    area.pointer_down(&a, Handle::Drag, Point::ZERO);
    area.on_animation_frame(800);
    assert_eq!(area.state(&a).unwrap().position, Point::new(240.0, 100.0));

    area.pointer_up(&a, 900);
    area.on_animation_frame(1000);
    assert_eq!(area.state(&a).unwrap().position, Point::new(240.0, 100.0));
    area.on_animation_frame(1600);
    assert_eq!(area.state(&a).unwrap().position, Point::new(230.0, 100.0));
}

#[test]
fn canvas_zoom_scales_pointer_deltas() {
    let mut area = area();
    area.set_canvas_zoom(2.0);
    let a = mount_at(&mut area, "a", Point::new(60.0, 60.0));
    area.pointer_down(&a, Handle::Drag, Point::new(100.0, 100.0));
    area.pointer_move(&a, Point::new(140.0, 120.0));
    area.on_animation_frame(16);
    assert_eq!(area.state(&a).unwrap().position, Point::new(80.0, 70.0));
    assert_eq!(area.canvas_zoom(), 2.0);
}

#[test]
fn layer_changes_are_announced_once() {
    let mut area = area();
    let a = mount_at(&mut area, "a", Point::ZERO);
    mount_at(&mut area, "b", Point::ZERO);
    area.drain_events();

    assert!(area.set_z_index(&a, 1));
    let events = area.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, EditEvent::LayersChanged { .. }))
            .count(),
        1
    );
    assert_eq!(area.state(&a).unwrap().z_index, 21);

    assert!(!area.set_z_index(&a, 5));
    assert!(area.drain_events().is_empty());
}

#[derive(Default)]
struct FlagCursor(Cell<bool>);

impl CursorStyle for FlagCursor {
    fn set_drag_cursor(&self, active: bool) {
        self.0.set(active);
    }
}

#[test]
fn unmount_mid_drag_restores_cursor() {
    init_logging();
    let cursor = Rc::new(FlagCursor::default());
    let mut area = EditArea::with_cursor(ElementConfig::default(), cursor.clone());
    let a = mount_at(&mut area, "a", Point::ZERO);
    area.pointer_down(&a, Handle::Drag, Point::ZERO);
    assert!(cursor.0.get());
    area.unmount(&a);
    assert!(!cursor.0.get());
}
