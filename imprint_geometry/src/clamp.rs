// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::modes::BoundaryMode;
use crate::project::scale_offset;

/// Clamps `candidate` so an element of size `element` stays inside `container`.
///
/// Each axis is limited to `[0, container - element - margin]`. Negative or
/// NaN candidates resolve to `0`. When the range is empty (the element plus
/// margin is larger than the container) the axis also resolves to `0`.
#[must_use]
pub fn clamp_position(candidate: Point, element: Size, container: Size, margin: f64) -> Point {
    Point::new(
        clamp_axis(candidate.x, element.width, container.width, margin),
        clamp_axis(candidate.y, element.height, container.height, margin),
    )
}

/// Applies a [`BoundaryMode`] to a move from `current` to `candidate`.
///
/// This is the eager check run on every applied drag update.
#[must_use]
pub fn constrain_move(
    current: Point,
    candidate: Point,
    element: Size,
    container: Size,
    margin: f64,
    mode: BoundaryMode,
) -> Point {
    match mode {
        BoundaryMode::None => candidate,
        BoundaryMode::Clamp => clamp_position(candidate, element, container, margin),
        BoundaryMode::Reject => Point::new(
            reject_axis(current.x, candidate.x, element.width, container.width, margin),
            reject_axis(current.y, candidate.y, element.height, container.height, margin),
        ),
    }
}

/// Clamps the *visible* box of a scaled element into `area`.
///
/// `position` is the CSS-space top-left of the unscaled box in the same
/// coordinate space as `area`. The returned value is a CSS-space position
/// again, so callers can store it directly.
#[must_use]
pub fn clamp_box_to_area(
    position: Point,
    unscaled: Size,
    scale: f64,
    area: Rect,
    margin: f64,
) -> Point {
    let offset = scale_offset(unscaled, scale);
    let visible = position - offset - area.origin().to_vec2();
    let clamped = clamp_position(visible, unscaled * scale, area.size(), margin);
    clamped + offset + area.origin().to_vec2()
}

fn axis_max(element: f64, container: f64, margin: f64) -> f64 {
    container - element - margin
}

fn clamp_axis(candidate: f64, element: f64, container: f64, margin: f64) -> f64 {
    let max = axis_max(element, container, margin);
    if max.is_nan() || max < 0.0 || candidate.is_nan() || candidate <= 0.0 {
        return 0.0;
    }
    candidate.min(max)
}

fn reject_axis(current: f64, candidate: f64, element: f64, container: f64, margin: f64) -> f64 {
    let max = axis_max(element, container, margin);
    let in_range = |v: f64| v >= 0.0 && v <= max;
    if in_range(candidate) {
        candidate
    } else if in_range(current) {
        current
    } else {
        clamp_axis(candidate, element, container, margin)
    }
}
