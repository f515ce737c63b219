// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::scale::is_usable_size;

/// An element's placement expressed as percentages of its anchor rectangle.
///
/// Values are signed and may leave `0..=100` when the element hangs over the
/// anchor's edges.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PercentOffset {
    /// Horizontal offset of the visible top-left corner, in percent of anchor width.
    pub x: f64,
    /// Vertical offset of the visible top-left corner, in percent of anchor height.
    pub y: f64,
}

impl PercentOffset {
    /// Creates a new percent offset.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns how far a center-scaled box's visible corner moves away from its
/// CSS position: `(scaled - unscaled) / 2` on each axis.
#[must_use]
pub fn scale_offset(unscaled: Size, scale: f64) -> Vec2 {
    Vec2::new(
        (unscaled.width * scale - unscaled.width) / 2.0,
        (unscaled.height * scale - unscaled.height) / 2.0,
    )
}

/// Projects a CSS-space element position into percentages of `anchor`.
///
/// The scale offset is removed first so the percentages describe where the
/// element visibly starts, independent of how it is scaled.
///
/// Returns `None` if `anchor` has no usable area or any input is not finite.
#[must_use]
pub fn to_percent(
    position: Point,
    unscaled: Size,
    scale: f64,
    anchor: Rect,
) -> Option<PercentOffset> {
    let size = anchor.size();
    if !is_usable_size(size) || !position.is_finite() || !scale.is_finite() {
        return None;
    }
    let visible = position - scale_offset(unscaled, scale);
    Some(PercentOffset {
        x: (visible.x - anchor.x0) / size.width * 100.0,
        y: (visible.y - anchor.y0) / size.height * 100.0,
    })
}

/// Inverse of [`to_percent`]: turns anchor percentages back into a CSS-space
/// position for an element with the given size and scale.
///
/// Returns `None` if `anchor` has no usable area or any input is not finite.
#[must_use]
pub fn from_percent(
    percent: PercentOffset,
    unscaled: Size,
    scale: f64,
    anchor: Rect,
) -> Option<Point> {
    let size = anchor.size();
    if !is_usable_size(size) || !percent.x.is_finite() || !percent.y.is_finite() {
        return None;
    }
    if !scale.is_finite() {
        return None;
    }
    let visible = Point::new(
        anchor.x0 + percent.x / 100.0 * size.width,
        anchor.y0 + percent.y / 100.0 * size.height,
    );
    Some(visible + scale_offset(unscaled, scale))
}
