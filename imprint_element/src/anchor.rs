// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use imprint_geometry::is_usable_size;
use kurbo::{Point, Rect, Size};

/// Measured rectangles every element of an edit area is positioned against.
///
/// Shared read-only; the host replaces it whenever a resize observer fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorRects {
    /// The positioning container as displayed, in screen space. Its size
    /// already includes the canvas zoom.
    pub container: Rect,
    /// The allowed print area, in container-local unscaled pixels.
    pub print_area: Rect,
}

impl AnchorRects {
    /// Creates anchor rectangles.
    #[must_use]
    pub const fn new(container: Rect, print_area: Rect) -> Self {
        Self {
            container,
            print_area,
        }
    }

    /// Returns `true` if the print area can be projected against.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        is_usable_size(self.print_area.size())
    }

    /// Container size in container-local unscaled pixels.
    #[must_use]
    pub fn local_container_size(&self, canvas_zoom: f64) -> Size {
        let size = self.container.size();
        Size::new(size.width / canvas_zoom, size.height / canvas_zoom)
    }

    /// Maps a container-local point to screen space.
    #[must_use]
    pub fn to_screen(&self, local: Point, canvas_zoom: f64) -> Point {
        self.container.origin() + local.to_vec2() * canvas_zoom
    }
}
