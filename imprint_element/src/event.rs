// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::ElementId;

/// Notification queued by an edit area for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum EditEvent {
    /// The settle pass moved an element back inside the print area.
    ElementNudged {
        /// The element that moved.
        id: ElementId,
        /// CSS-space position before the nudge.
        from: Point,
        /// CSS-space position after the nudge.
        to: Point,
    },
    /// The set of elements whose visible box leaves the print area changed.
    ElementsOutOfBoundsChanged {
        /// Elements currently out of bounds, sorted by id.
        ids: Vec<ElementId>,
    },
    /// The layer order changed; every z-index has been re-derived.
    LayersChanged {
        /// Layer registry revision after the change.
        revision: u64,
    },
}
