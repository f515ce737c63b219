// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON records exchanged with the host.
//!
//! [`PersistedPlacement`] is the per-element snapshot that survives a print
//! area resize. [`RestorePayload`] is the bulk shape pushed into an edit area
//! when a saved mockup is loaded.

use std::collections::BTreeMap;

use imprint_geometry::{PercentOffset, from_percent, is_usable_size, resolve_scale};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::ensure_finite;
use crate::{ElementId, PlacementError};

/// An element's placement relative to the print area it was captured in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPlacement {
    /// Left edge of the visible box, percent of the print area width.
    pub element_x_percent: f64,
    /// Top edge of the visible box, percent of the print area height.
    pub element_y_percent: f64,
    /// Element scale at capture time.
    pub element_scale: f64,
    /// Print area width at capture time.
    pub allowed_print_area_width: f64,
    /// Print area height at capture time.
    pub allowed_print_area_height: f64,
}

impl PersistedPlacement {
    /// Builds a placement from a projected offset and the print area size.
    #[must_use]
    pub fn new(percent: PercentOffset, scale: f64, print_area: Size) -> Self {
        Self {
            element_x_percent: percent.x,
            element_y_percent: percent.y,
            element_scale: scale,
            allowed_print_area_width: print_area.width,
            allowed_print_area_height: print_area.height,
        }
    }

    /// The captured percent offset.
    #[must_use]
    pub fn percent(&self) -> PercentOffset {
        PercentOffset::new(self.element_x_percent, self.element_y_percent)
    }

    /// The print area size at capture time.
    #[must_use]
    pub fn print_area_size(&self) -> Size {
        Size::new(self.allowed_print_area_width, self.allowed_print_area_height)
    }

    /// Encodes the placement as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::NonFinite`] if any field is NaN or infinite,
    /// since JSON cannot carry those values.
    pub fn encode(&self) -> Result<String, PlacementError> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes and validates a placement.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Malformed`] if `json` does not parse or lacks
    /// a field, and [`PlacementError::NonFinite`] for out-of-range numbers.
    pub fn decode(json: &str) -> Result<Self, PlacementError> {
        let placement: Self = serde_json::from_str(json)?;
        placement.validate()?;
        Ok(placement)
    }

    /// Re-projects the placement into `print_area`.
    ///
    /// The captured scale is multiplied by the aspect-fit factor between the
    /// captured and the new print area size, then passed through `clamp`.
    /// Returns the CSS-space position and the new scale for an element whose
    /// unscaled size is `unscaled`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DegenerateAnchor`] if either print area or
    /// the element size has no usable area.
    pub fn project(
        &self,
        unscaled: Size,
        print_area: Rect,
        clamp: impl FnOnce(f64) -> f64,
    ) -> Result<(Point, f64), PlacementError> {
        if !is_usable_size(self.print_area_size()) || !is_usable_size(unscaled) {
            return Err(PlacementError::DegenerateAnchor);
        }
        let factor = resolve_scale(print_area.size(), self.print_area_size());
        let scale = clamp(self.element_scale * factor);
        let position = from_percent(self.percent(), unscaled, scale, print_area)
            .ok_or(PlacementError::DegenerateAnchor)?;
        Ok((position, scale))
    }

    fn validate(&self) -> Result<(), PlacementError> {
        ensure_finite(self.element_x_percent, "elementXPercent")?;
        ensure_finite(self.element_y_percent, "elementYPercent")?;
        ensure_finite(self.element_scale, "elementScale")?;
        ensure_finite(self.allowed_print_area_width, "allowedPrintAreaWidth")?;
        ensure_finite(self.allowed_print_area_height, "allowedPrintAreaHeight")?;
        Ok(())
    }
}

/// Position and scale pushed into one element by a bulk restore.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreEntry {
    /// CSS-space x position, container-local pixels.
    pub pos_x_pixel: f64,
    /// CSS-space y position, container-local pixels.
    pub pos_y_pixel: f64,
    /// Element scale.
    pub scale: f64,
}

impl RestoreEntry {
    /// Entry placing an element at `position` with `scale`.
    #[must_use]
    pub fn new(position: Point, scale: f64) -> Self {
        Self {
            pos_x_pixel: position.x,
            pos_y_pixel: position.y,
            scale,
        }
    }

    /// The position as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.pos_x_pixel, self.pos_y_pixel)
    }

    pub(crate) fn validate(&self) -> Result<(), PlacementError> {
        ensure_finite(self.pos_x_pixel, "posXPixel")?;
        ensure_finite(self.pos_y_pixel, "posYPixel")?;
        ensure_finite(self.scale, "scale")?;
        Ok(())
    }
}

/// Bulk restore payload: `{ "<id>": { "posXPixel", "posYPixel", "scale" } }`.
///
/// Entries are kept sorted by id so applying a payload is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestorePayload(pub BTreeMap<ElementId, RestoreEntry>);

impl RestorePayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a payload.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Malformed`] if `json` does not have the
    /// expected shape.
    pub fn from_json(json: &str) -> Result<Self, PlacementError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::NonFinite`] if an entry holds a non-finite
    /// number.
    pub fn to_json(&self) -> Result<String, PlacementError> {
        for entry in self.0.values() {
            entry.validate()?;
        }
        Ok(serde_json::to_string(self)?)
    }

    /// Adds or replaces the entry for `id`.
    pub fn insert(&mut self, id: ElementId, entry: RestoreEntry) {
        self.0.insert(id, entry);
    }

    /// Entry for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&RestoreEntry> {
        self.0.get(id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &RestoreEntry)> {
        self.0.iter()
    }
}
