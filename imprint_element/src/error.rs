// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ElementId;

/// Why a placement operation could not complete.
///
/// Gesture, frame, and resize entry points never surface these. They log the
/// error and keep the last good visual state.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// Persisted JSON failed to parse or lacks a required field.
    #[error("malformed placement data: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A numeric field was NaN or infinite.
    #[error("non-finite value in `{field}`")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The anchor rectangle (or the element size) has no usable area.
    #[error("anchor has no usable size")]
    DegenerateAnchor,
    /// No anchor rectangles have been measured yet.
    #[error("anchor is not mounted")]
    MissingAnchor,
    /// The element has no captured placement snapshot yet.
    #[error("no placement snapshot captured yet")]
    MissingSnapshot,
    /// No element with this id is mounted.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),
}

/// Returns [`PlacementError::NonFinite`] unless `value` is finite.
pub(crate) fn ensure_finite(value: f64, field: &'static str) -> Result<f64, PlacementError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlacementError::NonFinite { field })
    }
}
