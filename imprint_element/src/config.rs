// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element tuning constants.
//!
//! Every field has a default, so hosts only send the values they override:
//!
//! ```
//! use imprint_element::{ElementConfig, GestureSet};
//!
//! let config = ElementConfig::from_json(r#"{ "maxZoom": 4, "gestures": { "pinch": true } }"#)
//!     .unwrap();
//! assert_eq!(config.max_zoom, 4.0);
//! assert_eq!(config.settle_delay_ms, 700);
//! assert!(config.gestures.to_set().contains(GestureSet::PINCH));
//! ```

use imprint_geometry::BoundaryMode;
use imprint_layers::ZIndexScale;
use serde::{Deserialize, Serialize};

use crate::PlacementError;

/// Default lower scale limit.
pub const DEFAULT_MIN_ZOOM: f64 = 0.2;
/// Default upper scale limit.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;
/// Default rotation snap engage distance, degrees.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;
/// Default rotation snap release distance, degrees.
pub const DEFAULT_SNAP_BREAK_THRESHOLD: f64 = 10.0;
/// Default settle delay after a gesture or resize.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 700;
/// Default snapshot capture delay.
pub const DEFAULT_CAPTURE_DELAY_FRAMES: u32 = 2;
/// Default z-index distance between layers.
pub const DEFAULT_Z_INDEX_STEP: i32 = 10;
/// Default z-index offset.
pub const DEFAULT_Z_INDEX_BASE: i32 = 1;

bitflags::bitflags! {
    /// Gestures an element responds to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureSet: u8 {
        /// Move with the drag handle.
        const DRAG   = 0b0000_0001;
        /// Scale with the corner handle.
        const ZOOM   = 0b0000_0010;
        /// Rotate with the rotate handle.
        const ROTATE = 0b0000_0100;
        /// Two-finger pinch to scale and rotate.
        const PINCH  = 0b0000_1000;
    }
}

impl Default for GestureSet {
    fn default() -> Self {
        Self::DRAG | Self::ZOOM | Self::ROTATE
    }
}

/// Serialized form of [`GestureSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// See [`GestureSet::DRAG`].
    pub drag: bool,
    /// See [`GestureSet::ZOOM`].
    pub zoom: bool,
    /// See [`GestureSet::ROTATE`].
    pub rotate: bool,
    /// See [`GestureSet::PINCH`].
    pub pinch: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::from_set(GestureSet::default())
    }
}

impl GestureConfig {
    /// Flags for the enabled gestures.
    #[must_use]
    pub fn to_set(self) -> GestureSet {
        let mut set = GestureSet::empty();
        set.set(GestureSet::DRAG, self.drag);
        set.set(GestureSet::ZOOM, self.zoom);
        set.set(GestureSet::ROTATE, self.rotate);
        set.set(GestureSet::PINCH, self.pinch);
        set
    }

    /// Config enabling exactly `set`.
    #[must_use]
    pub fn from_set(set: GestureSet) -> Self {
        Self {
            drag: set.contains(GestureSet::DRAG),
            zoom: set.contains(GestureSet::ZOOM),
            rotate: set.contains(GestureSet::ROTATE),
            pinch: set.contains(GestureSet::PINCH),
        }
    }
}

/// Serialized form of [`ZIndexScale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZIndexConfig {
    /// Distance between adjacent layers.
    pub step: i32,
    /// Offset added to every layer.
    pub base: i32,
}

impl Default for ZIndexConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_Z_INDEX_STEP,
            base: DEFAULT_Z_INDEX_BASE,
        }
    }
}

impl From<ZIndexConfig> for ZIndexScale {
    fn from(config: ZIndexConfig) -> Self {
        Self {
            step: config.step,
            base: config.base,
        }
    }
}

/// Tuning constants shared by the elements of an edit area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementConfig {
    /// Position of a newly created element, container-local pixels.
    pub initial_x: f64,
    /// See [`ElementConfig::initial_x`].
    pub initial_y: f64,
    /// Scale of a newly created element.
    pub initial_scale: f64,
    /// Angle of a newly created element, degrees.
    pub initial_angle: f64,
    /// Z-index reported by a control that is not registered in any layer
    /// list yet.
    pub initial_z_index: i32,
    /// Smallest scale reachable by zoom, pinch, or setters.
    pub min_zoom: f64,
    /// Largest scale reachable by zoom, pinch, or setters.
    pub max_zoom: f64,
    /// Rotation locks to a multiple of 90° within this many degrees.
    pub snap_threshold: f64,
    /// A rotation lock releases beyond this many degrees.
    pub snap_break_threshold: f64,
    /// Delay before the settle pass nudges elements back into the print area.
    pub settle_delay_ms: u64,
    /// Frames between a committed change and the snapshot capture.
    pub capture_delay_frames: u32,
    /// Space kept free at the far edges when clamping.
    pub boundary_margin: f64,
    /// Eager boundary handling of drag updates.
    pub boundary_mode: BoundaryMode,
    /// Mapping from layer rank to z-index.
    pub z_index: ZIndexConfig,
    /// Enabled gestures.
    pub gestures: GestureConfig,
}

impl Default for ElementConfig {
    fn default() -> Self {
        let z_index = ZIndexConfig::default();
        Self {
            initial_x: 0.0,
            initial_y: 0.0,
            initial_scale: 1.0,
            initial_angle: 0.0,
            initial_z_index: ZIndexScale::from(z_index).z_index(0),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            snap_break_threshold: DEFAULT_SNAP_BREAK_THRESHOLD,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            capture_delay_frames: DEFAULT_CAPTURE_DELAY_FRAMES,
            boundary_margin: 0.0,
            boundary_mode: BoundaryMode::Clamp,
            z_index,
            gestures: GestureConfig::default(),
        }
    }
}

impl ElementConfig {
    /// Parses host overrides; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Malformed`] for invalid JSON and
    /// [`PlacementError::NonFinite`] if a numeric field is NaN or infinite.
    pub fn from_json(json: &str) -> Result<Self, PlacementError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Zoom limits as `(min, max)`, reordered if given backwards.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        if self.min_zoom <= self.max_zoom {
            (self.min_zoom, self.max_zoom)
        } else {
            (self.max_zoom, self.min_zoom)
        }
    }

    /// Clamps `scale` into the zoom limits.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let (min, max) = self.zoom_limits();
        scale.clamp(min, max)
    }

    /// Rank-to-z-index mapping.
    #[must_use]
    pub fn z_index_scale(&self) -> ZIndexScale {
        self.z_index.into()
    }

    fn validate(&self) -> Result<(), PlacementError> {
        for (value, field) in [
            (self.initial_x, "initialX"),
            (self.initial_y, "initialY"),
            (self.initial_scale, "initialScale"),
            (self.initial_angle, "initialAngle"),
            (self.min_zoom, "minZoom"),
            (self.max_zoom, "maxZoom"),
            (self.snap_threshold, "snapThreshold"),
            (self.snap_break_threshold, "snapBreakThreshold"),
            (self.boundary_margin, "boundaryMargin"),
        ] {
            crate::error::ensure_finite(value, field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use imprint_geometry::BoundaryMode;

    use super::{ElementConfig, GestureConfig, GestureSet};
    use crate::PlacementError;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(ElementConfig::from_json("{}").unwrap(), ElementConfig::default());
    }

    #[test]
    fn defaults_match_editor_constants() {
        let config = ElementConfig::default();
        assert_eq!(config.settle_delay_ms, 700);
        assert_eq!(config.capture_delay_frames, 2);
        assert_eq!(config.z_index_scale().z_index(0), 11);
        assert_eq!(config.initial_z_index, 11);
        assert!(!config.gestures.pinch);
    }

    #[test]
    fn overrides_use_camel_case() {
        let config = ElementConfig::from_json(
            r#"{
                "minZoom": 0.5,
                "snapBreakThreshold": 12,
                "boundaryMode": "reject",
                "zIndex": { "step": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.min_zoom, 0.5);
        assert_eq!(config.snap_break_threshold, 12.0);
        assert_eq!(config.boundary_mode, BoundaryMode::Reject);
        assert_eq!(config.z_index.step, 5);
        assert_eq!(config.z_index.base, 1);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ElementConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, PlacementError::Malformed(_)));
    }

    #[test]
    fn wrong_field_type_is_reported() {
        let err = ElementConfig::from_json(r#"{ "maxZoom": "big" }"#).unwrap_err();
        assert!(matches!(err, PlacementError::Malformed(_)));
    }

    #[test]
    fn backwards_limits_are_reordered() {
        let config = ElementConfig {
            min_zoom: 3.0,
            max_zoom: 0.5,
            ..ElementConfig::default()
        };
        assert_eq!(config.zoom_limits(), (0.5, 3.0));
        assert_eq!(config.clamp_scale(10.0), 3.0);
    }

    #[test]
    fn gesture_flags_round_trip() {
        let set = GestureSet::DRAG | GestureSet::PINCH;
        assert_eq!(GestureConfig::from_set(set).to_set(), set);
        assert_eq!(GestureConfig::default().to_set(), GestureSet::default());
    }
}
