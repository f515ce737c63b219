// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=imprint_element --heading-base-level=0

//! Imprint Element: placement control for the elements of a product design.
//!
//! A design is a set of elements (text, stickers, printed images) placed on a
//! product photo. Each element has a visual state of position, scale, angle,
//! and z-index. This crate keeps that state correct while the user drags,
//! zooms, rotates, and pinches, and while the photo underneath is resized.
//!
//! - [`ElementControl`] owns one element. It routes input to the gesture
//!   controllers of `imprint_gesture`, applies their results once per
//!   animation frame, and clamps them with `imprint_geometry`.
//! - [`EditArea`] owns every element of one canvas together with what they
//!   share: the measured [`AnchorRects`], the [`LayerRegistry`], and the
//!   [`PlacementMetadata`] snapshots.
//!
//! ## Surviving resizes
//!
//! A few frames after every change, an element captures a
//! [`PersistedPlacement`]: its position as percentages of the print area plus
//! the print area size at that moment. When the anchor is resized, the
//! element re-projects itself from that snapshot, so it keeps its relative
//! place and grows or shrinks with the photo. A settle pass then nudges
//! elements that ended up outside the print area back in.
//!
//! ```
//! use imprint_element::{AnchorRects, EditArea, ElementConfig, ElementId, ElementKind, MountParams};
//! use kurbo::{Point, Rect, Size};
//!
//! let mut area = EditArea::new(ElementConfig::default());
//! area.on_anchor_resized(
//!     Some(AnchorRects::new(
//!         Rect::new(0.0, 0.0, 400.0, 300.0),
//!         Rect::new(0.0, 0.0, 200.0, 200.0),
//!     )),
//!     0,
//! );
//! let id = ElementId::from("sticker");
//! area.mount(
//!     id.clone(),
//!     ElementKind::Sticker,
//!     MountParams::new()
//!         .with_position(Point::new(50.0, 50.0))
//!         .with_size(Size::new(20.0, 20.0)),
//! );
//!
//! // Two frames later the placement snapshot exists.
//! area.on_animation_frame(16);
//! area.on_animation_frame(32);
//! assert!(area.metadata().contains(&id));
//!
//! // The print area doubles; the element follows.
//! area.on_anchor_resized(
//!     Some(AnchorRects::new(
//!         Rect::new(0.0, 0.0, 800.0, 600.0),
//!         Rect::new(0.0, 0.0, 400.0, 400.0),
//!     )),
//!     48,
//! );
//! let state = area.state(&id).unwrap();
//! assert_eq!(state.scale, 2.0);
//! ```
//!
//! Errors never escape the input, frame, or resize entry points. They are
//! logged with `tracing` and the last good state is kept.

mod anchor;
mod area;
mod config;
mod control;
mod error;
mod event;
mod id;
mod metadata;
mod persist;

pub use anchor::AnchorRects;
pub use area::{EditArea, LayerMove};
pub use config::{
    DEFAULT_CAPTURE_DELAY_FRAMES, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_SETTLE_DELAY_MS,
    DEFAULT_SNAP_BREAK_THRESHOLD, DEFAULT_SNAP_THRESHOLD, DEFAULT_Z_INDEX_BASE,
    DEFAULT_Z_INDEX_STEP, ElementConfig, GestureConfig, GestureSet, ZIndexConfig,
};
pub use control::{
    ControlCx, ElementControl, Handle, MountParams, MountType, StatePatch, VisualState,
    normalize_saved_scale,
};
pub use error::PlacementError;
pub use event::EditEvent;
pub use id::ElementId;
pub use metadata::PlacementMetadata;
pub use persist::{PersistedPlacement, RestoreEntry, RestorePayload};

pub use imprint_gesture::drag::CursorStyle;
pub use imprint_layers::{ElementKind, LayerRegistry, ZIndexScale};
