// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=imprint_geometry --heading-base-level=0

//! Imprint Geometry: placement arithmetic for elements on a print area.
//!
//! This crate holds the pure functions behind element placement in the
//! Imprint editor. An element is a box positioned inside a *container* and
//! visually constrained to a *print area* (the allowed region of a product
//! photo). The functions here cover:
//! - Keeping an element inside its container or print area ([`clamp_position`],
//!   [`constrain_move`], [`clamp_box_to_area`]).
//! - Expressing a position as percentages of the print area and back again
//!   ([`to_percent`], [`from_percent`]), so placement survives resizes.
//! - Resolving how much an element must rescale when the print area's
//!   on-screen footprint changes ([`resolve_scale`]).
//! - Normalizing rotation angles for display ([`normalize_angle`]).
//!
//! Nothing here measures a DOM, owns state, or schedules work. Callers pass in
//! rectangles they have measured and apply the returned values themselves.
//!
//! ## Positions and scale
//!
//! Element positions are CSS-space top-left corners of the *unscaled* box.
//! Scale is applied around the box center, so a scaled element's visible
//! top-left corner sits at `position - scale_offset(unscaled, scale)`:
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use imprint_geometry::{from_percent, to_percent};
//!
//! let print_area = Rect::new(50.0, 20.0, 450.0, 420.0);
//! let unscaled = Size::new(100.0, 60.0);
//!
//! let position = Point::new(120.0, 80.0);
//! let percent = to_percent(position, unscaled, 1.5, print_area).unwrap();
//! let back = from_percent(percent, unscaled, 1.5, print_area).unwrap();
//! assert!((back.x - position.x).abs() < 1e-9);
//! assert!((back.y - position.y).abs() < 1e-9);
//! ```
//!
//! ## Rescaling after a print area change
//!
//! ```rust
//! use kurbo::Size;
//! use imprint_geometry::resolve_scale;
//!
//! // Square print area becomes tall and narrow: width constrains.
//! let factor = resolve_scale(Size::new(100.0, 400.0), Size::new(200.0, 200.0));
//! assert_eq!(factor, 0.5);
//! ```

mod angle;
mod clamp;
mod modes;
mod project;
mod scale;

pub use angle::{CARDINAL_STEP, distance_to_cardinal, nearest_cardinal, normalize_angle};
pub use clamp::{clamp_box_to_area, clamp_position, constrain_move};
pub use modes::BoundaryMode;
pub use project::{PercentOffset, from_percent, scale_offset, to_percent};
pub use scale::{is_usable_size, resolve_scale};
