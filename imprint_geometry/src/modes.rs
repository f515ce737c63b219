// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How candidate positions outside the allowed range are handled.
///
/// Consulted by [`crate::constrain_move`] on every applied drag update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum BoundaryMode {
    /// Do not constrain; the element may move anywhere.
    None,
    /// Clamp each axis into the allowed range.
    #[default]
    Clamp,
    /// Keep the current value of any axis whose candidate leaves the range.
    ///
    /// If the current value is itself out of range (for example after the
    /// container shrank), the axis is clamped instead so the element can
    /// never get stuck outside.
    Reject,
}
