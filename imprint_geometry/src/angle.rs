// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Spacing of the cardinal angles rotation snaps to, in degrees.
pub const CARDINAL_STEP: f64 = 90.0;

/// Normalizes an angle in degrees into `[0, 360)`.
///
/// Non-finite input yields `0.0`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Returns the multiple of [`CARDINAL_STEP`] closest to `degrees`.
///
/// The result is not normalized: `-88.0` maps to `-90.0`, `448.0` to `450.0`.
#[must_use]
pub fn nearest_cardinal(degrees: f64) -> f64 {
    (degrees / CARDINAL_STEP).round() * CARDINAL_STEP
}

/// Absolute distance in degrees from `degrees` to `cardinal`.
#[must_use]
pub fn distance_to_cardinal(degrees: f64, cardinal: f64) -> f64 {
    (degrees - cardinal).abs()
}

#[cfg(test)]
mod tests {
    use super::{nearest_cardinal, normalize_angle};

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-720.0), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
    }

    #[test]
    fn normalize_stays_in_range() {
        let mut a = -1000.0;
        while a < 1000.0 {
            let n = normalize_angle(a);
            assert!((0.0..360.0).contains(&n), "{a} normalized to {n}");
            a += 13.7;
        }
    }

    #[test]
    fn nearest_cardinal_rounds() {
        assert_eq!(nearest_cardinal(92.0), 90.0);
        assert_eq!(nearest_cardinal(44.0), 0.0);
        assert_eq!(nearest_cardinal(-88.0), -90.0);
        assert_eq!(nearest_cardinal(268.0), 270.0);
    }
}
