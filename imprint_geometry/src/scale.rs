// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Returns `true` if `size` has a finite, strictly positive width and height.
#[must_use]
pub fn is_usable_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Resolves the factor an element must be rescaled by so it keeps its
/// proportional size when its anchor changes from `previous` to `current`.
///
/// The previous anchor is aspect-fit into the current one. If the previous
/// anchor is relatively wider, the current width constrains the fit and the
/// factor is driven by the fitted height; otherwise the current height
/// constrains and the factor is driven by the fitted width.
///
/// Degenerate sizes yield `1.0` (no rescale).
#[must_use]
pub fn resolve_scale(current: Size, previous: Size) -> f64 {
    if !is_usable_size(current) || !is_usable_size(previous) {
        return 1.0;
    }
    let previous_ratio = previous.width / previous.height;
    let current_ratio = current.width / current.height;
    if previous_ratio > current_ratio {
        let fitted_height = current.width / previous_ratio;
        fitted_height / previous.height
    } else {
        let fitted_width = current.height * previous_ratio;
        fitted_width / previous.width
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::resolve_scale;

    #[test]
    fn unchanged_anchor_keeps_scale() {
        let s = Size::new(320.0, 180.0);
        assert!((resolve_scale(s, s) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn widening_square_is_height_limited() {
        // 1:1 -> 2:1, height unchanged and limiting.
        let f = resolve_scale(Size::new(600.0, 300.0), Size::new(300.0, 300.0));
        assert!((f - 1.0).abs() < 1e-12);
    }

    #[test]
    fn narrowing_square_is_width_limited() {
        // 1:1 -> 1:4. Previous ratio 1 > 0.25, so fitted height = 100 / 1 = 100,
        // and 100 / 200 = 0.5.
        let f = resolve_scale(Size::new(100.0, 400.0), Size::new(200.0, 200.0));
        assert!((f - 0.5).abs() < 1e-12);
    }

    #[test]
    fn proportional_growth_scales_linearly() {
        let f = resolve_scale(Size::new(450.0, 300.0), Size::new(300.0, 200.0));
        assert!((f - 1.5).abs() < 1e-12);
    }

    #[test]
    fn landscape_to_portrait_hand_computed() {
        // Previous 400x200 (ratio 2), current 300x600 (ratio 0.5).
        // Width limits: fitted height = 300 / 2 = 150, factor = 150 / 200 = 0.75.
        let f = resolve_scale(Size::new(300.0, 600.0), Size::new(400.0, 200.0));
        assert!((f - 0.75).abs() < 1e-12);
    }

    #[test]
    fn degenerate_sizes_do_not_rescale() {
        assert_eq!(resolve_scale(Size::ZERO, Size::new(10.0, 10.0)), 1.0);
        assert_eq!(resolve_scale(Size::new(10.0, 10.0), Size::new(0.0, 10.0)), 1.0);
        assert_eq!(resolve_scale(Size::new(f64::NAN, 10.0), Size::new(10.0, 10.0)), 1.0);
    }
}
