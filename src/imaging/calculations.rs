//! Pure calculation functions for placeholder dimensions.

/// Output dimensions for a placeholder capped at `max_width`.
///
/// Width is bounded, height follows the source aspect ratio. Images already
/// narrower than the cap keep their size (no enlargement). Neither side is
/// ever rounded down to zero.
///
/// ```text
/// 4000x3000, cap 20 → 20x15
/// 3000x4000, cap 20 → 20x27
///   12x40,   cap 20 → 12x40
/// ```
pub fn calculate_placeholder_dimensions(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (src_w.max(1), src_h.max(1));
    }
    if src_w <= max_width {
        return (src_w, src_h);
    }

    let width = max_width.max(1);
    let height = (src_h as f64 * width as f64 / src_w as f64).round() as u32;
    (width, height.max(1))
}
