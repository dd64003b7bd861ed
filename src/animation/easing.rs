//! Easing functions for the scatter/tree morph

/// `4t³` below the midpoint, `1 − (−2t + 2)³ / 2` above it.
///
/// Exact at both endpoints: `ease_in_out_cubic(0.0) == 0.0` and
/// `ease_in_out_cubic(1.0) == 1.0`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
