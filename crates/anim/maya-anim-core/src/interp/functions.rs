//! Interpolation helpers:
//! - hermite_spline (cubic Hermite segment on a unit parameter)
//! - smooth_tangent (auto slope: mean of the adjacent segment slopes, the
//!   one adjacent slope at the ends)

use std::ops::{Add, Mul, Sub};

//------------------------------------------------------------------------------
// Hermite spline basis functions
#[inline]
fn hermite_basis_h10(t: f32) -> f32 {
    t * t * t - 2.0 * t * t + t
}
#[inline]
fn hermite_basis_h01(t: f32) -> f32 {
    -2.0 * t * t * t + 3.0 * t * t
}
#[inline]
fn hermite_basis_h11(t: f32) -> f32 {
    t * t * t - t * t
}

/// Compute a point on a cubic Hermite spline at parameter `t`.
///
/// # Parameters
/// - `point_start`, `point_end`: values at t = 0 and t = 1.
/// - `tangent_start`, `tangent_end`: derivatives at the two ends, already
///   scaled to the unit parameter (slope per second times segment length).
/// - `t`: parameter in [0, 1].
///
/// # Formula
/// H(t) = h00(t) * P0 + h10(t) * M0 + h01(t) * P1 + h11(t) * M1,
/// evaluated as P0 + h01(t) * (P1 - P0) + ... since h00 = 1 - h01, which
/// keeps a flat segment exactly at its value.
#[inline]
pub fn hermite_spline<T>(point_start: T, point_end: T, tangent_start: T, tangent_end: T, t: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    point_start
        + (point_end - point_start) * hermite_basis_h01(t)
        + tangent_start * hermite_basis_h10(t)
        + tangent_end * hermite_basis_h11(t)
}

/// Slope (value per second) of the auto tangent at `key`.
///
/// Interior keys take the unweighted mean of the slopes of the segments on
/// either side; the first and last key take the slope of their only segment,
/// so a two-key curve is linear. Zero-length segments contribute slope 0.
#[inline]
pub fn smooth_tangent(prev: Option<(f32, f32)>, key: (f32, f32), next: Option<(f32, f32)>) -> f32 {
    let left = prev.map(|p| segment_slope(p, key));
    let right = next.map(|n| segment_slope(key, n));
    match (left, right) {
        (Some(l), Some(r)) => 0.5 * (l + r),
        (Some(m), None) | (None, Some(m)) => m,
        (None, None) => 0.0,
    }
}

#[inline]
fn segment_slope((t0, v0): (f32, f32), (t1, v1): (f32, f32)) -> f32 {
    let dt = t1 - t0;
    if dt > 0.0 {
        (v1 - v0) / dt
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermite_hits_endpoints_exactly() {
        assert_eq!(hermite_spline(2.0f32, 7.0, 3.0, -4.0, 0.0), 2.0);
        assert_eq!(hermite_spline(2.0f32, 7.0, 3.0, -4.0, 1.0), 7.0);
    }

    #[test]
    fn hermite_with_flat_tangents_is_smoothstep() {
        let mid = hermite_spline(0.0f32, 1.0, 0.0, 0.0, 0.5);
        assert!((mid - 0.5).abs() < 1e-6);
        let quarter = hermite_spline(0.0f32, 1.0, 0.0, 0.0, 0.25);
        assert!((quarter - 0.15625).abs() < 1e-6);
    }

    #[test]
    fn end_keys_take_their_segment_slope() {
        assert_eq!(smooth_tangent(None, (0.0, 5.0), Some((1.0, 7.0))), 2.0);
        assert_eq!(smooth_tangent(Some((0.0, 5.0)), (1.0, 7.0), None), 2.0);
        assert_eq!(smooth_tangent(None, (0.0, 1.0), None), 0.0);
    }

    #[test]
    fn interior_slope_is_unweighted_mean() {
        // Segments of length 1 and 2: mean of 1 and 0, not the secant 1/3.
        assert_eq!(smooth_tangent(Some((0.0, 0.0)), (1.0, 1.0), Some((3.0, 1.0))), 0.5);
        assert_eq!(smooth_tangent(Some((1.0, 0.0)), (1.0, 4.0), None), 0.0);
    }
}
