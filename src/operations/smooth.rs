//! Polynomial smooth union
//!
//! # Optimizations
//! - **Branchless**: no `k <= 0` check. The caller guarantees `k > 0`.
//! - **Forced Inlining**: `#[inline(always)]` guarantees no call overhead.
//!
//! With `k == 0` the blend weight saturates to 0 or 1 and the result
//! degenerates to the hard minimum; with `k < 0` the result is meaningless.

use wide::f32x4;

/// Smooth union of two SDFs
///
/// `h = clamp(0.5 + 0.5 * (d2 - d1) / k, 0, 1)`, result
/// `d2 + (d1 - d2) * h - k * h * (1 - h)`.
#[inline(always)]
pub fn sdf_smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let diff = d2 - d1;
    let h = (0.5 + 0.5 * (diff / k)).min(1.0).max(0.0);
    d2 + ((d1 - d2) * h - k * (h * (1.0 - h)))
}

/// Smooth union, 4 lanes at once
#[inline(always)]
pub fn sdf_smooth_union_x4(d1: f32x4, d2: f32x4, k: f32x4) -> f32x4 {
    let half = f32x4::HALF;
    let one = f32x4::ONE;
    let diff = d2 - d1;
    let h = (half + half * (diff / k)).min(one).max(f32x4::ZERO);
    d2 + ((d1 - d2) * h - k * (h * (one - h)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_union_below_min() {
        let result = sdf_smooth_union(1.0, 3.0, 0.5);
        assert!(result <= 1.0);
    }

    #[test]
    fn test_smooth_union_symmetry() {
        let (d1, d2, k) = (0.5, 0.8, 0.3);
        assert!((sdf_smooth_union(d1, d2, k) - sdf_smooth_union(d2, d1, k)).abs() < 0.0001);
    }

    #[test]
    fn test_smooth_union_equal_inputs() {
        // Deepest blend: h = 0.5, so the result dips by k / 4
        let r = sdf_smooth_union(1.0, 1.0, 0.4);
        assert!((r - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_union_far_apart_is_min() {
        assert_eq!(sdf_smooth_union(1.0, 5.0, 0.5), 1.0);
        assert_eq!(sdf_smooth_union(5.0, 1.0, 0.5), 1.0);
    }

    #[test]
    fn test_zero_k_is_hard_min() {
        // (d2 - d1) / 0 = ±inf, so h saturates and the blend term vanishes
        assert_eq!(sdf_smooth_union(0.25, 0.75, 0.0), 0.25);
        assert_eq!(sdf_smooth_union(0.75, 0.25, 0.0), 0.25);
    }

    #[test]
    fn test_smooth_union_x4_matches_scalar() {
        let d1 = [0.1, -0.4, 2.0, 0.3];
        let d2 = [0.2, 0.1, -1.0, 0.3];
        let k = 0.5;
        let r = sdf_smooth_union_x4(f32x4::new(d1), f32x4::new(d2), f32x4::splat(k)).to_array();
        for i in 0..4 {
            assert!((r[i] - sdf_smooth_union(d1[i], d2[i], k)).abs() < 1e-6);
        }
    }
}
