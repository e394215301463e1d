//! Hard union for SDFs
//!
//! # Optimizations
//! - **Forced Inlining**: `#[inline(always)]` guarantees no call overhead.

use wide::f32x4;

/// Union of two SDFs (minimum distance)
#[inline(always)]
pub fn sdf_union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

/// Union of two SDFs, 4 lanes at once
#[inline(always)]
pub fn sdf_union_x4(d1: f32x4, d2: f32x4) -> f32x4 {
    d1.min(d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        assert_eq!(sdf_union(1.0, 2.0), 1.0);
        assert_eq!(sdf_union(-1.0, 2.0), -1.0);
    }

    #[test]
    fn test_union_x4() {
        let r = sdf_union_x4(f32x4::new([1.0, 2.0, -3.0, 0.0]), f32x4::new([2.0, 1.0, 0.0, 0.0]));
        assert_eq!(r.to_array(), [1.0, 1.0, -3.0, 0.0]);
    }
}
