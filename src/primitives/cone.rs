//! Cone SDF
//!
//! Cone along Y with its base disk (radius `r`) at the center height and its
//! apex `h` above it. Three regions are selected by the query's Y offset:
//! - `dy < 0`: distance to the base disk
//! - `dy > h`: distance to the apex point
//! - otherwise: radial excess over the cone's radius at that height, scaled by
//!   the cosine of the half-angle
//!
//! `h` and `sqrt(r² + h²)` are divisors and are not guarded.

use crate::simd::{select, Vec3x4};
use glam::Vec3;
use wide::{f32x4, CmpGt, CmpLt};

/// Signed distance to a cone
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `center` - Center of the base disk
/// * `radius` - Base radius
/// * `height` - Height of the apex above the base
#[inline(always)]
pub fn sdf_cone(point: Vec3, center: Vec3, radius: f32, height: f32) -> f32 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let dz = point.z - center.z;

    let q = (dx * dx + dz * dz).sqrt();

    if dy > height {
        let dy_h = dy - height;
        return (q * q + dy_h * dy_h).sqrt();
    }
    if dy < 0.0 {
        let base_radial = (q - radius).max(0.0);
        let base_axial = 0.0 - dy;
        return (base_radial * base_radial + base_axial * base_axial).sqrt();
    }

    let cone_len = (radius * radius + height * height).sqrt();
    let cos_a = height / cone_len;
    let t = (dy / height).min(1.0).max(0.0);
    let r_at_y = radius * (1.0 - t);
    (q - r_at_y) * cos_a
}

/// Signed distance to a cone, 4 points at once
///
/// All three regions are evaluated for every lane, then selected.
#[inline(always)]
pub fn sdf_cone_x4(point: Vec3x4, center: Vec3x4, radius: f32x4, height: f32x4) -> f32x4 {
    let zero = f32x4::ZERO;
    let one = f32x4::ONE;

    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let dz = point.z - center.z;

    let q = (dx * dx + dz * dz).sqrt();

    let cone_len = (radius * radius + height * height).sqrt();
    let cos_a = height / cone_len;
    let t = (dy / height).min(one).max(zero);
    let r_at_y = radius * (one - t);
    let cone_dist = (q - r_at_y) * cos_a;

    let below = dy.cmp_lt(zero);
    let base_radial = (q - radius).max(zero);
    let base_axial = zero - dy;
    let base_dist = (base_radial * base_radial + base_axial * base_axial).sqrt();

    let above = dy.cmp_gt(height);
    let dy_h = dy - height;
    let tip_dist = (q * q + dy_h * dy_h).sqrt();

    let result = select(below, base_dist, cone_dist);
    select(above, tip_dist, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_axis_inside() {
        let d = sdf_cone(Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!(d < 0.0, "Axis point should be inside, got {}", d);
    }

    #[test]
    fn test_cone_apex() {
        let d = sdf_cone(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!(d.abs() < 0.001, "Apex should be on surface, got {}", d);
    }

    #[test]
    fn test_cone_above_apex() {
        let d = sdf_cone(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!((d - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_cone_below_base() {
        // Straight below the base disk
        let d = sdf_cone(Vec3::new(0.5, -2.0, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!((d - 2.0).abs() < 0.0001);
        // Below and outside the rim
        let d = sdf_cone(Vec3::new(4.0, -3.0, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!((d - (9.0f32 + 9.0).sqrt()).abs() < 0.0001);
    }

    #[test]
    fn test_cone_base_rim() {
        let d = sdf_cone(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 1.0, 1.0);
        assert!(d.abs() < 0.0001);
    }

    #[test]
    fn test_cone_degenerate_is_not_guarded() {
        // r = h = 0: cos_a = 0/0, the result propagates NaN on the base plane
        let d = sdf_cone(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 0.0, 0.0);
        assert!(d.is_nan());
    }
}
