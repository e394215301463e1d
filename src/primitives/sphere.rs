//! Sphere primitive SDF
//!
//! # Optimizations
//! - **Forced Inlining**: Zero call overhead.
//! - **Matched Lanes**: The 4-lane form performs the same operations in the
//!   same order as the scalar form.

use crate::simd::Vec3x4;
use glam::Vec3;
use wide::f32x4;

/// Signed distance to a sphere
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `center` - Sphere center
/// * `radius` - Sphere radius
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_sphere(point: Vec3, center: Vec3, radius: f32) -> f32 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let dz = point.z - center.z;
    (dx * dx + dy * dy + dz * dz).sqrt() - radius
}

/// Signed distance to a sphere, 4 points at once
#[inline(always)]
pub fn sdf_sphere_x4(point: Vec3x4, center: Vec3x4, radius: f32x4) -> f32x4 {
    (point - center).length() - radius
}
