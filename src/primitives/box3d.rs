//! Box primitive SDF
//!
//! # Optimizations
//! - **Branchless Logic**: max/min composition of interior and exterior distance.
//! - **Forced Inlining**: Zero call overhead.

use crate::simd::Vec3x4;
use glam::Vec3;
use wide::f32x4;

/// Signed distance to an axis-aligned box
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `center` - Box center
/// * `half_extents` - Half-size in each dimension
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_box3d(point: Vec3, center: Vec3, half_extents: Vec3) -> f32 {
    let dx = (point.x - center.x).abs() - half_extents.x;
    let dy = (point.y - center.y).abs() - half_extents.y;
    let dz = (point.z - center.z).abs() - half_extents.z;

    let dx_pos = dx.max(0.0);
    let dy_pos = dy.max(0.0);
    let dz_pos = dz.max(0.0);
    let outside = (dx_pos * dx_pos + dy_pos * dy_pos + dz_pos * dz_pos).sqrt();

    // Least-negative axis violation, clamped to <= 0
    let inside = dx.max(dy.max(dz)).min(0.0);

    outside + inside
}

/// Signed distance to an axis-aligned box, 4 points at once
#[inline(always)]
pub fn sdf_box3d_x4(point: Vec3x4, center: Vec3x4, bx: f32x4, by: f32x4, bz: f32x4) -> f32x4 {
    let zero = f32x4::ZERO;
    let dx = (point.x - center.x).abs() - bx;
    let dy = (point.y - center.y).abs() - by;
    let dz = (point.z - center.z).abs() - bz;

    let dx_pos = dx.max(zero);
    let dy_pos = dy.max(zero);
    let dz_pos = dz.max(zero);
    let outside = (dx_pos * dx_pos + dy_pos * dy_pos + dz_pos * dz_pos).sqrt();

    let inside = dx.max(dy.max(dz)).min(zero);

    outside + inside
}
