//! Capped cylinder SDFs along the X and Y axes
//!
//! Both variants compose a radial distance (from the axis) with an axial
//! distance (from the two end caps) the same way the box composes its axes.
//!
//! # Optimizations
//! - **Branchless Capped Cylinder**: max/min selection, no if/else chain.
//! - **Forced Inlining**: Zero call overhead.

use crate::simd::Vec3x4;
use glam::Vec3;
use wide::f32x4;

#[inline(always)]
fn compose(d_radial: f32, d_axial: f32) -> f32 {
    let r_pos = d_radial.max(0.0);
    let a_pos = d_axial.max(0.0);
    let outside = (r_pos * r_pos + a_pos * a_pos).sqrt();
    let inside = d_radial.max(d_axial).min(0.0);
    outside + inside
}

#[inline(always)]
fn compose_x4(d_radial: f32x4, d_axial: f32x4) -> f32x4 {
    let zero = f32x4::ZERO;
    let r_pos = d_radial.max(zero);
    let a_pos = d_axial.max(zero);
    let outside = (r_pos * r_pos + a_pos * a_pos).sqrt();
    let inside = d_radial.max(d_axial).min(zero);
    outside + inside
}

/// Signed distance to a cylinder whose axis runs along X
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `center` - Cylinder center
/// * `radius` - Cylinder radius
/// * `half_height` - Half of the cylinder length along X
#[inline(always)]
pub fn sdf_cylinder_x(point: Vec3, center: Vec3, radius: f32, half_height: f32) -> f32 {
    let dy = point.y - center.y;
    let dz = point.z - center.z;
    let d_radial = (dy * dy + dz * dz).sqrt() - radius;
    let d_axial = (point.x - center.x).abs() - half_height;
    compose(d_radial, d_axial)
}

/// Signed distance to an X-axis cylinder, 4 points at once
#[inline(always)]
pub fn sdf_cylinder_x_x4(point: Vec3x4, center: Vec3x4, radius: f32x4, half_height: f32x4) -> f32x4 {
    let dy = point.y - center.y;
    let dz = point.z - center.z;
    let d_radial = (dy * dy + dz * dz).sqrt() - radius;
    let d_axial = (point.x - center.x).abs() - half_height;
    compose_x4(d_radial, d_axial)
}

/// Signed distance to a cylinder whose axis runs along Y
#[inline(always)]
pub fn sdf_cylinder_y(point: Vec3, center: Vec3, radius: f32, half_height: f32) -> f32 {
    let dx = point.x - center.x;
    let dz = point.z - center.z;
    let d_radial = (dx * dx + dz * dz).sqrt() - radius;
    let d_axial = (point.y - center.y).abs() - half_height;
    compose(d_radial, d_axial)
}

/// Signed distance to a Y-axis cylinder, 4 points at once
#[inline(always)]
pub fn sdf_cylinder_y_x4(point: Vec3x4, center: Vec3x4, radius: f32x4, half_height: f32x4) -> f32x4 {
    let dx = point.x - center.x;
    let dz = point.z - center.z;
    let d_radial = (dx * dx + dz * dz).sqrt() - radius;
    let d_axial = (point.y - center.y).abs() - half_height;
    compose_x4(d_radial, d_axial)
}
