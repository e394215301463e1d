//! Surface normals by the tetrahedron technique
//!
//! Four scene samples at the corners of a tetrahedron around the point:
//! `k0 = (+,+,-)`, `k1 = (+,-,+)`, `k2 = (-,+,+)`, `k3 = (-,-,-)`, each scaled
//! by [`NORMAL_EPS`]. The gradient is
//! `(d0 + d1 - d2 - d3, d0 + d2 - d1 - d3, d1 + d2 - d0 - d3)`.
//!
//! # Optimizations
//! - **4 Evaluations**: one fewer than forward differences, two fewer than
//!   central differences.
//!
//! A gradient of exactly zero length (inside a symmetric degenerate region)
//! returns `(0, 1, 0)` instead of dividing by zero.

use crate::constants::NORMAL_EPS;
use crate::eval::{scene_sdf, scene_sdf_x4};
use crate::scene::Scene;
use crate::simd::{select, Vec3x4};
use glam::Vec3;
use wide::{f32x4, CmpGt};

/// Scene samples taken per normal
pub const NORMAL_SAMPLES: u32 = 4;

/// Unit surface normal of the scene at a point
pub fn normal(scene: &Scene, point: Vec3) -> Vec3 {
    let e = NORMAL_EPS;
    let d0 = scene_sdf(scene, point + Vec3::new(e, e, -e));
    let d1 = scene_sdf(scene, point + Vec3::new(e, -e, e));
    let d2 = scene_sdf(scene, point + Vec3::new(-e, e, e));
    let d3 = scene_sdf(scene, point + Vec3::new(-e, -e, -e));

    let grad = Vec3::new(
        (d0 + d1) - (d2 + d3),
        (d0 + d2) - (d1 + d3),
        (d1 + d2) - (d0 + d3),
    );

    let len_sq = grad.length_squared();
    if len_sq > 0.0 {
        grad * (1.0 / len_sq.sqrt())
    } else {
        Vec3::Y
    }
}

/// Unit surface normals of the scene at 4 points
pub fn normal_x4(scene: &Scene, point: Vec3x4) -> Vec3x4 {
    let e = NORMAL_EPS;
    let d0 = scene_sdf_x4(scene, point.offset(e, e, -e));
    let d1 = scene_sdf_x4(scene, point.offset(e, -e, e));
    let d2 = scene_sdf_x4(scene, point.offset(-e, e, e));
    let d3 = scene_sdf_x4(scene, point.offset(-e, -e, -e));

    let grad = Vec3x4 {
        x: (d0 + d1) - (d2 + d3),
        y: (d0 + d2) - (d1 + d3),
        z: (d1 + d2) - (d0 + d3),
    };

    let len_sq = grad.length_squared();
    let valid = len_sq.cmp_gt(f32x4::ZERO);
    // Zero-length lanes divide by one and are replaced below
    let inv = f32x4::ONE / select(valid, len_sq, f32x4::ONE).sqrt();
    let n = grad * inv;

    Vec3x4::select(valid, n, Vec3x4::splat(Vec3::Y))
}
