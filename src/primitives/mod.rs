//! Primitive SDF shapes
//!
//! Every primitive exists twice: a scalar form taking a `Vec3` and a 4-lane
//! form taking a [`Vec3x4`]. The two forms perform the same arithmetic in the
//! same order, so a lane of the batched result equals the scalar result for
//! that lane's point.
//!
//! # Optimizations
//! - **Enum Dispatch**: `#[repr(u8)]` kind tag, matched once per shape.
//! - **Precomputed Splats**: batched dispatch takes parameters already
//!   broadcast to `f32x4` when the scene was committed.

mod box3d;
mod cone;
mod cylinder;
mod sphere;

pub use box3d::{sdf_box3d, sdf_box3d_x4};
pub use cone::{sdf_cone, sdf_cone_x4};
pub use cylinder::{sdf_cylinder_x, sdf_cylinder_x_x4, sdf_cylinder_y, sdf_cylinder_y_x4};
pub use sphere::{sdf_sphere, sdf_sphere_x4};

use crate::simd::Vec3x4;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use wide::f32x4;

/// Primitive type identifier for fast dispatch
///
/// The discriminants are the raw bytes the host writes into the shape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ShapeKind {
    /// Sphere, params `[radius]`
    #[default]
    Sphere = 0,
    /// Axis-aligned box, params `[half_x, half_y, half_z]`
    Box = 1,
    /// Cylinder along X, params `[radius, half_height]`
    CylinderX = 2,
    /// Cone along Y, params `[base_radius, height]`
    Cone = 3,
    /// Cylinder along Y, params `[radius, half_height]`
    CylinderY = 4,
}

impl ShapeKind {
    /// Decode a raw kind byte; unknown values evaluate as a box
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => ShapeKind::Sphere,
            2 => ShapeKind::CylinderX,
            3 => ShapeKind::Cone,
            4 => ShapeKind::CylinderY,
            _ => ShapeKind::Box,
        }
    }

    /// Raw kind byte
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Half-extents of the shape's bounding box around its position
    pub fn extents(self, params: &[f32; 4]) -> Vec3 {
        match self {
            ShapeKind::Sphere => Vec3::splat(params[0]),
            ShapeKind::CylinderX => Vec3::new(params[1], params[0], params[0]),
            ShapeKind::Cone | ShapeKind::CylinderY => Vec3::new(params[0], params[1], params[0]),
            ShapeKind::Box => Vec3::new(params[0], params[1], params[2]),
        }
    }
}

/// Evaluate one primitive at a single point
#[inline(always)]
pub fn eval_primitive(kind: ShapeKind, point: Vec3, center: Vec3, params: &[f32; 4]) -> f32 {
    match kind {
        ShapeKind::Sphere => sdf_sphere(point, center, params[0]),
        ShapeKind::CylinderX => sdf_cylinder_x(point, center, params[0], params[1]),
        ShapeKind::Cone => sdf_cone(point, center, params[0], params[1]),
        ShapeKind::CylinderY => sdf_cylinder_y(point, center, params[0], params[1]),
        ShapeKind::Box => sdf_box3d(point, center, Vec3::new(params[0], params[1], params[2])),
    }
}

/// Evaluate one primitive at 4 points
///
/// `params` holds the first three shape parameters, each splatted to 4 lanes.
#[inline(always)]
pub fn eval_primitive_x4(kind: ShapeKind, point: Vec3x4, center: Vec3x4, params: &[f32x4; 3]) -> f32x4 {
    match kind {
        ShapeKind::Sphere => sdf_sphere_x4(point, center, params[0]),
        ShapeKind::CylinderX => sdf_cylinder_x_x4(point, center, params[0], params[1]),
        ShapeKind::Cone => sdf_cone_x4(point, center, params[0], params[1]),
        ShapeKind::CylinderY => sdf_cylinder_y_x4(point, center, params[0], params[1]),
        ShapeKind::Box => sdf_box3d_x4(point, center, params[0], params[1], params[2]),
    }
}
