//! Core value types: shapes, blend modes, bounds and lights
//!
//! Everything here is plain `Copy` data addressed by index from fixed tables.
//! Shapes have no identity beyond their slot in the scene's shape table.

use crate::primitives::ShapeKind;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One entry of the scene's shape table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    /// Primitive kind
    pub kind: ShapeKind,
    /// Center (base center for cones)
    pub position: Vec3,
    /// Kind-dependent parameters, see [`ShapeKind`]
    pub params: [f32; 4],
    /// Surface color (linear RGB)
    pub color: Vec3,
    /// Blend group; out-of-range values belong to group 0
    #[serde(default)]
    pub group: u8,
}

impl Shape {
    /// Sphere of the given radius
    pub fn sphere(position: Vec3, radius: f32) -> Self {
        Shape {
            kind: ShapeKind::Sphere,
            position,
            params: [radius, 0.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Axis-aligned box with the given half extents
    pub fn box3d(position: Vec3, half_extents: Vec3) -> Self {
        Shape {
            kind: ShapeKind::Box,
            position,
            params: [half_extents.x, half_extents.y, half_extents.z, 0.0],
            ..Default::default()
        }
    }

    /// Cylinder along X
    pub fn cylinder_x(position: Vec3, radius: f32, half_height: f32) -> Self {
        Shape {
            kind: ShapeKind::CylinderX,
            position,
            params: [radius, half_height, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Cylinder along Y
    pub fn cylinder_y(position: Vec3, radius: f32, half_height: f32) -> Self {
        Shape {
            kind: ShapeKind::CylinderY,
            position,
            params: [radius, half_height, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Cone with its base disk at `position` and apex `height` above it
    pub fn cone(position: Vec3, base_radius: f32, height: f32) -> Self {
        Shape {
            kind: ShapeKind::Cone,
            position,
            params: [base_radius, height, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Set the surface color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Assign to a blend group
    pub fn in_group(mut self, group: u8) -> Self {
        self.group = group;
        self
    }

    /// Bounding box of the shape alone (no smoothing padding)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.position, self.kind.extents(&self.params))
    }
}

/// How the shapes of one group combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlendMode {
    /// Arithmetic minimum
    #[default]
    HardUnion = 0,
    /// Polynomial smooth union with the scene's `k`
    SmoothUnion = 1,
}

impl BlendMode {
    /// Decode a raw mode byte; any non-zero value is a smooth union
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        if value == 0 {
            BlendMode::HardUnion
        } else {
            BlendMode::SmoothUnion
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if point is inside
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Expand to include another AABB
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow every face outward by `amount`
    pub fn padded(&self, amount: f32) -> Aabb {
        Aabb {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

/// The single directional light plus the ambient term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Unit vector pointing from the surface toward the light
    pub direction: Vec3,
    /// Diffuse intensity
    pub intensity: f32,
    /// Ambient weight added to every lit surface
    pub ambient: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            direction: Vec3::new(0.577, 0.577, -0.577),
            intensity: 1.0,
            ambient: 0.1,
        }
    }
}

/// Point light with a soft inverse-square-like falloff
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Falloff scale: attenuation is `1 / (1 + (dist / radius)²)`
    pub radius: f32,
}

impl PointLight {
    /// Create a point light
    pub fn new(position: Vec3, color: Vec3, intensity: f32, radius: f32) -> Self {
        PointLight {
            position,
            color,
            intensity,
            radius,
        }
    }
}
