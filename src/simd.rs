//! 4-wide SIMD types and lane selection
//!
//! `Vec3x4` packs four 3D vectors in Structure-of-Arrays form so a batch of
//! four rays (or four query points) maps onto one `f32x4` per axis:
//! - x: [x0, x1, x2, x3]
//! - y: [y0, y1, y2, y3]
//! - z: [z0, z1, z2, z3]
//!
//! Lane masks are `f32x4` values produced by the `wide` comparison traits
//! (all bits set = true, all bits clear = false). [`select`] is the only way the
//! renderer makes per-lane decisions, so inactive lanes are frozen without
//! branching.

use glam::Vec3;
use wide::{f32x4, CmpGt};

/// Lane-wise `if mask { a } else { b }`
#[inline(always)]
pub fn select(mask: f32x4, a: f32x4, b: f32x4) -> f32x4 {
    mask.blend(a, b)
}

/// Lanes set in `a` and clear in `b`
#[inline(always)]
pub fn and_not(a: f32x4, b: f32x4) -> f32x4 {
    b.blend(f32x4::ZERO, a)
}

/// Build a lane mask from four booleans
#[inline]
pub fn lane_mask(lanes: [bool; 4]) -> f32x4 {
    let ones = lanes.map(|on| if on { 1.0 } else { 0.0 });
    f32x4::new(ones).cmp_gt(f32x4::ZERO)
}

/// Mask with every lane set
#[inline]
pub fn mask_all() -> f32x4 {
    lane_mask([true; 4])
}

/// Unpack a lane mask into booleans
#[inline]
pub fn mask_lanes(mask: f32x4) -> [bool; 4] {
    let bits = mask.move_mask();
    [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0]
}

/// Four 3D vectors packed for SIMD processing
#[derive(Clone, Copy, Debug)]
pub struct Vec3x4 {
    /// X components (4-wide)
    pub x: f32x4,
    /// Y components (4-wide)
    pub y: f32x4,
    /// Z components (4-wide)
    pub z: f32x4,
}

impl Vec3x4 {
    /// Create from raw x, y, z arrays
    #[inline]
    pub fn new(x: [f32; 4], y: [f32; 4], z: [f32; 4]) -> Self {
        Vec3x4 {
            x: f32x4::new(x),
            y: f32x4::new(y),
            z: f32x4::new(z),
        }
    }

    /// Create from 4 separate Vec3 values
    #[inline]
    pub fn from_vecs(v: [Vec3; 4]) -> Self {
        Vec3x4::new(
            [v[0].x, v[1].x, v[2].x, v[3].x],
            [v[0].y, v[1].y, v[2].y, v[3].y],
            [v[0].z, v[1].z, v[2].z, v[3].z],
        )
    }

    /// Create with all lanes set to the same vector
    #[inline]
    pub fn splat(v: Vec3) -> Self {
        Vec3x4 {
            x: f32x4::splat(v.x),
            y: f32x4::splat(v.y),
            z: f32x4::splat(v.z),
        }
    }

    /// Add the same offset to every lane
    #[inline]
    pub fn offset(self, dx: f32, dy: f32, dz: f32) -> Self {
        Vec3x4 {
            x: self.x + f32x4::splat(dx),
            y: self.y + f32x4::splat(dy),
            z: self.z + f32x4::splat(dz),
        }
    }

    /// Squared length, summed as `(x² + y²) + z²`
    #[inline]
    pub fn length_squared(self) -> f32x4 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length of all 4 vectors
    #[inline]
    pub fn length(self) -> f32x4 {
        self.length_squared().sqrt()
    }

    /// Dot product with another Vec3x4
    #[inline]
    pub fn dot(self, other: Self) -> f32x4 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Dot product with the same vector on every lane
    #[inline]
    pub fn dot_splat(self, v: Vec3) -> f32x4 {
        self.x * f32x4::splat(v.x) + self.y * f32x4::splat(v.y) + self.z * f32x4::splat(v.z)
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Vec3x4 {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// Lane-wise select between two vectors
    #[inline]
    pub fn select(mask: f32x4, a: Self, b: Self) -> Self {
        Vec3x4 {
            x: select(mask, a.x, b.x),
            y: select(mask, a.y, b.y),
            z: select(mask, a.z, b.z),
        }
    }

    /// Extract a single lane
    #[inline]
    pub fn lane(self, i: usize) -> Vec3 {
        let (x, y, z) = self.to_array();
        Vec3::new(x[i], y[i], z[i])
    }

    /// Extract results back to arrays
    #[inline]
    pub fn to_array(self) -> ([f32; 4], [f32; 4], [f32; 4]) {
        (self.x.to_array(), self.y.to_array(), self.z.to_array())
    }
}

impl std::ops::Add for Vec3x4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3x4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3x4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3x4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32x4> for Vec3x4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32x4) -> Self {
        Vec3x4 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Component-wise product
impl std::ops::Mul for Vec3x4 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        Vec3x4 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::CmpLt;

    #[test]
    fn test_vec3x4_length() {
        let v = Vec3x4::splat(Vec3::new(3.0, 4.0, 0.0));
        for l in v.length().to_array() {
            assert!((l - 5.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_vec3x4_lane_roundtrip() {
        let vecs = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 3.0),
        ];
        let v = Vec3x4::from_vecs(vecs);
        for (i, expected) in vecs.iter().enumerate() {
            assert_eq!(v.lane(i), *expected);
        }
    }

    #[test]
    fn test_select_per_lane() {
        let mask = lane_mask([true, false, true, false]);
        let r = select(mask, f32x4::splat(1.0), f32x4::splat(2.0));
        assert_eq!(r.to_array(), [1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_and_not() {
        let a = lane_mask([true, true, false, false]);
        let b = lane_mask([true, false, true, false]);
        assert_eq!(mask_lanes(and_not(a, b)), [false, true, false, false]);
    }

    #[test]
    fn test_comparison_masks() {
        let d = f32x4::new([0.0, 0.5, 1.0, 2.0]);
        let m = d.cmp_lt(f32x4::splat(0.75));
        assert_eq!(mask_lanes(m), [true, true, false, false]);
        assert!(m.any());
        assert!(!m.all());
        assert!(mask_all().all());
    }
}
