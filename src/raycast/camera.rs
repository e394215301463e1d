//! Pinhole camera and primary ray generation
//!
//! The camera is a plain basis: eye, forward, right, up and the half extents
//! of the image plane at unit distance. Forward, right and up are expected
//! to be unit length; nothing here renormalizes them.

use crate::math::sqrt_approx;
use crate::soa::RayBuffer;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pinhole camera basis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Ray origin for every pixel
    pub eye: Vec3,
    /// Viewing direction
    pub forward: Vec3,
    /// Image-plane X axis
    pub right: Vec3,
    /// Image-plane Y axis
    pub up: Vec3,
    /// Half width of the image plane at unit distance
    pub half_width: f32,
    /// Half height of the image plane at unit distance
    pub half_height: f32,
}

impl Default for Camera {
    /// Eye at `(0, 0, -5)` looking down +Z with a 90° square frustum
    fn default() -> Self {
        Camera {
            eye: Vec3::new(0.0, 0.0, -5.0),
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            half_width: 1.0,
            half_height: 1.0,
        }
    }
}

impl Camera {
    /// Build a basis looking from `eye` toward `target`
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect` - Image-plane width over height
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);

        let half_height = (fov_y * 0.5).tan();
        let half_width = half_height * aspect;

        Camera {
            eye,
            forward,
            right,
            up,
            half_width,
            half_height,
        }
    }

    /// Direction through normalized image coordinates `u`, `v` in `[-1, 1]`
    #[inline(always)]
    pub fn ray_direction(&self, u: f32, v: f32) -> Vec3 {
        let uw = u * self.half_width;
        let vh = v * self.half_height;
        let d = Vec3::new(
            self.forward.x + uw * self.right.x + vh * self.up.x,
            self.forward.y + uw * self.right.y + vh * self.up.y,
            self.forward.z + uw * self.right.z + vh * self.up.z,
        );
        let len = sqrt_approx(d.x * d.x + d.y * d.y + d.z * d.z);
        if len > 0.0 {
            d * (1.0 / len)
        } else {
            d
        }
    }
}

/// Fill `rays` with one primary ray per pixel of a `width × height` grid
///
/// Row 0 is the top of the image. A grid one pixel wide (or tall) samples
/// the center column (row). Rays beyond the buffer capacity are dropped.
///
/// # Returns
/// The number of rays written.
pub fn generate_rays(camera: &Camera, rays: &mut RayBuffer, width: u32, height: u32) -> usize {
    let capacity = rays.capacity();
    let count = (width as usize * height as usize).min(capacity);

    // Integer Division Exorcism: per-axis reciprocals hoisted out of the loop
    let inv_w = if width > 1 { 1.0 / (width - 1) as f32 } else { 0.0 };
    let inv_h = if height > 1 { 1.0 / (height - 1) as f32 } else { 0.0 };
    let u_bias = if width > 1 { 1.0 } else { 0.0 };
    let v_bias = if height > 1 { 1.0 } else { 0.0 };

    let mut idx = 0usize;
    'rows: for row in 0..height {
        let v = v_bias - 2.0 * row as f32 * inv_h;
        for col in 0..width {
            if idx >= capacity {
                break 'rows;
            }
            let u = 2.0 * col as f32 * inv_w - u_bias;
            rays.origin.set(idx, camera.eye);
            rays.direction.set(idx, camera.ray_direction(u, v));
            idx += 1;
        }
    }

    rays.set_count(count);
    log::trace!("generated {} rays for {}x{}", count, width, height);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let camera = Camera::default();
        let mut rays = RayBuffer::new(16);
        generate_rays(&camera, &mut rays, 3, 3);
        let d = rays.direction.get(4).unwrap_or_default();
        assert!((d - Vec3::Z).length() < 1e-6);
        assert_eq!(rays.origin.get(4), Some(camera.eye));
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::default();
        let mut rays = RayBuffer::new(16);
        generate_rays(&camera, &mut rays, 3, 3);
        // Top-left: u = -1, v = +1
        let d = rays.direction.get(0).unwrap_or_default();
        let expected = Vec3::new(-1.0, 1.0, 1.0).normalize();
        assert!((d - expected).length() < 1e-5);
        // Bottom-right: u = +1, v = -1
        let d = rays.direction.get(8).unwrap_or_default();
        let expected = Vec3::new(1.0, -1.0, 1.0).normalize();
        assert!((d - expected).length() < 1e-5);
    }

    #[test]
    fn test_unit_directions() {
        let camera = Camera::look_at(Vec3::new(2.0, 3.0, -4.0), Vec3::ZERO, Vec3::Y, 1.0, 2.0);
        let mut rays = RayBuffer::new(64);
        let n = generate_rays(&camera, &mut rays, 8, 8);
        for i in 0..n {
            let d = rays.direction.get(i).unwrap_or_default();
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_count_clamped_to_capacity() {
        let camera = Camera::default();
        let mut rays = RayBuffer::new(16);
        assert_eq!(generate_rays(&camera, &mut rays, 10, 10), 16);
        assert_eq!(rays.count(), 16);
    }

    #[test]
    fn test_single_pixel_grid_looks_forward() {
        let camera = Camera::default();
        let mut rays = RayBuffer::new(4);
        generate_rays(&camera, &mut rays, 1, 1);
        let d = rays.direction.get(0).unwrap_or_default();
        assert!((d - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_look_at_basis() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y, std::f32::consts::FRAC_PI_2, 1.0);
        assert!((camera.forward - Vec3::Z).length() < 1e-6);
        assert!((camera.right - Vec3::X).length() < 1e-6);
        assert!((camera.up - Vec3::Y).length() < 1e-6);
        assert!((camera.half_height - 1.0).abs() < 1e-6);
    }
}
