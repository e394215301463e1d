//! SoA (Structure of Arrays) buffers shared with the host
//!
//! Every per-pixel buffer is a set of fixed-capacity `f32` planes allocated
//! once when the renderer is built. Passes overwrite a prefix of the planes
//! and never reallocate.
//!
//! # Memory Layout
//!
//! ```text
//! X: [x0,x1,x2,x3, x4,x5,x6,x7, ...]  ← one f32x4 per batch
//! Y: [y0,y1,y2,y3, y4,y5,y6,y7, ...]
//! Z: [z0,z1,z2,z3, z4,z5,z6,z7, ...]
//! ```
//!
//! Batches of [`LANES`] start at multiples of 4, so a batch load never
//! straddles two pixels' worth of shuffles.

use crate::constants::LANES;
use crate::simd::Vec3x4;
use glam::Vec3;

/// Three fixed-capacity coordinate planes
#[derive(Debug, Clone)]
pub struct SoAVec3 {
    /// X plane
    pub x: Box<[f32]>,
    /// Y plane
    pub y: Box<[f32]>,
    /// Z plane
    pub z: Box<[f32]>,
}

impl SoAVec3 {
    /// Allocate zeroed planes
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            x: vec![0.0; capacity].into_boxed_slice(),
            y: vec![0.0; capacity].into_boxed_slice(),
            z: vec![0.0; capacity].into_boxed_slice(),
        }
    }

    /// Number of entries each plane holds
    #[inline]
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// Entry at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        if index < self.capacity() {
            Some(Vec3::new(self.x[index], self.y[index], self.z[index]))
        } else {
            None
        }
    }

    /// Overwrite entry `index`; out-of-range writes are dropped
    #[inline]
    pub fn set(&mut self, index: usize, v: Vec3) {
        if index < self.capacity() {
            self.x[index] = v.x;
            self.y[index] = v.y;
            self.z[index] = v.z;
        }
    }

    /// Load the batch starting at `base`
    ///
    /// Lanes past the capacity read as zero.
    #[inline]
    pub fn load_x4(&self, base: usize) -> Vec3x4 {
        let mut x = [0.0; LANES];
        let mut y = [0.0; LANES];
        let mut z = [0.0; LANES];
        let end = (base + LANES).min(self.capacity());
        if base < end {
            let n = end - base;
            x[..n].copy_from_slice(&self.x[base..end]);
            y[..n].copy_from_slice(&self.y[base..end]);
            z[..n].copy_from_slice(&self.z[base..end]);
        }
        Vec3x4::new(x, y, z)
    }

    /// Store the first `lanes` lanes of `v` at `base`, clipped to capacity
    #[inline]
    pub fn store_x4(&mut self, base: usize, v: Vec3x4, lanes: usize) {
        let (x, y, z) = v.to_array();
        let end = (base + lanes.min(LANES)).min(self.capacity());
        if base < end {
            let n = end - base;
            self.x[base..end].copy_from_slice(&x[..n]);
            self.y[base..end].copy_from_slice(&y[..n]);
            self.z[base..end].copy_from_slice(&z[..n]);
        }
    }
}

/// Ray origins and directions, one entry per pixel
///
/// Index `row * width + col`. Only the first [`RayBuffer::count`] entries
/// belong to the current frame.
#[derive(Debug, Clone)]
pub struct RayBuffer {
    /// Ray origins
    pub origin: SoAVec3,
    /// Unit ray directions
    pub direction: SoAVec3,
    count: usize,
}

impl RayBuffer {
    /// Allocate a buffer for `capacity` rays
    pub fn new(capacity: usize) -> Self {
        Self {
            origin: SoAVec3::zeroed(capacity),
            direction: SoAVec3::zeroed(capacity),
            count: 0,
        }
    }

    /// Maximum number of rays
    #[inline]
    pub fn capacity(&self) -> usize {
        self.origin.capacity()
    }

    /// Rays generated for the current frame
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Set the current ray count, clamped to capacity
    #[inline]
    pub fn set_count(&mut self, count: usize) {
        self.count = count.min(self.capacity());
    }

    /// Number of 4-lane batches covering the current rays
    #[inline]
    pub fn batch_count(&self) -> usize {
        align_up(self.count, LANES) / LANES
    }
}

/// Shaded linear RGB, one entry per pixel
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    rgb: SoAVec3,
}

impl PixelBuffer {
    /// Allocate a black buffer for `capacity` pixels
    pub fn new(capacity: usize) -> Self {
        Self {
            rgb: SoAVec3::zeroed(capacity),
        }
    }

    /// Number of pixels the buffer holds
    #[inline]
    pub fn capacity(&self) -> usize {
        self.rgb.capacity()
    }

    /// Red plane
    #[inline]
    pub fn r(&self) -> &[f32] {
        &self.rgb.x
    }

    /// Green plane
    #[inline]
    pub fn g(&self) -> &[f32] {
        &self.rgb.y
    }

    /// Blue plane
    #[inline]
    pub fn b(&self) -> &[f32] {
        &self.rgb.z
    }

    /// All three planes, mutable
    #[inline]
    pub fn planes_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (&mut self.rgb.x, &mut self.rgb.y, &mut self.rgb.z)
    }

    /// Color at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.rgb.get(index)
    }

    /// Overwrite the color at `index`
    #[inline]
    pub fn set(&mut self, index: usize, color: Vec3) {
        self.rgb.set(index, color);
    }

    /// Store the first `lanes` colors of a batch
    #[inline]
    pub fn store_x4(&mut self, base: usize, color: Vec3x4, lanes: usize) {
        self.rgb.store_x4(base, color, lanes);
    }
}

/// Round up to the nearest multiple
#[inline]
pub(crate) const fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soa_get_set() {
        let mut soa = SoAVec3::zeroed(8);
        soa.set(3, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(soa.get(3), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(soa.get(8), None);
        // Out-of-range write is a no-op
        soa.set(100, Vec3::ONE);
    }

    #[test]
    fn test_soa_batch_load_store() {
        let mut soa = SoAVec3::zeroed(8);
        for i in 0..8 {
            soa.set(i, Vec3::new(i as f32, (i * 10) as f32, (i * 100) as f32));
        }

        let v = soa.load_x4(4);
        let (x, y, z) = v.to_array();
        assert_eq!(x, [4.0, 5.0, 6.0, 7.0]);
        assert_eq!(y, [40.0, 50.0, 60.0, 70.0]);
        assert_eq!(z, [400.0, 500.0, 600.0, 700.0]);

        soa.store_x4(0, Vec3x4::splat(Vec3::splat(-1.0)), 2);
        assert_eq!(soa.get(1), Some(Vec3::splat(-1.0)));
        assert_eq!(soa.get(2), Some(Vec3::new(2.0, 20.0, 200.0)));
    }

    #[test]
    fn test_soa_load_past_capacity() {
        let mut soa = SoAVec3::zeroed(6);
        soa.set(5, Vec3::ONE);
        let (x, _, _) = soa.load_x4(4).to_array();
        assert_eq!(x, [0.0, 1.0, 0.0, 0.0]);
        let (x, _, _) = soa.load_x4(64).to_array();
        assert_eq!(x, [0.0; 4]);
    }

    #[test]
    fn test_ray_buffer_batches() {
        let mut rays = RayBuffer::new(16);
        assert_eq!(rays.batch_count(), 0);
        rays.set_count(5);
        assert_eq!(rays.batch_count(), 2);
        rays.set_count(1000);
        assert_eq!(rays.count(), 16);
        assert_eq!(rays.batch_count(), 4);
    }

    #[test]
    fn test_pixel_planes() {
        let mut px = PixelBuffer::new(4);
        px.set(2, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(px.r()[2], 0.1);
        assert_eq!(px.g()[2], 0.2);
        assert_eq!(px.b()[2], 0.3);
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 4), 0);
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(4, 4), 4);
        assert_eq!(align_up(9, 4), 12);
    }
}
