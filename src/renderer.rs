//! Host-facing renderer state
//!
//! [`RendererState`] owns every table and buffer of the pipeline. All buffers
//! are allocated in [`RendererState::new`] at their fixed capacities; no pass
//! allocates. A frame is a sequence of calls:
//!
//! ```text
//! set_scene → set_camera → generate_rays → compute_background
//!           → march_rays → composite | composite_blocks → upscale
//! ```
//!
//! Out-of-range input is clamped silently. The only failures in the crate
//! live in [`crate::io`].

use crate::composite::{self, CellBuffer, UpscaledCells};
use crate::constants::{MAX_GROUPS, MAX_POINT_LIGHTS, MAX_RAYS, MAX_SHAPES, MAX_UPSCALED};
use crate::math::{clampf, sin_approx, sqrt_approx};
use crate::metrics::{PerfMetrics, METRICS_LEN};
use crate::raycast::{self, Camera, DirectionalX4, MarchContext, MarchStats, PointLights};
use crate::scene::Scene;
use crate::soa::{PixelBuffer, RayBuffer};
use crate::types::{BlendMode, Lighting, PointLight, Shape};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Background base color before oscillation
const BACKGROUND_BASE: Vec3 = Vec3::new(0.02, 0.02, 0.03);

/// Animated background color at time `t`
///
/// Each channel is the base plus a slow sine, clamped to `[0, 1]`.
pub fn background_at(time: f32) -> Vec3 {
    let osc_r = sin_approx(time * 0.5) * 0.01;
    let osc_g = sin_approx(time * 0.3 + 1.0) * 0.01;
    let osc_b = sin_approx(time * 0.7 + 2.0) * 0.015;
    Vec3::new(
        clampf(BACKGROUND_BASE.x + osc_r, 0.0, 1.0),
        clampf(BACKGROUND_BASE.y + osc_g, 0.0, 1.0),
        clampf(BACKGROUND_BASE.z + osc_b, 0.0, 1.0),
    )
}

/// Cell encoder selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// One ramp glyph per pixel
    #[default]
    Ascii,
    /// Two pixels per cell with half blocks
    Blocks,
}

/// The whole renderer: scene, lights, camera, buffers and counters
#[derive(Debug, Clone)]
pub struct RendererState {
    scene: Scene,
    point_lights: PointLights,
    lighting: Lighting,
    lighting_x4: DirectionalX4,
    camera: Camera,
    background: Vec3,
    rays: RayBuffer,
    pixels: PixelBuffer,
    cells: CellBuffer,
    upscaled: UpscaledCells,
    metrics: PerfMetrics,
}

impl Default for RendererState {
    fn default() -> Self {
        let lighting = Lighting::default();
        RendererState {
            scene: Scene::new(),
            point_lights: PointLights::new(),
            lighting,
            lighting_x4: DirectionalX4::from(&lighting),
            camera: Camera::default(),
            background: background_at(0.0),
            rays: RayBuffer::new(MAX_RAYS),
            pixels: PixelBuffer::new(MAX_RAYS),
            cells: CellBuffer::new(MAX_RAYS),
            upscaled: UpscaledCells::new(MAX_UPSCALED),
            metrics: PerfMetrics::new(),
        }
    }
}

impl RendererState {
    /// Allocate all buffers at full capacity
    pub fn new() -> Self {
        Self::default()
    }

    // === Tables ===

    /// Scene with its committed derived data
    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Shape table; edits apply at the next [`RendererState::set_scene`]
    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape; MAX_SHAPES] {
        self.scene.shapes_mut()
    }

    /// Group blend modes; read live by every evaluation
    #[inline]
    pub fn blend_modes_mut(&mut self) -> &mut [BlendMode; MAX_GROUPS] {
        self.scene.blend_modes_mut()
    }

    /// Point-light table; edits apply at the next
    /// [`RendererState::set_point_lights`]
    #[inline]
    pub fn point_lights_mut(&mut self) -> &mut [PointLight; MAX_POINT_LIGHTS] {
        self.point_lights.lights_mut()
    }

    /// Point lights
    #[inline]
    pub fn point_lights(&self) -> &PointLights {
        &self.point_lights
    }

    /// Commit the first `count` shapes with smoothing coefficient `k`
    pub fn set_scene(&mut self, count: u32, k: f32) {
        self.scene.set_scene(count, k);
    }

    /// Set the number of groups
    pub fn set_groups(&mut self, count: u32) {
        self.scene.set_groups(count);
    }

    /// Commit the first `count` point lights
    pub fn set_point_lights(&mut self, count: u32) {
        self.point_lights.set_count(count);
    }

    // === Camera and lighting ===

    /// Current camera
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera basis
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Replace the camera basis from raw scalars
    #[allow(clippy::too_many_arguments)]
    pub fn set_camera_raw(
        &mut self,
        ex: f32,
        ey: f32,
        ez: f32,
        fx: f32,
        fy: f32,
        fz: f32,
        rx: f32,
        ry: f32,
        rz: f32,
        ux: f32,
        uy: f32,
        uz: f32,
        half_width: f32,
        half_height: f32,
    ) {
        self.set_camera(Camera {
            eye: Vec3::new(ex, ey, ez),
            forward: Vec3::new(fx, fy, fz),
            right: Vec3::new(rx, ry, rz),
            up: Vec3::new(ux, uy, uz),
            half_width,
            half_height,
        });
    }

    /// Current directional light
    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Set the directional light
    ///
    /// The direction is normalized; a zero or negative length keeps the
    /// previous direction. Ambient and intensity are always taken.
    pub fn set_lighting(&mut self, ambient: f32, dx: f32, dy: f32, dz: f32, intensity: f32) {
        self.lighting.ambient = ambient;
        self.lighting.intensity = intensity;

        let len = sqrt_approx(dx * dx + dy * dy + dz * dz);
        if len > 0.0 {
            self.lighting.direction = Vec3::new(dx / len, dy / len, dz / len);
        } else {
            log::debug!("zero-length light direction ignored");
        }
        self.lighting_x4 = DirectionalX4::from(&self.lighting);
    }

    // === Passes ===

    /// Generate primary rays for a `width × height` grid
    ///
    /// # Returns
    /// The number of rays, clamped to [`MAX_RAYS`].
    pub fn generate_rays(&mut self, width: u32, height: u32) -> usize {
        raycast::generate_rays(&self.camera, &mut self.rays, width, height)
    }

    /// Recompute the background color for time `t`
    pub fn compute_background(&mut self, time: f32) {
        self.background = background_at(time);
    }

    /// Current background color
    #[inline]
    pub fn background(&self) -> Vec3 {
        self.background
    }

    /// March and shade every generated ray on the calling thread
    pub fn march_rays(&mut self) -> MarchStats {
        let stats = {
            let ctx = MarchContext {
                scene: &self.scene,
                lighting: self.lighting_x4,
                point_lights: self.point_lights.active_x4(),
                background: self.background,
            };
            raycast::march_pass(&ctx, &self.rays, &mut self.pixels)
        };
        self.metrics.record_pass(&stats);
        log::debug!("march: {} rays, {} hits, {} steps", stats.rays, stats.hits, stats.steps);
        stats
    }

    /// March and shade every generated ray across the rayon pool
    ///
    /// Produces the same pixels and counters as [`RendererState::march_rays`].
    pub fn march_rays_parallel(&mut self) -> MarchStats {
        let stats = {
            let ctx = MarchContext {
                scene: &self.scene,
                lighting: self.lighting_x4,
                point_lights: self.point_lights.active_x4(),
                background: self.background,
            };
            raycast::march_pass_parallel(&ctx, &self.rays, &mut self.pixels)
        };
        self.metrics.record_pass(&stats);
        log::debug!("parallel march: {} rays, {} hits, {} steps", stats.rays, stats.hits, stats.steps);
        stats
    }

    /// Encode one glyph per pixel
    pub fn composite(&mut self, width: u32, height: u32) -> usize {
        composite::composite(&self.pixels, &mut self.cells, width, height)
    }

    /// Encode two pixels per cell with half blocks
    pub fn composite_blocks(&mut self, width: u32, height: u32) -> usize {
        composite::composite_blocks(&self.pixels, &mut self.cells, width, height, self.background)
    }

    /// Encode with the given mode
    ///
    /// # Returns
    /// The cell grid dimensions.
    pub fn composite_with(&mut self, mode: CompositeMode, width: u32, height: u32) -> (u32, u32) {
        match mode {
            CompositeMode::Ascii => {
                self.composite(width, height);
                (width, height)
            }
            CompositeMode::Blocks => {
                self.composite_blocks(width, height);
                (width, height / 2)
            }
        }
    }

    /// Nearest-neighbour upscale of the cell grid
    pub fn upscale(
        &mut self,
        native_width: u32,
        native_height: u32,
        output_width: u32,
        output_height: u32,
        scale: u32,
    ) -> usize {
        composite::upscale(
            &self.cells,
            &mut self.upscaled,
            native_width,
            native_height,
            output_width,
            output_height,
            scale,
        )
    }

    // === Buffers ===

    /// Ray buffer
    #[inline]
    pub fn rays(&self) -> &RayBuffer {
        &self.rays
    }

    /// Ray buffer for host-written rays; pair with
    /// [`RendererState::set_ray_count`]
    #[inline]
    pub fn rays_mut(&mut self) -> &mut RayBuffer {
        &mut self.rays
    }

    /// Set how many host-written rays the next march covers
    ///
    /// Clamped to [`MAX_RAYS`].
    pub fn set_ray_count(&mut self, count: u32) {
        self.rays.set_count(count as usize);
    }

    /// Shaded pixels
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Pixel planes for host-produced colors, read by the compositors
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Encoded cells
    #[inline]
    pub fn cells(&self) -> &CellBuffer {
        &self.cells
    }

    /// Upscaled cells
    #[inline]
    pub fn upscaled(&self) -> &UpscaledCells {
        &self.upscaled
    }

    // === Metrics ===

    /// Counter block
    #[inline]
    pub fn metrics(&self) -> &[f32; METRICS_LEN] {
        self.metrics.as_slice()
    }

    /// Zero every counter
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    // === Capacities ===

    /// Maximum rays (and pixels and cells) per pass
    pub const fn max_rays() -> usize {
        MAX_RAYS
    }

    /// Shape table size
    pub const fn max_shapes() -> usize {
        MAX_SHAPES
    }

    /// Group table size
    pub const fn max_groups() -> usize {
        MAX_GROUPS
    }

    /// Point-light table size
    pub const fn max_point_lights() -> usize {
        MAX_POINT_LIGHTS
    }

    /// Upscaled cell capacity
    pub const fn max_upscaled() -> usize {
        MAX_UPSCALED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::slot;

    #[test]
    fn test_background_formula() {
        let bg = background_at(0.0);
        let expected = Vec3::new(
            0.02,
            0.02 + sin_approx(1.0) * 0.01,
            0.03 + sin_approx(2.0) * 0.015,
        );
        assert!((bg - expected).length() < 1e-7);
        for t in [0.0, 1.5, 10.0, 1000.0] {
            let bg = background_at(t);
            assert!(bg.min_element() >= 0.0 && bg.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_set_lighting_normalizes() {
        let mut r = RendererState::new();
        r.set_lighting(0.2, 0.0, 3.0, 4.0, 0.9);
        assert!((r.lighting().direction - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
        assert_eq!(r.lighting().ambient, 0.2);
        assert_eq!(r.lighting().intensity, 0.9);
    }

    #[test]
    fn test_zero_light_direction_keeps_previous() {
        let mut r = RendererState::new();
        let before = r.lighting().direction;
        r.set_lighting(0.3, 0.0, 0.0, 0.0, 0.5);
        assert_eq!(r.lighting().direction, before);
        assert_eq!(r.lighting().ambient, 0.3);
    }

    #[test]
    fn test_set_camera_raw() {
        let mut r = RendererState::new();
        r.set_camera_raw(1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.25);
        assert_eq!(r.camera().eye, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(r.camera().half_width, 0.5);
        assert_eq!(r.camera().half_height, 0.25);
    }

    #[test]
    fn test_capacities() {
        assert_eq!(RendererState::max_rays(), 16384);
        assert_eq!(RendererState::max_shapes(), 64);
        assert_eq!(RendererState::max_groups(), 8);
        assert_eq!(RendererState::max_point_lights(), 8);
        assert_eq!(RendererState::max_upscaled(), 16384);
    }

    #[test]
    fn test_set_ray_count_clamps() {
        let mut r = RendererState::new();
        r.set_ray_count(10);
        assert_eq!(r.rays().count(), 10);
        r.set_ray_count(u32::MAX);
        assert_eq!(r.rays().count(), MAX_RAYS);
    }

    #[test]
    fn test_frame_records_metrics() {
        let mut r = RendererState::new();
        r.shapes_mut()[0] = Shape::sphere(Vec3::ZERO, 2.0).with_color(Vec3::ONE);
        r.set_groups(1);
        r.set_scene(1, 0.5);
        r.generate_rays(8, 8);
        r.march_rays();
        let m = r.metrics();
        assert!(m[slot::HITS] > 0.0);
        assert_eq!(m[slot::HITS] + m[slot::MISSES], 64.0);
        assert_eq!(m[slot::RAYS], 64.0);
        assert_eq!(m[slot::BATCHES], 16.0);
        r.reset_metrics();
        assert!(r.metrics().iter().all(|&v| v == 0.0));
    }
}
