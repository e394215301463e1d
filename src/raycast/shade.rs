//! Lambert shading: one directional light plus up to 8 point lights
//!
//! Directional brightness is `ambient + max(0, n·L) · intensity`. Each point
//! light adds `color · intensity · atten · max(0, n·l)` with
//! `atten = 1 / (1 + (dist / radius)²)`. The final pixel color multiplies
//! both terms by the surface color.
//!
//! Light tables follow the same commit rule as the scene: the host edits the
//! table, then [`PointLights::set_count`] rebuilds the lane splats.

use crate::constants::MAX_POINT_LIGHTS;
use crate::simd::Vec3x4;
use crate::types::{Lighting, PointLight};
use glam::Vec3;
use wide::f32x4;

/// Floor for the light distance before it is used as a divisor
const MIN_LIGHT_DIST: f32 = 0.001;

/// Directional light broadcast to 4 lanes
#[derive(Debug, Clone, Copy)]
pub struct DirectionalX4 {
    direction: Vec3x4,
    intensity: f32x4,
    ambient: f32x4,
}

impl From<&Lighting> for DirectionalX4 {
    fn from(lighting: &Lighting) -> Self {
        DirectionalX4 {
            direction: Vec3x4::splat(lighting.direction),
            intensity: f32x4::splat(lighting.intensity),
            ambient: f32x4::splat(lighting.ambient),
        }
    }
}

/// Point light broadcast to 4 lanes
#[derive(Debug, Clone, Copy)]
pub struct PointLightX4 {
    position: Vec3x4,
    color: Vec3x4,
    intensity: f32x4,
    radius: f32x4,
}

impl From<&PointLight> for PointLightX4 {
    fn from(light: &PointLight) -> Self {
        PointLightX4 {
            position: Vec3x4::splat(light.position),
            color: Vec3x4::splat(light.color),
            intensity: f32x4::splat(light.intensity),
            radius: f32x4::splat(light.radius),
        }
    }
}

/// Fixed point-light table with committed lane splats
#[derive(Debug, Clone)]
pub struct PointLights {
    lights: [PointLight; MAX_POINT_LIGHTS],
    splats: [PointLightX4; MAX_POINT_LIGHTS],
    count: usize,
}

impl Default for PointLights {
    fn default() -> Self {
        let zero = PointLightX4::from(&PointLight::default());
        PointLights {
            lights: [PointLight::default(); MAX_POINT_LIGHTS],
            splats: [zero; MAX_POINT_LIGHTS],
            count: 0,
        }
    }
}

impl PointLights {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Light table (all slots)
    #[inline]
    pub fn lights(&self) -> &[PointLight; MAX_POINT_LIGHTS] {
        &self.lights
    }

    /// Mutable light table; changes apply at the next [`PointLights::set_count`]
    #[inline]
    pub fn lights_mut(&mut self) -> &mut [PointLight; MAX_POINT_LIGHTS] {
        &mut self.lights
    }

    /// Commit the first `count` lights, clamped to [`MAX_POINT_LIGHTS`]
    pub fn set_count(&mut self, count: u32) {
        self.count = (count as usize).min(MAX_POINT_LIGHTS);
        for (splat, light) in self.splats.iter_mut().zip(&self.lights[..self.count]) {
            *splat = PointLightX4::from(light);
        }
    }

    /// Number of committed lights
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Committed lights as scalars
    #[inline]
    pub fn active(&self) -> &[PointLight] {
        &self.lights[..self.count]
    }

    /// Committed lights as lane splats
    #[inline]
    pub fn active_x4(&self) -> &[PointLightX4] {
        &self.splats[..self.count]
    }
}

/// Directional brightness at one surface point
#[inline]
pub fn directional(normal: Vec3, lighting: &Lighting) -> f32 {
    let ndotl = normal.dot(lighting.direction).max(0.0);
    lighting.ambient + ndotl * lighting.intensity
}

/// Directional brightness at 4 surface points
#[inline]
pub fn directional_x4(normal: Vec3x4, light: &DirectionalX4) -> f32x4 {
    let ndotl = normal.dot(light.direction).max(f32x4::ZERO);
    light.ambient + ndotl * light.intensity
}

/// Summed point-light color at one surface point
pub fn point_light_contribution(normal: Vec3, point: Vec3, lights: &[PointLight]) -> Vec3 {
    let mut contrib = Vec3::ZERO;
    for light in lights {
        let l = light.position - point;
        let dist = l.length();
        let l = l * (1.0 / dist.max(MIN_LIGHT_DIST));
        let ndotl = normal.dot(l).max(0.0);

        let dist_norm = dist / light.radius;
        let atten = 1.0 / (1.0 + dist_norm * dist_norm);

        contrib += light.color * (light.intensity * atten * ndotl);
    }
    contrib
}

/// Summed point-light color at 4 surface points
pub fn point_light_contribution_x4(normal: Vec3x4, point: Vec3x4, lights: &[PointLightX4]) -> Vec3x4 {
    let one = f32x4::ONE;
    let min_dist = f32x4::splat(MIN_LIGHT_DIST);
    let mut contrib = Vec3x4::splat(Vec3::ZERO);

    for light in lights {
        let l = light.position - point;
        let dist = l.length();
        let l = l * (one / dist.max(min_dist));
        let ndotl = normal.dot(l).max(f32x4::ZERO);

        let dist_norm = dist / light.radius;
        let atten = one / (one + dist_norm * dist_norm);

        contrib = contrib + light.color * (light.intensity * atten * ndotl);
    }
    contrib
}
