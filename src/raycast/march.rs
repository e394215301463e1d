//! Sphere tracing over 4-ray packets
//!
//! # Optimizations
//!
//! - **SIMD Packet Tracing**: 4 rays marched simultaneously via `Vec3x4`.
//! - **Masked Control Flow**: finished lanes advance by zero; no per-lane
//!   branches inside the step loop.
//! - **Early Exit**: the packet stops as soon as no lane is active.
//! - **Hit-Only Shading**: normals and color lookup run only when at least
//!   one lane hit, and normals are shared by every light.
//! - **Batch Parallelism**: packets are independent, so a pass can fan out
//!   over rayon with identical results.

use crate::constants::{HIT_THRESHOLD, LANES, MAX_DIST, MAX_STEPS};
use crate::eval::gradient::NORMAL_SAMPLES;
use crate::eval::{nearest_color_x4, normal_x4, scene_sdf_x4};
use crate::raycast::shade::{directional_x4, point_light_contribution_x4, DirectionalX4, PointLightX4};
use crate::scene::Scene;
use crate::simd::{and_not, lane_mask, select, Vec3x4};
use crate::soa::{PixelBuffer, RayBuffer};
use glam::Vec3;
use rayon::prelude::*;
use wide::{f32x4, CmpGt, CmpLt};

/// Everything a packet needs besides its rays
#[derive(Debug, Clone, Copy)]
pub struct MarchContext<'a> {
    /// Committed scene
    pub scene: &'a Scene,
    /// Directional light splats
    pub lighting: DirectionalX4,
    /// Committed point lights
    pub point_lights: &'a [PointLightX4],
    /// Color written for rays that miss
    pub background: Vec3,
}

/// Counters gathered while marching
///
/// Summing the stats of every packet gives the stats of the pass, in any
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarchStats {
    /// Scene evaluations in the step loop
    pub steps: u64,
    /// Scene evaluations for normals
    pub normal_samples: u64,
    /// Shapes scanned by color lookup
    pub color_lookups: u64,
    /// Rays that hit a surface
    pub hits: u64,
    /// Rays that missed
    pub misses: u64,
    /// Rays marched
    pub rays: u64,
    /// Packets marched
    pub batches: u64,
}

impl std::ops::Add for MarchStats {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        MarchStats {
            steps: self.steps + other.steps,
            normal_samples: self.normal_samples + other.normal_samples,
            color_lookups: self.color_lookups + other.color_lookups,
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            rays: self.rays + other.rays,
            batches: self.batches + other.batches,
        }
    }
}

impl std::ops::AddAssign for MarchStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// March and shade one packet of up to 4 rays
///
/// Lanes at or past `lanes` start inactive, never hit and are not counted.
///
/// # Returns
/// The shaded color per lane and the packet's counters.
pub fn march_packet(
    ctx: &MarchContext<'_>,
    origin: Vec3x4,
    direction: Vec3x4,
    lanes: usize,
) -> (Vec3x4, MarchStats) {
    let lanes = lanes.min(LANES);
    let valid = lane_mask([0 < lanes, 1 < lanes, 2 < lanes, 3 < lanes]);
    let threshold = f32x4::splat(HIT_THRESHOLD);
    let max_dist = f32x4::splat(MAX_DIST);
    let zero = f32x4::ZERO;

    let mut p = origin;
    let mut traveled = zero;
    let mut active = valid;
    let mut hit = zero;
    let mut steps = 0u64;

    for _ in 0..MAX_STEPS {
        let d = scene_sdf_x4(ctx.scene, p);
        steps += 1;

        let now_hit = d.cmp_lt(threshold);
        let miss = traveled.cmp_gt(max_dist);

        // Sticky: a lane that hit stays hit
        hit = hit | (now_hit & active);
        active = and_not(active, now_hit | miss);
        if !active.any() {
            break;
        }

        let step = select(active, d, zero);
        p = p + direction * step;
        traveled = traveled + step;
    }

    let hit_count = hit.move_mask().count_ones() as u64;
    let mut stats = MarchStats {
        steps,
        hits: hit_count,
        misses: lanes as u64 - hit_count,
        rays: lanes as u64,
        batches: 1,
        ..Default::default()
    };

    let background = Vec3x4::splat(ctx.background);
    if !hit.any() {
        return (background, stats);
    }

    let n = normal_x4(ctx.scene, p);
    stats.normal_samples = NORMAL_SAMPLES as u64;

    let brightness = directional_x4(n, &ctx.lighting);
    let (color, scanned) = nearest_color_x4(ctx.scene, p, hit);
    stats.color_lookups = scanned as u64;

    let shaded = if ctx.point_lights.is_empty() {
        color * brightness
    } else {
        let contrib = point_light_contribution_x4(n, p, ctx.point_lights);
        color * brightness + contrib * color
    };

    (Vec3x4::select(hit, shaded, background), stats)
}

/// March every ray of the current frame on the calling thread
pub fn march_pass(ctx: &MarchContext<'_>, rays: &RayBuffer, pixels: &mut PixelBuffer) -> MarchStats {
    let count = rays.count().min(pixels.capacity());
    let mut stats = MarchStats::default();

    for base in (0..count).step_by(LANES) {
        let lanes = (count - base).min(LANES);
        let (color, packet) = march_packet(
            ctx,
            rays.origin.load_x4(base),
            rays.direction.load_x4(base),
            lanes,
        );
        pixels.store_x4(base, color, lanes);
        stats += packet;
    }

    log::trace!("march pass: {:?}", stats);
    stats
}

/// March every ray of the current frame across the rayon pool
///
/// Packets are independent, so buffers and counters match [`march_pass`]
/// exactly.
pub fn march_pass_parallel(
    ctx: &MarchContext<'_>,
    rays: &RayBuffer,
    pixels: &mut PixelBuffer,
) -> MarchStats {
    let count = rays.count().min(pixels.capacity());
    let (r, g, b) = pixels.planes_mut();

    let stats = r[..count]
        .par_chunks_mut(LANES)
        .zip(g[..count].par_chunks_mut(LANES))
        .zip(b[..count].par_chunks_mut(LANES))
        .enumerate()
        .map(|(i, ((r, g), b))| {
            let base = i * LANES;
            let lanes = r.len();
            let (color, packet) = march_packet(
                ctx,
                rays.origin.load_x4(base),
                rays.direction.load_x4(base),
                lanes,
            );
            let (cr, cg, cb) = color.to_array();
            r.copy_from_slice(&cr[..lanes]);
            g.copy_from_slice(&cg[..lanes]);
            b.copy_from_slice(&cb[..lanes]);
            packet
        })
        .reduce(MarchStats::default, |a, b| a + b);

    log::trace!("parallel march pass: {:?}", stats);
    stats
}
