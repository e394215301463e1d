//! Scene model: fixed shape and group tables plus committed derived data
//!
//! The host edits the shape table in place, then commits it with
//! [`Scene::set_scene`]. A commit snapshots every shape and rebuilds all
//! derived data from scratch:
//! - per-shape constants broadcast to 4 lanes for the batched evaluator
//! - the scene bounding box, padded by `2k`
//!
//! Nothing is patched incrementally. Table edits made after a commit are not
//! visible to the evaluator until the next commit. Blend modes are read from
//! the group table at evaluation time.

use crate::constants::{MAX_DIST, MAX_GROUPS, MAX_SHAPES};
use crate::primitives::ShapeKind;
use crate::simd::Vec3x4;
use crate::types::{Aabb, BlendMode, Shape};
use glam::Vec3;
use wide::f32x4;

/// Smoothing coefficient used before the first commit
pub const DEFAULT_SMOOTH_K: f32 = 0.5;

/// Per-shape values captured at commit time
#[derive(Debug, Clone, Copy)]
pub struct ShapeConstants {
    /// Primitive kind
    pub kind: ShapeKind,
    /// Raw group byte (resolved against the group count at evaluation)
    pub group: u8,
    /// Center
    pub center: Vec3,
    /// Parameters
    pub params: [f32; 4],
    /// Surface color
    pub color: Vec3,
    /// Center on all lanes
    pub center_x4: Vec3x4,
    /// First three parameters on all lanes
    pub params_x4: [f32x4; 3],
    /// Color on all lanes
    pub color_x4: Vec3x4,
}

impl ShapeConstants {
    fn from_shape(shape: &Shape) -> Self {
        ShapeConstants {
            kind: shape.kind,
            group: shape.group,
            center: shape.position,
            params: shape.params,
            color: shape.color,
            center_x4: Vec3x4::splat(shape.position),
            params_x4: [
                f32x4::splat(shape.params[0]),
                f32x4::splat(shape.params[1]),
                f32x4::splat(shape.params[2]),
            ],
            color_x4: Vec3x4::splat(shape.color),
        }
    }
}

impl Default for ShapeConstants {
    fn default() -> Self {
        ShapeConstants::from_shape(&Shape::default())
    }
}

/// Flat shape table, group table and committed derived data
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: [Shape; MAX_SHAPES],
    blend_modes: [BlendMode; MAX_GROUPS],
    shape_count: usize,
    group_count: usize,
    smooth_k: f32,
    smooth_k_x4: f32x4,
    constants: [ShapeConstants; MAX_SHAPES],
    aabb: Aabb,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            shapes: [Shape::default(); MAX_SHAPES],
            blend_modes: [BlendMode::HardUnion; MAX_GROUPS],
            shape_count: 0,
            group_count: 0,
            smooth_k: DEFAULT_SMOOTH_K,
            smooth_k_x4: f32x4::splat(DEFAULT_SMOOTH_K),
            constants: [ShapeConstants::default(); MAX_SHAPES],
            aabb: Aabb::new(Vec3::splat(-MAX_DIST), Vec3::splat(MAX_DIST)),
        }
    }
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and commit a scene from slices
    ///
    /// Input beyond the table capacities is ignored.
    pub fn from_shapes(shapes: &[Shape], blend_modes: &[BlendMode], smooth_k: f32) -> Self {
        let mut scene = Scene::new();
        let n = shapes.len().min(MAX_SHAPES);
        scene.shapes[..n].copy_from_slice(&shapes[..n]);
        let g = blend_modes.len().min(MAX_GROUPS);
        scene.blend_modes[..g].copy_from_slice(&blend_modes[..g]);
        scene.set_groups(g as u32);
        scene.set_scene(n as u32, smooth_k);
        scene
    }

    /// Shape table (all slots, committed or not)
    #[inline]
    pub fn shapes(&self) -> &[Shape; MAX_SHAPES] {
        &self.shapes
    }

    /// Mutable shape table; changes apply at the next [`Scene::set_scene`]
    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape; MAX_SHAPES] {
        &mut self.shapes
    }

    /// Group blend-mode table
    #[inline]
    pub fn blend_modes(&self) -> &[BlendMode; MAX_GROUPS] {
        &self.blend_modes
    }

    /// Mutable group blend-mode table
    #[inline]
    pub fn blend_modes_mut(&mut self) -> &mut [BlendMode; MAX_GROUPS] {
        &mut self.blend_modes
    }

    /// Commit the first `count` shapes with smoothing coefficient `k`
    ///
    /// `count` is clamped to [`MAX_SHAPES`]. `k` must be positive for smooth
    /// blending to be meaningful; it is not validated.
    pub fn set_scene(&mut self, count: u32, k: f32) {
        self.shape_count = (count as usize).min(MAX_SHAPES);
        self.smooth_k = k;
        self.smooth_k_x4 = f32x4::splat(k);

        if self.shape_count == 0 {
            self.aabb = Aabb::new(Vec3::splat(-MAX_DIST), Vec3::splat(MAX_DIST));
            log::debug!("scene committed: empty");
            return;
        }

        let mut bounds = self.shapes[0].bounds();
        for (i, shape) in self.shapes[..self.shape_count].iter().enumerate() {
            self.constants[i] = ShapeConstants::from_shape(shape);
            bounds = bounds.union(&shape.bounds());
        }
        self.aabb = bounds.padded(k * 2.0);

        log::debug!(
            "scene committed: {} shapes, k = {}, aabb = {:?}..{:?}",
            self.shape_count,
            k,
            self.aabb.min,
            self.aabb.max
        );
    }

    /// Set the number of active groups, clamped to [`MAX_GROUPS`]
    pub fn set_groups(&mut self, count: u32) {
        self.group_count = (count as usize).min(MAX_GROUPS);
    }

    /// Number of committed shapes
    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shape_count
    }

    /// Number of configured groups
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Shared smoothing coefficient
    #[inline]
    pub fn smooth_k(&self) -> f32 {
        self.smooth_k
    }

    /// Smoothing coefficient on all lanes
    #[inline]
    pub fn smooth_k_x4(&self) -> f32x4 {
        self.smooth_k_x4
    }

    /// Bounding box of the committed shapes, padded by `2k`
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// Committed per-shape constants, in table order
    #[inline]
    pub fn constants(&self) -> &[ShapeConstants] {
        &self.constants[..self.shape_count]
    }

    /// Number of group slots the combine pass walks
    ///
    /// Group 0 always takes part, so shapes are never dropped when the host
    /// configured zero groups.
    #[inline]
    pub fn combined_groups(&self) -> usize {
        self.group_count.max(1)
    }

    /// Group a shape evaluates in: its own if in range, otherwise group 0
    #[inline]
    pub fn resolve_group(&self, raw: u8) -> usize {
        let g = raw as usize;
        if g < self.group_count {
            g
        } else {
            0
        }
    }
}
