//! Scene SDF evaluation
//!
//! The scene distance is a two-pass reduction over the committed shape table:
//! 1. Every shape is folded into its group, seeded by the group's first
//!    member, using the group's blend mode (hard `min` or smooth union).
//! 2. The seeded groups are folded in ascending order with smooth union.
//!
//! The scalar and batched forms walk the same shapes in the same order, so a
//! lane of [`scene_sdf_x4`] equals [`scene_sdf`] at that lane's point.
//!
//! # Optimizations
//! - **Fixed Group Slots**: group accumulators live in stack arrays of
//!   [`MAX_GROUPS`]; nothing is allocated per call.
//! - **Precomputed Splats**: the batched path reads the lane constants built
//!   at commit time instead of broadcasting per call.

pub mod gradient;

pub use gradient::{normal, normal_x4};

use crate::constants::{HIT_THRESHOLD, MAX_DIST, MAX_GROUPS};
use crate::operations::{sdf_smooth_union, sdf_smooth_union_x4, sdf_union, sdf_union_x4};
use crate::primitives::{eval_primitive, eval_primitive_x4};
use crate::scene::{Scene, ShapeConstants};
use crate::simd::{and_not, select, Vec3x4};
use crate::types::BlendMode;
use glam::Vec3;
use wide::{f32x4, CmpLt};

/// Distance from a point to one committed shape
#[inline(always)]
pub fn eval_shape(shape: &ShapeConstants, point: Vec3) -> f32 {
    eval_primitive(shape.kind, point, shape.center, &shape.params)
}

/// Distance from 4 points to one committed shape
#[inline(always)]
pub fn eval_shape_x4(shape: &ShapeConstants, point: Vec3x4) -> f32x4 {
    eval_primitive_x4(shape.kind, point, shape.center_x4, &shape.params_x4)
}

/// Signed distance from a point to the scene
///
/// Returns [`MAX_DIST`] when no shapes are committed.
pub fn scene_sdf(scene: &Scene, point: Vec3) -> f32 {
    let constants = scene.constants();
    if constants.is_empty() {
        return MAX_DIST;
    }

    let k = scene.smooth_k();
    let blend = scene.blend_modes();
    let mut groups = [0.0f32; MAX_GROUPS];
    let mut seeded = [false; MAX_GROUPS];

    for shape in constants {
        let g = scene.resolve_group(shape.group);
        let d = eval_shape(shape, point);
        if !seeded[g] {
            groups[g] = d;
            seeded[g] = true;
        } else {
            groups[g] = match blend[g] {
                BlendMode::HardUnion => sdf_union(groups[g], d),
                BlendMode::SmoothUnion => sdf_smooth_union(groups[g], d, k),
            };
        }
    }

    let mut result = MAX_DIST;
    let mut first = true;
    for g in 0..scene.combined_groups() {
        if !seeded[g] {
            continue;
        }
        if first {
            result = groups[g];
            first = false;
        } else {
            result = sdf_smooth_union(result, groups[g], k);
        }
    }
    result
}

/// Signed distance from 4 points to the scene
pub fn scene_sdf_x4(scene: &Scene, point: Vec3x4) -> f32x4 {
    let constants = scene.constants();
    if constants.is_empty() {
        return f32x4::splat(MAX_DIST);
    }

    let k = scene.smooth_k_x4();
    let blend = scene.blend_modes();
    let mut groups = [f32x4::ZERO; MAX_GROUPS];
    let mut seeded = [false; MAX_GROUPS];

    for shape in constants {
        let g = scene.resolve_group(shape.group);
        let d = eval_shape_x4(shape, point);
        if !seeded[g] {
            groups[g] = d;
            seeded[g] = true;
        } else {
            groups[g] = match blend[g] {
                BlendMode::HardUnion => sdf_union_x4(groups[g], d),
                BlendMode::SmoothUnion => sdf_smooth_union_x4(groups[g], d, k),
            };
        }
    }

    let mut result = f32x4::splat(MAX_DIST);
    let mut first = true;
    for g in 0..scene.combined_groups() {
        if !seeded[g] {
            continue;
        }
        if first {
            result = groups[g];
            first = false;
        } else {
            result = sdf_smooth_union_x4(result, groups[g], k);
        }
    }
    result
}

/// Color of the nearest shape at a single point
///
/// Scans shapes in table order and keeps the strictly closest; stops at the
/// first shape that is closer than everything before it and within the hit
/// threshold. Returns black for an empty scene.
pub fn nearest_color(scene: &Scene, point: Vec3) -> Vec3 {
    let mut min_dist = MAX_DIST;
    let mut color = Vec3::ZERO;
    for shape in scene.constants() {
        let d = eval_shape(shape, point);
        if d < min_dist {
            min_dist = d;
            color = shape.color;
            if d < HIT_THRESHOLD {
                break;
            }
        }
    }
    color
}

/// Color of the nearest shape at 4 points
///
/// Only lanes set in `valid` are updated; the others stay black. A lane
/// settles once it updates to a shape within the hit threshold, and the scan
/// ends when every valid lane has settled.
///
/// # Returns
/// The per-lane colors and the number of shapes scanned.
pub fn nearest_color_x4(scene: &Scene, point: Vec3x4, valid: f32x4) -> (Vec3x4, u32) {
    let threshold = f32x4::splat(HIT_THRESHOLD);
    let mut min_dist = f32x4::splat(MAX_DIST);
    let mut color = Vec3x4::splat(Vec3::ZERO);
    let mut done = f32x4::ZERO;
    let mut scanned = 0u32;

    for shape in scene.constants() {
        scanned += 1;
        let d = eval_shape_x4(shape, point);

        let closer = d.cmp_lt(min_dist);
        let update = closer & and_not(valid, done);
        min_dist = select(update, d, min_dist);
        color = Vec3x4::select(update, shape.color_x4, color);

        done = done | (update & d.cmp_lt(threshold));
        if !and_not(valid, done).any() {
            break;
        }
    }

    (color, scanned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{lane_mask, mask_all};
    use crate::types::Shape;

    fn sample_points() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(0.9, 0.2, 0.1),
            Vec3::new(1.6, -0.4, 0.3),
            Vec3::new(-2.0, 1.5, 0.5),
        ]
    }

    fn mixed_scene() -> Scene {
        Scene::from_shapes(
            &[
                Shape::sphere(Vec3::ZERO, 1.0).with_color(Vec3::X),
                Shape::box3d(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(0.5)).with_color(Vec3::Y),
                Shape::cylinder_y(Vec3::new(-1.5, 0.0, 0.0), 0.4, 1.0)
                    .with_color(Vec3::Z)
                    .in_group(1),
                Shape::cone(Vec3::new(0.0, -1.0, 1.0), 0.5, 1.0).in_group(1),
                Shape::cylinder_x(Vec3::new(0.0, 2.0, 0.0), 0.3, 2.0).in_group(7),
            ],
            &[BlendMode::HardUnion, BlendMode::SmoothUnion],
            0.3,
        )
    }

    #[test]
    fn test_empty_scene_is_max_dist() {
        let scene = Scene::new();
        assert_eq!(scene_sdf(&scene, Vec3::ZERO), MAX_DIST);
        let d = scene_sdf_x4(&scene, Vec3x4::splat(Vec3::ONE)).to_array();
        assert_eq!(d, [MAX_DIST; 4]);
    }

    #[test]
    fn test_single_sphere() {
        let scene = Scene::from_shapes(&[Shape::sphere(Vec3::ZERO, 1.0)], &[BlendMode::HardUnion], 0.5);
        assert!((scene_sdf(&scene, Vec3::new(2.0, 0.0, 0.0)) - 1.0).abs() < 1e-6);
        assert!((scene_sdf(&scene, Vec3::ZERO) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hard_group_is_min() {
        let scene = Scene::from_shapes(
            &[
                Shape::sphere(Vec3::ZERO, 1.0),
                Shape::sphere(Vec3::new(3.0, 0.0, 0.0), 1.0),
            ],
            &[BlendMode::HardUnion],
            0.5,
        );
        let p = Vec3::new(1.5, 0.0, 0.0);
        assert!((scene_sdf(&scene, p) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_group_dips_below_min() {
        let scene = Scene::from_shapes(
            &[
                Shape::sphere(Vec3::ZERO, 1.0),
                Shape::sphere(Vec3::new(2.2, 0.0, 0.0), 1.0),
            ],
            &[BlendMode::SmoothUnion],
            0.5,
        );
        let p = Vec3::new(1.1, 0.0, 0.0);
        assert!(scene_sdf(&scene, p) < 0.1);
    }

    #[test]
    fn test_zero_groups_still_render_group_zero() {
        let mut scene = Scene::from_shapes(&[Shape::sphere(Vec3::ZERO, 1.0)], &[], 0.5);
        scene.set_groups(0);
        assert!((scene_sdf(&scene, Vec3::new(0.0, 3.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_blend_mode_read_live() {
        let mut scene = Scene::from_shapes(
            &[
                Shape::sphere(Vec3::ZERO, 1.0),
                Shape::sphere(Vec3::new(2.2, 0.0, 0.0), 1.0),
            ],
            &[BlendMode::HardUnion],
            0.5,
        );
        let p = Vec3::new(1.1, 0.0, 0.0);
        let hard = scene_sdf(&scene, p);
        scene.blend_modes_mut()[0] = BlendMode::SmoothUnion;
        let smooth = scene_sdf(&scene, p);
        assert!(smooth < hard);
    }

    #[test]
    fn test_batched_matches_scalar() {
        let scene = mixed_scene();
        let pts = sample_points();
        let batched = scene_sdf_x4(&scene, Vec3x4::from_vecs(pts)).to_array();
        for (i, p) in pts.iter().enumerate() {
            let scalar = scene_sdf(&scene, *p);
            assert!((batched[i] - scalar).abs() < 1e-5, "lane {}: {} vs {}", i, batched[i], scalar);
        }
    }

    #[test]
    fn test_nearest_color() {
        let scene = mixed_scene();
        assert_eq!(nearest_color(&scene, Vec3::new(0.0, 0.0, -1.0)), Vec3::X);
        assert_eq!(nearest_color(&scene, Vec3::new(2.0, 0.0, 0.0)), Vec3::Y);
        assert_eq!(nearest_color(&Scene::new(), Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_nearest_color_x4_respects_valid_mask() {
        let scene = mixed_scene();
        let pts = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-1.5, 0.0, -0.4),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let valid = lane_mask([true, true, true, false]);
        let (color, scanned) = nearest_color_x4(&scene, Vec3x4::from_vecs(pts), valid);
        assert_eq!(color.lane(0), Vec3::X);
        assert_eq!(color.lane(1), Vec3::Y);
        assert_eq!(color.lane(2), Vec3::Z);
        assert_eq!(color.lane(3), Vec3::ZERO);
        assert_eq!(scanned, 3);
    }

    #[test]
    fn test_nearest_color_x4_stops_when_settled() {
        let scene = mixed_scene();
        // Every lane sits on the first sphere, so one shape is enough
        let (_, scanned) = nearest_color_x4(&scene, Vec3x4::splat(Vec3::new(1.0, 0.0, 0.0)), mask_all());
        assert_eq!(scanned, 1);
    }
}
