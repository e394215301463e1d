//! Common test helpers for ALICE-SDF-Term integration tests

#![allow(dead_code)]

use alice_sdf_term::prelude::*;

// ============================================================================
// Standard renderers
// ============================================================================

/// Renderer holding a single sphere at the origin
pub fn sphere_renderer(radius: f32, color: Vec3) -> RendererState {
    let mut renderer = RendererState::new();
    renderer.shapes_mut()[0] = Shape::sphere(Vec3::ZERO, radius).with_color(color);
    renderer.set_groups(1);
    renderer.set_scene(1, 0.5);
    renderer
}

/// Renderer loaded with the demo scene description
pub fn demo_renderer() -> RendererState {
    let mut renderer = RendererState::new();
    SceneDescription::demo()
        .apply(&mut renderer)
        .expect("demo scene is valid");
    renderer
}

/// One shape of every kind, spread over two groups
pub fn mixed_shapes() -> Vec<Shape> {
    vec![
        Shape::sphere(Vec3::new(-1.0, 0.0, 0.0), 0.7).with_color(Vec3::new(1.0, 0.2, 0.2)),
        Shape::box3d(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 0.4, 0.3)).with_color(Vec3::new(0.2, 1.0, 0.2)),
        Shape::cylinder_x(Vec3::new(0.0, 1.0, 0.0), 0.2, 0.8)
            .with_color(Vec3::new(0.2, 0.2, 1.0))
            .in_group(1),
        Shape::cylinder_y(Vec3::new(0.0, -1.0, 0.5), 0.3, 0.6)
            .with_color(Vec3::new(1.0, 1.0, 0.2))
            .in_group(1),
        Shape::cone(Vec3::new(0.0, -0.5, -1.0), 0.5, 1.0).with_color(Vec3::new(1.0, 0.2, 1.0)),
    ]
}

/// Run one full frame: rays, background, march
pub fn render_frame(renderer: &mut RendererState, width: u32, height: u32, parallel: bool) -> MarchStats {
    renderer.generate_rays(width, height);
    renderer.compute_background(0.0);
    if parallel {
        renderer.march_rays_parallel()
    } else {
        renderer.march_rays()
    }
}

// ============================================================================
// Standard test points
// ============================================================================

/// Canonical test points: origin, axes, surfaces, far outside
pub fn test_points() -> Vec<Vec3> {
    vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.577, 0.577, 0.577),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, -1.5, 0.0),
        Vec3::new(0.3, 0.3, 0.3),
        Vec3::new(-0.4, 1.2, 0.9),
        Vec3::new(5.0, -5.0, 5.0),
        Vec3::new(0.0, -0.2, -1.0),
        Vec3::new(0.05, 1.0, 0.0),
    ]
}

/// Group test points into packets of four (the tail padded with the origin)
pub fn packets(points: &[Vec3]) -> Vec<[Vec3; 4]> {
    points
        .chunks(4)
        .map(|c| {
            let mut packet = [Vec3::ZERO; 4];
            packet[..c.len()].copy_from_slice(c);
            packet
        })
        .collect()
}

// ============================================================================
// Assertions
// ============================================================================

/// Relative-or-absolute float comparison
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon * (1.0 + a.abs().max(b.abs()))
}
