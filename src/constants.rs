//! Fixed capacities and marching budgets
//!
//! Every buffer in the renderer is sized from these constants once, when the
//! [`RendererState`](crate::renderer::RendererState) is built. Counts coming
//! from the host are clamped against them, never rejected.

/// Maximum number of rays (and pixels / cells) per pass: 128 × 128
pub const MAX_RAYS: usize = 16384;

/// Maximum number of shapes in the scene table
pub const MAX_SHAPES: usize = 64;

/// Maximum number of blend groups
pub const MAX_GROUPS: usize = 8;

/// Maximum number of point lights
pub const MAX_POINT_LIGHTS: usize = 8;

/// Capacity of the upscaled output grid
pub const MAX_UPSCALED: usize = MAX_RAYS;

/// Hard iteration cap of the sphere-tracing loop, per batch of 4 rays
pub const MAX_STEPS: u32 = 64;

/// Travel budget of a ray; also the scene distance of an empty scene
pub const MAX_DIST: f32 = 100.0;

/// Scene distance below which a lane is considered to have hit a surface
pub const HIT_THRESHOLD: f32 = 0.001;

/// Offset used by the tetrahedral normal estimator
pub const NORMAL_EPS: f32 = 0.001;

/// Number of lanes processed together by the batched evaluator and marcher
pub const LANES: usize = 4;
