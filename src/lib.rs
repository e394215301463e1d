//! # ALICE-SDF-Term
//!
//! A fixed-budget signed distance field raymarcher that renders small
//! scenes of implicit primitives into terminal character cells.
//!
//! ## Features
//!
//! - **Primitives**: Sphere, Box, Cylinder (X and Y), Cone
//! - **Blending**: per-group hard or smooth union, groups smooth-unioned
//! - **Batched Evaluation**: 4-wide SIMD with branchless lane selection
//! - **Sphere Tracing**: fixed step budget, per-lane early exit, rayon passes
//! - **Shading**: tetrahedral normals, directional light, up to 8 point lights
//! - **Terminal Output**: dithered ASCII ramp or half-block cells, upscaler
//! - **File I/O**: JSON scene descriptions
//!
//! ## Example
//!
//! ```rust
//! use alice_sdf_term::prelude::*;
//!
//! let mut renderer = RendererState::new();
//! renderer.shapes_mut()[0] = Shape::sphere(Vec3::ZERO, 1.0).with_color(Vec3::ONE);
//! renderer.set_groups(1);
//! renderer.set_scene(1, 0.5);
//!
//! renderer.generate_rays(32, 32);
//! renderer.compute_background(0.0);
//! renderer.march_rays();
//! renderer.composite_blocks(32, 32);
//! renderer.upscale(32, 16, 64, 32, 2);
//!
//! assert!(renderer.metrics()[4] > 0.0);
//! ```

#![warn(missing_docs)]

pub mod composite;
pub mod constants;
pub mod eval;
pub mod io;
pub mod math;
pub mod metrics;
pub mod operations;
pub mod primitives;
pub mod raycast;
pub mod renderer;
pub mod scene;
pub mod simd;
pub mod soa;
pub mod types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::composite::{composite, composite_blocks, upscale, CellBuffer, UpscaledCells};
    pub use crate::constants::*;
    pub use crate::eval::{nearest_color, nearest_color_x4, normal, normal_x4, scene_sdf, scene_sdf_x4};
    pub use crate::io::{
        from_json_str, get_info, load_scene_json, save_scene_json, to_json_string, CameraDescription, IoError,
        SceneDescription,
    };
    pub use crate::metrics::{slot, PerfMetrics};
    pub use crate::operations::*;
    pub use crate::primitives::*;
    pub use crate::raycast::{generate_rays, march_pass, march_pass_parallel, Camera, MarchContext, MarchStats};
    pub use crate::renderer::{background_at, CompositeMode, RendererState};
    pub use crate::scene::Scene;
    pub use crate::simd::Vec3x4;
    pub use crate::soa::{PixelBuffer, RayBuffer};
    pub use crate::types::{Aabb, BlendMode, Lighting, PointLight, Shape};
    pub use glam::Vec3;
}

// Re-exports for convenience
pub use io::{load_scene_json, save_scene_json, SceneDescription};
pub use renderer::RendererState;
pub use scene::Scene;
pub use types::Shape;
