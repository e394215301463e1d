//! Primary rays, sphere tracing and shading
//!
//! - [`camera`]: pinhole basis and per-pixel ray generation
//! - [`march`]: 4-ray packet tracer, sequential and rayon passes
//! - [`shade`]: directional and point-light terms

pub mod camera;
pub mod march;
pub mod shade;

pub use camera::{generate_rays, Camera};
pub use march::{march_packet, march_pass, march_pass_parallel, MarchContext, MarchStats};
pub use shade::{
    directional, directional_x4, point_light_contribution, point_light_contribution_x4, DirectionalX4,
    PointLightX4, PointLights,
};
