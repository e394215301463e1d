//! Scene description file I/O
//!
//! The renderer core never fails; everything fallible lives here. Scene
//! descriptions are JSON (`.json`), read and written with `serde_json`.

mod json;

pub use json::{
    from_json_str, load_scene_json, save_scene_json, to_json_string, CameraDescription, SceneDescription,
    SCENE_VERSION,
};

use crate::scene::Scene;
use std::path::Path;
use thiserror::Error;

/// File I/O errors
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Well-formed file describing a scene that cannot be rendered
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Summarize a scene description file without rendering it
///
/// # Returns
/// A multi-line report: version, table sizes and the committed bounds.
pub fn get_info(path: impl AsRef<Path>) -> Result<String, IoError> {
    let desc = load_scene_json(path)?;
    let scene = Scene::from_shapes(&desc.shapes, &desc.groups, desc.smooth_k);
    let aabb = scene.aabb();
    Ok(format!(
        "Version: {}\nShapes: {}\nGroups: {}\nPoint lights: {}\nSmooth k: {}\nBounds: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
        desc.version,
        scene.shape_count(),
        scene.group_count(),
        desc.point_lights.len(),
        desc.smooth_k,
        aabb.min.x,
        aabb.min.y,
        aabb.min.z,
        aabb.max.x,
        aabb.max.y,
        aabb.max.z,
    ))
}
