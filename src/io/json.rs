//! Scene description JSON format
//!
//! A human-readable snapshot of everything a frame needs: shapes, groups,
//! smoothing, camera, lights and background time. Loading a description and
//! calling [`SceneDescription::apply`] fills a renderer's tables and commits
//! them.
//!
//! # Optimizations
//! - **Streaming I/O**: `serde_json::to_writer`/`from_reader` with
//!   `BufWriter`/`BufReader`, no intermediate `String` for files.

use crate::constants::{MAX_GROUPS, MAX_POINT_LIGHTS, MAX_SHAPES};
use crate::io::IoError;
use crate::raycast::Camera;
use crate::renderer::RendererState;
use crate::scene::DEFAULT_SMOOTH_K;
use crate::types::{BlendMode, Lighting, PointLight, Shape};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Current description format version
pub const SCENE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCENE_VERSION
}

fn default_smooth_k() -> f32 {
    DEFAULT_SMOOTH_K
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_fov() -> f32 {
    60.0
}

fn default_aspect() -> f32 {
    1.0
}

/// How the description specifies the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDescription {
    /// Explicit basis, used as is
    Basis(Camera),
    /// Basis derived from an eye and a target
    LookAt {
        /// Camera position
        eye: Vec3,
        /// Point the camera faces
        target: Vec3,
        /// World up hint
        #[serde(default = "default_up")]
        up: Vec3,
        /// Vertical field of view in degrees
        #[serde(default = "default_fov")]
        fov_y_degrees: f32,
        /// Image-plane width over height
        #[serde(default = "default_aspect")]
        aspect: f32,
    },
}

impl Default for CameraDescription {
    fn default() -> Self {
        CameraDescription::Basis(Camera::default())
    }
}

impl CameraDescription {
    /// Resolve to a camera basis
    pub fn to_camera(&self) -> Result<Camera, IoError> {
        match *self {
            CameraDescription::Basis(camera) => Ok(camera),
            CameraDescription::LookAt {
                eye,
                target,
                up,
                fov_y_degrees,
                aspect,
            } => {
                let forward = target - eye;
                if forward.length_squared() == 0.0 {
                    return Err(IoError::InvalidScene("camera eye equals target".to_string()));
                }
                if forward.cross(up).length_squared() == 0.0 {
                    return Err(IoError::InvalidScene("camera up is parallel to view".to_string()));
                }
                if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
                    return Err(IoError::InvalidScene(format!(
                        "field of view {} outside (0, 180)",
                        fov_y_degrees
                    )));
                }
                Ok(Camera::look_at(eye, target, up, fov_y_degrees.to_radians(), aspect))
            }
        }
    }
}

/// Everything needed to render a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Shape table contents, in order
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Blend mode per group
    #[serde(default)]
    pub groups: Vec<BlendMode>,
    /// Shared smoothing coefficient
    #[serde(default = "default_smooth_k")]
    pub smooth_k: f32,
    /// Camera
    #[serde(default)]
    pub camera: CameraDescription,
    /// Directional light
    #[serde(default)]
    pub lighting: Lighting,
    /// Point lights
    #[serde(default)]
    pub point_lights: Vec<PointLight>,
    /// Background animation time
    #[serde(default)]
    pub time: f32,
}

impl Default for SceneDescription {
    fn default() -> Self {
        SceneDescription {
            version: SCENE_VERSION,
            shapes: Vec::new(),
            groups: Vec::new(),
            smooth_k: DEFAULT_SMOOTH_K,
            camera: CameraDescription::default(),
            lighting: Lighting::default(),
            point_lights: Vec::new(),
            time: 0.0,
        }
    }
}

impl SceneDescription {
    /// A small scene exercising every primitive and both blend modes
    pub fn demo() -> Self {
        SceneDescription {
            version: SCENE_VERSION,
            shapes: vec![
                Shape::sphere(Vec3::new(-0.6, 0.2, 0.0), 0.8).with_color(Vec3::new(0.9, 0.3, 0.2)),
                Shape::sphere(Vec3::new(0.5, 0.3, 0.1), 0.6).with_color(Vec3::new(0.9, 0.7, 0.2)),
                Shape::box3d(Vec3::new(0.0, -1.2, 0.0), Vec3::new(2.5, 0.15, 2.5))
                    .with_color(Vec3::new(0.4, 0.4, 0.45))
                    .in_group(1),
                Shape::cylinder_y(Vec3::new(1.8, -0.4, 0.6), 0.3, 0.7)
                    .with_color(Vec3::new(0.2, 0.6, 0.9))
                    .in_group(1),
                Shape::cylinder_x(Vec3::new(0.0, 1.4, 0.8), 0.15, 1.2)
                    .with_color(Vec3::new(0.6, 0.9, 0.4))
                    .in_group(2),
                Shape::cone(Vec3::new(-1.8, -1.05, 0.5), 0.5, 1.2)
                    .with_color(Vec3::new(0.8, 0.4, 0.9))
                    .in_group(1),
            ],
            groups: vec![BlendMode::SmoothUnion, BlendMode::HardUnion, BlendMode::HardUnion],
            smooth_k: 0.4,
            camera: CameraDescription::LookAt {
                eye: Vec3::new(0.0, 1.0, -5.0),
                target: Vec3::new(0.0, -0.2, 0.0),
                up: Vec3::Y,
                fov_y_degrees: 50.0,
                aspect: 1.0,
            },
            lighting: Lighting::default(),
            point_lights: vec![PointLight::new(
                Vec3::new(1.5, 2.0, -2.0),
                Vec3::new(1.0, 0.9, 0.7),
                0.8,
                3.0,
            )],
            time: 0.0,
        }
    }

    /// Check what the renderer cannot clamp for itself
    pub fn validate(&self) -> Result<(), IoError> {
        if self.version > SCENE_VERSION {
            return Err(IoError::InvalidScene(format!(
                "unsupported scene version {}",
                self.version
            )));
        }
        if !self.smooth_k.is_finite() {
            return Err(IoError::InvalidScene("smooth_k must be finite".to_string()));
        }
        self.camera.to_camera()?;
        Ok(())
    }

    /// Load the description into a renderer and commit it
    ///
    /// Entries beyond the renderer's table capacities are dropped with a
    /// warning.
    pub fn apply(&self, renderer: &mut RendererState) -> Result<(), IoError> {
        self.validate()?;
        let camera = self.camera.to_camera()?;

        if self.shapes.len() > MAX_SHAPES {
            log::warn!("scene has {} shapes, keeping the first {}", self.shapes.len(), MAX_SHAPES);
        }
        if self.groups.len() > MAX_GROUPS {
            log::warn!("scene has {} groups, keeping the first {}", self.groups.len(), MAX_GROUPS);
        }
        if self.point_lights.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "scene has {} point lights, keeping the first {}",
                self.point_lights.len(),
                MAX_POINT_LIGHTS
            );
        }

        let n_shapes = self.shapes.len().min(MAX_SHAPES);
        renderer.shapes_mut()[..n_shapes].copy_from_slice(&self.shapes[..n_shapes]);
        let n_groups = self.groups.len().min(MAX_GROUPS);
        renderer.blend_modes_mut()[..n_groups].copy_from_slice(&self.groups[..n_groups]);
        let n_lights = self.point_lights.len().min(MAX_POINT_LIGHTS);
        renderer.point_lights_mut()[..n_lights].copy_from_slice(&self.point_lights[..n_lights]);

        renderer.set_groups(n_groups as u32);
        renderer.set_scene(n_shapes as u32, self.smooth_k);
        renderer.set_point_lights(n_lights as u32);
        renderer.set_camera(camera);

        let dir = self.lighting.direction;
        renderer.set_lighting(self.lighting.ambient, dir.x, dir.y, dir.z, self.lighting.intensity);
        renderer.compute_background(self.time);

        log::info!(
            "applied scene: {} shapes, {} groups, {} point lights",
            n_shapes,
            n_groups,
            n_lights
        );
        Ok(())
    }
}

/// Save a scene description as pretty JSON (streaming)
pub fn save_scene_json(scene: &SceneDescription, path: impl AsRef<Path>) -> Result<(), IoError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, scene).map_err(|e| IoError::Serialization(e.to_string()))?;
    Ok(())
}

/// Decode a parsed JSON document; only a top-level object is a description
fn from_value(value: serde_json::Value) -> Result<SceneDescription, IoError> {
    if !value.is_object() {
        return Err(IoError::Serialization(
            "scene description must be a JSON object".to_string(),
        ));
    }
    let scene: SceneDescription =
        serde_json::from_value(value).map_err(|e| IoError::Serialization(e.to_string()))?;
    scene.validate()?;
    Ok(scene)
}

/// Load a scene description from JSON (streaming)
pub fn load_scene_json(path: impl AsRef<Path>) -> Result<SceneDescription, IoError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value =
        serde_json::from_reader(reader).map_err(|e| IoError::Serialization(e.to_string()))?;
    from_value(value)
}

/// Serialize a scene description to a JSON string
pub fn to_json_string(scene: &SceneDescription) -> Result<String, IoError> {
    serde_json::to_string_pretty(scene).map_err(|e| IoError::Serialization(e.to_string()))
}

/// Parse a scene description from a JSON string
pub fn from_json_str(json: &str) -> Result<SceneDescription, IoError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| IoError::Serialization(e.to_string()))?;
    from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::ShapeKind;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("alice_sdf_term_json_{}", name));
        path
    }

    #[test]
    fn test_save_load_demo() {
        let scene = SceneDescription::demo();
        let path = temp_path("demo.json");

        save_scene_json(&scene, &path).unwrap();
        let loaded = load_scene_json(&path).unwrap();

        assert_eq!(loaded, scene);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{ "shapes": [ { "kind": "sphere", "position": [0, 0, 0], "params": [1, 0, 0, 0], "color": [1, 1, 1] } ] }"#;
        let scene = from_json_str(json).unwrap();
        assert_eq!(scene.version, SCENE_VERSION);
        assert_eq!(scene.shapes.len(), 1);
        assert_eq!(scene.shapes[0].kind, ShapeKind::Sphere);
        assert_eq!(scene.shapes[0].group, 0);
        assert_eq!(scene.smooth_k, DEFAULT_SMOOTH_K);
        assert_eq!(scene.lighting, Lighting::default());
        assert_eq!(scene.camera, CameraDescription::default());
    }

    #[test]
    fn test_look_at_camera_json() {
        let json = r#"{ "camera": { "type": "look_at", "eye": [0, 0, -5], "target": [0, 0, 0] } }"#;
        let scene = from_json_str(json).unwrap();
        let camera = scene.camera.to_camera().unwrap();
        assert!((camera.forward - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_json_readability() {
        let json = to_json_string(&SceneDescription::demo()).unwrap();
        assert!(json.contains("\"shapes\""));
        assert!(json.contains("\"smooth_union\""));
        assert!(json.contains("\"cylinder_y\""));
        assert!(json.contains("\"look_at\""));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(from_json_str("{ not json"), Err(IoError::Serialization(_))));
    }

    #[test]
    fn test_non_object_rejected() {
        for json in ["[]", "[1, 2]", "42", "null", "\"scene\""] {
            assert!(
                matches!(from_json_str(json), Err(IoError::Serialization(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_demo_has_current_version() {
        assert_eq!(SceneDescription::demo().version, SCENE_VERSION);
    }

    #[test]
    fn test_degenerate_camera_rejected() {
        let json = r#"{ "camera": { "type": "look_at", "eye": [1, 1, 1], "target": [1, 1, 1] } }"#;
        assert!(matches!(from_json_str(json), Err(IoError::InvalidScene(_))));
    }

    #[test]
    fn test_future_version_rejected() {
        let json = r#"{ "version": 99 }"#;
        assert!(matches!(from_json_str(json), Err(IoError::InvalidScene(_))));
    }

    #[test]
    fn test_apply_commits_tables() {
        let mut renderer = RendererState::new();
        SceneDescription::demo().apply(&mut renderer).unwrap();
        assert_eq!(renderer.scene().shape_count(), 6);
        assert_eq!(renderer.scene().group_count(), 3);
        assert_eq!(renderer.point_lights().count(), 1);
    }

    #[test]
    fn test_apply_truncates_to_capacity() {
        let mut scene = SceneDescription::default();
        scene.shapes = vec![Shape::sphere(Vec3::ZERO, 1.0); MAX_SHAPES + 10];
        scene.groups = vec![BlendMode::HardUnion; MAX_GROUPS + 1];
        let mut renderer = RendererState::new();
        scene.apply(&mut renderer).unwrap();
        assert_eq!(renderer.scene().shape_count(), MAX_SHAPES);
        assert_eq!(renderer.scene().group_count(), MAX_GROUPS);
    }
}
