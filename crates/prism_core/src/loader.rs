//! Scene document loading and validation.
//!
//! Loading is all-or-nothing: a document either parses and validates
//! completely, or the caller gets a [`LoadError`] and no scene.

use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::scene::{CameraDesc, LightDesc, ObjectDesc, SceneDescription, ShapeDesc, TextureDesc};

/// Errors that can occur while loading a scene document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and validate a JSON scene file.
///
/// # Example
///
/// ```ignore
/// use prism_core::load_scene;
///
/// let scene = load_scene("scenes/spheres.json")?;
/// println!("Loaded {} objects, {} lights", scene.object_count(), scene.light_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {}: {} objects ({} primitives), {} lights",
        path.display(),
        scene.object_count(),
        scene.primitive_count(),
        scene.light_count()
    );

    Ok(scene)
}

/// Parse and validate a JSON scene document held in memory.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    validate(&scene)?;
    Ok(scene)
}

impl SceneDescription {
    /// See [`validate`].
    pub fn validate(&self) -> LoadResult<()> {
        validate(self)
    }
}

/// Check a parsed description for values the renderer cannot use.
pub fn validate(scene: &SceneDescription) -> LoadResult<()> {
    validate_camera(&scene.camera)?;

    for (index, object) in scene.objects.iter().enumerate() {
        validate_object(object).map_err(|reason| {
            LoadError::Invalid(format!(
                "object {} ({}): {}",
                index,
                object.shape.kind(),
                reason
            ))
        })?;
    }

    for (index, light) in scene.lights.iter().enumerate() {
        validate_light(light)
            .map_err(|reason| LoadError::Invalid(format!("light {}: {}", index, reason)))?;
    }

    if let Some(render) = &scene.render {
        if render.width == Some(0) || render.height == Some(0) {
            return Err(LoadError::Invalid("render: image size must be non-zero".into()));
        }
    }

    Ok(())
}

fn finite(name: &str, v: Vec3) -> Result<(), String> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(format!("{} has a non-finite component", name))
    }
}

fn finite_scalar(name: &str, x: f32) -> Result<(), String> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(format!("{} is not finite", name))
    }
}

fn non_zero(name: &str, v: Vec3) -> Result<(), String> {
    finite(name, v)?;
    if v.length_squared() > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be non-zero", name))
    }
}

fn validate_camera(camera: &CameraDesc) -> LoadResult<()> {
    let check = || -> Result<(), String> {
        finite("position", camera.position)?;
        finite("look_at", camera.look_at)?;
        non_zero("up", camera.up)?;

        let view = camera.look_at - camera.position;
        if view.length_squared() == 0.0 {
            return Err("position and look_at coincide".into());
        }
        if view.cross(camera.up).length_squared() <= 1e-12 {
            return Err("up vector is parallel to the view direction".into());
        }
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(format!("fov {} outside (0, 180)", camera.fov));
        }
        if !(camera.aperture >= 0.0) || !camera.aperture.is_finite() {
            return Err(format!("aperture {} must be >= 0", camera.aperture));
        }
        if !(camera.focus_distance > 0.0) || !camera.focus_distance.is_finite() {
            return Err(format!(
                "focus_distance {} must be > 0",
                camera.focus_distance
            ));
        }
        Ok(())
    };

    check().map_err(|reason| LoadError::Invalid(format!("camera: {}", reason)))
}

fn validate_object(object: &ObjectDesc) -> Result<(), String> {
    match &object.shape {
        ShapeDesc::Sphere { center, radius } => {
            finite("center", *center)?;
            // Negative radii load; the renderer clamps them to zero
            finite_scalar("radius", *radius)?;
        }
        ShapeDesc::Plane { point, normal } => {
            finite("point", *point)?;
            non_zero("normal", *normal)?;
        }
        ShapeDesc::Cylinder {
            base,
            axis,
            radius,
            height,
        } => {
            finite("base", *base)?;
            non_zero("axis", *axis)?;
            finite_scalar("radius", *radius)?;
            finite_scalar("height", *height)?;
            if *radius < 0.0 || *height < 0.0 {
                return Err("radius and height must be >= 0".into());
            }
        }
        ShapeDesc::Cone {
            apex,
            axis,
            angle,
            height,
        } => {
            finite("apex", *apex)?;
            non_zero("axis", *axis)?;
            finite_scalar("height", *height)?;
            if *height < 0.0 {
                return Err(format!("height {} is negative", height));
            }
            if !(*angle > 0.0 && *angle < 90.0) {
                return Err(format!("angle {} outside (0, 90) degrees", angle));
            }
        }
        ShapeDesc::Triangle { v0, v1, v2 } => {
            finite("v0", *v0)?;
            finite("v1", *v1)?;
            finite("v2", *v2)?;
        }
        ShapeDesc::Box { min, max } => {
            finite("min", *min)?;
            finite("max", *max)?;
        }
        ShapeDesc::Mesh(mesh) => {
            mesh.check()?;
            for p in &mesh.positions {
                finite("vertex", *p)?;
            }
        }
    }

    let surface = &object.surface;
    finite("color", surface.color)?;
    finite_scalar("fuzz", surface.fuzz)?;
    if !(surface.ior > 0.0) || !surface.ior.is_finite() {
        return Err(format!("ior {} must be > 0", surface.ior));
    }
    match &surface.texture {
        Some(TextureDesc::Checker {
            color1,
            color2,
            scale,
        }) => {
            finite("texture color1", *color1)?;
            finite("texture color2", *color2)?;
            finite_scalar("texture scale", *scale)?;
        }
        Some(TextureDesc::Stripes {
            color1,
            color2,
            axis,
            scale,
        }) => {
            finite("texture color1", *color1)?;
            finite("texture color2", *color2)?;
            finite("texture axis", *axis)?;
            finite_scalar("texture scale", *scale)?;
        }
        None => {}
    }

    Ok(())
}

fn validate_light(light: &LightDesc) -> Result<(), String> {
    match light {
        LightDesc::Point {
            position,
            intensity,
        } => {
            finite("position", *position)?;
            finite("intensity", *intensity)?;
        }
        LightDesc::Directional {
            direction,
            intensity,
        } => {
            non_zero("direction", *direction)?;
            finite("intensity", *intensity)?;
        }
        LightDesc::Spot {
            position,
            direction,
            intensity,
            inner_angle,
            outer_angle,
        } => {
            finite("position", *position)?;
            non_zero("direction", *direction)?;
            finite("intensity", *intensity)?;
            finite_scalar("inner_angle", *inner_angle)?;
            finite_scalar("outer_angle", *outer_angle)?;
            if inner_angle > outer_angle {
                return Err(format!(
                    "inner_angle {} exceeds outer_angle {}",
                    inner_angle, outer_angle
                ));
            }
            if *inner_angle < 0.0 || *outer_angle >= 180.0 {
                return Err("spot angles must lie in [0, 180) degrees".into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BackgroundDesc, MaterialKind};

    const FULL_SCENE: &str = r#"{
        "camera": { "position": [0, -10, 0], "look_at": [0, 0, 0], "up": [0, 0, 1],
                    "fov": 40, "aperture": 0, "focus_distance": 10 },
        "objects": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material_type": 0,
              "color": [0.5, 0.5, 0.5],
              "texture": { "type": "checker", "color1": [1, 1, 1], "color2": [0, 0, 0], "scale": 4 } },
            { "type": "plane", "point": [0, 0, -1], "normal": [0, 0, 1], "material_type": 1,
              "color": [0.8, 0.8, 0.8], "fuzz": 0.3 },
            { "type": "cylinder", "base": [2, 0, -1], "axis": [0, 0, 1], "radius": 0.5, "height": 2 },
            { "type": "cone", "apex": [-2, 0, 1], "axis": [0, 0, -1], "angle": 25, "height": 2,
              "texture": { "type": "stripes", "color1": [1, 0, 0], "color2": [0, 0, 1], "axis": [0, 0, 1] } },
            { "type": "triangle", "v0": [0, 2, 0], "v1": [1, 2, 0], "v2": [0, 2, 1] },
            { "type": "box", "min": [-1, 3, -1], "max": [1, 4, 1], "material_type": 2, "ior": 1.33 },
            { "type": "mesh", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "indices": [0, 1, 2] }
        ],
        "lights": [
            { "type": "point", "position": [5, 5, 5], "intensity": [1, 1, 1] },
            { "type": "directional", "direction": [0, 0, -1] },
            { "type": "spot", "position": [0, 0, 5], "direction": [0, 0, -1], "inner_angle": 10 }
        ],
        "render": { "width": 64, "height": 48, "samples_per_pixel": 4, "background": "sky" }
    }"#;

    #[test]
    fn test_load_full_scene() {
        let scene = load_scene_from_str(FULL_SCENE).unwrap();

        assert_eq!(scene.object_count(), 7);
        assert_eq!(scene.light_count(), 3);
        assert_eq!(scene.camera.position, Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(scene.camera.fov, 40.0);

        let kinds: Vec<_> = scene.objects.iter().map(|o| o.shape.kind()).collect();
        assert_eq!(
            kinds,
            ["sphere", "plane", "cylinder", "cone", "triangle", "box", "mesh"]
        );

        assert_eq!(scene.objects[1].surface.material_type, MaterialKind::Metal);
        assert_eq!(scene.objects[1].surface.fuzz, 0.3);
        assert_eq!(scene.objects[5].surface.material_type, MaterialKind::Glass);
        assert!((scene.objects[5].surface.ior - 1.33).abs() < 1e-6);
        assert!(matches!(
            scene.objects[0].surface.texture,
            Some(TextureDesc::Checker { scale, .. }) if scale == 4.0
        ));

        let render = scene.render.unwrap();
        assert_eq!(render.width, Some(64));
        assert_eq!(render.background, Some(BackgroundDesc::Sky));
        assert_eq!(render.max_depth, None);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let scene = load_scene_from_str(
            r#"{ "objects": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1 } ],
                 "lights": [ { "type": "spot", "position": [0, 5, 0], "direction": [0, -1, 0] } ] }"#,
        )
        .unwrap();

        assert_eq!(scene.camera, CameraDesc::default());
        let surface = &scene.objects[0].surface;
        assert_eq!(surface.material_type, MaterialKind::Diffuse);
        assert_eq!(surface.color, Vec3::splat(0.5));
        assert_eq!(surface.fuzz, 0.1);
        assert_eq!(surface.ior, 1.5);
        assert!(surface.texture.is_none());

        match &scene.lights[0] {
            LightDesc::Spot {
                intensity,
                inner_angle,
                outer_angle,
                ..
            } => {
                assert_eq!(*intensity, Vec3::ONE);
                assert_eq!(*inner_angle, 15.0);
                assert_eq!(*outer_angle, 30.0);
            }
            other => panic!("unexpected light {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_is_valid() {
        let scene = load_scene_from_str("{}").unwrap();
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.light_count(), 0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = load_scene_from_str(r#"{ "objects": [ { "type": "sphere", "#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let err = load_scene_from_str(r#"{ "objects": [ { "type": "torus", "radius": 1 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let err = load_scene_from_str(r#"{ "objects": [ { "type": "sphere", "radius": 1 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_bad_material_type_is_parse_error() {
        let err = load_scene_from_str(
            r#"{ "objects": [ { "type": "sphere", "center": [0,0,0], "radius": 1, "material_type": 7 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_degenerate_camera_is_invalid() {
        let err = load_scene_from_str(
            r#"{ "camera": { "position": [0, 5, 0], "look_at": [0, 0, 0], "up": [0, 1, 0] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ref msg) if msg.contains("parallel")));

        let err = load_scene_from_str(r#"{ "camera": { "fov": 0 } }"#).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_negative_sphere_radius_loads() {
        let desc = load_scene_from_str(
            r#"{ "objects": [ { "type": "sphere", "center": [0,0,0], "radius": -2 } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            desc.objects[0].shape,
            ShapeDesc::Sphere { radius, .. } if radius == -2.0
        ));

        // Cylinders have no such leniency
        let err = load_scene_from_str(
            r#"{ "objects": [ { "type": "cylinder", "base": [0,0,0], "axis": [0,1,0],
                                "radius": -1, "height": 1 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ref msg) if msg.contains("object 0 (cylinder)")));
    }

    #[test]
    fn test_spot_angles_are_checked() {
        let err = load_scene_from_str(
            r#"{ "lights": [ { "type": "spot", "position": [0,5,0], "direction": [0,-1,0],
                               "inner_angle": 40, "outer_angle": 20 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ref msg) if msg.contains("light 0")));
    }

    #[test]
    fn test_mesh_index_errors_are_invalid() {
        let err = load_scene_from_str(
            r#"{ "objects": [ { "type": "mesh", "vertices": [[0,0,0],[1,0,0],[0,1,0]], "indices": [0, 1, 3] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ref msg) if msg.contains("mesh")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
