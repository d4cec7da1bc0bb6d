//! Scene description types.
//!
//! These mirror the JSON scene document one-to-one and stay renderer-agnostic:
//! the renderer turns a [`SceneDescription`] into hittables, materials and lights.
//! Every optional field has a default so a minimal document is a valid scene.

use prism_math::Vec3;
use serde::Deserialize;

use crate::mesh::Mesh;

fn default_color() -> Vec3 {
    Vec3::splat(0.5)
}

fn default_fuzz() -> f32 {
    0.1
}

fn default_ior() -> f32 {
    1.5
}

fn default_intensity() -> Vec3 {
    Vec3::ONE
}

fn default_texture_scale() -> f32 {
    10.0
}

fn default_stripe_axis() -> Vec3 {
    Vec3::X
}

fn default_inner_angle() -> f32 {
    15.0
}

fn default_outer_angle() -> f32 {
    30.0
}

/// Camera block. Angles are in degrees.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aperture: f32,
    pub focus_distance: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 20.0,
            aperture: 0.1,
            focus_distance: 10.0,
        }
    }
}

/// Surface response selector, encoded as an integer in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum MaterialKind {
    #[default]
    Diffuse,
    Metal,
    Glass,
}

impl TryFrom<u8> for MaterialKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MaterialKind::Diffuse),
            1 => Ok(MaterialKind::Metal),
            2 => Ok(MaterialKind::Glass),
            other => Err(format!(
                "unknown material_type {} (expected 0=diffuse, 1=metal, 2=glass)",
                other
            )),
        }
    }
}

/// Procedural texture block. Only meaningful for diffuse surfaces.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TextureDesc {
    Checker {
        color1: Vec3,
        color2: Vec3,
        #[serde(default = "default_texture_scale")]
        scale: f32,
    },
    Stripes {
        color1: Vec3,
        color2: Vec3,
        #[serde(default = "default_stripe_axis")]
        axis: Vec3,
        #[serde(default = "default_texture_scale")]
        scale: f32,
    },
}

/// Material fields shared by every object type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SurfaceDesc {
    #[serde(default)]
    pub material_type: MaterialKind,
    /// Base color (albedo for diffuse and metal)
    #[serde(default = "default_color")]
    pub color: Vec3,
    /// Metal roughness
    #[serde(default = "default_fuzz")]
    pub fuzz: f32,
    /// Glass index of refraction
    #[serde(default = "default_ior")]
    pub ior: f32,
    #[serde(default)]
    pub texture: Option<TextureDesc>,
}

impl Default for SurfaceDesc {
    fn default() -> Self {
        Self {
            material_type: MaterialKind::Diffuse,
            color: default_color(),
            fuzz: default_fuzz(),
            ior: default_ior(),
            texture: None,
        }
    }
}

/// Geometry of one object, tagged by `type`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDesc {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
    },
    Cylinder {
        base: Vec3,
        axis: Vec3,
        radius: f32,
        height: f32,
    },
    Cone {
        apex: Vec3,
        axis: Vec3,
        /// Half-angle in degrees
        angle: f32,
        height: f32,
    },
    Triangle {
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
    },
    Box {
        min: Vec3,
        max: Vec3,
    },
    Mesh(Mesh),
}

impl ShapeDesc {
    /// Name of the `type` tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeDesc::Sphere { .. } => "sphere",
            ShapeDesc::Plane { .. } => "plane",
            ShapeDesc::Cylinder { .. } => "cylinder",
            ShapeDesc::Cone { .. } => "cone",
            ShapeDesc::Triangle { .. } => "triangle",
            ShapeDesc::Box { .. } => "box",
            ShapeDesc::Mesh(_) => "mesh",
        }
    }
}

/// An entry of the `objects` array.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectDesc {
    #[serde(flatten)]
    pub shape: ShapeDesc,
    #[serde(flatten)]
    pub surface: SurfaceDesc,
}

/// An entry of the `lights` array. Angles are in degrees.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightDesc {
    Point {
        position: Vec3,
        #[serde(default = "default_intensity")]
        intensity: Vec3,
    },
    Directional {
        direction: Vec3,
        #[serde(default = "default_intensity")]
        intensity: Vec3,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        #[serde(default = "default_intensity")]
        intensity: Vec3,
        #[serde(default = "default_inner_angle")]
        inner_angle: f32,
        #[serde(default = "default_outer_angle")]
        outer_angle: f32,
    },
}

/// Background selection for rays that escape the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundDesc {
    Black,
    Sky,
}

/// Optional render settings carried by the document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderDesc {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub background: Option<BackgroundDesc>,
}

/// A complete scene document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub render: Option<RenderDesc>,
}

impl SceneDescription {
    /// Number of objects, counting each mesh as one.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of primitives after mesh expansion.
    pub fn primitive_count(&self) -> usize {
        self.objects
            .iter()
            .map(|o| match &o.shape {
                ShapeDesc::Mesh(mesh) => mesh.triangle_count(),
                _ => 1,
            })
            .sum()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
