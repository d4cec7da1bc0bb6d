//! Scene assembly: camera, primitives and lights frozen for rendering.

use crate::{
    AxisBox, BvhNode, Camera, Color, Cone, Cylinder, Dielectric, DirectionalLight, HitRecord,
    Hittable, HittableList, Lambertian, Light, LightList, MaterialRef, Metal, Plane, PointLight,
    Sphere, SpotLight, Texture, Triangle,
};
use prism_core::{
    CameraDesc, LightDesc, MaterialKind, SceneDescription, ShapeDesc, SurfaceDesc, TextureDesc,
};
use prism_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// How the primitive collection is searched for the closest hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Acceleration {
    /// Bounding volume hierarchy.
    #[default]
    Bvh,
    /// Linear scan over every primitive.
    List,
}

/// A renderable scene. Immutable once built, so it can be shared across
/// render threads by reference.
pub struct Scene {
    camera: Camera,
    world: Box<dyn Hittable>,
    lights: LightList,
    primitive_count: usize,
}

impl Scene {
    /// Build a scene from a loaded description using a BVH.
    pub fn from_description(desc: &SceneDescription, aspect_ratio: f32) -> Self {
        SceneBuilder::from_description(desc, aspect_ratio).build()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lights(&self) -> &LightList {
        &self.lights
    }

    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    /// Closest hit along `ray` within `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.world.hit(ray, ray_t)
    }

    /// Total direct light reaching the surface at `rec`, if any light does.
    pub fn illuminate(&self, rec: &HitRecord) -> Option<Color> {
        self.lights.illuminate(rec, self.world.as_ref())
    }
}

/// Collects primitives, lights and a camera, then freezes them into a [`Scene`].
pub struct SceneBuilder {
    camera: Camera,
    objects: Vec<Box<dyn Hittable>>,
    lights: LightList,
    acceleration: Acceleration,
    seed: u64,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            objects: Vec::new(),
            lights: LightList::new(),
            acceleration: Acceleration::default(),
            seed: 0,
        }
    }

    /// Convert a loaded description. Meshes expand into one triangle per face,
    /// all sharing the mesh's material.
    pub fn from_description(desc: &SceneDescription, aspect_ratio: f32) -> Self {
        let mut builder = Self::new().camera(camera_from_desc(&desc.camera, aspect_ratio));

        for object in &desc.objects {
            let material = material_from_desc(&object.surface);
            builder.add_shape(&object.shape, material);
        }
        for light in &desc.lights {
            builder.add_light(light_from_desc(light));
        }

        builder
    }

    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Seed for the BVH split-axis choices.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn add_object(&mut self, object: Box<dyn Hittable>) -> &mut Self {
        self.objects.push(object);
        self
    }

    pub fn add_light(&mut self, light: Box<dyn Light>) -> &mut Self {
        self.lights.add(light);
        self
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn add_shape(&mut self, shape: &ShapeDesc, material: MaterialRef) {
        match shape {
            ShapeDesc::Sphere { center, radius } => {
                if *radius < 0.0 {
                    log::warn!("Sphere radius {} clamped to 0", radius);
                }
                self.add_object(Box::new(Sphere::new(*center, *radius, material)));
            }
            ShapeDesc::Plane { point, normal } => {
                self.add_object(Box::new(Plane::new(*point, *normal, material)));
            }
            ShapeDesc::Cylinder {
                base,
                axis,
                radius,
                height,
            } => {
                self.add_object(Box::new(Cylinder::new(
                    *base, *axis, *radius, *height, material,
                )));
            }
            ShapeDesc::Cone {
                apex,
                axis,
                angle,
                height,
            } => {
                self.add_object(Box::new(Cone::new(
                    *apex,
                    *axis,
                    angle.to_radians(),
                    *height,
                    material,
                )));
            }
            ShapeDesc::Triangle { v0, v1, v2 } => {
                self.add_object(Box::new(Triangle::new(*v0, *v1, *v2, material)));
            }
            ShapeDesc::Box { min, max } => {
                self.add_object(Box::new(AxisBox::new(*min, *max, material)));
            }
            ShapeDesc::Mesh(mesh) => {
                for [v0, v1, v2] in mesh.triangles() {
                    self.add_object(Box::new(Triangle::new(v0, v1, v2, material.clone())));
                }
            }
        }
    }

    /// Freeze the builder into a scene.
    pub fn build(self) -> Scene {
        let primitive_count = self.objects.len();

        let world: Box<dyn Hittable> = match self.acceleration {
            Acceleration::Bvh => {
                let start = std::time::Instant::now();
                let mut rng = StdRng::seed_from_u64(self.seed);
                let bvh = BvhNode::new(self.objects, &mut rng);
                log::debug!(
                    "Built BVH over {} primitives in {:.2?} (depth {})",
                    primitive_count,
                    start.elapsed(),
                    bvh.depth()
                );
                Box::new(bvh)
            }
            Acceleration::List => Box::new(HittableList::from(self.objects)),
        };

        log::info!(
            "Scene ready: {} primitives, {} lights ({:?})",
            primitive_count,
            self.lights.len(),
            self.acceleration
        );

        Scene {
            camera: self.camera,
            world,
            lights: self.lights,
            primitive_count,
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn camera_from_desc(desc: &CameraDesc, aspect_ratio: f32) -> Camera {
    Camera::setup(
        desc.position,
        desc.look_at,
        desc.up,
        desc.fov,
        aspect_ratio,
        desc.aperture,
        desc.focus_distance,
    )
}

fn texture_from_desc(desc: &TextureDesc) -> Texture {
    match desc {
        TextureDesc::Checker {
            color1,
            color2,
            scale,
        } => Texture::checker(Texture::solid(*color1), Texture::solid(*color2), *scale),
        TextureDesc::Stripes {
            color1,
            color2,
            axis,
            scale,
        } => Texture::stripe(
            Texture::solid(*color1),
            Texture::solid(*color2),
            *axis,
            *scale,
        ),
    }
}

fn material_from_desc(desc: &SurfaceDesc) -> MaterialRef {
    if desc.texture.is_some() && desc.material_type != MaterialKind::Diffuse {
        log::warn!(
            "Texture ignored on {:?} material; only diffuse surfaces are textured",
            desc.material_type
        );
    }

    match desc.material_type {
        MaterialKind::Diffuse => match &desc.texture {
            Some(texture) => Arc::new(Lambertian::textured(texture_from_desc(texture))),
            None => Arc::new(Lambertian::new(desc.color)),
        },
        MaterialKind::Metal => Arc::new(Metal::new(desc.color, desc.fuzz)),
        MaterialKind::Glass => Arc::new(Dielectric::new(desc.ior)),
    }
}

fn light_from_desc(desc: &LightDesc) -> Box<dyn Light> {
    match desc {
        LightDesc::Point {
            position,
            intensity,
        } => Box::new(PointLight::new(*position, *intensity)),
        LightDesc::Directional {
            direction,
            intensity,
        } => Box::new(DirectionalLight::new(*direction, *intensity)),
        LightDesc::Spot {
            position,
            direction,
            intensity,
            inner_angle,
            outer_angle,
        } => Box::new(SpotLight::new(
            *position,
            *direction,
            *intensity,
            inner_angle.to_radians(),
            outer_angle.to_radians(),
        )),
    }
}
