//! Analytic light sources and shadow-tested direct lighting.
//!
//! A light answers one question for a surface point: how much light reaches
//! it directly, if any. Occlusion is decided by casting a shadow ray through
//! the same [`Hittable`] world that camera rays are traced against.

use crate::{
    hittable::{HitRecord, Hittable},
    Color,
};
use prism_math::{Interval, Ray, Vec3};

/// Shadow rays start this far off the surface along the normal.
pub const SHADOW_OFFSET: f32 = 0.001;

/// Upper bound on shadow-ray length for lights at infinity.
const DIRECTIONAL_DISTANCE: f32 = 1e10;

/// A source of direct illumination.
pub trait Light: Send + Sync {
    /// Light arriving at `rec.p`, or `None` if the point is in shadow or
    /// outside the light's reach.
    fn illuminate(&self, rec: &HitRecord, world: &dyn Hittable) -> Option<Color>;
}

/// True if something in `world` sits between the surface and the light.
fn occluded(rec: &HitRecord, world: &dyn Hittable, to_light: Vec3, distance: f32) -> bool {
    let shadow_ray = Ray::new(rec.p + rec.normal * SHADOW_OFFSET, to_light);
    world
        .hit(&shadow_ray, Interval::new(SHADOW_OFFSET, distance))
        .is_some()
}

/// Lambert-weighted contribution of a light arriving from unit direction `to_light`.
fn shade(rec: &HitRecord, to_light: Vec3, intensity: Color) -> Color {
    let cos_theta = rec.normal.dot(to_light).max(0.0);
    let surface = rec
        .material
        .map_or(Color::ONE, |material| material.base_color(rec.p));
    surface * intensity * cos_theta
}

/// Omnidirectional light at a point.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Light for PointLight {
    fn illuminate(&self, rec: &HitRecord, world: &dyn Hittable) -> Option<Color> {
        let offset = self.position - rec.p;
        let distance = offset.length();
        if distance <= 0.0 {
            return None;
        }
        let to_light = offset / distance;

        if occluded(rec, world, to_light, distance) {
            return None;
        }
        Some(shade(rec, to_light, self.intensity))
    }
}

/// Parallel light arriving from infinitely far away.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    direction: Vec3,
    intensity: Color,
}

impl DirectionalLight {
    /// `direction` is the way the light travels (from the light into the scene).
    pub fn new(direction: Vec3, intensity: Color) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            intensity,
        }
    }
}

impl Light for DirectionalLight {
    fn illuminate(&self, rec: &HitRecord, world: &dyn Hittable) -> Option<Color> {
        let to_light = -self.direction;
        if to_light == Vec3::ZERO {
            return None;
        }

        if occluded(rec, world, to_light, DIRECTIONAL_DISTANCE) {
            return None;
        }
        Some(shade(rec, to_light, self.intensity))
    }
}

/// Point light restricted to a cone, with a soft edge between two angles.
#[derive(Clone, Debug)]
pub struct SpotLight {
    position: Vec3,
    /// Unit axis of the cone
    direction: Vec3,
    intensity: Color,
    cos_inner: f32,
    cos_outer: f32,
}

impl SpotLight {
    /// Create a spot light. Angles are half-angles in radians, measured from
    /// `direction`; full intensity inside `inner`, nothing beyond `outer`.
    pub fn new(position: Vec3, direction: Vec3, intensity: Color, inner: f32, outer: f32) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            intensity,
            cos_inner: inner.cos(),
            cos_outer: outer.cos(),
        }
    }

    /// Cone attenuation for a point seen at `cos_angle` off the axis.
    fn falloff(&self, cos_angle: f32) -> Option<f32> {
        if cos_angle < self.cos_outer {
            return None;
        }
        if cos_angle >= self.cos_inner {
            return Some(1.0);
        }
        Some(((cos_angle - self.cos_outer) / (self.cos_inner - self.cos_outer)).clamp(0.0, 1.0))
    }
}

impl Light for SpotLight {
    fn illuminate(&self, rec: &HitRecord, world: &dyn Hittable) -> Option<Color> {
        let offset = self.position - rec.p;
        let distance = offset.length();
        if distance <= 0.0 {
            return None;
        }
        let to_light = offset / distance;

        let factor = self.falloff((-to_light).dot(self.direction))?;

        if occluded(rec, world, to_light, distance) {
            return None;
        }
        Some(shade(rec, to_light, self.intensity * factor))
    }
}

/// A collection of lights whose contributions add up.
#[derive(Default)]
pub struct LightList {
    lights: Vec<Box<dyn Light>>,
}

impl LightList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, light: Box<dyn Light>) {
        self.lights.push(light);
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

impl Light for LightList {
    /// Sum of every light that reaches the point; `None` if none do.
    fn illuminate(&self, rec: &HitRecord, world: &dyn Hittable) -> Option<Color> {
        self.lights
            .iter()
            .filter_map(|light| light.illuminate(rec, world))
            .reduce(|a, b| a + b)
    }
}
