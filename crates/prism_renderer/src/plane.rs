//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialRef,
};
use prism_math::{Aabb, Interval, Ray, Vec3};

/// Half-extent of the finite box standing in for an unbounded plane.
const PLANE_EXTENT: f32 = 1.0e6;

/// Rays closer than this to parallel miss the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `point` with normal `normal`.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: MaterialRef,
}

impl Plane {
    /// Create a new plane. A zero normal yields a plane that is never hit.
    pub fn new(point: Vec3, normal: Vec3, material: MaterialRef) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            Some(self.material.as_ref()),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            Vec3::splat(-PLANE_EXTENT),
            Vec3::splat(PLANE_EXTENT),
        )
    }
}
