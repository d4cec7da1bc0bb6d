//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use prism_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Created fresh by each successful `hit` and consumed by the caller; it
/// borrows the material of the object that produced it.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point, if the object has one
    pub material: Option<&'a dyn Material>,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t`, orienting the normal against the ray.
    ///
    /// `outward_normal` must be unit length and point out of the surface.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: Option<&'a dyn Material>,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .field("has_material", &self.material.is_some())
            .finish()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the closest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A flat list of hittable objects, tested one by one.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Box<dyn Hittable>>) -> Self {
        let mut list = Self::new();
        for object in objects {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    #[test]
    fn test_set_face_normal_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, None);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_set_face_normal_back() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, None);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_list_returns_closest() {
        let mat = Arc::new(Lambertian::new(Vec3::splat(0.5)));
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, mat.clone())));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, mat.clone())));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, mat)));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let rec = list.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(list.len(), 3);
        assert_eq!(list.bounding_box().z.min, -11.0);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert!(list.is_empty());
        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
        assert!(list.bounding_box().is_empty());
    }

    #[test]
    fn test_normals_always_face_the_ray() {
        use crate::sampling::{gen_range, random_unit_vector};
        use crate::{AxisBox, Cone, Cylinder, Plane, Triangle};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mat: crate::MaterialRef = Arc::new(Lambertian::new(Vec3::splat(0.5)));
        let shapes: Vec<Box<dyn Hittable>> = vec![
            Box::new(Sphere::new(Vec3::ZERO, 1.0, mat.clone())),
            Box::new(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, mat.clone())),
            Box::new(Triangle::new(
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, -1.0),
                mat.clone(),
            )),
            Box::new(Cylinder::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, 0.7, 2.0, mat.clone())),
            Box::new(Cone::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.5, 2.0, mat.clone())),
            Box::new(AxisBox::new(Vec3::splat(-0.8), Vec3::splat(0.8), mat)),
        ];

        let mut rng = StdRng::seed_from_u64(11);
        for shape in &shapes {
            let mut hits = 0;
            for _ in 0..400 {
                // Origins both outside and inside the shapes
                let origin = random_unit_vector(&mut rng) * gen_range(&mut rng, 0.0, 4.0);
                let ray = Ray::new(origin, random_unit_vector(&mut rng));
                if let Some(rec) = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
                    hits += 1;
                    assert!(ray.direction().dot(rec.normal) <= 1e-6);
                    assert!((rec.normal.length() - 1.0).abs() < 1e-3);
                }
            }
            assert!(hits > 0);
        }
    }
}
