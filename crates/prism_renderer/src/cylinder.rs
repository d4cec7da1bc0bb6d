//! Finite capped cylinder primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialRef,
};
use prism_math::{Aabb, Interval, Ray, Vec3};

/// A closed cylinder from `base` to `base + axis * height`.
pub struct Cylinder {
    base: Vec3,
    axis: Vec3,
    radius: f32,
    height: f32,
    material: MaterialRef,
    bbox: Aabb,
}

impl Cylinder {
    /// Create a new cylinder. A zero axis yields a cylinder that is never hit.
    pub fn new(base: Vec3, axis: Vec3, radius: f32, height: f32, material: MaterialRef) -> Self {
        let axis = axis.normalize_or_zero();
        let radius = radius.max(0.0);
        let height = height.max(0.0);
        let top = base + axis * height;

        // Each cap is a disc; its extent along a world axis shrinks as the
        // cylinder axis lines up with it.
        let extent = disc_extent(axis, radius);
        let bbox = Aabb::from_points(base.min(top) - extent, base.max(top) + extent);

        Self {
            base,
            axis,
            radius,
            height,
            material,
            bbox,
        }
    }

    fn top(&self) -> Vec3 {
        self.base + self.axis * self.height
    }
}

/// Half-extents of a disc of radius `radius` perpendicular to unit `axis`.
pub(crate) fn disc_extent(axis: Vec3, radius: f32) -> Vec3 {
    let one_minus_sq = (Vec3::ONE - axis * axis).max(Vec3::ZERO);
    Vec3::new(
        one_minus_sq.x.sqrt(),
        one_minus_sq.y.sqrt(),
        one_minus_sq.z.sqrt(),
    ) * radius
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if self.axis == Vec3::ZERO {
            return None;
        }

        let origin = ray.origin();
        let dir = ray.direction();
        let mut closest: Option<(f32, Vec3)> = None;
        let mut t_max = ray_t.max;

        // Side: solve |perp(origin + t * dir - base)|^2 = r^2
        let oc = origin - self.base;
        let d_perp = dir - self.axis * dir.dot(self.axis);
        let oc_perp = oc - self.axis * oc.dot(self.axis);

        let a = d_perp.length_squared();
        if a > 1e-12 {
            let half_b = oc_perp.dot(d_perp);
            let c = oc_perp.length_squared() - self.radius * self.radius;
            let discriminant = half_b * half_b - a * c;

            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                for root in [(-half_b - sqrtd) / a, (-half_b + sqrtd) / a] {
                    if !ray_t.with_max(t_max).surrounds(root) {
                        continue;
                    }
                    let p = ray.at(root);
                    let h = (p - self.base).dot(self.axis);
                    if (0.0..=self.height).contains(&h) {
                        let normal = (p - (self.base + self.axis * h)).normalize_or_zero();
                        closest = Some((root, normal));
                        t_max = root;
                        break;
                    }
                }
            }
        }

        // Caps
        let denom = dir.dot(self.axis);
        if denom.abs() > 1e-8 {
            for (center, outward) in [(self.base, -self.axis), (self.top(), self.axis)] {
                let t = (center - origin).dot(self.axis) / denom;
                if !ray_t.with_max(t_max).surrounds(t) {
                    continue;
                }
                if (ray.at(t) - center).length_squared() <= self.radius * self.radius {
                    closest = Some((t, outward));
                    t_max = t;
                }
            }
        }

        closest.map(|(t, normal)| HitRecord::new(ray, t, normal, Some(self.material.as_ref())))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use std::sync::Arc;

    fn upright() -> Cylinder {
        Cylinder::new(
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            2.0,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_side_hit() {
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        let shape = upright();
        let rec = shape
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the side");

        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal + Vec3::X).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_cap_hit() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.1), -Vec3::Y);
        let shape = upright();
        let rec = shape
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the top cap");

        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_bottom_cap_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let shape = upright();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.normal, -Vec3::Y);
    }

    #[test]
    fn test_miss_above_and_beside() {
        let cyl = upright();

        let ray = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(cyl.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        let ray = Ray::new(Vec3::new(-5.0, 1.0, 2.0), Vec3::X);
        assert!(cyl.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_closest_of_side_and_cap() {
        // Enters through the side at t=1, would leave through the top cap at t=2
        let ray = Ray::new(Vec3::new(-2.0, 1.0, 0.0), Vec3::new(1.0, 0.5, 0.0));
        let shape = upright();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.normal + Vec3::X).length() < 1e-5);

        // From inside, the top cap comes before the far wall
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.1, 1.0, 0.0));
        let shape = upright();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert_eq!(rec.normal, -Vec3::Y);
    }

    #[test]
    fn test_inside_hits_far_wall() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        let shape = upright();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!(ray.direction().dot(rec.normal) < 0.0);
    }

    #[test]
    fn test_zero_axis_never_hits() {
        let cyl = Cylinder::new(
            Vec3::ZERO,
            Vec3::ZERO,
            1.0,
            2.0,
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(cyl.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_bounding_box_is_tight_for_aligned_axis() {
        let bbox = upright().bounding_box();
        assert!((bbox.min() - Vec3::new(-1.0, 0.0, -1.0)).length() < 1e-5);
        assert!((bbox.max() - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
    }
}
