//! Finite cone primitive, closed by a base disc.

use crate::{
    cylinder::disc_extent,
    hittable::{HitRecord, Hittable},
    MaterialRef,
};
use prism_math::{Aabb, Interval, Ray, Vec3};

/// A cone opening from `apex` along `axis` with half-angle `angle` (radians),
/// cut off at `height`.
pub struct Cone {
    apex: Vec3,
    axis: Vec3,
    height: f32,
    cos_angle: f32,
    sin_angle: f32,
    /// Radius of the base disc
    base_radius: f32,
    material: MaterialRef,
    bbox: Aabb,
}

impl Cone {
    /// Create a new cone. A zero axis yields a cone that is never hit.
    pub fn new(apex: Vec3, axis: Vec3, angle: f32, height: f32, material: MaterialRef) -> Self {
        let axis = axis.normalize_or_zero();
        let height = height.max(0.0);
        let base_radius = height * angle.tan();
        let base_center = apex + axis * height;

        let extent = disc_extent(axis, base_radius);
        let base_box = Aabb::from_points(base_center - extent, base_center + extent);
        let bbox = Aabb::surrounding(&base_box, &Aabb::from_points(apex, apex));

        Self {
            apex,
            axis,
            height,
            cos_angle: angle.cos(),
            sin_angle: angle.sin(),
            base_radius,
            material,
            bbox,
        }
    }

    /// Outward normal of the slanted surface at `p`.
    fn side_normal(&self, p: Vec3, h: f32) -> Vec3 {
        let radial = (p - (self.apex + self.axis * h)).normalize_or_zero();
        (radial * self.cos_angle - self.axis * self.sin_angle).normalize_or_zero()
    }
}

impl Hittable for Cone {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if self.axis == Vec3::ZERO {
            return None;
        }

        let origin = ray.origin();
        let dir = ray.direction();
        let mut closest: Option<(f32, Vec3)> = None;
        let mut t_max = ray_t.max;

        // Side: (dot(x - apex, axis))^2 = cos^2 * |x - apex|^2
        let co = origin - self.apex;
        let dv = dir.dot(self.axis);
        let cv = co.dot(self.axis);
        let cos2 = self.cos_angle * self.cos_angle;

        let a = dv * dv - cos2 * dir.length_squared();
        let half_b = dv * cv - cos2 * dir.dot(co);
        let c = cv * cv - cos2 * co.length_squared();

        let mut roots = [f32::NAN; 2];
        if a.abs() < 1e-6 * dir.length_squared() {
            // Ray parallel to the slant: the quadratic degenerates to linear
            if half_b.abs() > 1e-9 {
                roots[0] = -c / (2.0 * half_b);
            }
        } else {
            let discriminant = half_b * half_b - a * c;
            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                let (r0, r1) = ((-half_b - sqrtd) / a, (-half_b + sqrtd) / a);
                roots = [r0.min(r1), r0.max(r1)];
            }
        }

        for root in roots {
            // NaN fails the range check
            if !ray_t.with_max(t_max).surrounds(root) {
                continue;
            }
            let p = ray.at(root);
            let h = (p - self.apex).dot(self.axis);
            // The mirrored nappe behind the apex has negative h
            if (0.0..=self.height).contains(&h) {
                closest = Some((root, self.side_normal(p, h)));
                t_max = root;
                break;
            }
        }

        // Base disc
        if dv.abs() > 1e-8 {
            let center = self.apex + self.axis * self.height;
            let t = (center - origin).dot(self.axis) / dv;
            if ray_t.with_max(t_max).surrounds(t)
                && (ray.at(t) - center).length_squared() <= self.base_radius * self.base_radius
            {
                closest = Some((t, self.axis));
            }
        }

        closest.map(|(t, normal)| HitRecord::new(ray, t, normal, Some(self.material.as_ref())))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
