//! Axis-aligned box primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialRef,
};
use prism_math::{axis_component, Aabb, Interval, Ray, Vec3};

/// A solid axis-aligned box between two corners.
pub struct AxisBox {
    min: Vec3,
    max: Vec3,
    material: MaterialRef,
}

/// Unit vector along world axis `axis` scaled by `sign`.
fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    let mut n = Vec3::ZERO;
    n[axis] = sign;
    n
}

impl AxisBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3, material: MaterialRef) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }
}

impl Hittable for AxisBox {
    /// Slab test that keeps track of which face bounds the entry and exit.
    ///
    /// From outside the entry face is reported; from inside the exit face.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;
        let mut exit_normal = Vec3::ZERO;

        for axis in 0..3 {
            let inv = 1.0 / axis_component(ray.direction(), axis);
            let orig = axis_component(ray.origin(), axis);
            let t_min_face = (axis_component(self.min, axis) - orig) * inv;
            let t_max_face = (axis_component(self.max, axis) - orig) * inv;

            // Travelling +axis we cross the min face first; its outward normal is -axis
            let (near, far, near_sign) = if inv < 0.0 {
                (t_max_face, t_min_face, 1.0)
            } else {
                (t_min_face, t_max_face, -1.0)
            };

            if near > t_enter {
                t_enter = near;
                enter_normal = axis_normal(axis, near_sign);
            }
            if far < t_exit {
                t_exit = far;
                exit_normal = axis_normal(axis, -near_sign);
            }
        }

        if t_exit < t_enter {
            return None;
        }

        let (t, outward) = if ray_t.surrounds(t_enter) {
            (t_enter, enter_normal)
        } else if ray_t.surrounds(t_exit) {
            (t_exit, exit_normal)
        } else {
            return None;
        };

        Some(HitRecord::new(ray, t, outward, Some(self.material.as_ref())))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.min, self.max)
    }
}
