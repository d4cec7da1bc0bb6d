//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use prism_math::{Ray, Vec3};
use rand::RngCore;

/// Thin-lens perspective camera.
///
/// Rays are generated from normalized film coordinates `(s, t)` in [0, 1],
/// with `(0, 0)` at the lower-left corner of the view.
#[derive(Clone, Debug)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,       // Vertical field of view in degrees
    aspect_ratio: f32,
    aperture: f32,   // Lens diameter; 0 is a pinhole
    focus_dist: f32, // Distance from camera to plane of perfect focus

    // Cached computed values (refreshed by update_geometry())
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    ///
    /// Looks from (13, 2, 3) at the origin with a 20 degree field of view,
    /// 16:9 framing, aperture 0.1 and focus distance 10.
    pub fn new() -> Self {
        Self::setup(
            Vec3::new(13.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::Y,
            20.0,
            16.0 / 9.0,
            0.1,
            10.0,
        )
    }

    /// Create a fully specified camera.
    pub fn setup(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let mut camera = Self {
            look_from,
            look_at,
            vup,
            vfov,
            aspect_ratio,
            aperture,
            focus_dist,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.update_geometry();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update_geometry();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self.update_geometry();
        self
    }

    /// Set the width / height ratio of the view.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.set_aspect_ratio(aspect_ratio);
        self
    }

    /// Set the width / height ratio of the view in place.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_geometry();
    }

    pub fn set_position(&mut self, look_from: Vec3) {
        self.look_from = look_from;
        self.update_geometry();
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
        self.update_geometry();
    }

    pub fn set_up(&mut self, vup: Vec3) {
        self.vup = vup;
        self.update_geometry();
    }

    /// Vertical field of view in degrees.
    pub fn set_fov(&mut self, vfov: f32) {
        self.vfov = vfov;
        self.update_geometry();
    }

    pub fn set_aperture(&mut self, aperture: f32) {
        self.aperture = aperture;
        self.update_geometry();
    }

    pub fn set_focus_distance(&mut self, focus_dist: f32) {
        self.focus_dist = focus_dist;
        self.update_geometry();
    }

    /// Recompute the cached basis and viewport from the inputs.
    fn update_geometry(&mut self) {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let viewport_height = 2.0 * half_height;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner = self.look_from
            - self.horizontal / 2.0
            - self.vertical / 2.0
            - self.focus_dist * self.w;

        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through film coordinates `(s, t)`.
    ///
    /// With a non-zero aperture the origin is jittered across the lens, so
    /// only points on the focus plane stay sharp.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.look_from + offset;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(origin, target - origin)
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Orthonormal camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
