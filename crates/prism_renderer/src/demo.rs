//! Built-in demo scene, rendered when no scene file is given.

use crate::{
    Camera, Color, Dielectric, Lambertian, MaterialRef, Metal, PointLight, SceneBuilder, Sphere,
};
use prism_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// The "many small spheres" scene: a huge ground sphere, three feature
/// spheres (glass, diffuse, metal), a jittered grid of small spheres and a
/// point light. The same seed always produces the same layout.
pub fn random_spheres(aspect_ratio: f32, seed: u64) -> SceneBuilder {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = SceneBuilder::new()
        .camera(Camera::new().with_aspect_ratio(aspect_ratio))
        .seed(seed);

    // Ground
    builder.add_object(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    // Three main spheres
    builder.add_object(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    builder.add_object(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    builder.add_object(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the metal feature sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material: MaterialRef = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                // Glass
                Arc::new(Dielectric::new(1.5))
            };

            builder.add_object(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    builder.add_light(Box::new(PointLight::new(Vec3::new(5.0, 5.0, 5.0), Vec3::ONE)));

    log::debug!("Demo scene generated with {} objects", builder.object_count());
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{Interval, Ray};

    #[test]
    fn test_demo_is_reproducible() {
        let a = random_spheres(16.0 / 9.0, 7);
        let b = random_spheres(16.0 / 9.0, 7);
        assert_eq!(a.object_count(), b.object_count());
        // Ground + 3 features + most of the 22x22 grid
        assert!(a.object_count() > 400);
    }

    #[test]
    fn test_demo_scene_renders_feature_sphere() {
        let scene = random_spheres(16.0 / 9.0, 1).build();
        assert_eq!(scene.lights().len(), 1);

        // Straight down onto the glass sphere
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.p.y - 2.0).abs() < 1e-4);
    }
}
