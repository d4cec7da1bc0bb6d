//! Small showroom scene with every primitive, material and light type.
//!
//! Run with `cargo run --example simple_render -p prism_renderer`.

use prism_renderer::{
    AxisBox, Background, Camera, Color, Cone, Cylinder, Dielectric, DirectionalLight,
    ImageBuffer, Lambertian, Metal, Plane, PointLight, RenderConfig, Renderer, SceneBuilder,
    Sphere, SpotLight, Texture, Triangle, Vec3,
};
use std::sync::Arc;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 270;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 3.0, 9.0), Vec3::new(0.0, 0.8, 0.0), Vec3::Y)
        .with_lens(35.0, 0.0, 9.0)
        .with_aspect_ratio(WIDTH as f32 / HEIGHT as f32);

    let mut builder = SceneBuilder::new().camera(camera).seed(42);

    let floor = Texture::checker(
        Texture::solid(Color::new(0.2, 0.3, 0.1)),
        Texture::solid(Color::splat(0.9)),
        2.0,
    );
    builder
        .add_object(Box::new(Plane::new(
            Vec3::ZERO,
            Vec3::Y,
            Arc::new(Lambertian::textured(floor)),
        )))
        .add_object(Box::new(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Arc::new(Dielectric::new(1.5)),
        )))
        .add_object(Box::new(Sphere::new(
            Vec3::new(2.2, 0.7, -0.5),
            0.7,
            Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.1)),
        )))
        .add_object(Box::new(Cylinder::new(
            Vec3::new(-2.2, 0.0, -0.5),
            Vec3::Y,
            0.5,
            1.4,
            Arc::new(Lambertian::textured(Texture::stripe(
                Texture::solid(Color::new(0.8, 0.1, 0.1)),
                Texture::solid(Color::splat(0.9)),
                Vec3::Y,
                0.2,
            ))),
        )))
        .add_object(Box::new(Cone::new(
            Vec3::new(-1.0, 1.6, 1.8),
            -Vec3::Y,
            25f32.to_radians(),
            1.6,
            Arc::new(Lambertian::new(Color::new(0.1, 0.3, 0.8))),
        )))
        .add_object(Box::new(AxisBox::new(
            Vec3::new(1.0, 0.0, 1.4),
            Vec3::new(1.8, 0.8, 2.2),
            Arc::new(Metal::new(Color::splat(0.7), 0.4)),
        )))
        .add_object(Box::new(Triangle::new(
            Vec3::new(-3.0, 0.0, -3.0),
            Vec3::new(3.0, 0.0, -3.0),
            Vec3::new(0.0, 3.5, -3.0),
            Arc::new(Lambertian::new(Color::new(0.6, 0.6, 0.5))),
        )));

    builder
        .add_light(Box::new(PointLight::new(
            Vec3::new(4.0, 6.0, 4.0),
            Color::splat(0.7),
        )))
        .add_light(Box::new(DirectionalLight::new(
            Vec3::new(-1.0, -2.0, -1.0),
            Color::splat(0.3),
        )))
        .add_light(Box::new(SpotLight::new(
            Vec3::new(-2.2, 4.0, 1.0),
            Vec3::new(0.0, -1.0, -0.3),
            Color::new(1.0, 0.9, 0.7),
            15f32.to_radians(),
            25f32.to_radians(),
        )));

    let scene = builder.build();

    let renderer = Renderer::new(RenderConfig {
        samples_per_pixel: 32,
        max_depth: 8,
        background: Background::Sky,
        ..RenderConfig::default()
    });

    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    renderer.render(&scene, &mut image);
    image.save("simple_render.png")?;

    Ok(())
}
