//! Prism Renderer - CPU recursive ray tracing.
//!
//! A Monte Carlo ray tracer with analytic lights: every hit gathers
//! shadow-tested direct light, then follows one scattered ray until the depth
//! limit.
//!
//! - **Geometry**: sphere, plane, triangle, cylinder, cone, axis-aligned box
//! - **Acceleration**: BVH or flat list, chosen when the scene is built
//! - **Materials**: Lambertian (optionally textured), metal, dielectric
//! - **Lights**: point, directional, spot
//! - **Output**: 8-bit RGB buffer, saved as PPM or any format `image` knows
//!
//! # Example
//!
//! ```ignore
//! use prism_renderer::{demo, ImageBuffer, RenderConfig, Renderer};
//!
//! let scene = demo::random_spheres(16.0 / 9.0, 0).build();
//! let mut image = ImageBuffer::new(800, 450);
//! Renderer::new(RenderConfig::default()).render(&scene, &mut image);
//! image.save("render.png")?;
//! ```

mod axis_box;
mod bvh;
mod camera;
mod cone;
mod cylinder;
pub mod demo;
mod hittable;
mod image_buffer;
mod light;
mod material;
mod plane;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod texture;
mod triangle;

pub use axis_box::AxisBox;
pub use bvh::BvhNode;
pub use camera::Camera;
pub use cone::Cone;
pub use cylinder::Cylinder;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use image_buffer::{ImageBuffer, ImageError};
pub use light::{DirectionalLight, Light, LightList, PointLight, SpotLight, SHADOW_OFFSET};
pub use material::{
    reflect, refract, Color, Dielectric, Lambertian, Material, MaterialRef, Metal,
    ScatterResult,
};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, Background, RenderConfig,
    RenderMode, Renderer,
};
pub use scene::{Acceleration, Scene, SceneBuilder};
pub use sphere::Sphere;
pub use texture::Texture;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec3};
