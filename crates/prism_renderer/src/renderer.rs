//! Core recursive ray tracing renderer.
//!
//! Implements Monte Carlo ray tracing with:
//! - Direct lighting from analytic lights at every bounce
//! - Recursive scattering with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction
//!
//! Rows are the unit of work. Each row draws from its own generator seeded
//! from the render seed and the row index, so sequential and parallel renders
//! of the same scene produce identical images.

use crate::sampling::{gen_f32, row_seed};
use crate::{Color, ImageBuffer, Scene};
use prism_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Closest accepted hit distance; keeps secondary rays off their own surface.
const T_MIN: f32 = 0.001;

/// What escaping rays see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    /// No ambient light: everything visible is lit by the scene's lights.
    #[default]
    Black,
    /// White-to-blue vertical gradient.
    Sky,
}

impl Background {
    /// Color seen along a ray that hits nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Black => Color::ZERO,
            Background::Sky => sky_gradient(ray),
        }
    }
}

/// How rows are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// One row after another on the calling thread.
    Sequential,
    /// Rows spread over the rayon thread pool.
    #[default]
    Parallel,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    pub background: Background,
    pub mode: RenderMode,
    /// Seed for the per-row generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 10,
            background: Background::Black,
            mode: RenderMode::Parallel,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Direct light is gathered at every hit and added to the attenuated light
/// arriving along the scattered ray. Absorbed rays and surfaces without a
/// material contribute black.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: Background,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return background.color(ray);
    };

    let Some(material) = rec.material else {
        return Color::ZERO;
    };

    match material.scatter(ray, &rec, rng) {
        Some(result) => {
            let direct = scene.illuminate(&rec).unwrap_or(Color::ZERO);
            let indirect = ray_color(&result.scattered, scene, depth - 1, background, rng);
            direct + result.attenuation * indirect
        }
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| (255.99 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Film coordinate of a pixel sample along one image axis.
///
/// A one-pixel axis has no span to spread over and samples its center.
#[inline]
fn film_coord(index: f32, jitter: f32, extent: u32) -> f32 {
    if extent <= 1 {
        0.5
    } else {
        (index + jitter) / (extent - 1) as f32
    }
}

/// Render a single pixel with multi-sampling, returning the averaged linear color.
///
/// `(x, y)` counts from the top-left corner.
pub fn render_pixel(
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let row_from_bottom = height.saturating_sub(1).saturating_sub(y) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let s = film_coord(x as f32, gen_f32(rng), width);
        let t = film_coord(row_from_bottom, gen_f32(rng), height);
        let ray = scene.camera().get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, config.background, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Renders scenes into image buffers.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let mut renderer = Self { config };
        // Goes through the setter for its clamping
        renderer.set_samples_per_pixel(renderer.config.samples_per_pixel);
        renderer
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Set samples per pixel. Zero is raised to one.
    pub fn set_samples_per_pixel(&mut self, samples: u32) {
        if samples == 0 {
            log::warn!("samples_per_pixel of 0 raised to 1");
        }
        self.config.samples_per_pixel = samples.max(1);
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.max_depth = depth;
    }

    /// Render `scene` into every pixel of `image`. Blocks until done.
    pub fn render(&self, scene: &Scene, image: &mut ImageBuffer) {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            log::warn!("Nothing to render into a {}x{} image", width, height);
            return;
        }

        log::info!(
            "Rendering {}x{} @ {} spp, depth {} ({:?})",
            width,
            height,
            self.config.samples_per_pixel,
            self.config.max_depth,
            self.config.mode
        );
        let start = Instant::now();

        let rows_done = AtomicUsize::new(0);
        let progress_step = (height as usize / 10).max(1);

        let render_row = |(y, row): (usize, &mut [[u8; 3]])| {
            let mut rng = StdRng::seed_from_u64(row_seed(self.config.seed, y));
            for (x, pixel) in row.iter_mut().enumerate() {
                let color = render_pixel(
                    scene,
                    x as u32,
                    y as u32,
                    width,
                    height,
                    &self.config,
                    &mut rng,
                );
                *pixel = color_to_rgb(color);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % progress_step == 0 || done == height as usize {
                log::info!(
                    "Progress: {}% ({}/{} rows)",
                    done * 100 / height as usize,
                    done,
                    height
                );
            }
        };

        let rows = image.pixels_mut();
        match self.config.mode {
            RenderMode::Sequential => rows
                .chunks_mut(width as usize)
                .enumerate()
                .for_each(render_row),
            RenderMode::Parallel => rows
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(render_row),
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
    }
}
