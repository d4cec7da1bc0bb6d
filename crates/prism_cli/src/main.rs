use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use prism_core::{BackgroundDesc, RenderDesc};
use prism_renderer::{
    demo, Acceleration, Background, ImageBuffer, RenderConfig, RenderMode, Renderer,
    SceneBuilder,
};
use std::time::Instant;

mod cli;

use cli::Args;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 450;

/// Image size plus renderer configuration after merging flags over the scene's
/// render block.
#[derive(Debug, PartialEq)]
struct Settings {
    width: u32,
    height: u32,
    config: RenderConfig,
}

impl Settings {
    fn resolve(args: &Args, render: Option<&RenderDesc>) -> Self {
        let render = render.cloned().unwrap_or_default();
        let defaults = RenderConfig::default();

        let background = if args.sky {
            Background::Sky
        } else {
            match render.background {
                Some(BackgroundDesc::Sky) => Background::Sky,
                Some(BackgroundDesc::Black) | None => Background::Black,
            }
        };

        Self {
            width: args.width.or(render.width).unwrap_or(DEFAULT_WIDTH),
            height: args.height.or(render.height).unwrap_or(DEFAULT_HEIGHT),
            config: RenderConfig {
                samples_per_pixel: args
                    .samples_per_pixel
                    .or(render.samples_per_pixel)
                    .unwrap_or(defaults.samples_per_pixel),
                max_depth: args
                    .max_depth
                    .or(render.max_depth)
                    .unwrap_or(defaults.max_depth),
                background,
                mode: if args.sequential {
                    RenderMode::Sequential
                } else {
                    RenderMode::Parallel
                },
                seed: args.seed,
            },
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn init_logger(args: &Args) {
    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to configure the thread pool")?;
    }

    let description = match &args.scene {
        Some(path) => Some(
            prism_core::load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
        ),
        None => None,
    };

    let settings = Settings::resolve(&args, description.as_ref().and_then(|d| d.render.as_ref()));
    if settings.width == 0 || settings.height == 0 {
        bail!(
            "Image size must be positive, got {}x{}",
            settings.width,
            settings.height
        );
    }

    let acceleration = if args.no_bvh {
        Acceleration::List
    } else {
        Acceleration::Bvh
    };

    let builder = match &description {
        Some(desc) => SceneBuilder::from_description(desc, settings.aspect_ratio()),
        None => {
            info!("No scene file given, rendering the demo scene");
            demo::random_spheres(settings.aspect_ratio(), args.seed)
        }
    };
    let scene = builder.acceleration(acceleration).seed(args.seed).build();

    let start = Instant::now();
    let mut image = ImageBuffer::new(settings.width, settings.height);
    Renderer::new(settings.config).render(&scene, &mut image);

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Done in {:.2?}", start.elapsed());

    Ok(())
}
