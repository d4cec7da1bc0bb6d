use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "prism", version)]
#[command(about = "Render a JSON scene with a CPU ray tracer")]
pub struct Args {
    /// Scene file. The built-in demo scene is rendered when omitted.
    pub scene: Option<PathBuf>,

    /// Output image; `.ppm` is written directly, other extensions pick an image format
    #[arg(short, long, default_value = "render.ppm")]
    pub output: PathBuf,

    /// Image width in pixels [default: scene render block, else 800]
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels [default: scene render block, else 450]
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(short = 's', long)]
    pub samples_per_pixel: Option<u32>,

    /// Maximum recursion depth
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Worker threads for the global pool (0 lets rayon decide)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Render rows on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    /// Use the sky gradient for rays that escape the scene
    #[arg(long)]
    pub sky: bool,

    /// Test every object in turn instead of building a BVH
    #[arg(long)]
    pub no_bvh: bool,

    /// Seed for sampling and BVH construction
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Logging level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["prism"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.ppm"));
        assert_eq!(args.width, None);
        assert_eq!(args.threads, 0);
        assert!(!args.sequential);
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::try_parse_from([
            "prism",
            "scene.json",
            "-o",
            "out.png",
            "--width",
            "320",
            "--height",
            "200",
            "-s",
            "16",
            "-d",
            "4",
            "--threads",
            "2",
            "--sequential",
            "--sky",
            "--no-bvh",
            "--seed",
            "9",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!((args.width, args.height), (Some(320), Some(200)));
        assert_eq!(args.samples_per_pixel, Some(16));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.threads, 2);
        assert!(args.sequential && args.sky && args.no_bvh);
        assert_eq!(args.seed, 9);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Args::try_parse_from(["prism", "--log-level", "loud"]).is_err());
    }
}
