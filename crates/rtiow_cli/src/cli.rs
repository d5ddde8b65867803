use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rtiow_renderer::RayTracerConfig;

use crate::scenes::SceneId;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "rtiow")]
#[command(about = "CPU path tracer for sphere scenes")]
pub struct Args {
    /// JSON file with render settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Demo scene to render
    #[arg(long, value_enum, default_value = "materials")]
    pub scene: SceneId,

    /// Output image (.png or .ppm)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of ray bounces
    #[arg(long)]
    pub max_bounces: Option<u32>,

    /// Number of render workers (0 = derive from hardware threads)
    #[arg(long)]
    pub workers: Option<u32>,

    /// Hardware threads to leave free
    #[arg(long)]
    pub threads_ignore: Option<u32>,

    /// Percentage of the remaining hardware threads to use
    #[arg(long)]
    pub threads_use_percent: Option<u32>,

    /// Render tile edge length in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Settings from the config file (or defaults) with flag overrides applied.
    pub fn render_config(&self) -> Result<RayTracerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RayTracerConfig::default(),
        };

        let overrides = [
            (self.width, &mut config.resolution_x),
            (self.height, &mut config.resolution_y),
            (self.samples, &mut config.samples_per_pixel),
            (self.max_bounces, &mut config.max_ray_bounces),
            (self.workers, &mut config.render_workers),
            (self.threads_ignore, &mut config.threads_ignore),
            (self.threads_use_percent, &mut config.threads_use_percent),
            (self.tile_size, &mut config.tile_size),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate().context("invalid render settings")?;
        Ok(config)
    }
}

/// Read a [`RayTracerConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<RayTracerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["rtiow"]).unwrap();
        let config = args.render_config().unwrap();

        assert_eq!(config, RayTracerConfig::default());
        assert_eq!(args.scene, SceneId::Materials);
        assert_eq!(args.output, PathBuf::from("output.png"));
    }

    #[test]
    fn test_flag_overrides() {
        let args = Args::try_parse_from([
            "rtiow",
            "--width",
            "320",
            "--height",
            "240",
            "-s",
            "16",
            "--max-bounces",
            "8",
            "--workers",
            "2",
            "--tile-size",
            "32",
            "--seed",
            "9",
            "--scene",
            "cover",
        ])
        .unwrap();
        let config = args.render_config().unwrap();

        assert_eq!((config.resolution_x, config.resolution_y), (320, 240));
        assert_eq!(config.samples_per_pixel, 16);
        assert_eq!(config.max_ray_bounces, 8);
        assert_eq!(config.render_workers, 2);
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.seed, 9);
        assert_eq!(args.scene, SceneId::Cover);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let args = Args::try_parse_from(["rtiow", "--threads-use-percent", "0"]).unwrap();
        let err = args.render_config().unwrap_err();
        assert!(format!("{err:#}").contains("threads use percentage"));
    }

    #[test]
    fn test_config_file_with_overrides() {
        let path = std::env::temp_dir().join(format!("rtiow-cli-test-{}.json", std::process::id()));
        fs::write(&path, r#"{ "resolution_x": 64, "resolution_y": 48, "samples_per_pixel": 3 }"#)
            .unwrap();

        let argv: Vec<std::ffi::OsString> = vec![
            "rtiow".into(),
            "--config".into(),
            path.clone().into_os_string(),
            "-s".into(),
            "5".into(),
        ];
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.render_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!((config.resolution_x, config.resolution_y), (64, 48));
        // Flag beats file
        assert_eq!(config.samples_per_pixel, 5);
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Path::new("/nonexistent/rtiow.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
