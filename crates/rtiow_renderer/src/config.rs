//! Ray tracer configuration.

use crate::bucket::DEFAULT_BUCKET_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with a [`RayTracerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("samples per pixel must be greater than zero")]
    ZeroSamples,

    #[error("tile size must be greater than zero")]
    ZeroTileSize,

    #[error("threads use percentage must be within 1..=100, got {0}")]
    ThreadPercentOutOfRange(u32),
}

/// Render settings, immutable once handed to the ray tracer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayTracerConfig {
    /// Horizontal resolution
    pub resolution_x: u32,
    /// Vertical resolution
    pub resolution_y: u32,

    /// Multi-sampling: number of sample points per pixel
    pub samples_per_pixel: u32,
    /// Bounces after the first hit before a path is abandoned
    pub max_ray_bounces: u32,

    /// Worker count override, 0 = derive from the two settings below
    pub render_workers: u32,
    /// Hardware threads to leave free for the rest of the system
    pub threads_ignore: u32,
    /// Percentage of the remaining hardware threads to use (1..=100)
    pub threads_use_percent: u32,

    /// Edge length of a render tile in pixels
    pub tile_size: u32,
    /// Base seed; tile `i` samples with `seed + i`
    pub seed: u64,
}

impl Default for RayTracerConfig {
    fn default() -> Self {
        Self {
            resolution_x: 1280,
            resolution_y: 720,
            samples_per_pixel: 64,
            max_ray_bounces: 32,
            render_workers: 0,
            threads_ignore: 1,
            threads_use_percent: 100,
            tile_size: DEFAULT_BUCKET_SIZE,
            seed: 0x5eed_2020,
        }
    }
}

impl RayTracerConfig {
    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_x == 0 || self.resolution_y == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.resolution_x,
                height: self.resolution_y,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if !(1..=100).contains(&self.threads_use_percent) {
            return Err(ConfigError::ThreadPercentOutOfRange(self.threads_use_percent));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.resolution_x as f32 / self.resolution_y as f32
    }

    /// Number of render workers on this machine.
    pub fn worker_count(&self) -> usize {
        let hardware_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        compute_worker_count(hardware_threads, self)
    }
}

/// Worker count for a machine with `hardware_threads` threads.
///
/// An explicit `render_workers` wins; otherwise
/// `(hardware_threads - threads_ignore) * threads_use_percent / 100`,
/// never less than one.
pub fn compute_worker_count(hardware_threads: usize, config: &RayTracerConfig) -> usize {
    if config.render_workers > 0 {
        return config.render_workers as usize;
    }

    let available = hardware_threads.saturating_sub(config.threads_ignore as usize);
    (available * config.threads_use_percent as usize / 100).max(1)
}
