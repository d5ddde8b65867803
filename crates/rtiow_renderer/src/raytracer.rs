//! Parallel tile renderer.

use crate::bucket::{partition_tiles, render_tile};
use crate::{Camera, RayTracerConfig, RgbBuffer, Scene, ThreadPool};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Instant;

/// Renders scenes into an owned RGB buffer using a pool of worker threads.
pub struct RayTracer {
    config: RayTracerConfig,
    output: RgbBuffer,
}

impl RayTracer {
    /// Create a ray tracer and allocate its output buffer.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; there is no meaningful
    /// partial render to fall back to.
    pub fn new(config: RayTracerConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid ray tracer config: {err}");
        }
        let output = RgbBuffer::new(config.resolution_x, config.resolution_y);
        Self { config, output }
    }

    pub fn config(&self) -> &RayTracerConfig {
        &self.config
    }

    /// The finished image, `width * height * 3` bytes, bottom row first.
    pub fn output(&self) -> &[u8] {
        self.output.data()
    }

    pub fn output_buffer(&self) -> &RgbBuffer {
        &self.output
    }

    /// Render `scene` through `camera`, blocking until every tile is done.
    ///
    /// Tile `i` draws its samples from a generator seeded with
    /// `config.seed + i`, so the result does not depend on the worker count.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) {
        let config = &self.config;
        let num_workers = config.worker_count();
        let tiles = partition_tiles(
            self.output.data_mut(),
            config.resolution_x,
            config.resolution_y,
            config.tile_size,
        );

        info!(
            "Rendering {}x{} @ {} spp, {} bounces, {} workers, {} tiles",
            config.resolution_x,
            config.resolution_y,
            config.samples_per_pixel,
            config.max_ray_bounces,
            num_workers,
            tiles.len()
        );
        debug!(
            "Worker count from override={}, ignore={}, use={}%",
            config.render_workers, config.threads_ignore, config.threads_use_percent
        );

        let start = Instant::now();

        thread::scope(|scope| {
            let pool = ThreadPool::new(scope, num_workers);

            for tile in tiles {
                pool.add_task(move || {
                    let bucket = tile.bucket;
                    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
                    render_tile(tile, camera, scene, config, &mut rng);
                    trace!(
                        "Tile {} ({}x{} at {},{}) done",
                        bucket.index,
                        bucket.width,
                        bucket.height,
                        bucket.x,
                        bucket.y
                    );
                });
            }

            pool.wait_for_completion();
        });

        info!("Rendered in {:?}", start.elapsed());
    }
}
