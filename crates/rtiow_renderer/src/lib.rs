//! rtiow renderer - CPU path tracing core.
//!
//! A Monte Carlo path tracer for scenes made of spheres with diffuse,
//! glossy and refractive materials, seen through a thin-lens camera.
//! The image is split into tiles that a fixed pool of worker threads
//! renders straight into a shared RGB byte buffer.
//!
//! # Example
//!
//! ```no_run
//! use rtiow_renderer::{Camera, Color, RayTracer, RayTracerConfig, Scene, Vec3};
//!
//! let mut scene = Scene::new();
//! let ground = scene.material_create_diffuse(Color::new(0.8, 0.8, 0.0));
//! scene.sphere_add(Vec3::new(0.0, -100.5, -1.0), 100.0, ground);
//!
//! let config = RayTracerConfig::default();
//! let camera = Camera::new(config.aspect_ratio());
//!
//! let mut tracer = RayTracer::new(config);
//! tracer.render(&scene, &camera);
//! let rgb: &[u8] = tracer.output();
//! # let _ = rgb;
//! ```

mod bucket;
mod camera;
mod config;
mod hittable;
mod material;
mod raytracer;
mod renderer;
mod rgb_buffer;
pub mod sampling;
mod scene;
mod sphere;
mod thread_pool;

pub use bucket::{partition_tiles, render_tile, Bucket, Tile, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use config::{compute_worker_count, ConfigError, RayTracerConfig};
pub use hittable::{GeometryList, HitRecord, Hittable, Primitive};
pub use material::{schlick_reflectance, Material, MaterialId, ScatterKind, ScatterResult, MIN_RAY_PROBABILITY};
pub use raytracer::RayTracer;
pub use renderer::{color_to_rgb, environment_color, linear_to_gamma, ray_color, render_pixel};
pub use rgb_buffer::RgbBuffer;
pub use scene::{Scene, HIT_T_MIN};
pub use sphere::Sphere;
pub use thread_pool::ThreadPool;

/// Re-export Vec3 and common math types from rtiow_math
pub use rtiow_math::{Color, Interval, Point3, Ray, Vec3};
