//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a hard depth cutoff
//! - Probabilistic lobe selection per material
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::sampling::random_f32;
use crate::{Camera, RayTracerConfig, Scene};
use rand::RngCore;
use rtiow_math::{Color, Interval, Ray};

/// Color of the sky for a ray that escapes the scene.
///
/// Vertical gradient from white (straight down) to light blue (straight up).
pub fn environment_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Compute the color seen by a ray.
///
/// Follows the path for at most `max_bounces + 1` intersections. A path
/// that runs out of bounces contributes nothing.
pub fn ray_color(scene: &Scene, ray: &Ray, max_bounces: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..=max_bounces {
        let Some(rec) = scene.hit_detection(&ray) else {
            return environment_color(&ray) * throughput;
        };

        match scene.material(rec.material).scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` is a pixel index with `y = 0` at the bottom of the image.
/// Returns the average of all samples in linear space.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RayTracerConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.resolution_x as f32;
    let height = config.resolution_y as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + random_f32(rng)) / width;
        let t = (y as f32 + random_f32(rng)) / height;
        let ray = camera.create_ray(s, t, rng);
        pixel_color += ray_color(scene, &ray, config.max_ray_bounces, rng);
    }

    pixel_color / config.samples_per_pixel as f32
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

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (255.999 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}
