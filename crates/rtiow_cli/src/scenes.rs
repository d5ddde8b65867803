//! Built-in demo scenes.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rtiow_math::{Color, Point3, Vec3};
use rtiow_renderer::sampling::{random_f32, random_f32_range, random_vector_range};
use rtiow_renderer::{Camera, Scene};

/// Scenes selectable with `--scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneId {
    /// Yellow ground and one diffuse sphere
    Basic,
    /// Diffuse, hollow glass and metal spheres side by side
    Materials,
    /// Rows of glass spheres with increasing absorption and roughness
    Glass,
    /// Random field of small spheres around three large ones
    Cover,
}

/// Build the scene and a camera framing it for the given aspect ratio.
///
/// `seed` only affects scenes with random placement.
pub fn build(id: SceneId, aspect_ratio: f32, seed: u64) -> (Scene, Camera) {
    match id {
        SceneId::Basic => basic(aspect_ratio),
        SceneId::Materials => materials(aspect_ratio),
        SceneId::Glass => glass(aspect_ratio),
        SceneId::Cover => cover(aspect_ratio, &mut StdRng::seed_from_u64(seed)),
    }
}

fn basic(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();
    let ground = scene.material_create_diffuse(Color::new(0.8, 0.8, 0.0));
    let center = scene.material_create_diffuse(Color::new(0.7, 0.3, 0.3));

    scene.sphere_add(Point3::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.sphere_add(Point3::new(0.0, 0.0, -1.0), 0.5, center);

    (scene, Camera::new(aspect_ratio))
}

fn materials(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();
    let ground = scene.material_create_diffuse(Color::new(0.8, 0.8, 0.0));
    let center = scene.material_create_diffuse(Color::new(0.1, 0.2, 0.5));
    let glass = scene.material_create_dielectric(Color::ZERO, 1.5, 1.0, Color::ZERO, 0.0);
    let metal = scene.material_create_specular(
        Color::new(0.8, 0.6, 0.2),
        0.8,
        Color::new(0.8, 0.6, 0.2),
        0.1,
    );

    scene.sphere_add(Point3::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.sphere_add(Point3::new(0.0, 0.0, -1.0), 0.5, center);
    // Hollow glass bubble: negative radius flips the inner normals
    scene.sphere_add(Point3::new(-1.0, 0.0, -1.0), 0.5, glass);
    scene.sphere_add(Point3::new(-1.0, 0.0, -1.0), -0.45, glass);
    scene.sphere_add(Point3::new(1.0, 0.0, -1.0), 0.5, metal);

    let camera = Camera::new(aspect_ratio)
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(30.0, 0.1, 0.0);
    (scene, camera)
}

fn glass(aspect_ratio: f32) -> (Scene, Camera) {
    const COUNT: usize = 5;

    let mut scene = Scene::new();
    let ground = scene.material_create_specular(Color::splat(0.5), 0.1, Color::ONE, 0.4);
    scene.sphere_add(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    for i in 0..COUNT {
        let f = i as f32 / (COUNT - 1) as f32;
        let x = (i as f32 - (COUNT - 1) as f32 * 0.5) * 1.1;

        // Front row: clear to strongly absorbing green glass
        let absorbing = scene.material_create_dielectric(
            Color::ZERO,
            1.5,
            1.0,
            Color::new(1.0, 0.2, 1.0) * f * 2.0,
            0.0,
        );
        scene.sphere_add(Point3::new(x, 0.5, 0.0), 0.5, absorbing);

        // Back row: clear to frosted
        let frosted = scene.material_create_dielectric(Color::ZERO, 1.5, 1.0, Color::ZERO, f);
        scene.sphere_add(Point3::new(x, 0.5, -1.5), 0.5, frosted);
    }

    let backdrop = scene.material_create_diffuse(Color::new(0.9, 0.25, 0.25));
    scene.sphere_add(Point3::new(0.0, 1.5, -4.0), 1.5, backdrop);

    let camera = Camera::new(aspect_ratio)
        .with_position(Point3::new(0.0, 2.5, 5.0), Point3::new(0.0, 0.4, -0.75), Vec3::Y)
        .with_lens(40.0, 0.0, 0.0);
    (scene, camera)
}

fn cover(aspect_ratio: f32, rng: &mut dyn RngCore) -> (Scene, Camera) {
    let mut scene = Scene::new();
    let ground = scene.material_create_diffuse(Color::splat(0.5));
    scene.sphere_add(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * random_f32(rng),
                0.2,
                b as f32 + 0.9 * random_f32(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.75 {
                let albedo = random_vector_range(rng, 0.0, 1.0) * random_vector_range(rng, 0.0, 1.0);
                scene.material_create_diffuse(albedo)
            } else if choose_mat < 0.9 {
                let color = random_vector_range(rng, 0.5, 1.0);
                let roughness = random_f32_range(rng, 0.0, 0.5);
                scene.material_create_specular(color * 0.5, 0.9, color, roughness)
            } else {
                let roughness = random_f32_range(rng, 0.0, 0.3);
                scene.material_create_dielectric(Color::ZERO, 1.5, 1.0, Color::ZERO, roughness)
            };
            scene.sphere_add(center, 0.2, material);
        }
    }

    let glass = scene.material_create_dielectric(Color::ZERO, 1.5, 1.0, Color::ZERO, 0.0);
    let brown = scene.material_create_diffuse(Color::new(0.4, 0.2, 0.1));
    let mirror = scene.material_create_specular(Color::ZERO, 1.0, Color::new(0.7, 0.6, 0.5), 0.0);

    scene.sphere_add(Point3::new(0.0, 1.0, 0.0), 1.0, glass);
    scene.sphere_add(Point3::new(-4.0, 1.0, 0.0), 1.0, brown);
    scene.sphere_add(Point3::new(4.0, 1.0, 0.0), 1.0, mirror);

    let camera = Camera::new(aspect_ratio)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);
    (scene, camera)
}
