use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use rtiow_renderer::RayTracer;

mod cli;
mod logger;
mod output;
mod scenes;

use cli::Args;
use logger::init_logger;
use output::{Display, ImageFileDisplay};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let config = args.render_config()?;
    let (scene, camera) = scenes::build(args.scene, config.aspect_ratio(), config.seed);
    info!(
        "Scene {:?}: {} spheres, {} materials",
        args.scene,
        scene.geometry().len(),
        scene.material_count()
    );

    info!(
        "Camera at {} (lens radius {})",
        camera.look_from(),
        camera.lens_radius()
    );

    let mut tracer = RayTracer::new(config);
    debug!("Render settings: {:?}", tracer.config());
    tracer.render(&scene, &camera);

    let mut display = ImageFileDisplay::new(&args.output);
    display.present(tracer.output_buffer())?;

    Ok(())
}
