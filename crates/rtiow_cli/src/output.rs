//! Presenting finished renders.

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbImage;
use log::info;
use rtiow_renderer::RgbBuffer;

/// Somewhere a finished frame can be shown or stored.
pub trait Display {
    fn present(&mut self, frame: &RgbBuffer) -> Result<()>;
}

/// Writes frames to an image file; the format follows the extension (`.png`, `.ppm`, ...).
pub struct ImageFileDisplay {
    path: PathBuf,
}

impl ImageFileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Display for ImageFileDisplay {
    fn present(&mut self, frame: &RgbBuffer) -> Result<()> {
        // Render buffers start at the bottom row, image files at the top
        let image = RgbImage::from_raw(frame.width(), frame.height(), frame.to_top_down())
            .context("frame buffer does not match its dimensions")?;

        image
            .save(&self.path)
            .with_context(|| format!("failed to save image to {}", self.path.display()))?;

        info!(
            "Saved {}x{} image to {}",
            frame.width(),
            frame.height(),
            self.path.display()
        );
        Ok(())
    }
}
