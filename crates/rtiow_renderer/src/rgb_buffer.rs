//! 8-bit RGB output buffer.

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Interleaved RGB bytes, row-major.
///
/// Row 0 is the bottom row of the image, matching the camera's `t = 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Create a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in one row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw bytes, `width * height * 3` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the pixel at (x, y), y counted from the bottom.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = y as usize * self.stride() + x as usize * CHANNELS;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Copy of the bytes with rows ordered top to bottom, for image files.
    pub fn to_top_down(&self) -> Vec<u8> {
        let stride = self.stride();
        let mut bytes = Vec::with_capacity(self.data.len());
        if stride == 0 {
            return bytes;
        }
        for row in self.data.chunks_exact(stride).rev() {
            bytes.extend_from_slice(row);
        }
        bytes
    }
}
