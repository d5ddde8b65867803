//! Bucket-based tile rendering.
//!
//! Divides the image into square tiles (buckets) that are rendered as
//! independent tasks. Each tile owns mutable slices of exactly the rows and
//! columns it covers, so workers never touch each other's pixels.

use crate::renderer::{color_to_rgb, render_pixel};
use crate::rgb_buffer::CHANNELS;
use crate::{Camera, RayTracerConfig, Scene};
use rand::RngCore;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 128;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's corner nearest the buffer origin
    pub x: u32,
    /// Y coordinate of bucket's corner nearest the buffer origin
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }
}

/// Buckets in row-major grid order; edge buckets are clipped to the image.
fn grid_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    assert!(bucket_size > 0, "bucket size must be non-zero");

    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Sort by distance from image center.
///
/// The sort is stable, so equally distant buckets keep grid order.
fn sort_spiral<T>(items: &mut [T], width: u32, height: u32, bucket: impl Fn(&T) -> &Bucket) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    items.sort_by(|a, b| {
        distance(bucket(a))
            .partial_cmp(&distance(bucket(b)))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// A bucket together with the buffer rows it owns.
#[derive(Debug)]
pub struct Tile<'a> {
    pub bucket: Bucket,
    /// One slice per pixel row, `bucket.width * 3` bytes each
    pub rows: Vec<&'a mut [u8]>,
}

/// Split an RGB buffer into disjoint tiles, in spiral render order.
///
/// # Panics
///
/// Panics if `data` is not `width * height * 3` bytes or `bucket_size` is zero.
pub fn partition_tiles(data: &mut [u8], width: u32, height: u32, bucket_size: u32) -> Vec<Tile<'_>> {
    let stride = width as usize * CHANNELS;
    assert_eq!(
        data.len(),
        stride * height as usize,
        "buffer does not match {width}x{height}"
    );

    let mut tiles: Vec<Tile<'_>> = grid_buckets(width, height, bucket_size)
        .into_iter()
        .map(|bucket| Tile {
            bucket,
            rows: Vec::with_capacity(bucket.height as usize),
        })
        .collect();

    if stride > 0 {
        let tiles_x = width.div_ceil(bucket_size) as usize;
        let chunk = bucket_size as usize * CHANNELS;

        for (y, row) in data.chunks_exact_mut(stride).enumerate() {
            let tile_row = y / bucket_size as usize;
            for (tx, part) in row.chunks_mut(chunk).enumerate() {
                tiles[tile_row * tiles_x + tx].rows.push(part);
            }
        }
    }

    sort_spiral(&mut tiles, width, height, |tile| &tile.bucket);
    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.bucket.index = i;
    }

    tiles
}

/// Render every pixel of a tile straight into its buffer rows.
pub fn render_tile(
    tile: Tile<'_>,
    camera: &Camera,
    scene: &Scene,
    config: &RayTracerConfig,
    rng: &mut dyn RngCore,
) {
    let Tile { bucket, rows } = tile;

    for (local_y, row) in rows.into_iter().enumerate() {
        let global_y = bucket.y + local_y as u32;
        for (local_x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let global_x = bucket.x + local_x as u32;
            let color = render_pixel(camera, scene, global_x, global_y, config, rng);
            pixel.copy_from_slice(&color_to_rgb(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RgbBuffer;

    fn tile_pixels(tiles: &[Tile<'_>]) -> u32 {
        tiles.iter().map(|t| t.bucket.width * t.bucket.height).sum()
    }

    #[test]
    fn test_partition_exact_fit() {
        let mut buffer = RgbBuffer::new(256, 256);
        let tiles = partition_tiles(buffer.data_mut(), 256, 256, 128);
        assert_eq!(tiles.len(), 4); // 2x2 grid
        assert_eq!(tile_pixels(&tiles), 256 * 256);
    }

    #[test]
    fn test_partition_partial_fit() {
        let mut buffer = RgbBuffer::new(100, 100);
        let tiles = partition_tiles(buffer.data_mut(), 100, 100, 64);
        assert_eq!(tiles.len(), 4); // 2x2 grid with clipped edge tiles
        assert_eq!(tile_pixels(&tiles), 100 * 100);
    }

    #[test]
    fn test_spiral_order() {
        let mut buffer = RgbBuffer::new(192, 192);
        let tiles = partition_tiles(buffer.data_mut(), 192, 192, 64);
        assert_eq!(tiles.len(), 9); // 3x3 grid

        // First tile is the center one
        let first = tiles[0].bucket;
        assert_eq!((first.x, first.y), (64, 64));

        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.bucket.index, i);
        }
    }

    #[test]
    fn test_tile_rows_match_bucket() {
        let mut buffer = RgbBuffer::new(300, 200);
        let tiles = partition_tiles(buffer.data_mut(), 300, 200, 128);
        assert_eq!(tiles.len(), 3 * 2);

        for tile in &tiles {
            assert_eq!(tile.rows.len(), tile.bucket.height as usize);
            for row in &tile.rows {
                assert_eq!(row.len(), tile.bucket.width as usize * CHANNELS);
            }
        }
    }

    #[test]
    fn test_partition_covers_every_pixel_exactly_once() {
        for (width, height, size) in [(1, 1, 128), (17, 9, 4), (128, 128, 128), (129, 257, 128), (64, 3, 5)] {
            let mut buffer = RgbBuffer::new(width, height);
            let tiles = partition_tiles(buffer.data_mut(), width, height, size);

            for tile in tiles {
                for row in tile.rows {
                    for byte in row.iter_mut() {
                        *byte += 1;
                    }
                }
            }

            assert!(
                buffer.data().iter().all(|&b| b == 1),
                "{width}x{height} tile {size}: gap or overlap"
            );
        }
    }

    #[test]
    fn test_partition_maps_pixels_to_coordinates() {
        let (width, height) = (37_u32, 23_u32);
        let mut buffer = RgbBuffer::new(width, height);
        let tiles = partition_tiles(buffer.data_mut(), width, height, 8);

        // Write each pixel's own coordinates and its tile's index
        for tile in tiles {
            let bucket = tile.bucket;
            for (local_y, row) in tile.rows.into_iter().enumerate() {
                for (local_x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
                    let x = bucket.x as usize + local_x;
                    let y = bucket.y as usize + local_y;
                    pixel.copy_from_slice(&[x as u8, y as u8, bucket.index as u8]);
                }
            }
        }

        for y in 0..height {
            for x in 0..width {
                let [px, py, _] = buffer.pixel(x, y);
                assert_eq!((px as u32, py as u32), (x, y));
            }
        }
    }

    #[test]
    fn test_empty_image_has_no_tiles() {
        let mut data: Vec<u8> = Vec::new();
        assert!(partition_tiles(&mut data, 0, 0, 128).is_empty());
    }
}
