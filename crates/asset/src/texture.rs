//! Texture decoding into CPU-side pixel data.

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;

/// Decoded pixels plus the metadata a GPU upload needs. Rows are stored
/// bottom-up (the image is flipped vertically on decode) so that uv (0, 0)
/// lands on the bottom-left texel, matching GL conventions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Components per pixel, 1..=4.
    pub channels: u32,
}

impl TextureData {
    /// Decode an image file. 8-bit gray/gray+alpha/RGB/RGBA keep their
    /// channel count; other layouts normalize to RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let data = Self::from_image(img);
        log::info!(
            "Loaded texture {} ({}x{}, {} channel(s))",
            path.display(),
            data.width,
            data.height,
            data.channels
        );
        Ok(data)
    }

    /// Convert an already-decoded image, flipping it vertically.
    pub fn from_image(img: DynamicImage) -> Self {
        let img = img.flipv();
        let width = img.width();
        let height = img.height();
        let (channels, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => (4, other.to_rgba8().into_raw()),
        };
        Self {
            pixels,
            width,
            height,
            channels,
        }
    }

    /// Checkerboard test pattern (RGB, 8-texel cells, white/gray).
    pub fn checkerboard(size: u32) -> Self {
        let mut pixels = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let cell = ((x / 8) + (y / 8)) % 2;
                if cell == 0 {
                    pixels.extend_from_slice(&[255, 255, 255]);
                } else {
                    pixels.extend_from_slice(&[128, 128, 128]);
                }
            }
        }
        Self {
            pixels,
            width: size,
            height: size,
            channels: 3,
        }
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Check that the pixel buffer matches the declared dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && (1..=4).contains(&self.channels)
            && self.pixels.len() == self.expected_len()
    }
}
