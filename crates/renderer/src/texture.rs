//! Texture records: pixel upload and channel-to-format mapping.

use std::path::Path;

use glow::HasContext;

use asset::texture::TextureData;

use crate::{RenderError, RenderResult};

/// One uploaded 2D texture plus the dimensions it was created with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Texture {
    handle: Option<glow::Texture>,
    width: u32,
    height: u32,
    channels: u32,
}

impl Texture {
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub(crate) fn handle(&self) -> Option<glow::Texture> {
        self.handle
    }
}

/// Map a channel count onto the GL pixel format used for both the internal
/// format and the client format.
fn pixel_format(channels: u32) -> RenderResult<u32> {
    match channels {
        1 => Ok(glow::RED),
        2 => Ok(glow::RG),
        3 => Ok(glow::RGB),
        4 => Ok(glow::RGBA),
        other => Err(RenderError::UnsupportedChannels(other)),
    }
}

/// Upload tightly-packed 8-bit pixels. `pixels` must hold exactly
/// `width * height * channels` bytes.
pub fn make_texture(
    gl: &glow::Context,
    width: u32,
    height: u32,
    channels: u32,
    pixels: &[u8],
) -> RenderResult<Texture> {
    let format = pixel_format(channels)?;
    let expected = width as usize * height as usize * channels as usize;
    if pixels.len() != expected {
        return Err(RenderError::PixelDataSize {
            expected,
            actual: pixels.len(),
            width,
            height,
            channels,
        });
    }

    unsafe {
        let handle = gl.create_texture().map_err(RenderError::Create)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(handle));

        // Rows are tightly packed for every channel count, including RGB
        // rows whose byte width is not a multiple of 4.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            format as i32,
            width as i32,
            height as i32,
            0,
            format,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(pixels)),
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );

        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(Texture {
            handle: Some(handle),
            width,
            height,
            channels,
        })
    }
}

/// Decode an image file and upload it. The record reports the decoder's
/// dimensions and channel count unchanged.
pub fn load_texture(gl: &glow::Context, path: impl AsRef<Path>) -> RenderResult<Texture> {
    let data = TextureData::load(path)?;
    make_texture(gl, data.width, data.height, data.channels, &data.pixels)
}

/// Delete the GL texture and reset the record to the empty state.
pub fn free_texture(gl: &glow::Context, texture: &mut Texture) {
    if let Some(handle) = texture.handle.take() {
        unsafe { gl.delete_texture(handle) };
    }
    *texture = Texture::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let tex = Texture::default();
        assert!(tex.is_empty());
        assert_eq!((tex.width(), tex.height(), tex.channels()), (0, 0, 0));
    }

    #[test]
    fn channel_count_maps_to_gl_format() {
        assert_eq!(pixel_format(1).unwrap(), glow::RED);
        assert_eq!(pixel_format(2).unwrap(), glow::RG);
        assert_eq!(pixel_format(3).unwrap(), glow::RGB);
        assert_eq!(pixel_format(4).unwrap(), glow::RGBA);
        assert!(matches!(
            pixel_format(0),
            Err(RenderError::UnsupportedChannels(0))
        ));
        assert!(matches!(
            pixel_format(5),
            Err(RenderError::UnsupportedChannels(5))
        ));
    }
}
