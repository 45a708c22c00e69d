//! Image textures for surfaces and area lights.
//!
//! Images are decoded with the `image` crate and stored as linear RGB floats.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture has no pixels")]
    Empty,
}

pub type TextureResult<T> = Result<T, TextureError>;

/// An RGB image in linear space, row-major, row 0 first.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Texture {
    /// Create a texture from pixel data. Fails when there are no pixels or
    /// the pixel count does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<Vec3>) -> TextureResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::Empty);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// Load an image file and convert it from sRGB to linear RGB.
    pub fn load<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                Vec3::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        let texture = Self::new(width, height, pixels)?;
        log::debug!("Loaded texture {} ({}x{})", path.display(), width, height);
        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-pixel lookup by normalized coordinates.
    ///
    /// `u` runs along a row and `v` down the rows; both are clamped to
    /// `[0, 1]`.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Vec3 {
        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest-pixel lookup that tiles the image: coordinates wrap into
    /// `[0, 1)` before indexing.
    pub fn sample_repeat(&self, u: f32, v: f32) -> Vec3 {
        self.sample_nearest(u.rem_euclid(1.0), v.rem_euclid(1.0))
    }
}

fn texel_index(coord: f32, size: u32) -> u32 {
    let scaled = (coord.clamp(0.0, 1.0) * size as f32) as u32;
    scaled.min(size - 1)
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
