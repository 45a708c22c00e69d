//! Image render driver.
//!
//! Evaluates one primary ray per pixel, single-threaded, and maps the
//! resulting radiance to 8-bit display values.

use std::time::Instant;

use glint_core::Color;

use crate::{Camera, Scene};

/// Radiance of the primary ray through pixel `(x, y)`.
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32) -> Color {
    scene.radiance(&camera.get_ray(x, y))
}

/// Compress unbounded radiance into [0, 1] with `c / (c + 0.25)`.
#[inline]
pub fn tone_map(c: f32) -> f32 {
    if c > 0.0 {
        (c / (c + 0.25)).min(1.0)
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * tone_map(color.x)) as u8;
    let g = (255.0 * tone_map(color.y)) as u8;
    let b = (255.0 * tone_map(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Tone-mapped copy as an `image` buffer, ready to save.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y)))
        })
    }
}

/// Render the entire scene to an image buffer at the camera's resolution.
pub fn render(scene: &Scene, camera: &Camera) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            image.set(x, y, render_pixel(camera, scene, x, y));
        }
    }

    log::info!(
        "Rendered {}x{} ({} objects, {} lights) in {:.2?}",
        camera.image_width,
        camera.image_height,
        scene.objects().len(),
        scene.lights().len(),
        start.elapsed()
    );

    image
}
