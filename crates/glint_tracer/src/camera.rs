//! Pinhole camera for primary rays.

use glint_math::{Ray, Vec3};

/// Pinhole camera generating one ray through each pixel center.
///
/// Pixel `(0, 0)` is the top-left corner of the image.
#[derive(Clone, Debug)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32, // Vertical field of view in degrees

    // Cached computed values (set by update())
    forward: Vec3,
    /// Right axis scaled to the half-width of the image plane at distance 1
    half_x: Vec3,
    /// Up axis scaled to the half-height of the image plane at distance 1
    half_y: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 512,
            image_height: 512,
            look_from: Vec3::new(0.0, 0.0, 1.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
            forward: -Vec3::Z,
            half_x: Vec3::X,
            half_y: Vec3::Y,
        };
        camera.update();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.update();
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    /// Set the vertical field of view, in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self.update();
        self
    }

    pub fn position(&self) -> Vec3 {
        self.look_from
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    fn update(&mut self) {
        let tan_half = (self.vfov.to_radians() * 0.5).tan();
        let aspect = self.image_width.max(1) as f32 / self.image_height.max(1) as f32;

        self.forward = (self.look_at - self.look_from).normalize_or_zero();
        let right = self.forward.cross(self.vup).normalize_or_zero();
        let up = right.cross(self.forward);

        self.half_x = right * tan_half * aspect;
        self.half_y = up * tan_half;
    }

    /// Primary ray through the center of pixel `(i, j)`.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let sx = 2.0 * (i as f32 + 0.5) / self.image_width as f32 - 1.0;
        let sy = 2.0 * (j as f32 + 0.5) / self.image_height as f32 - 1.0;

        let direction = self.forward + self.half_x * sx - self.half_y * sy;
        Ray::new(self.look_from, direction)
    }
}
