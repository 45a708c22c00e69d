//! Light sources.

use std::sync::Arc;

use glint_math::{Mat3, Vec2, Vec3};

use crate::texture::Texture;
use crate::Color;

/// A light source.
#[derive(Clone, Debug)]
pub enum Light {
    /// Parallel light travelling along `direction` from infinitely far away.
    Directional { direction: Vec3, intensity: Color },
    /// Isotropic point emitter.
    Point { position: Vec3, intensity: Color },
    /// Square emitter sampled on a grid by the integrator.
    Area(AreaLight),
}

impl Light {
    /// `direction` is the way the light travels; it is normalized.
    pub fn directional(direction: Vec3, intensity: Color) -> Self {
        Light::Directional {
            direction: direction.normalize(),
            intensity,
        }
    }

    pub fn point(position: Vec3, intensity: Color) -> Self {
        Light::Point {
            position,
            intensity,
        }
    }

    /// Unit direction from `point` toward the light, and the distance to it.
    /// The direction is zero when `point` sits on the light.
    ///
    /// Directional lights are infinitely far away. An area light is treated
    /// as a point at its center.
    pub fn direction_from(&self, point: Vec3) -> (Vec3, f32) {
        match self {
            Light::Directional { direction, .. } => (-*direction, f32::INFINITY),
            Light::Point { position, .. } => to_position(point, *position),
            Light::Area(area) => to_position(point, area.position),
        }
    }

    /// Intensity received at `point`, ignoring occlusion.
    pub fn intensity_at(&self, point: Vec3) -> Color {
        match self {
            Light::Directional { intensity, .. } | Light::Point { intensity, .. } => *intensity,
            Light::Area(area) => area.intensity_from(area.position, point),
        }
    }
}

fn to_position(from: Vec3, to: Vec3) -> (Vec3, f32) {
    let offset = to - from;
    (offset.normalize_or_zero(), offset.length())
}

/// One grid sample on an area light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSample {
    /// World-space position on the light.
    pub position: Vec3,
    /// Normalized position within the light's extent, in `[0, 1]^2`.
    pub uv: Vec2,
}

/// A square light of side `size` centered on `position`, emitting along
/// `direction`.
#[derive(Clone, Debug)]
pub struct AreaLight {
    position: Vec3,
    /// Columns: second tangent, first tangent, negated direction.
    frame: Mat3,
    size: f32,
    intensity: Color,
    texture: Option<Arc<Texture>>,
}

impl AreaLight {
    pub fn new(position: Vec3, direction: Vec3, size: f32, intensity: Color) -> Self {
        let back = -direction.normalize();
        let v_vec = back.any_orthonormal_vector();
        let u_vec = back.cross(v_vec);

        Self {
            position,
            frame: Mat3::from_cols(v_vec, u_vec, back),
            size,
            intensity,
            texture: None,
        }
    }

    /// Modulate the emission by a texture looked up with each sample's `uv`.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Emission direction (unit length).
    pub fn direction(&self) -> Vec3 {
        -self.frame.z_axis
    }

    /// First tangent axis of the light plane.
    pub fn u_vec(&self) -> Vec3 {
        self.frame.y_axis
    }

    /// Second tangent axis of the light plane.
    pub fn v_vec(&self) -> Vec3 {
        self.frame.x_axis
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }

    /// Intensity emitted from `sample` toward `point`: the base intensity
    /// scaled by the cosine between the emission direction and the direction
    /// to the point, clamped at zero behind the light.
    pub fn intensity_from(&self, sample: Vec3, point: Vec3) -> Color {
        let cos = (point - sample).normalize_or_zero().dot(self.direction());
        cos.max(0.0) * self.intensity
    }

    /// Emission color of the texture at `uv`, white when untextured.
    pub fn emission(&self, uv: Vec2) -> Color {
        match &self.texture {
            Some(texture) => texture.sample_nearest(uv.x, uv.y),
            None => Vec3::ONE,
        }
    }

    /// Stratified samples at the center of each cell of a
    /// `grid[0] x grid[1]` subdivision of the light's square.
    pub fn samples(&self, grid: [u32; 2]) -> impl Iterator<Item = LightSample> + '_ {
        let [nw, nh] = grid;
        let half = 0.5 * self.size;

        (0..nw).flat_map(move |i| {
            (0..nh).map(move |j| {
                let uv = Vec2::new(
                    (i as f32 + 0.5) / nw as f32,
                    (j as f32 + 0.5) / nh as f32,
                );
                let x = uv.x * self.size - half;
                let y = uv.y * self.size - half;

                LightSample {
                    position: self.position + x * self.u_vec() + y * self.v_vec(),
                    uv,
                }
            })
        })
    }
}
