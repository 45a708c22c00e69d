//! Surface reflectance models.

use std::f32::consts::PI;
use std::sync::Arc;

use glint_math::{Vec2, Vec3};

use crate::texture::Texture;
use crate::Color;

/// A closed set of analytic BRDFs.
#[derive(Clone, Debug, PartialEq)]
pub enum Reflectance {
    /// Lambertian diffuse plus a Blinn-Phong highlight.
    BlinnPhong {
        diffuse: Color,
        specular: Color,
        exponent: f32,
    },
    /// Anisotropic Ward model with roughness `alpha_x` along the first
    /// tangent and `alpha_y` along the second.
    Ward {
        diffuse: Color,
        specular: Color,
        alpha_x: f32,
        alpha_y: f32,
    },
}

impl Reflectance {
    fn diffuse(&self) -> Color {
        match self {
            Reflectance::BlinnPhong { diffuse, .. } | Reflectance::Ward { diffuse, .. } => *diffuse,
        }
    }

    fn specular(&self) -> Color {
        match self {
            Reflectance::BlinnPhong { specular, .. } | Reflectance::Ward { specular, .. } => *specular,
        }
    }
}

/// How a surface texture combines with the diffuse color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureMode {
    /// Diffuse color multiplied by the texel.
    #[default]
    Modulate,
    /// Even mix of the diffuse color and the texel.
    Blend,
    /// The texel alone.
    Replace,
}

/// A texture tiled over a surface's texture coordinates.
#[derive(Clone, Debug)]
pub struct SurfaceTexture {
    texture: Arc<Texture>,
    mode: TextureMode,
    scale: Vec2,
}

impl SurfaceTexture {
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn mode(&self) -> TextureMode {
        self.mode
    }

    /// Repetitions per unit of texture coordinate along `u` and `v`.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    fn apply(&self, diffuse: Color, uv: Vec2) -> Color {
        let uv = uv * self.scale;
        let texel = self.texture.sample_repeat(uv.x, uv.y);

        match self.mode {
            TextureMode::Modulate => diffuse * texel,
            TextureMode::Blend => diffuse.lerp(texel, 0.5),
            TextureMode::Replace => texel,
        }
    }
}

/// A reflectance model with an optional diffuse texture.
///
/// Every query takes the texture coordinate of the shaded point. Without a
/// texture the coordinate is ignored.
#[derive(Clone, Debug)]
pub struct Material {
    reflectance: Reflectance,
    texture: Option<SurfaceTexture>,
}

impl Default for Material {
    fn default() -> Self {
        Material::blinn_phong(Vec3::splat(0.7), Vec3::splat(0.7), 5.0)
    }
}

impl From<Reflectance> for Material {
    fn from(reflectance: Reflectance) -> Self {
        Self {
            reflectance,
            texture: None,
        }
    }
}

impl Material {
    pub fn blinn_phong(diffuse: Color, specular: Color, exponent: f32) -> Self {
        Reflectance::BlinnPhong {
            diffuse,
            specular,
            exponent,
        }
        .into()
    }

    pub fn ward(diffuse: Color, specular: Color, alpha_x: f32, alpha_y: f32) -> Self {
        Reflectance::Ward {
            diffuse,
            specular,
            alpha_x,
            alpha_y,
        }
        .into()
    }

    /// Attach a diffuse texture, tiled once per unit of texture coordinate.
    pub fn with_texture(mut self, texture: Arc<Texture>, mode: TextureMode) -> Self {
        self.texture = Some(SurfaceTexture {
            texture,
            mode,
            scale: Vec2::ONE,
        });
        self
    }

    /// Set the tiling of the attached texture. Factors with a magnitude of
    /// at most 1e-3 leave that axis unchanged.
    pub fn with_texture_scale(mut self, u: f32, v: f32) -> Self {
        if let Some(texture) = &mut self.texture {
            if u.abs() > 1e-3 {
                texture.scale.x = u;
            }
            if v.abs() > 1e-3 {
                texture.scale.y = v;
            }
        }
        self
    }

    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }

    pub fn texture(&self) -> Option<&SurfaceTexture> {
        self.texture.as_ref()
    }

    /// Diffuse color at texture coordinate `uv`.
    pub fn diffuse(&self, uv: Vec2) -> Color {
        let diffuse = self.reflectance.diffuse();
        match &self.texture {
            Some(texture) => texture.apply(diffuse, uv),
            None => diffuse,
        }
    }

    /// Color reflected under uniform ambient light.
    pub fn ambient_color(&self, uv: Vec2) -> Color {
        self.diffuse(uv)
    }

    /// Evaluate the BRDF at `uv`. All three directions are unit vectors
    /// pointing away from the surface.
    pub fn brdf(&self, uv: Vec2, view_dir: Vec3, light_dir: Vec3, normal: Vec3) -> Color {
        let diffuse = self.diffuse(uv);
        let half = (view_dir + light_dir).normalize_or_zero();

        match &self.reflectance {
            Reflectance::BlinnPhong {
                specular, exponent, ..
            } => diffuse + *specular * normal.dot(half).max(0.0).powf(*exponent),

            Reflectance::Ward {
                specular,
                alpha_x,
                alpha_y,
                ..
            } => {
                let lambert = diffuse / PI;

                let n_dot_h = normal.dot(half);
                if n_dot_h <= 0.0 {
                    return lambert;
                }

                let tangent_y = normal.any_orthonormal_vector();
                let tangent_x = normal.cross(tangent_y);

                let hx = half.dot(tangent_x) / alpha_x;
                let hy = half.dot(tangent_y) / alpha_y;
                let exponent = -(hx * hx + hy * hy) / (n_dot_h * n_dot_h);

                let cosines = (light_dir.dot(normal) * view_dir.dot(normal)).max(1e-8);
                let norm = 4.0 * PI * alpha_x * alpha_y * cosines.sqrt();

                lambert + *specular / norm * exponent.exp()
            }
        }
    }

    /// Reflectance along the mirror direction. Textures do not affect it.
    pub fn brdf_reflect(&self, _view_dir: Vec3, _normal: Vec3) -> Color {
        self.reflectance.specular()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UV: Vec2 = Vec2::ZERO;

    /// Two texels along `u`: red then blue.
    fn stripes() -> Arc<Texture> {
        Arc::new(Texture::new(2, 1, vec![Vec3::X, Vec3::Z]).unwrap())
    }

    #[test]
    fn test_blinn_phong_peak_at_mirror_configuration() {
        let mat = Material::blinn_phong(Vec3::splat(0.2), Vec3::splat(1.0), 50.0);
        let normal = Vec3::Z;
        let light = Vec3::new(1.0, 0.0, 1.0).normalize();

        let mirror = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let off = Vec3::new(0.0, 1.0, 0.3).normalize();

        let peak = mat.brdf(UV, mirror, light, normal);
        let dim = mat.brdf(UV, off, light, normal);

        // Half vector equals the normal: diffuse + full specular
        assert!((peak.x - 1.2).abs() < 1e-4);
        assert!(dim.x < peak.x);
        assert!(dim.x >= 0.2);
    }

    #[test]
    fn test_blinn_phong_colors() {
        let mat = Material::blinn_phong(Vec3::new(0.3, 0.3, 0.8), Vec3::new(0.04, 0.04, 0.04), 10.0);

        assert_eq!(mat.ambient_color(UV), Vec3::new(0.3, 0.3, 0.8));
        assert_eq!(mat.ambient_color(Vec2::new(7.0, -2.0)), Vec3::new(0.3, 0.3, 0.8));
        assert_eq!(mat.brdf_reflect(Vec3::Z, Vec3::Z), Vec3::splat(0.04));
    }

    #[test]
    fn test_default_material() {
        let mat = Material::default();
        assert_eq!(mat.ambient_color(UV), Vec3::splat(0.7));
        assert!(mat.texture().is_none());
    }

    #[test]
    fn test_ward_is_finite_and_positive() {
        let mat = Material::ward(Vec3::splat(0.5), Vec3::splat(0.3), 0.2, 0.5);
        let normal = Vec3::Z;

        for light in [Vec3::Z, Vec3::new(1.0, 0.0, 1.0).normalize(), Vec3::new(0.2, 0.9, 0.1).normalize()] {
            for view in [Vec3::Z, Vec3::new(-1.0, 0.2, 0.5).normalize()] {
                let value = mat.brdf(UV, view, light, normal);
                assert!(value.is_finite());
                assert!(value.min_element() >= 0.5 / PI - 1e-6);
            }
        }
    }

    #[test]
    fn test_ward_specular_peak_along_normal() {
        let mat = Material::ward(Vec3::ZERO, Vec3::ONE, 0.3, 0.3);
        let normal = Vec3::Z;

        let aligned = mat.brdf(UV, Vec3::Z, Vec3::Z, normal);
        // exp(0) / (4 pi ax ay)
        let expected = 1.0 / (4.0 * PI * 0.09);
        assert!((aligned.x - expected).abs() < 1e-3);

        let tilted = mat.brdf(
            UV,
            Vec3::new(0.5, 0.0, 1.0).normalize(),
            Vec3::new(0.5, 0.0, 1.0).normalize(),
            normal,
        );
        assert!(tilted.x < aligned.x);
    }

    #[test]
    fn test_ward_reflect_is_specular() {
        let mat = Material::ward(Vec3::splat(0.5), Vec3::new(0.1, 0.2, 0.3), 0.2, 0.5);
        assert_eq!(mat.brdf_reflect(Vec3::Z, Vec3::Z), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(mat.ambient_color(UV), Vec3::splat(0.5));
    }

    #[test]
    fn test_texture_modes() {
        let base = Material::blinn_phong(Vec3::new(0.5, 0.5, 1.0), Vec3::splat(0.2), 1.0);
        let red = Vec2::new(0.25, 0.5);
        let blue = Vec2::new(0.75, 0.5);

        let modulate = base.clone().with_texture(stripes(), TextureMode::Modulate);
        assert_eq!(modulate.diffuse(red), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(modulate.diffuse(blue), Vec3::new(0.0, 0.0, 1.0));

        let blend = base.clone().with_texture(stripes(), TextureMode::Blend);
        assert!((blend.diffuse(red) - Vec3::new(0.75, 0.25, 0.5)).length() < 1e-6);

        let replace = base.with_texture(stripes(), TextureMode::Replace);
        assert_eq!(replace.ambient_color(blue), Vec3::Z);
        // Specular reflectance is untouched
        assert_eq!(replace.brdf_reflect(Vec3::Z, Vec3::Z), Vec3::splat(0.2));
    }

    #[test]
    fn test_texture_tiles_and_scales() {
        let mat = Material::blinn_phong(Vec3::ONE, Vec3::ZERO, 1.0)
            .with_texture(stripes(), TextureMode::Replace);

        // Coordinates wrap, including negative ones
        assert_eq!(mat.diffuse(Vec2::new(3.25, 0.0)), Vec3::X);
        assert_eq!(mat.diffuse(Vec2::new(-0.25, 0.0)), Vec3::Z);

        // Two repetitions per unit: 0.25 lands in the second half of a tile
        let scaled = mat.clone().with_texture_scale(2.0, 2.0);
        assert_eq!(scaled.texture().unwrap().scale(), Vec2::splat(2.0));
        assert_eq!(scaled.diffuse(Vec2::new(0.25, 0.0)), Vec3::Z);

        // Near-zero factors are ignored
        let kept = mat.with_texture_scale(0.0, 1e-4);
        assert_eq!(kept.texture().unwrap().scale(), Vec2::ONE);
    }

    #[test]
    fn test_textured_brdf_uses_texel() {
        let mat = Material::blinn_phong(Vec3::ONE, Vec3::ZERO, 1.0)
            .with_texture(stripes(), TextureMode::Modulate);

        let value = mat.brdf(Vec2::new(0.25, 0.5), Vec3::Z, Vec3::Z, Vec3::Z);
        assert_eq!(value, Vec3::X);
    }
}
