//! Whitted-style radiance evaluation.
//!
//! Direct lighting with hard shadows from every light, an ambient term, and
//! one perfect mirror bounce per hit. Recursion stops at the configured depth
//! or once the ray's attenuation falls below the configured threshold.

use glint_core::{AreaLight, Color, Light, Material};
use glint_math::{Ray, Vec3};

use crate::{Hit, Scene};

impl Scene {
    /// Radiance arriving along `ray`. No tone mapping is applied.
    pub fn radiance(&self, ray: &Ray) -> Color {
        let config = self.config();

        if ray.recursion_level() >= config.max_recursion || ray.beta() < config.min_beta {
            return Color::ZERO;
        }

        let mut hit = Hit::new();
        self.intersect(ray, &mut hit);

        // Misses only show the background to primary rays
        let Some(object) = hit.object else {
            return if ray.recursion_level() == 0 {
                config.background
            } else {
                Color::ZERO
            };
        };

        let material = object.material();
        let view = -ray.direction();

        let mut value = config.ambient_factor * material.ambient_color(hit.texcoord);

        for light in self.lights() {
            value += match light {
                Light::Area(area) => self.area_light(area, material, &hit, view),
                _ => self.direct_light(light, material, &hit, view),
            };
        }

        value + self.reflection(ray, material, &hit)
    }

    fn direct_light(&self, light: &Light, material: &Material, hit: &Hit<'_>, view: Vec3) -> Color {
        let (light_dir, distance) = light.direction_from(hit.point);

        // A light sitting on the hit point has no direction to shade with
        if light_dir == Vec3::ZERO {
            return Color::ZERO;
        }

        if self.occluded(hit, light_dir, distance) {
            return Color::ZERO;
        }

        light_dir.dot(hit.normal).max(0.0)
            * light.intensity_at(hit.point)
            * material.brdf(hit.texcoord, view, light_dir, hit.normal)
    }

    /// Box-filtered average over the light's sample grid.
    fn area_light(&self, area: &AreaLight, material: &Material, hit: &Hit<'_>, view: Vec3) -> Color {
        let grid = self.config().area_light_grid;
        let count = grid[0] * grid[1];
        if count == 0 {
            return Color::ZERO;
        }

        let mut sum = Color::ZERO;
        for sample in area.samples(grid) {
            let offset = sample.position - hit.point;
            let distance = offset.length();
            if distance == 0.0 {
                continue;
            }
            let light_dir = offset / distance;

            if self.occluded(hit, light_dir, distance) {
                continue;
            }

            sum += light_dir.dot(hit.normal).max(0.0)
                * area.intensity_from(sample.position, hit.point)
                * area.emission(sample.uv)
                * material.brdf(hit.texcoord, view, light_dir, hit.normal);
        }

        sum / count as f32
    }

    /// Whether anything lies between the hit point and a light `distance`
    /// away along `light_dir`.
    fn occluded(&self, hit: &Hit<'_>, light_dir: Vec3, distance: f32) -> bool {
        let origin = hit.point + hit.normal * self.config().ray_epsilon;
        let shadow_ray = Ray::shadow(origin, light_dir);

        let mut shadow_hit = Hit::with_max_t(distance);
        self.intersect(&shadow_ray, &mut shadow_hit)
    }

    fn reflection(&self, ray: &Ray, material: &Material, hit: &Hit<'_>) -> Color {
        let alpha = material.brdf_reflect(-ray.direction(), hit.normal);
        if alpha == Color::ZERO {
            return Color::ZERO;
        }

        let d = ray.direction();
        let mirrored = d - 2.0 * d.dot(hit.normal) * hit.normal;
        let origin = hit.point + hit.normal * self.config().ray_epsilon;
        let reflected = ray.spawn(origin, mirrored, alpha.length());

        alpha * self.radiance(&reflected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Object, Shape, TraceConfig};
    use glint_core::{Texture, TextureMode};
    use glint_math::Mat4;
    use std::f32::consts::PI;
    use std::sync::Arc;

    fn matte(diffuse: f32) -> Arc<Material> {
        Arc::new(Material::blinn_phong(Vec3::splat(diffuse), Vec3::ZERO, 1.0))
    }

    fn floor(material: Arc<Material>) -> Object {
        Object::new(Arc::new(Shape::plane()), material)
    }

    /// Two facing mirrors at z = 0 and z = 2.
    fn mirror_corridor(diffuse: f32, specular: f32) -> Scene {
        let material = Arc::new(Material::blinn_phong(
            Vec3::splat(diffuse),
            Vec3::splat(specular),
            1.0,
        ));
        let plane = Arc::new(Shape::plane());

        let mut scene = Scene::new(TraceConfig {
            background: Vec3::ZERO,
            ..TraceConfig::default()
        });
        scene.add_object(Object::new(plane.clone(), material.clone()));
        scene.add_object(
            Object::new(plane, material).with_transform(
                Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)) * Mat4::from_rotation_x(PI),
            ),
        );
        scene
    }

    fn deeper(ray: Ray, levels: u32, attenuation: f32) -> Ray {
        (0..levels).fold(ray, |r, _| r.spawn(r.origin(), r.direction(), attenuation))
    }

    #[test]
    fn test_background_only_for_primary_rays() {
        let scene = Scene::new(TraceConfig {
            background: Vec3::new(0.1, 0.2, 0.3),
            ..TraceConfig::default()
        });
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert_eq!(scene.radiance(&ray), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(scene.radiance(&deeper(ray, 1, 1.0)), Vec3::ZERO);
    }

    #[test]
    fn test_termination_by_depth() {
        let scene = mirror_corridor(0.5, 0.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);

        // Eight bounces contribute 0.1 * 0.5 * 0.5^k each, then recursion stops
        let expected = 0.1 * (1.0 - 0.5_f32.powi(8));
        let value = scene.radiance(&ray);
        assert!((value.x - expected).abs() < 1e-5, "{value}");

        assert_eq!(scene.radiance(&deeper(ray, 8, 1.0)), Vec3::ZERO);
    }

    #[test]
    fn test_termination_by_beta() {
        // |(0.05, 0.05, 0.05)| < 0.1: the first reflected ray is dropped
        let scene = mirror_corridor(0.5, 0.05);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);

        let value = scene.radiance(&ray);
        assert!((value.x - 0.05).abs() < 1e-6, "{value}");

        assert_eq!(scene.radiance(&deeper(ray, 1, 0.09)), Vec3::ZERO);
    }

    #[test]
    fn test_white_mirror_terminates() {
        // Beta grows under a white mirror; only the depth cap stops it
        let scene = mirror_corridor(0.0, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        assert_eq!(scene.radiance(&ray), Vec3::ZERO);
    }

    #[test]
    fn test_shadow_zeroes_only_the_blocked_light() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(0.5)));
        scene.add_light(Light::point(Vec3::new(0.0, 0.0, 4.0), Vec3::ONE));
        scene.add_light(Light::point(Vec3::new(3.0, 0.0, 4.0), Vec3::ONE));

        let ray = Ray::new(Vec3::new(0.0, -2.0, 2.0), Vec3::new(0.0, 2.0, -2.0));

        // Ambient 0.05, overhead light 1 * 0.5, slanted light 0.8 * 0.5
        let lit = scene.radiance(&ray);
        assert!((lit.x - 0.95).abs() < 1e-4, "{lit}");

        // Blocks the overhead light only
        scene.add_object(
            Object::new(Arc::new(Shape::sphere(Vec3::ZERO, 0.5)), matte(0.5))
                .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0))),
        );
        let shadowed = scene.radiance(&ray);
        assert!((shadowed.x - 0.45).abs() < 1e-4, "{shadowed}");
    }

    #[test]
    fn test_directional_light() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(1.0)));
        scene.add_light(Light::directional(Vec3::new(0.0, -1.0, -1.0), Vec3::ONE));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        let value = scene.radiance(&ray);
        assert!((value.x - (0.1 + 0.5_f32.sqrt())).abs() < 1e-4, "{value}");

        // Light from below the floor does not reach its top side
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(1.0)));
        scene.add_light(Light::directional(Vec3::Z, Vec3::ONE));
        assert!((scene.radiance(&ray).x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_area_light_average() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(1.0)));
        scene.add_light(Light::Area(AreaLight::new(
            Vec3::new(0.0, 0.0, 4.0),
            -Vec3::Z,
            0.5,
            Vec3::ONE,
        )));

        let ray = Ray::new(Vec3::new(0.1, 0.1, 1.0), -Vec3::Z);
        let value = scene.radiance(&ray);

        // Nearly overhead: each sample contributes just under 1
        assert!(value.x > 1.08 && value.x < 1.1, "{value}");
    }

    #[test]
    fn test_area_light_emission_texture() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(1.0)));
        let texture = Arc::new(Texture::solid_color(Vec3::new(1.0, 0.0, 0.0)));
        scene.add_light(Light::Area(
            AreaLight::new(Vec3::new(0.0, 0.0, 4.0), -Vec3::Z, 0.5, Vec3::ONE).with_texture(texture),
        ));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        let value = scene.radiance(&ray);

        assert!(value.x > 1.0);
        assert!((value.y - 0.1).abs() < 1e-6);
        assert!((value.z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_area_light_fully_occluded() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(1.0)));
        scene.add_object(
            Object::new(Arc::new(Shape::sphere(Vec3::ZERO, 1.0)), matte(0.0))
                .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0))),
        );
        scene.add_light(Light::Area(AreaLight::new(
            Vec3::new(0.0, 0.0, 4.0),
            -Vec3::Z,
            0.5,
            Vec3::ONE,
        )));

        // Looks at the floor from the side, under the sphere
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.5), Vec3::new(-3.0, 0.0, -0.5));
        let value = scene.radiance(&ray);
        assert!((value.x - 0.1).abs() < 1e-5, "{value}");
    }

    #[test]
    fn test_point_light_on_the_surface() {
        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(matte(0.5)));
        scene.add_light(Light::point(Vec3::ZERO, Vec3::ONE));

        // The light sits exactly where the ray lands: ambient only
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        let value = scene.radiance(&ray);
        assert!(value.is_finite(), "{value}");
        assert!((value - Vec3::splat(0.05)).length() < 1e-6, "{value}");
    }

    #[test]
    fn test_replace_texture_sets_ambient_color() {
        // Two texels along x: red on [0, 0.5), blue on [0.5, 1), tiled
        let texture = Arc::new(Texture::new(2, 1, vec![Vec3::X, Vec3::Z]).unwrap());
        let material = Material::blinn_phong(Vec3::ONE, Vec3::ZERO, 1.0)
            .with_texture(texture, TextureMode::Replace);

        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(Arc::new(material)));

        let red = scene.radiance(&Ray::new(Vec3::new(0.25, 0.5, 1.0), -Vec3::Z));
        assert!((red - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-6, "{red}");

        let blue = scene.radiance(&Ray::new(Vec3::new(2.75, 0.5, 1.0), -Vec3::Z));
        assert!((blue - Vec3::new(0.0, 0.0, 0.1)).length() < 1e-6, "{blue}");
    }

    #[test]
    fn test_modulate_texture_scales_direct_light() {
        let texture = Arc::new(Texture::solid_color(Vec3::new(0.5, 1.0, 0.0)));
        let material = Material::blinn_phong(Vec3::ONE, Vec3::ZERO, 1.0)
            .with_texture(texture, TextureMode::Modulate);

        let mut scene = Scene::new(TraceConfig::default());
        scene.add_object(floor(Arc::new(material)));
        scene.add_light(Light::point(Vec3::new(0.0, 0.0, 4.0), Vec3::ONE));

        // (ambient 0.1 + overhead light 1) times the texel
        let value = scene.radiance(&Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z));
        assert!((value - Vec3::new(0.55, 1.1, 0.0)).length() < 1e-5, "{value}");
    }
}
