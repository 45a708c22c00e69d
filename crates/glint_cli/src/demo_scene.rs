//! The demo scene: two spheres and a mesh standing on a floor, lit by a
//! directional, a point and an area light.

use std::f32::consts::FRAC_PI_4;
use std::path::Path;
use std::sync::Arc;

use glint_core::{AreaLight, Light, Material, Mesh, Texture, TextureMode, Transform};
use glint_math::{Quat, Vec3};
use glint_tracer::{Camera, Object, RenderConfig, Scene, Shape};

/// Optional images applied to the demo scene.
#[derive(Debug, Default)]
pub struct DemoTextures {
    /// Modulates the floor, one tile per world unit.
    pub floor: Option<Arc<Texture>>,
    /// Emission image of the area light.
    pub light: Option<Arc<Texture>>,
}

/// Build the demo scene and its camera.
///
/// `mesh_path` replaces the default icosahedron. A mesh that fails to load
/// is replaced by an empty one, which never intersects.
pub fn build(
    config: &RenderConfig,
    mesh_path: Option<&Path>,
    textures: &DemoTextures,
) -> (Scene, Camera) {
    let mut scene = Scene::new(config.trace.clone());

    scene.add_object(
        Object::new(
            Arc::new(Shape::sphere(Vec3::ZERO, 0.1)),
            Arc::new(Material::blinn_phong(
                Vec3::new(0.3, 0.3, 0.8),
                Vec3::ONE,
                256.0,
            )),
        )
        .with_transform(Transform::from_translation(Vec3::new(0.6, -0.6, 0.1))),
    );

    scene.add_object(
        Object::new(
            Arc::new(Shape::sphere(Vec3::ZERO, 0.2)),
            Arc::new(Material::blinn_phong(
                Vec3::new(0.3, 0.8, 0.3),
                Vec3::splat(0.04),
                10.0,
            )),
        )
        .with_transform(Transform::from_translation(Vec3::new(-0.8, -0.8, 0.2))),
    );

    let mut floor = Material::blinn_phong(Vec3::splat(0.7), Vec3::ONE, 30.0);
    if let Some(texture) = &textures.floor {
        floor = floor.with_texture(texture.clone(), TextureMode::Modulate);
    }
    scene.add_object(Object::new(Arc::new(Shape::plane()), Arc::new(floor)));

    let mut mesh = match mesh_path {
        Some(path) => Mesh::load_or_empty(path),
        None => Mesh::icosahedron(0.5),
    };
    mesh.make_unitary();

    scene.add_object(
        Object::new(
            Arc::new(Shape::mesh_with_bvh(mesh, &config.bvh)),
            Arc::new(Material::blinn_phong(
                Vec3::new(0.8, 0.4, 0.4),
                Vec3::ZERO,
                0.0,
            )),
        )
        .with_transform(
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.5))
                .with_rotation(Quat::from_rotation_z(FRAC_PI_4)),
        ),
    );

    scene.add_light(Light::directional(-Vec3::ONE, Vec3::splat(0.6)));
    scene.add_light(Light::point(Vec3::new(2.0, -5.0, 5.0), Vec3::splat(0.8)));

    let area_position = Vec3::new(-4.0, 2.0, 7.0);
    let mut area = AreaLight::new(area_position, -area_position, 0.5, Vec3::splat(1.9));
    if let Some(texture) = &textures.light {
        area = area.with_texture(texture.clone());
    }
    scene.add_light(Light::Area(area));

    let camera = Camera::new()
        .with_resolution(config.width, config.height)
        .with_position(Vec3::new(1.2, -1.2, 1.2), Vec3::new(0.0, 0.0, 0.1), Vec3::Z)
        .with_fov(90.0);

    log::info!(
        "Demo scene: {} objects, {} lights",
        scene.objects().len(),
        scene.lights().len()
    );

    (scene, camera)
}
