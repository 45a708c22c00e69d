//! Scene container and the nearest-hit query over all objects.

use glint_core::Light;
use glint_math::{Aabb, Ray};

use crate::{Hit, Object, TraceConfig};

/// Objects and lights, plus the settings the integrator runs with.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    config: TraceConfig,
}

impl Scene {
    pub fn new(config: TraceConfig) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            config,
        }
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// World-space bounds of every object.
    pub fn bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| Aabb::surrounding(&acc, &object.world_bounds()))
    }

    /// Find the nearest intersection along a world-space ray.
    ///
    /// Each object is tested in its own frame. The best distance found so
    /// far is carried into that frame and the object's hit is carried back,
    /// so non-uniform scales compare correctly. Returns true when `hit` was
    /// improved.
    pub fn intersect<'a>(&'a self, ray: &Ray, hit: &mut Hit<'a>) -> bool {
        let mut found = false;

        for object in &self.objects {
            let local_ray = object.to_local(ray);
            let bound = object.distance_to_local(ray, &local_ray, hit.t);
            let mut local_hit = Hit::with_max_t(bound);

            if !object.shape().intersect(&local_ray, &mut local_hit) {
                continue;
            }

            let t = object.distance_to_world(ray, &local_ray, local_hit.t);
            if !(t < hit.t) {
                continue;
            }

            hit.t = t;
            hit.point = ray.at(t);
            hit.normal = object.normal_to_world(local_hit.normal);
            hit.texcoord = local_hit.texcoord;
            hit.object = Some(object);
            found = true;
        }

        found
    }
}
