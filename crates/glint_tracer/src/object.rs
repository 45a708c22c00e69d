//! Scene objects: a shape, a material and a placement.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{Aabb, Mat3, Mat4, Mat4Ext, Ray, Vec3};

use crate::Shape;

/// A shape placed in the world.
///
/// The object-to-world matrix, its inverse and the normal matrix are kept
/// together and only change through [`Object::set_transform`].
#[derive(Debug, Clone)]
pub struct Object {
    shape: Arc<Shape>,
    material: Arc<Material>,
    transform: Mat4,
    inverse: Mat4,
    normal_matrix: Mat3,
}

impl Object {
    /// An object placed with the identity transform.
    pub fn new(shape: Arc<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape,
            material,
            transform: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        }
    }

    /// Builder form of [`Object::set_transform`].
    pub fn with_transform(mut self, transform: impl Into<Mat4>) -> Self {
        self.set_transform(transform);
        self
    }

    /// Replace the object-to-world transform.
    pub fn set_transform(&mut self, transform: impl Into<Mat4>) {
        let transform = transform.into();
        self.transform = transform;
        self.inverse = transform.inverse();
        self.normal_matrix = transform.normal_matrix();
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Express a world-space ray in object space.
    pub fn to_local(&self, ray: &Ray) -> Ray {
        ray.reframed(
            self.inverse.transform_point3(ray.origin()),
            self.inverse.transform_vector3(ray.direction()),
        )
    }

    /// Convert a world-space distance along `world_ray` into the matching
    /// distance along `local_ray` (its object-space counterpart).
    pub fn distance_to_local(&self, world_ray: &Ray, local_ray: &Ray, t_world: f32) -> f32 {
        if !t_world.is_finite() {
            return f32::INFINITY;
        }
        let point = self.inverse.transform_point3(world_ray.at(t_world));
        (point - local_ray.origin()).length()
    }

    /// Convert a distance along `local_ray` back into world space.
    pub fn distance_to_world(&self, world_ray: &Ray, local_ray: &Ray, t_local: f32) -> f32 {
        if !t_local.is_finite() {
            return f32::INFINITY;
        }
        let point = self.transform.transform_point3(local_ray.at(t_local));
        (point - world_ray.origin()).length()
    }

    /// Map an object-space normal to a unit world-space normal.
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        (self.normal_matrix * normal).normalize_or_zero()
    }

    /// World-space bounds; unbounded shapes stay unbounded.
    pub fn world_bounds(&self) -> Aabb {
        let local = self.shape.bounds();
        if !local.is_empty() && !(local.min().is_finite() && local.max().is_finite()) {
            return Aabb::UNIVERSE;
        }
        self.transform.transform_aabb(&local)
    }
}
