//! Surfaces that can be placed in a scene.

use glint_core::Mesh;
use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::plane::intersect_plane;
use crate::sphere::intersect_sphere;
use crate::triangle::intersect_faces;
use crate::{Bvh, BvhConfig, Hit};

/// A surface in its own object space.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    /// The infinite plane `z = 0`, facing +Z.
    Plane,
    Mesh(MeshShape),
}

/// A triangle mesh, optionally accelerated by a BVH over its faces.
#[derive(Debug, Clone)]
pub struct MeshShape {
    mesh: Mesh,
    bvh: Option<Bvh>,
}

impl MeshShape {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }

    /// Build (or rebuild) the BVH.
    pub fn build_bvh(&mut self, config: &BvhConfig) {
        self.bvh = Some(Bvh::with_config(&self.mesh, config));
    }

    fn intersect(&self, ray: &Ray, hit: &mut Hit<'_>) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.intersect(&self.mesh, ray, hit),
            None => intersect_faces(&self.mesh, ray, hit),
        }
    }
}

impl Shape {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere { center, radius }
    }

    pub fn plane() -> Self {
        Shape::Plane
    }

    /// A mesh intersected face by face.
    pub fn mesh(mesh: Mesh) -> Self {
        Shape::Mesh(MeshShape { mesh, bvh: None })
    }

    /// A mesh with a BVH built from `config`.
    pub fn mesh_with_bvh(mesh: Mesh, config: &BvhConfig) -> Self {
        let mut shape = MeshShape { mesh, bvh: None };
        shape.build_bvh(config);
        Shape::Mesh(shape)
    }

    /// Intersect a ray given in object space, updating `hit` when a closer
    /// intersection is found. Returns true when `hit` was improved.
    pub fn intersect(&self, ray: &Ray, hit: &mut Hit<'_>) -> bool {
        match self {
            Shape::Sphere { center, radius } => intersect_sphere(*center, *radius, ray, hit),
            Shape::Plane => intersect_plane(ray, hit),
            Shape::Mesh(mesh) => mesh.intersect(ray, hit),
        }
    }

    /// Object-space bounds. The plane is unbounded along x and y.
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Sphere { center, radius } => {
                let r = Vec3::splat(radius.abs());
                Aabb::from_points(*center - r, *center + r)
            }
            Shape::Plane => Aabb::new(Interval::UNIVERSE, Interval::UNIVERSE, Interval::new(0.0, 0.0)),
            Shape::Mesh(mesh) => *mesh.mesh().bounds(),
        }
    }
}
