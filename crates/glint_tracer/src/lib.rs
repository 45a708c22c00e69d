//! Glint Tracer - CPU Whitted-style raytracing
//!
//! A recursive raytracer with hard shadows and mirror reflections.
//!
//! - **Intersection**: spheres, an infinite plane and triangle meshes,
//!   meshes accelerated by a per-mesh BVH
//! - **Scene**: placed objects with arbitrary affine transforms, lights
//! - **Integrator**: ambient + direct lighting + one mirror bounce per hit,
//!   bounded by recursion depth and ray attenuation
//! - **Output**: pinhole camera and a single-threaded render driver

mod bvh;
mod camera;
mod config;
mod hit;
mod integrator;
mod object;
mod plane;
mod renderer;
mod scene;
mod shape;
mod sphere;
mod triangle;

pub use bvh::{partition, Bvh, Node, NodeKind};
pub use camera::Camera;
pub use config::{BvhConfig, RenderConfig, TraceConfig};
pub use hit::Hit;
pub use object::Object;
pub use plane::intersect_plane;
pub use renderer::{color_to_rgba, render, render_pixel, tone_map, ImageBuffer};
pub use scene::Scene;
pub use shape::{MeshShape, Shape};
pub use sphere::intersect_sphere;
pub use triangle::{intersect_face, intersect_faces, intersect_triangle};

/// Re-export math and scene data types
pub use glint_core::{Color, Light, Material, Mesh};
pub use glint_math::{Aabb, Interval, Ray, Vec3};
