//! Glint math: vector types, intervals, bounding boxes and rays.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// Self-intersection threshold shared by every ray query.
///
/// Hits closer than this to the ray origin are rejected, and secondary rays
/// are offset from surfaces by this amount along the normal.
pub const RAY_EPSILON: f32 = 1e-4;
