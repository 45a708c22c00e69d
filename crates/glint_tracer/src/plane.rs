//! Infinite plane through the origin with normal +Z.

use glint_math::{Ray, Vec3, RAY_EPSILON};

use crate::Hit;

/// Intersect a ray with the plane `z = 0`.
///
/// Rays closer to parallel than the epsilon never hit. The hit's texture
/// coordinate is the local `(x, y)` of the hit point.
pub fn intersect_plane(ray: &Ray, hit: &mut Hit<'_>) -> bool {
    let normal = Vec3::Z;

    let denom = normal.dot(ray.direction());
    if denom.abs() < RAY_EPSILON {
        return false;
    }

    let t = -normal.dot(ray.origin()) / denom;
    if t < RAY_EPSILON || !hit.accepts(t) {
        return false;
    }

    hit.t = t;
    hit.point = ray.at(t);
    hit.normal = normal;
    if !ray.is_shadow() {
        hit.texcoord = hit.point.truncate();
    }

    true
}
