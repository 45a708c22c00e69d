//! Analytic sphere intersection.

use glint_math::{Ray, Vec2, Vec3, RAY_EPSILON};
use std::f32::consts::PI;

use crate::Hit;

/// Intersect a ray with the sphere of `radius` around `center`.
///
/// Solves `|O + tD - C|^2 = r^2` with a unit-length `D`. A zero discriminant
/// is a single tangent root. Otherwise the nearer root is used, or the farther
/// one when the nearer lies at or behind the origin (ray starting inside).
/// Returns true when `hit` was improved.
pub fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray, hit: &mut Hit<'_>) -> bool {
    let oc = ray.origin() - center;
    let b = 2.0 * ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return false;
    }

    let t = if discriminant == 0.0 {
        -0.5 * b
    } else {
        let sqrtd = discriminant.sqrt();
        let near = 0.5 * (-b - sqrtd);
        if near > RAY_EPSILON {
            near
        } else {
            0.5 * (-b + sqrtd)
        }
    };

    if !hit.accepts(t) {
        return false;
    }

    hit.t = t;
    hit.point = ray.at(t);
    hit.normal = (hit.point - center) / radius;
    if !ray.is_shadow() {
        hit.texcoord = sphere_uv(hit.normal);
    }

    true
}

/// Spherical coordinates of a unit direction, `u` around +Z and `v` down
/// from +Z.
fn sphere_uv(n: Vec3) -> Vec2 {
    let theta = n.z.clamp(-1.0, 1.0).acos();
    let phi = n.y.atan2(n.x) + PI;
    Vec2::new(phi / (2.0 * PI), theta / PI)
}
