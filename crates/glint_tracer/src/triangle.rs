//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_core::Mesh;
use glint_math::{Ray, Vec3};

use crate::Hit;

/// Solve `[-D, e1, e2] (t, u, v) = O - v0` for the distance `t` and the
/// barycentric coordinates `(u, v)` of vertices 1 and 2.
///
/// Returns `None` when the ray is parallel to the triangle or the solution
/// lies outside it. `t` is not range-checked.
#[inline]
pub fn intersect_triangle(ray: &Ray, [v0, v1, v2]: [Vec3; 3]) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray.direction().cross(edge2);
    let det = edge1.dot(p);

    // Ray is parallel to triangle
    if det == 0.0 {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin() - v0;
    let u = inv_det * s.dot(p);

    // Written so that NaN is rejected as well
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction().dot(q);

    if !(v >= 0.0 && u + v <= 1.0) {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    Some((t, u, v))
}

/// Intersect face `face_id` of `mesh`, updating `hit` when it is closer.
///
/// Shading attributes are interpolated with weights `(1 - u - v, u, v)`;
/// shadow rays only record the distance.
pub fn intersect_face(mesh: &Mesh, face_id: usize, ray: &Ray, hit: &mut Hit<'_>) -> bool {
    let positions = mesh.face_positions(face_id);
    let Some((t, u, v)) = intersect_triangle(ray, positions) else {
        return false;
    };

    if !hit.accepts(t) {
        return false;
    }

    hit.t = t;

    if !ray.is_shadow() {
        let [a, b, c] = mesh.face_vertices(face_id);
        let w = 1.0 - u - v;

        hit.point = ray.at(t);
        hit.normal = (w * a.normal + u * b.normal + v * c.normal)
            .try_normalize()
            .unwrap_or_else(|| {
                let [p0, p1, p2] = positions;
                (p1 - p0).cross(p2 - p0).normalize_or_zero()
            });
        hit.texcoord = w * a.texcoord + u * b.texcoord + v * c.texcoord;
    }

    true
}

/// Test every face of `mesh`, behind a single bounding-box test.
pub fn intersect_faces(mesh: &Mesh, ray: &Ray, hit: &mut Hit<'_>) -> bool {
    let span = mesh.bounds().intersect(ray);
    if !span.is_forward_hit() || span.min >= hit.t {
        return false;
    }

    let mut found = false;
    for face_id in 0..mesh.face_count() {
        found |= intersect_face(mesh, face_id, ray, hit);
    }
    found
}
