//! Nearest-hit accumulator threaded through every intersection routine.

use glint_math::{Vec2, Vec3, RAY_EPSILON};

use crate::Object;

/// Record of the closest intersection found so far along a ray.
///
/// `t` starts at +infinity and only ever decreases: every intersector calls
/// [`Hit::accepts`] before overwriting the record.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Distance along the (unit length) ray direction
    pub t: f32,
    /// Intersection point
    pub point: Vec3,
    /// Unit surface normal (not re-oriented toward the ray)
    pub normal: Vec3,
    /// Interpolated texture coordinate
    pub texcoord: Vec2,
    /// Object that was hit; only set by the scene intersector
    pub object: Option<&'a Object>,
}

impl<'a> Default for Hit<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Hit<'a> {
    /// An empty record: no hit yet.
    pub fn new() -> Self {
        Self::with_max_t(f32::INFINITY)
    }

    /// An empty record that only accepts hits closer than `t_max`.
    pub fn with_max_t(t_max: f32) -> Self {
        Self {
            t: t_max,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            texcoord: Vec2::ZERO,
            object: None,
        }
    }

    /// Whether a candidate at distance `t` would improve this record: it must
    /// lie beyond the self-intersection epsilon and strictly closer than the
    /// current best.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        t > RAY_EPSILON && t < self.t
    }

    /// True once an intersection has been recorded.
    pub fn found(&self) -> bool {
        self.t < f32::INFINITY
    }
}
