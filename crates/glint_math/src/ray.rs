use crate::Vec3;

/// A ray in 3D space.
///
/// Besides origin and direction a ray carries the bookkeeping the recursive
/// integrator needs: the accumulated attenuation `beta`, the recursion depth
/// and whether it is a shadow ray. Rays are never mutated once built; every
/// secondary ray is a fresh value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    /// Unit length (normalized on construction)
    direction: Vec3,
    beta: f32,
    recursion_level: u32,
    shadow: bool,
}

impl Ray {
    /// Create a primary ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            beta: 1.0,
            recursion_level: 0,
            shadow: false,
        }
    }

    /// Create a shadow ray, used only for occlusion queries.
    pub fn shadow(origin: Vec3, direction: Vec3) -> Self {
        Self {
            shadow: true,
            ..Self::new(origin, direction)
        }
    }

    /// Spawn a secondary ray one recursion level deeper, with its
    /// attenuation multiplied by `attenuation`.
    pub fn spawn(&self, origin: Vec3, direction: Vec3, attenuation: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            beta: self.beta * attenuation,
            recursion_level: self.recursion_level + 1,
            shadow: false,
        }
    }

    /// The same ray re-expressed in another frame: new origin and direction,
    /// identical beta, depth and shadow flag.
    pub fn reframed(&self, origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            ..*self
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn beta(&self) -> f32 {
        self.beta
    }

    #[inline]
    pub fn recursion_level(&self) -> u32 {
        self.recursion_level
    }

    #[inline]
    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
