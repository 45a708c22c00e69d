use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis). Boxes are tight:
/// no padding is applied, so a planar mesh yields a box of zero thickness.
/// The null box (`Aabb::EMPTY`) contains nothing and is never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::EMPTY.extend(a).extend(b)
    }

    /// Tight box around every point of an iterator. Empty input gives the
    /// null box.
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |aabb, p| aabb.extend(p))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Grow the box so it also contains `p`.
    pub fn extend(&self, p: Vec3) -> Self {
        Self {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    /// True for the null box.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Slab test.
    ///
    /// Returns the parametric `[t_min, t_max]` range over which the ray is
    /// inside the box. The ray hits the box iff the result satisfies
    /// [`Interval::is_forward_hit`]. A zero direction component makes that
    /// axis unbounded when the origin lies between the slabs and empty
    /// otherwise, so no NaN can leak out of `0 / 0`. The null box always
    /// yields `Interval::EMPTY`.
    pub fn intersect(&self, ray: &Ray) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }

        let origin = ray.origin();
        let direction = ray.direction();

        (0..3).fold(Interval::UNIVERSE, |span, axis| {
            span.overlap(&slab(self.axis_interval(axis), origin[axis], direction[axis]))
        })
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

/// Entry/exit parameters of a ray against one pair of parallel planes.
fn slab(bounds: Interval, origin: f32, direction: f32) -> Interval {
    if direction == 0.0 {
        return if bounds.contains(origin) {
            Interval::UNIVERSE
        } else {
            Interval::EMPTY
        };
    }

    let inv = 1.0 / direction;
    let t1 = (bounds.min - origin) * inv;
    let t2 = (bounds.max - origin) * inv;
    Interval::new(t1.min(t2), t1.max(t2))
}
