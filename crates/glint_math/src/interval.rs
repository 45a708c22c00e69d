/// A closed range of ray parameters `[min, max]`.
///
/// Used both for bounding-box extents along one axis and for the entry/exit
/// distances returned by the ray/box slab test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if the interval contains nothing (min > max).
    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Midpoint of the interval.
    pub fn center(&self) -> f32 {
        0.5 * (self.min + self.max)
    }

    /// Grows the interval so it also covers `x`.
    pub fn include(&self, x: f32) -> Interval {
        Interval::new(self.min.min(x), self.max.max(x))
    }

    /// Intersection of two intervals; empty when they do not overlap.
    pub fn overlap(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Creates an interval that surrounds two other intervals.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// True when a slab-test result describes a box that lies (at least
    /// partly) in front of the ray: `max > 0` and `min <= max`.
    pub fn is_forward_hit(&self) -> bool {
        self.max > 0.0 && self.min <= self.max
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        assert_eq!(Interval::new(2.0, 7.0).size(), 5.0);
        assert_eq!(Interval::new(-5.0, 5.0).size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_include_grows_empty() {
        let grown = Interval::EMPTY.include(3.0);
        assert_eq!(grown, Interval::new(3.0, 3.0));
        assert!(!grown.is_empty());

        let grown = grown.include(-1.0);
        assert_eq!(grown, Interval::new(-1.0, 3.0));
        assert_eq!(grown.center(), 1.0);
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(3.0, 8.0);
        assert_eq!(a.overlap(&b), Interval::new(3.0, 5.0));

        let c = Interval::new(6.0, 8.0);
        assert!(a.overlap(&c).is_empty());
    }

    #[test]
    fn test_interval_forward_hit() {
        assert!(Interval::new(1.0, 2.0).is_forward_hit());
        // Origin inside the box
        assert!(Interval::new(-1.0, 2.0).is_forward_hit());
        // Box behind the ray
        assert!(!Interval::new(-3.0, -1.0).is_forward_hit());
        // Slabs do not overlap
        assert!(!Interval::new(2.0, 1.0).is_forward_hit());
        assert!(!Interval::EMPTY.is_forward_hit());
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::EMPTY;

        assert!(empty.is_empty());
        assert_eq!(empty.size(), f32::NEG_INFINITY);
        assert!(!empty.contains(0.0));
        assert!(!empty.contains(f32::INFINITY));
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::UNIVERSE;

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e10));
        assert!(universe.contains(-1e10));
        assert_eq!(universe.size(), f32::INFINITY);
    }
}
