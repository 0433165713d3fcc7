/// Closed range `[min, max]` of ray parameters or coordinates along one axis.
///
/// `min > max` means empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of the range. Negative when empty.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive at both ends; NaN is never contained.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Widen by `delta` in total, half on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let half = delta * 0.5;
        Interval::new(self.min - half, self.max + half)
    }

    /// Smallest interval holding both `self` and `x`.
    pub fn include(&self, x: f32) -> Interval {
        Interval::new(self.min.min(x), self.max.max(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_endpoints() {
        let range = Interval::new(0.0001, 4.0);
        assert!(range.contains(0.0001));
        assert!(range.contains(4.0));
        assert!(!range.contains(0.0));
        assert!(!range.contains(f32::NAN));
    }

    #[test]
    fn test_include_grows_empty() {
        let range = Interval::EMPTY.include(3.0).include(-1.0);
        assert_eq!(range, Interval::new(-1.0, 3.0));
        assert!(Interval::EMPTY.is_empty());
        assert!(!range.is_empty());
    }

    #[test]
    fn test_expand_zero_width() {
        let flat = Interval::new(2.0, 2.0).expand(0.5);
        assert_eq!(flat.size(), 0.5);
        assert!(flat.contains(2.2));
    }

    #[test]
    fn test_universe_contains_large_values() {
        assert!(Interval::UNIVERSE.contains(1e30));
        assert!(Interval::UNIVERSE.contains(-1e30));
        assert!(!Interval::EMPTY.contains(0.0));
    }
}
