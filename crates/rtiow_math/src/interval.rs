/// Closed range `[min, max]` of accepted values, used for ray parameters
/// and color clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `[min, +inf]`, the usual range for a fresh hit query.
    pub fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Both endpoints count as inside.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Shrink the upper bound, e.g. to the closest hit found so far.
    pub fn with_max(&self, max: f32) -> Self {
        Self::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_closed() {
        let interval = Interval::new(0.001, 4.0);

        assert!(interval.contains(0.001));
        assert!(interval.contains(4.0));
        assert!(interval.contains(2.0));
        assert!(!interval.contains(0.0));
        assert!(!interval.contains(4.0001));
    }

    #[test]
    fn test_from_min_is_unbounded_above() {
        let interval = Interval::from_min(0.001);
        assert!(interval.contains(1e30));
        assert!(interval.contains(f32::INFINITY));
        assert!(!interval.contains(-1.0));
    }

    #[test]
    fn test_clamp_for_quantization() {
        let interval = Interval::new(0.0, 0.999);

        assert_eq!(interval.clamp(-0.5), 0.0);
        assert_eq!(interval.clamp(0.5), 0.5);
        assert_eq!(interval.clamp(1.5), 0.999);
    }

    #[test]
    fn test_with_max_keeps_min() {
        let narrowed = Interval::from_min(0.001).with_max(2.5);
        assert_eq!(narrowed, Interval::new(0.001, 2.5));
    }
}
