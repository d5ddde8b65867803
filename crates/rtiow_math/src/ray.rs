use crate::{Point3, Vec3};

/// Half-line `origin + t * direction`.
///
/// Camera and scatter rays carry unit directions; nothing here enforces it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point reached after travelling parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_scales_direction() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(ray.at(0.0), ray.origin());
        assert_eq!(ray.at(0.5), Point3::new(1.0, 1.0, 0.0));
        assert_eq!(ray.at(-1.0), Point3::new(1.0, -2.0, 0.0));
    }
}
