//! Hittable trait and HitRecord for ray-object intersection.

use crate::{MaterialId, Sphere};
use rtiow_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub point: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: MaterialId,
}

impl HitRecord {
    /// Build a hit record, orienting the normal against the ray.
    ///
    /// `outward_normal` must be unit length and point away from the
    /// geometry's inside (for spheres the sign follows the radius).
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: MaterialId) -> Self {
        let mut rec = Self {
            point: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `ray` whose parameter lies in `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Every kind of geometry the renderer knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

/// A flat, append-only list of primitives.
#[derive(Debug, Clone, Default)]
pub struct GeometryList {
    objects: Vec<Primitive>,
}

impl GeometryList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Remove all primitives.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the primitives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter()
    }
}

impl Hittable for GeometryList {
    /// Closest hit over all primitives; ties go to the earliest inserted.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                // An equal t from a later object must not win
                if closest.map_or(true, |best| rec.t < best.t) {
                    closest_so_far = rec.t;
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(z: f32, radius: f32, material: usize) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), radius, MaterialId(material))
    }

    #[test]
    fn test_face_normal_front() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, MaterialId(0));
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.point, Vec3::NEG_Z);
    }

    #[test]
    fn test_face_normal_back() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, MaterialId(0));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_closest_hit_wins() {
        let mut list = GeometryList::new();
        // Far sphere inserted first
        list.add(sphere(-5.0, 0.5, 0));
        list.add(sphere(-2.0, 0.5, 1));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = list.hit(&ray, Interval::from_min(0.001)).unwrap();

        assert!((rec.t - 1.5).abs() < 1e-5);
        assert_eq!(rec.material, MaterialId(1));
    }

    #[test]
    fn test_overlapping_spheres() {
        let mut list = GeometryList::new();
        list.add(sphere(-1.0, 0.5, 0));
        list.add(sphere(-1.2, 0.5, 1));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = list.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert_eq!(rec.material, MaterialId(0));
    }

    #[test]
    fn test_tie_goes_to_first_inserted() {
        let mut list = GeometryList::new();
        list.add(sphere(-1.0, 0.5, 7));
        list.add(sphere(-1.0, 0.5, 8));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        for _ in 0..10 {
            let rec = list.hit(&ray, Interval::from_min(0.001)).unwrap();
            assert_eq!(rec.material, MaterialId(7));
        }
    }

    #[test]
    fn test_empty_list_misses() {
        let list = GeometryList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.hit(&ray, Interval::from_min(0.001)).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut list = GeometryList::new();
        list.add(sphere(-1.0, 0.5, 0));
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
    }
}
