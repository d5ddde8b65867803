//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use rand::RngCore;
use rtiow_math::{Point3, Ray, Vec3};

/// Focus distances at or below this are replaced by the look-at distance.
const MIN_FOCUS_DISTANCE: f32 = 1e-6;

/// Camera mapping image-plane coordinates to rays.
///
/// Built with the `with_*` methods; every setter recomputes the cached
/// basis so the camera is always ready to generate rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Settings
    aspect_ratio: f32,
    vfov: f32, // Vertical field of view in degrees
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,
    aperture: f32,
    focus_dist: f32, // ~0 means "focus on look_at"

    // Cached computed values
    origin: Point3,
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a pinhole camera at the origin looking down -Z.
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            aspect_ratio,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::NEG_Z,
            vup: Vec3::Y,
            aperture: 0.0,
            focus_dist: 0.0,
            origin: Point3::ZERO,
            lower_left: Point3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::NEG_Z,
            lens_radius: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Set camera position and orientation.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialize();
        self
    }

    /// Set lens settings.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aperture`: lens diameter, 0.0 = pinhole
    /// - `focus_dist`: distance to the plane of perfect focus, 0.0 = distance to `look_at`
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self.initialize();
        self
    }

    fn initialize(&mut self) {
        let focus_dist = if self.focus_dist.abs() <= MIN_FOCUS_DISTANCE {
            (self.look_at - self.look_from).length()
        } else {
            self.focus_dist
        };

        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * self.aspect_ratio;

        // w points from the eye towards the target
        self.w = (self.look_at - self.look_from).normalize();
        self.u = self.w.cross(self.vup).normalize();
        self.v = self.u.cross(self.w);

        self.origin = self.look_from;
        self.horizontal = focus_dist * viewport_width * self.u;
        self.vertical = focus_dist * viewport_height * self.v;
        self.lower_left =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 + focus_dist * self.w;

        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through image-plane coordinates `(s, t)` in [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner of the image.
    pub fn create_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        Ray::new(origin, (target - origin).normalize())
    }

    /// Position of the eye.
    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    /// Radius of the thin lens (aperture / 2).
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
