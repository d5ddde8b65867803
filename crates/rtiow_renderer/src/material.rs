//! Surface scattering model.
//!
//! One material struct covers diffuse, glossy and refractive surfaces. Each
//! bounce picks a single lobe at random according to the material's
//! probabilities and divides by that probability, so the estimator stays
//! unbiased no matter how the chances are split.

use crate::sampling::{random_f32, random_in_unit_sphere, random_unit_vector};
use crate::HitRecord;
use rand::RngCore;
use rtiow_math::{exp, near_zero, reflect, refract, Color, Ray, Vec3};

/// Lower bound for the probability of the chosen lobe.
pub const MIN_RAY_PROBABILITY: f32 = 0.001;

/// Scatter directions closer to zero than this fall back to the normal.
const DEGENERATE_DIRECTION_EPSILON: f32 = 1e-6;

/// Index into a scene's material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub usize);

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// The outgoing ray (unit direction)
    pub scattered: Ray,
    /// Factor to multiply the path throughput by
    pub attenuation: Color,
}

/// The lobe chosen for one bounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterKind {
    Diffuse,
    Specular,
    Refraction,
}

/// Surface reflectance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color
    pub albedo: Color,

    /// Chance of taking the specular lobe (0..1)
    pub specular_chance: f32,
    /// Tint of specular reflections
    pub specular_color: Color,
    /// 0.0 = mirror, 1.0 = very blurry
    pub specular_roughness: f32,

    pub index_of_refraction: f32,
    /// Chance of taking the refraction lobe (0..1 - specular_chance)
    pub refraction_chance: f32,
    /// Absorption coefficient inside the medium (Beer-Lambert)
    pub refraction_color: Color,
    /// 0.0 = clear, 1.0 = frosted
    pub refraction_roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Color::ZERO,
            specular_chance: 0.0,
            specular_color: Color::ZERO,
            specular_roughness: 0.0,
            index_of_refraction: 1.0,
            refraction_chance: 0.0,
            refraction_color: Color::ZERO,
            refraction_roughness: 0.0,
        }
    }
}

impl Material {
    /// Purely diffuse (Lambertian) material.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            albedo,
            ..Default::default()
        }
    }

    /// Diffuse base with a specular coat.
    pub fn specular(
        albedo: Color,
        specular_chance: f32,
        specular_color: Color,
        specular_roughness: f32,
    ) -> Self {
        Self {
            albedo,
            specular_chance,
            specular_color,
            specular_roughness,
            ..Default::default()
        }
        .sanitized()
    }

    /// Transparent material.
    ///
    /// `refraction_color` is an absorption coefficient: zero is perfectly
    /// clear, larger values absorb more the further light travels inside.
    pub fn dielectric(
        albedo: Color,
        index_of_refraction: f32,
        refraction_chance: f32,
        refraction_color: Color,
        refraction_roughness: f32,
    ) -> Self {
        Self {
            albedo,
            index_of_refraction,
            refraction_chance,
            refraction_color,
            refraction_roughness,
            ..Default::default()
        }
        .sanitized()
    }

    /// Clamp chances and roughness into range.
    ///
    /// # Panics
    ///
    /// Panics if the index of refraction is not positive.
    pub fn sanitized(mut self) -> Self {
        assert!(
            self.index_of_refraction > 0.0,
            "index of refraction must be positive, got {}",
            self.index_of_refraction
        );
        self.specular_chance = self.specular_chance.clamp(0.0, 1.0);
        self.refraction_chance = self.refraction_chance.clamp(0.0, 1.0 - self.specular_chance);
        self.specular_roughness = self.specular_roughness.clamp(0.0, 1.0);
        self.refraction_roughness = self.refraction_roughness.clamp(0.0, 1.0);
        self
    }

    /// Probability of the diffuse lobe.
    pub fn diffuse_chance(&self) -> f32 {
        (1.0 - self.specular_chance - self.refraction_chance).max(0.0)
    }

    /// Pick a lobe for the uniform sample `r` in [0, 1).
    ///
    /// Returns the lobe and its probability, floored at [`MIN_RAY_PROBABILITY`].
    pub fn choose_lobe(&self, r: f32) -> (ScatterKind, f32) {
        let (kind, probability) = if r < self.specular_chance {
            (ScatterKind::Specular, self.specular_chance)
        } else if r < self.specular_chance + self.refraction_chance {
            (ScatterKind::Refraction, self.refraction_chance)
        } else {
            (ScatterKind::Diffuse, self.diffuse_chance())
        };
        (kind, probability.max(MIN_RAY_PROBABILITY))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the outgoing ray and attenuation, or `None` if the path is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut attenuation = Color::ONE;

        // Leaving the medium: absorb proportionally to the distance travelled inside
        if !rec.front_face {
            let distance = rec.t * ray_in.direction().length();
            attenuation *= exp(-self.refraction_color * distance);
        }

        let unit_direction = ray_in.direction().normalize();
        let (kind, ray_probability) = self.choose_lobe(random_f32(rng));

        let (direction, tint) = match kind {
            ScatterKind::Diffuse => (
                diffuse_direction(rec.normal, random_unit_vector(rng)),
                self.albedo,
            ),
            ScatterKind::Specular => (
                glossy_reflection(unit_direction, rec.normal, self.specular_roughness, rng)?,
                self.specular_color,
            ),
            ScatterKind::Refraction => (
                self.refraction_direction(unit_direction, rec, ray_probability, rng)?,
                Color::ONE,
            ),
        };

        attenuation *= tint;
        attenuation /= ray_probability;

        Some(ScatterResult {
            scattered: Ray::new(rec.point, direction),
            attenuation,
        })
    }

    fn refraction_direction(
        &self,
        unit_direction: Vec3,
        rec: &HitRecord,
        ray_probability: f32,
        rng: &mut dyn RngCore,
    ) -> Option<Vec3> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.index_of_refraction
        } else {
            self.index_of_refraction
        };

        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        if cannot_refract || schlick_reflectance(cos_theta, refraction_ratio) > ray_probability {
            return glossy_reflection(unit_direction, rec.normal, self.refraction_roughness, rng);
        }

        let refracted = refract(unit_direction, rec.normal, refraction_ratio)
            + self.refraction_roughness * random_in_unit_sphere(rng);
        let direction = refracted.normalize_or_zero();
        (direction != Vec3::ZERO).then_some(direction)
    }
}

/// Cosine-weighted direction around `normal` for a uniform `unit_sample`.
fn diffuse_direction(normal: Vec3, unit_sample: Vec3) -> Vec3 {
    let direction = normal + unit_sample;

    // Catch degenerate scatter direction
    if near_zero(direction, DEGENERATE_DIRECTION_EPSILON) {
        normal
    } else {
        direction.normalize()
    }
}

/// Mirror reflection blurred by `roughness`.
///
/// `None` when the perturbed direction ends up below the surface.
fn glossy_reflection(
    unit_direction: Vec3,
    normal: Vec3,
    roughness: f32,
    rng: &mut dyn RngCore,
) -> Option<Vec3> {
    let reflected = reflect(unit_direction, normal) + roughness * random_in_unit_sphere(rng);
    let direction = reflected.normalize_or_zero();
    (direction.dot(normal) > 0.0).then_some(direction)
}

/// Schlick's approximation for Fresnel reflectance.
pub fn schlick_reflectance(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
