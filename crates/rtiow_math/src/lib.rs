// Re-export glam for convenience
pub use glam::*;

// rtiow math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color, linear space (values typically 0-1).
pub type Color = Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices on either side.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Component-wise `e^v`.
#[inline]
pub fn exp(v: Vec3) -> Vec3 {
    Vec3::new(v.x.exp(), v.y.exp(), v.z.exp())
}

/// True when every component of `v` is within `epsilon` of zero.
#[inline]
pub fn near_zero(v: Vec3, epsilon: f32) -> bool {
    v.x.abs() < epsilon && v.y.abs() < epsilon && v.z.abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_is_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!((refracted - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        // Entering a denser medium brings the ray closer to -normal
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let refracted = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!(refracted.x < uv.x);
        assert!((refracted.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_exp() {
        let v = exp(Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(v.x, 1.0);
        assert!((v.y - std::f32::consts::E).abs() < 1e-6);
        assert!((v.z - 1.0 / std::f32::consts::E).abs() < 1e-6);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-7), 1e-6));
        assert!(!near_zero(Vec3::new(0.0, 1e-5, 0.0), 1e-6));
    }
}
