//! Scene: geometry plus the material table it references.

use crate::{GeometryList, HitRecord, Hittable, Material, MaterialId, Sphere};
use rtiow_math::{Color, Interval, Point3, Ray};

/// Minimum hit distance, keeps scattered rays from re-hitting their origin.
pub const HIT_T_MIN: f32 = 0.001;

/// Spheres and materials for one render.
///
/// Built up front by the caller, then only read while rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometry: GeometryList,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its id.
    pub fn material_create(&mut self, material: Material) -> MaterialId {
        self.materials.push(material.sanitized());
        MaterialId(self.materials.len() - 1)
    }

    pub fn material_create_diffuse(&mut self, albedo: Color) -> MaterialId {
        self.material_create(Material::diffuse(albedo))
    }

    pub fn material_create_specular(
        &mut self,
        albedo: Color,
        specular_chance: f32,
        specular_color: Color,
        specular_roughness: f32,
    ) -> MaterialId {
        self.material_create(Material::specular(
            albedo,
            specular_chance,
            specular_color,
            specular_roughness,
        ))
    }

    pub fn material_create_dielectric(
        &mut self,
        albedo: Color,
        index_of_refraction: f32,
        refraction_chance: f32,
        refraction_color: Color,
        refraction_roughness: f32,
    ) -> MaterialId {
        self.material_create(Material::dielectric(
            albedo,
            index_of_refraction,
            refraction_chance,
            refraction_color,
            refraction_roughness,
        ))
    }

    /// Look up a material.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this scene.
    pub fn material(&self, id: MaterialId) -> &Material {
        assert!(
            id.0 < self.materials.len(),
            "material id {} out of range ({} materials)",
            id.0,
            self.materials.len()
        );
        &self.materials[id.0]
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Add a sphere.
    ///
    /// # Panics
    ///
    /// Panics if `material` was not created by this scene.
    pub fn sphere_add(&mut self, center: Point3, radius: f32, material: MaterialId) {
        assert!(
            material.0 < self.materials.len(),
            "sphere references unknown material id {}",
            material.0
        );
        self.geometry.add(Sphere::new(center, radius, material));
    }

    pub fn geometry(&self) -> &GeometryList {
        &self.geometry
    }

    /// Remove all geometry and materials.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.materials.clear();
    }

    /// Closest hit along `ray` beyond [`HIT_T_MIN`].
    pub fn hit_detection(&self, ray: &Ray) -> Option<HitRecord> {
        self.geometry.hit(ray, Interval::from_min(HIT_T_MIN))
    }
}
