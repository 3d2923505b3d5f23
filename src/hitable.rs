use crate::material::MaterialId;
use crate::math::ray::Ray;
use crate::math::vec3::Vec3;

pub struct HitRecord {
    pub t: f64,
    pub p: Vec3,
    // geometric normal, (p - center)/radius for spheres; a negative radius
    // flips it inward. Materials resolve the side facing the ray themselves.
    pub normal: Vec3,
    pub mat: MaterialId,
}

impl HitRecord {
    pub fn new(t: f64, p: Vec3, normal: Vec3, mat: MaterialId) -> HitRecord {
        HitRecord { t, p, normal, mat }
    }
}

pub trait Hitable {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord>;
}
