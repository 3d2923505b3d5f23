use crate::hitable::HitRecord;
use crate::math::ray::Ray;
use crate::math::vec3::{self, Vec3};
use crate::sampler::Sampler;

// offset applied to every scattered ray origin so it cannot re-hit the
// surface it just left at t ~ 0
const SURFACE_BIAS: f64 = 1e-3;

// index into the scene's material arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub(crate) usize);

pub enum Material {
    Lambertian { albedo: Vec3 },
    Metal { albedo: Vec3, fuzz: f64 },
    Dielectric { ref_idx: f64 },
}

impl Material {
    pub fn lambertian(albedo: Vec3) -> Material {
        Material::Lambertian { albedo }
    }

    pub fn metal(albedo: Vec3, fuzz: f64) -> Material {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.0).min(1.0),
        }
    }

    pub fn dielectric(ref_idx: f64) -> Material {
        Material::Dielectric { ref_idx }
    }

    // None means the ray was absorbed; only metal ever absorbs.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        sampler: &mut Sampler,
    ) -> Option<(Vec3, Ray)> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, r_in, rec, sampler),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, sampler),
            Material::Dielectric { ref_idx } => scatter_dielectric(ref_idx, r_in, rec, sampler),
        }
    }
}

// The stored normal is geometric; pick the side that faces the incoming ray
// so scattering works from inside a surface too (hollow glass shells).
fn facing_normal(normal: Vec3, incoming: Vec3) -> Vec3 {
    if vec3::dot(normal, incoming) < 0.0 {
        normal
    } else {
        -normal
    }
}

fn scatter_lambertian(
    albedo: Vec3,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Option<(Vec3, Ray)> {
    let normal = facing_normal(rec.normal, r_in.direction);
    let target = rec.p + normal + sampler.on_unit_sphere();
    let scattered = Ray::new(rec.p + normal * SURFACE_BIAS, target - rec.p);
    Some((albedo, scattered))
}

fn scatter_metal(
    albedo: Vec3,
    fuzz: f64,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Option<(Vec3, Ray)> {
    let normal = facing_normal(rec.normal, r_in.direction);
    let reflected = reflect(r_in.direction.unit_vector(), normal);
    let direction = reflected + sampler.on_unit_sphere() * fuzz;
    if vec3::dot(direction, normal) > 0.0 {
        Some((albedo, Ray::new(rec.p + normal * SURFACE_BIAS, direction)))
    } else {
        // fuzzed below the surface
        None
    }
}

fn scatter_dielectric(
    ref_idx: f64,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Option<(Vec3, Ray)> {
    let reflected = reflect(r_in.direction, rec.normal);
    let attenuation = Vec3::new(1.0, 1.0, 1.0);

    let outward_normal;
    let ni_over_nt;
    let cosine;
    if vec3::dot(r_in.direction, rec.normal) > 0.0 {
        // leaving the medium
        outward_normal = -rec.normal;
        ni_over_nt = ref_idx;
        let c = vec3::dot(r_in.direction, rec.normal) / r_in.direction.length();
        // NaN under total internal reflection, but then refract() fails
        // first and the value is never read
        cosine = (1.0 - ref_idx * ref_idx * (1.0 - c * c)).sqrt();
    } else {
        outward_normal = rec.normal;
        ni_over_nt = 1.0 / ref_idx;
        cosine = -vec3::dot(r_in.direction, rec.normal) / r_in.direction.length();
    }

    let mut refracted = Vec3::zero();
    let reflect_prob = match refract(r_in.direction, outward_normal, ni_over_nt) {
        Some(r) => {
            refracted = r;
            schlick(cosine, ref_idx)
        }
        None => 1.0,
    };

    let scattered = if sampler.uniform() < reflect_prob {
        Ray::new(rec.p + outward_normal * SURFACE_BIAS, reflected)
    } else {
        // the ray continues on the other side of the surface
        Ray::new(rec.p - outward_normal * SURFACE_BIAS, refracted)
    };

    Some((attenuation, scattered))
}

fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * vec3::dot(v, n) * n
}

fn refract(v: Vec3, n: Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let uv = v.unit_vector();
    let dt = vec3::dot(uv, n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

fn schlick(cosine: f64, ref_idx: f64) -> f64 {
    let mut r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powf(5.0)
}
