use crate::hitable::{HitRecord, Hitable};
use crate::material::MaterialId;
use crate::math::ray::Ray;
use crate::math::vec3::{self, Vec3};

pub struct Sphere {
    center: Vec3,
    radius: f64,
    mat: MaterialId,
}

impl Sphere {
    // a negative radius is allowed: the normal flips inward, which models a
    // hollow shell when nested inside a positive-radius sphere
    pub fn new(center: Vec3, radius: f64, mat: MaterialId) -> Sphere {
        Sphere {
            center,
            radius,
            mat,
        }
    }
}

impl Hitable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        // the quadratic is written as a*t^2 + 2b*t + c, which cancels the 2s
        // out of the discriminant and the roots
        let oc = ray.origin - self.center;
        let a = vec3::dot(ray.direction, ray.direction);
        let b = vec3::dot(oc, ray.direction);
        let c = vec3::dot(oc, oc) - self.radius * self.radius;
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        // near root first; the far root only matters for rays that start
        // inside the sphere
        let temp = (-b - sqrt_d) / a;
        if temp < t_max && temp > t_min {
            let point = ray.point_at_parameter(temp);
            return Some(HitRecord::new(
                temp,
                point,
                (point - self.center) / self.radius,
                self.mat,
            ));
        }

        let temp = (-b + sqrt_d) / a;
        if temp < t_max && temp > t_min {
            let point = ray.point_at_parameter(temp);
            return Some(HitRecord::new(
                temp,
                point,
                (point - self.center) / self.radius,
                self.mat,
            ));
        }

        None
    }
}
