use std::f64::consts::PI;

use crate::math::ray::Ray;
use crate::math::vec3::{self, Vec3};
use crate::sampler::Sampler;

#[allow(dead_code)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    pub fn new(
        lookfrom: Vec3,
        lookat: Vec3,
        vup: Vec3,
        vfov: f64,
        aspect: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Camera {
        let theta = vfov * PI / 180.0;
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;
        let w = (lookfrom - lookat).unit_vector();
        let u = vec3::cross(vup, w).unit_vector();
        let v = vec3::cross(w, u);
        Camera {
            origin: lookfrom,
            lower_left_corner: lookfrom
                - u * half_width * focus_dist
                - v * half_height * focus_dist
                - w * focus_dist,
            horizontal: u * 2.0 * half_width * focus_dist,
            vertical: v * 2.0 * half_height * focus_dist,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        }
    }

    // s, t are normalized image-plane coordinates in [0, 1], t measured from
    // the bottom. The disk sample is drawn even at zero aperture so RNG
    // consumption does not depend on the camera settings.
    pub fn get_ray(&self, s: f64, t: f64, sampler: &mut Sampler) -> Ray {
        let rd = sampler.in_unit_disk() * self.lens_radius;
        let offset = self.u * rd.x + self.v * rd.y;
        let direction =
            self.lower_left_corner + self.horizontal * s + self.vertical * t - self.origin - offset;
        Ray::new(self.origin + offset, direction)
    }
}
