pub mod ray;
pub mod vec3;

pub use self::ray::*;
pub use self::vec3::*;

pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    a * (1.0 - t) + b * t
}
