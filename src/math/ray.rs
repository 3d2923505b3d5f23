use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // not normalized, callers normalize where angles matter
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn point_at_parameter(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_at_parameter() {
        let r = Ray::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(0.0, 2.0, 0.5));
        assert_eq!(r.point_at_parameter(0.0), Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(r.point_at_parameter(2.0), Vec3::new(1.0, 4.0, 0.0));
        assert_eq!(r.point_at_parameter(-2.0), Vec3::new(1.0, -4.0, -2.0));
    }
}
