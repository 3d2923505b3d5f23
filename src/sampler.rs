use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::vec3::Vec3;

// Every random draw in the renderer goes through one of these. Each render
// worker owns its own instance so sample streams never cross threads, and a
// fixed seed reproduces the same image.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn from_seed(seed: u64) -> Sampler {
        Sampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn for_worker(master_seed: u64, worker_index: u64) -> Sampler {
        Sampler::from_seed(master_seed.wrapping_add(worker_index))
    }

    // uniform in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn in_unit_sphere(&mut self) -> Vec3 {
        loop {
            let p = 2.0 * Vec3::new(self.uniform(), self.uniform(), self.uniform())
                - Vec3::new(1.0, 1.0, 1.0);
            if p.squared_length() < 1.0 {
                return p;
            }
        }
    }

    pub fn on_unit_sphere(&mut self) -> Vec3 {
        self.in_unit_sphere().unit_vector()
    }

    pub fn in_unit_disk(&mut self) -> Vec3 {
        loop {
            let p = 2.0 * Vec3::new(self.uniform(), self.uniform(), 0.0) - Vec3::new(1.0, 1.0, 0.0);
            if p.squared_length() < 1.0 {
                return p;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_stays_in_range() {
        let mut sampler = Sampler::from_seed(7);
        for _ in 0..1000 {
            let x = sampler.uniform();
            assert!(x >= 0.0 && x < 1.0);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Sampler::from_seed(42);
        let mut b = Sampler::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn worker_streams_differ() {
        let mut a = Sampler::for_worker(42, 0);
        let mut b = Sampler::for_worker(42, 1);
        let matches = (0..100).filter(|_| a.uniform() == b.uniform()).count();
        assert!(matches < 100);
    }

    #[test]
    fn sphere_and_disk_samples() {
        let mut sampler = Sampler::from_seed(3);
        for _ in 0..200 {
            assert!(sampler.in_unit_sphere().squared_length() < 1.0);
        }
        for _ in 0..200 {
            assert!((sampler.on_unit_sphere().length() - 1.0).abs() < 1e-12);
        }
        for _ in 0..200 {
            let p = sampler.in_unit_disk();
            assert_eq!(p.z, 0.0);
            assert!(p.squared_length() < 1.0);
        }
    }
}
