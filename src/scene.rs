use crate::camera::Camera;
use crate::hitable::{HitRecord, Hitable};
use crate::material::{Material, MaterialId};
use crate::math::ray::Ray;
use crate::math::vec3::Vec3;
use crate::sampler::Sampler;
use crate::sphere::Sphere;

// Primitives and materials live in flat arenas; spheres point at their
// material by index. Nothing here changes once rendering starts, so workers
// share the scene behind an Arc without locking.
pub struct Scene {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene {
            spheres: vec![],
            materials: vec![],
        }
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f64, mat: MaterialId) {
        self.spheres.push(Sphere::new(center, radius, mat));
    }

    // ids are only ever minted by add_material, so the index is always live
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Hitable for Scene {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let mut closest_so_far = t_max;
        let mut hit_record = None;
        for sphere in &self.spheres {
            if let Some(record) = sphere.hit(ray, t_min, closest_so_far) {
                closest_so_far = record.t;
                hit_record = Some(record);
            }
        }

        hit_record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    Cover,
    Spheres,
}

impl ScenePreset {
    pub fn from_name(name: &str) -> Option<ScenePreset> {
        match name {
            "cover" => Some(ScenePreset::Cover),
            "spheres" => Some(ScenePreset::Spheres),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Cover => "cover",
            ScenePreset::Spheres => "spheres",
        }
    }

    pub fn build(self, sampler: &mut Sampler) -> Scene {
        match self {
            ScenePreset::Cover => cover_scene(sampler),
            ScenePreset::Spheres => five_spheres(),
        }
    }

    pub fn camera(self, aspect: f64) -> Camera {
        match self {
            ScenePreset::Cover => Camera::new(
                Vec3::new(13.0, 2.0, 3.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                20.0,
                aspect,
                0.1,
                10.0,
            ),
            ScenePreset::Spheres => {
                let lookfrom = Vec3::new(-2.0, 2.0, 1.0);
                let lookat = Vec3::new(0.0, 0.0, -1.0);
                // pinhole, keeps the hollow glass shell sharp
                Camera::new(
                    lookfrom,
                    lookat,
                    Vec3::new(0.0, 1.0, 0.0),
                    90.0,
                    aspect,
                    0.0,
                    (lookfrom - lookat).length(),
                )
            }
        }
    }
}

// The book-cover field of random small spheres around three big ones.
fn cover_scene(sampler: &mut Sampler) -> Scene {
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::lambertian(Vec3::from_float(0.5)));
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    // every glass sphere shares one arena entry
    let glass = scene.add_material(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampler.uniform();
            let center = Vec3::new(
                a as f64 + 0.9 * sampler.uniform(),
                0.2,
                b as f64 + 0.9 * sampler.uniform(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                // too close to the big metal sphere
                continue;
            }

            let mat = if choose_mat < 0.8 {
                scene.add_material(Material::lambertian(Vec3::new(
                    sampler.uniform() * sampler.uniform(),
                    sampler.uniform() * sampler.uniform(),
                    sampler.uniform() * sampler.uniform(),
                )))
            } else if choose_mat < 0.95 {
                scene.add_material(Material::metal(
                    Vec3::new(
                        0.5 * (1.0 + sampler.uniform()),
                        0.5 * (1.0 + sampler.uniform()),
                        0.5 * (1.0 + sampler.uniform()),
                    ),
                    0.5 * sampler.uniform(),
                ))
            } else {
                glass
            };
            scene.add_sphere(center, 0.2, mat);
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);
    let brown = scene.add_material(Material::lambertian(Vec3::new(0.4, 0.2, 0.1)));
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown);
    let steel = scene.add_material(Material::metal(Vec3::new(0.7, 0.6, 0.5), 0.0));
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, steel);

    scene
}

// Three materials side by side over a big yellow ground sphere, with the
// glass one hollowed out by a nested negative-radius shell.
fn five_spheres() -> Scene {
    let mut scene = Scene::new();

    let blue = scene.add_material(Material::lambertian(Vec3::new(0.1, 0.2, 0.5)));
    let ground = scene.add_material(Material::lambertian(Vec3::new(0.8, 0.8, 0.0)));
    let gold = scene.add_material(Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.0));
    let glass = scene.add_material(Material::dielectric(1.5));

    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, blue);
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold);
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass);
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass);

    scene
}
