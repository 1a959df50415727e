//! Path integrator.
//!
//! Evaluates the radiance arriving along a ray by following a single
//! scattered path through the scene until it escapes, is absorbed, or runs
//! out of bounces.

use crate::{Color, Hittable};
use lumen_math::{Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Default lower bound on accepted hit distances.
///
/// Keeps scattered rays from re-hitting the surface they start on due to
/// floating point error ("shadow acne").
pub const DEFAULT_RAY_EPSILON: f64 = 0.001;

/// Radiance seen by rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// A constant color in every direction.
    Solid(Color),
    /// Vertical blend from white at the horizon to sky blue overhead.
    SkyGradient,
}

impl Background {
    /// Background radiance in the direction of `ray`.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::SkyGradient => {
                let unit_direction = ray.direction().normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                Color::ONE.lerp(Color::new(0.5, 0.7, 1.0), a)
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// Evaluates radiance along rays through a read-only scene.
#[derive(Clone, Copy)]
pub struct PathTracer<'w> {
    world: &'w dyn Hittable,
    background: Background,
    ray_epsilon: f64,
}

impl<'w> PathTracer<'w> {
    pub fn new(world: &'w dyn Hittable, background: Background) -> Self {
        Self {
            world,
            background,
            ray_epsilon: DEFAULT_RAY_EPSILON,
        }
    }

    pub fn with_ray_epsilon(mut self, ray_epsilon: f64) -> Self {
        self.ray_epsilon = ray_epsilon;
        self
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Radiance arriving along `ray`, following at most `depth` bounces.
    ///
    /// Unrolls `L = Le + attenuation * L(scattered, depth - 1)` into a loop
    /// that carries the product of attenuations forward, so stack usage does
    /// not grow with `depth`. A depth of 0 contributes no light.
    pub fn radiance(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut ray = *ray;
        let window = Interval::new(self.ray_epsilon, f64::INFINITY);

        for _ in 0..depth {
            let Some(rec) = self.world.hit(&ray, window) else {
                return radiance + throughput * self.background.color(&ray);
            };

            radiance += throughput * rec.material.emitted(rec.u, rec.v, rec.p);

            match rec.material.scatter(&ray, &rec, rng) {
                Some(result) => {
                    throughput *= result.attenuation;
                    ray = result.scattered;
                }
                // Absorbed, or a pure emitter
                None => return radiance,
            }
        }

        radiance
    }
}

/// Compute the color seen by a ray with the default ray epsilon.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Background,
    rng: &mut dyn RngCore,
) -> Color {
    PathTracer::new(world, background).radiance(ray, depth, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DiffuseLight, HitRecord, HittableList, Lambertian, Material, Metal, ScatterResult, Sphere,
    };
    use lumen_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SKY: Color = Color::new(0.5, 0.7, 1.0);

    fn forward() -> Ray {
        Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    /// Glows faintly and bounces every ray straight back along the normal at
    /// half strength.
    struct Retroreflector;

    impl Material for Retroreflector {
        fn scatter(&self, ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            Some(ScatterResult::new(
                Color::splat(0.5),
                Ray::new(rec.p, rec.normal, ray_in.time()),
            ))
        }

        fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
            Color::splat(0.1)
        }
    }

    #[test]
    fn test_sky_gradient() {
        let up = Background::SkyGradient.color(&Ray::new_simple(Vec3::ZERO, Vec3::Y));
        let down = Background::SkyGradient.color(&Ray::new_simple(Vec3::ZERO, -Vec3::Y));

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        assert!((down - Color::ONE).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, DiffuseLight::from_color(Color::ONE)));
        let mut rng = StdRng::seed_from_u64(1);

        for background in [Background::Solid(SKY), Background::SkyGradient] {
            let tracer = PathTracer::new(&world, background);
            assert_eq!(tracer.radiance(&forward(), 0, &mut rng), Color::ZERO);
            // Escaping rays too
            let up = Ray::new_simple(Vec3::ZERO, Vec3::Y);
            assert_eq!(tracer.radiance(&up, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_empty_scene_returns_background() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(2);
        let tracer = PathTracer::new(&world, Background::Solid(SKY));

        let directions = [Vec3::X, Vec3::Y, -Vec3::Z, Vec3::new(0.3, -0.2, 0.9)];
        for dir in directions {
            for depth in [1, 5, 50] {
                let ray = Ray::new_simple(Vec3::new(1.0, 2.0, 3.0), dir);
                assert_eq!(tracer.radiance(&ray, depth, &mut rng), SKY);
            }
        }
    }

    #[test]
    fn test_light_source_returns_emission_only() {
        let mut world = HittableList::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            DiffuseLight::from_color(Color::new(4.0, 3.0, 2.0)),
        ));
        let mut rng = StdRng::seed_from_u64(3);

        let color = ray_color(&forward(), &world, 10, Background::Solid(SKY), &mut rng);
        assert_eq!(color, Color::new(4.0, 3.0, 2.0));
    }

    #[test]
    fn test_depth_one_diffuse_hit_is_black() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, Lambertian::from_color(Color::ONE)));
        let mut rng = StdRng::seed_from_u64(4);

        // The scattered ray has no bounces left
        let color = ray_color(&forward(), &world, 1, Background::Solid(SKY), &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_emission_plus_attenuated_scatter() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, Retroreflector));
        let mut rng = StdRng::seed_from_u64(5);
        let tracer = PathTracer::new(&world, Background::Solid(Color::ONE));

        // Hit, then the retro-reflected ray escapes: 0.1 + 0.5 * 1.0
        let color = tracer.radiance(&forward(), 2, &mut rng);
        assert!((color - Color::splat(0.6)).length() < 1e-12);

        // Out of depth after the first bounce: emission only
        let color = tracer.radiance(&forward(), 1, &mut rng);
        assert!((color - Color::splat(0.1)).length() < 1e-12);
    }

    #[test]
    fn test_enclosed_mirror_runs_out_of_depth() {
        let mut world = HittableList::new();
        // Inside a mirror sphere with no fuzz, reflections never escape
        world.add(Sphere::new(Vec3::ZERO, 5.0, Metal::new(Color::splat(0.5), 0.0)));
        let mut rng = StdRng::seed_from_u64(6);

        let color = ray_color(&forward(), &world, 20, Background::Solid(SKY), &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_ray_epsilon_skips_near_hits() {
        let mut world = HittableList::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            DiffuseLight::from_color(Color::ONE),
        ));
        let mut rng = StdRng::seed_from_u64(7);

        let near = PathTracer::new(&world, Background::Solid(SKY));
        assert_eq!(near.radiance(&forward(), 5, &mut rng), Color::ONE);

        let far = near.with_ray_epsilon(2.0);
        assert_eq!(far.radiance(&forward(), 5, &mut rng), SKY);
    }
}
