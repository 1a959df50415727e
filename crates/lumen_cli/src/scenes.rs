//! Built-in demo scenes.
//!
//! Each preset pairs a world with the camera it was composed for.

use clap::ValueEnum;
use lumen_renderer::{
    Background, CameraSettings, CheckerTexture, Color, Dielectric, DiffuseLight, HittableList,
    Isotropic, Lambertian, Metal, Point3, Sphere, Vec3,
};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Ground, hollow glass, diffuse and metal spheres under a sky
    #[default]
    ThreeSpheres,
    /// The classic cover scene with motion-blurred diffuse spheres
    RandomSpheres,
    /// Checkered ground lit only by an emissive sphere
    SimpleLight,
    /// Scattering haze and a diffuse sphere under an overhead light
    Fog,
}

/// A world and the camera it should be viewed through.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
}

impl Preset {
    /// Build the scene. `rng` only drives scene layout, never rendering.
    pub fn build(self, rng: &mut dyn RngCore) -> Scene {
        match self {
            Preset::ThreeSpheres => three_spheres(),
            Preset::RandomSpheres => random_spheres(rng),
            Preset::SimpleLight => simple_light(),
            Preset::Fog => fog(),
        }
    }
}

fn three_spheres() -> Scene {
    let mut world = HittableList::new();

    let glass = Arc::new(Dielectric::new(1.5));
    world.add(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Lambertian::from_color(Color::new(0.8, 0.8, 0.0)),
    ));
    world.add(Sphere::new(
        Point3::new(0.0, 0.0, -1.2),
        0.5,
        Lambertian::from_color(Color::new(0.1, 0.2, 0.5)),
    ));
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass));
    // Air bubble inside the glass sphere makes it a hollow shell
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, Dielectric::new(1.0 / 1.5)));
    world.add(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 1.0),
    ));

    let camera = CameraSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(-2.0, 2.0, 1.0),
        look_at: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
        background: Background::SkyGradient,
        stratify: true,
    };

    Scene { world, camera }
}

fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
    world.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Arc::new(checker)),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let bounce = Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                world.add(Sphere::moving(
                    center,
                    center + bounce,
                    0.2,
                    Lambertian::from_color(albedo),
                ));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                world.add(Sphere::new(center, 0.2, Metal::new(albedo, fuzz)));
            } else {
                world.add(Sphere::new(center, 0.2, Dielectric::new(1.5)));
            }
        }
    }

    world.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5)));
    world.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::from_color(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    log::debug!("Random spheres scene has {} objects", world.len());

    let camera = CameraSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        background: Background::Solid(Color::new(0.7, 0.8, 1.0)),
        stratify: true,
    };

    Scene { world, camera }
}

fn simple_light() -> Scene {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        1.0,
        Color::new(0.2, 0.3, 0.1),
        Color::splat(0.9),
    ));
    world.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(checker.clone()),
    ));
    world.add(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, Lambertian::new(checker)));
    world.add(Sphere::new(
        Point3::new(0.0, 7.0, 0.0),
        2.0,
        DiffuseLight::from_color(Color::splat(4.0)),
    ));

    let camera = CameraSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(26.0, 3.0, 6.0),
        look_at: Point3::new(0.0, 2.0, 0.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 10.0,
        background: Background::Solid(Color::ZERO),
        stratify: true,
    };

    Scene { world, camera }
}

fn fog() -> Scene {
    let mut world = HittableList::new();

    world.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::from_color(Color::splat(0.48)),
    ));
    world.add(Sphere::new(
        Point3::new(-2.2, 1.0, 0.0),
        1.0,
        Isotropic::from_color(Color::splat(0.9)),
    ));
    world.add(Sphere::new(
        Point3::new(2.2, 1.0, 0.0),
        1.0,
        Lambertian::from_color(Color::new(0.7, 0.2, 0.2)),
    ));
    world.add(Sphere::new(
        Point3::new(0.0, 8.0, 0.0),
        3.0,
        DiffuseLight::from_color(Color::splat(5.0)),
    ));

    let camera = CameraSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 30.0,
        look_from: Point3::new(0.0, 3.0, 12.0),
        look_at: Point3::new(0.0, 1.0, 0.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 12.0,
        background: Background::Solid(Color::splat(0.02)),
        stratify: true,
    };

    Scene { world, camera }
}

fn random_color(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
