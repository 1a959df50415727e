//! Lumen renderer - CPU Monte Carlo path tracing.
//!
//! Renders a scene of [`Hittable`] objects through a [`Camera`] by averaging
//! stratified camera samples, each traced by the [`PathTracer`]. Rows are
//! split across worker threads by [`render_parallel`].
//!
//! ```ignore
//! use lumen_renderer::{Camera, HittableList, Lambertian, RenderConfig, Sphere, Vec3};
//!
//! let mut world = HittableList::new();
//! world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::from_color(Vec3::splat(0.5))));
//!
//! let camera = Camera::new().with_image(400, 16.0 / 9.0).with_quality(100, 50);
//! let image = lumen_renderer::render_parallel(&camera, &world, &RenderConfig::default())?;
//! ```

mod camera;
mod hittable;
mod integrator;
mod material;
mod renderer;
mod sampling;
mod scheduler;
mod sphere;
mod texture;

pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{ray_color, Background, PathTracer, DEFAULT_RAY_EPSILON};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal,
    ScatterResult,
};
pub use renderer::{color_to_rgb8, linear_to_gamma, render, render_pixel, Framebuffer, RenderConfig};
pub use sampling::{gen_f64, random_in_unit_disk, random_on_hemisphere, random_unit_vector};
pub use scheduler::{
    partition_rows, render_parallel, thread_count, RenderError, RenderResult, FALLBACK_THREADS,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, SolidColor, Texture};

/// Re-export the math types the public API is written in.
pub use lumen_math::{Interval, Point3, Ray, Vec3};
