//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Stratified or purely random multi-sampling per pixel
//! - Iterative path integration with configurable depth
//! - Gamma correction for 8-bit output

use crate::integrator::{PathTracer, DEFAULT_RAY_EPSILON};
use crate::{Camera, Color, Hittable};
use lumen_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Render configuration not tied to the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lower bound on accepted hit distances
    pub ray_epsilon: f64,
    /// Worker thread count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
    /// Base seed for the per-worker generators; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ray_epsilon: DEFAULT_RAY_EPSILON,
            threads: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Generator for worker `index`.
    ///
    /// Seeded configs give each worker its own deterministic stream.
    pub fn worker_rng(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);
    let byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [byte(color.x), byte(color.y), byte(color.z)]
}

/// Average radiance of pixel `(i, j)`.
///
/// Traces one ray per cell of the camera's sub-pixel grid when stratified,
/// or `samples_per_pixel` uniformly jittered rays otherwise.
pub fn render_pixel(
    camera: &Camera,
    tracer: &PathTracer,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let max_depth = camera.max_depth();
    let mut pixel_color = Color::ZERO;

    if camera.is_stratified() {
        let n = camera.sqrt_spp();
        for s_j in 0..n {
            for s_i in 0..n {
                let ray = camera.get_ray(i, j, s_i, s_j, rng);
                pixel_color += tracer.radiance(&ray, max_depth, rng);
            }
        }
    } else {
        for _ in 0..camera.samples_per_pixel() {
            let ray = camera.get_ray_random(i, j, rng);
            pixel_color += tracer.radiance(&ray, max_depth, rng);
        }
    }

    pixel_color * camera.samples_scale()
}

/// Render rows `first_row..` into `block`, which holds whole rows in
/// row-major order.
pub(crate) fn render_rows(
    camera: &Camera,
    tracer: &PathTracer,
    first_row: u32,
    block: &mut [Color],
    rng: &mut dyn RngCore,
) {
    let width = camera.image_width() as usize;
    for (row, pixels) in block.chunks_exact_mut(width).enumerate() {
        let j = first_row + row as u32;
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = render_pixel(camera, tracer, i as u32, j, rng);
        }
    }
}

/// Row-major image of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Pixels in row-major order with every component clamped to [0, 1].
    pub fn clamped_pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels.iter().map(|c| {
            Color::new(
                Interval::UNIT.clamp(c.x),
                Interval::UNIT.clamp(c.y),
                Interval::UNIT.clamp(c.z),
            )
        })
    }

    /// Gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> Framebuffer {
    let mut image = Framebuffer::new(camera.image_width(), camera.image_height());
    let tracer = PathTracer::new(world, camera.background()).with_ray_epsilon(config.ray_epsilon);
    let mut rng = config.worker_rng(0);

    log::info!(
        "Rendering {}x{} @ {} spp on 1 thread",
        image.width,
        image.height,
        camera.effective_samples()
    );
    render_rows(camera, &tracer, 0, &mut image.pixels, &mut rng);

    image
}
