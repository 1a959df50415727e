//! Camera for ray generation.
//!
//! The camera owns two kinds of state: the user-facing [`CameraSettings`] and
//! the derived viewport geometry computed by [`Camera::initialize`]. Every
//! way of changing the settings re-runs `initialize`, so the derived state
//! can't go stale between renders.

use crate::integrator::Background;
use crate::sampling::{gen_f64, random_in_unit_disk};
use lumen_math::{Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// User-facing camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Requested number of samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f64,
    /// Radiance returned by rays that escape the scene
    pub background: Background,
    /// Spread samples over a sqrt(spp) x sqrt(spp) sub-pixel grid
    pub stratify: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 800,
            samples_per_pixel: 10,
            max_depth: 50,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            background: Background::default(),
            stratify: true,
        }
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,

    // Derived by initialize()
    image_height: u32,
    sqrt_spp: u32,
    recip_sqrt_spp: f64,
    samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self::from_settings(CameraSettings::default())
    }

    /// Create a camera from settings and derive its viewport.
    pub fn from_settings(settings: CameraSettings) -> Self {
        let mut camera = Self {
            settings,
            image_height: 1,
            sqrt_spp: 1,
            recip_sqrt_spp: 1.0,
            samples_scale: 1.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    /// Set image width and aspect ratio.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.settings.image_width = image_width;
        self.settings.aspect_ratio = aspect_ratio;
        self.initialize();
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.settings.samples_per_pixel = samples_per_pixel;
        self.settings.max_depth = max_depth;
        self.initialize();
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.settings.look_from = look_from;
        self.settings.look_at = look_at;
        self.settings.vup = vup;
        self.initialize();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.settings.vfov = vfov;
        self.settings.defocus_angle = defocus_angle;
        self.settings.focus_dist = focus_dist;
        self.initialize();
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.settings.background = background;
        self
    }

    /// Toggle stratified sub-pixel sampling.
    pub fn with_stratification(mut self, stratify: bool) -> Self {
        self.settings.stratify = stratify;
        self.initialize();
        self
    }

    /// Replace all settings at once.
    pub fn set_settings(&mut self, settings: CameraSettings) {
        self.settings = settings;
        self.initialize();
    }

    /// Derive image height, sampling grid and viewport geometry from the
    /// current settings.
    ///
    /// Out-of-range settings are normalized rather than rejected.
    pub fn initialize(&mut self) {
        let s = &mut self.settings;

        if s.image_width == 0 {
            log::warn!("image_width of 0 clamped to 1");
            s.image_width = 1;
        }
        if s.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel of 0 clamped to 1");
            s.samples_per_pixel = 1;
        }

        let height = (s.image_width as f64 / s.aspect_ratio).floor();
        self.image_height = if height.is_finite() && height >= 1.0 {
            height as u32
        } else {
            1
        };

        self.sqrt_spp = (s.samples_per_pixel as f64).sqrt().floor() as u32;
        self.recip_sqrt_spp = 1.0 / self.sqrt_spp as f64;
        self.samples_scale = if s.stratify {
            1.0 / (self.sqrt_spp * self.sqrt_spp) as f64
        } else {
            1.0 / s.samples_per_pixel as f64
        };

        self.center = s.look_from;

        // Calculate viewport dimensions
        let theta = s.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * s.focus_dist;
        let viewport_width = viewport_height * (s.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (s.look_from - s.look_at).normalize();
        self.u = s.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edges, with v running down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / s.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - s.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = s.focus_dist * (s.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;
    }

    /// Ray through a jittered point of sub-pixel cell `(s_i, s_j)` of pixel
    /// `(i, j)`.
    pub fn get_ray(&self, i: u32, j: u32, s_i: u32, s_j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = stratum_offset(s_i, gen_f64(rng), self.recip_sqrt_spp);
        let offset_y = stratum_offset(s_j, gen_f64(rng), self.recip_sqrt_spp);
        self.ray_through(i, j, offset_x, offset_y, rng)
    }

    /// Ray through a uniformly random point of pixel `(i, j)`.
    pub fn get_ray_random(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = gen_f64(rng) - 0.5;
        let offset_y = gen_f64(rng) - 0.5;
        self.ray_through(i, j, offset_x, offset_y, rng)
    }

    fn ray_through(&self, i: u32, j: u32, offset_x: f64, offset_y: f64, rng: &mut dyn RngCore) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (i as f64 + offset_x) * self.pixel_delta_u
            + (j as f64 + offset_y) * self.pixel_delta_v;

        let ray_origin = if self.settings.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f64(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn image_width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.settings.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.settings.max_depth
    }

    pub fn background(&self) -> Background {
        self.settings.background
    }

    pub fn is_stratified(&self) -> bool {
        self.settings.stratify
    }

    /// Side length of the stratified sub-pixel grid.
    pub fn sqrt_spp(&self) -> u32 {
        self.sqrt_spp
    }

    /// Number of camera rays actually traced per pixel.
    pub fn effective_samples(&self) -> u32 {
        if self.settings.stratify {
            self.sqrt_spp * self.sqrt_spp
        } else {
            self.settings.samples_per_pixel
        }
    }

    /// Factor applied to a pixel's summed samples.
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset from the pixel center, in pixel units, of a sample in stratum `s`
/// with jitter `xi` in `[0, 1)`.
#[inline]
pub(crate) fn stratum_offset(s: u32, xi: f64, recip_sqrt_spp: f64) -> f64 {
    ((s as f64 + xi) * recip_sqrt_spp) - 0.5
}
