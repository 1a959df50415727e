//! Texture capability consumed by materials.

use crate::Color;
use lumen_math::Point3;
use std::sync::Arc;

/// A spatially varying color lookup.
pub trait Texture: Send + Sync {
    /// Color at surface coordinates `(u, v)` and world point `p`.
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

impl<T: Texture + ?Sized> Texture for Arc<T> {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        (**self).value(u, v, p)
    }
}

/// A texture with the same color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.albedo
    }
}

/// A 3D checker pattern alternating between two textures.
///
/// Cells are cubes of side `scale` in world space, so the pattern is
/// independent of the surface parameterization.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let parity = (cell.x as i64 + cell.y as i64 + cell.z as i64).rem_euclid(2);

        if parity == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}
