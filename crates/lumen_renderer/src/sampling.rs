//! Random sampling helpers.
//!
//! Every function takes the caller's generator explicitly. The renderer never
//! touches a global or thread-local RNG, so each worker's sample stream is
//! independent by construction.

use lumen_math::{Vec3, DVec2};
use rand::{Rng, RngCore};

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform `f64` in `[min, max)`.
#[inline]
pub fn gen_range_f64(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling keeps the distribution uniform on the sphere
    loop {
        let v = Vec3::new(
            gen_range_f64(rng, -1.0, 1.0),
            gen_range_f64(rng, -1.0, 1.0),
            gen_range_f64(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random unit vector in the hemisphere around `normal`.
pub fn random_on_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Random point strictly inside the unit disk.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec2 {
    loop {
        let p = DVec2::new(gen_range_f64(rng, -1.0, 1.0), gen_range_f64(rng, -1.0, 1.0));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
