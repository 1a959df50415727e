//! Lumen math - double precision geometry primitives.
//!
//! Everything in the renderer works in `f64`, so the glam double types are
//! re-exported under the names the rest of the workspace uses.

pub use glam::{DVec2, DVec3};

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// A direction or offset in 3D space.
pub type Vec3 = DVec3;

/// A position in 3D space.
pub type Point3 = DVec3;

/// Returns true if every component of `v` is within `1e-8` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f64 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-7, 0.0)));
    }
}
