//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use lumen_math::{Interval, Point3, Ray, Vec3};
use std::f64::consts::PI;

/// A sphere primitive, optionally moving linearly over the shutter interval.
pub struct Sphere<M: Material> {
    /// Center at time 0 and the displacement reached at time 1.
    center: Ray,
    radius: f64,
    material: M,
}

impl<M: Material> Sphere<M> {
    /// Create a stationary sphere. Negative radii are floored at 0.
    pub fn new(center: Point3, radius: f64, material: M) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Create a sphere whose center moves from `center0` at time 0 to
    /// `center1` at time 1.
    pub fn moving(center0: Point3, center1: Point3, radius: f64, material: M) -> Self {
        Self {
            center: Ray::new_simple(center0, center1 - center0),
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Center of the sphere at the given time.
    pub fn center_at(&self, time: f64) -> Point3 {
        self.center.at(time)
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f64, f64) {
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl<M: Material> Hittable for Sphere<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let center = self.center_at(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = if self.radius > 0.0 {
            (ray.at(root) - center) / self.radius
        } else {
            -ray.direction().normalize()
        };

        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            Self::get_sphere_uv(outward_normal),
            &self.material,
        ))
    }
}
