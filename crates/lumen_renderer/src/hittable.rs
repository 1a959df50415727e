//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use lumen_math::{Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
///
/// Borrows the material from scene-owned storage, so a record can never
/// outlive the scene that produced it.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t`, orienting `outward_normal` against
    /// the ray.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        (u, v): (f64, f64),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementations must be free of side effects: the renderer calls `hit`
/// from every worker thread at once on a shared, read-only scene.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `t` strictly inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

impl<H: Hittable + ?Sized> Hittable for Box<H> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        (**self).hit(ray, ray_t)
    }
}

impl<H: Hittable + ?Sized> Hittable for Arc<H> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        (**self).hit(ray, ray_t)
    }
}

/// A list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let window = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};

    fn grey() -> Lambertian {
        Lambertian::from_color(Vec3::splat(0.5))
    }

    #[test]
    fn test_set_face_normal_outside() {
        let mat = grey();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, (0.0, 0.0), &mat);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_set_face_normal_inside() {
        let mat = grey();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(&ray, 1.0, -Vec3::Z, (0.0, 0.0), &mat);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_closest_hit() {
        let mut world = HittableList::new();
        // Far sphere added first so the list has to narrow its window
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey()));
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, grey()));
        assert_eq!(world.len(), 3);

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = world
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the nearest sphere");

        assert!((rec.t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_list_respects_interval() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(world.hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }
}
