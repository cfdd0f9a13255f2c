//! Ray-sphere intersection (quadratic equation).

use lumen_math::{dot3, normalize3, point, Vec4};

use crate::{Intersection, Ray};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point.
    pub center: Vec4,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Vec4, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Unit sphere at the origin.
    pub fn unit() -> Self {
        Self::new(point(0.0, 0.0, 0.0), 1.0)
    }

    /// Intersect a ray with the sphere.
    ///
    /// Solves `|o + t d - c|² = r²` and returns the smallest non-negative
    /// root, so a ray starting inside the sphere hits the far side.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin - self.center;
        let d = &ray.direction;

        // Quadratic: |oc + t*d|^2 = r^2
        let a = dot3(d, d);
        let b = 2.0 * dot3(&oc, d);
        let c = dot3(&oc, &oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);

        let t = [t1, t2].into_iter().find(|t| *t >= 0.0)?;
        let hit = ray.at(t);
        let normal = normalize3(&(hit - self.center))?;
        Some(Intersection::new(t, hit, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::direction;

    #[test]
    fn test_unit_sphere_front_hit() {
        let ray = Ray::new(point(0.0, 0.0, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        let hit = Sphere::unit().intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-10);
        assert!((hit.point - point(0.0, 0.0, 1.0)).norm() < 1e-10);
        assert!((hit.normal - direction(0.0, 0.0, 1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_ray_sphere_through_center() {
        let sphere = Sphere::new(point(0.0, 0.0, 0.0), 5.0);
        let ray = Ray::new(point(-10.0, 0.0, 0.0), direction(1.0, 0.0, 0.0)).unwrap();
        let hit = sphere.intersect(&ray).unwrap();
        // first hit at x = -5
        assert!((hit.t - 5.0).abs() < 1e-10);
        assert!((hit.normal - direction(-1.0, 0.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let sphere = Sphere::new(point(0.0, 0.0, 0.0), 5.0);
        let ray = Ray::new(point(-10.0, 10.0, 0.0), direction(1.0, 0.0, 0.0)).unwrap();
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let sphere = Sphere::new(point(0.0, 0.0, 0.0), 5.0);
        let ray = Ray::new(point(0.0, 0.0, 0.0), direction(1.0, 0.0, 0.0)).unwrap();
        let hit = sphere.intersect(&ray).unwrap();
        // entry is behind the origin, exit at t = 5
        assert!((hit.t - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_sphere_behind() {
        let ray = Ray::new(point(0.0, 0.0, 5.0), direction(0.0, 0.0, 1.0)).unwrap();
        assert!(Sphere::unit().intersect(&ray).is_none());
    }

    #[test]
    fn test_offset_center() {
        let sphere = Sphere::new(point(2.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(point(2.0, 5.0, 0.0), direction(0.0, -1.0, 0.0)).unwrap();
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-10);
        assert!((hit.normal - direction(0.0, 1.0, 0.0)).norm() < 1e-10);
    }
}
