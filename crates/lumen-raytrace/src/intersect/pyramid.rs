//! Ray-pyramid intersection: four side triangles plus a two-triangle base.

use lumen_math::Vec4;

use super::plane::intersect_triangles;
use crate::{Intersection, Ray};

/// A pyramid over a quadrilateral base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pyramid {
    /// Base corners, counter-clockwise seen from the apex.
    pub base: [Vec4; 4],
    /// Apex point.
    pub apex: Vec4,
}

impl Pyramid {
    /// Create a pyramid.
    pub fn new(base: [Vec4; 4], apex: Vec4) -> Self {
        Self { base, apex }
    }

    /// The six faces as triangles: sides first, then the base.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        let b = &self.base;
        let sides = (0..4).map(move |i| [b[i], b[(i + 1) % 4], self.apex]);
        sides.chain([[b[0], b[3], b[2]], [b[0], b[2], b[1]]])
    }

    /// Intersect a ray with the pyramid.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        intersect_triangles(ray, self.triangles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{direction, dot3, point};

    fn unit() -> Pyramid {
        Pyramid::new(
            [
                point(-0.5, 0.0, 0.5),
                point(0.5, 0.0, 0.5),
                point(0.5, 0.0, -0.5),
                point(-0.5, 0.0, -0.5),
            ],
            point(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_front_side_hit() {
        let ray = Ray::new(point(0.0, 0.5, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        let hit = unit().intersect(&ray).unwrap();
        // front face passes through z = 0.25 at y = 0.5
        assert!((hit.t - 4.75).abs() < 1e-10);
        assert!(hit.normal.z > 0.0);
        assert!(hit.normal.y > 0.0);
    }

    #[test]
    fn test_base_from_below() {
        let ray = Ray::new(point(0.1, -5.0, 0.1), direction(0.0, 1.0, 0.0)).unwrap();
        let hit = unit().intersect(&ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-10);
        assert!(dot3(&hit.normal, &direction(0.0, -1.0, 0.0)) > 0.999);
    }

    #[test]
    fn test_miss_above_apex() {
        let ray = Ray::new(point(0.0, 1.5, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        assert!(unit().intersect(&ray).is_none());
    }

    #[test]
    fn test_six_faces() {
        assert_eq!(unit().triangles().count(), 6);
    }
}
