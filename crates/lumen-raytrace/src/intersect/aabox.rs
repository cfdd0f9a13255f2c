//! Ray-box intersection over the box's twelve triangular faces.

use lumen_math::{point, Vec4};

use super::plane::intersect_triangles;
use crate::{Intersection, Ray};

/// Vertex indices of the 12 triangles, two per face, wound outward.
///
/// ```text
///     7----6
///    /|   /|   2 = max corner
///   3----2 |   4 = min corner
///   | 4--|-5   looking down -z
///   |/   |/
///   0----1
/// ```
const INDICES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3], // front
    [1, 5, 6],
    [1, 6, 2], // right
    [5, 4, 7],
    [5, 7, 6], // back
    [4, 0, 3],
    [4, 3, 7], // left
    [3, 2, 6],
    [3, 6, 7], // top
    [4, 5, 1],
    [4, 1, 0], // bottom
];

/// An axis-aligned box described by its eight corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABox {
    vertices: [Vec4; 8],
}

impl AABox {
    /// Box spanning `min` to `max`.
    pub fn new(min: &Vec4, max: &Vec4) -> Self {
        Self {
            vertices: [
                point(min.x, min.y, max.z),
                point(max.x, min.y, max.z),
                point(max.x, max.y, max.z),
                point(min.x, max.y, max.z),
                point(min.x, min.y, min.z),
                point(max.x, min.y, min.z),
                point(max.x, max.y, min.z),
                point(min.x, max.y, min.z),
            ],
        }
    }

    /// Box spanning `-0.5..0.5` on every axis.
    pub fn unit() -> Self {
        Self::new(&point(-0.5, -0.5, -0.5), &point(0.5, 0.5, 0.5))
    }

    /// Triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        INDICES
            .iter()
            .map(|t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }

    /// Intersect a ray with the box, testing all twelve triangles.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        intersect_triangles(ray, self.triangles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::direction;

    fn cube2() -> AABox {
        AABox::new(&point(-1.0, -1.0, -1.0), &point(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_front_face_hit() {
        let ray = Ray::new(point(0.0, 0.0, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        let hit = cube2().intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-10);
        assert!((hit.point - point(0.0, 0.0, 1.0)).norm() < 1e-10);
        assert!((hit.normal - direction(0.0, 0.0, 1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_outward_normals() {
        let cases = [
            (point(5.0, 0.2, 0.1), direction(-1.0, 0.0, 0.0), direction(1.0, 0.0, 0.0)),
            (point(-5.0, 0.2, 0.1), direction(1.0, 0.0, 0.0), direction(-1.0, 0.0, 0.0)),
            (point(0.2, 5.0, 0.1), direction(0.0, -1.0, 0.0), direction(0.0, 1.0, 0.0)),
            (point(0.2, -5.0, 0.1), direction(0.0, 1.0, 0.0), direction(0.0, -1.0, 0.0)),
            (point(0.2, 0.1, -5.0), direction(0.0, 0.0, 1.0), direction(0.0, 0.0, -1.0)),
        ];
        for (origin, dir, expected) in cases {
            let ray = Ray::new(origin, dir).unwrap();
            let hit = cube2().intersect(&ray).unwrap();
            assert!((hit.t - 4.0).abs() < 1e-10, "{origin:?}");
            assert!((hit.normal - expected).norm() < 1e-10, "{origin:?}");
        }
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(point(3.0, 0.0, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        assert!(cube2().intersect(&ray).is_none());
    }

    #[test]
    fn test_from_inside_hits_far_face() {
        let ray = Ray::new(point(0.0, 0.0, 0.0), direction(0.0, 0.0, -1.0)).unwrap();
        let hit = AABox::unit().intersect(&ray).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_grazing_edge_counts() {
        // ray along the top-front edge's plane hits exactly on the edge
        let ray = Ray::new(point(0.0, 1.0, 5.0), direction(0.0, 0.0, -1.0)).unwrap();
        let hit = cube2().intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-10);
    }
}
