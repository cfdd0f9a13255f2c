//! Ray-plane intersection and the triangle inside test.
//!
//! Box, pyramid and mesh faces are all intersected as triangles: first
//! against the plane through the three vertices, then accepted only if the
//! hit point lies inside the triangle.

use lumen_math::{cross3, dot3, length3, normalize3, Tolerance, Vec4};

use crate::{Intersection, Ray};

/// A plane through a point with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub point: Vec4,
    /// Unit normal, oriented by the winding of the defining vertices.
    pub normal: Vec4,
}

impl Plane {
    /// Plane through `a`, `b`, `c` with normal `(b - a) × (c - a)`.
    ///
    /// Returns `None` for collinear vertices.
    pub fn from_points(a: &Vec4, b: &Vec4, c: &Vec4) -> Option<Self> {
        let normal = normalize3(&cross3(&(b - a), &(c - a)))?;
        Some(Self { point: *a, normal })
    }

    /// Intersect a ray with the plane.
    ///
    /// Returns `None` if the ray is parallel to the plane or the plane lies
    /// behind the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let denom = dot3(&ray.direction, &self.normal);

        // Ray is parallel to plane
        if Tolerance::DEFAULT.is_zero(denom) {
            return None;
        }

        let t = dot3(&(self.point - ray.origin), &self.normal) / denom;

        // Intersection is behind ray origin
        if t < 0.0 {
            return None;
        }

        Some(Intersection::new(t, ray.at(t), self.normal))
    }

    /// Whether `p`, assumed to lie on this plane, is inside the triangle.
    ///
    /// For each edge the cross product of the edge with the vector to `p`
    /// must point along the plane normal. Points within linear tolerance of
    /// an edge count as inside.
    pub fn is_inside(&self, vertices: &[Vec4; 3], p: &Vec4) -> bool {
        let slack = Tolerance::DEFAULT.linear;
        (0..3).all(|i| {
            let a = &vertices[i];
            let b = &vertices[(i + 1) % 3];
            let edge = b - a;
            let c = cross3(&edge, &(p - a));
            // |edge × (p - a)| is edge length times distance to the edge line
            dot3(&c, &self.normal) >= -slack * length3(&edge)
        })
    }
}

/// Intersect a ray with one triangle.
pub fn intersect_triangle(ray: &Ray, vertices: &[Vec4; 3]) -> Option<Intersection> {
    let plane = Plane::from_points(&vertices[0], &vertices[1], &vertices[2])?;
    let hit = plane.intersect(ray)?;
    plane.is_inside(vertices, &hit.point).then_some(hit)
}

/// Intersect a ray with every triangle, keeping the smallest `t`.
///
/// The scan is exhaustive; on equal `t` the earlier triangle wins.
pub fn intersect_triangles<I>(ray: &Ray, triangles: I) -> Option<Intersection>
where
    I: IntoIterator<Item = [Vec4; 3]>,
{
    let mut closest: Option<Intersection> = None;
    for tri in triangles {
        if let Some(hit) = intersect_triangle(ray, &tri) {
            if closest.as_ref().map_or(true, |c| hit.closer_than(c)) {
                closest = Some(hit);
            }
        }
    }
    closest
}
