//! Ray-primitive intersection.
//!
//! Every primitive is intersected in its own object space. [`Shape`] wraps
//! the geometry of a scene leaf, and [`intersect_in_world`] carries a world
//! ray into object space through an accumulated transform and brings the
//! hit back out.

mod aabox;
mod plane;
mod pyramid;
mod sphere;

pub use aabox::AABox;
pub use plane::{intersect_triangle, intersect_triangles, Plane};
pub use pyramid::Pyramid;
pub use sphere::Sphere;

use lumen_math::{dot3, normalize3, Transform, Vec4};
use lumen_scene::{AABoxNode, CustomShapeNode, PyramidNode, SphereNode, TextureBoxNode};

use crate::{Intersection, Ray};

/// Object-space geometry of one scene leaf.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Analytic sphere.
    Sphere(Sphere),
    /// Box built from twelve triangles.
    AABox(AABox),
    /// Pyramid built from six triangles.
    Pyramid(Pyramid),
    /// Indexed triangle mesh.
    Mesh(&'a CustomShapeNode),
}

impl Shape<'_> {
    /// Intersect an object-space ray with the shape.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::AABox(b) => b.intersect(ray),
            Shape::Pyramid(p) => p.intersect(ray),
            Shape::Mesh(m) => intersect_triangles(ray, m.triangles()),
        }
    }
}

impl From<&SphereNode> for Shape<'_> {
    fn from(node: &SphereNode) -> Self {
        Shape::Sphere(Sphere::new(node.center, node.radius))
    }
}

impl From<&AABoxNode> for Shape<'_> {
    fn from(node: &AABoxNode) -> Self {
        Shape::AABox(AABox::new(&node.min, &node.max))
    }
}

impl From<&TextureBoxNode> for Shape<'_> {
    fn from(node: &TextureBoxNode) -> Self {
        Shape::AABox(AABox::new(&node.min, &node.max))
    }
}

impl From<&PyramidNode> for Shape<'_> {
    fn from(node: &PyramidNode) -> Self {
        Shape::Pyramid(Pyramid::new(node.base, node.apex))
    }
}

impl<'a> From<&'a CustomShapeNode> for Shape<'a> {
    fn from(node: &'a CustomShapeNode) -> Self {
        Shape::Mesh(node)
    }
}

/// Intersect a world-space ray with a shape placed by `world`.
///
/// The ray is mapped into object space with the inverse matrix. The hit
/// point and normal are mapped back with the forward matrix and `t` is
/// measured along the world ray, so hits from differently transformed
/// shapes compare directly. Returns `None` when the object-space ray is
/// degenerate (a zero scale collapses its direction).
pub fn intersect_in_world(shape: &Shape<'_>, world_ray: &Ray, world: &Transform) -> Option<Intersection> {
    let origin = world.apply_inverse(&world_ray.origin);
    let dir = world.apply_inverse(&world_ray.direction);
    let Some(local_ray) = Ray::new(origin, dir) else {
        log::warn!("skipping shape under a degenerate transform");
        return None;
    };

    let local = shape.intersect(&local_ray)?;
    let point = to_point(world.apply(&local.point));
    let normal = normalize3(&world.apply(&local.normal))?;
    let t = dot3(&(point - world_ray.origin), &world_ray.direction);
    Some(Intersection::new(t, point, normal))
}

fn to_point(v: Vec4) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, 1.0)
}
