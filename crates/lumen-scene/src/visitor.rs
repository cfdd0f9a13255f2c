//! Visitor dispatch and the two-stack transform discipline.

use lumen_math::{Mat4, Transform};

use crate::node::{
    AABoxNode, CameraNode, CustomShapeNode, GroupNode, LightNode, PyramidNode, SphereNode,
    TextureBoxNode,
};
use crate::{NodeId, SceneGraph};

/// One handler per node variant.
///
/// [`SceneGraph::accept`] matches on the node's variant and calls the
/// corresponding method. Group handlers decide whether and how to descend,
/// usually via [`SceneGraph::visit_children`].
pub trait Visitor {
    /// Visit a group node.
    fn visit_group(&mut self, scene: &SceneGraph, id: NodeId, group: &GroupNode);

    /// Visit a sphere leaf.
    fn visit_sphere(&mut self, id: NodeId, node: &SphereNode);

    /// Visit an axis-aligned box leaf.
    fn visit_aabox(&mut self, id: NodeId, node: &AABoxNode);

    /// Visit a textured box leaf.
    fn visit_texture_box(&mut self, id: NodeId, node: &TextureBoxNode);

    /// Visit a pyramid leaf.
    fn visit_pyramid(&mut self, id: NodeId, node: &PyramidNode);

    /// Visit a custom mesh leaf.
    fn visit_custom_shape(&mut self, id: NodeId, node: &CustomShapeNode);

    /// Visit a camera leaf. Ignored by default; renderers take their
    /// camera as an argument.
    fn visit_camera(&mut self, _id: NodeId, _node: &CameraNode) {}

    /// Visit a light leaf. Ignored by default.
    fn visit_light(&mut self, _id: NodeId, _node: &LightNode) {}
}

/// Parallel stacks of accumulated world matrices and their inverses.
///
/// Both stacks are seeded with the identity. Pushing a group's transform
/// multiplies it onto the current world matrix (`world * m`) and multiplies
/// its inverse in front of the current world inverse (`m⁻¹ * world⁻¹`), so
/// the top of the inverse stack is always the inverse of the top of the
/// matrix stack.
#[derive(Debug, Clone)]
pub struct TransformStack {
    matrices: Vec<Mat4>,
    inverses: Vec<Mat4>,
}

impl TransformStack {
    /// A stack holding only the identity.
    pub fn new() -> Self {
        Self {
            matrices: vec![Mat4::identity()],
            inverses: vec![Mat4::identity()],
        }
    }

    /// Drop everything above the identity seed.
    pub fn reset(&mut self) {
        self.matrices.truncate(1);
        self.inverses.truncate(1);
    }

    /// Enter a group with local transform `t`.
    pub fn push(&mut self, t: &Transform) {
        let world = self.world() * t.matrix;
        let inverse = t.inverse * self.world_inverse();
        self.matrices.push(world);
        self.inverses.push(inverse);
    }

    /// Leave the most recently entered group. The identity seed is never popped.
    pub fn pop(&mut self) {
        if self.matrices.len() > 1 {
            self.matrices.pop();
            self.inverses.pop();
        }
    }

    /// Number of groups currently entered.
    pub fn depth(&self) -> usize {
        self.matrices.len() - 1
    }

    /// Accumulated object-to-world matrix.
    pub fn world(&self) -> &Mat4 {
        // seeded in new() and never popped below one entry
        &self.matrices[self.matrices.len() - 1]
    }

    /// Accumulated world-to-object matrix.
    pub fn world_inverse(&self) -> &Mat4 {
        &self.inverses[self.inverses.len() - 1]
    }

    /// The accumulated transform as a matrix/inverse pair.
    pub fn current(&self) -> Transform {
        Transform {
            matrix: *self.world(),
            inverse: *self.world_inverse(),
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
