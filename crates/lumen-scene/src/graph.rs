//! Arena-backed scene graph.
//!
//! Nodes live in a slot map and refer to each other by [`NodeId`]. The
//! graph is a tree: every node has at most one parent, and attaching a node
//! is rejected if it already has a parent or if it would close a cycle.
//!
//! Once built, the only mutations are replacing a group's transformation
//! and replacing a leaf's colour; the `compose_*` helpers are the
//! transform-update contract used by animation and input code and are
//! expressed in terms of [`SceneGraph::set_transform`].

use log::{debug, trace};
use lumen_math::{Color, Transform, Transformation, Vec4};
use slotmap::{new_key_type, SlotMap};

use crate::node::{GroupNode, Node, NodeKind};
use crate::{Result, SceneError, Visitor};

new_key_type! {
    /// Handle to a node of a [`SceneGraph`].
    pub struct NodeId;
}

/// A tree of group and leaf nodes.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached group node.
    pub fn create_group(&mut self, transformation: Transformation) -> NodeId {
        self.insert(GroupNode::new(transformation))
    }

    /// Create a detached node of any variant.
    pub fn insert(&mut self, kind: impl Into<NodeKind>) -> NodeId {
        let kind = kind.into();
        let name = kind.name();
        let id = self.nodes.insert(Node { kind, parent: None });
        trace!("created {name} node {id:?}");
        id
    }

    /// Append `child` to the children of group `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(SceneError::AlreadyParented(child));
        }
        if !matches!(self.node(parent)?.kind, NodeKind::Group(_)) {
            return Err(SceneError::NotAGroup(parent));
        }
        // parent must not be the child itself or one of its descendants
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SceneError::Cycle { parent, child });
            }
            cursor = self.nodes[id].parent;
        }

        if let NodeKind::Group(group) = &mut self.nodes[parent].kind {
            group.children.push(child);
        }
        self.nodes[child].parent = Some(parent);
        trace!("attached {child:?} under {parent:?}");
        Ok(())
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node, failing if it does not exist.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(SceneError::MissingNode(id))
    }

    /// Children of a group (empty for leaves and unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Group(group)) => group.children(),
            _ => &[],
        }
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The transformation of a group node.
    pub fn transformation(&self, id: NodeId) -> Result<&Transformation> {
        match &self.node(id)?.kind {
            NodeKind::Group(group) => Ok(&group.transformation),
            _ => Err(SceneError::NotAGroup(id)),
        }
    }

    /// The colour of a geometry leaf.
    pub fn color(&self, id: NodeId) -> Result<Color> {
        self.node(id)?.kind.color().ok_or(SceneError::NoColor(id))
    }

    /// Replace the transformation of a group node.
    pub fn set_transform(&mut self, id: NodeId, transformation: Transformation) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::MissingNode(id))?;
        match &mut node.kind {
            NodeKind::Group(group) => {
                group.transformation = transformation;
                Ok(())
            }
            _ => Err(SceneError::NotAGroup(id)),
        }
    }

    /// Replace the colour of a geometry leaf.
    pub fn set_color(&mut self, id: NodeId, color: Color) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::MissingNode(id))?;
        let slot = node.kind.color_mut().ok_or(SceneError::NoColor(id))?;
        *slot = color;
        Ok(())
    }

    /// Post-compose a translation by `delta` onto a group's transformation.
    pub fn compose_translation(&mut self, id: NodeId, delta: Vec4) -> Result<()> {
        debug!("compose translation {:?} on {id:?}", delta.xyz());
        self.compose(id, Transformation::translation(delta))
    }

    /// Post-compose a rotation of `angle_degrees` about `axis`.
    pub fn compose_rotation(&mut self, id: NodeId, axis: Vec4, angle_degrees: f64) -> Result<()> {
        debug!("compose rotation {angle_degrees}° about {:?} on {id:?}", axis.xyz());
        self.compose(id, Transformation::rotation(axis, angle_degrees.to_radians())?)
    }

    /// Post-compose a per-axis scaling.
    pub fn compose_scale(&mut self, id: NodeId, factors: Vec4) -> Result<()> {
        debug!("compose scale {:?} on {id:?}", factors.xyz());
        self.compose(id, Transformation::scaling(factors)?)
    }

    fn compose(&mut self, id: NodeId, next: Transformation) -> Result<()> {
        let composed = self.transformation(id)?.then(next);
        self.set_transform(id, composed)
    }

    /// Accumulated transform from `id`'s frame to world space.
    ///
    /// Includes the transformation of `id` itself when it is a group.
    pub fn world_transform(&self, id: NodeId) -> Result<Transform> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if let NodeKind::Group(group) = &node.kind {
                chain.push(group.transformation.transform());
            }
            cursor = node.parent;
        }
        Ok(chain
            .iter()
            .rev()
            .fold(Transform::identity(), |acc, t| acc.then(t)))
    }

    /// Dispatch `visitor` on node `id` according to its variant.
    ///
    /// Unknown ids are ignored.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        trace!("visit {} {id:?}", node.kind.name());
        match &node.kind {
            NodeKind::Group(n) => visitor.visit_group(self, id, n),
            NodeKind::Sphere(n) => visitor.visit_sphere(id, n),
            NodeKind::AABox(n) => visitor.visit_aabox(id, n),
            NodeKind::TextureBox(n) => visitor.visit_texture_box(id, n),
            NodeKind::Pyramid(n) => visitor.visit_pyramid(id, n),
            NodeKind::CustomShape(n) => visitor.visit_custom_shape(id, n),
            NodeKind::Camera(n) => visitor.visit_camera(id, n),
            NodeKind::Light(n) => visitor.visit_light(id, n),
        }
    }

    /// Dispatch `visitor` on each child of `id` in stored order.
    pub fn visit_children<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        for &child in self.children(id) {
            self.accept(child, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AABoxNode, LightNode, SphereNode, DEFAULT_COLOR};
    use lumen_math::{direction, point};

    fn two_level() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut sg = SceneGraph::new();
        let root = sg.create_group(Transformation::identity());
        let group = sg.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
        let leaf = sg.insert(AABoxNode::default());
        sg.add_child(root, group).unwrap();
        sg.add_child(group, leaf).unwrap();
        (sg, root, group, leaf)
    }

    #[test]
    fn test_build_tree() {
        let (sg, root, group, leaf) = two_level();
        assert_eq!(sg.len(), 3);
        assert_eq!(sg.children(root), &[group]);
        assert_eq!(sg.children(group), &[leaf]);
        assert_eq!(sg.node(leaf).unwrap().parent(), Some(group));
        assert!(sg.children(leaf).is_empty());
    }

    #[test]
    fn test_reject_second_parent() {
        let (mut sg, root, _group, leaf) = two_level();
        assert_eq!(sg.add_child(root, leaf), Err(SceneError::AlreadyParented(leaf)));
    }

    #[test]
    fn test_reject_cycle() {
        let mut sg = SceneGraph::new();
        let a = sg.create_group(Transformation::identity());
        let b = sg.create_group(Transformation::identity());
        sg.add_child(a, b).unwrap();
        assert_eq!(
            sg.add_child(b, a),
            Err(SceneError::Cycle { parent: b, child: a })
        );
        assert_eq!(
            sg.add_child(a, a),
            Err(SceneError::Cycle { parent: a, child: a })
        );
    }

    #[test]
    fn test_reject_leaf_parent() {
        let mut sg = SceneGraph::new();
        let leaf = sg.insert(SphereNode::default());
        let other = sg.insert(SphereNode::default());
        assert_eq!(sg.add_child(leaf, other), Err(SceneError::NotAGroup(leaf)));
    }

    #[test]
    fn test_set_color() {
        let (mut sg, root, _group, leaf) = two_level();
        let red = Color::new(1.0, 0.0, 0.0);
        sg.set_color(leaf, red).unwrap();
        assert_eq!(sg.color(leaf).unwrap(), red);
        assert_eq!(sg.set_color(root, red), Err(SceneError::NoColor(root)));

        let light = sg.insert(LightNode::new(point(1.0, 1.0, -1.0)));
        assert_eq!(sg.set_color(light, red), Err(SceneError::NoColor(light)));
    }

    #[test]
    fn test_compose_translation_then_rotation() {
        let (mut sg, _root, group, leaf) = two_level();
        sg.compose_translation(group, direction(0.0, 0.2, 0.0)).unwrap();
        sg.compose_rotation(group, direction(0.0, 1.0, 0.0), 90.0).unwrap();

        let world = sg.world_transform(leaf).unwrap();
        // local +x is rotated onto -z, then offset by (0, 0.2, -5)
        let p = world.apply(&point(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 0.2).abs() < 1e-9);
        assert!((p.z + 6.0).abs() < 1e-9);

        for q in [point(0.3, -1.0, 2.0), point(4.0, 4.0, 4.0)] {
            let back = world.apply_inverse(&world.apply(&q));
            assert!((back - q).norm() < 1e-9);
        }
    }

    #[test]
    fn test_compose_scale_zero_fails() {
        let (mut sg, _root, group, _leaf) = two_level();
        assert!(matches!(
            sg.compose_scale(group, direction(0.0, 1.0, 1.0)),
            Err(SceneError::Math(_))
        ));
        assert!(sg.compose_scale(group, direction(1.1, 1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_compose_on_leaf_fails() {
        let (mut sg, _root, _group, leaf) = two_level();
        assert_eq!(
            sg.compose_translation(leaf, direction(1.0, 0.0, 0.0)),
            Err(SceneError::NotAGroup(leaf))
        );
    }

    #[test]
    fn test_default_leaf_color() {
        let (sg, _root, _group, leaf) = two_level();
        assert_eq!(sg.color(leaf).unwrap(), DEFAULT_COLOR);
    }
}
