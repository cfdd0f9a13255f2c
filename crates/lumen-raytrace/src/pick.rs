//! Picking: resolve a click to the nearest scene leaf.

use lumen_math::Color;
use lumen_scene::{
    AABoxNode, CustomShapeNode, GroupNode, NodeId, PyramidNode, SceneGraph, SphereNode,
    TextureBoxNode, TransformStack, Visitor,
};
use rand::Rng;

use crate::intersect::{intersect_in_world, Shape};
use crate::{BackendMode, Intersection, Ray, RayCamera, Result};

/// One leaf crossed by the pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// World-space intersection.
    pub intersection: Intersection,
    /// The pick ray.
    pub ray: Ray,
    /// The leaf.
    pub node: NodeId,
}

/// Visitor that collects every leaf hit by a single ray.
///
/// Unlike [`RayVisitor`](crate::RayVisitor) it keeps all hits, in
/// traversal order, and sorts them afterwards.
#[derive(Debug)]
pub struct MouserayVisitor {
    stack: TransformStack,
    ray: Option<Ray>,
    hits: Vec<PickHit>,
}

impl MouserayVisitor {
    /// A visitor with an empty hit list.
    pub fn new() -> Self {
        Self {
            stack: TransformStack::new(),
            ray: None,
            hits: Vec::new(),
        }
    }

    /// All hits along `ray`, nearest first.
    ///
    /// State is reset once and the tree traversed once. The sort is
    /// stable, so hits at equal `t` stay in traversal order.
    pub fn cast(&mut self, scene: &SceneGraph, root: NodeId, ray: Ray) -> &[PickHit] {
        self.stack.reset();
        self.hits.clear();
        self.ray = Some(ray);
        scene.accept(root, self);
        self.ray = None;
        self.hits.sort_by(|a, b| a.intersection.t.total_cmp(&b.intersection.t));
        &self.hits
    }

    fn collect(&mut self, id: NodeId, shape: Shape<'_>) {
        let Some(ray) = self.ray else {
            return;
        };
        if let Some(intersection) = intersect_in_world(&shape, &ray, &self.stack.current()) {
            self.hits.push(PickHit {
                intersection,
                ray,
                node: id,
            });
        }
    }
}

impl Default for MouserayVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for MouserayVisitor {
    fn visit_group(&mut self, scene: &SceneGraph, id: NodeId, group: &GroupNode) {
        self.stack.push(group.transformation.transform());
        scene.visit_children(id, self);
        self.stack.pop();
    }

    fn visit_sphere(&mut self, id: NodeId, node: &SphereNode) {
        self.collect(id, node.into());
    }

    fn visit_aabox(&mut self, id: NodeId, node: &AABoxNode) {
        self.collect(id, node.into());
    }

    fn visit_texture_box(&mut self, id: NodeId, node: &TextureBoxNode) {
        self.collect(id, node.into());
    }

    fn visit_pyramid(&mut self, id: NodeId, node: &PyramidNode) {
        self.collect(id, node.into());
    }

    fn visit_custom_shape(&mut self, id: NodeId, node: &CustomShapeNode) {
        self.collect(id, node.into());
    }
}

/// Pick at a click position on the given backend's canvas.
///
/// The click is scaled into the backend's picking grid. The ray leaves from
/// the position and orientation of `camera`; image size and field of view
/// come from the backend's pick camera. See [`pick_with_camera`].
pub fn pick<R: Rng>(
    scene: &mut SceneGraph,
    root: NodeId,
    camera: &RayCamera,
    x: f64,
    y: f64,
    mode: BackendMode,
    rng: &mut R,
) -> Result<Option<NodeId>> {
    let grid = RayCamera {
        origin: camera.origin,
        orientation: camera.orientation,
        ..mode.pick_camera()?
    };
    let scale = mode.click_scale();
    pick_with_camera(scene, root, &grid, x / scale, y / scale, rng)
}

/// Pick the nearest leaf under pixel `(x, y)` of `camera`.
///
/// The picked leaf gets a random colour as selection feedback unless it is
/// textured. Returns `None` when nothing is hit.
pub fn pick_with_camera<R: Rng>(
    scene: &mut SceneGraph,
    root: NodeId,
    camera: &RayCamera,
    x: f64,
    y: f64,
    rng: &mut R,
) -> Result<Option<NodeId>> {
    camera.validate()?;
    scene.node(root)?;
    let Some(ray) = camera.make_ray(x, y) else {
        return Ok(None);
    };

    let mut visitor = MouserayVisitor::new();
    let picked = visitor.cast(scene, root, ray).first().map(|h| h.node);
    log::debug!("pick at ({x:.1}, {y:.1}): {} hits", visitor.hits.len());

    let Some(id) = picked else {
        return Ok(None);
    };
    if !scene.node(id)?.kind().is_textured() {
        let color = Color::new(rng.random(), rng.random(), rng.random());
        scene.set_color(id, color)?;
    }
    Ok(Some(id))
}
