//! Ray-traced rendering of a scene graph.
//!
//! For every pixel one camera ray is traced through the whole tree. There
//! is no acceleration structure: each leaf is intersected in its own
//! object space and the nearest world-space hit wins.

use lumen_math::{normalize3, Color, Vec4};
use lumen_scene::{
    AABoxNode, CustomShapeNode, GroupNode, LightNode, NodeId, PyramidNode, SceneGraph,
    SphereNode, TextureBoxNode, TransformStack, Visitor,
};

use crate::intersect::{intersect_in_world, Shape};
use crate::{phong, Framebuffer, Intersection, PhongValues, Ray, RayCamera, Result};

/// Nearest hit found so far during a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// World-space intersection.
    pub intersection: Intersection,
    /// Surface colour of the hit leaf.
    pub color: Color,
    /// The hit leaf.
    pub node: NodeId,
}

/// Visitor that traces one ray at a time and keeps the nearest hit.
#[derive(Debug)]
pub struct RayVisitor {
    stack: TransformStack,
    ray: Option<Ray>,
    best: Option<Hit>,
}

impl RayVisitor {
    /// A visitor with no ray and an identity-seeded stack.
    pub fn new() -> Self {
        Self {
            stack: TransformStack::new(),
            ray: None,
            best: None,
        }
    }

    /// Trace `ray` through the subtree at `root` and return the nearest hit.
    ///
    /// The transform stack and best hit are reset first, so nothing from a
    /// previous trace leaks into this one.
    pub fn trace(&mut self, scene: &SceneGraph, root: NodeId, ray: Ray) -> Option<Hit> {
        self.stack.reset();
        self.best = None;
        self.ray = Some(ray);
        scene.accept(root, self);
        self.ray = None;
        self.best.take()
    }

    fn consider(&mut self, id: NodeId, shape: Shape<'_>, color: Color) {
        let Some(ray) = self.ray else {
            return;
        };
        let Some(intersection) = intersect_in_world(&shape, &ray, &self.stack.current()) else {
            return;
        };
        if self
            .best
            .as_ref()
            .map_or(true, |b| intersection.closer_than(&b.intersection))
        {
            self.best = Some(Hit {
                intersection,
                color,
                node: id,
            });
        }
    }
}

impl Default for RayVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for RayVisitor {
    fn visit_group(&mut self, scene: &SceneGraph, id: NodeId, group: &GroupNode) {
        self.stack.push(group.transformation.transform());
        scene.visit_children(id, self);
        self.stack.pop();
    }

    fn visit_sphere(&mut self, id: NodeId, node: &SphereNode) {
        self.consider(id, node.into(), node.color);
    }

    fn visit_aabox(&mut self, id: NodeId, node: &AABoxNode) {
        self.consider(id, node.into(), node.color);
    }

    fn visit_texture_box(&mut self, id: NodeId, node: &TextureBoxNode) {
        self.consider(id, node.into(), node.color);
    }

    fn visit_pyramid(&mut self, id: NodeId, node: &PyramidNode) {
        self.consider(id, node.into(), node.color);
    }

    fn visit_custom_shape(&mut self, id: NodeId, node: &CustomShapeNode) {
        self.consider(id, node.into(), node.color);
    }
}

/// Visitor that gathers the world-space positions of light leaves.
#[derive(Debug, Default)]
struct LightCollector {
    stack: TransformStack,
    positions: Vec<Vec4>,
}

impl Visitor for LightCollector {
    fn visit_group(&mut self, scene: &SceneGraph, id: NodeId, group: &GroupNode) {
        self.stack.push(group.transformation.transform());
        scene.visit_children(id, self);
        self.stack.pop();
    }

    fn visit_sphere(&mut self, _id: NodeId, _node: &SphereNode) {}
    fn visit_aabox(&mut self, _id: NodeId, _node: &AABoxNode) {}
    fn visit_texture_box(&mut self, _id: NodeId, _node: &TextureBoxNode) {}
    fn visit_pyramid(&mut self, _id: NodeId, _node: &PyramidNode) {}
    fn visit_custom_shape(&mut self, _id: NodeId, _node: &CustomShapeNode) {}

    fn visit_light(&mut self, _id: NodeId, node: &LightNode) {
        self.positions.push(self.stack.current().apply(&node.position));
    }
}

/// World-space positions of every light leaf under `root`, in traversal order.
pub fn scene_lights(scene: &SceneGraph, root: NodeId) -> Vec<Vec4> {
    let mut collector = LightCollector::default();
    scene.accept(root, &mut collector);
    collector.positions
}

/// Render options beyond camera, lights and material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Colour of pixels whose ray hits nothing.
    pub background: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::zeros(),
        }
    }
}

impl RenderOptions {
    /// Use `background` for missed pixels.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Shade a hit seen from `eye`.
pub fn shade(hit: &Hit, eye: &Vec4, lights: &[Vec4], values: &PhongValues) -> Color {
    let view_dir = normalize3(&(eye - hit.intersection.point)).unwrap_or(-hit.intersection.normal);
    phong(&hit.color, &hit.intersection, &view_dir, lights, values)
}

/// Render the subtree at `root` with the default options.
pub fn render(
    scene: &SceneGraph,
    root: NodeId,
    camera: &RayCamera,
    lights: &[Vec4],
    values: &PhongValues,
) -> Result<Framebuffer> {
    render_with(scene, root, camera, lights, values, &RenderOptions::default())
}

/// Render the subtree at `root` into a new framebuffer.
///
/// Light leaves in the scene shine alongside the explicit `lights`.
///
/// Fails only on invalid input (empty viewport, bad field of view, bad
/// Phong values or a missing root); misses and degenerate rays become
/// background pixels.
pub fn render_with(
    scene: &SceneGraph,
    root: NodeId,
    camera: &RayCamera,
    lights: &[Vec4],
    values: &PhongValues,
    options: &RenderOptions,
) -> Result<Framebuffer> {
    camera.validate()?;
    values.validate()?;
    scene.node(root)?;

    let mut all_lights = lights.to_vec();
    all_lights.extend(scene_lights(scene, root));
    log::debug!(
        "rendering {}x{} over {} nodes with {} lights ({} from the scene)",
        camera.width,
        camera.height,
        scene.len(),
        all_lights.len(),
        all_lights.len() - lights.len()
    );

    let mut fb = Framebuffer::new(camera.width, camera.height);
    let mut visitor = RayVisitor::new();
    let mut hits = 0usize;

    for y in 0..camera.height {
        for x in 0..camera.width {
            let hit = camera
                .make_ray(f64::from(x), f64::from(y))
                .and_then(|ray| visitor.trace(scene, root, ray));
            let color = match hit {
                Some(hit) => {
                    hits += 1;
                    shade(&hit, &camera.origin, &all_lights, values)
                }
                None => options.background,
            };
            fb.set_pixel(x, y, &color);
        }
    }

    log::debug!("{hits} of {} pixels hit geometry", u64::from(camera.width) * u64::from(camera.height));
    Ok(fb)
}
