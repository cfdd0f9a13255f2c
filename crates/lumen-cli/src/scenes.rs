//! Built-in demo scenes.

use anyhow::Result;
use clap::ValueEnum;
use lumen_math::{direction, point, Color, Sqt, Transformation};
use lumen_scene::{
    AABoxNode, Animation, CustomShapeNode, NodeId, PyramidNode, SceneGraph, SphereNode,
    TextureBoxNode,
};

/// Scene presets selectable with `--scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// One box pushed back along -z
    Box,
    /// Sphere and textured box under rotation and translation groups
    Textured,
    /// Sphere, box, pyramid and tetrahedron side by side
    Mixed,
}

/// A built scene plus the animations that drive it.
pub struct Scene {
    pub graph: SceneGraph,
    pub root: NodeId,
    pub animations: Vec<Animation>,
}

impl Preset {
    pub fn build(self) -> Result<Scene> {
        match self {
            Preset::Box => single_box(),
            Preset::Textured => textured(),
            Preset::Mixed => mixed(),
        }
    }
}

fn single_box() -> Result<Scene> {
    let mut graph = SceneGraph::new();
    let root = graph.create_group(Transformation::identity());
    let moved = graph.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
    graph.add_child(root, moved)?;
    let cube = graph.insert(AABoxNode::new(Color::new(0.5, 0.0, 0.0)));
    graph.add_child(moved, cube)?;

    let animations = vec![Animation::rotation(moved, direction(0.0, 1.0, 0.0), None)];
    Ok(Scene {
        graph,
        root,
        animations,
    })
}

fn textured() -> Result<Scene> {
    let mut graph = SceneGraph::new();
    let root = graph.create_group(Transformation::translation(direction(0.0, 0.0, -8.0)));

    let spin = graph.create_group(Transformation::rotation(direction(0.0, 1.0, 0.0), 0.3)?);
    let left = graph.create_group(Transformation::translation(direction(-1.5, 0.0, 0.0)));
    let sphere = graph.insert(SphereNode::new(Color::new(0.1, 0.4, 0.9)));
    graph.add_child(root, spin)?;
    graph.add_child(spin, left)?;
    graph.add_child(left, sphere)?;

    let sqt = Sqt::new(
        direction(1.5, 1.5, 1.5),
        Sqt::axis_angle(&direction(1.0, 1.0, 0.0), 0.0)?,
        direction(1.5, 0.0, 0.0),
    );
    let right = graph.create_group(Transformation::sqt(sqt.clone())?);
    let crate_box = graph.insert(TextureBoxNode::new("crate.png"));
    graph.add_child(root, right)?;
    graph.add_child(right, crate_box)?;

    let from = Sqt::axis_angle(&direction(1.0, 1.0, 0.0), 0.0)?;
    let to = Sqt::axis_angle(&direction(1.0, 1.0, 0.0), std::f64::consts::FRAC_PI_2)?;
    let animations = vec![
        Animation::rotation(spin, direction(0.0, 1.0, 0.0), None),
        Animation::slerp(right, sqt, from, to),
    ];
    Ok(Scene {
        graph,
        root,
        animations,
    })
}

fn mixed() -> Result<Scene> {
    let mut graph = SceneGraph::new();
    let root = graph.create_group(Transformation::translation(direction(0.0, 0.0, -10.0)));

    let slot = |graph: &mut SceneGraph, x: f64, y: f64| -> Result<NodeId> {
        let group = graph.create_group(Transformation::translation(direction(x, y, 0.0)));
        graph.add_child(root, group)?;
        Ok(group)
    };

    let a = slot(&mut graph, -2.0, 1.5)?;
    let sphere = graph.insert(SphereNode::new(Color::new(0.9, 0.2, 0.2)));
    graph.add_child(a, sphere)?;

    let b = slot(&mut graph, 2.0, 1.5)?;
    let cube = graph.insert(AABoxNode::new(Color::new(0.2, 0.8, 0.2)));
    graph.add_child(b, cube)?;

    let c = slot(&mut graph, -2.0, -2.0)?;
    let pyramid = graph.insert(PyramidNode::new(Color::new(0.9, 0.8, 0.1)));
    graph.add_child(c, pyramid)?;

    let d = slot(&mut graph, 2.0, -1.5)?;
    let tetra = graph.insert(CustomShapeNode::new(
        vec![
            point(0.0, 1.0, 0.0),
            point(-0.8, -0.5, 0.5),
            point(0.8, -0.5, 0.5),
            point(0.0, -0.5, -0.8),
        ],
        vec![0, 1, 2, 0, 2, 3, 0, 3, 1, 1, 3, 2],
        Color::new(0.6, 0.3, 0.9),
    )?);
    graph.add_child(d, tetra)?;

    let animations = vec![
        Animation::jumper(a, direction(0.0, 1.0, 0.0), None, false),
        Animation::scaler(b, direction(1.5, 1.5, 1.5), None, false),
        Animation::rotation(c, direction(0.0, 1.0, 0.0), None),
        Animation::driver(d, direction(0.0, 0.0, 2.0), None),
    ];
    Ok(Scene {
        graph,
        root,
        animations,
    })
}
