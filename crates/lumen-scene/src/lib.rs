#![warn(missing_docs)]

//! Scene graph for the lumen renderer.
//!
//! A scene is a tree of group nodes (a transformation plus ordered
//! children) and leaf nodes (geometry, cameras, lights). Both rendering
//! backends walk the same tree through the [`Visitor`] trait, keeping the
//! accumulated transforms on a [`TransformStack`].
//!
//! # Example
//!
//! ```
//! use lumen_math::{direction, Color, Transformation};
//! use lumen_scene::{SceneGraph, SphereNode};
//!
//! let mut sg = SceneGraph::new();
//! let root = sg.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
//! let sphere = sg.insert(SphereNode::new(Color::new(0.8, 0.4, 0.1)));
//! sg.add_child(root, sphere)?;
//! sg.compose_rotation(root, direction(0.0, 1.0, 0.0), 20.0)?;
//! # Ok::<(), lumen_scene::SceneError>(())
//! ```

pub mod animation;
mod error;
mod graph;
pub mod node;
mod visitor;

pub use animation::{simulate_all, Animation, FrameClock, Motion, RenderMode};
pub use error::{Result, SceneError};
pub use graph::{NodeId, SceneGraph};
pub use node::{
    AABoxNode, CameraNode, CustomShapeNode, GroupNode, LightNode, Node, NodeKind, PyramidNode,
    SphereNode, TextureBoxNode,
};
pub use visitor::{TransformStack, Visitor};
