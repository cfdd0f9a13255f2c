#![warn(missing_docs)]

//! CPU ray tracing and picking over a lumen scene graph.
//!
//! Primitives are intersected in object space. The visitors carry the
//! accumulated transform of the group they are in and map each ray through
//! its inverse, so the graph never has to be flattened.
//!
//! # Architecture
//!
//! - [`Ray`] / [`Intersection`] - ray and hit records
//! - [`intersect`] - plane, box, sphere, pyramid and mesh intersection
//! - [`phong`] - local illumination
//! - [`RayVisitor`] / [`render`] - one traced ray per pixel
//! - [`MouserayVisitor`] / [`pick`] - click to nearest leaf
//!
//! # Example
//!
//! ```
//! use lumen_math::{direction, point, Color, Transformation};
//! use lumen_raytrace::{render, PhongValues, RayCamera};
//! use lumen_scene::{SceneGraph, SphereNode};
//!
//! let mut sg = SceneGraph::new();
//! let root = sg.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
//! let sphere = sg.insert(SphereNode::new(Color::new(1.0, 0.2, 0.2)));
//! sg.add_child(root, sphere)?;
//!
//! let camera = RayCamera::new(point(0.0, 0.0, 0.0), 64, 64, std::f64::consts::FRAC_PI_4)?;
//! let lights = [point(1.0, 1.0, 1.0)];
//! let image = render(&sg, root, &camera, &lights, &PhongValues::default())?;
//! assert_eq!(image.width(), 64);
//! # Ok::<(), lumen_raytrace::RenderError>(())
//! ```

mod camera;
mod error;
mod framebuffer;
pub mod intersect;
mod phong;
mod pick;
mod ray;
mod render;
mod settings;

pub use camera::{BackendMode, RasterCamera, RayCamera};
pub use error::{RenderError, Result};
pub use framebuffer::{to_rgba8, Framebuffer};
pub use phong::{phong, PhongValues};
pub use pick::{pick, pick_with_camera, MouserayVisitor, PickHit};
pub use ray::{Intersection, Ray};
pub use render::{render, render_with, scene_lights, shade, Hit, RayVisitor, RenderOptions};
pub use settings::RenderSettings;
