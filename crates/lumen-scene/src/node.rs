//! Node variants of the scene graph.
//!
//! Leaf geometry is stored in object space. The defaults reproduce the
//! unit primitives both backends were built around: a unit sphere at the
//! origin, a box spanning `-0.5..0.5`, and a pyramid standing on `y = 0`
//! with its apex at `(0, 1, 0)`.

use lumen_math::{direction, point, Color, Transformation, Vec4};

use crate::{NodeId, Result, SceneError};

/// Colour given to leaves that are built without one.
pub const DEFAULT_COLOR: Color = Color::new(0.8, 0.8, 0.8);

/// A composite node: one transformation and an ordered list of children.
#[derive(Debug, Clone)]
pub struct GroupNode {
    /// Transformation from this group's frame into its parent's frame.
    pub transformation: Transformation,
    pub(crate) children: Vec<NodeId>,
}

impl GroupNode {
    /// A group with no children.
    pub fn new(transformation: Transformation) -> Self {
        Self {
            transformation,
            children: Vec::new(),
        }
    }

    /// Children in traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A sphere leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereNode {
    /// Center in object space.
    pub center: Vec4,
    /// Radius.
    pub radius: f64,
    /// Surface colour.
    pub color: Color,
}

impl SphereNode {
    /// Unit sphere at the origin with the given colour.
    pub fn new(color: Color) -> Self {
        Self {
            center: point(0.0, 0.0, 0.0),
            radius: 1.0,
            color,
        }
    }
}

impl Default for SphereNode {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

/// An axis-aligned box leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct AABoxNode {
    /// Minimum corner.
    pub min: Vec4,
    /// Maximum corner.
    pub max: Vec4,
    /// Surface colour.
    pub color: Color,
}

impl AABoxNode {
    /// Unit box centered on the origin with the given colour.
    pub fn new(color: Color) -> Self {
        Self {
            min: point(-0.5, -0.5, -0.5),
            max: point(0.5, 0.5, 0.5),
            color,
        }
    }
}

impl Default for AABoxNode {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

/// A textured axis-aligned box.
///
/// The texture name is an opaque handle resolved by the rasterization
/// backend. The ray backend shades the box with `color`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBoxNode {
    /// Minimum corner.
    pub min: Vec4,
    /// Maximum corner.
    pub max: Vec4,
    /// Texture handle.
    pub texture: String,
    /// Colour used where the texture is not available.
    pub color: Color,
}

impl TextureBoxNode {
    /// Unit box carrying the given texture handle.
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            min: point(-0.5, -0.5, -0.5),
            max: point(0.5, 0.5, 0.5),
            texture: texture.into(),
            color: DEFAULT_COLOR,
        }
    }
}

/// A pyramid with a quadrilateral base and one apex.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidNode {
    /// Base corners in order around the base.
    pub base: [Vec4; 4],
    /// Apex.
    pub apex: Vec4,
    /// Surface colour.
    pub color: Color,
}

impl PyramidNode {
    /// Unit pyramid with the given colour.
    pub fn new(color: Color) -> Self {
        Self {
            base: [
                point(-0.5, 0.0, 0.5),
                point(0.5, 0.0, 0.5),
                point(0.5, 0.0, -0.5),
                point(-0.5, 0.0, -0.5),
            ],
            apex: point(0.0, 1.0, 0.0),
            color,
        }
    }
}

impl Default for PyramidNode {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

/// An arbitrary indexed triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomShapeNode {
    vertices: Vec<Vec4>,
    indices: Vec<usize>,
    /// Surface colour.
    pub color: Color,
}

impl CustomShapeNode {
    /// Build a mesh, rejecting index lists that do not form whole triangles
    /// or that point past the vertex list.
    pub fn new(vertices: Vec<Vec4>, indices: Vec<usize>, color: Color) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(SceneError::InvalidMesh(format!(
                "{} indices do not form whole triangles",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= vertices.len()) {
            return Err(SceneError::InvalidMesh(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            indices,
            color,
        })
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }
}

/// A camera placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraNode {
    /// Eye position.
    pub eye: Vec4,
    /// Point looked at.
    pub center: Vec4,
    /// Up direction.
    pub up: Vec4,
}

impl Default for CameraNode {
    fn default() -> Self {
        Self {
            eye: point(0.0, 0.0, 0.0),
            center: point(0.0, 0.0, -1.0),
            up: direction(0.0, 1.0, 0.0),
        }
    }
}

/// A point light placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LightNode {
    /// Light position.
    pub position: Vec4,
    /// Light colour.
    pub color: Color,
}

impl LightNode {
    /// White light at `position`.
    pub fn new(position: Vec4) -> Self {
        Self {
            position,
            color: Color::new(1.0, 1.0, 1.0),
        }
    }
}

/// The closed set of node variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Composite node.
    Group(GroupNode),
    /// Sphere leaf.
    Sphere(SphereNode),
    /// Axis-aligned box leaf.
    AABox(AABoxNode),
    /// Textured box leaf.
    TextureBox(TextureBoxNode),
    /// Pyramid leaf.
    Pyramid(PyramidNode),
    /// Indexed mesh leaf.
    CustomShape(CustomShapeNode),
    /// Camera leaf.
    Camera(CameraNode),
    /// Light leaf.
    Light(LightNode),
}

impl NodeKind {
    /// Short lowercase name of the variant, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Group(_) => "group",
            NodeKind::Sphere(_) => "sphere",
            NodeKind::AABox(_) => "aabox",
            NodeKind::TextureBox(_) => "texture-box",
            NodeKind::Pyramid(_) => "pyramid",
            NodeKind::CustomShape(_) => "custom-shape",
            NodeKind::Camera(_) => "camera",
            NodeKind::Light(_) => "light",
        }
    }

    /// The surface colour of a geometry leaf.
    pub fn color(&self) -> Option<Color> {
        match self {
            NodeKind::Sphere(n) => Some(n.color),
            NodeKind::AABox(n) => Some(n.color),
            NodeKind::TextureBox(n) => Some(n.color),
            NodeKind::Pyramid(n) => Some(n.color),
            NodeKind::CustomShape(n) => Some(n.color),
            NodeKind::Group(_) | NodeKind::Camera(_) | NodeKind::Light(_) => None,
        }
    }

    pub(crate) fn color_mut(&mut self) -> Option<&mut Color> {
        match self {
            NodeKind::Sphere(n) => Some(&mut n.color),
            NodeKind::AABox(n) => Some(&mut n.color),
            NodeKind::TextureBox(n) => Some(&mut n.color),
            NodeKind::Pyramid(n) => Some(&mut n.color),
            NodeKind::CustomShape(n) => Some(&mut n.color),
            NodeKind::Group(_) | NodeKind::Camera(_) | NodeKind::Light(_) => None,
        }
    }

    /// Whether the leaf is texture-mapped.
    pub fn is_textured(&self) -> bool {
        matches!(self, NodeKind::TextureBox(_))
    }
}

macro_rules! impl_from_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for NodeKind {
                fn from(node: $ty) -> Self {
                    NodeKind::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    GroupNode => Group,
    SphereNode => Sphere,
    AABoxNode => AABox,
    TextureBoxNode => TextureBox,
    PyramidNode => Pyramid,
    CustomShapeNode => CustomShape,
    CameraNode => Camera,
    LightNode => Light,
}

/// A node stored in the graph: its variant plus its parent link.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// The node's variant and data.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The owning group, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
