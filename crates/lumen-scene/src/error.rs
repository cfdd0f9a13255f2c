//! Error types for scene graph construction and mutation.

use lumen_math::MathError;
use thiserror::Error;

use crate::NodeId;

/// Errors that can occur while building or mutating a scene graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The node id does not refer to a node of this graph.
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),

    /// The child already belongs to another group.
    #[error("node {0:?} already has a parent")]
    AlreadyParented(NodeId),

    /// Attaching the child would close a cycle.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },

    /// The operation needs a group node.
    #[error("node {0:?} is not a group")]
    NotAGroup(NodeId),

    /// The node variant carries no colour.
    #[error("node {0:?} has no colour")]
    NoColor(NodeId),

    /// Custom mesh data is malformed.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Building a transformation failed.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
