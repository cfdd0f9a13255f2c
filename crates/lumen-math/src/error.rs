//! Error types for transformation construction.

use thiserror::Error;

/// Errors raised while building a transformation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Rotation axis has zero length.
    #[error("rotation axis has zero length")]
    DegenerateAxis,

    /// A zero scale factor has no inverse.
    #[error("scale factors {0:?} are not invertible")]
    SingularScale([f64; 3]),
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;
