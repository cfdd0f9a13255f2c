//! Error types for rendering and picking.

use lumen_scene::SceneError;
use thiserror::Error;

/// Errors that can occur before a render or pick starts.
///
/// Misses and degenerate rays are not errors; they resolve to "no hit".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Image or camera has zero width or height.
    #[error("viewport {width}x{height} has no pixels")]
    ZeroSizedViewport {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Field of view outside `(0, π)`.
    #[error("field of view {0} rad is outside (0, π)")]
    InvalidFieldOfView(f64),

    /// Look-at camera whose eye, center and up do not span a basis.
    #[error("camera basis is degenerate")]
    DegenerateCamera,

    /// Phong coefficients are out of range.
    #[error("invalid phong values: {0}")]
    InvalidPhong(String),

    /// The scene graph rejected an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
