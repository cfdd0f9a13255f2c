#![warn(missing_docs)]

//! Math types for the lumen renderer.
//!
//! Thin wrappers around nalgebra providing the homogeneous vector kernel
//! shared by the scene graph and both rendering backends: 4-component
//! points and directions, 4x4 matrices, transforms that carry their exact
//! inverse, and tolerance constants.
//!
//! Points carry `w = 1`, directions carry `w = 0`. Every geometric helper
//! in this crate works on the `xyz` part and reports degenerate input
//! (zero-length vectors) through `Option` instead of producing NaNs.

mod error;
mod transform;

pub use error::{MathError, Result};
pub use transform::{Sqt, Transform, TransformKind, Transformation};

use nalgebra::{Matrix4, UnitQuaternion, Vector3, Vector4};

/// A homogeneous 4-component vector (point when `w = 1`, direction when `w = 0`).
pub type Vec4 = Vector4<f64>;

/// A 4x4 matrix acting on [`Vec4`] column vectors.
pub type Mat4 = Matrix4<f64>;

/// An RGB colour with components nominally in `[0, 1]`.
pub type Color = Vector3<f64>;

/// A unit quaternion used for the rotation part of an [`Sqt`].
pub type Quat = UnitQuaternion<f64>;

/// A point at `(x, y, z)` with `w = 1`.
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// A direction `(x, y, z)` with `w = 0`.
#[inline]
pub fn direction(x: f64, y: f64, z: f64) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

/// Dot product of the `xyz` parts.
#[inline]
pub fn dot3(a: &Vec4, b: &Vec4) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Cross product of the `xyz` parts, returned as a direction.
#[inline]
pub fn cross3(a: &Vec4, b: &Vec4) -> Vec4 {
    direction(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Euclidean length of the `xyz` part.
#[inline]
pub fn length3(v: &Vec4) -> f64 {
    dot3(v, v).sqrt()
}

/// Normalize the `xyz` part into a unit direction.
///
/// Returns `None` for (near) zero-length input, which has no direction.
pub fn normalize3(v: &Vec4) -> Option<Vec4> {
    let len = length3(v);
    if len < Tolerance::DEFAULT.degenerate {
        return None;
    }
    Some(direction(v.x / len, v.y / len, v.z / len))
}

/// Reflect direction `d` about unit normal `n`: `2 (n·d) n - d`.
#[inline]
pub fn reflect3(d: &Vec4, n: &Vec4) -> Vec4 {
    let k = 2.0 * dot3(n, d);
    direction(k * n.x - d.x, k * n.y - d.y, k * n.z - d.z)
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Distance under which two points coincide.
    pub linear: f64,
    /// Magnitude under which a length or denominator counts as zero.
    pub degenerate: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-12 degenerate).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        degenerate: 1e-12,
    };

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.degenerate
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
