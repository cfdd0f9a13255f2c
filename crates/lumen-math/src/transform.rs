//! Affine transforms with exact inverses.
//!
//! Every [`Transform`] carries its matrix together with an inverse that is
//! derived algebraically when the transform is built. Composition multiplies
//! the forward matrices in order and the inverses in reverse order, so the
//! renderer never has to run a numeric inversion in the hot path.

use nalgebra::{Unit, Vector3};

use crate::{normalize3, Mat4, MathError, Quat, Result, Tolerance, Vec4};

/// A 4x4 affine transform paired with its exact inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The forward matrix (object space to parent space).
    pub matrix: Mat4,
    /// The inverse matrix (parent space to object space).
    pub inverse: Mat4,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
            inverse: Mat4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Mat4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        let mut inv = Mat4::identity();
        inv[(0, 3)] = -dx;
        inv[(1, 3)] = -dy;
        inv[(2, 3)] = -dz;
        Self {
            matrix: m,
            inverse: inv,
        }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    ///
    /// Fails if any factor is zero, since the inverse would not exist.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Result<Self> {
        let tol = Tolerance::DEFAULT;
        if tol.is_zero(sx) || tol.is_zero(sy) || tol.is_zero(sz) {
            return Err(MathError::SingularScale([sx, sy, sz]));
        }
        let mut m = Mat4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        let mut inv = Mat4::identity();
        inv[(0, 0)] = 1.0 / sx;
        inv[(1, 1)] = 1.0 / sy;
        inv[(2, 2)] = 1.0 / sz;
        Ok(Self {
            matrix: m,
            inverse: inv,
        })
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula. The inverse is the rotation by
    /// `-angle`, i.e. the transpose.
    pub fn rotation(axis: &Vec4, angle: f64) -> Result<Self> {
        let axis = normalize3(axis).ok_or(MathError::DegenerateAxis)?;
        let matrix = rodrigues(&axis, angle);
        Ok(Self {
            inverse: matrix.transpose(),
            matrix,
        })
    }

    /// Rotation by a unit quaternion.
    pub fn from_quaternion(q: &Quat) -> Self {
        Self {
            matrix: q.to_homogeneous(),
            inverse: q.inverse().to_homogeneous(),
        }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// `other` acts in the local frame established by `self`; the inverse
    /// is `other⁻¹ * self⁻¹`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
            inverse: other.inverse * self.inverse,
        }
    }

    /// Apply the forward matrix to a homogeneous vector.
    #[inline]
    pub fn apply(&self, v: &Vec4) -> Vec4 {
        self.matrix * v
    }

    /// Apply the inverse matrix to a homogeneous vector.
    #[inline]
    pub fn apply_inverse(&self, v: &Vec4) -> Vec4 {
        self.inverse * v
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn rodrigues(axis: &Vec4, angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);
    let mut m = Mat4::identity();
    m[(0, 0)] = t * x * x + c;
    m[(0, 1)] = t * x * y - s * z;
    m[(0, 2)] = t * x * z + s * y;
    m[(1, 0)] = t * x * y + s * z;
    m[(1, 1)] = t * y * y + c;
    m[(1, 2)] = t * y * z - s * x;
    m[(2, 0)] = t * x * z - s * y;
    m[(2, 1)] = t * y * z + s * x;
    m[(2, 2)] = t * z * z + c;
    m
}

/// Scale, rotation (unit quaternion) and translation, applied in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sqt {
    /// Per-axis scale factors in `xyz`.
    pub scale: Vec4,
    /// Rotation applied after scaling.
    pub rotation: Quat,
    /// Translation applied last.
    pub translation: Vec4,
}

impl Sqt {
    /// Build an SQT from its parts.
    pub fn new(scale: Vec4, rotation: Quat, translation: Vec4) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    /// The identity SQT.
    pub fn identity() -> Self {
        Self::new(Vec4::new(1.0, 1.0, 1.0, 0.0), Quat::identity(), Vec4::zeros())
    }

    /// Quaternion rotating by `angle` radians about `axis`.
    pub fn axis_angle(axis: &Vec4, angle: f64) -> Result<Quat> {
        let axis = normalize3(axis).ok_or(MathError::DegenerateAxis)?;
        let unit = Unit::new_unchecked(Vector3::new(axis.x, axis.y, axis.z));
        Ok(Quat::from_axis_angle(&unit, angle))
    }

    /// Matrix `T * R * S` and inverse `S⁻¹ * R⁻¹ * T⁻¹`.
    pub fn transform(&self) -> Result<Transform> {
        let s = Transform::scale(self.scale.x, self.scale.y, self.scale.z)?;
        let r = Transform::from_quaternion(&self.rotation);
        let t = Transform::translation(self.translation.x, self.translation.y, self.translation.z);
        Ok(t.then(&r).then(&s))
    }
}

impl Default for Sqt {
    fn default() -> Self {
        Self::identity()
    }
}

/// The variant and parameters of the most recent step of a [`Transformation`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransformKind {
    /// Translation by `offset`.
    Translation {
        /// Offset in `xyz`.
        offset: Vec4,
    },
    /// Rotation about `axis` by `angle` radians.
    Rotation {
        /// Rotation axis (unit length).
        axis: Vec4,
        /// Angle in radians.
        angle: f64,
    },
    /// Per-axis scaling.
    Scaling {
        /// Scale factors in `xyz`.
        factors: Vec4,
    },
    /// Scale, quaternion rotation, translation.
    Sqt(Sqt),
}

/// A transformation attached to a group node.
///
/// Holds the parameters of its own kind plus the accumulated [`Transform`].
/// A freshly built transformation's matrix is regenerated from its kind;
/// after [`Transformation::then`] the matrix also contains everything that
/// was composed before it, while `kind` describes the last step only.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    kind: TransformKind,
    transform: Transform,
}

impl Transformation {
    /// The identity (zero translation).
    pub fn identity() -> Self {
        Self::translation(Vec4::zeros())
    }

    /// Translation by the `xyz` part of `offset`.
    pub fn translation(offset: Vec4) -> Self {
        let offset = Vec4::new(offset.x, offset.y, offset.z, 0.0);
        Self {
            transform: Transform::translation(offset.x, offset.y, offset.z),
            kind: TransformKind::Translation { offset },
        }
    }

    /// Rotation about `axis` by `angle` radians.
    pub fn rotation(axis: Vec4, angle: f64) -> Result<Self> {
        let transform = Transform::rotation(&axis, angle)?;
        let axis = normalize3(&axis).ok_or(MathError::DegenerateAxis)?;
        Ok(Self {
            kind: TransformKind::Rotation { axis, angle },
            transform,
        })
    }

    /// Per-axis scaling by the `xyz` part of `factors`.
    pub fn scaling(factors: Vec4) -> Result<Self> {
        let factors = Vec4::new(factors.x, factors.y, factors.z, 0.0);
        Ok(Self {
            transform: Transform::scale(factors.x, factors.y, factors.z)?,
            kind: TransformKind::Scaling { factors },
        })
    }

    /// Scale-quaternion-translate transformation.
    pub fn sqt(sqt: Sqt) -> Result<Self> {
        Ok(Self {
            transform: sqt.transform()?,
            kind: TransformKind::Sqt(sqt),
        })
    }

    /// Post-compose `next` onto `self`.
    ///
    /// The result's matrix is `self.matrix * next.matrix` and its inverse is
    /// `next.inverse * self.inverse`; its kind is that of `next`.
    pub fn then(&self, next: Transformation) -> Self {
        Self {
            transform: self.transform.then(&next.transform),
            kind: next.kind,
        }
    }

    /// The kind of the last step.
    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    /// The matrix/inverse pair.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The forward matrix.
    pub fn matrix(&self) -> &Mat4 {
        &self.transform.matrix
    }

    /// The inverse matrix.
    pub fn inverse_matrix(&self) -> &Mat4 {
        &self.transform.inverse
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{direction, point};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn round_trips(t: &Transform) {
        for p in [
            point(0.0, 0.0, 0.0),
            point(1.0, -2.0, 3.5),
            point(-7.0, 0.25, 11.0),
        ] {
            let back = t.apply_inverse(&t.apply(&p));
            assert!((back - p).norm() < 1e-9, "{back:?} != {p:?}");
        }
        assert_relative_eq!(t.matrix * t.inverse, Mat4::identity(), epsilon = 1e-9);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = t.apply(&point(1.0, 2.0, 3.0));
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
        // directions are unaffected
        let d = t.apply(&direction(1.0, 0.0, 0.0));
        assert!((d - direction(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_about_z() {
        let t = Transform::rotation(&direction(0.0, 0.0, 1.0), PI / 2.0).unwrap();
        let result = t.apply(&point(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_diagonal() {
        // 180° about (1,1,0) swaps x and y
        let t = Transform::rotation(&direction(1.0, 1.0, 0.0), PI).unwrap();
        let r = t.apply(&point(1.0, 0.0, 0.0));
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
        assert!(r.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_zero_axis() {
        assert_eq!(
            Transform::rotation(&direction(0.0, 0.0, 0.0), 1.0),
            Err(MathError::DegenerateAxis)
        );
    }

    #[test]
    fn test_scale_zero_factor() {
        assert!(matches!(
            Transform::scale(1.0, 0.0, 1.0),
            Err(MathError::SingularScale(_))
        ));
    }

    #[test]
    fn test_round_trip_all_variants() {
        round_trips(Transformation::translation(direction(1.0, -2.0, 3.0)).transform());
        round_trips(
            Transformation::rotation(direction(1.0, 2.0, 3.0), 0.7)
                .unwrap()
                .transform(),
        );
        round_trips(
            Transformation::scaling(direction(2.0, 0.5, 4.0))
                .unwrap()
                .transform(),
        );
        let q = Sqt::axis_angle(&direction(0.0, 1.0, 1.0), 1.2).unwrap();
        let sqt = Sqt::new(direction(1.5, 2.0, 0.5), q, direction(3.0, 0.0, -1.0));
        round_trips(Transformation::sqt(sqt).unwrap().transform());
    }

    #[test]
    fn test_round_trip_after_composition() {
        let translate = Transformation::translation(direction(0.0, 0.0, -5.0));
        let rotated = translate.then(
            Transformation::rotation(direction(0.0, 1.0, 0.0), 20f64.to_radians()).unwrap(),
        );
        let scaled = rotated.then(Transformation::scaling(direction(1.1, 1.0, 0.9)).unwrap());
        round_trips(rotated.transform());
        round_trips(scaled.transform());
        assert!(matches!(scaled.kind(), TransformKind::Scaling { .. }));
    }

    #[test]
    fn test_compose_order() {
        // translate, then scale in the translated frame:
        // origin stays at the translation, (1,0,0) lands at 1 + 2
        let t = Transformation::translation(direction(1.0, 0.0, 0.0))
            .then(Transformation::scaling(direction(2.0, 2.0, 2.0)).unwrap());
        let o = t.transform().apply(&point(0.0, 0.0, 0.0));
        assert!((o.x - 1.0).abs() < 1e-12);
        let p = t.transform().apply(&point(1.0, 0.0, 0.0));
        assert!((p.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqt_order() {
        let q = Sqt::axis_angle(&direction(0.0, 0.0, 1.0), PI / 2.0).unwrap();
        let sqt = Sqt::new(direction(2.0, 2.0, 2.0), q, direction(0.0, 0.0, 1.0));
        let t = sqt.transform().unwrap();
        // scale (1,0,0) -> (2,0,0), rotate -> (0,2,0), translate -> (0,2,1)
        let p = t.apply(&point(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
    }
}
