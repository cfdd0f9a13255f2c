//! Ray representation and intersection records.

use lumen_math::{normalize3, Vec4};

/// A ray defined by an origin point and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray (`w = 1`).
    pub origin: Vec4,
    /// Unit direction of the ray (`w = 0`).
    pub direction: Vec4,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction is normalized. Returns `None` for a zero-length
    /// direction, which cannot hit anything.
    pub fn new(origin: Vec4, direction: Vec4) -> Option<Self> {
        let direction = normalize3(&direction)?;
        Some(Self {
            origin: Vec4::new(origin.x, origin.y, origin.z, 1.0),
            direction,
        })
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Vec4 {
        self.origin + self.direction * t
    }
}

/// Result of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter along the ray where the intersection occurs.
    pub t: f64,
    /// Intersection point.
    pub point: Vec4,
    /// Unit surface normal at the intersection.
    pub normal: Vec4,
}

impl Intersection {
    /// Create a new intersection.
    pub fn new(t: f64, point: Vec4, normal: Vec4) -> Self {
        Self { t, point, normal }
    }

    /// Whether this hit lies strictly before `other` along the ray.
    #[inline]
    pub fn closer_than(&self, other: &Intersection) -> bool {
        self.t < other.t
    }
}
