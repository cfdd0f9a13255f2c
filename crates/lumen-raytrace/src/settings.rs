//! Render configuration.

use std::f64::consts::FRAC_PI_4;

use lumen_math::{point, Color, Vec4};
use serde::{Deserialize, Serialize};

use crate::{PhongValues, RayCamera, Result};

/// Everything the ray backend needs besides the scene.
///
/// Missing fields take their defaults, so a config file only has to name
/// what it changes:
///
/// ```toml
/// width = 200
/// height = 200
/// lights = [[1.0, 1.0, 1.0, 1.0]]
///
/// [phong]
/// shininess = 32.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Camera position.
    pub origin: Vec4,
    /// Horizontal field of view in radians.
    pub alpha: f64,
    /// Point light positions.
    pub lights: Vec<Vec4>,
    /// Shading coefficients.
    pub phong: PhongValues,
    /// Colour of pixels whose ray hits nothing.
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            origin: point(0.0, 0.0, 0.0),
            alpha: FRAC_PI_4,
            lights: vec![point(1.0, 1.0, -1.0)],
            phong: PhongValues::default(),
            background: Color::new(0.0, 0.0, 0.0),
        }
    }
}

impl RenderSettings {
    /// Check image size, field of view and Phong coefficients.
    pub fn validate(&self) -> Result<()> {
        self.camera().map(|_| ())
    }

    /// The camera these settings describe.
    pub fn camera(&self) -> Result<RayCamera> {
        self.phong.validate()?;
        RayCamera::new(self.origin, self.width, self.height, self.alpha)
    }
}
