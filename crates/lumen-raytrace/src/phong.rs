//! Phong local illumination.

use lumen_math::{dot3, normalize3, reflect3, Color, Vec4};
use serde::{Deserialize, Serialize};

use crate::{Intersection, RenderError, Result};

/// Phong material coefficients shared by every surface in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongValues {
    /// Ambient coefficient.
    pub ambient: f64,
    /// Diffuse coefficient.
    pub diffuse: f64,
    /// Specular coefficient.
    pub specular: f64,
    /// Specular exponent.
    pub shininess: f64,
}

impl Default for PhongValues {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            diffuse: 0.6,
            specular: 0.7,
            shininess: 16.0,
        }
    }
}

impl PhongValues {
    /// Reject negative or non-finite coefficients.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("shininess", self.shininess),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::InvalidPhong(format!("{name} = {value}")));
            }
        }
        Ok(())
    }
}

/// Shade a hit with the Phong model.
///
/// Ambient is `ambient * color`, added once. Each light adds a diffuse term
/// tinted by the surface colour and a white specular highlight, with no
/// distance falloff. `view_dir` points from the hit toward the eye. The sum
/// is clamped to `[0, 1]` per channel.
pub fn phong(
    color: &Color,
    hit: &Intersection,
    view_dir: &Vec4,
    lights: &[Vec4],
    values: &PhongValues,
) -> Color {
    let n = &hit.normal;
    let mut out = color * values.ambient;

    for light in lights {
        let Some(l) = normalize3(&(light - hit.point)) else {
            // light sits on the surface
            continue;
        };
        let n_dot_l = dot3(n, &l).max(0.0);
        out += color * (values.diffuse * n_dot_l);

        let r = reflect3(&l, n);
        let r_dot_v = dot3(&r, view_dir).max(0.0);
        let spec = values.specular * r_dot_v.powf(values.shininess);
        out += Color::new(spec, spec, spec);
    }

    out.map(|c| c.clamp(0.0, 1.0))
}
