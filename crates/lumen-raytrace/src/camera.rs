//! Cameras that turn pixel coordinates into world-space rays.

use std::f64::consts::FRAC_PI_4;

use lumen_math::{cross3, direction, normalize3, point, Mat4, Vec4};
use lumen_scene::RenderMode;
use serde::{Deserialize, Serialize};

use crate::{Ray, RenderError, Result};

/// Pinhole camera for the ray backend.
///
/// In camera space the eye sits at the origin looking down `-z` with `+y`
/// up. `orientation` rotates camera-space directions into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCamera {
    /// Eye position in world space.
    pub origin: Vec4,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Horizontal field of view in radians.
    pub alpha: f64,
    /// Camera-to-world rotation.
    pub orientation: Mat4,
}

impl RayCamera {
    /// Axis-aligned camera at `origin`.
    pub fn new(origin: Vec4, width: u32, height: u32, alpha: f64) -> Result<Self> {
        let camera = Self {
            origin,
            width,
            height,
            alpha,
            orientation: Mat4::identity(),
        };
        camera.validate()?;
        Ok(camera)
    }

    /// Replace the camera-to-world rotation.
    pub fn with_orientation(mut self, orientation: Mat4) -> Self {
        self.orientation = orientation;
        self
    }

    /// Reject empty images and fields of view outside `(0, π)`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::ZeroSizedViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.alpha > 0.0 && self.alpha < std::f64::consts::PI) {
            return Err(RenderError::InvalidFieldOfView(self.alpha));
        }
        Ok(())
    }

    /// Ray through pixel `(x, y)`, with `(0, 0)` the top-left pixel.
    ///
    /// Fractional coordinates are allowed; picking scales click positions
    /// down into the camera's pixel grid.
    pub fn make_ray(&self, x: f64, y: f64) -> Option<Ray> {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let local = direction(
            x - (w - 1.0) / 2.0,
            (h - 1.0) / 2.0 - y,
            -(w / 2.0) / (self.alpha / 2.0).tan(),
        );
        Ray::new(self.origin, self.orientation * local)
    }
}

/// Look-at camera as used by the rasterization backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterCamera {
    /// Eye position.
    pub eye: Vec4,
    /// Point looked at.
    pub center: Vec4,
    /// Up hint.
    pub up: Vec4,
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Width over height.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Default for RasterCamera {
    fn default() -> Self {
        Self {
            eye: point(0.0, 0.0, 0.0),
            center: point(0.0, 0.0, -1.0),
            up: direction(0.0, 1.0, 0.0),
            fovy: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RasterCamera {
    /// Camera-to-world rotation from the look-at basis.
    ///
    /// Returns `None` if `center == eye` or `up` is parallel to the view
    /// direction.
    pub fn orientation(&self) -> Option<Mat4> {
        let forward = normalize3(&(self.center - self.eye))?;
        let right = normalize3(&cross3(&forward, &self.up))?;
        let up = cross3(&right, &forward);
        let back = -forward;
        Some(Mat4::from_columns(&[right, up, back, Vec4::new(0.0, 0.0, 0.0, 1.0)]))
    }

    /// Equivalent ray camera rendering `width × height` pixels.
    ///
    /// The vertical field of view is converted to the horizontal one
    /// through the aspect ratio.
    pub fn to_ray_camera(&self, width: u32, height: u32) -> Result<RayCamera> {
        let fovy = self.fovy.to_radians();
        let alpha = 2.0 * ((fovy / 2.0).tan() * self.aspect).atan();
        let orientation = self.orientation().ok_or(RenderError::DegenerateCamera)?;
        Ok(RayCamera::new(self.eye, width, height, alpha)?.with_orientation(orientation))
    }
}

/// Which backend a click was made on.
///
/// The two backends show the scene at different resolutions, so a click
/// position is scaled into a smaller picking grid before casting the ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendMode {
    /// GPU rasterization canvas.
    Rasterization,
    /// CPU ray tracing canvas.
    #[default]
    RayTracing,
}

impl BackendMode {
    /// Divisor applied to click coordinates.
    pub fn click_scale(self) -> f64 {
        match self {
            BackendMode::Rasterization => 2.0,
            BackendMode::RayTracing => 10.0,
        }
    }

    /// The fixed camera used to pick on this backend.
    pub fn pick_camera(self) -> Result<RayCamera> {
        let origin = point(0.0, 0.0, 0.0);
        match self {
            BackendMode::Rasterization => RayCamera::new(origin, 500, 500, 60f64.to_radians()),
            BackendMode::RayTracing => RayCamera::new(origin, 100, 100, FRAC_PI_4),
        }
    }
}

impl From<RenderMode> for BackendMode {
    fn from(mode: RenderMode) -> Self {
        match mode {
            RenderMode::RayTracing => BackendMode::RayTracing,
            RenderMode::Rasterization => BackendMode::Rasterization,
        }
    }
}
