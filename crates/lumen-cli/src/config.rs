//! Render settings from TOML plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use lumen_math::point;
use lumen_raytrace::{Framebuffer, RenderSettings};

/// Settings that can be overridden on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,
    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,
    /// Horizontal field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,
    /// Light position as x,y,z (repeatable, replaces configured lights)
    #[arg(long = "light", value_parser = parse_xyz)]
    pub lights: Vec<[f64; 3]>,
    /// Specular exponent
    #[arg(long)]
    pub shininess: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(fov) = self.fov {
            settings.alpha = fov.to_radians();
        }
        if !self.lights.is_empty() {
            settings.lights = self.lights.iter().map(|[x, y, z]| point(*x, *y, *z)).collect();
        }
        if let Some(shininess) = self.shininess {
            settings.phong.shininess = shininess;
        }
    }
}

fn parse_xyz(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!("expected x,y,z but got {} values", parts.len())),
    }
}

/// Read settings from `path` if given, apply overrides and validate.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<RenderSettings> {
    let mut settings = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RenderSettings::default(),
    };
    overrides.apply(&mut settings);
    settings.validate().context("invalid render settings")?;
    log::debug!("render settings: {settings:?}");
    Ok(settings)
}

/// Encode a framebuffer as PNG.
pub fn save_png(fb: Framebuffer, path: &Path) -> Result<()> {
    let (width, height) = (fb.width(), fb.height());
    let image = image::RgbaImage::from_raw(width, height, fb.into_bytes())
        .context("framebuffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xyz() {
        assert_eq!(parse_xyz("1, 2.5,-3").unwrap(), [1.0, 2.5, -3.0]);
        assert!(parse_xyz("1,2").is_err());
        assert!(parse_xyz("a,b,c").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut settings = RenderSettings::default();
        let overrides = Overrides {
            width: Some(320),
            fov: Some(90.0),
            lights: vec![[0.0, 10.0, 0.0]],
            ..Overrides::default()
        };
        overrides.apply(&mut settings);
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 100);
        assert!((settings.alpha - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(settings.lights, vec![point(0.0, 10.0, 0.0)]);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("lumen-config-{}.toml", std::process::id()));
        fs::write(&path, "width = 40\nheight = 30\n[phong]\nambient = 0.5\n").unwrap();
        let settings = load_settings(Some(&path), &Overrides::default()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!((settings.width, settings.height), (40, 30));
        assert_eq!(settings.phong.ambient, 0.5);
        assert_eq!(settings.phong.diffuse, 0.6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let overrides = Overrides {
            width: Some(0),
            ..Overrides::default()
        };
        assert!(load_settings(None, &overrides).is_err());
    }
}
