//! lumen CLI - render, pick and animate demo scenes
//!
//! Scenes are rendered with the CPU ray tracer and written as PNG.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lumen_raytrace::{
    pick, render_with, BackendMode, RasterCamera, RayCamera, RenderOptions, RenderSettings,
};
use lumen_scene::{simulate_all, FrameClock, RenderMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod config;
mod scenes;

use config::{load_settings, save_png, Overrides};
use scenes::{Preset, Scene};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Ray trace and pick scene-graph demo scenes", long_about = None)]
struct Cli {
    /// TOML file with render settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Canvas a click was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// 1000x1000 ray tracing canvas (10x upscaled)
    Ray,
    /// 1000x1000 rasterization canvas (2x upscaled)
    Raster,
}

impl From<Backend> for RenderMode {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Ray => RenderMode::RayTracing,
            Backend::Raster => RenderMode::Rasterization,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene to a PNG file
    Render {
        /// Scene preset
        #[arg(short, long, value_enum, default_value_t = Preset::Box)]
        scene: Preset,
        /// Output PNG
        #[arg(short, long, default_value = "lumen.png")]
        output: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Pick the node under a canvas click and recolour it
    Pick {
        /// Scene preset
        #[arg(short, long, value_enum, default_value_t = Preset::Box)]
        scene: Preset,
        /// Click x in canvas pixels
        x: f64,
        /// Click y in canvas pixels
        y: f64,
        /// Canvas the click was made on
        #[arg(short, long, value_enum, default_value_t = Backend::Ray)]
        backend: Backend,
        /// Seed for the selection colour
        #[arg(long)]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Render the scene after picking to this PNG
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Run the scene's animations and write one PNG per frame
    Animate {
        /// Scene preset
        #[arg(short, long, value_enum, default_value_t = Preset::Textured)]
        scene: Preset,
        /// Number of frames
        #[arg(short = 'n', long, default_value_t = 30)]
        frames: u32,
        /// Milliseconds between frames
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
        /// Switch between ray-traced and raster camera every N frames
        #[arg(long)]
        toggle_every: Option<u32>,
        /// Directory for frame_NNNN.png files
        #[arg(short, long, default_value = "frames")]
        out_dir: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            scene,
            output,
            overrides,
        } => {
            let settings = load_settings(config, &overrides)?;
            let scene = scene.build()?;
            render_to(&scene, &settings, &settings.camera()?, &output)?;
        }
        Commands::Pick {
            scene,
            x,
            y,
            backend,
            seed,
            json,
            output,
            overrides,
        } => {
            let settings = load_settings(config, &overrides)?;
            let mut scene = scene.build()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mode = BackendMode::from(RenderMode::from(backend));
            let view = settings.camera()?;
            let picked = pick(&mut scene.graph, scene.root, &view, x, y, mode, &mut rng)?;
            report_pick(&scene, picked, json)?;
            if let Some(output) = output {
                render_to(&scene, &settings, &settings.camera()?, &output)?;
            }
        }
        Commands::Animate {
            scene,
            frames,
            frame_ms,
            toggle_every,
            out_dir,
            overrides,
        } => {
            let settings = load_settings(config, &overrides)?;
            let scene = scene.build()?;
            animate(scene, &settings, frames, frame_ms, toggle_every, &out_dir)?;
        }
    }

    Ok(())
}

fn render_to(scene: &Scene, settings: &RenderSettings, camera: &RayCamera, output: &Path) -> Result<()> {
    let options = RenderOptions::default().with_background(settings.background);
    let fb = render_with(
        &scene.graph,
        scene.root,
        camera,
        &settings.lights,
        &settings.phong,
        &options,
    )?;
    save_png(fb, output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn report_pick(scene: &Scene, picked: Option<lumen_scene::NodeId>, json: bool) -> Result<()> {
    let details = picked
        .map(|id| -> Result<_> {
            let node = scene.graph.node(id)?;
            Ok((id, node.kind().name(), scene.graph.color(id)?))
        })
        .transpose()?;

    if json {
        let value = match details {
            Some((id, kind, color)) => serde_json::json!({
                "hit": true,
                "node": format!("{id:?}"),
                "kind": kind,
                "color": [color.x, color.y, color.z],
            }),
            None => serde_json::json!({ "hit": false }),
        };
        println!("{}", serde_json::to_string(&value)?);
    } else {
        match details {
            Some((id, kind, color)) => println!(
                "picked {kind} {id:?}, colour now ({:.3}, {:.3}, {:.3})",
                color.x, color.y, color.z
            ),
            None => println!("nothing under the cursor"),
        }
    }
    Ok(())
}

/// Drive the animations with a fixed-step clock and render every frame.
fn animate(
    mut scene: Scene,
    settings: &RenderSettings,
    frames: u32,
    frame_ms: f64,
    toggle_every: Option<u32>,
    out_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let ray_camera = settings.camera()?;
    let raster = RasterCamera {
        eye: settings.origin,
        aspect: f64::from(settings.width) / f64::from(settings.height),
        ..RasterCamera::default()
    };
    let raster_camera = raster.to_ray_camera(settings.width, settings.height)?;

    for animation in &mut scene.animations {
        animation.set_active(true);
    }

    let mut clock = FrameClock::new();
    let mut mode = RenderMode::default();
    for frame in 0..frames {
        if let Some(n) = toggle_every.filter(|n| *n > 0) {
            if frame > 0 && frame % n == 0 {
                mode = mode.toggled();
                log::info!("frame {frame}: switching to {mode:?}");
            }
        }

        let delta = clock.advance(f64::from(frame) * frame_ms);
        simulate_all(&mut scene.animations, &mut scene.graph, delta)?;

        let camera = match mode {
            RenderMode::RayTracing => &ray_camera,
            RenderMode::Rasterization => &raster_camera,
        };
        let path = out_dir.join(format!("frame_{frame:04}.png"));
        render_to(&scene, settings, camera, &path)?;
    }

    log::info!("rendered {frames} frames into {}", out_dir.display());
    Ok(())
}
