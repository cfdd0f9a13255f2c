//! Per-frame animation of group transforms.
//!
//! Animations only touch the scene through the transform-update contract
//! (`compose_*` and `set_transform`), between traversals. Frame timing is
//! carried by an explicit [`FrameClock`] owned by the host loop.

use log::debug;
use lumen_math::{length3, Quat, Sqt, Transformation, Vec4};

use crate::{NodeId, Result, SceneGraph};

const DEFAULT_ROTATION_SPEED: f64 = 0.0001;
const DEFAULT_TRANSLATION_SPEED: f64 = 0.001;
/// Degrees per unit of speed and millisecond.
const ROTATION_ANGLE: f64 = std::f64::consts::PI * 4.0;
const SLERP_RATE: f64 = 0.001;

/// The motion an [`Animation`] applies to its group.
#[derive(Debug, Clone)]
pub enum Motion {
    /// Continuous rotation about `axis`.
    Rotation {
        /// Rotation axis.
        axis: Vec4,
        /// Multiple of `4π` degrees per millisecond.
        speed: f64,
    },
    /// Oscillating interpolation between two SQT rotations.
    Slerp {
        /// Scale and translation kept fixed while rotating.
        base: Sqt,
        /// Rotation at phase 0.
        from: Quat,
        /// Rotation at phase 1.
        to: Quat,
        /// Accumulated phase.
        t: f64,
    },
    /// Translate along `direction` to its tip, then back.
    Jumper {
        /// Full jump vector.
        direction: Vec4,
        /// Fraction of `direction` covered per millisecond.
        speed: f64,
        /// Distance travelled from the start.
        covered: f64,
        /// Whether the jump is on its outward leg.
        outward: bool,
        /// Stop after one round trip.
        single: bool,
    },
    /// Scale towards a target and back.
    Scaler {
        /// Target scale minus one.
        delta: Vec4,
        /// Fraction of `delta` applied per millisecond.
        speed: f64,
        /// Amount of scaling applied from the start.
        covered: f64,
        /// Whether the scaler is growing.
        growing: bool,
        /// Stop once the target is reached.
        single: bool,
    },
    /// Translate along `direction` once and stop.
    Driver {
        /// Full travel vector.
        direction: Vec4,
        /// Fraction of `direction` covered per millisecond.
        speed: f64,
        /// Distance travelled so far.
        covered: f64,
    },
}

/// An animation attached to one group node.
#[derive(Debug, Clone)]
pub struct Animation {
    group: NodeId,
    active: bool,
    motion: Motion,
}

impl Animation {
    /// Wrap a motion; animations start inactive.
    pub fn new(group: NodeId, motion: Motion) -> Self {
        Self {
            group,
            active: false,
            motion,
        }
    }

    /// Continuous rotation about `axis`.
    pub fn rotation(group: NodeId, axis: Vec4, speed: Option<f64>) -> Self {
        Self::new(
            group,
            Motion::Rotation {
                axis,
                speed: speed.unwrap_or(DEFAULT_ROTATION_SPEED),
            },
        )
    }

    /// Oscillate the group's SQT rotation between `from` and `to`.
    pub fn slerp(group: NodeId, base: Sqt, from: Quat, to: Quat) -> Self {
        Self::new(
            group,
            Motion::Slerp {
                base,
                from,
                to,
                t: 0.0,
            },
        )
    }

    /// Jump along `direction` and back.
    pub fn jumper(group: NodeId, direction: Vec4, speed: Option<f64>, single: bool) -> Self {
        Self::new(
            group,
            Motion::Jumper {
                direction,
                speed: speed.unwrap_or(DEFAULT_TRANSLATION_SPEED),
                covered: 0.0,
                outward: true,
                single,
            },
        )
    }

    /// Scale towards `target` and back.
    pub fn scaler(group: NodeId, target: Vec4, speed: Option<f64>, single: bool) -> Self {
        let delta = Vec4::new(target.x - 1.0, target.y - 1.0, target.z - 1.0, 0.0);
        Self::new(
            group,
            Motion::Scaler {
                delta,
                speed: speed.unwrap_or(DEFAULT_TRANSLATION_SPEED),
                covered: 0.0,
                growing: true,
                single,
            },
        )
    }

    /// Drive along `direction` once.
    pub fn driver(group: NodeId, direction: Vec4, speed: Option<f64>) -> Self {
        Self::new(
            group,
            Motion::Driver {
                direction,
                speed: speed.unwrap_or(DEFAULT_TRANSLATION_SPEED),
                covered: 0.0,
            },
        )
    }

    /// The animated group.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// The motion and its progress.
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Whether [`Animation::simulate`] currently has an effect.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start or stop the animation.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Flip the active state.
    pub fn toggle_active(&mut self) {
        self.active = !self.active;
    }

    /// Advance by `delta_ms` milliseconds.
    pub fn simulate(&mut self, scene: &mut SceneGraph, delta_ms: f64) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        let group = self.group;
        match &mut self.motion {
            Motion::Rotation { axis, speed } => {
                let degrees = *speed * ROTATION_ANGLE * delta_ms;
                scene.compose_rotation(group, *axis, degrees)?;
            }
            Motion::Slerp { base, from, to, t } => {
                *t += SLERP_RATE * delta_ms;
                let phase = (t.sin() + 1.0) / 2.0;
                let mut sqt = base.clone();
                sqt.rotation = from.slerp(to, phase);
                scene.set_transform(group, Transformation::sqt(sqt)?)?;
            }
            Motion::Jumper {
                direction,
                speed,
                covered,
                outward,
                single,
            } => {
                let goal = length3(direction);
                let step = *direction * (*speed * delta_ms);
                let travelled = length3(direction) * *speed * delta_ms;
                if *outward {
                    scene.compose_translation(group, step)?;
                    *covered += travelled;
                    if *covered >= goal {
                        *outward = false;
                    }
                } else {
                    scene.compose_translation(group, -step)?;
                    *covered -= travelled;
                    if *covered <= 0.0 {
                        if *single {
                            self.active = false;
                        }
                        *outward = true;
                    }
                }
            }
            Motion::Scaler {
                delta,
                speed,
                covered,
                growing,
                single,
            } => {
                let goal = length3(delta);
                let step = *delta * (*speed * delta_ms);
                let one = Vec4::new(1.0, 1.0, 1.0, 0.0);
                let amount = goal * *speed * delta_ms;
                if *growing {
                    scene.compose_scale(group, one + step)?;
                    *covered += amount;
                    if *covered >= goal {
                        if *single {
                            self.active = false;
                        }
                        *growing = false;
                    }
                } else {
                    scene.compose_scale(group, one - step)?;
                    *covered -= amount;
                    if *covered <= 0.0 {
                        *growing = true;
                    }
                }
            }
            Motion::Driver {
                direction,
                speed,
                covered,
            } => {
                let goal = length3(direction);
                scene.compose_translation(group, *direction * (*speed * delta_ms))?;
                *covered += goal * *speed * delta_ms;
                if *covered >= goal {
                    debug!("driver on {group:?} reached its goal");
                    self.active = false;
                }
            }
        }
        Ok(())
    }
}

/// Advance every animation by the same time step.
pub fn simulate_all(animations: &mut [Animation], scene: &mut SceneGraph, delta_ms: f64) -> Result<()> {
    for animation in animations {
        animation.simulate(scene, delta_ms)?;
    }
    Ok(())
}

/// Which backend the host loop is currently drawing with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// CPU ray tracing.
    #[default]
    RayTracing,
    /// GPU rasterization.
    Rasterization,
}

impl RenderMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::RayTracing => RenderMode::Rasterization,
            RenderMode::Rasterization => RenderMode::RayTracing,
        }
    }
}

/// Timestamp of the previous frame, in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    /// A clock that has not seen a frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `timestamp` and return the time since the previous frame.
    ///
    /// The first frame, and any timestamp that goes backwards, yields zero.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let delta = self
            .last_timestamp
            .map_or(0.0, |last| (timestamp - last).max(0.0));
        self.last_timestamp = Some(timestamp);
        delta
    }
}
