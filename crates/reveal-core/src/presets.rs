//! Named physics and intensity presets.

use crate::constants::LAYER_DAMPING_MULTIPLIERS;
use crate::error::ConfigError;
use crate::spring::SpringParams;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How the followers move.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, EnumIter, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Physics {
    /// Smooth and responsive.
    #[default]
    Standard,
    /// High mass and damping: thick, oily, slow.
    Heavy,
    /// Low damping: jelly-like overshoot.
    Elastic,
    /// Very stiff and light: jittery.
    Nervous,
}

/// How irregular the mask silhouette is.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, EnumIter, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Intensity {
    Subtle,
    #[default]
    Medium,
    Extreme,
}

/// Spring parameters of a physics preset plus the head/body/tail damping
/// multipliers applied on top of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsPreset {
    pub spring: SpringParams,
    pub layer_damping: [f32; 3],
}

impl PhysicsPreset {
    /// Spring parameters for follower `layer` (0 = head, 1 = body, 2 = tail).
    pub fn layer(&self, layer: usize) -> SpringParams {
        let factor = self.layer_damping.get(layer).copied().unwrap_or(1.0);
        self.spring.with_damping_scale(factor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityParams {
    /// Peak displacement of the warp, in render units.
    pub distortion_scale: f32,
    /// Noise frequency at the slow end of the oscillation, cycles per render unit.
    pub base_frequency: f32,
}

impl Physics {
    pub const fn params(self) -> SpringParams {
        match self {
            Physics::Standard => SpringParams::new(0.8, 120.0, 25.0),
            Physics::Heavy => SpringParams::new(3.0, 80.0, 60.0),
            Physics::Elastic => SpringParams::new(0.6, 150.0, 10.0),
            Physics::Nervous => SpringParams::new(0.2, 400.0, 10.0),
        }
    }

    pub const fn preset(self) -> PhysicsPreset {
        PhysicsPreset {
            spring: self.params(),
            layer_damping: LAYER_DAMPING_MULTIPLIERS,
        }
    }
}

impl Intensity {
    pub const fn params(self) -> IntensityParams {
        match self {
            Intensity::Subtle => IntensityParams {
                distortion_scale: 30.0,
                base_frequency: 0.004,
            },
            Intensity::Medium => IntensityParams {
                distortion_scale: 60.0,
                base_frequency: 0.008,
            },
            Intensity::Extreme => IntensityParams {
                distortion_scale: 120.0,
                base_frequency: 0.05,
            },
        }
    }
}

pub fn parse_physics(name: &str) -> Result<Physics, ConfigError> {
    Physics::from_str(name.trim()).map_err(|_| ConfigError::UnknownPhysics(name.to_string()))
}

pub fn parse_intensity(name: &str) -> Result<Intensity, ConfigError> {
    Intensity::from_str(name.trim()).map_err(|_| ConfigError::UnknownIntensity(name.to_string()))
}

/// Look up a physics preset by name.
pub fn physics_preset(name: &str) -> Result<PhysicsPreset, ConfigError> {
    parse_physics(name).map(Physics::preset)
}

/// Look up an intensity preset by name.
pub fn intensity_params(name: &str) -> Result<IntensityParams, ConfigError> {
    parse_intensity(name).map(Intensity::params)
}
