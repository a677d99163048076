//! Instance configuration.
//!
//! Callers hand over a loosely typed [`RevealOptions`] (CLI flags, a JSON object
//! from a web page) and [`RevealOptions::resolve`] turns it into a validated
//! [`RevealConfig`]. Every field has a default, so an empty options value always
//! resolves; only unknown names and out-of-range numbers fail.

use crate::constants::{
    DEFAULT_BASE_RADIUS, DEFAULT_MASK_SCALE, DEFAULT_RENDER_HEIGHT, DEFAULT_RENDER_WIDTH,
    MAX_MASK_CELLS, MAX_RENDER_SIDE,
};
use crate::error::ConfigError;
use crate::presets::{parse_intensity, parse_physics, Intensity, Physics};
use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Which input source drives the target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, EnumIter, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Hover,
    Click,
    Scroll,
    Auto,
}

pub fn parse_mode(name: &str) -> Result<Mode, ConfigError> {
    Mode::from_str(name.trim()).map_err(|_| ConfigError::UnknownMode(name.to_string()))
}

/// Fully resolved, immutable configuration of one reveal instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    pub mode: Mode,
    pub physics: Physics,
    pub intensity: Intensity,
    /// Maximum head radius as a fraction of `render_width`.
    pub base_radius: f32,
    /// Swap which image is the base and which is revealed.
    pub inverted: bool,
    pub render_width: f32,
    pub render_height: f32,
    /// Mask grid resolution relative to the render size.
    pub mask_scale: f32,
    /// Draw the wet highlight over the revealed region.
    pub highlight: bool,
    pub seed: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            physics: Physics::default(),
            intensity: Intensity::default(),
            base_radius: DEFAULT_BASE_RADIUS,
            inverted: false,
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            mask_scale: DEFAULT_MASK_SCALE,
            highlight: true,
            seed: 0,
        }
    }
}

impl RevealConfig {
    pub fn max_radius(&self) -> f32 {
        self.render_width * self.base_radius
    }

    /// Mask grid size in cells, at least 1x1.
    pub fn mask_size(&self) -> (usize, usize) {
        let w = (self.render_width * self.mask_scale).round().max(1.0) as usize;
        let h = (self.render_height * self.mask_scale).round().max(1.0) as usize;
        (w, h)
    }

    /// Check the numeric fields. Enum fields are valid by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("renderWidth", self.render_width)?;
        positive("renderHeight", self.render_height)?;
        unit_interval("baseRadius", self.base_radius)?;
        unit_interval("maskScale", self.mask_scale)?;
        at_most("renderWidth", self.render_width as f64, MAX_RENDER_SIDE as f64)?;
        at_most("renderHeight", self.render_height as f64, MAX_RENDER_SIDE as f64)?;
        // Same rounding as `mask_size`, in f64 so the product cannot overflow.
        let cells = (self.render_width as f64 * self.mask_scale as f64).round().max(1.0)
            * (self.render_height as f64 * self.mask_scale as f64).round().max(1.0);
        at_most("maskCells", cells, MAX_MASK_CELLS as f64)?;
        Ok(())
    }
}

fn at_most(field: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { field, value, max })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    if value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Unvalidated configuration as supplied by a caller.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealOptions {
    pub mode: Option<String>,
    pub physics: Option<String>,
    pub intensity: Option<String>,
    pub base_radius: Option<f32>,
    pub inverted: Option<bool>,
    pub render_width: Option<f32>,
    pub render_height: Option<f32>,
    pub mask_scale: Option<f32>,
    pub highlight: Option<bool>,
    pub seed: Option<u32>,
}

impl RevealOptions {
    pub fn resolve(&self) -> Result<RevealConfig, ConfigError> {
        let defaults = RevealConfig::default();
        let config = RevealConfig {
            mode: self.mode.as_deref().map(parse_mode).transpose()?.unwrap_or(defaults.mode),
            physics: self
                .physics
                .as_deref()
                .map(parse_physics)
                .transpose()?
                .unwrap_or(defaults.physics),
            intensity: self
                .intensity
                .as_deref()
                .map(parse_intensity)
                .transpose()?
                .unwrap_or(defaults.intensity),
            base_radius: self.base_radius.unwrap_or(defaults.base_radius),
            inverted: self.inverted.unwrap_or(defaults.inverted),
            render_width: self.render_width.unwrap_or(defaults.render_width),
            render_height: self.render_height.unwrap_or(defaults.render_height),
            mask_scale: self.mask_scale.unwrap_or(defaults.mask_scale),
            highlight: self.highlight.unwrap_or(defaults.highlight),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        log::debug!(
            "[config] mode={} physics={} intensity={} radius={:.2} inverted={} size={}x{}",
            config.mode,
            config.physics,
            config.intensity,
            config.base_radius,
            config.inverted,
            config.render_width,
            config.render_height
        );
        Ok(config)
    }
}
