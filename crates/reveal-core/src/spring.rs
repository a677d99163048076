//! Damped-harmonic-oscillator integrator shared by the followers and the
//! reveal fade.
//!
//! Each frame is clamped to [`MAX_FRAME_DT_SEC`] and split into sub-steps of at
//! most [`MAX_SUBSTEP_SEC`], integrated with semi-implicit Euler. Bad input
//! (zero or non-finite `dt`, non-finite target, non-positive mass) leaves the
//! state untouched so NaN never reaches the render path.

use crate::constants::{MAX_FRAME_DT_SEC, MAX_SUBSTEP_SEC};
use glam::Vec2;
use std::ops::{Add, Mul, Sub};

/// Physical parameters of one spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringParams {
    pub const fn new(mass: f32, stiffness: f32, damping: f32) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Same mass and stiffness with damping multiplied by `factor`.
    pub fn with_damping_scale(self, factor: f32) -> Self {
        Self {
            damping: self.damping * factor,
            ..self
        }
    }

    pub fn is_valid(&self) -> bool {
        self.mass.is_finite()
            && self.mass > 0.0
            && self.stiffness.is_finite()
            && self.stiffness >= 0.0
            && self.damping.is_finite()
            && self.damping >= 0.0
    }

    /// ζ = c / (2·sqrt(k·m)); 1 is critical, above 1 never overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Quantity a spring can drive: scalars and 2-D points.
pub trait SpringValue:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;
    fn all_finite(self) -> bool;
}

impl SpringValue for f32 {
    const ZERO: Self = 0.0;
    #[inline]
    fn all_finite(self) -> bool {
        self.is_finite()
    }
}

impl SpringValue for Vec2 {
    const ZERO: Self = Vec2::ZERO;
    #[inline]
    fn all_finite(self) -> bool {
        self.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spring<T> {
    pub value: T,
    pub velocity: T,
}

pub type Spring1 = Spring<f32>;
pub type Spring2 = Spring<Vec2>;

impl<T: SpringValue> Spring<T> {
    pub fn at_rest(value: T) -> Self {
        Self {
            value,
            velocity: T::ZERO,
        }
    }

    /// Advance toward `target` by `dt` seconds.
    pub fn step(&mut self, target: T, params: SpringParams, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if !params.is_valid() || !target.all_finite() {
            return;
        }
        if !self.value.all_finite() || !self.velocity.all_finite() {
            // Nothing valid to fall back on: settle at the target.
            *self = Self::at_rest(target);
            return;
        }

        let (count, h) = substeps(dt);
        let inv_mass = 1.0 / params.mass;
        let mut x = self.value;
        let mut v = self.velocity;
        for _ in 0..count {
            let accel = ((target - x) * params.stiffness - v * params.damping) * inv_mass;
            v = v + accel * h;
            x = x + v * h;
        }

        if x.all_finite() && v.all_finite() {
            self.value = x;
            self.velocity = v;
        } else {
            log::warn!("spring diverged; keeping previous state");
        }
    }
}

/// Split a frame into equal sub-steps no longer than [`MAX_SUBSTEP_SEC`].
#[inline]
pub fn substeps(dt: f32) -> (usize, f32) {
    let dt = dt.min(MAX_FRAME_DT_SEC);
    let count = (dt / MAX_SUBSTEP_SEC).ceil().max(1.0) as usize;
    (count, dt / count as f32)
}

/// Scalar form of the integrator: returns `(new_value, new_velocity)`.
pub fn step(
    current_value: f32,
    current_velocity: f32,
    target_value: f32,
    mass: f32,
    stiffness: f32,
    damping: f32,
    dt: f32,
) -> (f32, f32) {
    let mut spring = Spring1 {
        value: current_value,
        velocity: current_velocity,
    };
    spring.step(target_value, SpringParams::new(mass, stiffness, damping), dt);
    (spring.value, spring.velocity)
}
