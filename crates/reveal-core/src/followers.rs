//! Head/body/tail followers and the smoothed reveal amount.

use crate::constants::{
    LAYER_RADIUS_FACTORS, REST_POSITION, REVEAL_DAMPING, REVEAL_MASS, REVEAL_STIFFNESS,
};
use crate::interaction::TargetState;
use crate::mask::Circle;
use crate::presets::{Physics, PhysicsPreset};
use crate::spring::{Spring1, Spring2, SpringParams};
use glam::Vec2;
use smallvec::SmallVec;

/// Fade profile of the reveal, shared by every physics preset.
pub const REVEAL_SPRING: SpringParams =
    SpringParams::new(REVEAL_MASS, REVEAL_STIFFNESS, REVEAL_DAMPING);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Follower {
    /// Normalized position. Not clamped: elastic presets overshoot on purpose.
    pub position: Vec2,
    /// Radius in render units.
    pub radius: f32,
}

/// Simulation output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowerFrame {
    pub head: Follower,
    pub body: Follower,
    pub tail: Follower,
    pub smoothed_reveal: f32,
}

impl FollowerFrame {
    pub fn followers(&self) -> [Follower; 3] {
        [self.head, self.body, self.tail]
    }

    /// Followers as circles in render units for a surface of `size`.
    pub fn circles(&self, size: Vec2) -> SmallVec<[Circle; 3]> {
        self.followers()
            .iter()
            .map(|f| Circle {
                center: f.position * size,
                radius: f.radius,
            })
            .collect()
    }
}

/// Radii of head, body and tail for a reveal amount.
#[inline]
pub fn radii(smoothed_reveal: f32, max_radius: f32) -> [f32; 3] {
    let s = if smoothed_reveal.is_finite() {
        smoothed_reveal.clamp(0.0, 1.0)
    } else {
        0.0
    };
    LAYER_RADIUS_FACTORS.map(|factor| s * max_radius * factor)
}

pub struct FollowerSim {
    preset: PhysicsPreset,
    max_radius: f32,
    layers: [Spring2; 3],
    reveal: Spring1,
}

impl FollowerSim {
    pub fn new(physics: Physics, max_radius: f32) -> Self {
        Self {
            preset: physics.preset(),
            max_radius,
            layers: [Spring2::at_rest(Vec2::from(REST_POSITION)); 3],
            reveal: Spring1::at_rest(0.0),
        }
    }

    /// Advance every spring by `dt` seconds toward `target`.
    pub fn step(&mut self, target: TargetState, dt: f32) -> FollowerFrame {
        for (layer, spring) in self.layers.iter_mut().enumerate() {
            spring.step(target.target, self.preset.layer(layer), dt);
        }
        self.reveal.step(target.intent_value(), REVEAL_SPRING, dt);
        self.frame()
    }

    /// Current state without advancing.
    pub fn frame(&self) -> FollowerFrame {
        let [r_head, r_body, r_tail] = radii(self.reveal.value, self.max_radius);
        FollowerFrame {
            head: Follower {
                position: self.layers[0].value,
                radius: r_head,
            },
            body: Follower {
                position: self.layers[1].value,
                radius: r_body,
            },
            tail: Follower {
                position: self.layers[2].value,
                radius: r_tail,
            },
            smoothed_reveal: self.reveal.value,
        }
    }
}
