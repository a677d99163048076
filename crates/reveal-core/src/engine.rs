//! One live reveal instance: configuration, target, followers and mask.
//!
//! Frontends feed input through [`RevealEngine::handle`] as it arrives and
//! call [`RevealEngine::tick`] once per displayed frame. Input written between
//! two ticks is visible to the second one. After [`RevealEngine::teardown`]
//! the engine ignores input and `tick` returns `None`.

use crate::compositor::{composite, Layer, LayerPair};
use crate::config::{Mode, RevealConfig, RevealOptions};
use crate::constants::HIGHLIGHT_OPACITY;
use crate::error::ConfigError;
use crate::followers::{FollowerFrame, FollowerSim};
use crate::interaction::{InputEvent, Interaction, TargetState};
use crate::mask::{Circle, MaskField, MaskGenerator, Warp};
use glam::Vec2;
use smallvec::SmallVec;

/// Timing of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the instance was mounted.
    pub elapsed: f32,
}

impl FrameClock {
    pub fn new(dt: f32, elapsed: f32) -> Self {
        Self { dt, elapsed }
    }
}

/// Geometry produced by one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGeometry {
    pub target: TargetState,
    pub followers: FollowerFrame,
    /// Followers in render units, head first.
    pub circles: SmallVec<[Circle; 3]>,
    /// Noise distortion in effect for this frame.
    pub warp: Warp,
    pub prompt: Option<&'static str>,
}

pub struct RevealEngine {
    config: RevealConfig,
    interaction: Interaction,
    followers: FollowerSim,
    mask: MaskGenerator,
    circles: SmallVec<[Circle; 3]>,
    elapsed: f32,
    mask_stale: bool,
    live: bool,
}

impl RevealEngine {
    pub fn new(config: RevealConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let followers = FollowerSim::new(config.physics, config.max_radius());
        let mask = MaskGenerator::new(&config);
        let circles = followers.frame().circles(mask.render_size());
        log::debug!(
            "[engine] mounted mode={} physics={} mask={:?}",
            config.mode,
            config.physics,
            config.mask_size()
        );
        Ok(Self {
            interaction: Interaction::new(config.mode),
            followers,
            mask,
            circles,
            elapsed: 0.0,
            mask_stale: true,
            live: true,
            config,
        })
    }

    pub fn from_options(options: &RevealOptions) -> Result<Self, ConfigError> {
        Self::new(options.resolve()?)
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn target(&self) -> TargetState {
        self.interaction.target()
    }

    pub fn followers(&self) -> FollowerFrame {
        self.followers.frame()
    }

    pub fn prompt(&self) -> Option<&'static str> {
        self.interaction.prompt()
    }

    pub fn handle(&mut self, event: InputEvent) {
        if !self.live {
            log::trace!("[engine] input after teardown dropped: {event:?}");
            return;
        }
        self.interaction.handle(event);
    }

    pub fn tick(&mut self, clock: FrameClock) -> Option<FrameGeometry> {
        if !self.live {
            return None;
        }
        self.interaction.tick(clock.elapsed);
        let target = self.interaction.target();
        let followers = self.followers.step(target, clock.dt);
        self.circles = followers.circles(self.mask.render_size());
        if clock.elapsed.is_finite() {
            self.elapsed = clock.elapsed;
        }
        self.mask_stale = true;
        Some(FrameGeometry {
            target,
            followers,
            circles: self.circles.clone(),
            warp: self.mask.warp(self.elapsed),
            prompt: self.interaction.prompt(),
        })
    }

    /// Mask for the latest tick, built on first request.
    pub fn mask(&mut self) -> Option<&MaskField> {
        if !self.live {
            return None;
        }
        if self.mask_stale {
            self.mask.generate(&self.circles, self.elapsed);
            self.mask_stale = false;
        }
        Some(self.mask.field())
    }

    /// Noise displacement at render-space point `p` as of the latest tick.
    pub fn displacement_at(&self, p: Vec2) -> Option<Vec2> {
        self.live.then(|| self.mask.displacement_at(p, self.elapsed))
    }

    /// Highlight opacity, if the pass is enabled.
    pub fn highlight(&self) -> Option<f32> {
        self.config.highlight.then_some(HIGHLIGHT_OPACITY)
    }

    /// Base/revealed assignment for this instance's inversion setting.
    pub fn layers<'a>(&self, normal: &'a Layer, glitch: &'a Layer) -> LayerPair<'a> {
        LayerPair::assign(self.config.inverted, normal, glitch)
    }

    /// Composite the latest frame into `out`. Returns `false` once torn down.
    pub fn composite(&mut self, normal: &Layer, glitch: &Layer, out: &mut Layer) -> bool {
        let highlight = self.highlight();
        let pair = LayerPair::assign(self.config.inverted, normal, glitch);
        match self.mask() {
            Some(mask) => {
                composite(pair, mask, highlight, out);
                true
            }
            None => false,
        }
    }

    /// Stop the instance. Idempotent.
    pub fn teardown(&mut self) {
        if self.live {
            self.live = false;
            log::debug!("[engine] torn down after {:.2}s", self.elapsed);
        }
    }
}
