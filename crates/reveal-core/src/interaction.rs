//! Interaction modes: turn pointer, click, scroll or clock input into a target
//! coordinate and a reveal intent.
//!
//! The mode is picked once at construction. Each mode is its own driver type
//! that implements only the [`TargetDriver`] handlers it consumes; every other
//! handler keeps the trait's no-op default, so inputs from the wrong source can
//! never write the target.

use crate::config::Mode;
use crate::constants::{
    AUTO_AMPLITUDE, AUTO_CENTER, AUTO_FREQ_X, AUTO_FREQ_Y, CLICK_PROMPT, REST_POSITION,
    SCROLL_SWAY_AMPLITUDE, SCROLL_SWAY_FREQUENCY,
};
use crate::error::InputError;
use glam::Vec2;

/// Where the followers are heading and whether the hidden layer should show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetState {
    pub target: Vec2,
    pub reveal_intent: bool,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            target: Vec2::from(REST_POSITION),
            reveal_intent: false,
        }
    }
}

impl TargetState {
    #[inline]
    pub fn intent_value(&self) -> f32 {
        if self.reveal_intent {
            1.0
        } else {
            0.0
        }
    }
}

/// Pointer position relative to the render surface, in surface pixels, along
/// with the surface size measured when the event fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Position in [0,1]², or why the sample cannot be used.
    pub fn normalized(&self) -> Result<Vec2, InputError> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(InputError::NonFinite);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(InputError::BoundsNotMeasured {
                width: self.width,
                height: self.height,
            });
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(InputError::NonFinite);
        }
        if self.x < 0.0 || self.y < 0.0 || self.x > self.width || self.y > self.height {
            return Err(InputError::OutOfBounds {
                x: self.x,
                y: self.y,
            });
        }
        Ok(Vec2::new(self.x / self.width, self.y / self.height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(PointerSample),
    PointerEnter,
    PointerLeave,
    Click,
    /// Normalized scroll progress of the element through the viewport.
    Scroll(f32),
}

/// Per-mode input handlers. Defaults ignore the input.
pub trait TargetDriver {
    fn pointer_move(&mut self, _sample: PointerSample, _target: &mut TargetState) {}
    fn pointer_enter(&mut self, _target: &mut TargetState) {}
    fn pointer_leave(&mut self, _target: &mut TargetState) {}
    fn click(&mut self, _target: &mut TargetState) {}
    fn scroll(&mut self, _progress: f32, _target: &mut TargetState) {}
    fn tick(&mut self, _elapsed_sec: f32, _target: &mut TargetState) {}
}

fn track_pointer(sample: PointerSample, target: &mut TargetState) {
    match sample.normalized() {
        Ok(uv) => target.target = uv,
        Err(e) => log::trace!("[input] pointer move ignored: {e}"),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HoverDriver;

impl TargetDriver for HoverDriver {
    fn pointer_move(&mut self, sample: PointerSample, target: &mut TargetState) {
        track_pointer(sample, target);
    }
    fn pointer_enter(&mut self, target: &mut TargetState) {
        target.reveal_intent = true;
    }
    fn pointer_leave(&mut self, target: &mut TargetState) {
        target.reveal_intent = false;
    }
}

/// Click mode keeps its own toggle; leaving the surface does not reset it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickDriver {
    revealed: bool,
}

impl ClickDriver {
    pub fn revealed(&self) -> bool {
        self.revealed
    }
}

impl TargetDriver for ClickDriver {
    fn pointer_move(&mut self, sample: PointerSample, target: &mut TargetState) {
        track_pointer(sample, target);
    }
    fn click(&mut self, target: &mut TargetState) {
        self.revealed = !self.revealed;
        target.reveal_intent = self.revealed;
        log::debug!("[click] reveal={}", self.revealed);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollDriver;

impl TargetDriver for ScrollDriver {
    fn scroll(&mut self, progress: f32, target: &mut TargetState) {
        if !progress.is_finite() {
            log::trace!("[input] scroll ignored: {}", InputError::NonFinite);
            return;
        }
        let (uv, intent) = scroll_path(progress);
        target.target = uv;
        target.reveal_intent = intent;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AutoDriver;

impl TargetDriver for AutoDriver {
    fn tick(&mut self, elapsed_sec: f32, target: &mut TargetState) {
        if !elapsed_sec.is_finite() {
            return;
        }
        target.target = lissajous(elapsed_sec);
        target.reveal_intent = true;
    }
}

/// Target and intent for a scroll progress; `p` is clamped to [0,1] and the
/// layer shows only strictly inside the viewport.
pub fn scroll_path(progress: f32) -> (Vec2, bool) {
    let p = progress.clamp(0.0, 1.0);
    let x = 0.5 + SCROLL_SWAY_AMPLITUDE * (SCROLL_SWAY_FREQUENCY * p).sin();
    (Vec2::new(x, p), p > 0.0 && p < 1.0)
}

/// Autonomous trajectory at `t` seconds.
pub fn lissajous(t: f32) -> Vec2 {
    Vec2::new(
        AUTO_CENTER + AUTO_AMPLITUDE * (AUTO_FREQ_X * t).sin(),
        AUTO_CENTER + AUTO_AMPLITUDE * (AUTO_FREQ_Y * t).cos(),
    )
}

/// Scroll progress of an element from its viewport rect: 0 while its top edge
/// sits at the bottom of the viewport, 1 once its bottom edge passes the top.
pub fn scroll_progress(element_top: f32, element_height: f32, viewport_height: f32) -> f32 {
    let travel = viewport_height + element_height;
    if !travel.is_finite() || travel <= 0.0 || !element_top.is_finite() {
        return 0.0;
    }
    ((viewport_height - element_top) / travel).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug)]
enum ModeDriver {
    Hover(HoverDriver),
    Click(ClickDriver),
    Scroll(ScrollDriver),
    Auto(AutoDriver),
}

/// Mode state machine and sole owner of the [`TargetState`].
#[derive(Clone, Debug)]
pub struct Interaction {
    driver: ModeDriver,
    target: TargetState,
}

impl Interaction {
    pub fn new(mode: Mode) -> Self {
        let driver = match mode {
            Mode::Hover => ModeDriver::Hover(HoverDriver),
            Mode::Click => ModeDriver::Click(ClickDriver::default()),
            Mode::Scroll => ModeDriver::Scroll(ScrollDriver),
            Mode::Auto => ModeDriver::Auto(AutoDriver),
        };
        Self {
            driver,
            target: TargetState::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.driver {
            ModeDriver::Hover(_) => Mode::Hover,
            ModeDriver::Click(_) => Mode::Click,
            ModeDriver::Scroll(_) => Mode::Scroll,
            ModeDriver::Auto(_) => Mode::Auto,
        }
    }

    #[inline]
    pub fn target(&self) -> TargetState {
        self.target
    }

    fn driver(&mut self) -> &mut dyn TargetDriver {
        match &mut self.driver {
            ModeDriver::Hover(d) => d,
            ModeDriver::Click(d) => d,
            ModeDriver::Scroll(d) => d,
            ModeDriver::Auto(d) => d,
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        let mut target = self.target;
        let driver = self.driver();
        match event {
            InputEvent::PointerMove(sample) => driver.pointer_move(sample, &mut target),
            InputEvent::PointerEnter => driver.pointer_enter(&mut target),
            InputEvent::PointerLeave => driver.pointer_leave(&mut target),
            InputEvent::Click => driver.click(&mut target),
            InputEvent::Scroll(progress) => driver.scroll(progress, &mut target),
        }
        self.target = target;
    }

    /// Clock input, once per frame before the followers step.
    pub fn tick(&mut self, elapsed_sec: f32) {
        let mut target = self.target;
        self.driver().tick(elapsed_sec, &mut target);
        self.target = target;
    }

    /// Prompt shown while a click-mode instance is still hidden.
    pub fn prompt(&self) -> Option<&'static str> {
        match self.driver {
            ModeDriver::Click(d) if !d.revealed() => Some(CLICK_PROMPT),
            _ => None,
        }
    }
}
