// Shared tuning constants used by the engine and both frontends.

// Integration
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // longest frame step integrated at once (tab switches, stalls)
pub const MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0; // spring sub-step ceiling

// Smoothed reveal profile (independent of the physics preset)
pub const REVEAL_DAMPING: f32 = 20.0;
pub const REVEAL_STIFFNESS: f32 = 60.0;
pub const REVEAL_MASS: f32 = 1.0;

// Follower layering: damping multiplier and radius share for head/body/tail
pub const LAYER_DAMPING_MULTIPLIERS: [f32; 3] = [1.0, 1.4, 1.8];
pub const LAYER_RADIUS_FACTORS: [f32; 3] = [1.0, 0.8, 0.6];

// Initial follower / target position (normalized)
pub const REST_POSITION: [f32; 2] = [0.5, 0.5];

// Scroll mode path
pub const SCROLL_SWAY_AMPLITUDE: f32 = 0.1;
pub const SCROLL_SWAY_FREQUENCY: f32 = 10.0;

// Auto mode Lissajous path
pub const AUTO_CENTER: f32 = 0.5;
pub const AUTO_AMPLITUDE: f32 = 0.35;
pub const AUTO_FREQ_X: f32 = 0.8; // rad/s
pub const AUTO_FREQ_Y: f32 = 0.6; // rad/s

// Mask pipeline
pub const NOISE_OCTAVES: usize = 2;
pub const NOISE_PERIOD_SEC: f32 = 6.0; // base -> 2x base -> base
pub const BLUR_SIGMA: f32 = 12.0; // render units
pub const THRESHOLD_GAIN: f32 = 25.0; // alpha' = gain * alpha + bias
pub const THRESHOLD_BIAS: f32 = -10.0;

// Compositing
pub const HIGHLIGHT_OPACITY: f32 = 0.1;
pub const CLICK_PROMPT: &str = "click to reveal";

// Configuration defaults
pub const DEFAULT_BASE_RADIUS: f32 = 0.2;
pub const DEFAULT_RENDER_WIDTH: f32 = 500.0;
pub const DEFAULT_RENDER_HEIGHT: f32 = 625.0; // 4:5 portrait frame
pub const DEFAULT_MASK_SCALE: f32 = 0.5;

// Size limits
pub const MAX_RENDER_SIDE: f32 = 8192.0; // render units per side
pub const MAX_MASK_CELLS: usize = 1 << 22; // 2048 x 2048 grid
