use thiserror::Error;

/// Raised while resolving a configuration. Fatal to the instance being built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown interaction mode `{0}` (expected hover, click, scroll or auto)")]
    UnknownMode(String),
    #[error("unknown physics preset `{0}` (expected standard, heavy, elastic or nervous)")]
    UnknownPhysics(String),
    #[error("unknown intensity preset `{0}` (expected subtle, medium or extreme)")]
    UnknownIntensity(String),
    #[error("`{field}` must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be in (0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("`{field}` of {value} exceeds the limit of {max}")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

/// Malformed pointer or scroll input. Always absorbed by the engine: the event
/// is dropped and the previous target is kept.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    #[error("render surface bounds not measured yet ({width}x{height})")]
    BoundsNotMeasured { width: f32, height: f32 },
    #[error("non-finite input coordinate")]
    NonFinite,
    #[error("pointer at ({x}, {y}) is outside the render surface")]
    OutOfBounds { x: f32, y: f32 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    #[error("layer {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("layer dimensions must be non-zero")]
    Empty,
}
