pub mod compositor;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod followers;
pub mod interaction;
pub mod mask;
pub mod presets;
pub mod spring;

pub static COMPOSITE_WGSL: &str = include_str!("../shaders/composite.wgsl");

pub use compositor::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use followers::*;
pub use interaction::*;
pub use mask::*;
pub use presets::*;
pub use spring::{Spring, Spring1, Spring2, SpringParams, SpringValue};
