//! Color effects: per-pixel value changes with no spatial component.
//!
//! - [`ColorShiftEffect`]: HSL hue rotation
//! - [`BitCrushEffect`]: Per-channel quantization

pub mod bit_crush;
pub mod color_shift;

pub use bit_crush::BitCrushEffect;
pub use color_shift::ColorShiftEffect;
