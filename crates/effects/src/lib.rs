//! `gs-effects`: the glitch effect algorithms and their ordered registry.
//!
//! This crate provides:
//! - The [`Effect`] trait that all glitch effects implement
//! - An [`EffectRegistry`] holding the eight effects in composition order
//! - Intensity-map parsing helpers (unknown keys ignored, values clamped)
//! - A seeded spatial hash for deterministic pseudo-random patterns
//! - 8 built-in effects across 3 categories:
//!
//! ## Distort (4 effects)
//! - RGB Split
//! - VHS Distortion
//! - Chromatic Aberration
//! - Glitch Bars
//!
//! ## Stylize (2 effects)
//! - Scan Lines
//! - Digital Corruption
//!
//! ## Color (2 effects)
//! - Color Shift
//! - Bit Crush

pub mod color;
pub mod distort;
pub mod error;
pub mod hash;
pub mod params;
pub mod registry;
pub mod stylize;
pub mod traits;

// Re-export primary types at crate root.
pub use error::EffectError;
pub use params::{settings_from_json, settings_from_map, settings_from_pairs};
pub use registry::{EffectEntry, EffectRegistry, GlitchEffect};
pub use traits::Effect;

// Re-export all effect structs for convenience.
pub use color::{BitCrushEffect, ColorShiftEffect};
pub use distort::{
    ChromaticAberrationEffect, GlitchBarsEffect, RgbSplitEffect, VhsDistortionEffect,
};
pub use stylize::{DigitalCorruptionEffect, ScanLinesEffect};
