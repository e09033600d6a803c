//! `gs-common`: shared types, settings, and errors for the glitch pipeline.
//!
//! This crate is the foundation that the effect, pipeline, and session crates
//! depend on. It defines the core abstractions:
//!
//! - **Buffer**: `PixelBuffer` (width/height-tagged RGBA8 samples)
//! - **Effects**: `EffectKind` (the eight identifiers in composition order),
//!   `EffectCategory`, `Intensity`, `EffectSettings`
//! - **Config**: `EffectTuning`, `PipelineConfig`
//! - **Errors**: `PixelBufferError`, `ConfigError` (thiserror-based)

pub mod buffer;
pub mod config;
pub mod effect;
pub mod error;

// Re-export commonly used items at crate root
pub use buffer::{PixelBuffer, BYTES_PER_PIXEL};
pub use config::{EffectTuning, PipelineConfig, MAX_DISPLACEMENT, MAX_GLITCH_BARS};
pub use effect::{EffectCategory, EffectKind, EffectSettings, Intensity};
pub use error::{ConfigError, PixelBufferError};
