//! Configuration structs for effect tuning and pipeline input limits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Seed shared by the effects that need pseudo-random patterns.
pub const DEFAULT_SEED: u64 = 0x6C17_C4A5_2F0D_9E31;

/// Largest pixel displacement a tuning value may request.
pub const MAX_DISPLACEMENT: u32 = 4096;

/// Largest number of glitch bands.
pub const MAX_GLITCH_BARS: u32 = 1024;

/// Numeric constants behind each effect.
///
/// Every field has a default; a JSON document only needs to name the
/// fields it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    /// RGB Split: channel shift in pixels at intensity 100.
    pub rgb_split_max_shift: u32,
    /// Scan Lines: every `period`-th row is darkened.
    pub scan_line_period: u32,
    /// Scan Lines: darkening factor at intensity 100 (0..=1).
    pub scan_line_max_darken: f32,
    /// VHS: horizontal wave amplitude in pixels at intensity 100.
    pub vhs_max_amplitude: f32,
    /// VHS: wave frequency in radians per row.
    pub vhs_frequency: f32,
    /// VHS: wave phase in radians.
    pub vhs_phase: f32,
    /// VHS: per-row luminance jitter in channel levels at intensity 100.
    pub vhs_max_jitter: f32,
    /// Chromatic Aberration: radial offset per pixel of distance at intensity 100.
    pub chromatic_factor: f32,
    /// Digital Corruption: block edge length in pixels.
    pub corruption_block_size: u32,
    /// Glitch Bars: number of bands at intensity 100.
    pub glitch_bar_max_count: u32,
    /// Glitch Bars: largest displacement as a fraction of the image width.
    pub glitch_bar_max_offset: f32,
    /// Bit Crush: bits dropped at intensity 100 (levels = 256 >> bits).
    pub bit_crush_max_shift: u32,
    /// Seed for the spatial hash used by Digital Corruption and Glitch Bars.
    pub seed: u64,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            rgb_split_max_shift: 30,
            scan_line_period: 3,
            scan_line_max_darken: 0.7,
            vhs_max_amplitude: 20.0,
            vhs_frequency: 0.05,
            vhs_phase: 0.0,
            vhs_max_jitter: 24.0,
            chromatic_factor: 0.05,
            corruption_block_size: 8,
            glitch_bar_max_count: 12,
            glitch_bar_max_offset: 0.25,
            bit_crush_max_shift: 6,
            seed: DEFAULT_SEED,
        }
    }
}

impl EffectTuning {
    /// Check that every value is usable by the effect algorithms.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_line_period == 0 {
            return Err(invalid("scan_line_period", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.scan_line_max_darken) {
            return Err(invalid("scan_line_max_darken", "must be within [0, 1]"));
        }
        if self.corruption_block_size == 0 {
            return Err(invalid("corruption_block_size", "must be > 0"));
        }
        if self.bit_crush_max_shift > 7 {
            return Err(invalid(
                "bit_crush_max_shift",
                "must be <= 7 so at least two levels remain",
            ));
        }
        if !(0.0..=1.0).contains(&self.glitch_bar_max_offset) {
            return Err(invalid("glitch_bar_max_offset", "must be within [0, 1]"));
        }
        for (field, value) in [
            ("vhs_max_amplitude", self.vhs_max_amplitude),
            ("vhs_frequency", self.vhs_frequency),
            ("vhs_phase", self.vhs_phase),
            ("vhs_max_jitter", self.vhs_max_jitter),
            ("chromatic_factor", self.chromatic_factor),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if self.vhs_max_amplitude < 0.0 || self.vhs_max_jitter < 0.0 || self.chromatic_factor < 0.0
        {
            return Err(invalid("vhs/chromatic", "magnitudes must be >= 0"));
        }
        if self.rgb_split_max_shift > MAX_DISPLACEMENT {
            return Err(invalid("rgb_split_max_shift", "must be <= 4096"));
        }
        if self.vhs_max_amplitude > MAX_DISPLACEMENT as f32 {
            return Err(invalid("vhs_max_amplitude", "must be <= 4096"));
        }
        if self.vhs_max_jitter > 255.0 {
            return Err(invalid("vhs_max_jitter", "must be <= 255"));
        }
        if self.chromatic_factor > 1.0 {
            return Err(invalid("chromatic_factor", "must be <= 1"));
        }
        if self.glitch_bar_max_count > MAX_GLITCH_BARS {
            return Err(invalid("glitch_bar_max_count", "must be <= 1024"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Top-level pipeline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tuning: EffectTuning,
    /// Loaded images wider than this are downscaled before processing.
    pub max_input_width: u32,
    /// Loaded images taller than this are downscaled before processing.
    pub max_input_height: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tuning: EffectTuning::default(),
            max_input_width: 1200,
            max_input_height: 1200,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_width == 0 || self.max_input_height == 0 {
            return Err(invalid("max_input_width/max_input_height", "must be > 0"));
        }
        self.tuning.validate()
    }
}
