//! The glitch pipeline orchestrator.
//!
//! [`GlitchPipeline::apply`] clones the source, walks the registry in
//! composition order and replaces the working buffer with each active
//! effect's output. Inactive effects (intensity 0) are skipped entirely.

use std::collections::HashMap;

use gs_common::{EffectSettings, PipelineConfig, PixelBuffer};
use gs_effects::{settings_from_map, EffectRegistry};
use tracing::{debug, trace};

use crate::PipelineError;

/// Applies the eight glitch effects in their fixed order.
///
/// The pipeline owns its registry and config but no per-call state, so it
/// can be shared across threads and reused for every render.
pub struct GlitchPipeline {
    registry: EffectRegistry,
    config: PipelineConfig,
}

impl GlitchPipeline {
    /// Pipeline with default tuning.
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        Self {
            registry: EffectRegistry::from_tuning(&config.tuning),
            config,
        }
    }

    /// Pipeline with validated custom tuning.
    pub fn with_config(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            registry: EffectRegistry::from_tuning(&config.tuning),
            config,
        })
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every active effect over a copy of `source`.
    ///
    /// `source` is never modified. With all intensities at zero the result
    /// equals `source`.
    pub fn apply(&self, source: &PixelBuffer, settings: &EffectSettings) -> PixelBuffer {
        let mut working = source.clone();

        debug!(
            width = source.width(),
            height = source.height(),
            active = settings.active_count(),
            "Running glitch pipeline"
        );

        for entry in self.registry.entries() {
            let intensity = settings.get(entry.kind());
            if !intensity.is_active() {
                continue;
            }
            trace!(
                effect = %entry.kind(),
                position = entry.position(),
                intensity = intensity.value(),
                "Applying effect"
            );
            working = entry.apply(&working, intensity);
        }

        working
    }

    /// Run the pipeline with a string-keyed intensities map.
    ///
    /// Unknown keys are ignored and out-of-range values clamped.
    pub fn apply_map(
        &self,
        source: &PixelBuffer,
        intensities: &HashMap<String, i64>,
    ) -> PixelBuffer {
        self.apply(source, &settings_from_map(intensities))
    }

    /// Validate raw RGBA bytes as a buffer, then run the pipeline.
    pub fn apply_raw(
        &self,
        width: u32,
        height: u32,
        samples: Vec<u8>,
        settings: &EffectSettings,
    ) -> Result<PixelBuffer, PipelineError> {
        let source = PixelBuffer::new(width, height, samples)?;
        Ok(self.apply(&source, settings))
    }
}

impl Default for GlitchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot helper: run the default pipeline over `source`.
pub fn apply(source: &PixelBuffer, settings: &EffectSettings) -> PixelBuffer {
    GlitchPipeline::new().apply(source, settings)
}

#[cfg(test)]
mod tests {
    use gs_common::{EffectKind, EffectTuning, Intensity, PixelBufferError};

    use super::*;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                [230, 40, 90, 255]
            } else {
                [20, 180, 60, 255]
            }
        })
        .unwrap()
    }

    #[test]
    fn zero_settings_return_source() {
        let source = checker(24, 16);
        let out = GlitchPipeline::new().apply(&source, &EffectSettings::new());
        assert_eq!(out, source);
    }

    #[test]
    fn single_effect_matches_direct_call() {
        let pipeline = GlitchPipeline::new();
        let source = checker(32, 32);
        let settings = EffectSettings::new().with(EffectKind::ScanLines, Intensity::new(60));
        let expected = pipeline
            .registry()
            .get(EffectKind::ScanLines)
            .apply(&source, Intensity::new(60));
        assert_eq!(pipeline.apply(&source, &settings), expected);
    }

    #[test]
    fn two_effects_compose_in_registry_order() {
        let pipeline = GlitchPipeline::new();
        let source = checker(32, 32);
        let settings = EffectSettings::new()
            .with(EffectKind::BitCrush, Intensity::new(70))
            .with(EffectKind::RgbSplit, Intensity::new(40));
        let reg = pipeline.registry();
        let split = reg.get(EffectKind::RgbSplit).apply(&source, Intensity::new(40));
        let expected = reg.get(EffectKind::BitCrush).apply(&split, Intensity::new(70));
        assert_eq!(pipeline.apply(&source, &settings), expected);
    }

    #[test]
    fn apply_map_ignores_unknown_keys() {
        let pipeline = GlitchPipeline::new();
        let source = checker(16, 16);
        let mut map = HashMap::new();
        map.insert("hologram".to_string(), 80);
        assert_eq!(pipeline.apply_map(&source, &map), source);

        map.insert("colorShift".to_string(), 500);
        let clamped = EffectSettings::new().with(EffectKind::ColorShift, Intensity::MAX);
        assert_eq!(
            pipeline.apply_map(&source, &map),
            pipeline.apply(&source, &clamped)
        );
    }

    #[test]
    fn apply_raw_rejects_bad_length() {
        let err = GlitchPipeline::new()
            .apply_raw(2, 2, vec![0; 15], &EffectSettings::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Buffer(PixelBufferError::InvalidBuffer {
                expected: 16,
                got: 15,
                ..
            })
        ));
    }

    #[test]
    fn with_config_rejects_invalid_tuning() {
        let config = PipelineConfig {
            tuning: EffectTuning {
                corruption_block_size: 0,
                ..EffectTuning::default()
            },
            ..PipelineConfig::default()
        };
        assert!(matches!(
            GlitchPipeline::with_config(config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn free_apply_uses_defaults() {
        let source = checker(20, 12);
        let settings = EffectSettings::uniform(Intensity::new(30));
        assert_eq!(apply(&source, &settings), GlitchPipeline::new().apply(&source, &settings));
    }
}
