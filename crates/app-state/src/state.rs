//! Editor session state.
//!
//! `EditorState` is what the controls talk to: load a picture, move a knob,
//! reset, render. It keeps the loaded image untouched and re-runs the whole
//! pipeline from it on every render.

use gs_common::{EffectKind, EffectSettings, Intensity, PipelineConfig, PixelBuffer};
use gs_pipeline::{downscale_to_fit, GlitchPipeline, PipelineError};

use crate::render_worker::RenderRequest;
use crate::snapshot::SettingsSnapshot;
use crate::SessionError;

/// Central session container.
pub struct EditorState {
    pipeline: GlitchPipeline,
    /// Pristine source, already fitted to the input limits.
    source: Option<PixelBuffer>,
    settings: EffectSettings,
    /// Incremented on every image or settings change.
    revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Empty session with the default pipeline.
    pub fn new() -> Self {
        Self::from_pipeline(GlitchPipeline::new())
    }

    /// Empty session with custom tuning and input limits.
    pub fn with_config(config: PipelineConfig) -> Result<Self, SessionError> {
        Ok(Self::from_pipeline(GlitchPipeline::with_config(config)?))
    }

    fn from_pipeline(pipeline: GlitchPipeline) -> Self {
        Self {
            pipeline,
            source: None,
            settings: EffectSettings::new(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Store a new source image, downscaling it to the configured limits.
    ///
    /// Effect settings are kept, so the new picture renders with the
    /// current look.
    pub fn load_image(&mut self, image: PixelBuffer) -> Result<(), SessionError> {
        let config = self.pipeline.config();
        let fitted = downscale_to_fit(&image, config.max_input_width, config.max_input_height)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            fitted_width = fitted.width(),
            fitted_height = fitted.height(),
            "Loaded source image"
        );
        self.source = Some(fitted);
        self.bump();
        Ok(())
    }

    /// Validate raw RGBA bytes from a decoder and load them.
    pub fn load_rgba(
        &mut self,
        width: u32,
        height: u32,
        samples: Vec<u8>,
    ) -> Result<(), SessionError> {
        let image = PixelBuffer::new(width, height, samples).map_err(PipelineError::from)?;
        self.load_image(image)
    }

    /// Set one effect's intensity. Out-of-range values are clamped.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_effect(&mut self, kind: EffectKind, value: i64) -> bool {
        if Intensity::is_out_of_range(value) {
            tracing::warn!(effect = %kind, value, "Intensity out of range, clamping to [0, 100]");
        }
        let intensity = Intensity::new(value);
        if self.settings.get(kind) == intensity {
            return false;
        }
        tracing::debug!(effect = %kind, intensity = intensity.value(), "Effect changed");
        self.settings.set(kind, intensity);
        self.bump();
        true
    }

    /// Set an effect by wire identifier. Unknown identifiers are ignored.
    pub fn set_effect_by_id(&mut self, id: &str, value: i64) -> bool {
        match EffectKind::from_id(id) {
            Some(kind) => self.set_effect(kind, value),
            None => {
                tracing::debug!(id, "Ignoring unknown effect identifier");
                false
            }
        }
    }

    /// Set every intensity back to zero.
    pub fn reset_effects(&mut self) {
        if self.settings.is_all_zero() {
            return;
        }
        tracing::debug!("Resetting all effects");
        self.settings.reset();
        self.bump();
    }

    /// Drop the current picture and reset all effects.
    pub fn change_picture(&mut self) {
        tracing::debug!(had_image = self.source.is_some(), "Changing picture");
        self.source = None;
        self.settings.reset();
        self.bump();
    }

    /// Run the pipeline over the pristine source.
    pub fn render(&self) -> Result<PixelBuffer, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoImage)?;
        Ok(self.pipeline.apply(source, &self.settings))
    }

    /// Package the current source and settings for a [`RenderWorker`].
    ///
    /// [`RenderWorker`]: crate::RenderWorker
    pub fn render_request(&self) -> Result<RenderRequest, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoImage)?;
        Ok(RenderRequest {
            revision: self.revision,
            source: source.clone(),
            settings: self.settings,
        })
    }

    /// Capture the current settings.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot::capture(self)
    }

    /// Replace all settings at once.
    pub fn apply_settings(&mut self, settings: EffectSettings) {
        if self.settings == settings {
            return;
        }
        tracing::debug!(active = settings.active_count(), "Applying settings");
        self.settings = settings;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
