//! Serializable settings snapshot for save, share, and publish.
//!
//! `SettingsSnapshot` captures the eight intensities and nothing else. It
//! serializes as a flat JSON object keyed by effect identifier, e.g.
//! `{"bitCrush": 90, "rgbSplit": 40, ...}`, and restoring one follows the
//! intensities-map rules: unknown keys are ignored, values clamped.

use gs_common::{EffectKind, EffectSettings};
use serde::{Deserialize, Serialize};

use crate::state::EditorState;
use crate::SessionError;

/// One `(label, value)` pair describing an effect in a published result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectAttribute {
    /// Display label, e.g. `"VHS Distortion"`.
    pub trait_type: String,
    /// Intensity in `[0, 100]`.
    pub value: u8,
}

/// Snapshot of the effect settings.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    settings: EffectSettings,
}

impl SettingsSnapshot {
    /// Capture the settings of an editor session.
    pub fn capture(state: &EditorState) -> Self {
        Self::from_settings(*state.settings())
    }

    pub fn from_settings(settings: EffectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// Restore these settings into `state`. The source image is untouched.
    pub fn restore(&self, state: &mut EditorState) {
        state.apply_settings(self.settings);
    }

    /// Display-labelled intensities in composition order.
    pub fn attributes(&self) -> Vec<EffectAttribute> {
        self.settings
            .iter()
            .map(|(kind, intensity)| EffectAttribute {
                trait_type: kind.display_name().to_string(),
                value: intensity.value(),
            })
            .collect()
    }

    /// Attributes for active effects only.
    pub fn active_attributes(&self) -> Vec<EffectAttribute> {
        self.settings
            .iter()
            .filter(|(_, intensity)| intensity.is_active())
            .map(|(kind, intensity)| EffectAttribute {
                trait_type: kind.display_name().to_string(),
                value: intensity.value(),
            })
            .collect()
    }

    /// Intensity for one effect.
    pub fn value(&self, kind: EffectKind) -> u8 {
        self.settings.get(kind).value()
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use gs_common::Intensity;

    use super::*;

    fn sample_settings() -> EffectSettings {
        EffectSettings::new()
            .with(EffectKind::VhsDistortion, Intensity::new(45))
            .with(EffectKind::BitCrush, Intensity::new(90))
    }

    #[test]
    fn capture_and_restore() {
        let mut state = EditorState::new();
        state.set_effect(EffectKind::GlitchBars, 60);
        let snap = state.snapshot();

        state.reset_effects();
        assert!(state.settings().is_all_zero());

        snap.restore(&mut state);
        assert_eq!(state.settings().get(EffectKind::GlitchBars).value(), 60);
    }

    #[test]
    fn json_is_flat_object() {
        let snap = SettingsSnapshot::from_settings(sample_settings());
        let json = snap.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vhsDistortion"], 45);
        assert_eq!(value["bitCrush"], 90);
        assert_eq!(value["rgbSplit"], 0);
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn from_json_ignores_unknown_and_clamps() {
        let snap =
            SettingsSnapshot::from_json(r#"{ "colorShift": 250, "sepia": 10, "scanLines": 12 }"#)
                .unwrap();
        assert_eq!(snap.value(EffectKind::ColorShift), 100);
        assert_eq!(snap.value(EffectKind::ScanLines), 12);
        assert_eq!(snap.value(EffectKind::RgbSplit), 0);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            SettingsSnapshot::from_json("not json"),
            Err(SessionError::Snapshot(_))
        ));
    }

    #[test]
    fn attributes_follow_composition_order() {
        let snap = SettingsSnapshot::from_settings(sample_settings());
        let attrs = snap.attributes();
        assert_eq!(attrs.len(), 8);
        assert_eq!(attrs[0].trait_type, "RGB Split");
        assert_eq!(attrs[2].trait_type, "VHS Distortion");
        assert_eq!(attrs[2].value, 45);
        assert_eq!(attrs[7].trait_type, "Bit Crush");
        assert_eq!(attrs[7].value, 90);
    }

    #[test]
    fn active_attributes_skip_zero() {
        let snap = SettingsSnapshot::from_settings(sample_settings());
        let attrs = snap.active_attributes();
        assert_eq!(
            attrs,
            vec![
                EffectAttribute {
                    trait_type: "VHS Distortion".to_string(),
                    value: 45,
                },
                EffectAttribute {
                    trait_type: "Bit Crush".to_string(),
                    value: 90,
                },
            ]
        );
    }
}
