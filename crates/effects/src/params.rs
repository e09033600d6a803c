//! Intensity-map parsing: string-keyed control values into [`EffectSettings`].
//!
//! Callers hand over whatever their controls produced. The rules are:
//! - Unknown identifiers are ignored, so newer callers can carry extra keys
//! - Values outside `[0, 100]` are clamped, not rejected
//! - Absent identifiers stay at zero (inactive)

use std::collections::HashMap;

use gs_common::{EffectKind, EffectSettings, Intensity};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EffectError;

/// Resolve one `(id, value)` pair. Returns `None` for unknown identifiers.
pub fn resolve_intensity(id: &str, value: i64) -> Option<(EffectKind, Intensity)> {
    let Some(kind) = EffectKind::from_id(id) else {
        debug!(id, "Ignoring unknown effect identifier");
        return None;
    };
    if Intensity::is_out_of_range(value) {
        warn!(effect = %kind, value, "Intensity out of range, clamping to [0, 100]");
    }
    Some((kind, Intensity::new(value)))
}

/// Build settings from `(id, value)` pairs. Later pairs win on duplicates.
pub fn settings_from_pairs<'a, I>(pairs: I) -> EffectSettings
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut settings = EffectSettings::new();
    for (id, value) in pairs {
        if let Some((kind, intensity)) = resolve_intensity(id, value) {
            settings.set(kind, intensity);
        }
    }
    settings
}

/// Build settings from a string-keyed map.
pub fn settings_from_map(map: &HashMap<String, i64>) -> EffectSettings {
    settings_from_pairs(map.iter().map(|(id, value)| (id.as_str(), *value)))
}

/// Build settings from a JSON object such as `{"rgbSplit": 40, "bitCrush": 90}`.
///
/// Fractional numbers are rounded. A known identifier with a non-numeric
/// value is an error; unknown identifiers are skipped whatever their value.
pub fn settings_from_json(value: &Value) -> Result<EffectSettings, EffectError> {
    let obj = value.as_object().ok_or_else(|| EffectError::NotAnObject {
        got: value.to_string(),
    })?;

    let mut settings = EffectSettings::new();
    for (id, raw) in obj {
        let Some(number) = json_intensity(raw) else {
            if EffectKind::from_id(id).is_some() {
                return Err(EffectError::ParamTypeMismatch {
                    param: id.clone(),
                    expected: "integer".to_string(),
                    got: raw.to_string(),
                });
            }
            debug!(id = %id, "Ignoring unknown effect identifier");
            continue;
        };
        if let Some((kind, intensity)) = resolve_intensity(id, number) {
            settings.set(kind, intensity);
        }
    }
    Ok(settings)
}

/// Parse settings from a JSON string.
pub fn settings_from_json_str(json: &str) -> Result<EffectSettings, EffectError> {
    let value: Value = serde_json::from_str(json)?;
    settings_from_json(&value)
}

fn json_intensity(raw: &Value) -> Option<i64> {
    if let Some(v) = raw.as_i64() {
        return Some(v);
    }
    if raw.is_u64() {
        return Some(i64::MAX);
    }
    raw.as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}
