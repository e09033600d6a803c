//! Effect identifiers, intensities, and the per-effect settings map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Effect category for UI grouping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    /// Moves pixels or channels around.
    Distort,
    /// Overlays a texture-like pattern.
    Stylize,
    /// Changes color values in place.
    Color,
}

impl EffectCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Distort => "Distort",
            Self::Stylize => "Stylize",
            Self::Color => "Color",
        }
    }
}

/// The eight glitch effects.
///
/// Declaration order is the composition order: [`EffectKind::ALL`] lists the
/// variants in the sequence the pipeline applies them, and
/// [`EffectKind::position`] is the index into that list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    RgbSplit,
    ScanLines,
    VhsDistortion,
    ChromaticAberration,
    DigitalCorruption,
    ColorShift,
    GlitchBars,
    BitCrush,
}

impl EffectKind {
    /// Number of effects.
    pub const COUNT: usize = 8;

    /// Every effect, in composition order.
    pub const ALL: [EffectKind; Self::COUNT] = [
        Self::RgbSplit,
        Self::ScanLines,
        Self::VhsDistortion,
        Self::ChromaticAberration,
        Self::DigitalCorruption,
        Self::ColorShift,
        Self::GlitchBars,
        Self::BitCrush,
    ];

    /// Zero-based position in the composition order.
    pub const fn position(self) -> usize {
        match self {
            Self::RgbSplit => 0,
            Self::ScanLines => 1,
            Self::VhsDistortion => 2,
            Self::ChromaticAberration => 3,
            Self::DigitalCorruption => 4,
            Self::ColorShift => 5,
            Self::GlitchBars => 6,
            Self::BitCrush => 7,
        }
    }

    /// Wire identifier used in settings maps.
    pub const fn id(self) -> &'static str {
        match self {
            Self::RgbSplit => "rgbSplit",
            Self::ScanLines => "scanLines",
            Self::VhsDistortion => "vhsDistortion",
            Self::ChromaticAberration => "chromaticAberration",
            Self::DigitalCorruption => "digitalCorruption",
            Self::ColorShift => "colorShift",
            Self::GlitchBars => "glitchBars",
            Self::BitCrush => "bitCrush",
        }
    }

    /// Short label shown next to the control.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::RgbSplit => "RGB Split",
            Self::ScanLines => "Scan Lines",
            Self::VhsDistortion => "VHS Distortion",
            Self::ChromaticAberration => "Chromatic",
            Self::DigitalCorruption => "Corruption",
            Self::ColorShift => "Color Shift",
            Self::GlitchBars => "Glitch Bars",
            Self::BitCrush => "Bit Crush",
        }
    }

    pub const fn category(self) -> EffectCategory {
        match self {
            Self::RgbSplit | Self::VhsDistortion | Self::ChromaticAberration | Self::GlitchBars => {
                EffectCategory::Distort
            }
            Self::ScanLines | Self::DigitalCorruption => EffectCategory::Stylize,
            Self::ColorShift | Self::BitCrush => EffectCategory::Color,
        }
    }

    /// Parse a wire identifier. Unknown identifiers yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Effect strength in `[0, 100]`. Zero means the effect is skipped.
///
/// Deserializes from any integer, clamped the same way as [`Intensity::new`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64")]
pub struct Intensity(u8);

impl Intensity {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Build an intensity, clamping `value` into `[0, 100]`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Whether `value` would be altered by [`Intensity::new`].
    pub fn is_out_of_range(value: i64) -> bool {
        !(0..=100).contains(&value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `value / 100` as a float in `[0, 1]`.
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for Intensity {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One intensity per effect, indexed by [`EffectKind::position`].
///
/// Serializes as a map keyed by wire identifier. Deserialization clamps
/// values into range and ignores unknown keys; absent keys stay at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct EffectSettings {
    values: [Intensity; EffectKind::COUNT],
}

impl EffectSettings {
    /// All effects at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect at the same intensity.
    pub fn uniform(intensity: Intensity) -> Self {
        Self {
            values: [intensity; EffectKind::COUNT],
        }
    }

    pub fn get(&self, kind: EffectKind) -> Intensity {
        self.values[kind.position()]
    }

    pub fn set(&mut self, kind: EffectKind, intensity: Intensity) {
        self.values[kind.position()] = intensity;
    }

    pub fn with(mut self, kind: EffectKind, intensity: Intensity) -> Self {
        self.set(kind, intensity);
        self
    }

    /// Set every effect back to zero.
    pub fn reset(&mut self) {
        self.values = [Intensity::ZERO; EffectKind::COUNT];
    }

    /// `(kind, intensity)` pairs in composition order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, Intensity)> + '_ {
        EffectKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Number of effects with a non-zero intensity.
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_active()).count()
    }

    pub fn is_all_zero(&self) -> bool {
        self.active_count() == 0
    }
}

impl From<BTreeMap<String, i64>> for EffectSettings {
    fn from(map: BTreeMap<String, i64>) -> Self {
        let mut settings = Self::new();
        for (id, value) in map {
            if let Some(kind) = EffectKind::from_id(&id) {
                settings.set(kind, Intensity::new(value));
            }
        }
        settings
    }
}

impl From<EffectSettings> for BTreeMap<String, i64> {
    fn from(settings: EffectSettings) -> Self {
        settings
            .iter()
            .map(|(kind, v)| (kind.id().to_string(), i64::from(v.value())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_composition_order() {
        for (i, kind) in EffectKind::ALL.iter().enumerate() {
            assert_eq!(kind.position(), i);
        }
        assert_eq!(EffectKind::ALL[0], EffectKind::RgbSplit);
        assert_eq!(EffectKind::ALL[7], EffectKind::BitCrush);
    }

    #[test]
    fn ids_round_trip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(EffectKind::from_id("sepia"), None);
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&EffectKind::ChromaticAberration).unwrap();
        assert_eq!(json, "\"chromaticAberration\"");
    }

    #[test]
    fn categories_cover_all_kinds() {
        let distort = EffectKind::ALL
            .iter()
            .filter(|k| k.category() == EffectCategory::Distort)
            .count();
        assert_eq!(distort, 4);
        assert_eq!(EffectKind::BitCrush.category(), EffectCategory::Color);
        assert_eq!(EffectKind::ScanLines.category().display_name(), "Stylize");
    }

    #[test]
    fn intensity_clamps() {
        assert_eq!(Intensity::new(-20).value(), 0);
        assert_eq!(Intensity::new(250).value(), 100);
        assert_eq!(Intensity::new(42).value(), 42);
        assert!(Intensity::is_out_of_range(101));
        assert!(!Intensity::is_out_of_range(100));
        assert!(!Intensity::ZERO.is_active());
        assert!((Intensity::new(50).fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn intensity_deserialize_clamps() {
        let high: Intensity = serde_json::from_str("250").unwrap();
        assert_eq!(high, Intensity::MAX);
        let low: Intensity = serde_json::from_str("-7").unwrap();
        assert_eq!(low, Intensity::ZERO);
        let mid: Intensity = serde_json::from_str("64").unwrap();
        assert_eq!(mid.value(), 64);
        assert_eq!(serde_json::to_string(&mid).unwrap(), "64");
    }

    #[test]
    fn settings_get_set_reset() {
        let mut settings = EffectSettings::new();
        assert!(settings.is_all_zero());
        settings.set(EffectKind::ColorShift, Intensity::new(30));
        assert_eq!(settings.get(EffectKind::ColorShift).value(), 30);
        assert_eq!(settings.active_count(), 1);
        settings.reset();
        assert!(settings.is_all_zero());
    }

    #[test]
    fn settings_deserialize_clamps_and_ignores_unknown() {
        let json = r#"{ "rgbSplit": 150, "bitCrush": -3, "sepia": 40, "scanLines": 12 }"#;
        let settings: EffectSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.get(EffectKind::RgbSplit).value(), 100);
        assert_eq!(settings.get(EffectKind::BitCrush).value(), 0);
        assert_eq!(settings.get(EffectKind::ScanLines).value(), 12);
        assert_eq!(settings.get(EffectKind::GlitchBars).value(), 0);
    }

    #[test]
    fn settings_serialize_every_key() {
        let settings = EffectSettings::new().with(EffectKind::GlitchBars, Intensity::new(5));
        let value = serde_json::to_value(settings).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), EffectKind::COUNT);
        assert_eq!(obj["glitchBars"], 5);
        assert_eq!(obj["vhsDistortion"], 0);
    }
}
