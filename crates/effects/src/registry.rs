//! Effect registry: the fixed, ordered table of the eight effects.
//!
//! Composition order comes from [`EffectKind::ALL`], never from map
//! iteration. Dispatch goes through the [`GlitchEffect`] enum, so adding a
//! ninth [`EffectKind`] fails to compile until it has an algorithm.

use gs_common::{EffectCategory, EffectKind, EffectTuning, Intensity, PixelBuffer};
use tracing::info;

use crate::color::{BitCrushEffect, ColorShiftEffect};
use crate::distort::{
    ChromaticAberrationEffect, GlitchBarsEffect, RgbSplitEffect, VhsDistortionEffect,
};
use crate::stylize::{DigitalCorruptionEffect, ScanLinesEffect};
use crate::traits::Effect;

/// One of the eight algorithms, dispatched by variant.
pub enum GlitchEffect {
    RgbSplit(RgbSplitEffect),
    ScanLines(ScanLinesEffect),
    VhsDistortion(VhsDistortionEffect),
    ChromaticAberration(ChromaticAberrationEffect),
    DigitalCorruption(DigitalCorruptionEffect),
    ColorShift(ColorShiftEffect),
    GlitchBars(GlitchBarsEffect),
    BitCrush(BitCrushEffect),
}

impl GlitchEffect {
    /// Build the algorithm for `kind` from `tuning`.
    pub fn from_kind(kind: EffectKind, tuning: &EffectTuning) -> Self {
        match kind {
            EffectKind::RgbSplit => Self::RgbSplit(RgbSplitEffect::from_tuning(tuning)),
            EffectKind::ScanLines => Self::ScanLines(ScanLinesEffect::from_tuning(tuning)),
            EffectKind::VhsDistortion => {
                Self::VhsDistortion(VhsDistortionEffect::from_tuning(tuning))
            }
            EffectKind::ChromaticAberration => {
                Self::ChromaticAberration(ChromaticAberrationEffect::from_tuning(tuning))
            }
            EffectKind::DigitalCorruption => {
                Self::DigitalCorruption(DigitalCorruptionEffect::from_tuning(tuning))
            }
            EffectKind::ColorShift => Self::ColorShift(ColorShiftEffect::from_tuning(tuning)),
            EffectKind::GlitchBars => Self::GlitchBars(GlitchBarsEffect::from_tuning(tuning)),
            EffectKind::BitCrush => Self::BitCrush(BitCrushEffect::from_tuning(tuning)),
        }
    }
}

impl Effect for GlitchEffect {
    fn kind(&self) -> EffectKind {
        match self {
            Self::RgbSplit(_) => EffectKind::RgbSplit,
            Self::ScanLines(_) => EffectKind::ScanLines,
            Self::VhsDistortion(_) => EffectKind::VhsDistortion,
            Self::ChromaticAberration(_) => EffectKind::ChromaticAberration,
            Self::DigitalCorruption(_) => EffectKind::DigitalCorruption,
            Self::ColorShift(_) => EffectKind::ColorShift,
            Self::GlitchBars(_) => EffectKind::GlitchBars,
            Self::BitCrush(_) => EffectKind::BitCrush,
        }
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        match self {
            Self::RgbSplit(fx) => fx.apply(input, intensity),
            Self::ScanLines(fx) => fx.apply(input, intensity),
            Self::VhsDistortion(fx) => fx.apply(input, intensity),
            Self::ChromaticAberration(fx) => fx.apply(input, intensity),
            Self::DigitalCorruption(fx) => fx.apply(input, intensity),
            Self::ColorShift(fx) => fx.apply(input, intensity),
            Self::GlitchBars(fx) => fx.apply(input, intensity),
            Self::BitCrush(fx) => fx.apply(input, intensity),
        }
    }
}

/// An effect bound to its position in the composition order.
pub struct EffectEntry {
    kind: EffectKind,
    position: usize,
    effect: GlitchEffect,
}

impl EffectEntry {
    fn new(kind: EffectKind, tuning: &EffectTuning) -> Self {
        Self {
            kind,
            position: kind.position(),
            effect: GlitchEffect::from_kind(kind, tuning),
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn effect(&self) -> &GlitchEffect {
        &self.effect
    }

    /// Run this entry's algorithm.
    pub fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        self.effect.apply(input, intensity)
    }
}

/// The eight effects in composition order.
pub struct EffectRegistry {
    entries: [EffectEntry; EffectKind::COUNT],
}

impl EffectRegistry {
    /// Registry with default tuning.
    pub fn with_builtins() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    /// Registry whose algorithms use `tuning`.
    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        let entries = EffectKind::ALL.map(|kind| EffectEntry::new(kind, tuning));
        info!(count = entries.len(), seed = tuning.seed, "Registered glitch effects");
        Self { entries }
    }

    /// All entries, in composition order.
    pub fn entries(&self) -> &[EffectEntry] {
        &self.entries
    }

    /// Entry for `kind`.
    pub fn get(&self, kind: EffectKind) -> &EffectEntry {
        &self.entries[kind.position()]
    }

    /// Look up an entry by wire identifier. Unknown identifiers yield `None`.
    pub fn get_by_id(&self, id: &str) -> Option<&EffectEntry> {
        EffectKind::from_id(id).map(|kind| self.get(kind))
    }

    /// Entries in `category`, in composition order.
    pub fn list_by_category(&self, category: EffectCategory) -> Vec<&EffectEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind.category() == category)
            .collect()
    }

    /// Number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
