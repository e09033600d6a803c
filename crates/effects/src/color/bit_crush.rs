//! Bit Crush effect (per-channel quantization).

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::traits::{clamp_u8, Effect};

/// Quantizes RGB to `levels = max(2, 256 >> floor(intensity / 100 * max_shift))`
/// evenly spaced values in `[0, 255]`. Alpha is untouched.
pub struct BitCrushEffect {
    max_shift: u32,
}

impl BitCrushEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            max_shift: tuning.bit_crush_max_shift.min(7),
        }
    }

    /// Number of quantization levels per channel at `intensity`.
    pub fn levels(&self, intensity: Intensity) -> u32 {
        let shift = u32::from(intensity.value()) * self.max_shift / 100;
        (256u32 >> shift).max(2)
    }

    /// 256-entry lookup table mapping each channel value to its level.
    pub fn lookup_table(&self, intensity: Intensity) -> [u8; 256] {
        let step = 255.0 / (self.levels(intensity) - 1) as f32;
        std::array::from_fn(|v| clamp_u8((v as f32 / step).round() * step))
    }
}

impl Default for BitCrushEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for BitCrushEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::BitCrush
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let lut = self.lookup_table(intensity);

        for px in output.pixels_mut() {
            for c in &mut px[..3] {
                *c = lut[usize::from(*c)];
            }
        }
        output
    }
}
