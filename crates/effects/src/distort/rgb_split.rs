//! RGB Split effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::traits::Effect;

/// Shifts the red and blue channels horizontally in opposite directions.
///
/// With `offset = round(intensity / 100 * max_shift)`, output red at column
/// `x` comes from column `x - offset` and output blue from `x + offset`.
/// Green and alpha stay in place. Columns past either edge clamp to the
/// edge column.
pub struct RgbSplitEffect {
    max_shift: u32,
}

impl RgbSplitEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            max_shift: tuning.rgb_split_max_shift,
        }
    }

    /// Channel shift in pixels for `intensity`.
    pub fn offset(&self, intensity: Intensity) -> i64 {
        (intensity.fraction() * self.max_shift as f32).round() as i64
    }
}

impl Default for RgbSplitEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for RgbSplitEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::RgbSplit
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let offset = self.offset(intensity);
        let mut output = input.clone();
        if offset == 0 {
            return output;
        }

        for y in 0..input.height() {
            let row = y as i64;
            for x in 0..input.width() {
                let col = x as i64;
                let red = input.pixel_clamped(col - offset, row)[0];
                let blue = input.pixel_clamped(col + offset, row)[2];
                let i = output.byte_index(x, y);
                let samples = output.samples_mut();
                samples[i] = red;
                samples[i + 2] = blue;
            }
        }
        output
    }
}
