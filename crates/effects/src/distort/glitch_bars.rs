//! Glitch Bars effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::hash::{signed_unit_f32, spatial_hash};
use crate::traits::Effect;

const BARS_SALT: u64 = 0x4241_5253;

/// One displaced horizontal band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlitchBar {
    /// First row of the band.
    pub top: u32,
    /// Band height in rows (at least 1, clipped to the image).
    pub height: u32,
    /// Horizontal displacement in pixels (wraps around).
    pub offset: i64,
}

/// Tears horizontal bands sideways by per-band offsets.
///
/// The band count grows with intensity. Each band's position, height, and
/// offset come from a seeded hash of the band index, so the same settings
/// always produce the same bars. Displaced pixels wrap around horizontally,
/// giving discrete blocky tears rather than a smooth wave.
pub struct GlitchBarsEffect {
    max_count: u32,
    max_offset: f32,
    seed: u64,
}

impl GlitchBarsEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            max_count: tuning.glitch_bar_max_count,
            max_offset: tuning.glitch_bar_max_offset,
            seed: tuning.seed ^ BARS_SALT,
        }
    }

    /// Number of bands at `intensity` (at least one when active).
    pub fn bar_count(&self, intensity: Intensity) -> u32 {
        (intensity.fraction() * self.max_count as f32).ceil() as u32
    }

    /// Compute the bands for an image of the given size.
    pub fn bars(&self, width: u32, height: u32, intensity: Intensity) -> Vec<GlitchBar> {
        let max_band_height = (height / 8).max(1);
        let max_shift = self.max_offset * intensity.fraction() * width as f32;

        (0..self.bar_count(intensity))
            .map(|index| {
                let index = u64::from(index);
                let top = (spatial_hash(self.seed, index, 0) % u64::from(height)) as u32;
                let band =
                    1 + (spatial_hash(self.seed, index, 1) % u64::from(max_band_height)) as u32;
                let offset =
                    (signed_unit_f32(spatial_hash(self.seed, index, 2)) * max_shift).round() as i64;
                GlitchBar {
                    top,
                    height: band.min(height - top),
                    offset,
                }
            })
            .collect()
    }
}

impl Default for GlitchBarsEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for GlitchBarsEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::GlitchBars
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let width = input.width() as i64;

        for bar in self.bars(input.width(), input.height(), intensity) {
            if bar.offset == 0 {
                continue;
            }
            for y in bar.top..bar.top + bar.height {
                for x in 0..input.width() {
                    let src_x = (x as i64 - bar.offset).rem_euclid(width) as u32;
                    output.set_pixel(x, y, input.pixel(src_x, y));
                }
            }
        }
        output
    }
}
