//! VHS Distortion effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::hash::{signed_unit_f32, spatial_hash};
use crate::traits::{clamp_u8, Effect};

const JITTER_SALT: u64 = 0x5648_5300;

/// Displaces each row horizontally along a sine wave and adds per-row
/// luminance jitter to emulate tape noise.
///
/// Row `y` is shifted by `dx(y) = amplitude * sin(y * frequency + phase)`
/// where `amplitude` scales linearly with intensity. Source columns past an
/// edge clamp to that edge.
pub struct VhsDistortionEffect {
    max_amplitude: f32,
    frequency: f32,
    phase: f32,
    max_jitter: f32,
    seed: u64,
}

impl VhsDistortionEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            max_amplitude: tuning.vhs_max_amplitude,
            frequency: tuning.vhs_frequency,
            phase: tuning.vhs_phase,
            max_jitter: tuning.vhs_max_jitter,
            seed: tuning.seed,
        }
    }

    /// Horizontal displacement of row `y` in whole pixels.
    pub fn row_offset(&self, y: u32, intensity: Intensity) -> i64 {
        let amplitude = self.max_amplitude * intensity.fraction();
        (amplitude * (y as f32 * self.frequency + self.phase).sin()).round() as i64
    }

    /// Luminance offset added to every channel of row `y`.
    fn row_jitter(&self, y: u32, intensity: Intensity) -> f32 {
        let noise = signed_unit_f32(spatial_hash(self.seed ^ JITTER_SALT, u64::from(y), 0));
        (noise * self.max_jitter * intensity.fraction()).round()
    }
}

impl Default for VhsDistortionEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for VhsDistortionEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::VhsDistortion
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();

        for y in 0..input.height() {
            let dx = self.row_offset(y, intensity);
            let jitter = self.row_jitter(y, intensity);
            let row = y as i64;
            for x in 0..input.width() {
                let src = input.pixel_clamped((x as i64).saturating_sub(dx), row);
                output.set_pixel(
                    x,
                    y,
                    [
                        clamp_u8(f32::from(src[0]) + jitter),
                        clamp_u8(f32::from(src[1]) + jitter),
                        clamp_u8(f32::from(src[2]) + jitter),
                        src[3],
                    ],
                );
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::{all_opaque, gradient};

    fn no_jitter() -> VhsDistortionEffect {
        VhsDistortionEffect::from_tuning(&EffectTuning {
            vhs_max_jitter: 0.0,
            ..EffectTuning::default()
        })
    }

    #[test]
    fn vhs_metadata() {
        let fx = VhsDistortionEffect::new();
        assert_eq!(fx.name(), "vhsDistortion");
        assert_eq!(fx.display_name(), "VHS Distortion");
    }

    #[test]
    fn row_offset_follows_sine_wave() {
        let fx = no_jitter();
        assert_eq!(fx.row_offset(0, Intensity::MAX), 0);
        // sin(31 * 0.05) ~= 0.9998 -> ~20 px at full amplitude
        assert_eq!(fx.row_offset(31, Intensity::MAX), 20);
        assert_eq!(fx.row_offset(31, Intensity::new(50)), 10);
        // Second half of the period moves the other way.
        assert!(fx.row_offset(94, Intensity::MAX) < 0);
    }

    #[test]
    fn rows_are_displaced_with_clamping() {
        let input = gradient(64, 40);
        let fx = no_jitter();
        let output = fx.apply(&input, Intensity::MAX);
        let dx = fx.row_offset(31, Intensity::MAX);
        assert_eq!(output.pixel(40, 31), input.pixel((40 - dx) as u32, 31));
        // Columns left of the shift clamp to column 0.
        assert_eq!(output.pixel(0, 31), input.pixel(0, 31));
        assert!(all_opaque(&output));
    }

    #[test]
    fn jitter_is_uniform_across_a_row() {
        let input = PixelBuffer::filled(8, 16, [128, 128, 128, 255]).unwrap();
        let output = VhsDistortionEffect::new().apply(&input, Intensity::MAX);
        for y in 0..16 {
            let first = output.pixel(0, y);
            assert!((0..8).all(|x| output.pixel(x, y) == first));
        }
        // With 16 rows of noise, at least one row must differ from the source.
        assert_ne!(output, input);
    }

    #[test]
    fn extreme_amplitude_clamps_to_edges() {
        let input = gradient(16, 128);
        let fx = VhsDistortionEffect::from_tuning(&EffectTuning {
            vhs_max_amplitude: 1e30,
            vhs_max_jitter: 0.0,
            ..EffectTuning::default()
        });
        assert_eq!(fx.row_offset(94, Intensity::MAX), i64::MIN);
        let output = fx.apply(&input, Intensity::MAX);
        assert_eq!(output.pixel(3, 94), input.pixel(15, 94));
        assert_eq!(output.pixel(3, 31), input.pixel(0, 31));
    }

    #[test]
    fn deterministic() {
        let input = gradient(32, 32);
        let fx = VhsDistortionEffect::new();
        assert_eq!(fx.apply(&input, Intensity::new(70)), fx.apply(&input, Intensity::new(70)));
    }
}
