//! Chromatic Aberration effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::traits::Effect;

/// Radial red/blue fringing around the image center.
///
/// For each pixel at offset `d` from the center, red is sampled from
/// `p + d * k` (further out) and blue from `p - d * k` (further in), where
/// `k = intensity / 100 * factor`. Green and alpha stay in place, so the
/// center pixel is unchanged and fringes widen toward the corners.
pub struct ChromaticAberrationEffect {
    factor: f32,
}

impl ChromaticAberrationEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            factor: tuning.chromatic_factor,
        }
    }
}

impl Default for ChromaticAberrationEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for ChromaticAberrationEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::ChromaticAberration
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let k = intensity.fraction() * self.factor;
        if k == 0.0 {
            return output;
        }

        let cx = (input.width() as f32 - 1.0) / 2.0;
        let cy = (input.height() as f32 - 1.0) / 2.0;

        for y in 0..input.height() {
            let dy = (y as f32 - cy) * k;
            for x in 0..input.width() {
                let dx = (x as f32 - cx) * k;
                let red = input.pixel_clamped(
                    (x as f32 + dx).round() as i64,
                    (y as f32 + dy).round() as i64,
                )[0];
                let blue = input.pixel_clamped(
                    (x as f32 - dx).round() as i64,
                    (y as f32 - dy).round() as i64,
                )[2];
                let i = output.byte_index(x, y);
                let samples = output.samples_mut();
                samples[i] = red;
                samples[i + 2] = blue;
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::{all_opaque, gradient};

    #[test]
    fn chromatic_metadata() {
        let fx = ChromaticAberrationEffect::new();
        assert_eq!(fx.name(), "chromaticAberration");
        assert_eq!(fx.display_name(), "Chromatic");
    }

    #[test]
    fn center_pixel_is_unchanged() {
        let input = gradient(41, 41);
        let output = ChromaticAberrationEffect::new().apply(&input, Intensity::MAX);
        assert_eq!(output.pixel(20, 20), input.pixel(20, 20));
    }

    #[test]
    fn red_samples_outward_and_blue_inward() {
        // Red and blue both encode the column index.
        let input = PixelBuffer::from_fn(201, 1, |x, _| [x as u8, 0, x as u8, 255]).unwrap();
        let fx = ChromaticAberrationEffect::from_tuning(&EffectTuning {
            chromatic_factor: 0.1,
            ..EffectTuning::default()
        });
        let output = fx.apply(&input, Intensity::MAX);
        // Column 150 is 50 px right of center: offset 5 px.
        assert_eq!(output.pixel(150, 0)[0], 155);
        assert_eq!(output.pixel(150, 0)[2], 145);
        // Column 50 is 50 px left of center: red moves further left.
        assert_eq!(output.pixel(50, 0)[0], 45);
        assert_eq!(output.pixel(50, 0)[2], 55);
    }

    #[test]
    fn green_and_alpha_untouched() {
        let input = gradient(30, 20);
        let output = ChromaticAberrationEffect::new().apply(&input, Intensity::MAX);
        for (a, b) in input.pixels().zip(output.pixels()) {
            assert_eq!(a[1], b[1]);
        }
        assert!(all_opaque(&output));
    }
}
