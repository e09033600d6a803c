//! Scan Lines effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::traits::{clamp_u8, Effect};

/// Darkens every `period`-th row, starting with row 0.
///
/// RGB in those rows is multiplied by `1 - intensity / 100 * max_darken`.
/// Other rows and alpha are untouched.
pub struct ScanLinesEffect {
    period: u32,
    max_darken: f32,
}

impl ScanLinesEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            period: tuning.scan_line_period.max(1),
            max_darken: tuning.scan_line_max_darken,
        }
    }

    /// Channel multiplier applied to darkened rows.
    pub fn factor(&self, intensity: Intensity) -> f32 {
        1.0 - intensity.fraction() * self.max_darken
    }

    pub fn is_scan_line(&self, y: u32) -> bool {
        y % self.period == 0
    }
}

impl Default for ScanLinesEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for ScanLinesEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::ScanLines
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let factor = self.factor(intensity);

        for y in (0..input.height()).filter(|&y| self.is_scan_line(y)) {
            for px in output.row_mut(y).chunks_exact_mut(4) {
                for c in &mut px[..3] {
                    *c = clamp_u8(f32::from(*c) * factor);
                }
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::all_opaque;

    #[test]
    fn scan_lines_metadata() {
        let fx = ScanLinesEffect::new();
        assert_eq!(fx.name(), "scanLines");
        assert_eq!(fx.display_name(), "Scan Lines");
    }

    #[test]
    fn factor_at_extremes() {
        let fx = ScanLinesEffect::new();
        assert!((fx.factor(Intensity::ZERO) - 1.0).abs() < 1e-6);
        assert!((fx.factor(Intensity::MAX) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn only_periodic_rows_are_darkened() {
        let input = PixelBuffer::filled(4, 7, [200, 100, 50, 255]).unwrap();
        let output = ScanLinesEffect::new().apply(&input, Intensity::MAX);
        for y in 0..7 {
            let px = output.pixel(1, y);
            if y % 3 == 0 {
                assert_eq!(px, [60, 30, 15, 255], "row {y}");
            } else {
                assert_eq!(px, [200, 100, 50, 255], "row {y}");
            }
        }
        assert!(all_opaque(&output));
    }

    #[test]
    fn custom_period() {
        let fx = ScanLinesEffect::from_tuning(&EffectTuning {
            scan_line_period: 2,
            ..EffectTuning::default()
        });
        let input = PixelBuffer::filled(2, 4, [100, 100, 100, 255]).unwrap();
        let output = fx.apply(&input, Intensity::new(50));
        // factor = 1 - 0.5 * 0.7 = 0.65
        assert_eq!(output.pixel(0, 2)[0], 65);
        assert_eq!(output.pixel(0, 3)[0], 100);
    }
}
