//! Digital Corruption effect.

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::hash::{rgb_bytes, spatial_hash};
use crate::traits::Effect;

const CORRUPTION_SALT: u64 = 0x434F_5252;

/// How a selected block is overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorruptionPattern {
    /// Independent hashed color per pixel.
    Noise,
    /// One hashed color over the whole block.
    Solid,
    /// Rows alternating between two hashed colors.
    Stripes,
}

/// Replaces a deterministic subset of fixed-size blocks with hashed
/// pseudo-random patterns.
///
/// A block at grid position `(bx, by)` is corrupted when
/// `hash(seed, bx, by) % 100 < intensity`, so about `intensity`% of blocks
/// are hit and raising the intensity only ever adds blocks. Partial blocks at
/// the right and bottom edges take part like full ones. Alpha is preserved.
pub struct DigitalCorruptionEffect {
    block_size: u32,
    seed: u64,
}

impl DigitalCorruptionEffect {
    pub fn new() -> Self {
        Self::from_tuning(&EffectTuning::default())
    }

    pub fn from_tuning(tuning: &EffectTuning) -> Self {
        Self {
            block_size: tuning.corruption_block_size.max(1),
            seed: tuning.seed ^ CORRUPTION_SALT,
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    fn block_hash(&self, bx: u32, by: u32) -> u64 {
        spatial_hash(self.seed, u64::from(bx), u64::from(by))
    }

    /// Whether block `(bx, by)` is corrupted at `intensity`.
    pub fn is_corrupted(&self, bx: u32, by: u32, intensity: Intensity) -> bool {
        self.block_hash(bx, by) % 100 < u64::from(intensity.value())
    }

    /// Pattern used for block `(bx, by)` when it is corrupted.
    pub fn pattern(&self, bx: u32, by: u32) -> CorruptionPattern {
        match (self.block_hash(bx, by) >> 32) % 3 {
            0 => CorruptionPattern::Noise,
            1 => CorruptionPattern::Solid,
            _ => CorruptionPattern::Stripes,
        }
    }

    fn corrupt_block(&self, output: &mut PixelBuffer, bx: u32, by: u32) {
        let x0 = bx * self.block_size;
        let y0 = by * self.block_size;
        let x1 = (x0 + self.block_size).min(output.width());
        let y1 = (y0 + self.block_size).min(output.height());

        let block_hash = self.block_hash(bx, by);
        let primary = rgb_bytes(block_hash);
        let secondary = rgb_bytes(block_hash >> 24);
        let pattern = self.pattern(bx, by);

        for y in y0..y1 {
            for x in x0..x1 {
                let rgb = match pattern {
                    CorruptionPattern::Noise => rgb_bytes(spatial_hash(
                        block_hash,
                        u64::from(x - x0),
                        u64::from(y - y0),
                    )),
                    CorruptionPattern::Solid => primary,
                    CorruptionPattern::Stripes if (y - y0) % 2 == 0 => primary,
                    CorruptionPattern::Stripes => secondary,
                };
                let alpha = output.pixel(x, y)[3];
                output.set_pixel(x, y, [rgb[0], rgb[1], rgb[2], alpha]);
            }
        }
    }
}

impl Default for DigitalCorruptionEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for DigitalCorruptionEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::DigitalCorruption
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let blocks_x = input.width().div_ceil(self.block_size);
        let blocks_y = input.height().div_ceil(self.block_size);

        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                if self.is_corrupted(bx, by, intensity) {
                    self.corrupt_block(&mut output, bx, by);
                }
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
    fn corruption_metadata() {
        let fx = DigitalCorruptionEffect::new();
        assert_eq!(fx.name(), "digitalCorruption");
        assert_eq!(fx.display_name(), "Corruption");
        assert_eq!(fx.block_size(), 8);
    }

    #[test]
    fn selected_fraction_tracks_intensity() {
        let fx = DigitalCorruptionEffect::new();
        let total = 40 * 40;
        let hit = |v: i64| {
            (0..40)
                .flat_map(|by| (0..40).map(move |bx| (bx, by)))
                .filter(|&(bx, by)| fx.is_corrupted(bx, by, Intensity::new(v)))
                .count()
        };
        assert_eq!(hit(100), total);
        let half = hit(50);
        assert!(half > total * 4 / 10 && half < total * 6 / 10, "got {half}");
    }

    #[test]
    fn higher_intensity_is_a_superset() {
        let fx = DigitalCorruptionEffect::new();
        for by in 0..20 {
            for bx in 0..20 {
                if fx.is_corrupted(bx, by, Intensity::new(30)) {
                    assert!(fx.is_corrupted(bx, by, Intensity::new(60)));
                }
            }
        }
    }

    #[test]
    fn untouched_blocks_keep_source_pixels() {
        let input = gradient(64, 64);
        let fx = DigitalCorruptionEffect::new();
        let intensity = Intensity::new(40);
        let output = fx.apply(&input, intensity);
        for y in 0..64 {
            for x in 0..64 {
                if !fx.is_corrupted(x / 8, y / 8, intensity) {
                    assert_eq!(output.pixel(x, y), input.pixel(x, y));
                }
            }
        }
        assert!(all_opaque(&output));
    }

    #[test]
    fn solid_blocks_are_uniform() {
        let input = gradient(128, 128);
        let fx = DigitalCorruptionEffect::new();
        let output = fx.apply(&input, Intensity::MAX);
        let (bx, by) = (0..16)
            .flat_map(|by| (0..16).map(move |bx| (bx, by)))
            .find(|&(bx, by)| fx.pattern(bx, by) == CorruptionPattern::Solid)
            .unwrap();
        let first = output.pixel(bx * 8, by * 8);
        for y in by * 8..by * 8 + 8 {
            for x in bx * 8..bx * 8 + 8 {
                assert_eq!(output.pixel(x, y), first);
            }
        }
    }

    #[test]
    fn partial_edge_blocks_are_handled() {
        let input = gradient(13, 11);
        let output = DigitalCorruptionEffect::new().apply(&input, Intensity::MAX);
        assert!(output.same_dimensions(&input));
        assert!(all_opaque(&output));
    }

    #[test]
    fn deterministic() {
        let input = gradient(48, 48);
        let fx = DigitalCorruptionEffect::new();
        assert_eq!(fx.apply(&input, Intensity::new(55)), fx.apply(&input, Intensity::new(55)));
    }
}
