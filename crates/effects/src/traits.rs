//! Effect trait definition.
//!
//! All glitch effects implement [`Effect`]: a pure transform from one
//! [`PixelBuffer`] to a new one, parameterized by an [`Intensity`]. The
//! input is never mutated, so the caller's source image stays valid for
//! re-processing after any parameter change.

use gs_common::{EffectCategory, EffectKind, Intensity, PixelBuffer};

/// Trait for all glitch effects.
pub trait Effect: Send + Sync {
    /// Which of the eight effects this is.
    fn kind(&self) -> EffectKind;

    /// Unique effect name (the wire identifier).
    fn name(&self) -> &str {
        self.kind().id()
    }

    /// Display name for UI.
    fn display_name(&self) -> &str {
        self.kind().display_name()
    }

    /// Category for UI grouping.
    fn category(&self) -> EffectCategory {
        self.kind().category()
    }

    /// Produce a new buffer with the effect applied at `intensity`.
    ///
    /// The output always has the input's dimensions and alpha channel.
    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer;
}

/// Clamp a float channel value to `[0, 255]`, rounding to nearest.
#[inline(always)]
pub(crate) fn clamp_u8(val: f32) -> u8 {
    val.round().clamp(0.0, 255.0) as u8
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_u8_rounds_and_saturates() {
        assert_eq!(clamp_u8(-4.0), 0);
        assert_eq!(clamp_u8(300.0), 255);
        assert_eq!(clamp_u8(127.5), 128);
        assert_eq!(clamp_u8(127.4), 127);
    }
}
