//! Color Shift effect (HSL hue rotation).

use gs_common::{EffectKind, EffectTuning, Intensity, PixelBuffer};

use crate::traits::Effect;

/// Rotates every pixel's hue by `intensity / 100 * 360` degrees, keeping
/// lightness and saturation. Grays have no hue and stay unchanged.
pub struct ColorShiftEffect;

impl ColorShiftEffect {
    pub fn new() -> Self {
        Self
    }

    pub fn from_tuning(_tuning: &EffectTuning) -> Self {
        Self
    }

    /// Hue rotation in degrees for `intensity`.
    pub fn angle(intensity: Intensity) -> f64 {
        f64::from(intensity.value()) / 100.0 * 360.0
    }
}

impl Default for ColorShiftEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for ColorShiftEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::ColorShift
    }

    fn apply(&self, input: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
        let mut output = input.clone();
        let angle = Self::angle(intensity);

        for px in output.pixels_mut() {
            let rotated = rotate_hue([px[0], px[1], px[2]], angle);
            px[..3].copy_from_slice(&rotated);
        }
        output
    }
}

/// Rotate the hue of an 8-bit RGB triple by `degrees`.
pub fn rotate_hue(rgb: [u8; 3], degrees: f64) -> [u8; 3] {
    let (h, s, l) = rgb_to_hsl(rgb);
    hsl_to_rgb((h + degrees).rem_euclid(360.0), s, l)
}

/// Convert 8-bit RGB to `(hue in [0, 360), saturation, lightness)`.
pub fn rgb_to_hsl(rgb: [u8; 3]) -> (f64, f64, f64) {
    let r = f64::from(rgb[0]) / 255.0;
    let g = f64::from(rgb[1]) / 255.0;
    let b = f64::from(rgb[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h * 60.0, s, l)
}

/// Convert `(hue in degrees, saturation, lightness)` to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    if s == 0.0 {
        let v = to_u8(l);
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hk = h / 360.0;
    [
        to_u8(hue_to_channel(p, q, hk + 1.0 / 3.0)),
        to_u8(hue_to_channel(p, q, hk)),
        to_u8(hue_to_channel(p, q, hk - 1.0 / 3.0)),
    ]
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
