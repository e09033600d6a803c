//! `gs-pipeline`: fixed-order composition of the glitch effects.
//!
//! The [`GlitchPipeline`] takes a pristine source [`PixelBuffer`] and an
//! [`EffectSettings`] map, then runs every active effect in composition
//! order over a working copy:
//!
//! 1. **RGB Split** → 2. **Scan Lines** → 3. **VHS Distortion** →
//! 4. **Chromatic Aberration** → 5. **Digital Corruption** →
//! 6. **Color Shift** → 7. **Glitch Bars** → 8. **Bit Crush**
//!
//! Each stage sees the output of all earlier stages, so the order changes
//! the result. The pipeline is synchronous and holds no mutable state; the
//! same arguments always give byte-identical output.
//!
//! [`resize`] bounds loaded images before they reach the pipeline.
//!
//! [`PixelBuffer`]: gs_common::PixelBuffer
//! [`EffectSettings`]: gs_common::EffectSettings

pub mod pipeline;
pub mod resize;

mod error;

// Re-export primary API
pub use error::PipelineError;
pub use pipeline::{apply, GlitchPipeline};
pub use resize::{downscale_to_fit, fit_dimensions};
