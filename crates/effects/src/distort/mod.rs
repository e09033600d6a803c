//! Distortion effects: pixels or single channels are sampled from a
//! displaced position.
//!
//! - [`RgbSplitEffect`]: Uniform horizontal red/blue channel shift
//! - [`VhsDistortionEffect`]: Sine-wave row displacement with tape noise
//! - [`ChromaticAberrationEffect`]: Radial red/blue channel offset
//! - [`GlitchBarsEffect`]: Blocky horizontal band displacement

pub mod chromatic;
pub mod glitch_bars;
pub mod rgb_split;
pub mod vhs;

pub use chromatic::ChromaticAberrationEffect;
pub use glitch_bars::GlitchBarsEffect;
pub use rgb_split::RgbSplitEffect;
pub use vhs::VhsDistortionEffect;
