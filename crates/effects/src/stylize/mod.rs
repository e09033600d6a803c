//! Stylize effects: texture-like patterns laid over the image.
//!
//! - [`ScanLinesEffect`]: Periodic darkened rows
//! - [`DigitalCorruptionEffect`]: Seeded corrupted blocks

pub mod corruption;
pub mod scan_lines;

pub use corruption::DigitalCorruptionEffect;
pub use scan_lines::ScanLinesEffect;
