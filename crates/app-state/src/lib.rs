//! `gs-app-state` -- Editor session state around the glitch pipeline.
//!
//! This crate provides:
//!
//! - **`EditorState`**: The pristine source image, the current effect settings,
//!   and a revision counter. Every render starts again from the source.
//! - **`SettingsSnapshot`**: Serializable intensities for save/share, plus the
//!   `(label, value)` attribute list used when publishing a result.
//! - **`RenderWorker`**: Runs the pipeline on a background thread and hands back
//!   only the newest finished frame (last-write-wins).
//!
//! # Architecture
//!
//! ```text
//! EditorState
//! ├── source: Option<PixelBuffer>    (fitted to the input limits)
//! ├── settings: EffectSettings       (eight intensities)
//! ├── revision: u64                  (bumped on every change)
//! └── pipeline: GlitchPipeline       (synchronous render)
//!
//! RenderWorker
//! ├── command channel  ──►  worker thread (coalesces queued requests)
//! └── result channel   ◄──  RenderResult { revision, image }
//! ```

pub mod render_worker;
pub mod snapshot;
pub mod state;

mod error;

// Re-export primary types at crate root for convenience.
pub use error::SessionError;
pub use render_worker::{RenderRequest, RenderResult, RenderWorker};
pub use snapshot::{EffectAttribute, SettingsSnapshot};
pub use state::EditorState;
