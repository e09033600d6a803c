//! Session error types.

use gs_pipeline::PipelineError;
use thiserror::Error;

/// Errors raised by the editor session and the render worker.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A render was requested before any image was loaded.
    #[error("No image loaded")]
    NoImage,

    /// The render worker thread has shut down.
    #[error("Render worker is not running")]
    WorkerGone,

    /// The render worker thread could not be started.
    #[error("Failed to spawn render worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// A settings snapshot could not be (de)serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
