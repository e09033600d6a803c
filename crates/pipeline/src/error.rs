//! Pipeline error types.

use gs_common::{ConfigError, PixelBufferError};
use thiserror::Error;

/// Errors that can occur while building a pipeline or preparing its input.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source buffer violates the `width * height * 4` invariant.
    #[error("Buffer error: {0}")]
    Buffer(#[from] PixelBufferError),

    /// The tuning or input limits are unusable.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
