//! Effect-specific error types.

use thiserror::Error;

/// Errors from parsing effect settings.
#[derive(Error, Debug)]
pub enum EffectError {
    /// The settings document is not a JSON object.
    #[error("Effect settings must be an object, got {got}")]
    NotAnObject { got: String },

    /// A known effect identifier carries a non-numeric value.
    #[error("Parameter '{param}' type mismatch: expected {expected}, got {got}")]
    ParamTypeMismatch {
        param: String,
        expected: String,
        got: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
