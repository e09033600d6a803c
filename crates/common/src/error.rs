//! Buffer and configuration errors (thiserror-based).

use thiserror::Error;

/// Pixel buffer construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelBufferError {
    /// Sample length does not match `width * height * 4`.
    #[error("Invalid buffer: {width}x{height} needs {expected} bytes, got {got}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    /// Width or height is zero, or the byte size overflows `usize`.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tuning value is outside its usable range.
    #[error("Invalid config field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_buffer_message_has_lengths() {
        let err = PixelBufferError::InvalidBuffer {
            width: 2,
            height: 2,
            expected: 16,
            got: 15,
        };
        let msg = err.to_string();
        assert!(msg.contains("2x2"));
        assert!(msg.contains("16"));
        assert!(msg.contains("15"));
    }

    #[test]
    fn config_invalid_displays_field() {
        let err = ConfigError::Invalid {
            field: "scan_line_period".into(),
            reason: "must be > 0".into(),
        };
        assert!(err.to_string().contains("scan_line_period"));
    }
}
