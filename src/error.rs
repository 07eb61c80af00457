//! Error types for the canvas host, backends and encoders
//!
//! The scene algorithm itself never fails; these errors only come from the
//! layers around it (config loading, raster setup, file encoding).

use thiserror::Error;

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the core render pass
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A backend could not be prepared for rendering
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode rendered output
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::EncodeError(err.to_string())
    }
}
