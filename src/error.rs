//! Error types for certificate generation

use thiserror::Error;

/// Result type alias for certificate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating, rendering or exporting a certificate
#[derive(Error, Debug)]
pub enum Error {
    /// A required record field was empty
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// The raster surface could not be allocated
    #[error("Rendering surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// Failed to encode the rendered surface
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// Failed to hand the image to an export sink
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Malformed record or config input
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}
