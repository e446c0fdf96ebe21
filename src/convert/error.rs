use crate::container::EncodeError;
use crate::loader::LoadError;

/// Errors that can occur while converting instrument files
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input and output paths are inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input arrays could not be loaded
    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    /// Input arrays failed validation or the container failed to write
    #[error("Encode error: {0}")]
    EncodeError(#[from] EncodeError),

    /// I/O error outside the container write
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sidecar metadata could not be serialized
    #[error("Metadata error: {0}")]
    MetadataError(#[from] serde_json::Error),
}
