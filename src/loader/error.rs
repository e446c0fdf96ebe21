use ndarray_npy::{ReadNpyError, ReadNpzError};

/// Errors that can occur while loading instrument arrays
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error opening the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading an `.npz` archive
    #[error("NPZ read error: {0}")]
    NpzError(#[from] ReadNpzError),

    /// Error reading an `.npy` array
    #[error("NPY read error: {0}")]
    NpyError(#[from] ReadNpyError),

    /// A required array is absent from the archive
    #[error("Missing array '{0}'")]
    MissingArray(String),

    /// The array's element type cannot be widened to a numeric value
    #[error("Array '{0}' has an unsupported element type")]
    UnsupportedDtype(String),

    /// The array was read but its shape or contents are unusable
    #[error("Invalid array '{name}': {reason}")]
    InvalidArray {
        /// Array name within the input
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        LoadError::InvalidArray {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
