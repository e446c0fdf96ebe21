/// Errors that can occur while validating or encoding a container
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A sample or scalar identifier lies outside its declared bound
    #[error("{field} out of range: {value} (allowed 0..={max})")]
    OutOfRange {
        /// What was being checked, e.g. "band 2 sample" or "timestamp"
        field: String,
        /// The offending value, as supplied
        value: String,
        /// Inclusive upper bound
        max: u64,
    },

    /// Array dimensions are inconsistent with the container layout
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// I/O error while persisting encoded bytes
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EncodeError {
    pub(crate) fn out_of_range(field: impl Into<String>, value: impl ToString, max: u64) -> Self {
        EncodeError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            max,
        }
    }
}
