use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::container::Format;

use super::error::ConvertError;

/// Provenance recorded next to (never inside) a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidecarMetadata {
    /// Absolute path of the instrument input
    pub source_file: String,

    /// Container variant written
    pub format: Format,

    /// Container file name
    pub output_file: String,

    /// Container size in bytes
    pub output_size_bytes: u64,

    /// Converter software name
    pub converter: String,

    /// Converter software version
    pub converter_version: String,

    /// RFC 3339 conversion time
    pub converted_at: String,

    /// Processing parameters, stringified
    pub parameters: BTreeMap<String, String>,
}

impl SidecarMetadata {
    /// Describe a finished conversion of `source` into `output`
    pub fn new(source: &Path, output: &Path, format: Format, output_size_bytes: u64) -> Self {
        let source_file = std::fs::canonicalize(source)
            .unwrap_or_else(|_| source.to_path_buf())
            .display()
            .to_string();
        Self {
            source_file,
            format,
            output_file: output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            output_size_bytes,
            converter: env!("CARGO_PKG_NAME").to_string(),
            converter_version: env!("CARGO_PKG_VERSION").to_string(),
            converted_at: chrono::Utc::now().to_rfc3339(),
            parameters: BTreeMap::new(),
        }
    }

    /// Record one processing parameter
    pub fn with_parameter(mut self, key: &str, value: impl ToString) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }
}
