//! TOML configuration file support.
//!
//! Instead of repeating CLI flags for every batch, settings can live in a
//! config file:
//!
//! ```toml
//! # libeos.toml
//! [conversion]
//! create_output_dir = true
//! write_metadata = true
//! continue_on_error = true
//! parallel = false
//! max_bands = 421
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use libeos::convert::ConversionOptions;

/// Root configuration structure for libeos.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration shared by the conversion commands.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// Create a missing output directory for directory inputs.
    pub create_output_dir: Option<bool>,

    /// Write `.meta` JSON sidecars.
    pub write_metadata: Option<bool>,

    /// Skip failing inputs instead of aborting the batch.
    pub continue_on_error: Option<bool>,

    /// Convert inputs concurrently (requires the parallel feature).
    pub parallel: Option<bool>,

    /// Number of leading MISE bands to keep.
    pub max_bands: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Overlay file settings on `base`.
    pub fn apply(&self, mut base: ConversionOptions) -> ConversionOptions {
        let c = &self.conversion;
        if let Some(v) = c.create_output_dir {
            base.create_output_dir = v;
        }
        if let Some(v) = c.write_metadata {
            base.write_metadata = v;
        }
        if let Some(v) = c.continue_on_error {
            base.continue_on_error = v;
        }
        if let Some(v) = c.parallel {
            base.parallel = v;
        }
        if c.max_bands.is_some() {
            base.max_bands = c.max_bands;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [conversion]
            create_output_dir = true
            write_metadata = true
            continue_on_error = false
            parallel = true
            max_bands = 300
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.create_output_dir, Some(true));
        assert_eq!(config.conversion.write_metadata, Some(true));
        assert_eq!(config.conversion.continue_on_error, Some(false));
        assert_eq!(config.conversion.parallel, Some(true));
        assert_eq!(config.conversion.max_bands, Some(300));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml = r#"
            [conversion]
            write_metadata = true
        "#;

        let config = Config::from_str(toml).unwrap();
        let options = config.apply(ConversionOptions::mise());
        assert!(options.write_metadata);
        assert!(!options.continue_on_error);
        assert_eq!(options.max_bands, Some(421));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.conversion.max_bands, None);
        assert_eq!(config.apply(ConversionOptions::default()), ConversionOptions::default());
    }
}
