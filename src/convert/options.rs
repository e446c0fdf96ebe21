/// Settings shared by every conversion in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Create a missing output directory when the input is a directory
    pub create_output_dir: bool,

    /// Write a `.meta` JSON sidecar next to each container
    pub write_metadata: bool,

    /// Skip failing items in a batch instead of aborting it
    pub continue_on_error: bool,

    /// Convert batch items concurrently (requires the `parallel` feature)
    pub parallel: bool,

    /// Keep at most this many leading MISE bands (None = keep all)
    pub max_bands: Option<usize>,

    /// Observation id written into MISE containers
    pub observation_id: i64,

    /// Timestamp written into MISE containers
    pub timestamp: i64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            create_output_dir: false,
            write_metadata: false,
            continue_on_error: false,
            parallel: false,
            max_bands: None,
            observation_id: 0,
            timestamp: 0,
        }
    }
}

impl ConversionOptions {
    /// Options matching the MISE instrument pipeline: trim to 421 bands
    pub fn mise() -> Self {
        Self {
            max_bands: Some(crate::mise::MISE_N_BANDS),
            ..Default::default()
        }
    }
}
