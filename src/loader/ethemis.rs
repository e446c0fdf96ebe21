use std::path::Path;

use ndarray::{Array2, Ix2};

use crate::container::EncodeError;
use crate::ethemis::EthemisImage;

use super::arrays::NpzArchive;
use super::error::LoadError;

/// Band array names in an E-THEMIS simulation archive
pub const BAND_NAMES: [&str; 3] = ["band1_dn", "band2_dn", "band3_dn"];

/// One E-THEMIS simulation trial as loaded from `.npz`.
///
/// Expects scalars `trial` and `event_time` and 2-D arrays
/// `band1_dn`, `band2_dn`, `band3_dn`.
#[derive(Debug, Clone)]
pub struct EthemisInput {
    /// Trial number, used as the observation id
    pub trial: i64,
    /// Event time, used as the timestamp
    pub event_time: i64,
    /// The three DN bands
    pub bands: [Array2<f64>; 3],
}

impl EthemisInput {
    /// Load a simulation trial archive
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let mut npz = NpzArchive::open(path)?;
        let trial = npz.read_scalar("trial")?;
        let event_time = npz.read_scalar("event_time")?;
        let bands = [
            npz.read_f64::<Ix2>(BAND_NAMES[0])?,
            npz.read_f64::<Ix2>(BAND_NAMES[1])?,
            npz.read_f64::<Ix2>(BAND_NAMES[2])?,
        ];
        Ok(Self {
            trial,
            event_time,
            bands,
        })
    }

    /// Validate and build the container
    pub fn to_image(&self) -> Result<EthemisImage, EncodeError> {
        EthemisImage::new(
            self.trial,
            self.event_time,
            self.bands[0].view(),
            self.bands[1].view(),
            self.bands[2].view(),
        )
    }
}
