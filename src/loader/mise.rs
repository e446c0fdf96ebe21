use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{s, Array3};
use ndarray_npy::ReadNpyExt;

use crate::container::EncodeError;
use crate::mise::MiseCube;

use super::error::LoadError;

/// A MISE DN cube as loaded from `.npy`.
///
/// The array must be `uint16` with shape `(rows, cols, bands)`.
#[derive(Debug, Clone)]
pub struct MiseInput {
    /// DN samples indexed `(row, col, band)`
    pub cube: Array3<u16>,
}

impl MiseInput {
    /// Load a cube, keeping at most `max_bands` leading bands
    pub fn load<P: AsRef<Path>>(path: P, max_bands: Option<usize>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let cube = Array3::<u16>::read_npy(reader)?;
        let (rows, cols, bands) = cube.dim();
        log::debug!("Loaded MISE cube {}x{}x{} from {}", rows, cols, bands, path.display());

        let cube = match max_bands {
            Some(keep) if keep < bands => {
                log::info!("Trimming MISE cube from {} to {} bands", bands, keep);
                cube.slice(s![.., .., ..keep]).to_owned()
            }
            _ => cube,
        };
        Ok(Self { cube })
    }

    /// Validate and build the container
    pub fn to_cube(&self, observation_id: i64, timestamp: i64) -> Result<MiseCube, EncodeError> {
        MiseCube::new(observation_id, timestamp, self.cube.view())
    }
}
