use std::sync::OnceLock;

use crate::container::{
    check_dimension, check_field, Container, EncodeError, FieldPacker, Format,
};

use super::observation::PimsObservation;

/// Number of `u32` header words in the file header
pub const FILE_HEADER_FIELDS: usize = 4;

/// A complete PIMS container: mode bin tables plus ordered observations.
///
/// Layout after the `EOS_PIMS` prefix:
/// `file_id, num_modes, max_bins, num_observations` (u32), then a
/// `num_modes × max_bins` table of big-endian `f32` bin edges padded with
/// `+inf`, then every observation padded to `max_bins` bins.
#[derive(Debug)]
pub struct PimsFile {
    file_id: u32,
    max_bins: u32,
    num_modes: u32,
    mode_table: Vec<f32>,
    observations: Vec<PimsObservation>,
    bytes: OnceLock<Vec<u8>>,
}

impl PimsFile {
    /// Validate and build a container.
    ///
    /// Each bin-definition vector is right-padded with `+inf` to `max_bins`.
    /// Observations keep the order given. Fails with
    /// [`EncodeError::ShapeMismatch`] if any bin-definition vector or
    /// observation is longer than `max_bins`.
    pub fn new(
        file_id: i64,
        max_bins: i64,
        mode_bin_definitions: &[Vec<f64>],
        observations: Vec<PimsObservation>,
    ) -> Result<Self, EncodeError> {
        let file_id = check_field("file_id", file_id)?;
        let max_bins_field = check_field("max_bins", max_bins)?;
        let num_modes = check_dimension("mode count", mode_bin_definitions.len())?;
        check_dimension("observation count", observations.len())?;
        let max_bins = max_bins_field as usize;

        let mut mode_table = Vec::with_capacity(mode_bin_definitions.len() * max_bins);
        for (mode, edges) in mode_bin_definitions.iter().enumerate() {
            if edges.len() > max_bins {
                return Err(EncodeError::ShapeMismatch(format!(
                    "mode {} defines {} bins, more than max_bins {}",
                    mode,
                    edges.len(),
                    max_bins
                )));
            }
            mode_table.extend(edges.iter().map(|&e| e as f32));
            mode_table.resize((mode + 1) * max_bins, f32::INFINITY);
        }

        for obs in &observations {
            if obs.num_bins() > max_bins {
                return Err(EncodeError::ShapeMismatch(format!(
                    "observation {} has {} bins, more than max_bins {}",
                    obs.obs_id(),
                    obs.num_bins(),
                    max_bins
                )));
            }
            if obs.mode() >= num_modes {
                log::warn!(
                    "Observation {} uses mode {} but only {} mode tables are defined",
                    obs.obs_id(),
                    obs.mode(),
                    num_modes
                );
            }
        }

        Ok(Self {
            file_id,
            max_bins: max_bins_field,
            num_modes,
            mode_table,
            observations,
            bytes: OnceLock::new(),
        })
    }

    /// File identifier
    pub fn file_id(&self) -> u32 {
        self.file_id
    }

    /// Bin count every observation and mode table is padded to
    pub fn max_bins(&self) -> usize {
        self.max_bins as usize
    }

    /// Number of mode bin-definition rows
    pub fn num_modes(&self) -> usize {
        self.num_modes as usize
    }

    /// Padded mode table, row-major `num_modes × max_bins`
    pub fn mode_table(&self) -> &[f32] {
        &self.mode_table
    }

    /// Observations in file order
    pub fn observations(&self) -> &[PimsObservation] {
        &self.observations
    }

    /// Header fields in on-disk order
    pub fn header_fields(&self) -> [u32; FILE_HEADER_FIELDS] {
        [
            self.file_id,
            self.num_modes,
            self.max_bins,
            // checked against u32 at construction
            self.observations.len() as u32,
        ]
    }

    fn encode(&self) -> Vec<u8> {
        let max_bins = self.max_bins();
        let body: usize = self
            .observations
            .iter()
            .map(|o| o.encoded_len(Some(max_bins)))
            .sum();
        let mut packer = FieldPacker::with_prefix(
            Format::Pims,
            FILE_HEADER_FIELDS * 4 + self.mode_table.len() * 4 + body,
        );
        packer.push_fields(&self.header_fields());
        packer.push_f32_slice(&self.mode_table);
        for obs in &self.observations {
            // Bin counts were checked against max_bins in new()
            obs.pack_into(&mut packer, max_bins);
        }

        log::debug!(
            "Encoded PIMS file {} ({} modes, {} observations, {} bytes)",
            self.file_id,
            self.num_modes,
            self.observations.len(),
            packer.len()
        );
        packer.finish()
    }
}

impl Container for PimsFile {
    const FORMAT: Format = Format::Pims;

    fn to_bytes(&self) -> &[u8] {
        self.bytes.get_or_init(|| self.encode())
    }
}
