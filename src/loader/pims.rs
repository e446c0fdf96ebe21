use std::path::Path;

use ndarray::{Array2, Ix1, Ix2};

use crate::container::EncodeError;
use crate::pims::{caps, PimsFile, PimsObservation};

use super::arrays::NpzArchive;
use super::error::LoadError;

/// A PIMS file's worth of observations as loaded from `.npz`.
///
/// Expected arrays:
///
/// | Name | Shape |
/// |------|-------|
/// | `file_id`, `max_bins` | scalar |
/// | `mode_bin_definitions` | `(modes, bins)`, trailing NaN = unused |
/// | `obs_ids`, `timestamps`, `modes` | `(observations,)` |
/// | `counts` | `(observations, bins)` |
/// | `num_bins` (optional) | `(observations,)` |
///
/// CAPS ELS archives may instead carry `energy_ranges`
/// `(observations, bins)` in place of `modes`, and `times` (day numbers) in
/// place of `timestamps`. Modes, bin counts and timestamps are then derived
/// through [`caps`]; `obs_ids` defaults to `0..n`, and `max_bins` and
/// `mode_bin_definitions` default to the CAPS tables.
#[derive(Debug, Clone)]
pub struct PimsInput {
    /// File identifier
    pub file_id: i64,
    /// Bin count to pad every observation and mode table to
    pub max_bins: i64,
    /// Bin edges per mode, trailing NaN entries removed
    pub mode_bin_definitions: Vec<Vec<f64>>,
    /// Observation identifiers
    pub obs_ids: Vec<i64>,
    /// Observation timestamps
    pub timestamps: Vec<i64>,
    /// Observation modes
    pub modes: Vec<i64>,
    /// One row of counts per observation
    pub counts: Array2<f64>,
    /// Optional per-observation truncation
    pub num_bins: Option<Vec<i64>>,
    /// Modes and bin counts were derived from CAPS energy ranges
    pub modes_from_energy_ranges: bool,
    /// Timestamps were converted from CAPS day numbers
    pub timestamps_from_days: bool,
}

impl PimsInput {
    /// Load an observation archive
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let mut npz = NpzArchive::open(path)?;

        let counts = npz.read_f64::<Ix2>("counts")?;
        let n = counts.nrows();

        let caps_modes = !npz.contains("modes") && npz.contains("energy_ranges");
        let (modes, num_bins) = if caps_modes {
            let ranges = npz.read_f64::<Ix2>("energy_ranges")?;
            if ranges.nrows() != n {
                return Err(LoadError::invalid(
                    "energy_ranges",
                    format!("{} entries for {} observations", ranges.nrows(), n),
                ));
            }
            let mut modes = Vec::with_capacity(n);
            let mut bins = Vec::with_capacity(n);
            for row in ranges.rows() {
                let mode = caps::mode_from_energy_ranges(&row.to_vec());
                let limit = caps::bins_for_mode(mode)
                    .ok_or_else(|| LoadError::invalid("energy_ranges", format!("unknown mode {}", mode)))?;
                modes.push(i64::from(mode));
                bins.push(limit as i64);
            }
            (modes, Some(bins))
        } else {
            let modes = npz.read_i64_vec("modes")?;
            let num_bins = if npz.contains("num_bins") {
                Some(npz.read_i64_vec("num_bins")?)
            } else {
                None
            };
            (modes, num_bins)
        };

        let caps_times = !npz.contains("timestamps") && npz.contains("times");
        let timestamps = if caps_times {
            npz.read_f64::<Ix1>("times")?
                .iter()
                .map(|&days| {
                    caps::days_to_seconds(days).map(i64::from).ok_or_else(|| {
                        LoadError::invalid("times", format!("day number {} is not after 2000-01-01", days))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            npz.read_i64_vec("timestamps")?
        };

        let obs_ids = if caps_modes && !npz.contains("obs_ids") {
            (0..n as i64).collect()
        } else {
            npz.read_i64_vec("obs_ids")?
        };

        let max_bins = if caps_modes && !npz.contains("max_bins") {
            caps::CAPS_MAX_BINS as i64
        } else {
            npz.read_scalar("max_bins")?
        };
        let mode_bin_definitions = if caps_modes && !npz.contains("mode_bin_definitions") {
            caps::mode_bin_definitions()
        } else {
            let table = npz.read_f64::<Ix2>("mode_bin_definitions")?;
            table
                .rows()
                .into_iter()
                .map(|row| {
                    let mut edges = row.to_vec();
                    let used = edges.iter().rposition(|v| !v.is_nan()).map_or(0, |i| i + 1);
                    edges.truncate(used);
                    edges
                })
                .collect()
        };
        let file_id = npz.read_scalar("file_id")?;

        let input = Self {
            file_id,
            max_bins,
            mode_bin_definitions,
            obs_ids,
            timestamps,
            modes,
            counts,
            num_bins,
            modes_from_energy_ranges: caps_modes,
            timestamps_from_days: caps_times,
        };
        if let Some((name, len)) = input.length_mismatch() {
            return Err(LoadError::invalid(
                name,
                format!("{} entries for {} observations", len, input.len()),
            ));
        }
        Ok(input)
    }

    /// Number of observations in the archive
    pub fn len(&self) -> usize {
        self.obs_ids.len()
    }

    /// Whether the archive holds no observations
    pub fn is_empty(&self) -> bool {
        self.obs_ids.is_empty()
    }

    /// First per-observation array whose length differs from `obs_ids`
    fn length_mismatch(&self) -> Option<(&'static str, usize)> {
        let n = self.len();
        [
            ("timestamps", self.timestamps.len()),
            ("modes", self.modes.len()),
            ("counts", self.counts.nrows()),
            ("num_bins", self.num_bins.as_ref().map_or(n, Vec::len)),
        ]
        .into_iter()
        .find(|&(_, len)| len != n)
    }

    /// Validate and build the container
    pub fn to_file(&self) -> Result<PimsFile, EncodeError> {
        if let Some((name, len)) = self.length_mismatch() {
            return Err(EncodeError::ShapeMismatch(format!(
                "{} has {} entries for {} observations",
                name,
                len,
                self.len()
            )));
        }

        let observations = (0..self.len())
            .map(|i| {
                let limit = match &self.num_bins {
                    Some(bins) => Some(usize::try_from(bins[i]).map_err(|_| {
                        EncodeError::out_of_range(
                            format!("num_bins of observation {}", i),
                            bins[i],
                            usize::MAX as u64,
                        )
                    })?),
                    None => None,
                };
                let row = self.counts.row(i).to_vec();
                PimsObservation::new(self.obs_ids[i], self.timestamps[i], self.modes[i], &row, limit)
            })
            .collect::<Result<Vec<_>, _>>()?;

        PimsFile::new(
            self.file_id,
            self.max_bins,
            &self.mode_bin_definitions,
            observations,
        )
    }
}
