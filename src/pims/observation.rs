use std::sync::OnceLock;

use crate::container::{
    check_dimension, check_field, EncodeError, FieldPacker, Numeric, MAX_FIELD,
};

/// Number of `u32` header words preceding each observation's counts
pub const OBSERVATION_HEADER_FIELDS: usize = 4;

/// One time-tagged PIMS bin-count vector.
///
/// Encodes as `obs_id, timestamp, num_bins, mode` followed by the counts,
/// all big-endian `u32`. Carries no magic/version prefix; observations are
/// only meaningful inside a [`PimsFile`](super::PimsFile).
#[derive(Debug)]
pub struct PimsObservation {
    obs_id: u32,
    timestamp: u32,
    mode: u32,
    counts: Vec<u32>,
    bytes: OnceLock<Vec<u8>>,
}

impl PimsObservation {
    /// Validate and build an observation.
    ///
    /// When `num_bins` is given, `counts` is first truncated to that length.
    /// NaN counts become zero; any other count must be finite and lie in
    /// `0..=u32::MAX` (fractions truncate toward zero).
    pub fn new<T: Numeric>(
        obs_id: i64,
        timestamp: i64,
        mode: i64,
        counts: &[T],
        num_bins: Option<usize>,
    ) -> Result<Self, EncodeError> {
        let obs_id = check_field("obs_id", obs_id)?;
        let timestamp = check_field("timestamp", timestamp)?;
        let mode = check_field("mode", mode)?;

        let kept = match num_bins {
            Some(n) if n < counts.len() => &counts[..n],
            _ => counts,
        };
        check_dimension("bin count", kept.len())?;

        let counts = kept
            .iter()
            .enumerate()
            .map(|(bin, &value)| {
                if value.is_nan() {
                    return Ok(0);
                }
                value
                    .to_bounded(MAX_FIELD)
                    .map(|v| v as u32)
                    .ok_or_else(|| {
                        EncodeError::out_of_range(
                            format!("observation {} count in bin {}", obs_id, bin),
                            value,
                            MAX_FIELD,
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            obs_id,
            timestamp,
            mode,
            counts,
            bytes: OnceLock::new(),
        })
    }

    /// Observation identifier
    pub fn obs_id(&self) -> u32 {
        self.obs_id
    }

    /// Observation timestamp
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Index of the mode bin-definition row this observation uses
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Number of populated bins
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Validated counts, NaN already replaced by zero
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Header fields in on-disk order
    pub fn header_fields(&self) -> [u32; OBSERVATION_HEADER_FIELDS] {
        // num_bins was checked against u32 at construction
        [self.obs_id, self.timestamp, self.counts.len() as u32, self.mode]
    }

    /// Encoded length in bytes when padded to `max_bins`
    pub fn encoded_len(&self, max_bins: Option<usize>) -> usize {
        let bins = max_bins.map_or(self.num_bins(), |m| m.max(self.num_bins()));
        (OBSERVATION_HEADER_FIELDS + bins) * 4
    }

    /// Unpadded observation bytes, computed once
    pub fn to_bytes(&self) -> &[u8] {
        self.bytes.get_or_init(|| {
            let mut packer = FieldPacker::with_capacity(self.encoded_len(None));
            self.pack_into(&mut packer, self.num_bins());
            packer.finish()
        })
    }

    /// Encode with counts zero-padded up to `max_bins`.
    ///
    /// Fails with [`EncodeError::ShapeMismatch`] if `max_bins` is smaller
    /// than the populated bin count.
    pub fn encode(&self, max_bins: Option<usize>) -> Result<Vec<u8>, EncodeError> {
        let mut packer = FieldPacker::with_capacity(self.encoded_len(max_bins));
        self.write_padded(&mut packer, max_bins.unwrap_or(self.num_bins()))?;
        Ok(packer.finish())
    }

    fn write_padded(
        &self,
        packer: &mut FieldPacker,
        max_bins: usize,
    ) -> Result<(), EncodeError> {
        if max_bins < self.num_bins() {
            return Err(EncodeError::ShapeMismatch(format!(
                "observation {} has {} bins, more than max_bins {}",
                self.obs_id,
                self.num_bins(),
                max_bins
            )));
        }
        self.pack_into(packer, max_bins);
        Ok(())
    }

    // Callers guarantee padded_bins >= num_bins.
    pub(super) fn pack_into(&self, packer: &mut FieldPacker, padded_bins: usize) {
        let start = packer.len();
        packer.push_fields(&self.header_fields());
        packer.push_u32_slice(&self.counts);
        packer.push_zero_u32(padded_bins.saturating_sub(self.counts.len()));
        debug_assert_eq!(
            packer.len() - start,
            (OBSERVATION_HEADER_FIELDS + padded_bins.max(self.counts.len())) * 4
        );
    }
}
