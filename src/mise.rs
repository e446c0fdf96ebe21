//! # MISE Hyperspectral Cube Container
//!
//! Packs one `(rows, cols, bands)` cube into a `.mis` container.
//!
//! The header records `(cols, rows, bands)`; the payload follows the cube's
//! natural `(row, col, band)` iteration order (band-interleaved-by-pixel).
//! No transposition is applied at this layer.

use std::sync::OnceLock;

use ndarray::ArrayView3;

use crate::container::{
    check_dimension, check_field, Container, EncodeError, FieldPacker, Format, Numeric, MAX_DN,
};

/// Number of bands the instrument delivers after trimming calibration bands
pub const MISE_N_BANDS: usize = 421;

/// A validated MISE observation cube
#[derive(Debug)]
pub struct MiseCube {
    observation_id: u32,
    timestamp: u32,
    rows: u32,
    cols: u32,
    bands: u32,
    samples: Vec<u16>,
    bytes: OnceLock<Vec<u8>>,
}

impl MiseCube {
    /// Validate the inputs and build a cube.
    ///
    /// `cube` is indexed `(row, col, band)`. Every sample must lie in
    /// `0..=65535`; the error names the band holding the first bad sample,
    /// counting from 1 as E-THEMIS band names do.
    pub fn new<T: Numeric>(
        observation_id: i64,
        timestamp: i64,
        cube: ArrayView3<'_, T>,
    ) -> Result<Self, EncodeError> {
        let (rows, cols, bands) = cube.dim();
        if cube.is_empty() {
            return Err(EncodeError::ShapeMismatch(format!(
                "cube is empty ({}x{}x{})",
                rows, cols, bands
            )));
        }

        let mut samples = Vec::with_capacity(cube.len());
        for ((_, _, band), &value) in cube.indexed_iter() {
            match value.to_bounded(MAX_DN) {
                Some(v) => samples.push(v as u16),
                None => {
                    return Err(EncodeError::out_of_range(
                        format!("band {} sample", band + 1),
                        value,
                        MAX_DN,
                    ))
                }
            }
        }

        Ok(Self {
            observation_id: check_field("observation_id", observation_id)?,
            timestamp: check_field("timestamp", timestamp)?,
            rows: check_dimension("row count", rows)?,
            cols: check_dimension("column count", cols)?,
            bands: check_dimension("band count", bands)?,
            samples,
            bytes: OnceLock::new(),
        })
    }

    /// Observation identifier
    pub fn observation_id(&self) -> u32 {
        self.observation_id
    }

    /// Observation timestamp
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// `(rows, cols, bands)` of the cube
    pub fn dim(&self) -> (u32, u32, u32) {
        (self.rows, self.cols, self.bands)
    }

    /// Header fields in on-disk order: id, timestamp, cols, rows, bands
    pub fn header_fields(&self) -> [u32; 5] {
        [
            self.observation_id,
            self.timestamp,
            self.cols,
            self.rows,
            self.bands,
        ]
    }

    fn encode(&self) -> Vec<u8> {
        let fields = self.header_fields();
        let mut packer =
            FieldPacker::with_prefix(Format::Mise, fields.len() * 4 + self.samples.len() * 2);
        packer.push_fields(&fields);
        packer.push_u16_slice(&self.samples);

        log::debug!(
            "Encoded MISE cube {}x{}x{} ({} bytes)",
            self.rows,
            self.cols,
            self.bands,
            packer.len()
        );
        packer.finish()
    }
}

impl Container for MiseCube {
    const FORMAT: Format = Format::Mise;

    fn to_bytes(&self) -> &[u8] {
        self.bytes.get_or_init(|| self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::prefix_len;
    use ndarray::Array3;

    #[test]
    fn test_saturated_cube() {
        let cube = Array3::<u16>::from_elem((2, 3, 4), 65535);
        let mise = MiseCube::new(7, 42, cube.view()).unwrap();

        assert_eq!(mise.header_fields(), [7, 42, 3, 2, 4]);

        let bytes = mise.to_bytes();
        assert_eq!(&bytes[..8], b"EOS_MISE");
        let payload = &bytes[prefix_len(Format::Mise) + 5 * 4..];
        assert_eq!(payload.len(), 48);
        assert!(payload.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_payload_is_band_interleaved_by_pixel() {
        let cube = Array3::from_shape_fn((1, 2, 2), |(_, c, b)| (c * 10 + b) as u16);
        let mise = MiseCube::new(0, 0, cube.view()).unwrap();

        let payload = &mise.to_bytes()[prefix_len(Format::Mise) + 20..];
        let values: Vec<u16> = payload
            .chunks_exact(2)
            .map(|w| u16::from_be_bytes([w[0], w[1]]))
            .collect();
        assert_eq!(values, vec![0, 1, 10, 11]);
    }

    #[test]
    fn test_reports_offending_band() {
        let mut cube = Array3::<f64>::zeros((2, 2, 3));
        cube[[1, 0, 2]] = 70_000.0;
        let err = MiseCube::new(0, 0, cube.view()).unwrap_err();
        match err {
            EncodeError::OutOfRange { field, .. } => assert_eq!(field, "band 3 sample"),
            other => panic!("unexpected error: {other}"),
        }

        let mut cube = Array3::<f64>::zeros((1, 1, 2));
        cube[[0, 0, 0]] = -1.0;
        match MiseCube::new(0, 0, cube.view()).unwrap_err() {
            EncodeError::OutOfRange { field, .. } => assert_eq!(field, "band 1 sample"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_timestamp() {
        let cube = Array3::<u16>::zeros((1, 1, 1));
        assert!(MiseCube::new(0, -3, cube.view()).is_err());
    }
}
