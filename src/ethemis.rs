//! # E-THEMIS Image Container
//!
//! Packs three 2-D thermal bands into one `.etm` container.
//!
//! ## Layout
//!
//! | Field | Width |
//! |-------|-------|
//! | `EOS_ETHEMIS` + 4 pad bytes + version | 16 bytes |
//! | observation_id, timestamp | 2 × u32 |
//! | cols, rows for each band | 6 × u32 |
//! | band1 ∥ band2 ∥ band3, row-major | 2 bytes/sample |
//!
//! Bands may differ in shape; each band records its own dimensions.

use std::sync::OnceLock;

use ndarray::ArrayView2;

use crate::container::{
    check_dimension, check_dn_samples, check_field, Container, EncodeError, FieldPacker, Format,
    Numeric,
};

/// Number of bands in an E-THEMIS image
pub const NUM_BANDS: usize = 3;

/// One validated band, flattened row-major
#[derive(Debug, Clone, PartialEq, Eq)]
struct Band {
    rows: u32,
    cols: u32,
    samples: Vec<u16>,
}

impl Band {
    fn from_view<T: Numeric>(index: usize, band: ArrayView2<'_, T>) -> Result<Self, EncodeError> {
        let (rows, cols) = band.dim();
        if band.is_empty() {
            return Err(EncodeError::ShapeMismatch(format!(
                "band {} is empty ({}x{})",
                index + 1,
                rows,
                cols
            )));
        }
        let field = format!("band {} sample", index + 1);
        Ok(Self {
            rows: check_dimension("row count", rows)?,
            cols: check_dimension("column count", cols)?,
            // Logical iteration order, independent of memory layout
            samples: check_dn_samples(&field, band.iter())?,
        })
    }
}

/// A validated three-band E-THEMIS observation
#[derive(Debug)]
pub struct EthemisImage {
    observation_id: u32,
    timestamp: u32,
    bands: [Band; NUM_BANDS],
    bytes: OnceLock<Vec<u8>>,
}

impl EthemisImage {
    /// Validate the inputs and build an image.
    ///
    /// Fails with [`EncodeError::OutOfRange`] if any sample lies outside
    /// `0..=65535` or an identifier outside `0..=u32::MAX`, and with
    /// [`EncodeError::ShapeMismatch`] for empty bands.
    pub fn new<T: Numeric>(
        observation_id: i64,
        timestamp: i64,
        band1: ArrayView2<'_, T>,
        band2: ArrayView2<'_, T>,
        band3: ArrayView2<'_, T>,
    ) -> Result<Self, EncodeError> {
        let bands = [
            Band::from_view(0, band1)?,
            Band::from_view(1, band2)?,
            Band::from_view(2, band3)?,
        ];

        Ok(Self {
            observation_id: check_field("observation_id", observation_id)?,
            timestamp: check_field("timestamp", timestamp)?,
            bands,
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

    /// `(rows, cols)` of each band
    pub fn band_shapes(&self) -> [(u32, u32); NUM_BANDS] {
        [
            (self.bands[0].rows, self.bands[0].cols),
            (self.bands[1].rows, self.bands[1].cols),
            (self.bands[2].rows, self.bands[2].cols),
        ]
    }

    /// Total number of samples across all bands
    pub fn sample_count(&self) -> usize {
        self.bands.iter().map(|b| b.samples.len()).sum()
    }

    /// Header fields in on-disk order
    pub fn header_fields(&self) -> Vec<u32> {
        let mut fields = vec![self.observation_id, self.timestamp];
        for band in &self.bands {
            fields.push(band.cols);
            fields.push(band.rows);
        }
        fields
    }

    fn encode(&self) -> Vec<u8> {
        let fields = self.header_fields();
        let mut packer = FieldPacker::with_prefix(
            Format::Ethemis,
            fields.len() * 4 + self.sample_count() * 2,
        );
        packer.push_fields(&fields);
        for band in &self.bands {
            packer.push_u16_slice(&band.samples);
        }

        log::debug!(
            "Encoded E-THEMIS observation {} ({} samples, {} bytes)",
            self.observation_id,
            self.sample_count(),
            packer.len()
        );
        packer.finish()
    }
}

impl Container for EthemisImage {
    const FORMAT: Format = Format::Ethemis;

    fn to_bytes(&self) -> &[u8] {
        self.bytes.get_or_init(|| self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::prefix_len;
    use ndarray::{array, Array2};

    fn be_u32(bytes: &[u8], index: usize) -> u32 {
        let start = prefix_len(Format::Ethemis) + index * 4;
        u32::from_be_bytes([bytes[start], bytes[start + 1], bytes[start + 2], bytes[start + 3]])
    }

    #[test]
    fn test_zero_bands_layout() {
        let band = Array2::<u16>::zeros((2, 2));
        let image = EthemisImage::new(3, 100, band.view(), band.view(), band.view()).unwrap();

        assert_eq!(image.header_fields(), vec![3, 100, 2, 2, 2, 2, 2, 2]);

        let bytes = image.to_bytes();
        assert_eq!(&bytes[..11], b"EOS_ETHEMIS");
        assert_eq!(&bytes[11..15], &[0xFF; 4]);
        assert_eq!(bytes[15], 1);

        let payload = &bytes[prefix_len(Format::Ethemis) + 8 * 4..];
        assert_eq!(payload.len(), 12 * 2);
        assert!(payload.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bands_record_their_own_shape() {
        let b1 = Array2::<u16>::ones((2, 3));
        let b2 = Array2::<u16>::ones((4, 1));
        let b3 = Array2::<u16>::ones((1, 5));
        let image = EthemisImage::new(0, 0, b1.view(), b2.view(), b3.view()).unwrap();

        let bytes = image.to_bytes();
        let dims: Vec<u32> = (2..8).map(|i| be_u32(bytes, i)).collect();
        assert_eq!(dims, vec![3, 2, 1, 4, 5, 1]);
        assert_eq!(image.sample_count(), 6 + 4 + 5);
    }

    #[test]
    fn test_payload_is_row_major_regardless_of_layout() {
        let band = array![[1u16, 2, 3], [4, 5, 6]];
        let transposed = band.t().to_owned();
        // Same logical content, Fortran-ordered memory
        let fortran = transposed.t();

        let a = EthemisImage::new(1, 1, band.view(), band.view(), band.view()).unwrap();
        let b = EthemisImage::new(1, 1, fortran, fortran, fortran).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());

        let payload = &a.to_bytes()[prefix_len(Format::Ethemis) + 32..];
        assert_eq!(&payload[..6], &[0, 1, 0, 2, 0, 3]);
    }

    #[test]
    fn test_rejects_out_of_range_samples() {
        let good = Array2::<i64>::zeros((2, 2));
        let mut bad = good.clone();
        bad[[1, 1]] = 65_536;

        let err = EthemisImage::new(0, 0, good.view(), good.view(), bad.view()).unwrap_err();
        assert!(matches!(err, EncodeError::OutOfRange { ref field, .. } if field == "band 3 sample"));

        bad[[1, 1]] = -1;
        assert!(EthemisImage::new(0, 0, bad.view(), good.view(), good.view()).is_err());
    }

    #[test]
    fn test_rejects_negative_identifiers() {
        let band = Array2::<u16>::zeros((1, 1));
        assert!(EthemisImage::new(-1, 0, band.view(), band.view(), band.view()).is_err());
        assert!(EthemisImage::new(0, -1, band.view(), band.view(), band.view()).is_err());
    }

    #[test]
    fn test_rejects_empty_band() {
        let band = Array2::<u16>::zeros((1, 1));
        let empty = Array2::<u16>::zeros((0, 4));
        let err = EthemisImage::new(0, 0, band.view(), empty.view(), band.view()).unwrap_err();
        assert!(matches!(err, EncodeError::ShapeMismatch(_)));
    }

    #[test]
    fn test_encoding_is_memoized() {
        let band = Array2::<u16>::from_elem((3, 3), 7);
        let image = EthemisImage::new(9, 9, band.view(), band.view(), band.view()).unwrap();
        let first = image.to_bytes().as_ptr();
        assert_eq!(first, image.to_bytes().as_ptr());
    }
}
