//! Dtype-tolerant array access for NumPy archives.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use ndarray::{Array, ArrayD, Dimension, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};

use super::error::LoadError;

/// An open `.npz` archive whose arrays are read by bare name
pub struct NpzArchive<R: Read + Seek> {
    reader: NpzReader<R>,
    entries: Vec<String>,
}

impl NpzArchive<File> {
    /// Open an archive on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> NpzArchive<R> {
    /// Wrap any seekable reader holding an `.npz` archive
    pub fn new(reader: R) -> Result<Self, LoadError> {
        let mut reader = NpzReader::new(reader)?;
        let entries = reader.names()?;
        Ok(Self { reader, entries })
    }

    /// Whether an array called `name` exists (with or without `.npy`)
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn entry(&self, name: &str) -> Option<String> {
        let with_suffix = format!("{}.npy", name);
        self.entries
            .iter()
            .find(|e| e.as_str() == name || **e == with_suffix)
            .cloned()
    }

    /// Read array `name` with dimensionality `D`, widening any numeric
    /// element type to `f64`.
    pub fn read_f64<D: Dimension>(&mut self, name: &str) -> Result<Array<f64, D>, LoadError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| LoadError::MissingArray(name.to_string()))?;

        macro_rules! attempt {
            ($($t:ty),*) => {
                $(
                    match self.reader.by_name::<OwnedRepr<$t>, D>(&entry) {
                        Ok(array) => return Ok(array.mapv(|v| v as f64)),
                        Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => {}
                        Err(e) => return Err(e.into()),
                    }
                )*
            };
        }
        attempt!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);

        Err(LoadError::UnsupportedDtype(name.to_string()))
    }

    /// Read a scalar (0-d or single-element) array as an integer.
    ///
    /// Floating-point scalars truncate toward zero; NaN and infinities are
    /// rejected.
    pub fn read_scalar(&mut self, name: &str) -> Result<i64, LoadError> {
        let array: ArrayD<f64> = self.read_f64::<IxDyn>(name)?;
        if array.len() != 1 {
            return Err(LoadError::invalid(
                name,
                format!("expected a scalar, found shape {:?}", array.shape()),
            ));
        }
        array
            .iter()
            .next()
            .copied()
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
            .ok_or_else(|| LoadError::invalid(name, "scalar is not finite"))
    }

    /// Read a 1-D array as integers, rejecting non-finite entries
    pub fn read_i64_vec(&mut self, name: &str) -> Result<Vec<i64>, LoadError> {
        let array = self.read_f64::<ndarray::Ix1>(name)?;
        array
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    Ok(v as i64)
                } else {
                    Err(LoadError::invalid(name, format!("non-finite entry {}", v)))
                }
            })
            .collect()
    }
}
