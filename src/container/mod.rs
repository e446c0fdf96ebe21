//! # LIBEOS Container Primitives
//!
//! Shared building blocks for every LIBEOS variant:
//!
//! 1. **Header codec**: magic string, alignment padding, version byte.
//! 2. **Field packing**: fixed-width big-endian header words and payloads.
//! 3. **Validation**: rejecting coercion of samples and identifiers into
//!    their on-disk widths.
//!
//! All encoders compose these in the same order:
//! `magic ∥ padding ∥ version ∥ header fields ∥ payload`.

mod constants;
mod error;
mod fields;
mod header;
mod validate;


pub use constants::{Format, ALIGNMENT, MAX_DN, MAX_FIELD, PAD_VALUE, VERSION};
pub use error::EncodeError;
pub use fields::FieldPacker;
pub use header::{container_prefix, padded_magic, padding_len, prefix_len};
pub use validate::{check_dimension, check_dn, check_dn_samples, check_field, Numeric};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Common surface of every encoded LIBEOS container.
///
/// Implementors validate at construction and compute their bytes at most
/// once; `to_bytes` is therefore infallible.
pub trait Container {
    /// Which variant this container encodes
    const FORMAT: Format;

    /// The complete, memoized container bytes
    fn to_bytes(&self) -> &[u8];

    /// Write the container bytes to `writer`
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(self.to_bytes())?;
        Ok(())
    }

    /// Write the container to a new file at `path`.
    ///
    /// The file handle is released on every path; on a write failure the
    /// partially written file is removed.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EncodeError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let result = self
            .write_to(&mut writer)
            .and_then(|()| writer.flush().map_err(EncodeError::from));
        drop(writer);

        if let Err(e) = result {
            let _ = std::fs::remove_file(path);
            return Err(e);
        }
        log::debug!(
            "Wrote {} container ({} bytes) to {}",
            Self::FORMAT,
            self.to_bytes().len(),
            path.display()
        );
        Ok(())
    }
}
