//! # LIBEOS - Instrument Container Encoders
//!
//! `libeos` packs already-loaded scientific-instrument digital-number (DN)
//! arrays into the LIBEOS family of self-describing binary containers.
//!
//! ## Container Variants
//!
//! | Instrument | Type | Extension | Payload |
//! |------------|------|-----------|---------|
//! | E-THEMIS | [`ethemis::EthemisImage`] | `.etm` | 3 × 2-D bands, `u16` |
//! | MISE | [`mise::MiseCube`] | `.mis` | `(rows, cols, bands)` cube, `u16` |
//! | PIMS | [`pims::PimsFile`] | `.pim` | mode tables (`f32`) + observations (`u32`) |
//!
//! ## Byte Layout
//!
//! Every container starts with the same prefix:
//!
//! ```text
//! magic ∥ 0xFF padding ∥ version (1)
//! ```
//!
//! The padding brings `magic + version` to a multiple of 4 bytes and is
//! never empty. Header fields follow as big-endian `u32`, then the payload,
//! big-endian throughout.
//!
//! ## Quick Start
//!
//! ```rust
//! use libeos::container::Container;
//! use libeos::ethemis::EthemisImage;
//! use ndarray::Array2;
//!
//! let band = Array2::<u16>::zeros((2, 2));
//! let image = EthemisImage::new(3, 100, band.view(), band.view(), band.view())?;
//! assert_eq!(image.header_fields(), vec![3, 100, 2, 2, 2, 2, 2, 2]);
//!
//! let bytes = image.to_bytes();
//! assert_eq!(&bytes[..11], b"EOS_ETHEMIS");
//! # Ok::<(), libeos::container::EncodeError>(())
//! ```
//!
//! Inputs are validated when the encoder is built; an out-of-range sample or
//! identifier is an [`EncodeError`](container::EncodeError) and no bytes are
//! produced. Encoded bytes are computed once and cached.
//!
//! ## Architecture
//!
//! - [`container`]: header codec, big-endian field packing, range checks
//! - [`ethemis`], [`mise`], [`pims`]: the three container encoders
//! - [`loader`]: NumPy `.npz`/`.npy` input loading
//! - [`convert`]: path planning, batch conversion, sidecar metadata

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod container;
pub mod convert;
pub mod ethemis;
pub mod loader;
pub mod mise;
pub mod pims;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::container::{Container, EncodeError, Format};
    pub use crate::convert::{BatchReport, ConversionOptions, ConvertError, Converter};
    pub use crate::ethemis::EthemisImage;
    pub use crate::loader::{EthemisInput, LoadError, MiseInput, PimsInput};
    pub use crate::mise::MiseCube;
    pub use crate::pims::{PimsFile, PimsObservation};
}
