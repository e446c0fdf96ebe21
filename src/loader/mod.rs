//! # Instrument Input Loaders
//!
//! Read already-calibrated DN arrays from NumPy files and hand them to the
//! encoders. Loaders only check structure (array presence, rank, matching
//! lengths); value ranges are checked by the encoders themselves.
//!
//! | Instrument | Input | Loader |
//! |------------|-------|--------|
//! | E-THEMIS | `.npz` simulation trial | [`EthemisInput`] |
//! | MISE | `.npy` `uint16` cube | [`MiseInput`] |
//! | PIMS | `.npz` observation set | [`PimsInput`] |

mod arrays;
mod error;
mod ethemis;
mod mise;
mod pims;


pub use arrays::NpzArchive;
pub use error::LoadError;
pub use ethemis::{EthemisInput, BAND_NAMES};
pub use mise::MiseInput;
pub use pims::PimsInput;
