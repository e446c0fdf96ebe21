//! # PIMS Particle-Count Containers
//!
//! A PIMS `.pim` file bundles many time-tagged observations, each a vector
//! of per-bin particle counts, with the bin-edge tables of every instrument
//! mode.
//!
//! ## Example
//!
//! ```rust
//! use libeos::container::Container;
//! use libeos::pims::{PimsFile, PimsObservation};
//!
//! let obs = PimsObservation::new(0, 0, 0, &[1.0, 2.0, f64::NAN], None)?;
//! let file = PimsFile::new(1, 4, &[vec![10.0, 5.0, 1.0]], vec![obs])?;
//! assert_eq!(file.header_fields(), [1, 1, 4, 1]);
//! let bytes = file.to_bytes();
//! assert_eq!(&bytes[..8], b"EOS_PIMS");
//! # Ok::<(), libeos::container::EncodeError>(())
//! ```

pub mod caps;
mod file;
mod observation;


pub use file::{PimsFile, FILE_HEADER_FIELDS};
pub use observation::{PimsObservation, OBSERVATION_HEADER_FIELDS};
