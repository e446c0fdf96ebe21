//! # Conversion Driver
//!
//! Maps instrument inputs to container outputs and runs the encoders.
//! Each input is independent: a failing item never touches the output of
//! another, and is either reported (`continue_on_error`) or aborts the batch.
//!
//! ```rust,no_run
//! use libeos::container::Format;
//! use libeos::convert::{ConversionOptions, Converter};
//! use std::path::Path;
//!
//! let options = ConversionOptions {
//!     continue_on_error: true,
//!     write_metadata: true,
//!     ..Default::default()
//! };
//! let report = Converter::with_options(Format::Ethemis, options)
//!     .run(Path::new("trials/"), Some(Path::new("libeos/")))?;
//! println!("{}", report);
//! # Ok::<(), libeos::convert::ConvertError>(())
//! ```

mod converter;
mod error;
mod metadata;
mod options;
mod paths;

#[cfg(test)]
mod tests;

pub use converter::{BatchReport, Converter};
pub use error::ConvertError;
pub use metadata::SidecarMetadata;
pub use options::ConversionOptions;
pub use paths::{metadata_path, output_path_in, plan_jobs, Job};
