//! # LIBEOS Converter
//!
//! A command-line tool for packing instrument DN arrays into LIBEOS
//! containers.
//!
//! ## Usage
//!
//! ```bash
//! # One E-THEMIS trial, or a whole directory of them
//! libeos ethemis trial_0001.npz out/
//! libeos ethemis trials/ out/ --create-output-dir --metadata
//!
//! # MISE cube, trimmed to the instrument's 421 bands
//! libeos mise cube.npy -o cube.mis
//!
//! # PIMS observation sets
//! libeos pims els/ pim/ --continue-on-error
//!
//! # Synthetic PIMS file
//! libeos demo demo.pim -n 4
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
