use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use libeos::container::Format;
use libeos::convert::ConversionOptions;

mod config;
mod convert;
mod demo;

use config::Config;

/// LIBEOS - instrument DN arrays to LIBEOS binary containers
#[derive(Parser)]
#[command(name = "libeos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every conversion command
#[derive(Args, Debug, Default)]
struct BatchArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Create the output directory if it does not exist
    #[arg(long)]
    create_output_dir: bool,

    /// Write a .meta JSON sidecar next to each container
    #[arg(long)]
    metadata: bool,

    /// Skip inputs that fail validation instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Convert inputs concurrently (requires the parallel feature)
    #[arg(long)]
    parallel: bool,
}

impl BatchArgs {
    /// Defaults, then config file, then flags
    fn resolve(&self, base: ConversionOptions) -> Result<ConversionOptions> {
        let mut options = match &self.config {
            Some(path) => Config::from_file(path)?.apply(base),
            None => base,
        };
        options.create_output_dir |= self.create_output_dir;
        options.write_metadata |= self.metadata;
        options.continue_on_error |= self.continue_on_error;
        options.parallel |= self.parallel;
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert E-THEMIS simulation trials (.npz) to .etm containers
    Ethemis {
        /// Input .npz file or directory of .npz files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output .etm file or directory (defaults to next to the input)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Convert MISE uint16 cubes (.npy) to .mis containers
    Mise {
        /// Input .npy file or directory of .npy files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output .mis file or directory (defaults to next to the input)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Keep only the first N bands (default: 421)
        #[arg(long, value_name = "N", conflicts_with = "all_bands")]
        max_bands: Option<usize>,

        /// Keep every band of the cube
        #[arg(long)]
        all_bands: bool,

        /// Observation id written to the container header
        #[arg(long, default_value = "0")]
        observation_id: i64,

        /// Timestamp written to the container header
        #[arg(long, default_value = "0")]
        timestamp: i64,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Convert PIMS observation sets (.npz) to .pim containers
    Pims {
        /// Input .npz file or directory of .npz files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output .pim file or directory (defaults to next to the input)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Write a synthetic PIMS container for testing downstream readers
    Demo {
        /// Output .pim file path
        #[arg(value_name = "OUTPUT", default_value = "demo.pim")]
        output: PathBuf,

        /// Number of observations
        #[arg(short = 'n', long, default_value = "4")]
        num_observations: usize,

        /// Bins per observation
        #[arg(short = 'b', long, default_value = "67")]
        num_bins: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ethemis {
            input,
            output,
            batch,
        } => {
            let options = batch.resolve(ConversionOptions::default())?;
            convert::run(Format::Ethemis, input, output, options)
        }
        Commands::Mise {
            input,
            output,
            max_bands,
            all_bands,
            observation_id,
            timestamp,
            batch,
        } => {
            let mut options = batch.resolve(ConversionOptions::mise())?;
            if all_bands {
                options.max_bands = None;
            } else if max_bands.is_some() {
                options.max_bands = max_bands;
            }
            options.observation_id = observation_id;
            options.timestamp = timestamp;
            convert::run(Format::Mise, input, output, options)
        }
        Commands::Pims {
            input,
            output,
            batch,
        } => {
            let options = batch.resolve(ConversionOptions::default())?;
            convert::run(Format::Pims, input, output, options)
        }
        Commands::Demo {
            output,
            num_observations,
            num_bins,
        } => demo::run(output, num_observations, num_bins),
    }
}
