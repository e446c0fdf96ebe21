use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use libeos::container::Format;
use libeos::convert::{ConversionOptions, Converter};

/// Convert a file or directory of instrument inputs to LIBEOS containers
pub fn run(
    format: Format,
    input: PathBuf,
    output: Option<PathBuf>,
    options: ConversionOptions,
) -> Result<()> {
    info!("LIBEOS Converter - {} to .{}", format, format.extension());
    info!("==================================");
    info!("Input:  {}", input.display());
    match &output {
        Some(out) => info!("Output: {}", out.display()),
        None => info!("Output: next to input"),
    }
    info!("Sidecar metadata: {}", options.write_metadata);
    if format == Format::Mise {
        match options.max_bands {
            Some(bands) => info!("Band limit: {}", bands),
            None => info!("Band limit: none"),
        }
    }

    let converter = Converter::with_options(format, options);
    let report = converter
        .run(&input, output.as_deref())
        .context("Conversion failed")?;

    info!("Conversion complete!");
    info!("  {}", report);
    for (path, reason) in &report.failed {
        warn!("  Failed: {} ({})", path.display(), reason);
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} inputs failed",
            report.failed.len(),
            report.failed.len() + report.converted.len()
        );
    }
    Ok(())
}
