use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use libeos::container::Container;
use libeos::pims::{PimsFile, PimsObservation};

/// Number of identical mode tables in the demo file
const DEMO_MODES: usize = 4;

/// Write a synthetic PIMS container for exercising downstream readers
pub fn run(output: PathBuf, num_observations: usize, num_bins: usize) -> Result<()> {
    info!("LIBEOS Demo - synthetic PIMS container");
    info!("======================================");

    let file = build_demo_file(num_observations, num_bins)?;
    file.save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("  Output file: {}", output.display());
    info!("  Observations: {}", num_observations);
    info!("  Bins: {}", num_bins);
    info!("  File size: {} bytes", file.to_bytes().len());
    Ok(())
}

/// Deterministic counts in `[0, 10000)` standing in for sensor data
fn mock_counts(obs: usize, num_bins: usize) -> Vec<f64> {
    (0..num_bins)
        .map(|b| ((obs * num_bins + b) * 7919 % 10_000) as f64)
        .collect()
}

/// `num` evenly spaced values from `start` to `stop` inclusive
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

fn build_demo_file(num_observations: usize, num_bins: usize) -> Result<PimsFile> {
    let observations = (0..num_observations)
        .map(|i| {
            PimsObservation::new(i as i64, 2 * i as i64, 0, &mock_counts(i, num_bins), None)
        })
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to build demo observations")?;

    let modes = vec![linspace(1.0, 1000.0, num_bins); DEMO_MODES];
    PimsFile::new(123, num_bins as i64, &modes, observations)
        .context("Failed to build demo PIMS file")
}
