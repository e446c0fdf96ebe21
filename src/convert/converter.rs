use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::container::{Container, Format};
use crate::loader::{EthemisInput, MiseInput, PimsInput};
use crate::pims::caps;

use super::error::ConvertError;
use super::metadata::SidecarMetadata;
use super::options::ConversionOptions;
use super::paths::{metadata_path, plan_jobs, Job};

/// Outcome of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Container files written
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Total container bytes written
    pub bytes_written: u64,
}

impl BatchReport {
    /// Whether every input converted
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted {} files ({} bytes), {} failed",
            self.converted.len(),
            self.bytes_written,
            self.failed.len()
        )
    }
}

/// Converts instrument inputs of one format into LIBEOS containers
#[derive(Debug, Clone)]
pub struct Converter {
    format: Format,
    options: ConversionOptions,
}

impl Converter {
    /// Create a converter with default options
    pub fn new(format: Format) -> Self {
        Self::with_options(format, ConversionOptions::default())
    }

    /// Create a converter with explicit options
    pub fn with_options(format: Format, options: ConversionOptions) -> Self {
        Self { format, options }
    }

    /// The container format this converter writes
    pub fn format(&self) -> Format {
        self.format
    }

    /// The options in effect
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert one input file to one container, returning its size in bytes.
    ///
    /// The input is fully validated before the output file is created. A
    /// failed sidecar write removes the container, so a failing input leaves
    /// no output behind.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<u64, ConvertError> {
        let size = match self.format {
            Format::Ethemis => {
                let loaded = EthemisInput::load(input)?;
                let image = loaded.to_image()?;
                let meta = self
                    .sidecar(input, output, &image)
                    .with_parameter("trial", loaded.trial)
                    .with_parameter("event_time", loaded.event_time);
                self.persist(&image, output, &meta)?
            }
            Format::Mise => {
                let loaded = MiseInput::load(input, self.options.max_bands)?;
                let cube = loaded.to_cube(self.options.observation_id, self.options.timestamp)?;
                let (rows, cols, bands) = cube.dim();
                let meta = self
                    .sidecar(input, output, &cube)
                    .with_parameter("rows", rows)
                    .with_parameter("cols", cols)
                    .with_parameter("bands", bands)
                    .with_parameter(
                        "max_bands",
                        self.options
                            .max_bands
                            .map_or_else(|| "all".to_string(), |b| b.to_string()),
                    );
                self.persist(&cube, output, &meta)?
            }
            Format::Pims => {
                let loaded = PimsInput::load(input)?;
                let file = loaded.to_file()?;
                let mut meta = self
                    .sidecar(input, output, &file)
                    .with_parameter("file_id", file.file_id())
                    .with_parameter("max_bins", file.max_bins())
                    .with_parameter("num_modes", file.num_modes())
                    .with_parameter("num_observations", file.observations().len());
                if loaded.modes_from_energy_ranges {
                    meta = meta.with_parameter("mode_source", "energy_ranges");
                }
                if loaded.timestamps_from_days {
                    meta = meta.with_parameter("timestamp_start_days", caps::TIMESTAMP_START_DAYS);
                }
                self.persist(&file, output, &meta)?
            }
        };

        info!(
            "Converted {} -> {} ({} bytes)",
            input.display(),
            output.display(),
            size
        );
        Ok(size)
    }

    fn sidecar<C: Container>(&self, input: &Path, output: &Path, container: &C) -> SidecarMetadata {
        SidecarMetadata::new(input, output, self.format, container.to_bytes().len() as u64)
    }

    /// Write the container and, when enabled, its sidecar
    fn persist<C: Container>(
        &self,
        container: &C,
        output: &Path,
        metadata: &SidecarMetadata,
    ) -> Result<u64, ConvertError> {
        let json = if self.options.write_metadata {
            Some(metadata.to_json()?)
        } else {
            None
        };

        container.save(output)?;
        if let Some(json) = json {
            if let Err(e) = std::fs::write(metadata_path(output), json) {
                if let Err(cleanup) = std::fs::remove_file(output) {
                    warn!("Could not remove {}: {}", output.display(), cleanup);
                }
                return Err(e.into());
            }
        }
        Ok(container.to_bytes().len() as u64)
    }

    /// Convert a file or every matching file of a directory.
    ///
    /// Without `continue_on_error` the first failure aborts the batch and is
    /// returned; otherwise failures are collected in the report.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<BatchReport, ConvertError> {
        let jobs = plan_jobs(self.format, input, output, self.options.create_output_dir)?;
        if jobs.is_empty() {
            warn!(
                "No .{} inputs found in {}",
                self.format.input_extension(),
                input.display()
            );
        }
        info!("Converting {} {} input(s)", jobs.len(), self.format);

        let mut report = BatchReport::default();
        for (job, result) in self.execute(&jobs)? {
            match result {
                Ok(size) => {
                    report.bytes_written += size;
                    report.converted.push(job.output.clone());
                }
                Err(e) => {
                    warn!("Skipping {}: {}", job.input.display(), e);
                    report.failed.push((job.input.clone(), e.to_string()));
                }
            }
        }
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn execute<'a>(
        &self,
        jobs: &'a [Job],
    ) -> Result<Vec<(&'a Job, Result<u64, ConvertError>)>, ConvertError> {
        use rayon::prelude::*;

        if !self.options.parallel {
            return self.execute_sequential(jobs);
        }
        let results: Vec<_> = jobs
            .par_iter()
            .map(|job| (job, self.convert_file(&job.input, &job.output)))
            .collect();
        if !self.options.continue_on_error {
            if let Some(pos) = results.iter().position(|(_, r)| r.is_err()) {
                if let Some((_, Err(e))) = results.into_iter().nth(pos) {
                    return Err(e);
                }
            }
        }
        Ok(results)
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<'a>(
        &self,
        jobs: &'a [Job],
    ) -> Result<Vec<(&'a Job, Result<u64, ConvertError>)>, ConvertError> {
        if self.options.parallel {
            warn!("Parallel conversion requested but built without the parallel feature; converting sequentially.");
        }
        self.execute_sequential(jobs)
    }

    fn execute_sequential<'a>(
        &self,
        jobs: &'a [Job],
    ) -> Result<Vec<(&'a Job, Result<u64, ConvertError>)>, ConvertError> {
        let mut results = Vec::with_capacity(jobs.len());
        for job in jobs {
            let result = self.convert_file(&job.input, &job.output);
            if let Err(e) = result {
                if !self.options.continue_on_error {
                    return Err(e);
                }
                results.push((job, Err(e)));
            } else {
                results.push((job, result));
            }
        }
        Ok(results)
    }
}
