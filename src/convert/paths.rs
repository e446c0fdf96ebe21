use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::container::Format;

use super::error::ConvertError;

/// One input file and the container path it converts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Instrument input file
    pub input: PathBuf,
    /// Container output file
    pub output: PathBuf,
}

/// `<dir>/<input stem>.<format extension>`
pub fn output_path_in(dir: &Path, input: &Path, format: Format) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(format.extension());
    dir.join(name)
}

/// Sidecar metadata path for a container output
pub fn metadata_path(output: &Path) -> PathBuf {
    output.with_extension("meta")
}

/// Map an input path (file or directory) and an optional output path to
/// conversion jobs.
///
/// - directory input: the output must be a directory (created when
///   `create_output_dir` is set); every file with the format's input
///   extension is converted, in sorted order; two inputs mapping to the
///   same container (`a.npz` and `a.NPZ`) are a configuration error
/// - file input: a directory output receives `<stem>.<ext>`; any other
///   output path is used as given
/// - no output: containers land next to their inputs
pub fn plan_jobs(
    format: Format,
    input: &Path,
    output: Option<&Path>,
    create_output_dir: bool,
) -> Result<Vec<Job>, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::Configuration(format!(
            "Input does not exist: {}",
            input.display()
        )));
    }

    if !input.is_dir() {
        let output = match output {
            Some(out) if out.is_dir() => output_path_in(out, input, format),
            Some(out) => out.to_path_buf(),
            None => input.with_extension(format.extension()),
        };
        return Ok(vec![Job {
            input: input.to_path_buf(),
            output,
        }]);
    }

    let out_dir = output.unwrap_or(input);
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(ConvertError::Configuration(format!(
            "Input {} is a directory but output {} is not",
            input.display(),
            out_dir.display()
        )));
    }
    if !out_dir.exists() {
        if !create_output_dir {
            return Err(ConvertError::Configuration(format!(
                "Output directory does not exist: {}",
                out_dir.display()
            )));
        }
        log::info!("Creating output directory {}", out_dir.display());
        std::fs::create_dir_all(out_dir)?;
    }

    let wanted = format.input_extension();
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
        if path.is_file() && matches {
            inputs.push(path);
        } else {
            log::debug!("Ignoring {}", path.display());
        }
    }
    inputs.sort();

    let jobs: Vec<Job> = inputs
        .into_iter()
        .map(|input| Job {
            output: output_path_in(out_dir, &input, format),
            input,
        })
        .collect();

    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(jobs.len());
    for job in &jobs {
        if let Some(first) = seen.insert(&job.output, &job.input) {
            return Err(ConvertError::Configuration(format!(
                "{} and {} both convert to {}",
                first.display(),
                job.input.display(),
                job.output.display()
            )));
        }
    }
    Ok(jobs)
}
