use super::*;
use crate::container::Format;
use ndarray::{arr0, Array2};
use ndarray_npy::NpzWriter;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

fn write_trial(path: &Path, trial: i64, fill: i64) {
    let mut npz = NpzWriter::new(File::create(path).unwrap());
    npz.add_array("trial", &arr0(trial)).unwrap();
    npz.add_array("event_time", &arr0(trial * 10)).unwrap();
    for name in crate::loader::BAND_NAMES {
        npz.add_array(name, &Array2::<i64>::from_elem((2, 3), fill))
            .unwrap();
    }
    npz.finish().unwrap();
}

#[test]
fn test_plan_file_to_directory() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.v2.npz");
    std::fs::write(&input, b"").unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let jobs = plan_jobs(Format::Pims, &input, Some(&out), false).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].output, out.join("run.v2.pim"));

    let explicit = dir.path().join("explicit.bin");
    let jobs = plan_jobs(Format::Pims, &input, Some(&explicit), false).unwrap();
    assert_eq!(jobs[0].output, explicit);

    let jobs = plan_jobs(Format::Pims, &input, None, false).unwrap();
    assert_eq!(jobs[0].output, dir.path().join("run.v2.pim"));
}

#[test]
fn test_plan_directory_requires_directory_output() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("inputs");
    std::fs::create_dir(&inputs).unwrap();
    let not_a_dir = dir.path().join("file.etm");
    std::fs::write(&not_a_dir, b"").unwrap();

    let err = plan_jobs(Format::Ethemis, &inputs, Some(&not_a_dir), false).unwrap_err();
    assert!(matches!(err, ConvertError::Configuration(_)));

    let missing = dir.path().join("missing");
    assert!(plan_jobs(Format::Ethemis, &inputs, Some(&missing), false).is_err());
    assert!(plan_jobs(Format::Ethemis, &inputs, Some(&missing), true).is_ok());
    assert!(missing.is_dir());
}

#[test]
fn test_plan_directory_filters_and_sorts() {
    let dir = tempdir().unwrap();
    for name in ["b.npz", "a.npz", "notes.txt", "c.NPZ"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    let out = tempdir().unwrap();

    let jobs = plan_jobs(Format::Ethemis, dir.path(), Some(out.path()), false).unwrap();
    let outputs: Vec<_> = jobs.iter().map(|j| j.output.clone()).collect();
    assert_eq!(
        outputs,
        vec![
            out.path().join("a.etm"),
            out.path().join("b.etm"),
            out.path().join("c.etm"),
        ]
    );
}

#[test]
fn test_batch_continues_past_bad_item() {
    let inputs = tempdir().unwrap();
    let outputs = tempdir().unwrap();
    write_trial(&inputs.path().join("t1.npz"), 1, 5);
    write_trial(&inputs.path().join("t2.npz"), 2, 70_000);
    write_trial(&inputs.path().join("t3.npz"), 3, 0);

    let options = ConversionOptions {
        continue_on_error: true,
        write_metadata: true,
        ..Default::default()
    };
    let report = Converter::with_options(Format::Ethemis, options)
        .run(inputs.path(), Some(outputs.path()))
        .unwrap();

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("t2.npz"));
    assert!(!report.is_success());

    // The rejected item leaves nothing behind
    assert!(!outputs.path().join("t2.etm").exists());
    assert!(!outputs.path().join("t2.meta").exists());

    let size = std::fs::metadata(outputs.path().join("t1.etm")).unwrap().len();
    assert_eq!(size, 16 + 32 + 3 * 6 * 2);
    assert_eq!(report.bytes_written, 2 * size);

    let meta = std::fs::read_to_string(outputs.path().join("t3.meta")).unwrap();
    let meta = SidecarMetadata::from_json(&meta).unwrap();
    assert_eq!(meta.format, Format::Ethemis);
    assert_eq!(meta.output_file, "t3.etm");
    assert_eq!(meta.parameters["trial"], "3");
    assert!(meta.source_file.ends_with("t3.npz"));
}

#[test]
fn test_batch_aborts_without_continue() {
    let inputs = tempdir().unwrap();
    let outputs = tempdir().unwrap();
    write_trial(&inputs.path().join("a.npz"), 1, -4);
    write_trial(&inputs.path().join("b.npz"), 2, 1);

    let err = Converter::new(Format::Ethemis)
        .run(inputs.path(), Some(outputs.path()))
        .unwrap_err();
    assert!(matches!(err, ConvertError::EncodeError(_)));
    assert!(!outputs.path().join("a.etm").exists());
}

#[test]
fn test_sidecar_json_round_trip() {
    let meta = SidecarMetadata::new(Path::new("in.npz"), Path::new("out/in.pim"), Format::Pims, 64)
        .with_parameter("max_bins", 63);
    let json = meta.to_json().unwrap();
    assert!(json.contains("\"format\": \"pims\""));
    assert_eq!(SidecarMetadata::from_json(&json).unwrap(), meta);
    assert_eq!(metadata_path(Path::new("out/in.pim")), Path::new("out/in.meta"));
}

#[test]
fn test_plan_rejects_colliding_outputs() {
    let dir = tempdir().unwrap();
    for name in ["a.npz", "a.NPZ"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    // Case-insensitive filesystems fold the two names into one file
    if std::fs::read_dir(dir.path()).unwrap().count() < 2 {
        return;
    }
    let out = tempdir().unwrap();

    let err = plan_jobs(Format::Ethemis, dir.path(), Some(out.path()), false).unwrap_err();
    match err {
        ConvertError::Configuration(msg) => assert!(msg.contains("a.etm")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failed_sidecar_removes_container() {
    let inputs = tempdir().unwrap();
    let outputs = tempdir().unwrap();
    write_trial(&inputs.path().join("t1.npz"), 1, 5);
    write_trial(&inputs.path().join("t2.npz"), 2, 6);
    // A directory where the sidecar file should go
    std::fs::create_dir(outputs.path().join("t1.meta")).unwrap();

    let options = ConversionOptions {
        continue_on_error: true,
        write_metadata: true,
        ..Default::default()
    };
    let report = Converter::with_options(Format::Ethemis, options)
        .run(inputs.path(), Some(outputs.path()))
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("t1.npz"));
    assert!(!outputs.path().join("t1.etm").exists());

    assert_eq!(report.converted, vec![outputs.path().join("t2.etm")]);
    let size = std::fs::metadata(outputs.path().join("t2.etm")).unwrap().len();
    assert_eq!(report.bytes_written, size);
    assert!(outputs.path().join("t2.meta").is_file());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_batch_matches_sequential() {
    let inputs = tempdir().unwrap();
    for (i, fill) in [(1, 5), (2, 70_000), (3, 0), (4, 9)] {
        write_trial(&inputs.path().join(format!("t{i}.npz")), i, fill);
    }

    let run = |parallel: bool| {
        let outputs = tempdir().unwrap();
        let options = ConversionOptions {
            continue_on_error: true,
            parallel,
            ..Default::default()
        };
        let report = Converter::with_options(Format::Ethemis, options)
            .run(inputs.path(), Some(outputs.path()))
            .unwrap();
        let names: Vec<_> = report
            .converted
            .iter()
            .map(|p| p.file_name().unwrap().to_owned())
            .collect();
        let t1 = std::fs::read(outputs.path().join("t1.etm")).unwrap();
        (names, report.failed.len(), report.bytes_written, t1)
    };

    let sequential = run(false);
    let parallel = run(true);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.0.len(), 3);
    assert_eq!(parallel.1, 1);

    let strict = Converter::with_options(
        Format::Ethemis,
        ConversionOptions {
            parallel: true,
            ..Default::default()
        },
    );
    let outputs = tempdir().unwrap();
    assert!(matches!(
        strict.run(inputs.path(), Some(outputs.path())),
        Err(ConvertError::EncodeError(_))
    ));
}
