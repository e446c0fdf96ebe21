//! Integration tests for LIBEOS container byte layouts
//!
//! These tests verify:
//! 1. Bit-exact prefixes and header fields for all three variants
//! 2. Payload sizes and orderings
//! 3. File persistence through `Container::save`

use libeos::container::{prefix_len, Container, EncodeError, Format};
use libeos::ethemis::EthemisImage;
use libeos::mise::MiseCube;
use libeos::pims::{caps, PimsFile, PimsObservation};
use ndarray::{Array2, Array3};
use tempfile::tempdir;

fn be_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect()
}

#[test]
fn test_ethemis_scenario() {
    let band = Array2::<u16>::zeros((2, 2));
    let image = EthemisImage::new(3, 100, band.view(), band.view(), band.view()).unwrap();
    let bytes = image.to_bytes();

    let mut expected = b"EOS_ETHEMIS".to_vec();
    expected.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
    assert_eq!(&bytes[..16], &expected[..]);

    assert_eq!(be_words(&bytes[16..48]), vec![3, 100, 2, 2, 2, 2, 2, 2]);
    assert_eq!(&bytes[48..], &[0u8; 24][..]);
}

#[test]
fn test_mise_scenario() {
    let cube = Array3::<u16>::from_elem((2, 3, 4), 65535);
    let mise = MiseCube::new(11, 22, cube.view()).unwrap();
    let bytes = mise.to_bytes();

    assert_eq!(&bytes[..12], b"EOS_MISE\xFF\xFF\xFF\x01");
    assert_eq!(be_words(&bytes[12..32]), vec![11, 22, 3, 2, 4]);
    assert_eq!(bytes.len() - 32, 48);
    assert!(bytes[32..].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_pims_scenario() {
    let obs = vec![
        PimsObservation::new(0, 0, 0, &[1.0, 2.0, 3.0], None).unwrap(),
        PimsObservation::new(1, 2, 1, &[4.0, f64::NAN], None).unwrap(),
    ];
    let file = PimsFile::new(42, 3, &[vec![1.0, 2.0, 3.0], vec![5.0, 6.0]], obs).unwrap();
    let bytes = file.to_bytes();

    assert_eq!(&bytes[..12], b"EOS_PIMS\xFF\xFF\xFF\x01");
    assert_eq!(be_words(&bytes[12..28]), vec![42, 2, 3, 2]);

    let table: Vec<f32> = bytes[28..52]
        .chunks_exact(4)
        .map(|w| f32::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect();
    assert_eq!(table, vec![1.0, 2.0, 3.0, 5.0, 6.0, f32::INFINITY]);

    assert_eq!(
        be_words(&bytes[52..]),
        vec![0, 0, 3, 0, 1, 2, 3, 1, 2, 2, 1, 4, 0, 0]
    );
}

#[test]
fn test_save_writes_exact_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("obs.mis");

    let cube = Array3::from_shape_fn((3, 2, 2), |(r, c, b)| (r + c + b) as u32);
    let mise = MiseCube::new(1, 2, cube.view()).unwrap();
    mise.save(&path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, mise.to_bytes());
    assert_eq!(on_disk.len(), prefix_len(Format::Mise) + 20 + 12 * 2);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("obs.pim");

    let file = PimsFile::new(0, 0, &[], Vec::new()).unwrap();
    assert!(matches!(file.save(&path), Err(EncodeError::IoError(_))));
    assert!(!path.exists());
}

#[test]
fn test_caps_container_size() {
    let counts: Vec<f64> = (0..caps::CAPS_MAX_BINS).map(|i| i as f64).collect();
    let observations = (0..10)
        .map(|i| {
            let mode = (i % 2) as u32;
            PimsObservation::new(i, i * 8, mode as i64, &counts, caps::bins_for_mode(mode))
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let file = PimsFile::new(
        0,
        caps::CAPS_MAX_BINS as i64,
        &caps::mode_bin_definitions(),
        observations,
    )
    .unwrap();

    let per_obs = 16 + caps::CAPS_MAX_BINS * 4;
    assert_eq!(
        file.to_bytes().len(),
        12 + 16 + 2 * caps::CAPS_MAX_BINS * 4 + 10 * per_obs
    );

    // Second observation is mode 1: 32 populated bins, zero-padded to 63
    let second = &file.to_bytes()[12 + 16 + 2 * 63 * 4 + per_obs..][..per_obs];
    let words = be_words(second);
    assert_eq!(&words[..4], &[1, 8, 32, 1]);
    assert_eq!(words[4 + 31], 31);
    assert!(words[4 + 32..].iter().all(|&w| w == 0));
}
