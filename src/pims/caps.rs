//! Fixed energy-bin tables for the Cassini CAPS ELS sensor.
//!
//! Mode 0 is the normal 63-bin mode; mode 1 is the energy-summed 32-bin mode.
//! Edges are in eV, descending. ELS times arrive as day numbers and are
//! stored as whole seconds since 2000-01-01.

/// Bin count every CAPS-derived PIMS file is padded to
pub const CAPS_MAX_BINS: usize = 63;

/// Mode 0: the normal 63-bin mode
pub const MODE_0_EDGES: [f64; 63] = [
    2.6040e+04, 2.2227e+04, 1.8991e+04, 1.6256e+04, 1.3876e+04, 1.1867e+04, 1.0143e+04,
    8.6740e+03, 7.4150e+03, 6.3360e+03, 5.4160e+03, 4.6300e+03, 3.9560e+03, 3.3830e+03,
    2.8900e+03, 2.4710e+03, 2.1120e+03, 1.8050e+03, 1.5440e+03, 1.3190e+03, 1.1280e+03,
    9.6410e+02, 8.2400e+02, 7.0430e+02, 6.0180e+02, 5.1480e+02, 4.3940e+02, 3.7590e+02,
    3.2150e+02, 2.7480e+02, 2.3500e+02, 2.0090e+02, 1.7170e+02, 1.4690e+02, 1.2510e+02,
    1.0740e+02, 9.1760e+01, 7.8180e+01, 6.7150e+01, 5.7450e+01, 4.9000e+01, 4.1810e+01,
    3.5840e+01, 3.0490e+01, 2.6340e+01, 2.2210e+01, 1.9260e+01, 1.6330e+01, 1.3980e+01,
    1.1640e+01, 9.8900e+00, 8.7200e+00, 7.5600e+00, 6.3900e+00, 5.2300e+00, 4.6400e+00,
    4.0600e+00, 3.4800e+00, 2.9000e+00, 2.3200e+00, 1.7400e+00, 1.1600e+00, 5.8000e-01,
];

/// Mode 1: the energy-summed 32-bin mode
pub const MODE_1_EDGES: [f64; 32] = [
    2.3971e+04, 1.7506e+04, 1.2785e+04, 9.3458e+03, 6.8294e+03, 4.9894e+03, 3.6450e+03,
    2.6626e+03, 1.9454e+03, 1.4219e+03, 1.0390e+03, 7.5904e+02, 5.5458e+02, 4.0494e+02,
    2.9615e+02, 2.1649e+02, 1.5824e+02, 1.1549e+02, 8.4391e+01, 6.1886e+01, 4.5098e+01,
    3.2937e+01, 2.4099e+01, 1.7670e+01, 1.2710e+01, 9.2529e+00, 6.9252e+00, 4.9083e+00,
    3.7452e+00, 2.5844e+00, 1.4155e+00, 5.7999e-01,
];

/// Both mode tables, ready for [`PimsFile::new`](super::PimsFile::new)
pub fn mode_bin_definitions() -> Vec<Vec<f64>> {
    vec![MODE_0_EDGES.to_vec(), MODE_1_EDGES.to_vec()]
}

/// Mode of one observation, from its row of energy ranges.
///
/// A row with exactly 63 non-NaN entries is mode 0; anything else is mode 1.
pub fn mode_from_energy_ranges(energy_ranges: &[f64]) -> u32 {
    let populated = energy_ranges.iter().filter(|e| !e.is_nan()).count();
    u32::from(populated != MODE_0_EDGES.len())
}

/// Number of populated bins for `mode`, or `None` for an unknown mode
pub fn bins_for_mode(mode: u32) -> Option<usize> {
    match mode {
        0 => Some(MODE_0_EDGES.len()),
        1 => Some(MODE_1_EDGES.len()),
        _ => None,
    }
}

/// Day number of 2000-01-01 00:00 UTC on the legacy matplotlib calendar
/// (0001-01-01 is day 1), which ELS day-number times use.
pub const TIMESTAMP_START_DAYS: f64 = 730_120.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert an ELS day number to whole seconds since 2000-01-01, rounding
/// to the nearest second.
///
/// Returns `None` for non-finite times and for times outside the `u32`
/// range (before 2000 or after 2136).
pub fn days_to_seconds(days: f64) -> Option<u32> {
    let seconds = ((days - TIMESTAMP_START_DAYS) * SECONDS_PER_DAY).round();
    if seconds.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&seconds) {
        Some(seconds as u32)
    } else {
        None
    }
}
