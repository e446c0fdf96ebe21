/// Filler byte used for magic-header alignment padding
pub const PAD_VALUE: u8 = 0xFF;

/// Alignment (in bytes) of the magic string plus version byte
pub const ALIGNMENT: usize = 4;

/// Container version byte, shared by all current formats
pub const VERSION: u8 = 1;

/// Largest digital number a 16-bit sample may carry
pub const MAX_DN: u64 = u16::MAX as u64;

/// Largest value a 32-bit header field or count may carry
pub const MAX_FIELD: u64 = u32::MAX as u64;

/// The three LIBEOS container variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// E-THEMIS 3-band thermal image
    Ethemis,
    /// MISE hyperspectral cube
    Mise,
    /// PIMS multi-observation particle counts
    Pims,
}

impl Format {
    /// Magic string written at the start of the container
    pub fn magic(&self) -> &'static [u8] {
        match self {
            Format::Ethemis => b"EOS_ETHEMIS",
            Format::Mise => b"EOS_MISE",
            Format::Pims => b"EOS_PIMS",
        }
    }

    /// Conventional file extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Ethemis => "etm",
            Format::Mise => "mis",
            Format::Pims => "pim",
        }
    }

    /// Extension of the input files the bundled loaders read
    pub fn input_extension(&self) -> &'static str {
        match self {
            Format::Mise => "npy",
            Format::Ethemis | Format::Pims => "npz",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Ethemis => write!(f, "E-THEMIS"),
            Format::Mise => write!(f, "MISE"),
            Format::Pims => write!(f, "PIMS"),
        }
    }
}
