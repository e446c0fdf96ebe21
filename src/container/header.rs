//! Magic-string prefix shared by every LIBEOS container.
//!
//! The prefix is `magic ∥ padding ∥ version`, where the padding brings
//! `magic + version` up to a multiple of the alignment. Zero required padding
//! is replaced by a full alignment block, so a container always carries at
//! least one pad byte between the magic string and the version byte.

use super::constants::{Format, ALIGNMENT, PAD_VALUE, VERSION};

/// Number of pad bytes needed after a magic string of `magic_len` bytes.
///
/// Never returns zero for a non-zero `alignment`.
pub fn padding_len(magic_len: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return 0;
    }
    match (alignment - (magic_len + 1) % alignment) % alignment {
        0 => alignment,
        n => n,
    }
}

/// `magic` followed by its alignment padding.
pub fn padded_magic(magic: &[u8], alignment: usize) -> Vec<u8> {
    let pad = padding_len(magic.len(), alignment);
    let mut out = Vec::with_capacity(magic.len() + pad);
    out.extend_from_slice(magic);
    out.resize(magic.len() + pad, PAD_VALUE);
    out
}

/// Full container prefix for `format`: padded magic plus the version byte.
pub fn container_prefix(format: Format) -> Vec<u8> {
    let mut out = padded_magic(format.magic(), ALIGNMENT);
    out.push(VERSION);
    out
}

/// Length in bytes of [`container_prefix`] for `format`
pub fn prefix_len(format: Format) -> usize {
    let magic_len = format.magic().len();
    magic_len + padding_len(magic_len, ALIGNMENT) + 1
}
