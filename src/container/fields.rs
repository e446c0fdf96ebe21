//! Fixed-width big-endian packing of header fields and payloads.

use byteorder::{BigEndian, ByteOrder};

use super::constants::Format;
use super::header::container_prefix;

/// Append-only big-endian byte builder.
///
/// Header fields are written as unsigned 32-bit words; payloads as
/// contiguous runs of `u16`, `u32` or `f32` values.
#[derive(Debug, Default)]
pub struct FieldPacker {
    buf: Vec<u8>,
}

impl FieldPacker {
    /// Create an empty packer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Create a packer pre-filled with the container prefix for `format`
    pub fn with_prefix(format: Format, capacity: usize) -> Self {
        let prefix = container_prefix(format);
        let mut buf = Vec::with_capacity(prefix.len() + capacity);
        buf.extend_from_slice(&prefix);
        Self { buf }
    }

    /// Append one unsigned 32-bit field
    pub fn push_u32(&mut self, value: u32) {
        let mut word = [0u8; 4];
        BigEndian::write_u32(&mut word, value);
        self.buf.extend_from_slice(&word);
    }

    /// Append header fields in the order given
    pub fn push_fields(&mut self, fields: &[u32]) {
        self.push_u32_slice(fields);
    }

    /// Append a run of 16-bit samples
    pub fn push_u16_slice(&mut self, values: &[u16]) {
        let start = self.grow(values.len() * 2);
        BigEndian::write_u16_into(values, &mut self.buf[start..]);
    }

    /// Append a run of 32-bit unsigned values
    pub fn push_u32_slice(&mut self, values: &[u32]) {
        let start = self.grow(values.len() * 4);
        BigEndian::write_u32_into(values, &mut self.buf[start..]);
    }

    /// Append a run of 32-bit IEEE-754 floats
    pub fn push_f32_slice(&mut self, values: &[f32]) {
        let start = self.grow(values.len() * 4);
        BigEndian::write_f32_into(values, &mut self.buf[start..]);
    }

    /// Append `count` zero-valued 32-bit words
    pub fn push_zero_u32(&mut self, count: usize) {
        self.grow(count * 4);
    }

    /// Append raw, already-encoded bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the packer and return its bytes
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    // Zero-extends the buffer and returns the offset of the new region.
    fn grow(&mut self, additional: usize) -> usize {
        let start = self.buf.len();
        self.buf.resize(start + additional, 0);
        start
    }
}
