//! Range checks and explicit numeric coercion.
//!
//! Every conversion here rejects out-of-range input instead of saturating or
//! wrapping. Floating-point values must be finite; a fractional part is
//! truncated toward zero once the value is known to be in range.

use std::fmt::Display;

use super::constants::{MAX_DN, MAX_FIELD};
use super::error::EncodeError;

/// A numeric element that can be checked into a fixed-width unsigned type.
pub trait Numeric: Copy + Display {
    /// The value as `u64` if it lies in `0..=max`, else `None`.
    ///
    /// Floats must be finite and satisfy the bound before truncation, so
    /// `65535.5` does not fit a 16-bit sample.
    fn to_bounded(self, max: u64) -> Option<u64>;

    /// Whether this value is a floating-point NaN
    fn is_nan(self) -> bool {
        false
    }
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn to_bounded(self, max: u64) -> Option<u64> {
                    u64::try_from(self).ok().filter(|&v| v <= max)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn to_bounded(self, max: u64) -> Option<u64> {
                    let v = self as f64;
                    if v.is_finite() && v >= 0.0 && v <= max as f64 {
                        Some(v as u64).filter(|&v| v <= max)
                    } else {
                        None
                    }
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }
            }
        )*
    };
}

impl_numeric_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_numeric_float!(f32, f64);

/// Check a scalar header field (identifier, timestamp, mode, ...) into `u32`.
pub fn check_field<T: Numeric>(field: &str, value: T) -> Result<u32, EncodeError> {
    value.to_bounded(MAX_FIELD)
        .map(|v| v as u32)
        .ok_or_else(|| EncodeError::out_of_range(field, value, MAX_FIELD))
}

/// Check one digital-number sample into `u16`.
pub fn check_dn<T: Numeric>(field: &str, value: T) -> Result<u16, EncodeError> {
    value.to_bounded(MAX_DN)
        .map(|v| v as u16)
        .ok_or_else(|| EncodeError::out_of_range(field, value, MAX_DN))
}

/// Check every sample of an iterator into `u16`, failing on the first bad one.
pub fn check_dn_samples<'a, T, I>(field: &str, samples: I) -> Result<Vec<u16>, EncodeError>
where
    T: Numeric + 'a,
    I: IntoIterator<Item = &'a T>,
{
    samples
        .into_iter()
        .map(|&v| check_dn(field, v))
        .collect()
}

/// Check an array dimension into a `u32` header field.
pub fn check_dimension(what: &str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| {
        EncodeError::ShapeMismatch(format!("{} of {} exceeds the 32-bit header field", what, len))
    })
}
