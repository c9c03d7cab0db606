//! binary/types.rs
//! Error type and bit-level helpers shared by the buffer implementation.

use std::fmt;

/// Bits per byte.
pub const BYTE: usize = 8;

/// Number of bytes needed to hold `n_bits` bits.
#[inline]
pub const fn bytes_for_bits(n_bits: usize) -> usize {
    n_bits.div_ceil(BYTE)
}

/// Mask keeping the `used` leading bits of a byte (`used` in 1..=8).
#[inline]
pub(crate) const fn leading_mask(used: usize) -> u8 {
    if used >= BYTE { 0xFF } else { !(0xFFu8 >> used) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Bit range outside the used length of the buffer.
    OutOfRange { start: usize, end: usize, len: usize },

    /// Hexadecimal input could not be parsed.
    InvalidHex(String),
}

impl fmt::Display for BinaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryError::*;
        match self {
            OutOfRange { start, end, len } =>
                write!(f, "bit range [{}, {}) out of bounds for buffer of {} bits", start, end, len),
            InvalidHex(msg) =>
                write!(f, "invalid hexadecimal input: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

impl From<hex::FromHexError> for BinaryError {
    fn from(e: hex::FromHexError) -> Self {
        BinaryError::InvalidHex(e.to_string())
    }
}
