//! binary/buffer.rs
//! Variable bit-length buffer used to assemble and dissect Whiteflag messages.
//!
//! Design notes:
//! - Backing bytes always hold exactly `ceil(bit_len / 8)` bytes.
//! - Bits past `bit_len` in the last byte are always zero ("cropped").
//! - Concatenation is bit-exact: the head of the appended buffer fills the
//!   unused tail of the last partial byte.
//! - Bit 0 is the most significant bit of byte 0.

use std::fmt;

use crate::binary::types::{bytes_for_bits, leading_mask, BinaryError, BYTE};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

/// Resolve a requested bit count against the bits available.
/// - `0` selects all available bits.
/// - positive values are clamped to the available bits.
/// - negative values select all bits minus `|n_bits|`, clamped at zero.
#[inline]
fn resolve_bit_len(available: usize, n_bits: isize) -> usize {
    match n_bits {
        0 => available,
        n if n > 0 => available.min(n as usize),
        n => available.saturating_sub(n.unsigned_abs()),
    }
}

/// Copy the first `bit_len` bits of `bytes` into a cropped vector.
fn crop(bytes: &[u8], bit_len: usize) -> Vec<u8> {
    let n_bytes = bytes_for_bits(bit_len);
    let mut out = bytes[..n_bytes].to_vec();
    let tail = bit_len % BYTE;
    if tail != 0 {
        if let Some(last) = out.last_mut() {
            *last &= leading_mask(tail);
        }
    }
    out
}

/// Concatenate two cropped bit strings.
///
/// The second string is right-shifted by `len1 % 8` and OR-merged into the
/// partial last byte of the first; the result never exceeds
/// `ceil((len1 + len2) / 8)` bytes.
fn concat_bits(first: &[u8], len1: usize, second: &[u8], len2: usize) -> Vec<u8> {
    let total = len1 + len2;
    let n_bytes = bytes_for_bits(total);
    let shift = len1 % BYTE;

    let mut out = Vec::with_capacity(n_bytes + 1);
    out.extend_from_slice(&first[..bytes_for_bits(len1)]);

    let second = &second[..bytes_for_bits(len2)];
    if shift == 0 {
        out.extend_from_slice(second);
    } else {
        for &b in second {
            if let Some(last) = out.last_mut() {
                *last |= b >> shift;
            }
            out.push(b << (BYTE - shift));
        }
    }

    out.truncate(n_bytes);
    crop(&out, total)
}

impl BitBuffer {
    /// An empty buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a buffer from raw bytes.
    /// `n_bits`: 0 = all bits, positive = exact count (clamped),
    /// negative = all bits minus `|n_bits|` (clamped at 0).
    pub fn from_bytes(bytes: &[u8], n_bits: isize) -> Self {
        let bit_len = resolve_bit_len(bytes.len() * BYTE, n_bits);
        Self { bytes: crop(bytes, bit_len), bit_len }
    }

    /// Build a buffer from a hexadecimal string (either case).
    /// Bit count semantics match [`BitBuffer::from_bytes`].
    pub fn from_hex(hex_str: &str, n_bits: isize) -> Result<Self, BinaryError> {
        let bytes = hex::decode(hex_str)?;
        Ok(Self::from_bytes(&bytes, n_bits))
    }

    /// A buffer of `n_bits` zero bits.
    pub fn zeros(n_bits: usize) -> Self {
        Self { bytes: vec![0u8; bytes_for_bits(n_bits)], bit_len: n_bits }
    }

    /// Used bit length.
    #[inline]
    pub fn len(&self) -> usize {
        self.bit_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Value of bit `index` (MSB-first), `None` past the used length.
    pub fn bit(&self, index: usize) -> Option<u8> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[index / BYTE];
        Some((byte >> (BYTE - 1 - index % BYTE)) & 1)
    }

    /// Append `other`'s used bits after this buffer's used bits.
    pub fn append(&mut self, other: &BitBuffer) -> &mut Self {
        self.bytes = concat_bits(&self.bytes, self.bit_len, &other.bytes, other.bit_len);
        self.bit_len += other.bit_len;
        self
    }

    /// Append the first `n_bits` of `bytes` (same count semantics as `from_bytes`).
    pub fn append_bytes(&mut self, bytes: &[u8], n_bits: isize) -> &mut Self {
        self.append(&BitBuffer::from_bytes(bytes, n_bits))
    }

    /// Place `other`'s used bits in front of this buffer's content.
    pub fn insert(&mut self, other: &BitBuffer) -> &mut Self {
        self.bytes = concat_bits(&other.bytes, other.bit_len, &self.bytes, self.bit_len);
        self.bit_len += other.bit_len;
        self
    }

    /// Insert the first `n_bits` of `bytes` in front of the content.
    pub fn insert_bytes(&mut self, bytes: &[u8], n_bits: isize) -> &mut Self {
        self.insert(&BitBuffer::from_bytes(bytes, n_bits))
    }

    /// Copy out bits `[start, min(end, len))` as a new buffer.
    ///
    /// Errors with `OutOfRange` when `start >= len` or `start > end`.
    pub fn extract(&self, start: usize, end: usize) -> Result<BitBuffer, BinaryError> {
        if start >= self.bit_len || start > end {
            return Err(BinaryError::OutOfRange { start, end, len: self.bit_len });
        }
        Ok(self.copy_bits(start, end.min(self.bit_len)))
    }

    /// Copy out bits `[start, end)`; callers keep `start <= end <= len`.
    fn copy_bits(&self, start: usize, end: usize) -> BitBuffer {
        let n_bits = end - start;

        let first = start / BYTE;
        let shift = start % BYTE;
        let n_bytes = bytes_for_bits(n_bits);

        let mut out = Vec::with_capacity(n_bytes);
        for i in 0..n_bytes {
            let hi = self.bytes.get(first + i).copied().unwrap_or(0) << shift;
            let lo = if shift == 0 {
                0
            } else {
                self.bytes.get(first + i + 1).copied().unwrap_or(0) >> (BYTE - shift)
            };
            out.push(hi | lo);
        }

        Self { bytes: crop(&out, n_bits), bit_len: n_bits }
    }

    /// Copy out bits from `start` to the end of the buffer.
    pub fn extract_from(&self, start: usize) -> Result<BitBuffer, BinaryError> {
        self.extract(start, self.bit_len)
    }

    /// Drop the leading `n` bits; the buffer shrinks by `n`.
    /// Negative `n` shifts right instead.
    pub fn shift_left(&mut self, n: isize) -> &mut Self {
        if n < 0 {
            return self.shift_right(-n);
        }
        let n = n as usize;
        if n == 0 {
            return self;
        }
        if n >= self.bit_len {
            *self = Self::empty();
            return self;
        }
        *self = self.copy_bits(n, self.bit_len);
        self
    }

    /// Prepend `n` zero bits; the buffer grows by `n`.
    /// Negative `n` shifts left instead.
    pub fn shift_right(&mut self, n: isize) -> &mut Self {
        if n < 0 {
            return self.shift_left(-n);
        }
        self.insert(&Self::zeros(n as usize))
    }

    /// Cropped content as owned bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Cropped content as a borrowed slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lower-case hexadecimal form of the cropped content.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuffer")
            .field("bits", &self.bit_len)
            .field("hex", &self.to_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bit_len_rules() {
        assert_eq!(resolve_bit_len(16, 0), 16);
        assert_eq!(resolve_bit_len(16, 5), 5);
        assert_eq!(resolve_bit_len(16, 40), 16);
        assert_eq!(resolve_bit_len(16, -3), 13);
        assert_eq!(resolve_bit_len(16, -40), 0);
    }

    #[test]
    fn concat_merges_partial_byte() {
        // 101 + 11 = 10111
        let out = concat_bits(&[0b1010_0000], 3, &[0b1100_0000], 2);
        assert_eq!(out, vec![0b1011_1000]);
    }

    #[test]
    fn concat_never_over_allocates() {
        let out = concat_bits(&[0xFF], 7, &[0xFF], 1);
        assert_eq!(out, vec![0xFF]);
    }
}
