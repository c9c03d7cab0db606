//! fields/encode.rs
//! Field value encoding.
//!
//! Design notes:
//! - Every value is validated against its type pattern before packing.
//! - BIN packs one bit per character, MSB first.
//! - DEC/HEX and the decimal-derived types pack one nibble per character.
//! - UTF8 packs one byte per character (U+0000..=U+00FF only).
//! - LAT/LONG carry a leading sign bit (1 = '+', 0 = '-') before the digits.

use crate::binary::BitBuffer;
use crate::fields::table::FieldCodec;
use crate::fields::types::{FieldError, FieldType};

/// Punctuation removed from datetime values before packing.
const DATETIME_PUNCTUATION: &[char] = &['-', ':', 'T', 'Z'];
/// Designators removed from duration values before packing.
const DURATION_DESIGNATORS: &[char] = &['P', 'D', 'H', 'M'];

impl FieldCodec {
    /// Encode a human-readable field value into its bit representation.
    ///
    /// # Errors
    /// - `PatternMismatch` when `value` fails the type pattern.
    /// - `LengthMismatch` when a fixed-length type encodes to the wrong size.
    pub fn encode(&self, value: &str, field_type: FieldType) -> Result<BitBuffer, FieldError> {
        self.check_value(value, field_type)?;

        let buf = match field_type {
            FieldType::Bin => encode_bin(value),
            FieldType::Dec | FieldType::Hex => encode_nibbles(value, field_type)?,
            FieldType::Utf8 => encode_utf8(value)?,
            FieldType::Datetime => encode_nibbles(&strip(value, DATETIME_PUNCTUATION), field_type)?,
            FieldType::Duration => encode_nibbles(&strip(value, DURATION_DESIGNATORS), field_type)?,
            FieldType::Lat | FieldType::Long => encode_signed(value, field_type)?,
        };

        self.spec(field_type).check_len(buf.len())?;
        Ok(buf)
    }
}

fn strip(value: &str, chars: &[char]) -> String {
    value.chars().filter(|c| !chars.contains(c)).collect()
}

fn encode_bin(value: &str) -> BitBuffer {
    let mut bytes = vec![0u8; value.len().div_ceil(8)];
    for (i, c) in value.bytes().enumerate() {
        if c == b'1' {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }
    BitBuffer::from_bytes(&bytes, value.len() as isize)
}

/// Pack hexadecimal digits, high nibble first.
fn encode_nibbles(digits: &str, field_type: FieldType) -> Result<BitBuffer, FieldError> {
    let mut bytes = vec![0u8; digits.len().div_ceil(2)];
    for (i, c) in digits.chars().enumerate() {
        let nibble = c.to_digit(16).ok_or_else(|| FieldError::InvalidEncoding {
            field_type,
            reason: format!("{:?} is not a digit", c),
        })? as u8;
        bytes[i / 2] |= if i % 2 == 0 { nibble << 4 } else { nibble };
    }
    Ok(BitBuffer::from_bytes(&bytes, (digits.len() * 4) as isize))
}

fn encode_utf8(value: &str) -> Result<BitBuffer, FieldError> {
    let bytes = value
        .chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| FieldError::InvalidEncoding {
                field_type: FieldType::Utf8,
                reason: format!("{:?} is outside the single-byte range", c),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(BitBuffer::from_bytes(&bytes, 0))
}

fn encode_signed(value: &str, field_type: FieldType) -> Result<BitBuffer, FieldError> {
    let sign_bit: u8 = if value.starts_with('+') { 0x80 } else { 0x00 };
    let digits = strip(value, &['+', '-', '.']);

    let mut buf = encode_nibbles(&digits, field_type)?;
    buf.insert_bytes(&[sign_bit], 1);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_is_msb_first() {
        let buf = encode_bin("101");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes(), &[0b1010_0000]);
    }

    #[test]
    fn odd_digit_count_packs_high_nibble() {
        let buf = encode_nibbles("123", FieldType::Dec).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(buf.as_bytes(), &[0x12, 0x30]);
    }

    #[test]
    fn strip_removes_datetime_punctuation() {
        assert_eq!(strip("2020-01-02T03:04:05Z", DATETIME_PUNCTUATION), "20200102030405");
    }
}
