//! fields/decode.rs
//! Field value decoding.
//!
//! Design notes:
//! - Inverse of `encode.rs`; hex-family output is lower-case.
//! - Fixed-length types reject buffers of any other length.
//! - Datetime and duration separators are re-inserted at fixed offsets.

use crate::binary::BitBuffer;
use crate::fields::table::FieldCodec;
use crate::fields::types::{FieldError, FieldType};

/// (prefix, digit count) groups, then the closing suffix.
const DATETIME_LAYOUT: (&[(&str, usize)], &str) =
    (&[("", 4), ("-", 2), ("-", 2), ("T", 2), (":", 2), (":", 2)], "Z");
const DURATION_LAYOUT: (&[(&str, usize)], &str) =
    (&[("P", 2), ("D", 2), ("H", 2)], "M");

impl FieldCodec {
    /// Decode the bit representation of a field into its human-readable value.
    ///
    /// # Errors
    /// - `LengthMismatch` for fixed-length types of the wrong size.
    /// - `InvalidEncoding` when the bits cannot form a value of the type
    ///   (partial units, non-decimal nibbles, missing sign bit).
    pub fn decode(&self, buf: &BitBuffer, field_type: FieldType) -> Result<String, FieldError> {
        self.spec(field_type).check_len(buf.len())?;

        match field_type {
            FieldType::Bin => Ok(decode_bin(buf)),
            FieldType::Dec | FieldType::Hex => decode_nibbles(buf, field_type),
            FieldType::Utf8 => decode_utf8(buf),
            FieldType::Datetime => reinsert(&decode_nibbles(buf, field_type)?, DATETIME_LAYOUT, field_type),
            FieldType::Duration => reinsert(&decode_nibbles(buf, field_type)?, DURATION_LAYOUT, field_type),
            FieldType::Lat | FieldType::Long => decode_signed(buf, field_type),
        }
    }
}

fn invalid(field_type: FieldType, reason: impl Into<String>) -> FieldError {
    FieldError::InvalidEncoding { field_type, reason: reason.into() }
}

fn decode_bin(buf: &BitBuffer) -> String {
    (0..buf.len())
        .map(|i| if buf.bit(i) == Some(1) { '1' } else { '0' })
        .collect()
}

fn decode_nibbles(buf: &BitBuffer, field_type: FieldType) -> Result<String, FieldError> {
    if buf.len() % 4 != 0 {
        return Err(invalid(field_type, format!("{} bits is not a whole number of nibbles", buf.len())));
    }
    let n_digits = buf.len() / 4;
    let mut digits = hex::encode(buf.as_bytes());
    digits.truncate(n_digits);

    if field_type.is_decimal() {
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(invalid(field_type, format!("nibble {:?} is not a decimal digit", c)));
        }
    }
    Ok(digits)
}

fn decode_utf8(buf: &BitBuffer) -> Result<String, FieldError> {
    if buf.len() % 8 != 0 {
        return Err(invalid(FieldType::Utf8, format!("{} bits is not a whole number of bytes", buf.len())));
    }
    Ok(buf.as_bytes().iter().map(|&b| char::from(b)).collect())
}

fn reinsert(
    digits: &str,
    (groups, suffix): (&[(&str, usize)], &str),
    field_type: FieldType,
) -> Result<String, FieldError> {
    let expected: usize = groups.iter().map(|(_, n)| n).sum();
    if digits.len() != expected {
        return Err(invalid(field_type, format!("expected {} digits, got {}", expected, digits.len())));
    }

    let mut out = String::with_capacity(expected + groups.len() + suffix.len());
    let mut pos = 0;
    for (prefix, n) in groups {
        out.push_str(prefix);
        out.push_str(&digits[pos..pos + n]);
        pos += n;
    }
    out.push_str(suffix);
    Ok(out)
}

fn decode_signed(buf: &BitBuffer, field_type: FieldType) -> Result<String, FieldError> {
    let sign = match buf.bit(0) {
        Some(1) => '+',
        Some(0) => '-',
        other => return Err(invalid(field_type, format!("invalid sign bit {:?}", other))),
    };
    if buf.len() < 5 {
        return Err(invalid(field_type, "no digits after sign bit"));
    }
    let digits = decode_nibbles(&buf.extract_from(1)?, field_type)?;

    // Point sits after 2 (LAT) or 3 (LONG) integer digits.
    let int_digits = if field_type == FieldType::Lat { 2 } else { 3 };
    if digits.len() <= int_digits {
        return Err(invalid(field_type, format!("{} digits leave no fraction", digits.len())));
    }

    let mut out = String::with_capacity(digits.len() + 2);
    out.push(sign);
    out.push_str(&digits[..int_digits]);
    out.push('.');
    out.push_str(&digits[int_digits..]);
    Ok(out)
}
