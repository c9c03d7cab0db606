//! fields/types.rs
//! Field encoding types and the field codec error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::binary::BinaryError;

/// The eight Whiteflag value encodings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Bin,
    Dec,
    Hex,
    Utf8,
    Datetime,
    Duration,
    Lat,
    Long,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Bin,
        FieldType::Dec,
        FieldType::Hex,
        FieldType::Utf8,
        FieldType::Datetime,
        FieldType::Duration,
        FieldType::Lat,
        FieldType::Long,
    ];

    /// Row of this type in the versioned field type tables.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Bin      => "BIN",
            FieldType::Dec      => "DEC",
            FieldType::Hex      => "HEX",
            FieldType::Utf8     => "UTF8",
            FieldType::Datetime => "DATETIME",
            FieldType::Duration => "DURATION",
            FieldType::Lat      => "LAT",
            FieldType::Long     => "LONG",
        }
    }

    /// Types whose characters are packed as decimal nibbles.
    #[inline]
    pub const fn is_decimal(&self) -> bool {
        matches!(
            self,
            FieldType::Dec | FieldType::Datetime | FieldType::Duration | FieldType::Lat | FieldType::Long
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldError::UnknownFieldType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Value does not match the field pattern.
    PatternMismatch { field_type: FieldType, value: String, pattern: String },

    /// Encoded bit length differs from the fixed length.
    LengthMismatch { field_type: FieldType, expected: usize, actual: usize },

    /// Binary content cannot represent a value of this type.
    InvalidEncoding { field_type: FieldType, reason: String },

    /// Field type name not in the registry.
    UnknownFieldType(String),

    /// A table pattern failed to compile.
    InvalidPattern { pattern: String, reason: String },

    /// Underlying buffer error.
    Binary(BinaryError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FieldError::*;
        match self {
            PatternMismatch { field_type, value, pattern } =>
                write!(f, "{} value {:?} does not match pattern {}", field_type, value, pattern),
            LengthMismatch { field_type, expected, actual } =>
                write!(f, "{} field length mismatch: expected {} bits, got {}", field_type, expected, actual),
            InvalidEncoding { field_type, reason } =>
                write!(f, "invalid {} encoding: {}", field_type, reason),
            UnknownFieldType(name) =>
                write!(f, "unknown field type: {}", name),
            InvalidPattern { pattern, reason } =>
                write!(f, "invalid field pattern {}: {}", pattern, reason),
            Binary(e) =>
                write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<BinaryError> for FieldError {
    fn from(e: BinaryError) -> Self {
        FieldError::Binary(e)
    }
}
