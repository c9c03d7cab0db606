//! fields/table.rs
//! Compiled field type table and the `FieldCodec` handle.
//!
//! The table is built once from `constants::field_type_params` and is
//! read-only afterwards; callers own the codec and pass it where needed.

use regex::Regex;

use crate::config::ProtocolVersion;
use crate::constants::{field_type_params, FieldTypeParams};
use crate::fields::types::{FieldError, FieldType};

/// Compiled parameters of one field type.
#[derive(Debug, Clone)]
pub struct FieldTypeSpec {
    pub field_type: FieldType,
    /// Fixed bit length, 0 for variable length.
    pub bit_len: usize,
    /// Bits per value character.
    pub unit_bits: usize,
    pub pattern: Regex,
}

impl FieldTypeSpec {
    fn compile(field_type: FieldType, params: &FieldTypeParams) -> Result<Self, FieldError> {
        let pattern = compile_pattern(params.pattern)?;
        Ok(Self {
            field_type,
            bit_len: params.bit_len,
            unit_bits: params.unit_bits,
            pattern,
        })
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.bit_len != 0
    }

    /// Check a fixed length against an encoded/decoded bit count.
    pub(crate) fn check_len(&self, actual: usize) -> Result<(), FieldError> {
        if self.is_fixed() && actual != self.bit_len {
            return Err(FieldError::LengthMismatch {
                field_type: self.field_type,
                expected: self.bit_len,
                actual,
            });
        }
        Ok(())
    }
}

/// Compile a table pattern, mapping failures to `FieldError::InvalidPattern`.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, FieldError> {
    Regex::new(pattern).map_err(|e| FieldError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Encoder/decoder for single field values of one protocol version.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    version: ProtocolVersion,
    specs: Vec<FieldTypeSpec>,
}

impl FieldCodec {
    /// Compile the field type table of `version`.
    pub fn new(version: ProtocolVersion) -> Result<Self, FieldError> {
        let params = field_type_params(version);
        let specs = FieldType::ALL
            .iter()
            .zip(params.iter())
            .map(|(t, p)| FieldTypeSpec::compile(*t, p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { version, specs })
    }

    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    #[inline]
    pub fn spec(&self, field_type: FieldType) -> &FieldTypeSpec {
        &self.specs[field_type.index()]
    }

    /// True when `value` matches the pattern of `field_type`.
    pub fn is_valid_value(&self, value: &str, field_type: FieldType) -> bool {
        self.spec(field_type).pattern.is_match(value)
    }

    /// Fail with `PatternMismatch` unless `value` is valid for `field_type`.
    pub(crate) fn check_value(&self, value: &str, field_type: FieldType) -> Result<(), FieldError> {
        let spec = self.spec(field_type);
        if !spec.pattern.is_match(value) {
            return Err(FieldError::PatternMismatch {
                field_type,
                value: value.to_string(),
                pattern: spec.pattern.as_str().to_string(),
            });
        }
        Ok(())
    }
}
