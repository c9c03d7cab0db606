//! schema/types.rs
//! Message type registry and field definitions.

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::fields::{FieldError, FieldType};
use crate::utils::enum_name_or_char;

/// Whiteflag message types, keyed by their one-letter code.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum MessageType {
    Authentication = b'A',
    Cryptographic  = b'K',
    Test           = b'T',
    Protective     = b'P',
    Emergency      = b'E',
    Danger         = b'D',
    Status         = b'S',
    Infrastructure = b'I',
    Mission        = b'M',
    Request        = b'Q',
    Resource       = b'R',
    FreeText       = b'F',
}

impl MessageType {
    /// Single-character wire code.
    #[inline]
    pub fn code(&self) -> char {
        char::from(*self as u8)
    }

    /// Code as carried in the `MessageCode` field.
    pub fn code_str(&self) -> String {
        self.code().to_string()
    }

    /// Parse a one-letter message code.
    pub fn from_code(code: &str) -> Result<Self, SchemaError> {
        match code.as_bytes() {
            [b] => MessageType::try_from(*b)
                .map_err(|_| SchemaError::UnknownMessageType(code.to_string())),
            _ => Err(SchemaError::UnknownMessageType(code.to_string())),
        }
    }

    /// Sign/signal types share one body layout.
    pub fn is_sign_signal(&self) -> bool {
        matches!(
            self,
            MessageType::Protective
                | MessageType::Emergency
                | MessageType::Danger
                | MessageType::Status
                | MessageType::Infrastructure
                | MessageType::Mission
                | MessageType::Request
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

/// Static definition of one message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name; `#` marks the index of a repeated field.
    pub name: &'static str,
    pub field_type: FieldType,
    /// Fixed bit length of the field, 0 for variable length.
    pub bit_len: usize,
    /// Field-specific pattern applied on top of the type pattern.
    pub pattern: Option<&'static str>,
}

impl FieldDef {
    /// Concrete field name for repetition `index` (1-based).
    pub fn name_for(&self, index: usize) -> String {
        self.name.replace('#', &index.to_string())
    }
}

/// How a message type finds its body fields.
#[derive(Debug, Clone, Copy)]
pub enum BodySchema {
    /// Body defined by the type itself.
    Fields(&'static [FieldDef]),
    /// Body shared by all sign/signal types.
    SignSignal,
}

/// Table row for one message type.
#[derive(Debug, Clone, Copy)]
pub struct MessageDef {
    pub message_type: MessageType,
    pub body: BodySchema,
    /// Field group that may repeat after the fixed body.
    pub repeat: &'static [FieldDef],
    /// Body continues with the body of the type named by its first field.
    pub pseudo: bool,
}

/// A field placed in a concrete message layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    pub name: String,
    pub def: &'static FieldDef,
}

impl LayoutField {
    pub fn new(def: &'static FieldDef) -> Self {
        Self { name: def.name.to_string(), def }
    }

    pub fn repeated(def: &'static FieldDef, index: usize) -> Self {
        Self { name: def.name_for(index), def }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Message code not in the registry.
    UnknownMessageType(String),

    /// Message type has no table row for this version.
    MissingDefinition { code: char },

    /// Pseudo message code is not allowed here.
    InvalidPseudoType(String),

    /// Field pattern failed to compile.
    Field(FieldError),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SchemaError::*;
        match self {
            UnknownMessageType(code) =>
                write!(f, "unknown message type: {:?}", code),
            MissingDefinition { code } =>
                write!(f, "no schema for message type {}", enum_name_or_char::<MessageType>(*code as u8)),
            InvalidPseudoType(code) =>
                write!(f, "invalid pseudo message type: {:?}", code),
            Field(e) =>
                write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<FieldError> for SchemaError {
    fn from(e: FieldError) -> Self {
        SchemaError::Field(e)
    }
}
