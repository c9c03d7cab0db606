//! message/types.rs
//! Human-format object, cipher input and message errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::FieldError;
use crate::message::fields::FieldMap;

/// Metadata attached next to a message; never part of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_init_vector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator_address: Option<String>,
}

/// Human-readable message: named header and body fields with string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfObject {
    #[serde(rename = "MetaHeader", default, skip_serializing_if = "Option::is_none")]
    pub meta_header: Option<MetaHeader>,
    #[serde(rename = "MessageHeader")]
    pub message_header: FieldMap,
    #[serde(rename = "MessageBody", default)]
    pub message_body: FieldMap,
}

impl WfObject {
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Key material for encrypting or decrypting a message body.
///
/// `ikm` is zeroised once the body key has been derived from it.
pub struct CipherInput<'a> {
    pub ikm: &'a mut [u8],
    /// Binary originator address, bound into the derived key.
    pub address: &'a [u8],
    /// Initialisation vector; generated on encode when absent.
    pub iv: Option<Vec<u8>>,
}

impl<'a> CipherInput<'a> {
    pub fn new(ikm: &'a mut [u8], address: &'a [u8]) -> Self {
        Self { ikm, address, iv: None }
    }

    pub fn with_iv(mut self, iv: Vec<u8>) -> Self {
        self.iv = Some(iv);
        self
    }
}

impl fmt::Debug for CipherInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherInput")
            .field("ikm", &"<redacted>")
            .field("address", &hex::encode(self.address))
            .field("iv", &self.iv.as_ref().map(hex::encode))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Binary requested from a draft that was never encoded.
    NotEncoded,

    /// Implicit encoding cannot supply key material.
    ImplicitEncodeEncrypted,

    /// Field name not part of the message layout.
    UnknownField { name: String },

    /// Binary ends before a field is complete.
    Truncated { field: String, needed: usize, available: usize },

    /// A named field failed to encode, decode or validate.
    Field { name: String, source: FieldError },

    /// Human-format object could not be read.
    InvalidObject(String),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MessageError::*;
        match self {
            NotEncoded =>
                write!(f, "message has not been encoded"),
            ImplicitEncodeEncrypted =>
                write!(f, "encrypted messages must be encoded explicitly with key material"),
            UnknownField { name } =>
                write!(f, "unknown field: {}", name),
            Truncated { field, needed, available } =>
                write!(f, "binary too short for {}: need {} bits, {} available", field, needed, available),
            Field { name, source } =>
                write!(f, "{}: {}", name, source),
            InvalidObject(msg) =>
                write!(f, "invalid message object: {}", msg),
        }
    }
}

impl std::error::Error for MessageError {}

impl From<serde_json::Error> for MessageError {
    fn from(e: serde_json::Error) -> Self {
        MessageError::InvalidObject(e.to_string())
    }
}

/// Attach a field name to a field error.
pub(crate) fn field_error(name: &str, source: FieldError) -> MessageError {
    MessageError::Field { name: name.to_string(), source }
}
