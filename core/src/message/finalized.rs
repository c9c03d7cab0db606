//! message/finalized.rs
//! Encoded or decoded message with its binary fixed.

use std::fmt;

use crate::binary::BitBuffer;
use crate::config::ProtocolVersion;
use crate::crypto::EncryptionMethod;
use crate::message::fields::{FieldSet, MessageFields};
use crate::message::types::MetaHeader;
use crate::schema::MessageType;

/// A message whose fields can no longer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalMessage {
    pub(crate) version: ProtocolVersion,
    pub(crate) message_type: MessageType,
    pub(crate) method: EncryptionMethod,
    pub(crate) header: FieldSet,
    pub(crate) body: FieldSet,
    pub(crate) binary: BitBuffer,
    pub(crate) iv: Option<Vec<u8>>,
    pub(crate) originator: Option<Vec<u8>>,
}

impl FinalMessage {
    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    #[inline]
    pub fn encryption_method(&self) -> EncryptionMethod {
        self.method
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.method.is_encrypted()
    }

    /// Initialisation vector used for the body, if encrypted.
    pub fn iv(&self) -> Option<&[u8]> {
        self.iv.as_deref()
    }

    /// Binary originator address given with the key material, if any.
    pub fn originator_address(&self) -> Option<&[u8]> {
        self.originator.as_deref()
    }

    #[inline]
    pub fn binary(&self) -> &BitBuffer {
        &self.binary
    }

    /// Encoding a final message again returns the cached binary unchanged.
    pub fn encode(&self) -> &BitBuffer {
        &self.binary
    }

    pub fn to_hex(&self) -> String {
        self.binary.to_hex()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.binary.to_bytes()
    }
}

impl MessageFields for FinalMessage {
    fn message_type(&self) -> MessageType {
        self.message_type
    }

    fn header(&self) -> &FieldSet {
        &self.header
    }

    fn body(&self) -> &FieldSet {
        &self.body
    }

    fn meta_header(&self) -> Option<MetaHeader> {
        Some(MetaHeader {
            encoded_message: Some(self.to_hex()),
            encryption_init_vector: self.iv.as_ref().map(hex::encode),
            originator_address: self.originator.as_ref().map(hex::encode),
        })
    }
}

impl fmt::Display for FinalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.concat_values())
    }
}
