//! message/draft.rs
//! Mutable message under construction.
//!
//! Notes:
//! - Values are stored as given; validation and encoding are explicit
//!   steps on `WfCodec`.
//! - The body layout follows the content: setting `MessageCode` or the
//!   `PseudoMessageCode` of a test message switches the body, and setting
//!   a repeated field (e.g. `ObjectType2Quant`) grows the repeated groups.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::constants::PROTOCOL_PREFIX;
use crate::crypto::EncryptionMethod;
use crate::message::codec::WfCodec;
use crate::message::fields::{FieldSet, MessageFields};
use crate::message::finalized::FinalMessage;
use crate::message::types::MessageError;
use crate::schema::{names, MessageSchema, MessageType};
use crate::types::WfError;

#[derive(Debug, Clone)]
pub struct DraftMessage {
    schema: Arc<MessageSchema>,
    message_type: MessageType,
    repeats: usize,
    header: FieldSet,
    body: FieldSet,
}

impl DraftMessage {
    /// Empty message of `message_type`; only the type code is filled in.
    pub(crate) fn empty(schema: Arc<MessageSchema>, message_type: MessageType) -> Result<Self, WfError> {
        let mut header = FieldSet::from_layout(schema.header_layout());
        header.set(names::MESSAGE_CODE, &message_type.code_str());
        let body = FieldSet::from_layout(schema.body_layout(message_type, None, 0)?);
        Ok(Self { schema, message_type, repeats: 0, header, body })
    }

    /// Message with prefix, version and type code filled in.
    pub(crate) fn new(schema: Arc<MessageSchema>, message_type: MessageType) -> Result<Self, WfError> {
        let version = schema.version();
        let mut draft = Self::empty(schema, message_type)?;
        draft.header.set(names::PREFIX, PROTOCOL_PREFIX);
        draft.header.set(names::VERSION, version.as_str());
        Ok(draft)
    }

    /// Set a header or body field. Values are not validated here.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), WfError> {
        if self.header.set(name, value) {
            if name == names::MESSAGE_CODE {
                if let Ok(message_type) = MessageType::from_code(value) {
                    if message_type != self.message_type {
                        self.message_type = message_type;
                        self.relayout()?;
                    }
                }
            }
            return Ok(());
        }

        if self.body.set(name, value) {
            if name == names::PSEUDO_MESSAGE_CODE {
                self.relayout()?;
            }
            return Ok(());
        }

        let group_type = self.pseudo_type().unwrap_or(self.message_type);
        if let Some((index, _)) = self.schema.match_repeated(group_type, name) {
            if index > self.repeats {
                self.repeats = index;
                self.relayout()?;
            }
            self.body.set(name, value);
            return Ok(());
        }

        Err(MessageError::UnknownField { name: name.to_string() }.into())
    }

    /// Encryption method named by the header, if it is a valid indicator.
    pub fn encryption_method(&self) -> Option<EncryptionMethod> {
        let indicator = self.header.get(names::ENCRYPTION_INDICATOR)?;
        EncryptionMethod::from_indicator(indicator).ok()
    }

    /// Number of repeated field groups in the body.
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Hex of the encoded message.
    ///
    /// Drafts carry no binary: with `implicit_encode` enabled on `codec` an
    /// unencrypted draft is encoded on the fly, otherwise this is a usage
    /// error.
    pub fn to_hex(&self, codec: &WfCodec) -> Result<String, WfError> {
        self.encode_implicit(codec).map(|m| m.to_hex())
    }

    /// Bytes of the encoded message; see [`DraftMessage::to_hex`].
    pub fn to_bytes(&self, codec: &WfCodec) -> Result<Vec<u8>, WfError> {
        self.encode_implicit(codec).map(|m| m.to_bytes())
    }

    fn encode_implicit(&self, codec: &WfCodec) -> Result<FinalMessage, WfError> {
        if !codec.config().implicit_encode {
            return Err(MessageError::NotEncoded.into());
        }
        if self.encryption_method().is_some_and(|m| m.is_encrypted()) {
            return Err(MessageError::ImplicitEncodeEncrypted.into());
        }
        debug!(message_type = %self.message_type, "implicit encode");
        codec.encode(self, None)
    }

    /// Pseudo message type of a test message, once a valid code is set.
    pub(crate) fn pseudo_type(&self) -> Option<MessageType> {
        if !self.schema.definition(self.message_type).ok()?.pseudo {
            return None;
        }
        let code = self.body.get(names::PSEUDO_MESSAGE_CODE)?;
        MessageType::from_code(code).ok().filter(|t| *t != self.message_type)
    }

    fn relayout(&mut self) -> Result<(), WfError> {
        let pseudo = self.pseudo_type();
        let layout = self.schema.body_layout(self.message_type, pseudo, self.repeats)?;
        self.body = self.body.relayout(layout);
        Ok(())
    }
}

impl MessageFields for DraftMessage {
    fn message_type(&self) -> MessageType {
        self.message_type
    }

    fn header(&self) -> &FieldSet {
        &self.header
    }

    fn body(&self) -> &FieldSet {
        &self.body
    }
}

impl fmt::Display for DraftMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.concat_values())
    }
}
