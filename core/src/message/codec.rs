//! message/codec.rs
//! Message encoder/decoder bound to one protocol version.
//!
//! Design notes:
//! - Wire layout: header fields, then body fields, each packed by the field
//!   codec with no padding in between.
//! - Only the body is encrypted; the header stays readable so a receiver
//!   learns type and encryption method before decrypting.
//! - A variable-length field is always last in its body and takes the
//!   remaining bits, rounded down to whole characters (drops byte padding).
//!   HEX data in that position is held to whole bytes by its field pattern.
//! - Decoding is all-or-nothing: any failing field fails the call.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::binary::BitBuffer;
use crate::config::{CodecConfig, ProtocolVersion};
use crate::crypto::{CryptoError, EncryptionMethod, WfCipher};
use crate::fields::{FieldCodec, FieldError};
use crate::message::draft::DraftMessage;
use crate::message::fields::{FieldSet, MessageField, MessageFields};
use crate::message::finalized::FinalMessage;
use crate::message::types::{field_error, CipherInput, MessageError, WfObject};
use crate::schema::{names, LayoutField, MessageSchema, MessageType, SchemaError};
use crate::types::WfError;

/// Compiled field and message tables plus codec options.
#[derive(Debug, Clone)]
pub struct WfCodec {
    config: CodecConfig,
    fields: FieldCodec,
    schema: Arc<MessageSchema>,
}

impl WfCodec {
    pub fn new(config: CodecConfig) -> Result<Self, WfError> {
        let fields = FieldCodec::new(config.version)?;
        let schema = Arc::new(MessageSchema::new(config.version)?);
        Ok(Self { config, fields, schema })
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.config.version
    }

    #[inline]
    pub fn field_codec(&self) -> &FieldCodec {
        &self.fields
    }

    #[inline]
    pub fn schema(&self) -> &MessageSchema {
        &self.schema
    }

    // -------------------------------------------------------------------------
    // Drafts
    // -------------------------------------------------------------------------

    /// Draft of `message_type` with prefix, version and type code set.
    pub fn new_message(&self, message_type: MessageType) -> Result<DraftMessage, WfError> {
        DraftMessage::new(Arc::clone(&self.schema), message_type)
    }

    /// Draft populated from the human format. Missing fields stay empty,
    /// unknown field names are rejected.
    pub fn from_object(&self, object: &WfObject) -> Result<DraftMessage, WfError> {
        let code = object.message_header.get(names::MESSAGE_CODE).unwrap_or_default();
        let message_type = MessageType::from_code(code)?;
        let mut draft = DraftMessage::empty(Arc::clone(&self.schema), message_type)?;

        for (name, value) in object.message_header.iter() {
            draft.set(name, value)?;
        }
        // The pseudo code decides which fields follow it.
        if let Some(code) = object.message_body.get(names::PSEUDO_MESSAGE_CODE) {
            draft.set(names::PSEUDO_MESSAGE_CODE, code)?;
        }
        for (name, value) in object.message_body.iter() {
            draft.set(name, value)?;
        }
        Ok(draft)
    }

    pub fn from_json(&self, json: &str) -> Result<DraftMessage, WfError> {
        let object = WfObject::from_json(json)?;
        self.from_object(&object)
    }

    // -------------------------------------------------------------------------
    // Encode
    // -------------------------------------------------------------------------

    /// Encode a draft into a final message.
    ///
    /// Encrypted messages need `cipher`; its `ikm` is zeroised and an IV is
    /// generated when none is given.
    pub fn encode(&self, draft: &DraftMessage, cipher: Option<CipherInput<'_>>) -> Result<FinalMessage, WfError> {
        let mut binary = BitBuffer::empty();
        for field in draft.header().iter() {
            binary.append(&self.encode_field(field)?);
        }

        let mut body = BitBuffer::empty();
        for field in draft.body().iter() {
            body.append(&self.encode_field(field)?);
        }

        let method = EncryptionMethod::from_indicator(
            draft.header().get(names::ENCRYPTION_INDICATOR).unwrap_or_default(),
        )?;

        let originator = cipher.as_ref().map(|c| c.address.to_vec());
        let iv = match (method.is_encrypted(), cipher) {
            (false, _) => None,
            (true, None) => return Err(CryptoError::MissingKeyMaterial.into()),
            (true, Some(CipherInput { ikm, address, iv })) => {
                let wf_cipher = WfCipher::from_secret(method, ikm, address, self.version())?;
                let iv = iv.unwrap_or_else(|| wf_cipher.generate_iv());
                let ciphertext = wf_cipher.encrypt(&iv, body.as_bytes())?;
                body = BitBuffer::from_bytes(&ciphertext, body.len() as isize);
                Some(iv)
            }
        };

        let header_bits = binary.len();
        binary.append(&body);
        debug!(
            message_type = %draft.message_type(),
            method = ?method,
            header_bits,
            body_bits = body.len(),
            "encoded message"
        );

        Ok(FinalMessage {
            version: self.version(),
            message_type: draft.message_type(),
            method,
            header: draft.header().clone(),
            body: draft.body().clone(),
            binary,
            iv,
            originator,
        })
    }

    /// Encode one field and enforce its pattern and length constraints.
    fn check_field(&self, field: &MessageField) -> Result<BitBuffer, FieldError> {
        let def = field.def;
        let bits = self.fields.encode(&field.value, def.field_type)?;

        if let Some(pattern) = self.schema.field_pattern(def) {
            if !pattern.is_match(&field.value) {
                return Err(FieldError::PatternMismatch {
                    field_type: def.field_type,
                    value: field.value.clone(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        if def.bit_len != 0 && bits.len() != def.bit_len {
            return Err(FieldError::LengthMismatch {
                field_type: def.field_type,
                expected: def.bit_len,
                actual: bits.len(),
            });
        }
        Ok(bits)
    }

    fn encode_field(&self, field: &MessageField) -> Result<BitBuffer, WfError> {
        self.check_field(field).map_err(|e| field_error(&field.name, e).into())
    }

    // -------------------------------------------------------------------------
    // Decode
    // -------------------------------------------------------------------------

    /// Decode a binary message. Encrypted bodies need `cipher` with an IV.
    pub fn decode(&self, binary: &BitBuffer, cipher: Option<CipherInput<'_>>) -> Result<FinalMessage, WfError> {
        self.decode_inner(binary, cipher).inspect_err(|e| {
            warn!(error = %e, kind = %e.kind(), bits = binary.len(), "message decode failed");
        })
    }

    pub fn decode_hex(&self, hex_str: &str, cipher: Option<CipherInput<'_>>) -> Result<FinalMessage, WfError> {
        let binary = BitBuffer::from_hex(hex_str, 0)?;
        self.decode(&binary, cipher)
    }

    pub fn decode_bytes(&self, bytes: &[u8], cipher: Option<CipherInput<'_>>) -> Result<FinalMessage, WfError> {
        self.decode(&BitBuffer::from_bytes(bytes, 0), cipher)
    }

    fn decode_inner(&self, binary: &BitBuffer, cipher: Option<CipherInput<'_>>) -> Result<FinalMessage, WfError> {
        let mut cursor = 0;
        let mut header = FieldSet::default();
        for lf in self.schema.header_layout() {
            let value = self.read_field(binary, &mut cursor, &lf)?;
            if let Some(pattern) = self.schema.field_pattern(lf.def) {
                if !pattern.is_match(&value) {
                    let source = FieldError::PatternMismatch {
                        field_type: lf.def.field_type,
                        value,
                        pattern: pattern.as_str().to_string(),
                    };
                    return Err(field_error(&lf.name, source).into());
                }
            }
            header.push(&lf, value);
        }

        let message_type = MessageType::from_code(header.get(names::MESSAGE_CODE).unwrap_or_default())?;
        let method = EncryptionMethod::from_indicator(header.get(names::ENCRYPTION_INDICATOR).unwrap_or_default())?;

        let mut body_bits = if cursor < binary.len() { binary.extract_from(cursor)? } else { BitBuffer::empty() };

        let originator = cipher.as_ref().map(|c| c.address.to_vec());
        let iv = match (method.is_encrypted(), cipher) {
            (false, _) => None,
            (true, None) => return Err(CryptoError::MissingKeyMaterial.into()),
            (true, Some(CipherInput { ikm, address, iv })) => {
                let wf_cipher = WfCipher::from_secret(method, ikm, address, self.version())?;
                let iv = iv.ok_or(CryptoError::MissingIv)?;
                let plaintext = wf_cipher.decrypt(&iv, body_bits.as_bytes())?;
                body_bits = BitBuffer::from_bytes(&plaintext, body_bits.len() as isize);
                Some(iv)
            }
        };

        let body = self.decode_body(&body_bits, message_type)?;
        debug!(message_type = %message_type, method = ?method, bits = binary.len(), "decoded message");

        Ok(FinalMessage {
            version: self.version(),
            message_type,
            method,
            header,
            body,
            binary: binary.clone(),
            iv,
            originator,
        })
    }

    fn decode_body(&self, bits: &BitBuffer, message_type: MessageType) -> Result<FieldSet, WfError> {
        let mut cursor = 0;
        let mut body = FieldSet::default();
        for lf in self.schema.body_layout(message_type, None, 0)? {
            let value = self.read_field(bits, &mut cursor, &lf)?;
            body.push(&lf, value);
        }

        let mut group_type = message_type;
        if self.schema.definition(message_type)?.pseudo {
            let code = body.get(names::PSEUDO_MESSAGE_CODE).unwrap_or_default().to_string();
            let pseudo = MessageType::from_code(&code)?;
            if pseudo == message_type {
                return Err(SchemaError::InvalidPseudoType(code).into());
            }
            for lf in self.schema.body_layout(pseudo, None, 0)? {
                let value = self.read_field(bits, &mut cursor, &lf)?;
                body.push(&lf, value);
            }
            group_type = pseudo;
        }

        let group = self.schema.repeat_fields(group_type)?;
        let group_bits: usize = group.iter().map(|def| def.bit_len).sum();
        if group_bits > 0 {
            let mut index = 0;
            while bits.len() - cursor >= group_bits {
                index += 1;
                for def in group {
                    let lf = LayoutField::repeated(def, index);
                    let value = self.read_field(bits, &mut cursor, &lf)?;
                    body.push(&lf, value);
                }
            }
        }
        Ok(body)
    }

    /// Decode the field at `cursor` and advance past it.
    fn read_field(&self, bits: &BitBuffer, cursor: &mut usize, lf: &LayoutField) -> Result<String, WfError> {
        let available = bits.len().saturating_sub(*cursor);
        let needed = match lf.def.bit_len {
            0 => {
                let unit = self.fields.spec(lf.def.field_type).unit_bits;
                available / unit * unit
            }
            fixed => fixed,
        };
        if needed > available {
            return Err(MessageError::Truncated { field: lf.name.clone(), needed, available }.into());
        }
        if needed == 0 {
            return Ok(String::new());
        }

        let field_bits = bits.extract(*cursor, *cursor + needed)?;
        *cursor += needed;
        self.fields
            .decode(&field_bits, lf.def.field_type)
            .map_err(|e| field_error(&lf.name, e).into())
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// One human-readable entry per invalid field; empty when valid.
    pub fn validate<M: MessageFields + ?Sized>(&self, message: &M) -> Vec<String> {
        message
            .fields()
            .filter_map(|field| self.check_field(field).err().map(|e| format!("{}: {}", field.name, e)))
            .collect()
    }

    pub fn is_valid<M: MessageFields + ?Sized>(&self, message: &M) -> bool {
        message.fields().all(|field| self.check_field(field).is_ok())
    }
}
