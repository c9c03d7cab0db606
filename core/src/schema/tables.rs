//! schema/tables.rs
//! Whiteflag v1 message structure tables.
//!
//! Header fields are common to every message type. Sign/signal types share
//! `SIGN_SIGNAL_V1` through `BodySchema::SignSignal`.

use crate::fields::FieldType;
use crate::schema::types::{BodySchema, FieldDef, MessageDef, MessageType};

/// Field names referenced by the codec logic.
pub mod names {
    pub const PREFIX: &str               = "Prefix";
    pub const VERSION: &str              = "Version";
    pub const ENCRYPTION_INDICATOR: &str = "EncryptionIndicator";
    pub const DURESS_INDICATOR: &str     = "DuressIndicator";
    pub const MESSAGE_CODE: &str         = "MessageCode";
    pub const REFERENCE_INDICATOR: &str  = "ReferenceIndicator";
    pub const REFERENCED_MESSAGE: &str   = "ReferencedMessage";
    pub const PSEUDO_MESSAGE_CODE: &str  = "PseudoMessageCode";
    pub const VERIFICATION_METHOD: &str  = "VerificationMethod";
    pub const VERIFICATION_DATA: &str    = "VerificationData";
}

const fn field(
    name: &'static str,
    field_type: FieldType,
    bit_len: usize,
    pattern: Option<&'static str>,
) -> FieldDef {
    FieldDef { name, field_type, bit_len, pattern }
}

pub static HEADER_V1: [FieldDef; 7] = [
    field(names::PREFIX,               FieldType::Utf8, 16,  Some(r"^WF$")),
    field(names::VERSION,              FieldType::Utf8, 8,   Some(r"^1$")),
    field(names::ENCRYPTION_INDICATOR, FieldType::Utf8, 8,   Some(r"^[012]$")),
    field(names::DURESS_INDICATOR,     FieldType::Bin,  1,   Some(r"^[01]$")),
    field(names::MESSAGE_CODE,         FieldType::Utf8, 8,   Some(r"^[AKTPEDSIMQRF]$")),
    field(names::REFERENCE_INDICATOR,  FieldType::Hex,  4,   Some(r"^[0-9]$")),
    field(names::REFERENCED_MESSAGE,   FieldType::Hex,  256, Some(r"^[a-fA-F0-9]{64}$")),
];

pub static AUTHENTICATION_V1: [FieldDef; 2] = [
    field(names::VERIFICATION_METHOD, FieldType::Hex,  4, Some(r"^[12]$")),
    field(names::VERIFICATION_DATA,   FieldType::Utf8, 0, None),
];

pub static CRYPTOGRAPHIC_V1: [FieldDef; 2] = [
    field("CryptoDataType", FieldType::Hex, 8, Some(r"^[a-fA-F0-9]{2}$")),
    field("CryptoData",     FieldType::Hex, 0, Some(r"^([a-fA-F0-9]{2})*$")),
];

pub static TEST_V1: [FieldDef; 1] = [
    field(names::PSEUDO_MESSAGE_CODE, FieldType::Utf8, 8, Some(r"^[AKPEDSIMQRF]$")),
];

pub static RESOURCE_V1: [FieldDef; 2] = [
    field("ResourceMethod", FieldType::Hex,  4, Some(r"^[1-9]$")),
    field("ResourceData",   FieldType::Utf8, 0, None),
];

pub static FREE_TEXT_V1: [FieldDef; 1] = [
    field("Text", FieldType::Utf8, 0, None),
];

pub static SIGN_SIGNAL_V1: [FieldDef; 9] = [
    field("SubjectCode",       FieldType::Hex,      8,  Some(r"^[a-fA-F0-9]{2}$")),
    field("DateTime",          FieldType::Datetime, 56, None),
    field("Duration",          FieldType::Duration, 24, None),
    field("ObjectType",        FieldType::Hex,      8,  Some(r"^[a-fA-F0-9]{2}$")),
    field("ObjectLatitude",    FieldType::Lat,      29, Some(r"^[+\-][0-9]{2}\.[0-9]{5}$")),
    field("ObjectLongitude",   FieldType::Long,     33, Some(r"^[+\-][0-9]{3}\.[0-9]{5}$")),
    field("ObjectSizeDim1",    FieldType::Dec,      16, Some(r"^[0-9]{4}$")),
    field("ObjectSizeDim2",    FieldType::Dec,      16, Some(r"^[0-9]{4}$")),
    field("ObjectOrientation", FieldType::Dec,      12, Some(r"^[0-9]{3}$")),
];

pub static REQUEST_OBJECTS_V1: [FieldDef; 2] = [
    field("ObjectType#",      FieldType::Hex, 8, Some(r"^[a-fA-F0-9]{2}$")),
    field("ObjectType#Quant", FieldType::Dec, 8, Some(r"^[0-9]{2}$")),
];

const fn message(message_type: MessageType, body: BodySchema) -> MessageDef {
    MessageDef { message_type, body, repeat: &[], pseudo: false }
}

pub static MESSAGES_V1: [MessageDef; 12] = [
    message(MessageType::Authentication, BodySchema::Fields(&AUTHENTICATION_V1)),
    message(MessageType::Cryptographic,  BodySchema::Fields(&CRYPTOGRAPHIC_V1)),
    MessageDef {
        message_type: MessageType::Test,
        body: BodySchema::Fields(&TEST_V1),
        repeat: &[],
        pseudo: true,
    },
    message(MessageType::Protective,     BodySchema::SignSignal),
    message(MessageType::Emergency,      BodySchema::SignSignal),
    message(MessageType::Danger,         BodySchema::SignSignal),
    message(MessageType::Status,         BodySchema::SignSignal),
    message(MessageType::Infrastructure, BodySchema::SignSignal),
    message(MessageType::Mission,        BodySchema::SignSignal),
    MessageDef {
        message_type: MessageType::Request,
        body: BodySchema::SignSignal,
        repeat: &REQUEST_OBJECTS_V1,
        pseudo: false,
    },
    message(MessageType::Resource,       BodySchema::Fields(&RESOURCE_V1)),
    message(MessageType::FreeText,       BodySchema::Fields(&FREE_TEXT_V1)),
];
