//! constants.rs
//! Versioned Whiteflag parameter tables.
//!
//! Notes:
//! - These are protocol configuration, not logic. Every table is keyed by
//!   `ProtocolVersion` and looked up through the functions at the bottom.
//! - Registry ids mirror the single ASCII character carried on the wire.

use crate::config::ProtocolVersion;

/// Value of the `Prefix` header field.
pub const PROTOCOL_PREFIX: &str = "WF";

/// Encryption indicator ids (header `EncryptionIndicator`).
pub mod encryption_ids {
    pub const NONE: u8            = b'0';
    pub const AES256_CTR_ECDH: u8 = b'1';
    pub const AES256_CTR_PSK: u8  = b'2';
}

/// Verification method ids (authentication message body).
pub mod auth_ids {
    pub const DIGITAL_SIGNATURE: u8 = b'1';
    pub const SHARED_TOKEN: u8      = b'2';
}

/// Parameters of one field encoding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeParams {
    pub name: &'static str,
    /// Fixed encoded length in bits; 0 means variable length.
    pub bit_len: usize,
    /// Bits used per value character.
    pub unit_bits: usize,
    /// Validation pattern for the human-readable value.
    pub pattern: &'static str,
}

/// v1 field types, in `FieldType` declaration order.
pub static FIELD_TYPES_V1: [FieldTypeParams; 8] = [
    FieldTypeParams { name: "bin",      bit_len: 0,  unit_bits: 1, pattern: r"^[01]+$" },
    FieldTypeParams { name: "dec",      bit_len: 0,  unit_bits: 4, pattern: r"^[0-9]+$" },
    FieldTypeParams { name: "hex",      bit_len: 0,  unit_bits: 4, pattern: r"^[a-fA-F0-9]+$" },
    FieldTypeParams { name: "utf-8",    bit_len: 0,  unit_bits: 8, pattern: r"^[\x00-\xFF]+$" },
    FieldTypeParams { name: "datetime", bit_len: 56, unit_bits: 4,
        pattern: r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$" },
    FieldTypeParams { name: "duration", bit_len: 24, unit_bits: 4, pattern: r"^P[0-9]{2}D[0-9]{2}H[0-9]{2}M$" },
    FieldTypeParams { name: "lat",      bit_len: 0,  unit_bits: 4, pattern: r"^[+\-][0-9]{2}\.[0-9]{1,5}$" },
    FieldTypeParams { name: "long",     bit_len: 0,  unit_bits: 4, pattern: r"^[+\-][0-9]{3}\.[0-9]{1,5}$" },
];

/// Parameters of one encryption method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoParams {
    pub method: u8,
    pub algorithm: &'static str,
    /// Key length in bytes.
    pub key_len: usize,
    /// Initialisation vector length in bytes.
    pub iv_len: usize,
    /// Width of the big-endian block counter in bits.
    pub counter_bits: usize,
    /// HKDF salt (hex).
    pub salt: &'static str,
}

pub static CRYPTO_PARAMS_V1: [CryptoParams; 2] = [
    CryptoParams {
        method: encryption_ids::AES256_CTR_ECDH,
        algorithm: "aes-256-ctr",
        key_len: 32,
        iv_len: 16,
        counter_bits: 128,
        salt: "8ff3a5c1c2d1a8d63bca44b5fa1e1b3e6dd7c8f9a3d2a4f1c0b9e8d7c6b5a493",
    },
    CryptoParams {
        method: encryption_ids::AES256_CTR_PSK,
        algorithm: "aes-256-ctr",
        key_len: 32,
        iv_len: 16,
        counter_bits: 128,
        salt: "c4d028bd45c876135e80ef7889835822a6f19a31835557d5854d1334e8497b56",
    },
];

/// Parameters of one authentication method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthParams {
    pub method: u8,
    /// Token length in bytes; 0 when the method carries no derived token.
    pub token_len: usize,
    /// HKDF salt (hex); empty when unused.
    pub salt: &'static str,
}

pub static AUTH_PARAMS_V1: [AuthParams; 2] = [
    AuthParams { method: auth_ids::DIGITAL_SIGNATURE, token_len: 0, salt: "" },
    AuthParams {
        method: auth_ids::SHARED_TOKEN,
        token_len: 32,
        salt: "420abc48f5d69328e8ec6fb3ee1ac5b1c1ac8c4c23c3db2c6d8dd63ee8cb1fa0",
    },
];

/// Field type table for a protocol version.
#[inline]
pub fn field_type_params(version: ProtocolVersion) -> &'static [FieldTypeParams] {
    match version {
        ProtocolVersion::V1 => &FIELD_TYPES_V1,
    }
}

/// Crypto parameters for an encryption method id.
pub fn crypto_params(method: u8, version: ProtocolVersion) -> Option<&'static CryptoParams> {
    let table: &'static [CryptoParams] = match version {
        ProtocolVersion::V1 => &CRYPTO_PARAMS_V1,
    };
    table.iter().find(|p| p.method == method)
}

/// Authentication parameters for a verification method id.
pub fn auth_params(method: u8, version: ProtocolVersion) -> Option<&'static AuthParams> {
    let table: &'static [AuthParams] = match version {
        ProtocolVersion::V1 => &AUTH_PARAMS_V1,
    };
    table.iter().find(|p| p.method == method)
}
