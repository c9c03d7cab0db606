//! crypto/types.rs
//! Encryption/authentication method registries and their errors.

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::ProtocolVersion;
use crate::constants::{auth_ids, auth_params, crypto_params, encryption_ids, AuthParams, CryptoParams};
use crate::utils::single_code;

/// Body encryption methods (header `EncryptionIndicator`).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum EncryptionMethod {
    #[default]
    None          = encryption_ids::NONE,
    Aes256CtrEcdh = encryption_ids::AES256_CTR_ECDH,
    Aes256CtrPsk  = encryption_ids::AES256_CTR_PSK,
}

impl EncryptionMethod {
    /// Parse the `EncryptionIndicator` header value.
    pub fn from_indicator(value: &str) -> Result<Self, CryptoError> {
        let raw = single_code(value).ok_or_else(|| CryptoError::InvalidIndicator(value.to_string()))?;
        EncryptionMethod::try_from(raw).map_err(|_| CryptoError::UnsupportedMethod { raw })
    }

    /// Value carried in the `EncryptionIndicator` header field.
    pub fn indicator(&self) -> String {
        char::from(*self as u8).to_string()
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        *self != EncryptionMethod::None
    }

    /// Table parameters; `None` has no parameters and is rejected.
    pub fn params(&self, version: ProtocolVersion) -> Result<&'static CryptoParams, CryptoError> {
        crypto_params(*self as u8, version).ok_or(CryptoError::UnsupportedMethod { raw: *self as u8 })
    }
}

/// Verification methods of authentication messages.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum AuthMethod {
    DigitalSignature = auth_ids::DIGITAL_SIGNATURE,
    SharedToken      = auth_ids::SHARED_TOKEN,
}

impl AuthMethod {
    pub fn from_code(value: &str) -> Result<Self, CryptoError> {
        let raw = single_code(value).ok_or_else(|| CryptoError::InvalidIndicator(value.to_string()))?;
        AuthMethod::try_from(raw).map_err(|_| CryptoError::UnsupportedMethod { raw })
    }

    /// Value carried in the `VerificationMethod` body field.
    pub fn code(&self) -> String {
        char::from(*self as u8).to_string()
    }

    pub fn params(&self, version: ProtocolVersion) -> Result<&'static AuthParams, CryptoError> {
        auth_params(*self as u8, version).ok_or(CryptoError::UnsupportedMethod { raw: *self as u8 })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Method id not in the registry or without parameters.
    UnsupportedMethod { raw: u8 },

    /// Indicator value is not a single registry character.
    InvalidIndicator(String),

    /// Encrypted content but no key material supplied.
    MissingKeyMaterial,

    /// Encrypted content but no initialisation vector supplied.
    MissingIv,

    /// Initialisation vector of the wrong length.
    InvalidIvLen { expected: usize, actual: usize },

    /// Key of the wrong length.
    InvalidKeyLen { expected: usize, actual: usize },

    /// Requested derivation output length out of range.
    InvalidOutputLen { requested: usize, max: usize },

    /// Primitive failure with context.
    Failure(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CryptoError::*;
        match self {
            UnsupportedMethod { raw } =>
                write!(f, "unsupported method: {:?}", char::from(*raw)),
            InvalidIndicator(value) =>
                write!(f, "invalid method indicator: {:?}", value),
            MissingKeyMaterial =>
                write!(f, "encrypted message requires input key material and originator address"),
            MissingIv =>
                write!(f, "encrypted message requires an initialisation vector"),
            InvalidIvLen { expected, actual } =>
                write!(f, "invalid initialisation vector length: expected={}, actual={}", expected, actual),
            InvalidKeyLen { expected, actual } =>
                write!(f, "invalid key length: expected={}, actual={}", expected, actual),
            InvalidOutputLen { requested, max } =>
                write!(f, "invalid derivation output length: {} (1..={})", requested, max),
            Failure(msg) =>
                write!(f, "crypto failure: {}", msg),
        }
    }
}

impl std::error::Error for CryptoError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Signature payload lacks a required key.
    MissingKey(&'static str),

    /// Payload address differs from the signing account.
    AddressMismatch { expected: String, actual: String },

    /// Payload URL differs from the authentication message.
    UrlMismatch { expected: String, actual: String },

    /// Message does not use the expected verification method.
    UnexpectedMethod { expected: String, actual: String },

    /// Authentication token does not match the shared secret.
    TokenMismatch,

    /// Digital signature did not verify.
    InvalidSignature,

    /// Account could not produce a signature.
    Signing(String),

    /// Payload is not a valid JSON document.
    Payload(String),
}

impl AuthError {
    /// True for failures of the signature itself, as opposed to its context.
    pub fn is_signature_error(&self) -> bool {
        matches!(self, AuthError::InvalidSignature | AuthError::Signing(_))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AuthError::*;
        match self {
            MissingKey(key) =>
                write!(f, "signature payload is missing required key {:?}", key),
            AddressMismatch { expected, actual } =>
                write!(f, "signature address mismatch: expected {}, got {}", expected, actual),
            UrlMismatch { expected, actual } =>
                write!(f, "signature url mismatch: expected {}, got {}", expected, actual),
            UnexpectedMethod { expected, actual } =>
                write!(f, "unexpected verification method: expected {:?}, got {:?}", expected, actual),
            TokenMismatch =>
                write!(f, "authentication token does not match"),
            InvalidSignature =>
                write!(f, "digital signature verification failed"),
            Signing(msg) =>
                write!(f, "signing failed: {}", msg),
            Payload(msg) =>
                write!(f, "invalid signature payload: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Payload(e.to_string())
    }
}
