use std::fmt;

use crate::{
    binary::BinaryError,
    crypto::{AuthError, CryptoError},
    fields::FieldError,
    message::MessageError,
    schema::SchemaError,
};

/// Error classes callers can branch on without matching every variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Value fails its pattern, or a fixed-length field has the wrong length.
    Format,
    /// Bit offsets out of bounds.
    Range,
    /// Malformed hex, invalid sign bit, unknown registry value.
    Encoding,
    /// Signature payload context is wrong (keys, address, url).
    Authentication,
    /// Digital signature failed.
    Signature,
    /// Missing key material, bad IV, unsupported method.
    Encryption,
    /// API used out of order (e.g. binary requested from an unencoded draft).
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "format error",
            ErrorKind::Range => "range error",
            ErrorKind::Encoding => "encoding error",
            ErrorKind::Authentication => "authentication error",
            ErrorKind::Signature => "signature error",
            ErrorKind::Encryption => "encryption error",
            ErrorKind::Usage => "usage error",
        };
        f.write_str(name)
    }
}

/// Unified codec error.
/// - `From<T>` impls let `?` cross module boundaries.
/// - `kind()` maps every variant onto [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WfError {
    /// Bit buffer error (offsets, hex input).
    Binary(BinaryError),

    /// Field value encoding/decoding error.
    Field(FieldError),

    /// Message structure lookup error.
    Schema(SchemaError),

    /// Key derivation or body cipher error.
    Crypto(CryptoError),

    /// Authentication payload or signature error.
    Auth(AuthError),

    /// Message composition or lifecycle error.
    Message(MessageError),
}

impl WfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WfError::Binary(e) => binary_kind(e),
            WfError::Field(e) => field_kind(e),
            WfError::Schema(e) => schema_kind(e),
            WfError::Crypto(e) => crypto_kind(e),
            WfError::Auth(e) => {
                if e.is_signature_error() {
                    ErrorKind::Signature
                } else {
                    ErrorKind::Authentication
                }
            }
            WfError::Message(e) => match e {
                MessageError::Field { source, .. } => field_kind(source),
                MessageError::Truncated { .. } => ErrorKind::Format,
                MessageError::InvalidObject(_) => ErrorKind::Encoding,
                MessageError::NotEncoded
                | MessageError::UnknownField { .. }
                | MessageError::ImplicitEncodeEncrypted => ErrorKind::Usage,
            },
        }
    }
}

fn binary_kind(e: &BinaryError) -> ErrorKind {
    match e {
        BinaryError::OutOfRange { .. } => ErrorKind::Range,
        BinaryError::InvalidHex(_) => ErrorKind::Encoding,
    }
}

fn field_kind(e: &FieldError) -> ErrorKind {
    match e {
        FieldError::PatternMismatch { .. }
        | FieldError::LengthMismatch { .. }
        | FieldError::InvalidPattern { .. } => ErrorKind::Format,
        FieldError::InvalidEncoding { .. } | FieldError::UnknownFieldType(_) => ErrorKind::Encoding,
        FieldError::Binary(b) => binary_kind(b),
    }
}

fn schema_kind(e: &SchemaError) -> ErrorKind {
    match e {
        SchemaError::Field(f) => field_kind(f),
        _ => ErrorKind::Encoding,
    }
}

fn crypto_kind(e: &CryptoError) -> ErrorKind {
    match e {
        CryptoError::InvalidIndicator(_) => ErrorKind::Encoding,
        _ => ErrorKind::Encryption,
    }
}

impl fmt::Display for WfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WfError::Binary(e) => write!(f, "binary error: {}", e),
            WfError::Field(e) => write!(f, "field error: {}", e),
            WfError::Schema(e) => write!(f, "schema error: {}", e),
            WfError::Crypto(e) => write!(f, "crypto error: {}", e),
            WfError::Auth(e) => write!(f, "auth error: {}", e),
            WfError::Message(e) => write!(f, "message error: {}", e),
        }
    }
}

impl std::error::Error for WfError {}

impl From<BinaryError> for WfError {
    fn from(e: BinaryError) -> Self {
        WfError::Binary(e)
    }
}

impl From<FieldError> for WfError {
    fn from(e: FieldError) -> Self {
        WfError::Field(e)
    }
}

impl From<SchemaError> for WfError {
    fn from(e: SchemaError) -> Self {
        WfError::Schema(e)
    }
}

impl From<CryptoError> for WfError {
    fn from(e: CryptoError) -> Self {
        WfError::Crypto(e)
    }
}

impl From<AuthError> for WfError {
    fn from(e: AuthError) -> Self {
        WfError::Auth(e)
    }
}

impl From<MessageError> for WfError {
    fn from(e: MessageError) -> Self {
        WfError::Message(e)
    }
}
