//! whiteflag-core
//!
//! Whiteflag protocol message codec.
//! Bit-packed field encoding, versioned message tables, HKDF key
//! derivation and AES-256-CTR body encryption.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Codec layers, bottom-up
pub mod binary;
pub mod fields;
pub mod schema;
pub mod crypto;
pub mod message;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::binary::BitBuffer;
    pub use crate::config::{CodecConfig, ProtocolVersion};
    pub use crate::crypto::{AuthMethod, EncryptionMethod, WfAccount};
    pub use crate::fields::{FieldCodec, FieldType};
    pub use crate::message::{CipherInput, DraftMessage, FinalMessage, MessageFields, WfCodec, WfObject};
    pub use crate::schema::{MessageSchema, MessageType};
    pub use crate::types::{ErrorKind, WfError};
}
