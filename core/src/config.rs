//! config.rs
//! Codec configuration and protocol version registry.
//!
//! Notes:
//! - Tables are keyed by `ProtocolVersion`; adding a version means adding
//!   rows to `constants.rs` and `schema/tables.rs`, never branching in logic.
//! - `CodecConfig` is plain data so hosts can load it from JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whiteflag protocol versions known to this codec.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[default]
    #[serde(rename = "1")]
    V1,
}

impl ProtocolVersion {
    /// Value carried in the `Version` header field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::V1 => "1",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(ProtocolVersion::V1),
            other => Err(format!("unsupported protocol version: {:?}", other)),
        }
    }
}

/// Options for a [`crate::message::WfCodec`] instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecConfig {
    /// Protocol version used for new messages and table lookups.
    pub version: ProtocolVersion,

    /// Allow `DraftMessage::to_hex` / `to_bytes` to encode on the fly.
    /// Only applies to unencrypted drafts; off by default.
    pub implicit_encode: bool,
}

impl CodecConfig {
    pub fn new(version: ProtocolVersion) -> Self {
        Self { version, ..Default::default() }
    }

    pub fn with_implicit_encode(mut self, enabled: bool) -> Self {
        self.implicit_encode = enabled;
        self
    }

    /// Parse a JSON config document; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
