//! crypto/auth.rs
//! Authentication signature payload.
//!
//! Notes:
//! - The payload is what an originator signs to link its blockchain address
//!   to an organisation and URL; the signature container (JWS) and its
//!   publication are handled elsewhere.
//! - Checks are split: context (keys, address, url) fails as an
//!   authentication error, the signature itself as a signature error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::crypto::account::WfAccount;
use crate::crypto::types::AuthError;

/// Keys a signature payload must carry.
pub const REQUIRED_PAYLOAD_KEYS: [&str; 3] = ["addr", "orgname", "url"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfSignaturePayload {
    pub addr: String,
    pub orgname: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extpubkey: Option<String>,
}

impl WfSignaturePayload {
    pub fn new(account: &dyn WfAccount, orgname: &str, url: &str) -> Self {
        Self {
            addr: account.address().to_string(),
            orgname: orgname.to_string(),
            url: url.to_string(),
            extpubkey: None,
        }
    }

    /// Parse a JSON payload, rejecting documents without the required keys.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let value: Value = serde_json::from_str(json)?;
        for key in REQUIRED_PAYLOAD_KEYS {
            match value.get(key) {
                Some(Value::String(s)) if !s.is_empty() => {}
                _ => return Err(AuthError::MissingKey(key)),
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialized bytes that get signed.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AuthError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Check the payload belongs to `account` and to the message `url`.
    pub fn check_origin(&self, account: &dyn WfAccount, url: &str) -> Result<(), AuthError> {
        if self.addr != account.address() {
            return Err(AuthError::AddressMismatch {
                expected: account.address().to_string(),
                actual: self.addr.clone(),
            });
        }
        if self.url != url {
            return Err(AuthError::UrlMismatch { expected: url.to_string(), actual: self.url.clone() });
        }
        Ok(())
    }
}

/// Payload with its detached signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfSignature {
    pub payload: WfSignaturePayload,
    /// Hex-encoded signature over `payload.to_bytes()`.
    pub signature: String,
    pub algorithm: String,
}

/// Sign `payload` with `account`.
pub fn sign_payload(account: &dyn WfAccount, payload: WfSignaturePayload) -> Result<WfSignature, AuthError> {
    let data = payload.to_bytes()?;
    let signature = account.sign(&data)?;
    debug!(addr = %payload.addr, algorithm = account.sign_algorithm(), "signed authentication payload");
    Ok(WfSignature {
        payload,
        signature: hex::encode(signature),
        algorithm: account.sign_algorithm().to_string(),
    })
}

/// Verify origin and signature of an authentication signature.
pub fn verify_payload_signature(account: &dyn WfAccount, signature: &WfSignature, url: &str) -> Result<(), AuthError> {
    signature.payload.check_origin(account, url)?;

    let sig = hex::decode(&signature.signature).map_err(|_| AuthError::InvalidSignature)?;
    let data = signature.payload.to_bytes()?;
    if !account.verify(&data, &sig) {
        return Err(AuthError::InvalidSignature);
    }
    Ok(())
}
