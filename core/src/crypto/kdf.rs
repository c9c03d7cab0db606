//! crypto/kdf.rs
//! HKDF-SHA256 derivation of body encryption keys and authentication tokens.
//!
//! Design:
//! - HKDF-Extract(salt, ikm) -> PRK, HKDF-Expand(PRK, info) -> key (RFC 5869).
//! - Salt and output length come from the versioned method tables.
//! - `info` is the binary address of the originator, binding the key to it.
//!
//! Security notes:
//! - Input key material is zeroised before any function here returns,
//!   whether derivation succeeded or not.
//! - Derived material is returned in `Zeroizing` containers.

use hkdf::Hkdf;
use sha2::Sha256;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::config::ProtocolVersion;
use crate::crypto::types::{AuthMethod, CryptoError, EncryptionMethod};

/// HKDF-SHA256 output limit (255 blocks of 32 bytes).
pub const MAX_OUTPUT_LEN: usize = 255 * 32;

/// Derive `output_len` bytes with HKDF-SHA256, then zeroise `ikm`.
///
/// An empty `salt` selects the RFC 5869 default (hash-length zero salt).
pub fn hkdf_sha256(
    ikm: &mut [u8],
    salt: &[u8],
    info: &[u8],
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let result = expand(ikm, salt, info, output_len);
    ikm.zeroize();
    result
}

fn expand(ikm: &[u8], salt: &[u8], info: &[u8], output_len: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if output_len == 0 || output_len > MAX_OUTPUT_LEN {
        return Err(CryptoError::InvalidOutputLen { requested: output_len, max: MAX_OUTPUT_LEN });
    }

    let salt_opt = if salt.is_empty() { None } else { Some(salt) };
    let hk = Hkdf::<Sha256>::new(salt_opt, ikm);

    let mut okm = Zeroizing::new(vec![0u8; output_len]);
    hk.expand(info, okm.as_mut_slice())
        .map_err(|e| CryptoError::Failure(format!("HKDF-SHA256 expand failed: {}", e)))?;
    Ok(okm)
}

fn decode_salt(salt_hex: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(salt_hex).map_err(|e| CryptoError::Failure(format!("invalid table salt: {}", e)))
}

/// Pass `result` through, zeroising `ikm` first when it is an error.
fn or_zeroize<T>(ikm: &mut [u8], result: Result<T, CryptoError>) -> Result<T, CryptoError> {
    if result.is_err() {
        ikm.zeroize();
    }
    result
}

/// Derive the body encryption key for `method`, bound to `address`.
///
/// `ikm` is the ECDH shared secret or the pre-shared key; it is zeroised.
pub fn derive_key(
    ikm: &mut [u8],
    method: EncryptionMethod,
    address: &[u8],
    version: ProtocolVersion,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let params = or_zeroize(ikm, method.params(version))?;
    let salt = or_zeroize(ikm, decode_salt(params.salt))?;

    debug!(method = ?method, key_len = params.key_len, "deriving body encryption key");
    hkdf_sha256(ikm, &salt, address, params.key_len)
}

/// Derive the hex authentication token proving possession of `secret`.
///
/// Only methods with a token length (shared token) derive a token.
pub fn derive_auth_token(
    secret: &mut [u8],
    method: AuthMethod,
    address: &[u8],
    version: ProtocolVersion,
) -> Result<String, CryptoError> {
    let params = or_zeroize(secret, method.params(version))?;
    if params.token_len == 0 {
        secret.zeroize();
        return Err(CryptoError::UnsupportedMethod { raw: method as u8 });
    }
    let salt = or_zeroize(secret, decode_salt(params.salt))?;

    debug!(method = ?method, token_len = params.token_len, "deriving authentication token");
    let token = hkdf_sha256(secret, &salt, address, params.token_len)?;
    Ok(hex::encode(token.as_slice()))
}
