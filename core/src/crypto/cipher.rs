//! crypto/cipher.rs
//! AES-256-CTR body encryption.
//!
//! Design notes:
//! - CTR is a stream cipher: ciphertext length equals plaintext length, so
//!   a body of any bit length keeps its size once cropped.
//! - Counter width is taken from the method table (big-endian counter).
//! - Encrypt and decrypt are the same keystream XOR.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::ProtocolVersion;
use crate::constants::CryptoParams;
use crate::crypto::kdf::derive_key;
use crate::crypto::types::{CryptoError, EncryptionMethod};

type Aes256Ctr128 = ctr::Ctr128BE<Aes256>;
type Aes256Ctr64 = ctr::Ctr64BE<Aes256>;
type Aes256Ctr32 = ctr::Ctr32BE<Aes256>;

/// Body cipher bound to one derived key.
pub struct WfCipher {
    params: &'static CryptoParams,
    key: Zeroizing<Vec<u8>>,
}

impl WfCipher {
    /// Wrap an already derived key.
    pub fn new(
        method: EncryptionMethod,
        key: Zeroizing<Vec<u8>>,
        version: ProtocolVersion,
    ) -> Result<Self, CryptoError> {
        let params = method.params(version)?;
        if key.len() != params.key_len {
            return Err(CryptoError::InvalidKeyLen { expected: params.key_len, actual: key.len() });
        }
        Ok(Self { params, key })
    }

    /// Derive the key from input key material and the originator address.
    /// `ikm` is zeroised.
    pub fn from_secret(
        method: EncryptionMethod,
        ikm: &mut [u8],
        address: &[u8],
        version: ProtocolVersion,
    ) -> Result<Self, CryptoError> {
        let key = derive_key(ikm, method, address, version)?;
        Self::new(method, key, version)
    }

    /// Random initialisation vector of the method's length.
    pub fn generate_iv(&self) -> Vec<u8> {
        let mut iv = vec![0u8; self.params.iv_len];
        rand::thread_rng().fill_bytes(&mut iv);
        iv
    }

    pub fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.apply(iv, plaintext)
    }

    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.apply(iv, ciphertext)
    }

    fn apply(&self, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if iv.len() != self.params.iv_len {
            return Err(CryptoError::InvalidIvLen { expected: self.params.iv_len, actual: iv.len() });
        }

        let mut out = data.to_vec();
        let init_err = |e: ctr::cipher::InvalidLength| CryptoError::Failure(format!("{} init failed: {}", self.params.algorithm, e));
        match self.params.counter_bits {
            128 => Aes256Ctr128::new_from_slices(&self.key, iv).map_err(init_err)?.apply_keystream(&mut out),
            64 => Aes256Ctr64::new_from_slices(&self.key, iv).map_err(init_err)?.apply_keystream(&mut out),
            32 => Aes256Ctr32::new_from_slices(&self.key, iv).map_err(init_err)?.apply_keystream(&mut out),
            other => {
                return Err(CryptoError::Failure(format!("unsupported counter width: {} bits", other)));
            }
        }
        Ok(out)
    }
}

/// Random initialisation vector for `method`.
pub fn generate_iv(method: EncryptionMethod, version: ProtocolVersion) -> Result<Vec<u8>, CryptoError> {
    let params = method.params(version)?;
    let mut iv = vec![0u8; params.iv_len];
    rand::thread_rng().fill_bytes(&mut iv);
    Ok(iv)
}
