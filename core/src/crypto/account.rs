//! crypto/account.rs
//! Originator account collaborator.
//!
//! Blockchain accounts live outside this crate. The codec only needs the
//! address (as HKDF `info` and for signature checks) and a signer.

use crate::crypto::types::AuthError;

/// Blockchain account of a message originator.
pub trait WfAccount {
    /// Address in the blockchain's textual form.
    fn address(&self) -> &str;

    /// Address bytes used to bind derived keys and tokens to the originator.
    fn binary_address(&self) -> Vec<u8>;

    /// Sign `data` with the account key.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, AuthError>;

    /// Verify a signature made by this account.
    fn verify(&self, data: &[u8], signature: &[u8]) -> bool;

    /// Name of the blockchain signature algorithm (e.g. "ES256K").
    fn sign_algorithm(&self) -> &str;
}
