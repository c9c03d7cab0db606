//! crypto/mod.rs
//! Key derivation, body encryption and authentication support.
//!
//! Notes:
//! - HKDF-SHA256 derives body keys and authentication tokens; the binary
//!   originator address is the HKDF `info`.
//! - Bodies are encrypted with AES-256-CTR; headers stay in clear.
//! - Accounts and ECDH key agreement are external collaborators.

pub mod types;
pub mod kdf;
pub mod cipher;
pub mod account;
pub mod auth;

pub use types::*;
pub use kdf::*;
pub use cipher::*;
pub use account::*;
pub use auth::*;
