//! binary/mod.rs
//! Bit-exact byte buffer used by the field and message codecs.
//!
//! Notes:
//! - Whiteflag fields are not byte aligned; a message is one contiguous
//!   bit stream with only terminal padding to the next byte.
//! - The buffer tracks its used bit length explicitly and keeps unused
//!   trailing bits zero, so `to_bytes()` is always canonical.

pub mod types;
pub mod buffer;

pub use types::*;
pub use buffer::*;
