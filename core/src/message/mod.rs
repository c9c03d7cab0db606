//! message/mod.rs
//! Whiteflag message composition, lifecycle and wire codec.
//!
//! Notes:
//! - `DraftMessage` is mutable and has no binary; `WfCodec::encode` turns it
//!   into a `FinalMessage`, which has no setters.
//! - Decoding produces a `FinalMessage` directly.
//! - Both share read access through `MessageFields`.

pub mod types;
pub mod fields;
pub mod draft;
pub mod finalized;
pub mod codec;
pub mod auth;

pub use types::*;
pub use fields::*;
pub use draft::*;
pub use finalized::*;
pub use codec::*;
