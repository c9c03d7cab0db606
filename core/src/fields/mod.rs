//! fields/mod.rs
//! Codec for single Whiteflag field values.
//!
//! Notes:
//! - One `FieldCodec` per protocol version; it owns the compiled patterns.
//! - Encoding density differs per type: 1 bit (BIN), 4 bits (decimal and
//!   hex family) or 8 bits (UTF8) per character.

pub mod types;
pub mod table;
pub mod encode;
pub mod decode;

pub use types::*;
pub use table::*;
