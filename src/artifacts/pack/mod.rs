//! Pack file decoding
//!
//! A pack bundles many objects for transfer:
//!
//! ```text
//! "PACK" | version (u32 BE) | object count (u32 BE) | entries... | SHA-1 trailer
//! ```
//!
//! Each entry is a type+size varint header followed by a zlib stream with no
//! length prefix, so entries can only be located by inflating them in order.
//! Delta entries are not supported and the trailer is not verified.

pub mod decoder;
pub mod entry;
pub mod error;

/// Magic bytes every pack starts with
pub const PACK_SIGNATURE: &[u8; 4] = b"PACK";

/// The only pack version this decoder reads
pub const PACK_VERSION: u32 = 2;

/// Signature, version and object count
pub const PACK_HEADER_LENGTH: usize = 12;
