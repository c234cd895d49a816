//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They uniquely identify all objects in the store (blobs, trees, commits, tags).
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Raw: 20 bytes, as embedded in tree entries
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Errors raised when an object ID fails validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    #[error("invalid object ID length: {0}")]
    InvalidLength(usize),

    #[error("invalid object ID characters: {0}")]
    InvalidCharacters(String),
}

/// Git object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string that uniquely identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case hex digits are accepted and normalized to lower case so that
    /// the ID always maps to the same storage path.
    pub fn try_parse(id: impl Into<String>) -> Result<Self, ObjectIdError> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectIdError::InvalidLength(id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ObjectIdError::InvalidCharacters(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Finish a SHA-1 computation and wrap the digest
    pub(crate) fn from_hasher(hasher: Sha1) -> Self {
        Self(format!("{:x}", hasher.finalize()))
    }

    /// The 20 raw bytes behind the hex form
    pub fn to_raw(&self) -> [u8; OBJECT_ID_LENGTH / 2] {
        // the hex form is validated on construction
        fn nibble(digit: u8) -> u8 {
            match digit {
                b'0'..=b'9' => digit - b'0',
                b'a'..=b'f' => digit - b'a' + 10,
                _ => 0,
            }
        }

        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        for (byte, pair) in raw.iter_mut().zip(self.0.as_bytes().chunks_exact(2)) {
            *byte = (nibble(pair[0]) << 4) | nibble(pair[1]);
        }

        raw
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// Used when deserializing tree entries.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect::<String>();
        Ok(Self(hex40))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
