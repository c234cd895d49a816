use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::pack::entry::PackEntry;
use crate::artifacts::pack::error::{PackError, PackResult};
use crate::artifacts::pack::{PACK_HEADER_LENGTH, PACK_SIGNATURE, PACK_VERSION};
use byteorder::{BigEndian, ReadBytesExt};
use derive_new::new;
use std::io::Cursor;

/// Fixed-size pack header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    pub version: u32,
    pub object_count: u32,
}

impl PackHeader {
    pub fn parse(pack: &[u8]) -> PackResult<Self> {
        if !pack.starts_with(PACK_SIGNATURE) {
            let signature = pack.iter().take(PACK_SIGNATURE.len()).copied().collect();
            return Err(PackError::InvalidPackSignature(signature));
        }

        let truncated = |_: std::io::Error| PackError::Decode {
            offset: 0,
            reason: format!(
                "pack header needs {PACK_HEADER_LENGTH} bytes, got {}",
                pack.len()
            ),
        };
        let mut reader = Cursor::new(&pack[PACK_SIGNATURE.len()..]);

        let version = reader.read_u32::<BigEndian>().map_err(truncated)?;
        if version != PACK_VERSION {
            return Err(PackError::UnsupportedPackVersion(version));
        }
        let object_count = reader.read_u32::<BigEndian>().map_err(truncated)?;

        Ok(PackHeader {
            version,
            object_count,
        })
    }
}

/// Unpacks a fully buffered pack into the object database
///
/// Entries are stored as they are decoded. Decoding stops at the first bad
/// entry; whatever was stored before it stays in the database.
#[derive(Debug, new)]
pub struct PackDecoder<'d> {
    database: &'d Database,
}

impl PackDecoder<'_> {
    /// Decode every entry and return the IDs in pack order
    pub fn decode(&self, pack: &[u8]) -> PackResult<Vec<ObjectId>> {
        let header = PackHeader::parse(pack)?;
        tracing::debug!(
            version = header.version,
            objects = header.object_count,
            "decoding pack"
        );

        let mut offset = PACK_HEADER_LENGTH;
        let mut object_ids = Vec::new();

        for _ in 0..header.object_count {
            let entry = PackEntry::parse(pack, offset)?;

            if entry.size != entry.payload.len() as u64 {
                tracing::warn!(
                    offset,
                    declared = entry.size,
                    actual = entry.payload.len(),
                    "pack entry size does not match its inflated length"
                );
            }

            let object_type = entry.object_type;
            let object_id = self.database.put(object_type, entry.payload)?;
            tracing::debug!(offset, oid = %object_id, kind = %object_type, "unpacked object");

            offset += entry.consumed;
            object_ids.push(object_id);
        }

        // the trailer is a checksum we do not verify
        tracing::info!(
            objects = object_ids.len(),
            trailing_bytes = pack.len() - offset,
            "unpacked pack"
        );

        Ok(object_ids)
    }
}
