use crate::artifacts::database::compression;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::pack::error::{PackError, PackResult};
use bytes::Bytes;

const CONTINUATION_BIT: u8 = 0b1000_0000;
const TYPE_MASK: u8 = 0b0111;
const FIRST_SIZE_MASK: u8 = 0b1111;
const SIZE_MASK: u8 = 0b0111_1111;

/// Map a pack entry type code to an object type
///
/// Codes 6 (ofs-delta) and 7 (ref-delta) are deltas against another object and
/// have no standalone object type; 0 and 5 are reserved.
pub fn object_type_from_code(type_code: u8) -> Option<ObjectType> {
    match type_code {
        1 => Some(ObjectType::Commit),
        2 => Some(ObjectType::Tree),
        3 => Some(ObjectType::Blob),
        4 => Some(ObjectType::Tag),
        _ => None,
    }
}

/// One decoded, not yet stored, pack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub object_type: ObjectType,
    /// Uncompressed length announced by the entry header
    pub size: u64,
    pub payload: Bytes,
    /// Header bytes plus compressed stream bytes
    pub consumed: usize,
}

impl PackEntry {
    /// Decode the entry starting at `offset`
    pub fn parse(pack: &[u8], offset: usize) -> PackResult<Self> {
        let mut cursor = offset;

        let mut byte = next_byte(pack, &mut cursor, offset)?;
        let type_code = (byte >> 4) & TYPE_MASK;
        let object_type = object_type_from_code(type_code)
            .ok_or(PackError::UnsupportedObjectType { type_code, offset })?;

        let mut size = u64::from(byte & FIRST_SIZE_MASK);
        let mut shift = 4u32;
        while byte & CONTINUATION_BIT != 0 {
            byte = next_byte(pack, &mut cursor, offset)?;
            if shift + 7 > u64::BITS {
                return Err(PackError::Decode {
                    offset,
                    reason: "entry size does not fit in 64 bits".into(),
                });
            }
            size |= u64::from(byte & SIZE_MASK) << shift;
            shift += 7;
        }

        let stream = compression::inflate_stream(&pack[cursor..]).map_err(|e| PackError::Decode {
            offset,
            reason: format!("unable to inflate {object_type} data: {e}"),
        })?;

        Ok(PackEntry {
            object_type,
            size,
            payload: Bytes::from(stream.data),
            consumed: cursor - offset + stream.consumed,
        })
    }
}

fn next_byte(pack: &[u8], cursor: &mut usize, offset: usize) -> PackResult<u8> {
    let byte = *pack.get(*cursor).ok_or_else(|| PackError::Decode {
        offset,
        reason: "pack truncated inside entry header".into(),
    })?;
    *cursor += 1;

    Ok(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry_header(type_code: u8, size: usize) -> Vec<u8> {
        let mut first = (type_code << 4) | (size & 0x0f) as u8;
        let mut rest = size >> 4;
        if rest > 0 {
            first |= 0x80;
        }

        let mut header = vec![first];
        while rest > 0 {
            let mut byte = (rest & 0x7f) as u8;
            rest >>= 7;
            if rest > 0 {
                byte |= 0x80;
            }
            header.push(byte);
        }

        header
    }

    #[test]
    fn single_byte_header() {
        let mut pack = entry_header(3, 5);
        let compressed = compression::compress(b"hello").unwrap();
        pack.extend(&compressed);

        let entry = PackEntry::parse(&pack, 0).unwrap();

        assert_eq!(entry.object_type, ObjectType::Blob);
        assert_eq!(entry.size, 5);
        assert_eq!(&entry.payload[..], b"hello");
        assert_eq!(entry.consumed, 1 + compressed.len());
    }

    #[test]
    fn multi_byte_size_varint() {
        let content = vec![b'x'; 70_000];
        let header = entry_header(1, content.len());
        assert_eq!(header.len(), 3);

        let mut pack = vec![0xff; 7];
        pack.extend(&header);
        let compressed = compression::compress(&content).unwrap();
        pack.extend(&compressed);
        pack.extend([0xde, 0xad]);

        let entry = PackEntry::parse(&pack, 7).unwrap();

        assert_eq!(entry.object_type, ObjectType::Commit);
        assert_eq!(entry.size, 70_000);
        assert_eq!(entry.payload.len(), 70_000);
        assert_eq!(entry.consumed, header.len() + compressed.len());
    }

    #[test]
    fn delta_and_reserved_types_are_unsupported() {
        for type_code in [0, 5, 6, 7] {
            let mut pack = entry_header(type_code, 3);
            pack.extend(compression::compress(b"abc").unwrap());

            let result = PackEntry::parse(&pack, 0);
            assert!(matches!(
                result,
                Err(PackError::UnsupportedObjectType { type_code: code, offset: 0 }) if code == type_code
            ));
        }
    }

    #[test]
    fn header_cut_inside_varint() {
        let pack = [0b1011_0101];
        assert!(matches!(
            PackEntry::parse(&pack, 0),
            Err(PackError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn missing_stream() {
        let pack = entry_header(3, 5);
        assert!(matches!(
            PackEntry::parse(&pack, 0),
            Err(PackError::Decode { .. })
        ));
    }
}
