use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};

/// Build the `"<type> <size>\0"` prefix every stored object starts with
pub fn object_header(object_type: ObjectType, content_len: usize) -> String {
    format!("{} {}\0", object_type.as_str(), content_len)
}

/// Compute the ID of an object without materializing its serialized form
pub fn compute_id(object_type: ObjectType, content: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(object_header(object_type, content.len()).as_bytes());
    hasher.update(content);

    ObjectId::from_hasher(hasher)
}

pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// Payload without the header
    fn content(&self) -> Bytes;

    fn serialize(&self) -> Bytes {
        let content = self.content();
        let header = object_header(self.object_type(), content.len());

        let mut object_bytes = Vec::with_capacity(header.len() + content.len());
        object_bytes.extend_from_slice(header.as_bytes());
        object_bytes.extend_from_slice(&content);

        Bytes::from(object_bytes)
    }

    fn object_id(&self) -> ObjectId {
        compute_id(self.object_type(), &self.content())
    }
}

/// An object as the store sees it: a type tag and an opaque payload
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RawObject {
    object_type: ObjectType,
    content: Bytes,
}

impl RawObject {
    pub fn into_parts(self) -> (ObjectType, Bytes) {
        (self.object_type, self.content)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }
}

impl Object for RawObject {
    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn content(&self) -> Bytes {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn blob_id_matches_the_header_prefixed_digest() {
        let oid = compute_id(ObjectType::Blob, b"hello");
        assert_eq!(oid.as_ref(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
    }

    #[test]
    fn empty_blob_has_the_well_known_id() {
        let oid = compute_id(ObjectType::Blob, b"");
        assert_eq!(oid.as_ref(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
    }

    #[test]
    fn id_is_stable_across_calls() {
        let first = compute_id(ObjectType::Commit, b"tree abc\n\nmessage\n");
        let second = compute_id(ObjectType::Commit, b"tree abc\n\nmessage\n");
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_type_and_content_pairs_get_distinct_ids() {
        let kinds = [
            ObjectType::Blob,
            ObjectType::Tree,
            ObjectType::Commit,
            ObjectType::Tag,
        ];
        let contents: [&[u8]; 5] = [b"", b"a", b"b", b"hello", b"hello\n"];

        let ids = kinds
            .iter()
            .flat_map(|kind| contents.iter().map(move |content| compute_id(*kind, content)))
            .collect::<HashSet<_>>();

        assert_eq!(ids.len(), kinds.len() * contents.len());
    }

    #[test]
    fn serialized_form_carries_the_header() {
        let object = RawObject::new(ObjectType::Tag, Bytes::from_static(b"v1"));
        assert_eq!(&object.serialize()[..], b"tag 2\0v1");
        assert_eq!(object.object_id(), compute_id(ObjectType::Tag, b"v1"));
    }
}
