//! Git tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! ## Ordering
//!
//! Built trees keep their entries in canonical order: names compare bytewise,
//! with directory names compared as if they ended in `/`. Decoded trees keep
//! whatever order they were stored in.

use crate::artifacts::database::error::{StoreError, StoreResult};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    fn sort_key(&self) -> String {
        if self.mode.is_tree() {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self.mode.as_str().as_bytes());
        buffer.push(b' ');
        buffer.extend_from_slice(self.name.as_bytes());
        buffer.push(0);
        buffer.extend_from_slice(&self.oid.to_raw());
    }

    /// One `ls-tree` line: `<mode> <type> <oid>\t<name>`
    pub fn display(&self) -> String {
        format!(
            "{:06o} {} {}\t{}",
            self.mode.as_u32(),
            self.mode.object_type(),
            self.oid,
            self.name
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree in canonical entry order
    ///
    /// Later entries with the same name replace earlier ones.
    pub fn build(entries: impl IntoIterator<Item = TreeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.sort_key(), entry))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect();

        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Parse a tree payload (the header must already be stripped)
    pub fn deserialize(mut reader: impl BufRead) -> StoreResult<Self> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(StoreError::Decode("unexpected EOF in tree entry mode".into()));
            }

            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|e| StoreError::Decode(format!("tree entry mode is not UTF-8: {e}")))?;
            let mode =
                EntryMode::try_from(mode).map_err(|e| StoreError::Decode(e.to_string()))?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(StoreError::Decode("unexpected EOF in tree entry name".into()));
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|e| StoreError::Decode(format!("tree entry name is not UTF-8: {e}")))?;

            let oid = ObjectId::read_h40_from(&mut reader).map_err(|_| {
                StoreError::Decode(format!("unexpected EOF in object id of entry {name}"))
            })?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn content(&self) -> Bytes {
        let mut content = Vec::new();
        for entry in &self.entries {
            entry.write_to(&mut content);
        }

        Bytes::from(content)
    }
}
