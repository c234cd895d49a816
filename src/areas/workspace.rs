use crate::areas::database::Database;
use crate::artifacts::database::error::StoreResult;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use std::path::Path;

/// Name of the repository metadata directory, never part of a snapshot
pub const METADATA_DIR: &str = ".git";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn read_file(&self, file_path: &Path) -> std::io::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(Bytes::from(content))
    }

    /// Snapshot the whole workspace into tree objects
    ///
    /// Returns `None` when there is nothing to snapshot: no files anywhere
    /// below the root, only (nested) empty directories.
    pub fn write_tree(&self, database: &Database) -> StoreResult<Option<ObjectId>> {
        snapshot_dir(&self.path, database)
    }
}

fn snapshot_dir(dir_path: &Path, database: &Database) -> StoreResult<Option<ObjectId>> {
    let mut entries = Vec::new();

    for dir_entry in std::fs::read_dir(dir_path)? {
        let dir_entry = dir_entry?;
        let file_name = dir_entry.file_name();

        let Some(name) = file_name.to_str() else {
            tracing::warn!(path = %dir_entry.path().display(), "skipping entry with non UTF-8 name");
            continue;
        };
        if name == METADATA_DIR {
            continue;
        }

        // follows symlinks, the way a plain read of the file would
        let metadata = match std::fs::metadata(dir_entry.path()) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %dir_entry.path().display(), "skipping dangling entry");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            if let Some(oid) = snapshot_dir(&dir_entry.path(), database)? {
                entries.push(TreeEntry::new(EntryMode::Directory, name.to_string(), oid));
            }
        } else if metadata.is_file() {
            let content = std::fs::read(dir_entry.path())?;
            let oid = database.put(ObjectType::Blob, content)?;
            entries.push(TreeEntry::new(
                EntryMode::File(FileMode::Regular),
                name.to_string(),
                oid,
            ));
        } else {
            tracing::debug!(path = %dir_entry.path().display(), "skipping special file");
        }
    }

    if entries.is_empty() {
        return Ok(None);
    }

    let tree = Tree::build(entries);
    database.store(&tree).map(Some)
}
