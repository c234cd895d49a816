//! Loose object database
//!
//! Every object lives in its own zlib-compressed file under
//! `objects/<first-2-hex>/<remaining-38-hex>`. The file holds the serialized
//! object, `<type> <size>\0<content>`, so the path is derived from the
//! content alone and writing the same object twice is a no-op.

use crate::artifacts::database::compression;
use crate::artifacts::database::error::{StoreError, StoreResult};
use crate::artifacts::objects::object::{Object, RawObject, compute_id};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn compute_id(object_type: ObjectType, content: &[u8]) -> ObjectId {
        compute_id(object_type, content)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store a payload of the given type and return its ID
    pub fn put(&self, object_type: ObjectType, content: impl Into<Bytes>) -> StoreResult<ObjectId> {
        self.store(&RawObject::new(object_type, content.into()))
    }

    pub fn store(&self, object: &impl Object) -> StoreResult<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.path.join(object_id.to_path());

        // content addressing: an existing file already holds these exact bytes
        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, &object.serialize())?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn get(&self, object_id: &ObjectId) -> StoreResult<RawObject> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::ObjectNotFound(object_id.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let object_content = compression::decompress(&compressed)
            .map_err(|e| StoreError::Decode(format!("unable to inflate {object_id}: {e}")))?;

        Self::parse_object(Bytes::from(object_content))
    }

    /// Split `<type> <size>\0<content>` into its parts
    fn parse_object(object_content: Bytes) -> StoreResult<RawObject> {
        let nul = object_content
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| StoreError::Decode("object header is not NUL-terminated".into()))?;

        let header = std::str::from_utf8(&object_content[..nul])
            .map_err(|e| StoreError::Decode(format!("object header is not UTF-8: {e}")))?;
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| StoreError::Decode(format!("malformed object header {header:?}")))?;

        let object_type =
            ObjectType::try_from(object_type).map_err(|e| StoreError::Decode(e.to_string()))?;
        let size = size
            .parse::<usize>()
            .map_err(|e| StoreError::Decode(format!("invalid object size {size:?}: {e}")))?;

        let content = object_content.slice(nul + 1..);
        if content.len() != size {
            return Err(StoreError::Decode(format!(
                "object header declares {size} bytes but {} follow",
                content.len()
            )));
        }

        Ok(RawObject::new(object_type, content))
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> StoreResult<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid object path {}", object_path.display()),
            )
        })?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let compressed = compression::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;

        let written = file.write_all(&compressed);
        drop(file);

        // rename the temp file to the object file to make it atomic
        let written = written.and_then(|_| std::fs::rename(&temp_object_path, object_path));

        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&temp_object_path) {
                tracing::warn!(
                    path = %temp_object_path.display(),
                    error = %cleanup,
                    "unable to remove temporary object file"
                );
            }
            return Err(e.into());
        }

        Ok(())
    }

    fn generate_temp_name() -> PathBuf {
        PathBuf::from(format!("tmp-obj-{}", rand::random::<u32>()))
    }
}
