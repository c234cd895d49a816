use crate::artifacts::objects::object_id::ObjectId;

/// Errors from object store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No loose object file exists for the requested ID.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The stored bytes could not be inflated or carry a malformed header.
    #[error("unable to decode object: {0}")]
    Decode(String),

    /// I/O error from the file system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
