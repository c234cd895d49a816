use crate::artifacts::database::error::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("invalid pack signature: expected \"PACK\", got {0:?}")]
    InvalidPackSignature(Vec<u8>),

    #[error("unsupported pack version: {0}")]
    UnsupportedPackVersion(u32),

    #[error("unsupported object type {type_code} at offset {offset}")]
    UnsupportedObjectType { type_code: u8, offset: usize },

    #[error("corrupt pack entry at offset {offset}: {reason}")]
    Decode { offset: usize, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type PackResult<T> = Result<T, PackError>;
