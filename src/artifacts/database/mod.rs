pub mod compression;
pub mod error;
