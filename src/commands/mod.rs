//! Command implementations
//!
//! Every command is a method on `Repository` writing its output to the
//! repository's writer.
//!
//! - `plumbing`: object level commands (cat-file, hash-object, write-tree, ...)
//! - `porcelain`: repository level commands (init, clone)

pub mod plumbing;
pub mod porcelain;
