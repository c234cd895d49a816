//! Porcelain commands (user-facing operations)
//!
//! - `init`: create the repository layout
//! - `clone`: fetch a remote repository over smart HTTP

pub mod clone;
pub mod init;
