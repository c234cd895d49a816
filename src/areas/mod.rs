//! Repository areas
//!
//! - `database`: loose object store under `.git/objects`
//! - `refs`: HEAD and the files under `.git/refs`
//! - `repository`: ties the areas together for the commands
//! - `workspace`: the working directory and its snapshots

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
