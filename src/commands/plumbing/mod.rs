//! Plumbing commands (low-level object operations)
//!
//! - `cat-file`: print the payload of a stored object
//! - `hash-object`: compute a blob ID and optionally store it
//! - `write-tree`: snapshot the working directory into tree objects
//! - `ls-tree`: list the entries of a tree object
//! - `commit-tree`: wrap a tree into a commit object

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
