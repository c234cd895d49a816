//! Git data structures and algorithms
//!
//! - `database`: compression and store errors
//! - `objects`: object IDs, types and the tree and commit encodings
//! - `pack`: the pack file decoder
//! - `transport`: ref discovery and pack download over smart HTTP

pub mod database;
pub mod objects;
pub mod pack;
pub mod transport;
