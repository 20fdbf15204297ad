//! treecmp: Directory Tree Comparison
//!
//! Compares two directory trees entry by entry, including ownership, mode,
//! modification time, size and content, without following symbolic links.
//! The main use is checking that a backup mirrors its source.

pub mod backup;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod tree;
