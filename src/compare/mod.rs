//! Tree comparison
//!
//! The walker merges the sorted child lists of both trees one directory level
//! at a time, reports entries found on one side only, compares attributes of
//! paired entries, and then descends into paired directories in path order.

pub mod attributes;
pub mod report;
pub mod walker;

pub use attributes::{compare_entries, Attribute, AttributeDiff};
pub use walker::{Summary, TreeComparison};
