//! Directory trees and the entries within them
//!
//! A [`Tree`] describes one side of a comparison. Entries are read lazily as
//! the walk visits them and are dropped once their directory level is done.

pub mod entry;
pub mod hasher;
pub mod lister;
pub mod path;

pub use entry::{Entry, EntryKind, EntryType};
pub use path::Location;

use std::path::{Path, PathBuf};

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    label: String,
    root: PathBuf,
    mtime_threshold: Option<i64>,
}

impl Tree {
    pub fn new(label: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            root: root.into(),
            mtime_threshold: None,
        }
    }

    /// Entries of this tree modified strictly after `threshold` (Unix
    /// seconds) have their timestamp-led differences suppressed.
    pub fn with_mtime_threshold(mut self, threshold: Option<i64>) -> Self {
        self.mtime_threshold = threshold;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mtime_threshold(&self) -> Option<i64> {
        self.mtime_threshold
    }

    pub fn root_location(&self) -> Location {
        Location::root(&self.root)
    }

    /// True when `mtime` falls after this tree's threshold
    pub fn modified_after_threshold(&self, mtime: i64) -> bool {
        self.mtime_threshold
            .is_some_and(|threshold| mtime > threshold)
    }
}
