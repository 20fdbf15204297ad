//! Shared test utilities for integration tests
//!
//! Builds pairs of temporary trees and pins every modification time so that
//! trees created a few moments apart still compare equal.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;
use treecmp::compare::{Summary, TreeComparison};
use treecmp::exclude::ExclusionRules;
use treecmp::tree::Tree;
use walkdir::WalkDir;

/// Modification time applied to every entry by [`TreePair::freeze`]
pub const FIXED_MTIME: i64 = 1_600_000_000;

/// Two temporary trees labelled `A` and `B`
pub struct TreePair {
    pub left: TempDir,
    pub right: TempDir,
}

impl TreePair {
    pub fn new() -> Self {
        Self {
            left: TempDir::new().unwrap(),
            right: TempDir::new().unwrap(),
        }
    }

    pub fn left_path(&self) -> &Path {
        self.left.path()
    }

    pub fn right_path(&self) -> &Path {
        self.right.path()
    }

    /// Write the same file into both trees
    pub fn write_both(&self, relative: &str, content: &str) {
        write_file(self.left_path(), relative, content);
        write_file(self.right_path(), relative, content);
    }

    /// Pin the mtime of every non-symlink entry in both trees
    pub fn freeze(&self) {
        freeze_mtimes(self.left_path(), FIXED_MTIME);
        freeze_mtimes(self.right_path(), FIXED_MTIME);
    }

    pub fn trees(&self) -> (Tree, Tree) {
        (
            Tree::new("A", self.left_path()),
            Tree::new("B", self.right_path()),
        )
    }
}

/// Write a file, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Set the modification time of a file or directory
pub fn set_mtime(path: &Path, seconds: i64) {
    let time = UNIX_EPOCH + Duration::from_secs(seconds as u64);
    File::open(path).unwrap().set_modified(time).unwrap();
}

/// Pin mtimes bottom-up so parent directories are not touched afterwards
pub fn freeze_mtimes(root: &Path, seconds: i64) {
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry.unwrap();
        if entry.path_is_symlink() {
            continue;
        }
        set_mtime(entry.path(), seconds);
    }
}

/// Run a comparison and return the report text and summary
pub fn compare_with(comparison: &TreeComparison<'_>) -> (String, Summary) {
    let mut out = Vec::new();
    let summary = comparison.run(&mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

/// Compare two trees with default options
pub fn compare(left: &Tree, right: &Tree, rules: &ExclusionRules) -> String {
    compare_with(&TreeComparison::new(left, right, rules)).0
}
