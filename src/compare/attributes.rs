//! Attribute comparison for two entries at the same relative path
//!
//! Attributes are compared in a fixed order: type, uid, gid, then either the
//! link target (symlinks) or mode and mtime (everything else), then size and
//! checksum for regular files. A type mismatch stops the comparison.

use crate::error::CompareError;
use crate::tree::{Entry, EntryType};
use chrono::{DateTime, Local};
use std::fmt;
use tracing::debug;

/// A compared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Type,
    Uid,
    Gid,
    Target,
    Mode,
    Mtime,
    Size,
    Checksum,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Type => "type",
            Attribute::Uid => "uid",
            Attribute::Gid => "gid",
            Attribute::Target => "target",
            Attribute::Mode => "mode",
            Attribute::Mtime => "mtime",
            Attribute::Size => "size",
            Attribute::Checksum => "checksum",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One differing attribute, with the text shown for each side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDiff {
    pub attribute: Attribute,
    pub left: String,
    pub right: String,
}

impl AttributeDiff {
    /// A difference shown as `attr=value` on both sides
    pub fn valued(attribute: Attribute, left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self {
            attribute,
            left: format!("{}={}", attribute, left),
            right: format!("{}={}", attribute, right),
        }
    }

    /// A difference shown by attribute name only
    pub fn unvalued(attribute: Attribute) -> Self {
        Self {
            attribute,
            left: attribute.name().to_string(),
            right: attribute.name().to_string(),
        }
    }
}

/// Format an mtime as local time
pub fn format_mtime(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => seconds.to_string(),
    }
}

/// Compare two entries known to share a relative path
///
/// Returns the surviving differences after mtime suppression. Content hashes
/// are only computed when both files have the same size.
pub fn compare_entries(
    left: &Entry<'_>,
    right: &Entry<'_>,
    ignore_mtime_only: bool,
) -> Result<Vec<AttributeDiff>, CompareError> {
    let mut diffs = Vec::new();

    let kind = left.entry_type();
    if kind != right.entry_type() {
        diffs.push(AttributeDiff::valued(
            Attribute::Type,
            kind,
            right.entry_type(),
        ));
        return Ok(diffs);
    }

    if left.uid() != right.uid() {
        diffs.push(AttributeDiff::valued(Attribute::Uid, left.uid(), right.uid()));
    }
    if left.gid() != right.gid() {
        diffs.push(AttributeDiff::valued(Attribute::Gid, left.gid(), right.gid()));
    }

    if kind == EntryType::SymbolicLink {
        let left_target = left.target().unwrap_or_default();
        let right_target = right.target().unwrap_or_default();
        if left_target != right_target {
            diffs.push(AttributeDiff::valued(
                Attribute::Target,
                left_target,
                right_target,
            ));
        }
    } else {
        if left.permissions() != right.permissions() {
            diffs.push(AttributeDiff::valued(
                Attribute::Mode,
                left.mode_string(),
                right.mode_string(),
            ));
        }
        if left.mtime() != right.mtime() {
            diffs.push(AttributeDiff::valued(
                Attribute::Mtime,
                format_mtime(left.mtime()),
                format_mtime(right.mtime()),
            ));
        }
    }

    if kind == EntryType::File {
        let sizes_match = left.size() == right.size();
        if !sizes_match {
            diffs.push(AttributeDiff::valued(
                Attribute::Size,
                left.size().unwrap_or_default(),
                right.size().unwrap_or_default(),
            ));
        }
        // Different sizes cannot hash equal; skip reading either file.
        if !sizes_match || left.checksum()? != right.checksum()? {
            diffs.push(AttributeDiff::unvalued(Attribute::Checksum));
        }
    }

    if explained_by_mtime(&diffs, left, right, ignore_mtime_only) {
        debug!(
            path = %left.relative(),
            suppressed = diffs.len(),
            "Differences explained by modification time"
        );
        diffs.clear();
    }

    Ok(diffs)
}

/// Whether a leading mtime difference accounts for the whole diff list
///
/// Only fires when mtime is the first recorded difference, so type and
/// ownership mismatches are never hidden.
fn explained_by_mtime(
    diffs: &[AttributeDiff],
    left: &Entry<'_>,
    right: &Entry<'_>,
    ignore_mtime_only: bool,
) -> bool {
    match diffs.first() {
        Some(first) if first.attribute == Attribute::Mtime => {}
        _ => return false,
    }

    (ignore_mtime_only && diffs.len() == 1)
        || left.tree().modified_after_threshold(left.mtime())
        || right.tree().modified_after_threshold(right.mtime())
}
