//! Directory listing for one level of a tree

use crate::error::CompareError;
use crate::exclude::ExclusionRules;
use crate::tree::entry::{Entry, EntryType};
use crate::tree::path::Location;
use crate::tree::Tree;
use std::os::unix::fs::MetadataExt;
use tracing::debug;
use walkdir::WalkDir;

/// List the immediate children of `directory` in `tree`
///
/// Children are read without following symlinks, filtered through `rules`,
/// and sorted by their location key. Excluded children are dropped before
/// anything beyond their metadata is read.
pub fn list_children<'t>(
    tree: &'t Tree,
    directory: &Location,
    rules: &ExclusionRules,
) -> Result<Vec<Entry<'t>>, CompareError> {
    let walker = WalkDir::new(&directory.absolute)
        .follow_links(false)
        .min_depth(1)
        .max_depth(1);

    let mut entries = Vec::new();

    for dir_entry in walker {
        let dir_entry = dir_entry.map_err(|e| CompareError::ReadDir {
            path: directory.absolute.clone(),
            message: e.to_string(),
        })?;

        let location = directory.child(dir_entry.file_name());
        let metadata = dir_entry.metadata().map_err(|e| CompareError::Metadata {
            path: location.absolute.clone(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walkdir metadata error")),
        })?;

        let kind = EntryType::from_mode(metadata.mode());
        if rules.is_excluded(kind, &location.relative) {
            debug!(
                tree = %tree.label(),
                path = %location.relative,
                kind = %kind,
                "Excluded by rule"
            );
            continue;
        }

        entries.push(Entry::from_metadata(tree, location, &metadata)?);
    }

    entries.sort_by(|a, b| a.key().cmp(b.key()));

    Ok(entries)
}
