//! Recursive merge walk over two trees

use crate::backup::BackupExclusion;
use crate::compare::attributes::compare_entries;
use crate::compare::report::{render_differs, render_only_in};
use crate::error::CompareError;
use crate::exclude::ExclusionRules;
use crate::tree::lister::list_children;
use crate::tree::{Entry, Location, Tree};
use std::cmp::Ordering;
use std::io::Write;
use tracing::debug;

/// Counts of reported differences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub only_left: usize,
    pub only_right: usize,
    pub differing: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.only_left + self.only_right + self.differing
    }

    pub fn has_differences(&self) -> bool {
        self.total() > 0
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// A configured comparison of two trees
pub struct TreeComparison<'a> {
    left: &'a Tree,
    right: &'a Tree,
    rules: &'a ExclusionRules,
    ignore_mtime_only: bool,
    backup_check: Option<&'a dyn BackupExclusion>,
}

impl<'a> TreeComparison<'a> {
    pub fn new(left: &'a Tree, right: &'a Tree, rules: &'a ExclusionRules) -> Self {
        Self {
            left,
            right,
            rules,
            ignore_mtime_only: false,
            backup_check: None,
        }
    }

    /// Suppress differences consisting of nothing but a modification time
    pub fn ignore_mtime_only(mut self, ignore: bool) -> Self {
        self.ignore_mtime_only = ignore;
        self
    }

    /// Skip "only in" reports for paths the backup tool excludes
    pub fn skip_backup_excluded(mut self, check: &'a dyn BackupExclusion) -> Self {
        self.backup_check = Some(check);
        self
    }

    /// Compare both trees from their roots, writing report lines to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Summary, CompareError> {
        let mut summary = Summary::default();
        self.compare_directory(
            &self.left.root_location(),
            &self.right.root_location(),
            out,
            &mut summary,
        )?;
        out.flush()?;

        debug!(
            only_left = summary.only_left,
            only_right = summary.only_right,
            differing = summary.differing,
            "Comparison finished"
        );
        Ok(summary)
    }

    fn compare_directory<W: Write>(
        &self,
        left_dir: &Location,
        right_dir: &Location,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<(), CompareError> {
        debug!(path = %left_dir.relative, "Comparing directory");

        for (left, right) in self.merge_level(left_dir, right_dir, out, summary)? {
            self.compare_directory(&left, &right, out, summary)?;
        }

        Ok(())
    }

    /// Merge one level of both trees, returning the directory pairs to descend into
    fn merge_level<W: Write>(
        &self,
        left_dir: &Location,
        right_dir: &Location,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<Vec<(Location, Location)>, CompareError> {
        let left_children = list_children(self.left, left_dir, self.rules)?;
        let right_children = list_children(self.right, right_dir, self.rules)?;

        let mut subdirectories = Vec::new();
        let (mut i, mut j) = (0, 0);

        loop {
            let order = match (left_children.get(i), right_children.get(j)) {
                (Some(l), Some(r)) => l.key().cmp(r.key()),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };

            match order {
                Ordering::Less => {
                    self.report_missing(&left_children[i], Side::Left, out, summary)?;
                    i += 1;
                }
                Ordering::Greater => {
                    self.report_missing(&right_children[j], Side::Right, out, summary)?;
                    j += 1;
                }
                Ordering::Equal => {
                    let (left, right) = (&left_children[i], &right_children[j]);
                    self.report_pair(left, right, out, summary)?;
                    if left.is_dir() && right.is_dir() {
                        subdirectories.push((left.location().clone(), right.location().clone()));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        Ok(subdirectories)
    }

    fn report_missing<W: Write>(
        &self,
        entry: &Entry<'_>,
        side: Side,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<(), CompareError> {
        if let Some(check) = self.backup_check {
            if check.is_excluded(entry.path())? {
                debug!(path = %entry.relative(), "Excluded from backup, not reported");
                return Ok(());
            }
        }

        out.write_all(
            render_only_in(entry.tree().label(), entry.entry_type(), entry.relative()).as_bytes(),
        )?;
        match side {
            Side::Left => summary.only_left += 1,
            Side::Right => summary.only_right += 1,
        }
        Ok(())
    }

    fn report_pair<W: Write>(
        &self,
        left: &Entry<'_>,
        right: &Entry<'_>,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<(), CompareError> {
        let diffs = compare_entries(left, right, self.ignore_mtime_only)?;
        if diffs.is_empty() {
            return Ok(());
        }

        out.write_all(
            render_differs(
                left.entry_type(),
                left.relative(),
                self.left.label(),
                self.right.label(),
                &diffs,
            )
            .as_bytes(),
        )?;
        summary.differing += 1;
        Ok(())
    }
}
