//! Report line rendering

use crate::compare::attributes::AttributeDiff;
use crate::tree::EntryType;

/// `only in <label>: <type> <relative-path>`
pub fn render_only_in(label: &str, kind: EntryType, relative: &str) -> String {
    format!("only in {}: {} {}\n", label, kind, relative)
}

/// A differs header followed by one aligned line per tree
///
/// Labels are right-aligned to the longer label, and each left/right value
/// pair is right-justified to the wider of the two.
pub fn render_differs(
    kind: EntryType,
    relative: &str,
    left_label: &str,
    right_label: &str,
    diffs: &[AttributeDiff],
) -> String {
    let label_width = left_label.chars().count().max(right_label.chars().count());

    let mut left_cells = Vec::with_capacity(diffs.len());
    let mut right_cells = Vec::with_capacity(diffs.len());
    for diff in diffs {
        let width = diff.left.chars().count().max(diff.right.chars().count());
        left_cells.push(format!("{:>width$}", diff.left, width = width));
        right_cells.push(format!("{:>width$}", diff.right, width = width));
    }

    format!(
        "{} {} differs\n{:>lw$}: {}\n{:>lw$}: {}\n",
        kind,
        relative,
        left_label,
        left_cells.join(", "),
        right_label,
        right_cells.join(", "),
        lw = label_width,
    )
}
