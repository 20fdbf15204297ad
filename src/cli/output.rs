//! CLI output: error mapping and exit codes.

use crate::compare::Summary;
use crate::error::CliError;

/// No differences found
pub const EXIT_SAME: i32 = 0;
/// Differences were reported
pub const EXIT_DIFFERENT: i32 = 1;
/// The comparison could not be completed
pub const EXIT_TROUBLE: i32 = 2;

/// Map an error to the message printed on stderr.
pub fn map_error(e: &CliError) -> String {
    format!("treecmp: {}", e)
}

/// Exit status for a completed comparison.
pub fn exit_code(summary: &Summary) -> i32 {
    if summary.has_differences() {
        EXIT_DIFFERENT
    } else {
        EXIT_SAME
    }
}
