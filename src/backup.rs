//! Backup-tool exclusion checks.
//!
//! When enabled, an entry present on only one side is not reported if the
//! backup tool excludes it. The check shells out to a command (by default
//! `tmutil isexcluded <path>`) and looks for a marker at the start of its
//! output.

use crate::config::BackupCheckConfig;
use crate::error::CompareError;
use std::path::Path;
use std::process::Command;
use tracing::trace;

/// Answers whether a backup tool excludes a path
pub trait BackupExclusion {
    fn is_excluded(&self, path: &Path) -> Result<bool, CompareError>;
}

/// Exclusion check backed by an external command
#[derive(Debug, Clone)]
pub struct CommandExclusion {
    program: String,
    args: Vec<String>,
    excluded_marker: String,
}

impl CommandExclusion {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        excluded_marker: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            excluded_marker: excluded_marker.into(),
        }
    }

    pub fn from_config(config: &BackupCheckConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            config.excluded_marker.clone(),
        )
    }
}

impl BackupExclusion for CommandExclusion {
    fn is_excluded(&self, path: &Path) -> Result<bool, CompareError> {
        let check_error = |message: String| CompareError::ExclusionCheck {
            path: path.to_path_buf(),
            message,
        };

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| check_error(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(check_error(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let excluded = is_marked_excluded(&stdout, &self.excluded_marker);
        trace!(path = ?path, excluded, "Backup exclusion check");
        Ok(excluded)
    }
}

fn is_marked_excluded(output: &str, marker: &str) -> bool {
    output.trim_start().starts_with(marker)
}
