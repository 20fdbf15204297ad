//! CLI route: turns parsed arguments and loaded configuration into a comparison run.

use crate::backup::CommandExclusion;
use crate::cli::parse::Cli;
use crate::compare::{Summary, TreeComparison};
use crate::config::{ConfigLoader, TreecmpConfig};
use crate::error::CliError;
use crate::exclude::ExclusionRules;
use crate::tree::Tree;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: the merged configuration.
pub struct RunContext {
    config: TreecmpConfig,
}

impl RunContext {
    pub fn new(config: TreecmpConfig) -> Self {
        Self { config }
    }

    /// Load configuration from an explicit file, or from the default locations.
    pub fn load(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &TreecmpConfig {
        &self.config
    }

    /// Run the comparison and write the report to stdout.
    pub fn execute(&self, cli: &Cli) -> Result<Summary, CliError> {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        self.execute_to(cli, &mut out)
    }

    /// Run the comparison and write the report to `out`.
    pub fn execute_to<W: Write>(&self, cli: &Cli, out: &mut W) -> Result<Summary, CliError> {
        let left = build_tree(&cli.left, cli.left_label.as_deref(), cli.left_threshold)?;
        let right = build_tree(&cli.right, cli.right_label.as_deref(), cli.right_threshold)?;

        let exclude_file = cli
            .exclude_file
            .as_ref()
            .or(self.config.compare.exclude_file.as_ref());
        let rules = match exclude_file {
            Some(path) => ExclusionRules::load(path)?,
            None => ExclusionRules::default(),
        };

        let ignore_mtime = cli.ignore_mtime || self.config.compare.ignore_mtime;
        let skip_excluded = cli.skip_excluded || self.config.compare.skip_backup_excluded;
        let backup_check = CommandExclusion::from_config(&self.config.backup_check);

        info!(
            left = %left.root().display(),
            right = %right.root().display(),
            rules = rules.len(),
            ignore_mtime,
            skip_excluded,
            "Comparing trees"
        );

        let mut comparison = TreeComparison::new(&left, &right, &rules).ignore_mtime_only(ignore_mtime);
        if skip_excluded {
            comparison = comparison.skip_backup_excluded(&backup_check);
        }

        let summary = comparison.run(out)?;
        info!(differences = summary.total(), "Comparison complete");
        Ok(summary)
    }
}

/// Build a tree descriptor with an absolute root
fn build_tree(path: &Path, label: Option<&str>, threshold: Option<i64>) -> Result<Tree, CliError> {
    let root: PathBuf = dunce::canonicalize(path).map_err(|e| {
        CliError::InvalidArgument(format!("cannot access {}: {}", path.display(), e))
    })?;
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let label = label
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    debug!(label = %label, root = %root.display(), threshold, "Resolved tree");

    Ok(Tree::new(label, root).with_mtime_threshold(threshold))
}
