//! Error types for the tree comparison engine and its CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking and comparing two trees.
///
/// Every variant is fatal: the walk stops at the first one and the error is
/// returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Failed to read metadata for {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read content of {path:?}: {source}")]
    Content {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read link target of {path:?}: {source}")]
    LinkTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path:?}: {message}")]
    ReadDir { path: PathBuf, message: String },

    #[error("Exclusion check failed for {path:?}: {message}")]
    ExclusionCheck { path: PathBuf, message: String },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors raised while loading exclusion rules
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Failed to read exclusion rules from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unknown entry type '{kind}'")]
    UnknownType { line: usize, kind: String },

    #[error("line {line}: missing pattern after '{kind}'")]
    MissingPattern { line: usize, kind: String },

    #[error("line {line}: invalid pattern: {source}")]
    InvalidPattern {
        line: usize,
        #[source]
        source: regex::Error,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Top-level error surfaced by the binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("Invalid exclusion rules: {0}")]
    Rules(#[from] RuleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
