//! Exclusion rules applied while listing directories.
//!
//! A rule pairs an entry type with a regular expression. An entry is excluded
//! when its type equals the rule's type and the pattern matches anywhere in
//! its normalized relative path. Excluded directories are never descended into.
//!
//! Rule files hold one rule per line, `<type> <pattern>`, where the pattern is
//! the rest of the line. Blank lines and lines starting with `#` are skipped.

use crate::error::RuleError;
use crate::tree::EntryType;
use regex::Regex;
use std::fs;
use std::path::Path;

/// A single (type, pattern) rule
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    kind: EntryType,
    pattern: Regex,
}

impl ExclusionRule {
    pub fn new(kind: EntryType, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn kind(&self) -> EntryType {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, kind: EntryType, relative: &str) -> bool {
        self.kind == kind && self.pattern.is_match(relative)
    }
}

/// The read-only rule list used for a whole run
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    /// Parse rules from text
    pub fn parse(contents: &str) -> Result<Self, RuleError> {
        let mut rules = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim_start();
            if line.trim_end().is_empty() || line.starts_with('#') {
                continue;
            }

            // Trailing whitespace belongs to the pattern; only line endings are stripped.
            let (kind_name, pattern) = match line.split_once(char::is_whitespace) {
                Some((kind, rest)) => (kind, rest.trim_start().trim_end_matches(['\r', '\n'])),
                None => (line.trim_end(), ""),
            };

            let kind = EntryType::from_rule_name(kind_name).ok_or_else(|| {
                RuleError::UnknownType {
                    line: line_number,
                    kind: kind_name.to_string(),
                }
            })?;

            if pattern.is_empty() {
                return Err(RuleError::MissingPattern {
                    line: line_number,
                    kind: kind_name.to_string(),
                });
            }

            let rule = ExclusionRule::new(kind, pattern).map_err(|e| RuleError::InvalidPattern {
                line: line_number,
                source: e,
            })?;
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Load rules from a file
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let contents = fs::read_to_string(path).map_err(|e| RuleError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn is_excluded(&self, kind: EntryType, relative: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(kind, relative))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
