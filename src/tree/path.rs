//! Relative path normalization and on-disk locations

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Normalize a relative path string for matching and ordering
///
/// Unicode is normalized to NFC (canonical composition, not NFKC), so a name
/// stored decomposed on one filesystem and precomposed on another compares
/// equal, while compatibility variants such as a no-break space stay distinct.
/// Trailing separators are removed.
pub fn normalize_path_string(path: &str) -> String {
    let mut result: String = path.nfc().collect();

    while result.ends_with('/') {
        result.pop();
    }

    result
}

/// Build the normalized relative path of a child named `name` under `parent`
pub fn child_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        normalize_path_string(name)
    } else {
        normalize_path_string(&format!("{}/{}", parent, name))
    }
}

/// Printable form of a file name that is not valid UTF-8
///
/// Valid runs are NFC-normalized and each invalid byte is written as `\xNN`.
pub fn escape_name(name: &[u8]) -> String {
    let mut escaped = String::new();
    for chunk in name.utf8_chunks() {
        escaped.extend(chunk.valid().nfc());
        for byte in chunk.invalid() {
            escaped.push_str(&format!("\\x{:02x}", byte));
        }
    }
    escaped
}

/// Where an object lives: the real on-disk path used for I/O, the
/// normalized relative path used for reports and rules, and the key used
/// for identity and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub absolute: PathBuf,
    pub relative: String,
    /// Relative path as bytes. UTF-8 names contribute their NFC form, any
    /// other name contributes its raw on-disk bytes.
    pub key: Vec<u8>,
}

impl Location {
    /// The root of a tree (empty relative path)
    pub fn root(root: &Path) -> Self {
        Self {
            absolute: root.to_path_buf(),
            relative: String::new(),
            key: Vec::new(),
        }
    }

    /// Location of a child entry, from its raw on-disk file name
    pub fn child(&self, file_name: &OsStr) -> Self {
        let (relative, name_key) = match file_name.to_str() {
            Some(name) => (
                child_relative(&self.relative, name),
                normalize_path_string(name).into_bytes(),
            ),
            None => (
                child_relative(&self.relative, &escape_name(file_name.as_bytes())),
                file_name.as_bytes().to_vec(),
            ),
        };

        let mut key = self.key.clone();
        if !key.is_empty() {
            key.push(b'/');
        }
        key.extend_from_slice(&name_key);

        Self {
            absolute: self.absolute.join(file_name),
            relative,
            key,
        }
    }
}
