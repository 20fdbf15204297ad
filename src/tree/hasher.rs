//! Content hashing for regular files using BLAKE3

use crate::error::CompareError;
use blake3::Hasher;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// BLAKE3 digest of a file's content
pub type Hash = [u8; 32];

/// Read buffer size for content hashing
const CHUNK_SIZE: usize = 1024 * 1024;

/// Compute the content hash of the file at `path`
///
/// The file is streamed through the hasher in fixed-size chunks, so memory use
/// does not grow with file size.
pub fn hash_file(path: &Path) -> Result<Hash, CompareError> {
    let content_error = |source| CompareError::Content {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(content_error)?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(content_error(e)),
        };
        hasher.update(&buffer[..read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Compute content hash for in-memory bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}
