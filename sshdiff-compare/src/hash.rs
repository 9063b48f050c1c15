//! Local SHA-1 content hashing, byte-for-byte compatible with `sha1sum`.

use std::fs::File;
use std::io;
use std::path::Path;

use sha1::{Digest, Sha1};

use sshdiff_core::ContentHash;

use crate::error::{io_err, CompareError};

/// Hash a file's full contents without loading it into memory.
pub fn hash_file(path: &Path) -> Result<ContentHash, CompareError> {
    let mut file = File::open(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha1::new();
    io::copy(&mut file, &mut hasher).map_err(|e| io_err(path, e))?;
    Ok(finish(hasher))
}

/// Hash an in-memory buffer.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    finish(hasher)
}

fn finish(hasher: Sha1) -> ContentHash {
    let hex = hex::encode(hasher.finalize());
    // hex::encode always yields 40 lowercase digits for a SHA-1 digest.
    ContentHash::parse(&hex).unwrap_or_else(|| unreachable!("sha1 hex digest is 40 chars"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(
            hash_bytes(b"").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn file_hash_equals_buffer_hash() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hello.txt");
        std::fs::write(&path, b"hello world\n").unwrap();
        let digest = hash_file(&path).unwrap();
        assert_eq!(digest, hash_bytes(b"hello world\n"));
        assert_eq!(digest.as_str(), "22596363b3de40b06f981fb85d82312e8c0ed511");
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.txt");
        let err = hash_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
