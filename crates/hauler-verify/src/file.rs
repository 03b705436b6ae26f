use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, VerifyError};
use crate::hasher::{Hasher, Sha256Hasher};

/// Outcome of a verification pass over an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The artifact digest matched the expected value.
    Verified,
    /// No digest was claimed, so nothing could be checked. Callers must
    /// report this as "unverified", not as a confirmed match.
    Unverified,
}

const MIN_CHUNK: usize = 64 * 1024;
const MAX_CHUNK: usize = 8 * 1024 * 1024;

/// Read chunk size proportional to file length, clamped to
/// [64 KiB, 8 MiB]. Larger artifacts get larger reads to bound syscall
/// count without unbounded memory use.
pub fn scaled_chunk_size(file_len: u64) -> usize {
    usize::try_from(file_len / 1024)
        .unwrap_or(MAX_CHUNK)
        .clamp(MIN_CHUNK, MAX_CHUNK)
}

/// Compute the SHA-256 digest of a file, streaming in bounded chunks.
pub fn digest_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut buf = vec![0u8; scaled_chunk_size(len)];
    let mut hasher = Sha256Hasher::new();
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

/// Verify a file against an expected hex digest (case-insensitive).
///
/// An empty or absent expected digest yields [`Verification::Unverified`]:
/// there is no claim to check, which is not the same as a confirmed match.
/// A mismatch is an error carrying both digests; the file itself is never
/// touched.
pub fn verify_file(path: &Path, expected_hex: Option<&str>) -> Result<Verification> {
    let Some(expected_hex) = expected_hex.filter(|s| !s.is_empty()) else {
        return Ok(Verification::Unverified);
    };
    let expected = hex::decode(expected_hex.to_ascii_lowercase())
        .map_err(|_| VerifyError::InvalidDigest(expected_hex.to_string()))?;
    let actual = digest_file(path)?;
    if actual == expected {
        Ok(Verification::Verified)
    } else {
        Err(VerifyError::Mismatch {
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn write_fixture(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artifact");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn digest_file_matches_one_shot() {
        let (_dir, path) = write_fixture(b"hello world");
        assert_eq!(digest_file(&path).unwrap(), Sha256Hasher::digest(b"hello world"));
    }

    #[test]
    fn verify_file_accepts_matching_digest() {
        let (_dir, path) = write_fixture(b"hello world");
        let result = verify_file(&path, Some(HELLO_SHA256)).unwrap();
        assert_eq!(result, Verification::Verified);
    }

    #[test]
    fn verify_file_is_case_insensitive() {
        let (_dir, path) = write_fixture(b"hello world");
        let upper = HELLO_SHA256.to_ascii_uppercase();
        assert_eq!(verify_file(&path, Some(&upper)).unwrap(), Verification::Verified);
    }

    #[test]
    fn verify_file_rejects_wrong_digest() {
        let (_dir, path) = write_fixture(b"hello world");
        let wrong = "0".repeat(64);
        let err = verify_file(&path, Some(&wrong)).unwrap_err();
        assert!(matches!(err, VerifyError::Mismatch { .. }));
        // The artifact must survive a failed verification.
        assert!(path.exists());
    }

    #[test]
    fn absent_digest_is_unverified() {
        let (_dir, path) = write_fixture(b"hello world");
        assert_eq!(verify_file(&path, None).unwrap(), Verification::Unverified);
        assert_eq!(verify_file(&path, Some("")).unwrap(), Verification::Unverified);
    }

    #[test]
    fn malformed_digest_is_an_error() {
        let (_dir, path) = write_fixture(b"hello world");
        let err = verify_file(&path, Some("not-hex")).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidDigest(_)));
    }

    #[test]
    fn chunk_size_scales_with_length() {
        assert_eq!(scaled_chunk_size(0), MIN_CHUNK);
        assert_eq!(scaled_chunk_size(1024 * 1024), MIN_CHUNK);
        assert!(scaled_chunk_size(1024 * 1024 * 1024) > MIN_CHUNK);
        assert_eq!(scaled_chunk_size(u64::MAX), MAX_CHUNK);
    }
}
