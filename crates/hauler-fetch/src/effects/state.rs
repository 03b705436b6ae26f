//! On-disk transfer state for resumable downloads.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Tracks bytes durably appended to the temp artifact.
///
/// `confirmed` is derived from the file's on-disk length, never from
/// in-memory bookkeeping, so it survives process restarts. Between chunk
/// commits the temp file length always equals `confirmed`; a chunk only
/// counts once its bytes have been written and synced.
pub struct TransferState {
    temp_path: PathBuf,
    file: File,
    confirmed: u64,
}

impl TransferState {
    /// Open (or create) the temp artifact and derive the resume offset
    /// from its current length.
    ///
    /// A temp file longer than `declared_size` cannot be a valid prefix
    /// of the object; it is truncated and the transfer restarts from
    /// offset zero.
    pub async fn open(temp_path: &Path, declared_size: u64) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(temp_path)
            .await?;
        let mut confirmed = file.metadata().await?.len();
        if confirmed > declared_size {
            file.set_len(0).await?;
            file.sync_data().await?;
            confirmed = 0;
        }
        Ok(Self {
            temp_path: temp_path.to_path_buf(),
            file,
            confirmed,
        })
    }

    /// Number of bytes durably persisted; the sole resume checkpoint.
    pub fn confirmed(&self) -> u64 {
        self.confirmed
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Durably append one chunk and advance the confirmed offset.
    ///
    /// The offset only moves after the bytes have reached the file and
    /// been synced, so a crash mid-write leaves the resume offset
    /// consistent with on-disk length.
    pub async fn commit(&mut self, bytes: &[u8]) -> Result<u64> {
        self.file.write_all(bytes).await?;
        self.file.sync_data().await?;
        self.confirmed += bytes.len() as u64;
        Ok(self.confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn fresh_state_starts_at_zero() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("obj.part");
        let state = TransferState::open(&temp, 100).await.unwrap();
        assert_eq!(state.confirmed(), 0);
        assert!(temp.exists());
    }

    #[tokio::test]
    async fn commit_advances_offset_and_disk_length() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("obj.part");
        let mut state = TransferState::open(&temp, 100).await.unwrap();

        assert_eq!(state.commit(b"hello").await.unwrap(), 5);
        assert_eq!(state.commit(b" world").await.unwrap(), 11);

        assert_eq!(state.confirmed(), 11);
        assert_eq!(std::fs::metadata(&temp).unwrap().len(), 11);
        assert_eq!(std::fs::read(&temp).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn reopen_resumes_from_disk_length() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("obj.part");
        std::fs::write(&temp, b"partial content").unwrap();

        let state = TransferState::open(&temp, 100).await.unwrap();
        assert_eq!(state.confirmed(), 15);
        // The existing prefix is untouched.
        assert_eq!(std::fs::read(&temp).unwrap(), b"partial content");
    }

    #[tokio::test]
    async fn oversized_temp_is_truncated() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("obj.part");
        std::fs::write(&temp, vec![0u8; 64]).unwrap();

        let state = TransferState::open(&temp, 10).await.unwrap();
        assert_eq!(state.confirmed(), 0);
        assert_eq!(std::fs::metadata(&temp).unwrap().len(), 0);
    }
}
