//! Error types for hauler-fetch.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("object not found: {id}")]
    NotFound { id: String },

    #[error("access denied for object {id}")]
    PermissionDenied { id: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("server error (status {status})")]
    Server { status: u16 },

    #[error("request rejected (status {status})")]
    Rejected { status: u16 },

    #[error("file I/O error: {0}")]
    Filesystem(#[from] io::Error),

    #[error("invalid object metadata: {0}")]
    InvalidMetadata(String),
}

impl FetchError {
    /// Whether retrying the same operation unchanged could succeed.
    ///
    /// The engine's retry budget applies only to transient failures;
    /// everything else aborts the transfer immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Server { .. })
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
