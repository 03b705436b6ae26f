use std::io;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid expected digest: {0}")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
