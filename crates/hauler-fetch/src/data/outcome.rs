use std::path::PathBuf;

use crate::error::FetchError;

/// Terminal result of one transfer.
///
/// Every invocation of [`Orchestrator::transfer`](crate::Orchestrator::transfer)
/// ends in exactly one of these variants; the orchestrator never panics
/// and never leaves the caller with only a log line.
#[derive(Debug)]
pub enum Outcome {
    /// The artifact was transferred, promoted, and (if requested) verified.
    Success(PathBuf),

    /// The final artifact already existed; no chunk was fetched.
    AlreadyComplete(PathBuf),

    /// Transient failures exhausted the retry budget. The temp artifact
    /// holds a valid prefix; re-invoking the same transfer resumes from it.
    RetriesExhausted { temp_path: PathBuf, attempts: u32 },

    /// The artifact digest did not match the expected value. The file is
    /// left in place for inspection, never deleted automatically.
    IntegrityMismatch(PathBuf),

    /// A fatal, non-resumable failure.
    Failed(FetchError),
}

impl Outcome {
    /// Returns `true` when the final artifact is in place.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Success(_) | Outcome::AlreadyComplete(_))
    }

    /// Final artifact path for complete outcomes.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Outcome::Success(path) | Outcome::AlreadyComplete(path) => Some(path),
            _ => None,
        }
    }
}
