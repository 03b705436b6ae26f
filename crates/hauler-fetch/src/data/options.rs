use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::progress::Progress;

/// Phases of a transfer operation.
///
/// Transfers progress through these phases in order:
/// Starting → Downloading → Committing → Verifying → Completed
///
/// Retries stay in the Downloading phase with a raised retry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferPhase {
    /// Metadata resolved, transfer about to begin.
    #[default]
    Starting,

    /// Actively fetching chunks and appending them to the temp artifact.
    Downloading,

    /// Promoting the temp artifact to its final name.
    Committing,

    /// Streaming the final artifact through digest verification.
    Verifying,

    /// Terminal state for successful transfers.
    Completed,
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferPhase::Starting => write!(f, "Starting"),
            TransferPhase::Downloading => write!(f, "Downloading"),
            TransferPhase::Committing => write!(f, "Committing"),
            TransferPhase::Verifying => write!(f, "Verifying"),
            TransferPhase::Completed => write!(f, "Completed"),
        }
    }
}

/// Configuration for a transfer.
///
/// # Examples
///
/// ```
/// use hauler_fetch::TransferOptions;
/// use std::time::Duration;
///
/// let options = TransferOptions::default()
///     .max_retries(5)
///     .retry_backoff(Duration::from_secs(1))
///     .verify(true);
/// ```
#[derive(Clone)]
pub struct TransferOptions {
    /// Bytes requested per ranged read.
    ///
    /// Large enough to amortize per-request overhead, small enough to
    /// bound memory and the cost of a retried chunk.
    ///
    /// Default: 4 MiB
    pub chunk_size: u64,

    /// Maximum consecutive transient failures before giving up.
    ///
    /// The counter resets to zero after every durably-written chunk, so
    /// the budget bounds consecutive failures, not total failures.
    ///
    /// Default: 5
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries.
    ///
    /// The delay before retry N is `min(retry_backoff * 2^N, backoff_cap)`.
    ///
    /// Default: 1s
    pub retry_backoff: Duration,

    /// Ceiling for backoff delays.
    ///
    /// Default: 60s
    pub backoff_cap: Duration,

    /// Verify the artifact digest when the service claims one.
    ///
    /// Applies both to freshly transferred artifacts and to the
    /// already-complete short-circuit.
    ///
    /// Default: true
    pub verify: bool,

    /// Progress callback invoked after every committed chunk and at
    /// phase transitions.
    ///
    /// The callback is infallible and must not block; it can never fail
    /// or stall the transfer itself.
    ///
    /// Default: None
    pub on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferOptions")
            .field("chunk_size", &self.chunk_size)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("backoff_cap", &self.backoff_cap)
            .field("verify", &self.verify)
            .field("on_progress", &"{ ... }")
            .finish()
    }
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            chunk_size: 4 * 1024 * 1024,
            max_retries: 5,
            retry_backoff: Duration::from_secs(1),
            backoff_cap: Duration::from_secs(60),
            verify: true,
            on_progress: None,
        }
    }
}

impl TransferOptions {
    /// Set the bytes requested per ranged read.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the maximum number of consecutive transient retries.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base retry backoff duration.
    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Set the backoff ceiling.
    #[must_use]
    pub fn backoff_cap(mut self, backoff_cap: Duration) -> Self {
        self.backoff_cap = backoff_cap;
        self
    }

    /// Enable or disable digest verification.
    #[must_use]
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Set the progress callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use hauler_fetch::{TransferOptions, TransferPhase};
    /// use std::sync::Arc;
    ///
    /// let options = TransferOptions::default().on_progress(Arc::new(|progress| {
    ///     if progress.phase == TransferPhase::Downloading {
    ///         println!("{:.1}%", progress.percentage());
    ///     }
    /// }));
    /// ```
    #[must_use]
    pub fn on_progress(mut self, on_progress: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(on_progress);
        self
    }
}
