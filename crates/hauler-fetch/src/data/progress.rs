use super::options::TransferPhase;

/// Snapshot of a transfer, passed to progress callbacks at chunk
/// granularity and on phase transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Current phase of the transfer.
    pub phase: TransferPhase,

    /// Bytes durably written to the temp artifact so far. On resume this
    /// starts at the recovered offset, not at zero.
    pub bytes_transferred: u64,

    /// Declared size of the object.
    pub total_bytes: u64,

    /// Current consecutive transient-failure count (0 = healthy).
    pub retry_count: u32,
}

impl Progress {
    /// Percentage of completion.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            // Zero-size objects are complete the moment they finish.
            if self.is_completed() { 100.0 } else { 0.0 }
        } else {
            (self.bytes_transferred as f64 / self.total_bytes as f64) * 100.0
        }
    }

    /// Returns `true` if the transfer has completed successfully.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == TransferPhase::Completed
    }

    /// Returns `true` if a retry is in progress.
    #[must_use]
    pub fn is_retrying(&self) -> bool {
        self.retry_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_partial_transfer() {
        let progress = Progress {
            phase: TransferPhase::Downloading,
            bytes_transferred: 250,
            total_bytes: 1_000,
            retry_count: 0,
        };
        assert_eq!(progress.percentage(), 25.0);
        assert!(!progress.is_completed());
        assert!(!progress.is_retrying());
    }

    #[test]
    fn zero_size_object_percentage() {
        let mut progress = Progress {
            phase: TransferPhase::Downloading,
            bytes_transferred: 0,
            total_bytes: 0,
            retry_count: 0,
        };
        assert_eq!(progress.percentage(), 0.0);

        progress.phase = TransferPhase::Completed;
        assert_eq!(progress.percentage(), 100.0);
    }
}
