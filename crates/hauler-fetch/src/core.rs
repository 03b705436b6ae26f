//! Core layer: pure transformations shared by the transfer effects.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delay before transient-failure retry number `retry` (1-based).
///
/// Doubles per retry from `base` and never exceeds `cap`, so consecutive
/// failures produce non-decreasing, bounded waits.
pub fn retry_delay(retry: u32, base: Duration, cap: Duration) -> Duration {
    let factor = 2u64.saturating_pow(retry.min(32)).min(u64::from(u32::MAX)) as u32;
    base.saturating_mul(factor).min(cap)
}

/// Temp artifact path for an in-flight transfer: `{dest_dir}/{id}.part`.
///
/// Derived from the object ID alone so a restarted process rediscovers an
/// in-flight transfer without external bookkeeping.
pub fn part_path(dest_dir: &Path, id: &str) -> PathBuf {
    dest_dir.join(format!("{id}.part"))
}

/// Final artifact path: `{dest_dir}/{name}`.
pub fn final_path(dest_dir: &Path, name: &str) -> PathBuf {
    dest_dir.join(name)
}

/// Bytes to request for the next chunk: the configured chunk size,
/// bounded by what remains of the object past `confirmed`.
pub fn bounded_chunk_len(confirmed: u64, size: u64, chunk_size: u64) -> u64 {
    size.saturating_sub(confirmed).min(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_doubles_and_caps() {
        let base = Duration::from_secs(1);
        let cap = Duration::from_secs(60);

        assert_eq!(retry_delay(1, base, cap), Duration::from_secs(2));
        assert_eq!(retry_delay(2, base, cap), Duration::from_secs(4));
        assert_eq!(retry_delay(5, base, cap), Duration::from_secs(32));
        assert_eq!(retry_delay(6, base, cap), Duration::from_secs(60));
        assert_eq!(retry_delay(100, base, cap), Duration::from_secs(60));
    }

    #[test]
    fn retry_delay_is_non_decreasing() {
        let base = Duration::from_millis(100);
        let cap = Duration::from_secs(60);
        let mut previous = Duration::ZERO;
        for retry in 1..=64 {
            let delay = retry_delay(retry, base, cap);
            assert!(delay >= previous);
            assert!(delay <= cap);
            previous = delay;
        }
    }

    #[test]
    fn part_path_is_derived_from_id() {
        let path = part_path(Path::new("/downloads"), "abc123");
        assert_eq!(path, PathBuf::from("/downloads/abc123.part"));
    }

    #[test]
    fn chunk_len_is_bounded_by_remaining() {
        assert_eq!(bounded_chunk_len(0, 10_000, 4_096), 4_096);
        assert_eq!(bounded_chunk_len(8_192, 10_000, 4_096), 1_808);
        assert_eq!(bounded_chunk_len(10_000, 10_000, 4_096), 0);
        assert_eq!(bounded_chunk_len(0, 0, 4_096), 0);
    }
}
