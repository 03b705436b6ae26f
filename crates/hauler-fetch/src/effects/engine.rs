//! The resumable fetch-and-persist loop.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::{bounded_chunk_len, retry_delay};
use crate::data::{Progress, RemoteObject, TransferOptions, TransferPhase};
use crate::effects::state::TransferState;
use crate::effects::store::RemoteStore;
use crate::error::{FetchError, Result};

/// How the engine loop ended. Fatal failures surface as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Every declared byte is on disk in the temp artifact.
    Complete,

    /// The retry budget ran out. The temp artifact holds a valid prefix
    /// and a later run can resume from it.
    RetriesExhausted { attempts: u32 },
}

/// Drives chunked fetch-and-persist with retry/backoff against one store.
///
/// One engine run is strictly sequential: one in-flight request, one
/// writer to the temp artifact. Backoff suspends only this task, so
/// independent transfers on other temp paths proceed unaffected.
pub struct TransferEngine<S> {
    store: S,
}

impl<S: RemoteStore> TransferEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch `object` into `temp_path`, resuming from whatever valid
    /// prefix is already there.
    ///
    /// Returns [`EngineStatus::Complete`] only when the confirmed offset
    /// equals the declared size. On retry exhaustion the temp artifact is
    /// preserved for a future resume. Fatal errors abort immediately
    /// without consuming retry budget.
    pub async fn run(
        &self,
        object: &RemoteObject,
        temp_path: &Path,
        options: &TransferOptions,
    ) -> Result<EngineStatus> {
        let mut state = TransferState::open(temp_path, object.size).await?;
        let mut retries = 0u32;

        if state.confirmed() > 0 {
            info!(id = %object.id, offset = state.confirmed(), "resuming transfer");
        }
        self.report(options, &state, object, TransferPhase::Downloading, 0);

        while state.confirmed() < object.size {
            let want = bounded_chunk_len(state.confirmed(), object.size, options.chunk_size);
            let fetched = match self.store.read_at(&object.id, state.confirmed(), want).await {
                Ok(chunk) if chunk.bytes.is_empty() => Err(FetchError::Network(format!(
                    "empty chunk at offset {}",
                    state.confirmed()
                ))),
                other => other,
            };

            match fetched {
                Ok(chunk) => {
                    // Never persist more than the bounded request; the
                    // confirmed offset must stay within the declared size.
                    let take = chunk.bytes.len().min(want as usize);
                    state.commit(&chunk.bytes[..take]).await?;
                    retries = 0;
                    self.report(options, &state, object, TransferPhase::Downloading, 0);

                    // The store says the object ended but the declared
                    // size was never reached: retrying the same offset
                    // can only re-read the same end, so abort instead.
                    if chunk.is_final && state.confirmed() < object.size {
                        return Err(FetchError::InvalidMetadata(format!(
                            "object {} ended at {} bytes but {} were declared",
                            object.id,
                            state.confirmed(),
                            object.size
                        )));
                    }
                }
                Err(err) if err.is_transient() => {
                    retries += 1;
                    if retries >= options.max_retries {
                        warn!(
                            id = %object.id,
                            attempts = retries,
                            offset = state.confirmed(),
                            "retry budget exhausted, transfer left resumable"
                        );
                        return Ok(EngineStatus::RetriesExhausted { attempts: retries });
                    }
                    let wait = retry_delay(retries, options.retry_backoff, options.backoff_cap);
                    warn!(
                        id = %object.id,
                        error = %err,
                        wait_secs = wait.as_secs_f64(),
                        retry = retries,
                        max_retries = options.max_retries,
                        "transient failure, backing off"
                    );
                    self.report(options, &state, object, TransferPhase::Downloading, retries);
                    tokio::time::sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(id = %object.id, bytes = state.confirmed(), "all chunks persisted");
        Ok(EngineStatus::Complete)
    }

    fn report(
        &self,
        options: &TransferOptions,
        state: &TransferState,
        object: &RemoteObject,
        phase: TransferPhase,
        retry_count: u32,
    ) {
        if let Some(ref callback) = options.on_progress {
            callback(&Progress {
                phase,
                bytes_transferred: state.confirmed(),
                total_bytes: object.size,
                retry_count,
            });
        }
    }
}
