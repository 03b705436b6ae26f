//! Sequences one whole transfer: short-circuit, engine, promotion,
//! verification.

use std::io;
use std::path::Path;

use tracing::{info, warn};

use hauler_verify::{Verification, VerifyError};

use crate::core::{final_path, part_path};
use crate::data::{Outcome, Progress, RemoteObject, TransferOptions, TransferPhase};
use crate::effects::engine::{EngineStatus, TransferEngine};
use crate::effects::store::RemoteStore;
use crate::error::{FetchError, Result};

/// Result of a digest pass that treats a mismatch as data, not failure:
/// a mismatched artifact is a terminal outcome the operator must see,
/// never an error to bubble up or a file to delete.
enum DigestCheck {
    Clean(Verification),
    Mismatch,
}

/// Owns the overall success/failure outcome of one object transfer.
pub struct Orchestrator<S> {
    engine: TransferEngine<S>,
}

impl<S: RemoteStore> Orchestrator<S> {
    pub fn new(store: S) -> Self {
        Self {
            engine: TransferEngine::new(store),
        }
    }

    pub fn store(&self) -> &S {
        self.engine.store()
    }

    /// Transfer one object into `dest_dir`.
    ///
    /// Always returns a structured [`Outcome`]; errors anywhere in the
    /// sequence fold into [`Outcome::Failed`] rather than propagating to
    /// the host.
    pub async fn transfer(&self, id: &str, dest_dir: &Path, options: &TransferOptions) -> Outcome {
        match self.run(id, dest_dir, options).await {
            Ok(outcome) => outcome,
            Err(err) => Outcome::Failed(err),
        }
    }

    async fn run(&self, id: &str, dest_dir: &Path, options: &TransferOptions) -> Result<Outcome> {
        tokio::fs::create_dir_all(dest_dir).await?;

        let object = self.engine.store().describe(id).await?;
        let target = final_path(dest_dir, &object.name);
        let temp = part_path(dest_dir, &object.id);

        // Idempotent short-circuit: a finished download costs at most a
        // local hash pass, never a network transfer.
        if tokio::fs::try_exists(&target).await? {
            if !options.verify {
                info!(path = %target.display(), "artifact already present");
                return Ok(Outcome::AlreadyComplete(target));
            }
            return match check_digest(&target, object.digest.as_deref()).await? {
                DigestCheck::Clean(verification) => {
                    info!(path = %target.display(), ?verification, "artifact already present");
                    Ok(Outcome::AlreadyComplete(target))
                }
                DigestCheck::Mismatch => Ok(Outcome::IntegrityMismatch(target)),
            };
        }

        info!(id = %object.id, name = %object.name, size = object.size, "starting transfer");
        self.report(options, &object, TransferPhase::Starting, 0);

        match self.engine.run(&object, &temp, options).await? {
            EngineStatus::RetriesExhausted { attempts } => {
                return Ok(Outcome::RetriesExhausted {
                    temp_path: temp,
                    attempts,
                });
            }
            EngineStatus::Complete => {}
        }

        // Sole ownership-transfer point: either the final file appears
        // whole, or the temp file remains and the final path is untouched.
        self.report(options, &object, TransferPhase::Committing, object.size);
        tokio::fs::rename(&temp, &target).await?;

        if options.verify {
            self.report(options, &object, TransferPhase::Verifying, object.size);
            match check_digest(&target, object.digest.as_deref()).await? {
                DigestCheck::Clean(Verification::Verified) => {
                    info!(path = %target.display(), "artifact digest verified");
                }
                DigestCheck::Clean(Verification::Unverified) => {
                    info!(path = %target.display(), "no digest claimed, artifact unverified");
                }
                DigestCheck::Mismatch => return Ok(Outcome::IntegrityMismatch(target)),
            }
        }

        self.report(options, &object, TransferPhase::Completed, object.size);
        info!(path = %target.display(), "transfer finished");
        Ok(Outcome::Success(target))
    }

    fn report(
        &self,
        options: &TransferOptions,
        object: &RemoteObject,
        phase: TransferPhase,
        bytes_transferred: u64,
    ) {
        if let Some(ref callback) = options.on_progress {
            callback(&Progress {
                phase,
                bytes_transferred,
                total_bytes: object.size,
                retry_count: 0,
            });
        }
    }
}

/// Hashing a multi-gigabyte artifact is CPU-bound; it runs on the
/// blocking pool so it never parks an async worker.
async fn check_digest(path: &Path, expected: Option<&str>) -> Result<DigestCheck> {
    let path = path.to_path_buf();
    let expected = expected.map(str::to_owned);
    tokio::task::spawn_blocking(move || {
        match hauler_verify::verify_file(&path, expected.as_deref()) {
            Ok(verification) => Ok(DigestCheck::Clean(verification)),
            Err(VerifyError::Mismatch { expected, actual }) => {
                warn!(
                    path = %path.display(),
                    expected = %expected,
                    actual = %actual,
                    "digest mismatch, artifact left in place for inspection"
                );
                Ok(DigestCheck::Mismatch)
            }
            Err(VerifyError::Io(e)) => Err(e.into()),
            Err(VerifyError::InvalidDigest(d)) => Err(FetchError::InvalidMetadata(format!(
                "invalid expected digest: {d}"
            ))),
        }
    })
    .await
    .map_err(|e| FetchError::Filesystem(io::Error::other(e)))?
}
