//! Resumable single-object transfer with integrity verification and atomic
//! placement.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration and types
//! - `core` - Pure transformations
//! - `effects` - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Resume**: the resume offset is derived from the temp artifact's
//!   on-disk length, so an interrupted transfer continues after a crash
//!   or process restart with no sidecar bookkeeping
//! - **Bounded retries**: transient failures back off exponentially and
//!   always retry the same confirmed offset; fatal failures abort at once
//! - **Atomic promotion**: the temp artifact becomes the final artifact
//!   through a single rename, never a partially-visible copy
//! - **Structured outcomes**: every transfer ends in exactly one
//!   [`Outcome`]; the orchestrator never panics the host

mod core;
mod data;
mod effects;
mod error;

pub use self::core::{bounded_chunk_len, final_path, part_path, retry_delay};
pub use self::data::{Outcome, Progress, RemoteObject, TransferOptions, TransferPhase};
pub use self::effects::{
    Chunk, EngineStatus, Orchestrator, RemoteStore, TokenSource, TransferEngine, TransferState,
};
pub use self::error::{FetchError, Result};

#[cfg(feature = "reqwest")]
pub use self::effects::{HttpStore, StaticToken};
