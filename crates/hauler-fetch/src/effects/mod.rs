//! Effects layer: I/O operations behind trait seams.

mod engine;
mod orchestrator;
mod state;
mod store;

#[cfg(feature = "reqwest")]
mod http;

pub use engine::{EngineStatus, TransferEngine};
pub use orchestrator::Orchestrator;
pub use state::TransferState;
pub use store::{Chunk, RemoteStore, TokenSource};

#[cfg(feature = "reqwest")]
pub use http::{HttpStore, StaticToken};
