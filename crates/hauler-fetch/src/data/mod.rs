//! Data layer: immutable configuration and types.

mod object;
mod options;
mod outcome;
mod progress;

pub use object::RemoteObject;
pub use options::{TransferOptions, TransferPhase};
pub use outcome::Outcome;
pub use progress::Progress;
