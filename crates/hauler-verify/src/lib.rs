//! Content verification primitives for downloaded artifacts.
//!
//! Provides incremental hashing and streaming whole-file verification
//! without enforcing a verification policy. A file is hashed in bounded
//! chunks sized to its length, so multi-gigabyte artifacts are checked in
//! reasonable wall-clock time without unbounded memory use.
//!
//! # Example
//!
//! ```no_run
//! use hauler_verify::{verify_file, Verification};
//!
//! let expected = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
//! match verify_file("artifact.bin".as_ref(), Some(expected)) {
//!     Ok(Verification::Verified) => println!("digest matched"),
//!     Ok(Verification::Unverified) => println!("no digest claimed"),
//!     Err(e) => eprintln!("verification failed: {e}"),
//! }
//! ```

pub use self::error::{Result, VerifyError};
pub use self::file::{Verification, digest_file, scaled_chunk_size, verify_file};
pub use self::hasher::{Hasher, Sha256Hasher};

mod error;
mod file;
mod hasher;
