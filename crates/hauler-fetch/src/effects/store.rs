use std::future::Future;

use bytes::Bytes;

use crate::data::RemoteObject;
use crate::error::Result;

/// One bounded read of remote object content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Payload starting at the requested offset.
    pub bytes: Bytes,

    /// True when this chunk reaches the end of the object.
    pub is_final: bool,
}

/// Remote service surface the transfer depends on.
///
/// Implementations handle their own transport configuration and must map
/// every failure onto [`FetchError`](crate::FetchError) so the engine can
/// classify it as transient or fatal. Misclassification either wastes
/// retries on unrecoverable errors or abandons recoverable ones.
///
/// # Implementations
///
/// - [`HttpStore`](crate::HttpStore): production implementation using `reqwest`
/// - Scripted implementations for testing
pub trait RemoteStore: Send + Sync {
    /// Resolve `{name, size, digest}` metadata for an object ID.
    ///
    /// # Errors
    ///
    /// `NotFound` and `PermissionDenied` are fatal: a missing or
    /// inaccessible object cannot appear by retrying.
    fn describe(&self, id: &str) -> impl Future<Output = Result<RemoteObject>> + Send;

    /// Read at most `max_len` bytes of object content starting at
    /// `offset`, in one range-qualified request.
    ///
    /// A retried call with the same `offset` is idempotent with respect
    /// to file content; the engine relies on this to never skip or
    /// duplicate bytes.
    fn read_at(
        &self,
        id: &str,
        offset: u64,
        max_len: u64,
    ) -> impl Future<Output = Result<Chunk>> + Send;
}

/// Supplier of a bearer credential for the remote service.
///
/// Refresh and re-consent are the implementation's concern. Failure to
/// produce a token surfaces as a fatal
/// [`FetchError::Auth`](crate::FetchError::Auth): the transfer cannot
/// proceed and retrying without new credentials cannot help.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> impl Future<Output = Result<String>> + Send;
}
