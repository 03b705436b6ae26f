/// Metadata for one remote object, resolved once per transfer attempt and
/// immutable for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    /// Opaque identifier understood by the remote service.
    pub id: String,

    /// Declared file name; becomes the final artifact name.
    pub name: String,

    /// Declared size in bytes. A size of zero means the transfer is
    /// complete after zero chunks; the fetch loop is skipped entirely.
    pub size: u64,

    /// Expected SHA-256 digest as hex, if the service claims one.
    ///
    /// `None` (or empty) means the artifact can only ever be reported
    /// as unverified.
    pub digest: Option<String>,
}
