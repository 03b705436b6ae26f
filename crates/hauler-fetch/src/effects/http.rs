use bytes::Bytes;
use serde::Deserialize;

use crate::data::RemoteObject;
use crate::effects::store::{Chunk, RemoteStore, TokenSource};
use crate::error::{FetchError, Result};

/// Shape of the metadata document served by the remote service.
#[derive(Debug, Deserialize)]
struct ObjectDoc {
    name: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    sha256: Option<String>,
}

/// Bearer credential fixed at construction time.
///
/// Suits services with long-lived tokens and tests; anything that needs
/// refresh or interactive re-consent implements [`TokenSource`] itself.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Remote store backed by a plain HTTP API.
///
/// Endpoints are explicit configuration on the store, not ambient state:
/// `{base}/objects/{id}` serves metadata as JSON and
/// `{base}/objects/{id}/content` serves raw bytes with Range support.
/// Every request carries the bearer credential from the injected
/// [`TokenSource`].
pub struct HttpStore<T: TokenSource> {
    client: reqwest::Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenSource> HttpStore<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    fn metadata_url(&self, id: &str) -> String {
        format!("{}/objects/{id}", self.base_url)
    }

    fn content_url(&self, id: &str) -> String {
        format!("{}/objects/{id}/content", self.base_url)
    }
}

/// Map an HTTP status onto the transfer error taxonomy.
///
/// Rate limiting (429) and 5xx are transient; every other non-success
/// status is fatal.
fn classify_status(status: reqwest::StatusCode, id: &str) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    Some(match status.as_u16() {
        401 => FetchError::Auth(format!("token rejected for object {id}")),
        403 => FetchError::PermissionDenied { id: id.to_string() },
        404 => FetchError::NotFound { id: id.to_string() },
        429 => FetchError::Server { status: 429 },
        s if status.is_server_error() => FetchError::Server { status: s },
        s => FetchError::Rejected { status: s },
    })
}

/// Connection-level failures are transient by definition: the request
/// never produced a classifiable status.
fn request_error(e: reqwest::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

/// Total object length from a `Content-Range: bytes start-end/total`
/// header, if present and bounded.
fn content_range_total(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::CONTENT_RANGE)?
        .to_str()
        .ok()?
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

impl<T: TokenSource> RemoteStore for HttpStore<T> {
    async fn describe(&self, id: &str) -> Result<RemoteObject> {
        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .get(self.metadata_url(id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(request_error)?;
        if let Some(err) = classify_status(response.status(), id) {
            return Err(err);
        }
        let doc: ObjectDoc = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidMetadata(e.to_string()))?;
        Ok(RemoteObject {
            id: id.to_string(),
            name: doc.name,
            size: doc.size,
            digest: doc.sha256,
        })
    }

    async fn read_at(&self, id: &str, offset: u64, max_len: u64) -> Result<Chunk> {
        debug_assert!(max_len > 0);
        let token = self.tokens.bearer_token().await?;
        let range = format!("bytes={}-{}", offset, offset + max_len - 1);
        let response = self
            .client
            .get(self.content_url(id))
            .bearer_auth(&token)
            .header(reqwest::header::RANGE, range)
            .send()
            .await
            .map_err(request_error)?;
        if let Some(err) = classify_status(response.status(), id) {
            return Err(err);
        }
        let total = content_range_total(response.headers());
        let bytes: Bytes = response.bytes().await.map_err(request_error)?;
        let is_final = match total {
            Some(total) => offset + bytes.len() as u64 >= total,
            // Without Content-Range, a short body is the only end signal.
            None => (bytes.len() as u64) < max_len,
        };
        Ok(Chunk { bytes, is_final })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{CONTENT_RANGE, HeaderMap, HeaderValue};

    #[test]
    fn status_classification() {
        assert!(classify_status(StatusCode::OK, "x").is_none());
        assert!(classify_status(StatusCode::PARTIAL_CONTENT, "x").is_none());

        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "x"),
            Some(FetchError::Auth(_))
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "x"),
            Some(FetchError::PermissionDenied { .. })
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "x"),
            Some(FetchError::NotFound { .. })
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "x"),
            Some(FetchError::Server { status: 429 })
        ));
        assert!(matches!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE, "x"),
            Some(FetchError::Server { status: 503 })
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "x"),
            Some(FetchError::Rejected { status: 400 })
        ));
    }

    #[test]
    fn transient_statuses_are_retryable() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "x").unwrap();
        assert!(err.is_transient());
        let err = classify_status(StatusCode::NOT_FOUND, "x").unwrap();
        assert!(!err.is_transient());
    }

    #[test]
    fn content_range_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-999/3000"));
        assert_eq!(content_range_total(&headers), Some(3000));

        headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-999/*"));
        assert_eq!(content_range_total(&headers), None);

        assert_eq!(content_range_total(&HeaderMap::new()), None);
    }
}
