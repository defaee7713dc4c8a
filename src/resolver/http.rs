//! Resolver reached over HTTP (`POST {base}/api/move`).

use super::{MoveRequest, MoveResponse, ResolveError, ResolveErrorKind, Resolver};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Resolver backed by a remote service.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    /// Base URL of the resolver service.
    base_url: String,
    /// HTTP client with the request timeout applied.
    client: reqwest::Client,
    /// Timeout, kept for error reporting.
    timeout: Duration,
}

impl HttpResolver {
    /// Creates a resolver for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the HTTP client cannot be built.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                ResolveError::new(ResolveErrorKind::Transport(e.to_string()))
            })?;

        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Full URL of the move endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/api/move", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ResolveError {
        if e.is_timeout() {
            ResolveError::new(ResolveErrorKind::Timeout(self.timeout.as_millis() as u64))
        } else {
            ResolveError::new(ResolveErrorKind::Transport(e.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl Resolver for HttpResolver {
    #[instrument(skip(self, request), fields(mode = ?request.mode, level = %request.level))]
    async fn resolve(&self, request: &MoveRequest) -> Result<MoveResponse, ResolveError> {
        debug!(url = %self.endpoint(), "Posting move");

        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Move request failed");
                self.transport_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read move response");
            self.transport_error(e)
        })?;
        debug!(status = %status, body = %body, "Got move response");

        if !status.is_success() {
            warn!(status = %status, body = %body, "Resolver returned error status");
            return Err(ResolveError::new(ResolveErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %body, "Failed to parse move response");
            ResolveError::new(ResolveErrorKind::Decode(e.to_string()))
        })
    }
}
