//! HTTP transport for manifest requests.
//!
//! [`ManifestClient`] is the seam between the sync loop and the network.
//! [`HttpManifestClient`] is the production implementation on top of
//! `reqwest`; tests substitute scripted clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::fingerprint::{desktop_profile, BrowserProfile};

/// A completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no HTTP status was obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Failed(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Failed(err.to_string())
        }
    }
}

/// Issues a single GET and returns the status and body.
#[async_trait]
pub trait ManifestClient: Send + Sync {
    /// Short name shown at startup.
    fn name(&self) -> &'static str;

    /// Perform one GET request. Non-2xx statuses are returned as replies,
    /// not errors.
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;
}

/// `reqwest`-backed client with the desktop fingerprint baked in.
pub struct HttpManifestClient {
    client: Client,
    profile: BrowserProfile,
}

impl HttpManifestClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Self::with_profile(desktop_profile(), timeout)
    }

    pub fn with_profile(profile: BrowserProfile, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            .default_headers(profile.to_headers())
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, profile })
    }

    pub fn profile(&self) -> &BrowserProfile {
        &self.profile
    }
}

#[async_trait]
impl ManifestClient for HttpManifestClient {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        debug!(
            status,
            version = ?response.version(),
            content_encoding = ?response.headers().get("content-encoding"),
            "Response received"
        );

        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}
