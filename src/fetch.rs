//! Manifest fetching with retry and content validation.
//!
//! Retry rules:
//! - transport failures (including timeouts) are retried up to
//!   `max_retries` attempts in total, waiting `retry_delay` between them;
//! - a 404 gets exactly one immediate re-request, outside that budget,
//!   because the resolver sporadically answers 404 with an empty body;
//! - any other non-2xx status fails straight away.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::StreamRecord;
use crate::http_client::{HttpReply, ManifestClient, TransportError};
use crate::settings::RunSettings;
use crate::summary::FailureKind;

/// Marker every HLS playlist starts with.
pub const MANIFEST_MARKER: &str = "#EXTM3U";

/// Waits between retry attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real wall-clock delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Why a manifest could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("timed out after {attempts} attempt(s): {message}")]
    Timeout { attempts: u32, message: String },

    #[error("request failed after {attempts} attempt(s): {message}")]
    RequestFailed { attempts: u32, message: String },

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("response is not an m3u8 playlist ({len} bytes)")]
    InvalidContent { len: usize },
}

impl FetchFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::RequestFailed { .. } => FailureKind::RequestFailed,
            Self::Status { .. } => FailureKind::RequestError,
            Self::InvalidContent { .. } => FailureKind::InvalidContent,
        }
    }
}

/// Returns `true` if `body` looks like an HLS playlist.
pub fn is_manifest(body: &str) -> bool {
    body.contains(MANIFEST_MARKER)
}

/// Fetch and validate the manifest for one record.
///
/// Never writes anything; the caller decides what to do with the result.
#[instrument(skip_all, fields(slug = %record.slug, id = %record.id))]
pub async fn fetch_manifest(
    client: &dyn ManifestClient,
    delay: &dyn Delay,
    settings: &RunSettings,
    record: &StreamRecord,
) -> Result<String, FetchFailure> {
    let url = settings.request_url(&record.id);
    let reply = get_with_retry(client, delay, settings, &url).await?;

    if !reply.is_success() {
        warn!(status = reply.status, "Non-success status");
        return Err(FetchFailure::Status {
            status: reply.status,
        });
    }

    if !is_manifest(&reply.body) {
        warn!(len = reply.body.len(), "Response lacks {MANIFEST_MARKER}");
        return Err(FetchFailure::InvalidContent {
            len: reply.body.len(),
        });
    }

    debug!(len = reply.body.len(), "Manifest validated");
    Ok(reply.body)
}

/// Issue the GET, retrying transport failures and a single 404.
async fn get_with_retry(
    client: &dyn ManifestClient,
    delay: &dyn Delay,
    settings: &RunSettings,
    url: &str,
) -> Result<HttpReply, FetchFailure> {
    let max_attempts = settings.max_retries.max(1);
    let mut attempt = 0;
    let mut retried_not_found = false;

    loop {
        attempt += 1;
        debug!(attempt, max_attempts, url, "Requesting manifest");

        let mut result = client.get(url).await;

        if !retried_not_found && matches!(&result, Ok(reply) if reply.status == 404) {
            retried_not_found = true;
            warn!("404 received, retrying once");
            result = client.get(url).await;
        }

        let err = match result {
            Ok(reply) => return Ok(reply),
            Err(err) => err,
        };

        if attempt >= max_attempts {
            warn!(attempts = attempt, error = %err, "Retries exhausted");
            return Err(exhausted(attempt, err));
        }

        warn!(
            attempt,
            max_attempts,
            error = %err,
            delay_secs = settings.retry_delay.as_secs_f64(),
            "Request failed, retrying"
        );
        delay.wait(settings.retry_delay).await;
    }
}

fn exhausted(attempts: u32, err: TransportError) -> FetchFailure {
    match err {
        TransportError::Timeout(message) => FetchFailure::Timeout { attempts, message },
        TransportError::Failed(message) => FetchFailure::RequestFailed { attempts, message },
    }
}
