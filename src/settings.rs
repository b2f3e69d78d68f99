//! Run-wide settings, built once at startup and passed by reference.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Resolver used when neither `--endpoint` nor `ENDPOINT` is given.
pub const DEFAULT_ENDPOINT: &str = "https://ytb.metvmetv07.workers.dev";
/// Output root used when neither `--folder` nor `FOLDER_NAME` is given.
pub const DEFAULT_FOLDER: &str = "streams";
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("retries must be at least 1")]
    ZeroRetries,
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Base endpoint with trailing slashes stripped.
    pub endpoint: String,
    pub output_root: PathBuf,
    pub timeout: Duration,
    /// Total attempts allowed for transport failures.
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub fail_on_error: bool,
}

impl RunSettings {
    /// Settings with default tuning for the given endpoint and output root.
    pub fn new(endpoint: &str, output_root: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        Ok(Self {
            endpoint: normalize_endpoint(endpoint)?,
            output_root: output_root.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            fail_on_error: false,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Result<Self, SettingsError> {
        if max_retries == 0 {
            return Err(SettingsError::ZeroRetries);
        }
        self.max_retries = max_retries;
        Ok(self)
    }

    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn with_fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    /// Resolver URL for one stream id: `<endpoint>?ID=<id>`.
    ///
    /// Uses `&` instead when the endpoint already has a query string.
    pub fn request_url(&self, id: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}ID={}",
            self.endpoint,
            urlencoding::encode(id)
        )
    }
}

/// Strip trailing slashes and require an absolute http(s) URL.
fn normalize_endpoint(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| SettingsError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(trimmed.to_string())
}
