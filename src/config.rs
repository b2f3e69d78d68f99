//! Stream list loading.
//!
//! A config file is a JSON array of stream records:
//!
//! ```json
//! [
//!   { "id": "UCxyz", "slug": "news", "subfolder": "intl" },
//!   { "id": "abc", "slug": "chan1" }
//! ]
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Fatal configuration errors. Any of these aborts the run before a single
/// record is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

/// One manifest to fetch and the place to store it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamRecord {
    /// Identifier passed to the endpoint as `?ID=`.
    pub id: String,
    /// File stem of the saved manifest.
    pub slug: String,
    /// Optional directory below the output root.
    #[serde(default)]
    pub subfolder: Option<String>,
}

impl StreamRecord {
    /// The subfolder, with an empty string treated as absent.
    pub fn subfolder(&self) -> Option<&str> {
        self.subfolder.as_deref().filter(|s| !s.is_empty())
    }
}

/// Records loaded from a single config file, in file order.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub path: PathBuf,
    pub records: Vec<StreamRecord>,
}

impl StreamConfig {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load and validate one config file.
pub fn load_config(path: &Path) -> Result<StreamConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_records(&content).map_err(|reason| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(path = %path.display(), records = records.len(), "Config loaded");

    Ok(StreamConfig {
        path: path.to_path_buf(),
        records,
    })
}

/// Load every config up front so a broken file aborts before any record
/// touches the output tree.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<StreamConfig>, ConfigError> {
    paths.iter().map(|p| load_config(p.as_ref())).collect()
}

fn parse_records(content: &str) -> Result<Vec<StreamRecord>, String> {
    let records: Vec<StreamRecord> =
        serde_json::from_str(content).map_err(|e| e.to_string())?;

    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(format!("record {index}: `id` must not be empty"));
        }
        if record.slug.trim().is_empty() {
            return Err(format!("record {index}: `slug` must not be empty"));
        }
    }

    Ok(records)
}
