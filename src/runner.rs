//! The sync loop: fetch, validate, persist, or clean up, record by record.
//!
//! Records are processed strictly in order. A failing record never stops
//! the batch; it only removes its own stale manifest and bumps a counter.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{StreamConfig, StreamRecord};
use crate::fetch::{fetch_manifest, Delay, TokioDelay};
use crate::http_client::ManifestClient;
use crate::settings::RunSettings;
use crate::store;
use crate::summary::{FailureKind, RunSummary};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    ConfigStarted {
        path: &'a Path,
        records: usize,
    },
    RecordStarted {
        index: usize,
        total: usize,
        record: &'a StreamRecord,
        url: String,
    },
    Saved {
        record: &'a StreamRecord,
        path: PathBuf,
    },
    Failed {
        record: &'a StreamRecord,
        kind: FailureKind,
        reason: String,
    },
    StaleRemoved {
        record: &'a StreamRecord,
        path: PathBuf,
    },
}

/// Callback invoked for every [`SyncEvent`].
pub type ProgressCallback = Box<dyn for<'a> Fn(&SyncEvent<'a>) + Send + Sync>;

/// Terminal state of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Saved(PathBuf),
    Failed(FailureKind),
}

impl RecordOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

pub struct SyncRunner {
    settings: RunSettings,
    client: Box<dyn ManifestClient>,
    delay: Box<dyn Delay>,
    progress: Option<ProgressCallback>,
}

impl SyncRunner {
    pub fn new(settings: RunSettings, client: Box<dyn ManifestClient>) -> Self {
        Self {
            settings,
            client,
            delay: Box::new(TokioDelay),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Box<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: for<'a> Fn(&SyncEvent<'a>) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    /// Process every record of every config, in order.
    pub async fn run(&self, configs: &[StreamConfig]) -> RunSummary {
        let mut summary = RunSummary::default();

        for config in configs {
            self.emit(&SyncEvent::ConfigStarted {
                path: &config.path,
                records: config.len(),
            });

            let total = config.len();
            for (index, record) in config.records.iter().enumerate() {
                self.emit(&SyncEvent::RecordStarted {
                    index: index + 1,
                    total,
                    record,
                    url: self.settings.request_url(&record.id),
                });

                match self.sync_record(record).await {
                    RecordOutcome::Saved(_) => summary.record_success(),
                    RecordOutcome::Failed(kind) => summary.record_failure(kind),
                }
            }
        }

        info!(
            success = summary.success_count,
            failed = summary.failure_count,
            "Sync finished"
        );
        summary
    }

    /// Fetch one record and persist or clean up accordingly.
    pub async fn sync_record(&self, record: &StreamRecord) -> RecordOutcome {
        let content = match fetch_manifest(
            &*self.client,
            &*self.delay,
            &self.settings,
            record,
        )
        .await
        {
            Ok(content) => content,
            Err(failure) => {
                return self.fail(record, failure.kind(), failure.to_string());
            }
        };

        match store::save_manifest(&self.settings.output_root, record, &content) {
            Ok(path) => {
                self.emit(&SyncEvent::Saved { record, path: path.clone() });
                RecordOutcome::Saved(path)
            }
            Err(err) => {
                let path = store::target_path(&self.settings.output_root, record);
                warn!(path = %path.display(), error = %err, "Cannot save manifest");
                self.fail(
                    record,
                    FailureKind::SaveError,
                    format!("cannot save {}: {err}", path.display()),
                )
            }
        }
    }

    fn fail(&self, record: &StreamRecord, kind: FailureKind, reason: String) -> RecordOutcome {
        self.emit(&SyncEvent::Failed {
            record,
            kind,
            reason,
        });
        self.remove_stale(record);
        RecordOutcome::Failed(kind)
    }

    fn remove_stale(&self, record: &StreamRecord) {
        match store::remove_stale(&self.settings.output_root, record) {
            Ok(Some(path)) => self.emit(&SyncEvent::StaleRemoved { record, path }),
            Ok(None) => {}
            Err(err) => {
                warn!(slug = %record.slug, error = %err, "Cannot remove stale manifest");
            }
        }
    }

    fn emit(&self, event: &SyncEvent<'_>) {
        if let Some(progress) = &self.progress {
            progress(event);
        }
    }
}
