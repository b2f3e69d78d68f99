//! `m3u8sync` - keep a local tree of HLS playlist manifests in sync with a
//! resolver endpoint.
//!
//! For every configured stream the resolver is asked for `?ID=<id>`. A
//! response containing `#EXTM3U` is written to
//! `<root>/<subfolder>/<slug>.m3u8`; anything else removes the previously
//! saved file so consumers never see a stale playlist.
//!
//! # Example
//!
//! ```rust,no_run
//! use m3u8sync::{load_all, HttpManifestClient, RunSettings, SyncRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = RunSettings::new("https://resolver.example", "streams")?;
//!     let client = HttpManifestClient::new(settings.timeout)?;
//!     let configs = load_all(&["channels.json"])?;
//!
//!     let summary = SyncRunner::new(settings, Box::new(client)).run(&configs).await;
//!     println!("{} saved, {} failed", summary.success_count, summary.failure_count);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod fetch;
pub mod fingerprint;
pub mod http_client;
pub mod runner;
pub mod settings;
pub mod store;
pub mod summary;

pub use config::{load_all, load_config, ConfigError, StreamConfig, StreamRecord};
pub use fetch::{fetch_manifest, is_manifest, Delay, FetchFailure, TokioDelay, MANIFEST_MARKER};
pub use fingerprint::{desktop_profile, BrowserProfile};
pub use http_client::{HttpManifestClient, HttpReply, ManifestClient, TransportError};
pub use runner::{ProgressCallback, RecordOutcome, SyncEvent, SyncRunner};
pub use settings::{RunSettings, SettingsError};
pub use summary::{FailureKind, RunSummary};

/// Version of m3u8sync
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
