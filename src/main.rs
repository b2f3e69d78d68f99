//! `m3u8sync` CLI - sync HLS playlist manifests for configured streams

mod cmd;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use m3u8sync::settings::{
    DEFAULT_ENDPOINT, DEFAULT_FOLDER, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "m3u8sync")]
#[command(about = "Fetch HLS playlist manifests for configured streams and store them on disk")]
#[command(version)]
pub struct Cli {
    /// Stream list files (JSON arrays of {"id", "slug", "subfolder"?})
    #[arg(required = true, value_name = "CONFIG")]
    pub config_files: Vec<PathBuf>,

    /// Resolver endpoint queried as <ENDPOINT>?ID=<id>
    #[arg(long, env = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Output root directory for saved manifests
    #[arg(long, env = "FOLDER_NAME", default_value = DEFAULT_FOLDER)]
    pub folder: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Attempts per stream on network failure
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub retry_delay: u64,

    /// Exit with status 1 if any stream failed
    #[arg(long)]
    pub fail_on_error: bool,

    /// Show diagnostic output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format: full (progress + summary), compact (one line), json
    #[arg(long, value_enum, default_value_t = OutputFormat::Full)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Full,
    Compact,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd::sync::cmd_sync(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for this crate with
/// `--verbose`. Logs go to stderr so `--format json` output stays parseable.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,m3u8sync=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
