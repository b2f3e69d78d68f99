use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use m3u8sync::{load_all, HttpManifestClient, RunSettings, SyncRunner};

use super::output::{print_event, render_summary};
use crate::{Cli, OutputFormat};

pub async fn cmd_sync(cli: &Cli) -> Result<ExitCode> {
    let settings = RunSettings::new(&cli.endpoint, &cli.folder)?
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_retries(cli.retries)?
        .with_retry_delay(Duration::from_secs(cli.retry_delay))
        .with_fail_on_error(cli.fail_on_error);
    debug!(?settings, "Settings resolved");

    // Every config must load before any manifest is touched.
    let configs = load_all(&cli.config_files)?;

    let client = HttpManifestClient::new(settings.timeout)?;
    let mut runner = SyncRunner::new(settings, Box::new(client));

    if matches!(cli.format, OutputFormat::Full) {
        println!("✓ Using {} client", runner.client_name());
        println!("✓ Endpoint: {}", runner.settings().endpoint);
        println!("✓ Output: {}", runner.settings().output_root.display());
        runner = runner.with_progress(print_event);
    }

    let summary = runner.run(&configs).await;
    println!("{}", render_summary(&summary, cli.format)?);

    if runner.settings().fail_on_error && summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
