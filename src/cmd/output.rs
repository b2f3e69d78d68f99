use std::fmt::Write;

use anyhow::Result;

use m3u8sync::{RunSummary, SyncEvent};

use crate::OutputFormat;

const RULE: &str = "===============================";

/// Progress line(s) for one sync event.
pub fn print_event(event: &SyncEvent<'_>) {
    match event {
        SyncEvent::ConfigStarted { path, records } => {
            println!("\n📄 Processing config: {}", path.display());
            println!("✓ Loaded {records} stream(s) from config");
        }
        SyncEvent::RecordStarted {
            index,
            total,
            record,
            url,
        } => {
            println!("\n[{index}/{total}] Processing: {}", record.slug);
            println!("  Fetching: {url}");
        }
        SyncEvent::Saved { path, .. } => {
            println!("  ✓ Saved: {}", path.display());
        }
        SyncEvent::Failed {
            record,
            kind,
            reason,
        } => {
            println!("  ✗ {kind} for {}: {reason}", record.slug);
        }
        SyncEvent::StaleRemoved { path, .. } => {
            println!("  ⚠ Deleted old file: {}", path.display());
        }
    }
}

pub fn render_summary(summary: &RunSummary, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Full => {
            let mut out = format!("\n{RULE}\n");
            writeln!(
                out,
                "Done → {} success / {} failed",
                summary.success_count, summary.failure_count
            )?;
            for (kind, count) in &summary.failures_by_kind {
                writeln!(out, "  {kind}: {count}")?;
            }
            out.push_str(RULE);
            out
        }
        OutputFormat::Compact => {
            let mut out = format!(
                "{} ok / {} failed",
                summary.success_count, summary.failure_count
            );
            if !summary.failures_by_kind.is_empty() {
                let kinds: Vec<String> = summary
                    .failures_by_kind
                    .iter()
                    .map(|(kind, count)| format!("{kind}={count}"))
                    .collect();
                write!(out, " ({})", kinds.join(", "))?;
            }
            out
        }
        OutputFormat::Json => serde_json::to_string(summary)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use m3u8sync::FailureKind;

    fn summary() -> RunSummary {
        let mut summary = RunSummary::default();
        summary.record_success();
        summary.record_success();
        summary.record_failure(FailureKind::Timeout);
        summary.record_failure(FailureKind::RequestError);
        summary.record_failure(FailureKind::RequestError);
        summary
    }

    #[test]
    fn full_summary_lists_kinds() {
        let text = render_summary(&summary(), OutputFormat::Full).unwrap();
        assert!(text.contains("Done → 2 success / 3 failed"));
        assert!(text.contains("  Timeout: 1\n"));
        assert!(text.contains("  RequestError: 2\n"));
        assert!(text.trim_end().ends_with(RULE));
    }

    #[test]
    fn compact_summary_is_one_line() {
        let text = render_summary(&summary(), OutputFormat::Compact).unwrap();
        assert_eq!(text, "2 ok / 3 failed (Timeout=1, RequestError=2)");

        let clean = render_summary(&RunSummary::default(), OutputFormat::Compact).unwrap();
        assert_eq!(clean, "0 ok / 0 failed");
    }

    #[test]
    fn json_summary_parses() {
        let text = render_summary(&summary(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], 2);
        assert_eq!(value["failed"], 3);
        assert_eq!(value["failures_by_kind"]["RequestError"], 2);
    }
}
