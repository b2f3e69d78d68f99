//! Run totals.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Category of a per-record failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FailureKind {
    Timeout,
    RequestFailed,
    RequestError,
    InvalidContent,
    SaveError,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::RequestFailed => "RequestFailed",
            Self::RequestError => "RequestError",
            Self::InvalidContent => "InvalidContent",
            Self::SaveError => "SaveError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success/failure counters accumulated over every config in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    #[serde(rename = "success")]
    pub success_count: usize,
    #[serde(rename = "failed")]
    pub failure_count: usize,
    pub failures_by_kind: BTreeMap<FailureKind, usize>,
}

impl RunSummary {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, kind: FailureKind) {
        self.failure_count += 1;
        *self.failures_by_kind.entry(kind).or_default() += 1;
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_by_kind() {
        let mut summary = RunSummary::default();
        summary.record_success();
        summary.record_failure(FailureKind::RequestError);
        summary.record_failure(FailureKind::RequestError);
        summary.record_failure(FailureKind::SaveError);

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failure_count, 3);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.failures_of(FailureKind::RequestError), 2);
        assert_eq!(summary.failures_of(FailureKind::SaveError), 1);
        assert_eq!(summary.failures_of(FailureKind::Timeout), 0);
        assert!(summary.has_failures());
    }

    #[test]
    fn serializes_with_kind_names_as_keys() {
        let mut summary = RunSummary::default();
        summary.record_success();
        summary.record_failure(FailureKind::InvalidContent);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": 1,
                "failed": 1,
                "failures_by_kind": { "InvalidContent": 1 }
            })
        );
    }

    #[test]
    fn display_matches_serialized_name() {
        for kind in [
            FailureKind::Timeout,
            FailureKind::RequestFailed,
            FailureKind::RequestError,
            FailureKind::InvalidContent,
            FailureKind::SaveError,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.to_string()));
        }
    }
}
