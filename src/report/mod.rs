//! # Run Reports
//!
//! Inbound data produced by a collection run (Newman JSON reporter format).
//! Only the fields the notifier consumes are modelled; everything else in the
//! report is ignored. Every field is optional on the wire and falls back to a
//! neutral default so a partial report still produces a message.

pub mod aggregate;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level report document written by the collection runner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunReport {
    pub collection: Option<CollectionInfo>,
    pub environment: Option<EnvironmentInfo>,
    pub run: RunData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    pub info: Option<NamedInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedInfo {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvironmentInfo {
    pub name: Option<String>,
}

/// The `run` section: statistics, timings, failures and executions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunData {
    pub stats: RunStats,
    pub timings: RunTimings,
    pub failures: Vec<FailureRecord>,
    pub executions: Vec<ExecutionRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunStats {
    pub requests: RequestStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestStats {
    pub total: u64,
}

/// Run start and end, in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RunTimings {
    pub started: i64,
    pub completed: i64,
}

impl RunTimings {
    /// Elapsed milliseconds. Negative when the timings are inconsistent.
    pub fn elapsed_ms(&self) -> i64 {
        self.completed.saturating_sub(self.started)
    }
}

/// One failed assertion as reported by the runner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FailureRecord {
    pub source: Option<FailureSource>,
    pub error: Option<FailureError>,
}

/// The request a failure originated from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FailureSource {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FailureError {
    pub name: Option<String>,
    pub test: Option<String>,
    pub message: Option<String>,
}

impl FailureRecord {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|source| source.name.as_deref())
    }

    pub fn error_name(&self) -> Option<&str> {
        self.error.as_ref().and_then(|error| error.name.as_deref())
    }

    pub fn error_test(&self) -> Option<&str> {
        self.error.as_ref().and_then(|error| error.test.as_deref())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|error| error.message.as_deref())
    }
}

/// One request execution and the assertions evaluated against its response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExecutionRecord {
    pub assertions: Vec<AssertionRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssertionRecord {
    pub assertion: Option<String>,
    pub skipped: bool,
}

impl RunReport {
    pub fn collection_name(&self) -> Option<&str> {
        self.collection
            .as_ref()
            .and_then(|collection| collection.info.as_ref())
            .and_then(|info| info.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn environment_name(&self) -> Option<&str> {
        self.environment
            .as_ref()
            .and_then(|environment| environment.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

pub fn parse_report(raw: &str) -> std::result::Result<RunReport, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Read and parse a JSON run report from disk.
pub fn load_report(path: &Path) -> Result<RunReport> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&raw).map_err(|source| Error::ParseReport {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "collection": { "info": { "name": "Orders API" } },
        "environment": { "name": "staging" },
        "run": {
            "stats": { "requests": { "total": 4, "failed": 1 } },
            "timings": { "started": 1000, "completed": 3500, "responseAverage": 12 },
            "executions": [
                { "item": { "name": "List" }, "assertions": [ { "assertion": "status 200", "skipped": false } ] },
                { "item": { "name": "Skip" }, "assertions": [ { "assertion": "skipped one", "skipped": true } ] },
                { "item": { "name": "Empty" } }
            ],
            "failures": [
                {
                    "error": { "name": "AssertionError", "test": "status 200", "message": "expected 500 to equal 200" },
                    "source": { "name": "Create order" }
                },
                { "error": {}, "source": {} }
            ]
        }
    }"#;

    #[test]
    fn parses_consumed_fields() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(report.collection_name(), Some("Orders API"));
        assert_eq!(report.environment_name(), Some("staging"));
        assert_eq!(report.run.stats.requests.total, 4);
        assert_eq!(report.run.timings.elapsed_ms(), 2500);
        assert_eq!(report.run.executions.len(), 3);
        assert!(report.run.executions[2].assertions.is_empty());
        assert_eq!(report.run.failures[0].source_name(), Some("Create order"));
        assert_eq!(report.run.failures[0].error_test(), Some("status 200"));
        assert_eq!(report.run.failures[1].source_name(), None);
        assert_eq!(report.run.failures[1].error_message(), None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let report = parse_report("{}").unwrap();
        assert_eq!(report.run.stats.requests.total, 0);
        assert!(report.run.failures.is_empty());
        assert!(report.collection_name().is_none());
        assert!(report.environment_name().is_none());
    }

    #[test]
    fn load_report_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_report(&path).unwrap_err();
        assert!(matches!(err, Error::ReadFile { .. }));
    }

    #[test]
    fn load_report_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_report(&path).unwrap_err();
        assert!(matches!(err, Error::ParseReport { .. }));
    }

    #[test]
    fn negative_elapsed_is_kept() {
        let timings = RunTimings {
            started: 5000,
            completed: 2000,
        };
        assert_eq!(timings.elapsed_ms(), -3000);
    }
}
