// rowguard-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

use crate::domain::findings::{FindingsReport, RuleCounts, evaluate};
use crate::domain::record::Record;
use crate::error::RowguardError;
use crate::infrastructure::config::Settings;
use crate::infrastructure::error::{SourceError, WriteError};
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::report::write_report;
use crate::ports::row_source::RowSource;

/// What to check and where the findings go.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub table: String,
    pub output: PathBuf,
    /// Optional JSON summary, written after the report.
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub engine: String,
    pub table: String,
    pub output: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records_fetched: usize,
    pub findings: usize,
    pub counts: RuleCounts,
}

/// Fetch -> evaluate -> write. Each stage completes before the next begins and
/// any failure aborts the run before the report is persisted.
#[instrument(skip(source, settings), fields(engine = source.engine_name()))]
pub async fn run_validation(
    source: &dyn RowSource,
    request: &RunRequest,
    settings: &Settings,
) -> Result<RunSummary, RowguardError> {
    settings.check()?;

    let start = Instant::now();
    let started_at = Utc::now();
    info!(table = %request.table, output = %request.output.display(), "🚀 Starting validation run");

    // 1. FETCH
    let records = fetch(source, &request.table, settings).await?;
    info!(
        rows = records.len(),
        "📦 Rows fetched from '{}'",
        request.table
    );

    // 2. EVALUATE
    let report = evaluate(&records, &settings.rules)?;
    log_counts(&report);

    // 3. WRITE
    write_report(&report, &request.output)?;
    info!(path = %request.output.display(), "💾 Saved problematic entries");

    let summary = RunSummary {
        engine: source.engine_name().to_string(),
        table: request.table.clone(),
        output: request.output.clone(),
        started_at,
        finished_at: Utc::now(),
        records_fetched: report.records_checked,
        findings: report.len(),
        counts: report.counts,
    };
    if let Some(path) = &request.summary {
        write_summary(&summary, path)?;
    }

    info!("✨ Validation run finished in {:.2?}", start.elapsed());
    Ok(summary)
}

async fn fetch(
    source: &dyn RowSource,
    table: &str,
    settings: &Settings,
) -> Result<Vec<Record>, SourceError> {
    let pending = source.fetch_records(table, &settings.columns);
    match settings.timeouts.fetch() {
        Some(limit) => tokio::time::timeout(limit, pending)
            .await
            .map_err(|_| SourceError::Timeout {
                seconds: limit.as_secs(),
            })?,
        None => pending.await,
    }
}

fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), WriteError> {
    let json = serde_json::to_vec_pretty(summary)?;
    atomic_write(path, json)
}

fn log_counts(report: &FindingsReport) {
    info!("Found {} duplicate entries", report.counts.duplicate);
    info!(
        "Found {} entries with invalid emails",
        report.counts.invalid_email
    );
    info!(
        "Found {} entries with invalid names",
        report.counts.invalid_name
    );
    info!(
        findings = report.len(),
        "🔎 {} of {} records are problematic",
        report.len(),
        report.records_checked
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::record::{ColumnMapping, RecordId};
    use crate::infrastructure::config::Timeouts;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::tempdir;

    // --- MOCK ROW SOURCE ---
    #[derive(Clone, Default)]
    struct MockSource {
        records: Vec<Record>,
        fail_with_missing_table: bool,
        delay: Option<Duration>,
        requested_tables: Arc<Mutex<Vec<String>>>,
    }

    impl MockSource {
        fn with_records(records: Vec<Record>) -> Self {
            Self {
                records,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl RowSource for MockSource {
        async fn fetch_records(
            &self,
            table: &str,
            _columns: &ColumnMapping,
        ) -> Result<Vec<Record>, SourceError> {
            self.requested_tables
                .lock()
                .unwrap()
                .push(table.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_with_missing_table {
                return Err(SourceError::TableNotFound(table.to_string()));
            }
            Ok(self.records.clone())
        }

        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    fn request(dir: &Path) -> RunRequest {
        RunRequest {
            table: "customers".into(),
            output: dir.join("report.csv"),
            summary: None,
        }
    }

    fn row(id: &str, name: &str, email: &str) -> Record {
        Record::new(RecordId::new(id), Some(name), Some(email))
    }

    fn reference_rows() -> Vec<Record> {
        vec![
            row("1", "John Doe", "john@example.com"),
            row("2", "Jane", "not-an-email"),
            row("3", "John Doe", "john@example.com"),
        ]
    }

    #[tokio::test]
    async fn test_reference_scenario_end_to_end() -> Result<()> {
        let dir = tempdir()?;
        let source = MockSource::with_records(reference_rows());
        let req = request(dir.path());

        let summary = run_validation(&source, &req, &Settings::default()).await?;

        assert_eq!(
            fs::read_to_string(&req.output)?,
            "identity,name,email,violations\n\
             1,John Doe,john@example.com,duplicate\n\
             2,Jane,not-an-email,invalid_email\n\
             3,John Doe,john@example.com,duplicate\n"
        );
        assert_eq!(summary.records_fetched, 3);
        assert_eq!(summary.findings, 3);
        assert_eq!(summary.counts.duplicate, 2);
        assert_eq!(summary.engine, "mock");
        assert_eq!(*source.requested_tables.lock().unwrap(), vec!["customers"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_table_writes_header_only() -> Result<()> {
        let dir = tempdir()?;
        let req = request(dir.path());

        let source = MockSource::default();

        let summary = run_validation(&source, &req, &Settings::default()).await?;

        assert_eq!(
            fs::read_to_string(&req.output)?,
            "identity,name,email,violations\n"
        );
        assert_eq!(summary.findings, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reruns_are_byte_identical() -> Result<()> {
        let dir = tempdir()?;
        let source = MockSource::with_records(reference_rows());
        let req = request(dir.path());

        run_validation(&source, &req, &Settings::default()).await?;
        let first = fs::read(&req.output)?;
        run_validation(&source, &req, &Settings::default()).await?;
        assert_eq!(first, fs::read(&req.output)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_source_error_aborts_before_writing() -> Result<()> {
        let dir = tempdir()?;
        let source = MockSource {
            fail_with_missing_table: true,
            ..Default::default()
        };
        let req = request(dir.path());

        let err = run_validation(&source, &req, &Settings::default())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), "source");
        assert!(!req.output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_contract_violation_aborts_before_writing() -> Result<()> {
        let dir = tempdir()?;
        let rows = vec![row("1", "A", "a@x.io"), row("1", "B", "b@x.io")];
        let source = MockSource::with_records(rows);
        let req = request(dir.path());

        let err = run_validation(&source, &req, &Settings::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RowguardError::Validation(DomainError::DuplicateIdentity { .. })
        ));
        assert!(!req.output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_output_directory_is_a_write_error() -> Result<()> {
        let dir = tempdir()?;
        let req = RunRequest {
            output: dir.path().join("missing").join("report.csv"),
            ..request(dir.path())
        };

        let source = MockSource::with_records(reference_rows());

        let err = run_validation(&source, &req, &Settings::default())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), "write");
        assert!(!req.output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_deadline_aborts_the_run() -> Result<()> {
        let dir = tempdir()?;
        let source = MockSource {
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let settings = Settings {
            timeouts: Timeouts {
                fetch_secs: Some(1),
            },
            ..Default::default()
        };
        let req = request(dir.path());

        let err = run_validation(&source, &req, &settings).await.unwrap_err();

        assert!(matches!(
            err,
            RowguardError::Source(SourceError::Timeout { seconds: 1 })
        ));
        assert!(!req.output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_settings_are_rejected_up_front() -> Result<()> {
        let dir = tempdir()?;
        let source = MockSource::with_records(reference_rows());
        let mut settings = Settings::default();
        settings.rules.name.max_length = 0;

        let err = run_validation(&source, &request(dir.path()), &settings)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), "config");
        assert!(source.requested_tables.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_file_is_written() -> Result<()> {
        let dir = tempdir()?;
        let req = RunRequest {
            summary: Some(dir.path().join("summary.json")),
            ..request(dir.path())
        };

        let source = MockSource::with_records(reference_rows());

        let summary = run_validation(&source, &req, &Settings::default()).await?;

        let json = fs::read(dir.path().join("summary.json"))?;
        let stored: RunSummary = serde_json::from_slice(&json)?;
        assert_eq!(stored, summary);
        assert!(stored.finished_at >= stored.started_at);
        Ok(())
    }
}
