// rowguard-core/src/infrastructure/report.rs

use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::findings::FindingsReport;
use crate::infrastructure::error::WriteError;
use crate::infrastructure::fs::atomic_write;

pub const REPORT_HEADER: [&str; 4] = ["identity", "name", "email", "violations"];

/// Renders the findings as comma-separated text: a header row, then one
/// `\n`-terminated row per finding. NULL fields render empty.
pub fn render_report(report: &FindingsReport) -> Result<Vec<u8>, WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;

    for finding in &report.findings {
        let violations = finding.outcome.violations.to_string();
        writer.write_record([
            finding.outcome.identity.as_str(),
            finding.name.as_deref().unwrap_or_default(),
            finding.email.as_deref().unwrap_or_default(),
            violations.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| WriteError::from(csv::Error::from(e.into_error())))
}

/// Renders the whole report first, so an encoding failure never leaves a
/// file behind, then persists it atomically.
#[instrument(skip(report), fields(findings = report.len()))]
pub fn write_report(report: &FindingsReport, path: &Path) -> Result<(), WriteError> {
    let bytes = render_report(report)?;
    atomic_write(path, &bytes)?;
    debug!(bytes = bytes.len(), "Report persisted");
    Ok(())
}
