// rowguard/src/commands/validate.rs
//
// USE CASE: Validate one table and write the findings report.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};

use rowguard_core::domain::quality::QualityRule;
use rowguard_core::infrastructure::adapters::DuckDBSource;
use rowguard_core::infrastructure::config::load_settings;
use rowguard_core::infrastructure::error::ConfigError;
use rowguard_core::{RowguardError, RunRequest, RunSummary, run_validation};

use crate::cli::Cli;

pub async fn execute(cli: &Cli) -> Result<RunSummary, RowguardError> {
    // A. Settings (file < env < flags)
    let working_dir = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: ".".into(),
        source,
    })?;
    let mut settings = load_settings(cli.config.as_deref(), &working_dir)?;
    cli.apply_overrides(&mut settings);
    tracing::debug!(?settings, "Effective settings");

    // B. Row source adapter
    let source = DuckDBSource::connect(&cli.connection_string)?;

    // C. Run
    let request = RunRequest {
        table: cli.table_name.clone(),
        output: cli.output_file.clone(),
        summary: cli.summary.clone(),
    };
    let summary = run_validation(&source, &request, &settings).await?;

    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Check", "Records"]);

    table.add_row(vec![
        Cell::new("rows fetched"),
        Cell::new(summary.records_fetched).set_alignment(CellAlignment::Right),
    ]);
    for rule in QualityRule::ALL {
        table.add_row(vec![
            Cell::new(rule.as_str()),
            Cell::new(summary.counts.get(rule)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("problematic entries"),
        Cell::new(summary.findings).set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");
    println!("📁 Report saved to: {}", summary.output.display());
}
