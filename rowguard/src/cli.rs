// rowguard/src/cli.rs
//
// Single source of truth for the CLI definition (Clap struct).

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use rowguard_core::domain::quality::{DuplicateKeep, DuplicateKeyKind};
use rowguard_core::infrastructure::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "validate")]
#[command(
    about = "🛡️  Flags malformed emails, malformed names and duplicate rows in a table",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Database connection string (ex: "crm.duckdb", "duckdb:///crm.duckdb", ":memory:")
    pub connection_string: String,

    /// Name of the table to query (ex: "customers" or "crm.customers")
    pub table_name: String,

    /// Path of the CSV report listing the problematic entries
    pub output_file: PathBuf,

    /// Settings file (default: ./rowguard.yaml or ./rowguard.yml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Fields defining a duplicate: email | name_email
    #[arg(long)]
    pub duplicate_key: Option<DuplicateKeyKind>,

    /// Leave the first record of each duplicate group unflagged
    #[arg(long)]
    pub keep_first: bool,

    /// Maximum accepted name length, in characters
    #[arg(long)]
    pub max_name_length: Option<usize>,

    /// Abort the run when the fetch takes longer than this
    #[arg(long, value_name = "SECONDS")]
    pub fetch_timeout: Option<u64>,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// More logs (-v: debug, -vv: trace). RUST_LOG takes precedence
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Flags win over the settings file and the environment.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(key) = self.duplicate_key {
            settings.rules.duplicates.key = key;
        }
        if self.keep_first {
            settings.rules.duplicates.keep = DuplicateKeep::First;
        }
        if let Some(max) = self.max_name_length {
            settings.rules.name.max_length = max;
        }
        if let Some(secs) = self.fetch_timeout {
            settings.timeouts.fetch_secs = Some(secs);
        }
    }

    /// Filter for this binary's own events and the core library's.
    pub fn log_directive(&self) -> String {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        let bin = env!("CARGO_CRATE_NAME");
        format!("{bin}={level},rowguard_core={level},warn")
    }
}
