// rowguard-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("Source error: unsupported connection scheme '{scheme}'")]
    #[diagnostic(
        code(rowguard::source::scheme),
        help("Use a DuckDB file path, ':memory:' or a 'duckdb:///<path>' URL.")
    )]
    UnsupportedScheme { scheme: String },

    #[error("Source error: database not found at '{}'", path.display())]
    #[diagnostic(
        code(rowguard::source::not_found),
        help("Check the connection string. Databases are opened read-only, never created.")
    )]
    DatabaseNotFound { path: PathBuf },

    #[error("Source error: could not connect: {0}")]
    #[diagnostic(code(rowguard::source::connection))]
    Connection(#[source] duckdb::Error),

    #[error("Source error: invalid table name '{0}'")]
    #[diagnostic(
        code(rowguard::source::table_name),
        help("Expected 'table' or 'schema.table'.")
    )]
    InvalidTableName(String),

    #[error("Source error: table '{0}' not found")]
    #[diagnostic(code(rowguard::source::table_not_found))]
    TableNotFound(String),

    #[error("Source error: table '{table}' is missing required column(s): {}", missing.join(", "))]
    #[diagnostic(
        code(rowguard::source::schema),
        help("Map the columns with the `columns` section of the configuration file.")
    )]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("Source error: query failed: {0}")]
    #[diagnostic(
        code(rowguard::source::query),
        help("An error occurred inside the SQL engine.")
    )]
    Query(#[from] duckdb::Error),

    #[error("Source error: fetch did not complete within {seconds}s")]
    #[diagnostic(code(rowguard::source::timeout))]
    Timeout { seconds: u64 },

    #[error("Source error: fetch was interrupted: {0}")]
    #[diagnostic(code(rowguard::source::interrupted))]
    Interrupted(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum WriteError {
    #[error("Write error: cannot write '{}': {source}", path.display())]
    #[diagnostic(
        code(rowguard::write::destination),
        help("Check that the parent directory exists and is writable.")
    )]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write error: could not encode report: {0}")]
    #[diagnostic(code(rowguard::write::encode))]
    Encode(#[from] csv::Error),

    #[error("Write error: could not encode run summary: {0}")]
    #[diagnostic(code(rowguard::write::summary))]
    Summary(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Configuration error: file not found at '{}'", .0.display())]
    #[diagnostic(code(rowguard::config::not_found))]
    NotFound(PathBuf),

    #[error("Configuration error: cannot read '{}': {source}", path.display())]
    #[diagnostic(
        code(rowguard::config::io),
        help("Check file permissions or path validity.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: YAML parsing failed: {0}")]
    #[diagnostic(
        code(rowguard::config::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(rowguard::config::invalid))]
    Invalid(String),
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(err: validator::ValidationErrors) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
