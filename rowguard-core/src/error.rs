// rowguard-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{ConfigError, SourceError, WriteError};
use miette::Diagnostic;
use thiserror::Error;

/// Every failure is fatal to the run. The variant names the stage that failed.
#[derive(Error, Debug, Diagnostic)]
pub enum RowguardError {
    // --- SETTINGS (file, env, flags) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    // --- FETCH ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    // --- RULE EVALUATION (row source contract violations) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] DomainError),

    // --- REPORT / SUMMARY PERSISTENCE ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] WriteError),
}

impl RowguardError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Source(_) => "source",
            Self::Validation(_) => "validation",
            Self::Write(_) => "write",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Source(_) => 3,
            Self::Validation(_) => 4,
            Self::Write(_) => 5,
        }
    }
}
