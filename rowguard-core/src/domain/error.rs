// rowguard-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Record batches that break the row source contract.
#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Validation error: record at position {position} has no identity")]
    #[diagnostic(
        code(rowguard::domain::missing_identity),
        help("The identity column must be populated for every row (check for NULL keys).")
    )]
    MissingIdentity { position: usize },

    #[error("Validation error: identity '{identity}' appears on more than one record")]
    #[diagnostic(
        code(rowguard::domain::duplicate_identity),
        help("The identity column must be unique. Point `columns.identity` at the primary key.")
    )]
    DuplicateIdentity { identity: String },
}
