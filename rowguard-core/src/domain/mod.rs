pub mod error;
pub mod findings;
pub mod quality;
pub mod record;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use findings::{Finding, FindingsReport, RuleCounts, ValidationOutcome, evaluate};
pub use record::{ColumnMapping, Record, RecordId};
