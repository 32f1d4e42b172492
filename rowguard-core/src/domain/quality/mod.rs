// rowguard-core/src/domain/quality/mod.rs

pub mod configuration;
pub mod duplicates;
pub mod email;
pub mod name;
pub mod rule;

// Re-exports
pub use configuration::{DuplicateKeep, DuplicateKeyKind, DuplicatePolicy, NameRules, QualityConfig};
pub use duplicates::{DuplicateDetector, DuplicateFlags, DuplicateKey};
pub use email::is_valid_email;
pub use name::is_valid_name;
pub use rule::{QualityRule, Violations};
