// rowguard-core/src/application/mod.rs

pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement : `use rowguard_core::application::{run_validation, RunRequest};`
pub use pipeline::{RunRequest, RunSummary, run_validation};
