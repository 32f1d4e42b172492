// rowguard-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contract the pipeline expects from a data store (RowSource).
pub mod ports;

// 2. Domain
// Records, validators, duplicate detection, findings aggregation.
// Pure: no I/O.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB row source, settings loader, CSV report writer, atomic writes.
pub mod infrastructure;

// 4. Application (Use Cases)
// The validation run: fetch -> evaluate -> write.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{RunRequest, RunSummary, run_validation};
pub use error::RowguardError;
