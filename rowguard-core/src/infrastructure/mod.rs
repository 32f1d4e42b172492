// rowguard-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod report;

pub use report::{render_report, write_report};
