// rowguard/src/commands/mod.rs

pub mod validate;
