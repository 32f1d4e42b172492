// rowguard-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::quality::{DuplicateKeyKind, QualityConfig};
use crate::domain::record::ColumnMapping;
use crate::infrastructure::error::ConfigError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["rowguard.yaml", "rowguard.yml"];

pub const ENV_NAME_MAX_LENGTH: &str = "ROWGUARD_NAME_MAX_LENGTH";
pub const ENV_DUPLICATE_KEY: &str = "ROWGUARD_DUPLICATE_KEY";
pub const ENV_FETCH_TIMEOUT: &str = "ROWGUARD_FETCH_TIMEOUT_SECS";

/// Everything a run needs besides its three positional arguments.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub columns: ColumnMapping,

    #[validate(nested)]
    #[serde(default)]
    pub rules: QualityConfig,

    #[serde(default)]
    pub timeouts: Timeouts,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_secs: Option<u64>,
}

impl Timeouts {
    pub fn fetch(&self) -> Option<Duration> {
        self.fetch_secs.map(Duration::from_secs)
    }
}

impl Settings {
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(ConfigError::from)
    }
}

// --- LOADER ---

/// Layers: defaults < YAML file < environment. An explicit path must exist;
/// otherwise the first candidate found in `working_dir` is used, if any.
#[instrument(skip(working_dir))]
pub fn load_settings(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings, ConfigError> {
    let path = match explicit {
        Some(path) if path.is_file() => Some(path.to_path_buf()),
        Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
        None => find_config(working_dir),
    };

    let mut settings = match path {
        Some(path) => {
            info!(path = ?path, "Loading settings");
            parse_settings(&path)?
        }
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.check()?;

    Ok(settings)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

fn parse_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// `env` is a lookup so tests never touch the process environment.
pub fn apply_env_overrides<F>(settings: &mut Settings, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_NAME_MAX_LENGTH) {
        let parsed = parse_number(ENV_NAME_MAX_LENGTH, &val)?;
        info!(
            old = settings.rules.name.max_length,
            new = parsed,
            "Overriding name max length via ENV"
        );
        settings.rules.name.max_length = parsed as usize;
    }
    if let Some(val) = env(ENV_DUPLICATE_KEY) {
        let parsed: DuplicateKeyKind = val.parse().map_err(ConfigError::Invalid)?;
        info!(
            old = %settings.rules.duplicates.key,
            new = %parsed,
            "Overriding duplicate key via ENV"
        );
        settings.rules.duplicates.key = parsed;
    }
    if let Some(val) = env(ENV_FETCH_TIMEOUT) {
        let parsed = parse_number(ENV_FETCH_TIMEOUT, &val)?;
        info!(
            old = ?settings.timeouts.fetch_secs,
            new = parsed,
            "Overriding fetch timeout via ENV"
        );
        settings.timeouts.fetch_secs = Some(parsed);
    }
    Ok(())
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| {
        let msg = format!("{key} must be a non-negative integer, got '{raw}'");
        ConfigError::Invalid(msg)
    })
}
