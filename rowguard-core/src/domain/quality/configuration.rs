// rowguard-core/src/domain/quality/configuration.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, PartialEq)]
pub struct QualityConfig {
    #[validate(nested)]
    #[serde(default)]
    pub name: NameRules,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Inclusive length bounds (in characters) for name fields.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy, PartialEq, Eq)]
#[validate(schema(function = "validate_name_bounds"))]
pub struct NameRules {
    #[validate(range(min = 1, message = "min_length must be at least 1"))]
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[validate(range(max = 1000, message = "max_length cannot exceed 1000"))]
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

fn default_min_length() -> usize {
    1
}
fn default_max_length() -> usize {
    50
}

fn validate_name_bounds(rules: &NameRules) -> Result<(), ValidationError> {
    if rules.min_length > rules.max_length {
        let mut err = ValidationError::new("name_bounds");
        err.message = Some("min_length cannot be greater than max_length".into());
        return Err(err);
    }
    Ok(())
}

/// Fields that define the duplicate-grouping key.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyKind {
    #[default]
    Email,
    NameEmail,
}

impl DuplicateKeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::NameEmail => "name_email",
        }
    }
}

impl FromStr for DuplicateKeyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "name_email" | "name-email" => Ok(Self::NameEmail),
            other => Err(format!(
                "Invalid duplicate key: '{}'. Expected one of: email, name_email.",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicateKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which members of a duplicate group get flagged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeep {
    /// Every member is flagged.
    #[default]
    All,
    /// The first member in fetch order is canonical and left unflagged.
    First,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DuplicatePolicy {
    #[serde(default)]
    pub key: DuplicateKeyKind,
    #[serde(default)]
    pub keep: DuplicateKeep,
}
