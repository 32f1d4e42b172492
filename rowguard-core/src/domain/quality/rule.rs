// rowguard-core/src/domain/quality/rule.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The fixed set of row checks. Declaration order is the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRule {
    InvalidEmail,
    InvalidName,
    Duplicate,
}

impl QualityRule {
    pub const ALL: [QualityRule; 3] = [Self::InvalidEmail, Self::InvalidName, Self::Duplicate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::InvalidName => "invalid_name",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for QualityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules violated by a single record. Renders as `invalid_email;duplicate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(BTreeSet<QualityRule>);

impl Violations {
    pub fn insert(&mut self, rule: QualityRule) {
        self.0.insert(rule);
    }

    pub fn contains(&self, rule: QualityRule) -> bool {
        self.0.contains(&rule)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QualityRule> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<QualityRule> for Violations {
    fn from_iter<I: IntoIterator<Item = QualityRule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            f.write_str(rule.as_str())?;
        }
        Ok(())
    }
}
