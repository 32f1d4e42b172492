// rowguard-core/src/domain/record.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of a fetched row: the primary-key value when the table exposes
/// one, otherwise the 1-based fetch position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_position(position: usize) -> Self {
        Self(position.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row under validation. NULL cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identity: RecordId,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new(identity: RecordId, name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            identity,
            name: name.map(str::to_string),
            last_name: None,
            email: email.map(str::to_string),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_last_name(mut self, last_name: Option<&str>) -> Self {
        self.last_name = last_name.map(str::to_string);
        self
    }
}

/// Which source columns feed the typed fields of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_identity")]
    pub identity: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_last_name")]
    pub last_name: String,
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            name: default_name(),
            last_name: default_last_name(),
            email: default_email(),
        }
    }
}

fn default_identity() -> String {
    "id".to_string()
}
fn default_name() -> String {
    "name".to_string()
}
fn default_last_name() -> String {
    "last_name".to_string()
}
fn default_email() -> String {
    "email".to_string()
}

/// Column positions resolved against the actual header of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub identity: Option<usize>,
    pub name: usize,
    pub last_name: Option<usize>,
    pub email: usize,
}

impl ColumnMapping {
    /// Resolves the mapping against `columns` (case-insensitive).
    /// Returns the names of the required columns that are absent.
    pub fn resolve(&self, columns: &[String]) -> Result<ResolvedColumns, Vec<String>> {
        let find = |wanted: &str| columns.iter().position(|c| c.eq_ignore_ascii_case(wanted));

        let name = find(&self.name);
        let email = find(&self.email);

        match (name, email) {
            (Some(name), Some(email)) => Ok(ResolvedColumns {
                identity: find(&self.identity),
                name,
                last_name: find(&self.last_name),
                email,
            }),
            (name, email) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push(self.name.clone());
                }
                if email.is_none() {
                    missing.push(self.email.clone());
                }
                Err(missing)
            }
        }
    }
}

impl ResolvedColumns {
    /// Builds a record from one row of cells laid out like the resolved header.
    /// `position` is 1-based and becomes the identity when no identity column exists.
    /// A NULL identity cell yields a blank identity, rejected during evaluation.
    pub fn build_record(
        &self,
        header: &[String],
        cells: Vec<Option<String>>,
        position: usize,
    ) -> Record {
        // Mappings may share a column (ex: identity on the email column), so cells are cloned.
        let cell = |idx: usize| cells.get(idx).cloned().flatten();

        let identity = match self.identity {
            Some(idx) => RecordId::new(cell(idx).unwrap_or_default()),
            None => RecordId::from_position(position),
        };
        let name = cell(self.name);
        let email = cell(self.email);
        let last_name = self.last_name.and_then(cell);

        let used = [
            Some(self.name),
            Some(self.email),
            self.identity,
            self.last_name,
        ];
        let extra = header
            .iter()
            .enumerate()
            .filter(|(idx, _)| !used.contains(&Some(*idx)))
            .map(|(idx, column)| (column.clone(), cell(idx)))
            .collect();

        Record {
            identity,
            name,
            last_name,
            email,
            extra,
        }
    }
}
