// rowguard-core/src/infrastructure/config/connection.rs

use std::path::PathBuf;

use crate::infrastructure::error::SourceError;

const DUCKDB_SCHEME: &str = "duckdb://";
const MEMORY: &str = ":memory:";

/// Where the rows live. Accepted forms:
/// - `:memory:`
/// - a bare file path (`customers.duckdb`)
/// - `duckdb:///relative.db` or `duckdb:////absolute/path.db`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionDescriptor {
    InMemory,
    File(PathBuf),
}

impl ConnectionDescriptor {
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let raw = raw.trim();

        let target = if let Some(rest) = raw.strip_prefix(DUCKDB_SCHEME) {
            // SQLAlchemy-style: the host part is empty, so the path follows a third '/'
            rest.strip_prefix('/').unwrap_or(rest)
        } else if let Some((scheme, _)) = raw.split_once("://") {
            return Err(SourceError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        } else {
            raw
        };

        match target {
            "" => Err(SourceError::UnsupportedScheme {
                scheme: raw.to_string(),
            }),
            MEMORY => Ok(Self::InMemory),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}
