// rowguard-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{AccessMode, Config, Connection};
use std::sync::{Arc, Mutex};
use tracing::debug;

// Imports Hexagonaux
use crate::domain::record::{ColumnMapping, Record};
use crate::infrastructure::config::connection::ConnectionDescriptor;
use crate::infrastructure::error::SourceError;
use crate::ports::row_source::RowSource;

const DEFAULT_SCHEMA: &str = "main";

pub struct DuckDBSource {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBSource {
    /// Opens the database behind a connection string. Files are opened
    /// read-only and must already exist.
    pub fn connect(connection_string: &str) -> Result<Self, SourceError> {
        Self::open(&ConnectionDescriptor::parse(connection_string)?)
    }

    pub fn open(descriptor: &ConnectionDescriptor) -> Result<Self, SourceError> {
        let conn = match descriptor {
            ConnectionDescriptor::InMemory => {
                Connection::open_in_memory().map_err(SourceError::Connection)?
            }
            ConnectionDescriptor::File(path) => {
                if !path.is_file() {
                    return Err(SourceError::DatabaseNotFound { path: path.clone() });
                }
                let config = Config::default()
                    .access_mode(AccessMode::ReadOnly)
                    .map_err(SourceError::Connection)?;
                Connection::open_with_flags(path, config).map_err(SourceError::Connection)?
            }
        };
        debug!(?descriptor, "DuckDB connection opened");

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl RowSource for DuckDBSource {
    async fn fetch_records(
        &self,
        table: &str,
        columns: &ColumnMapping,
    ) -> Result<Vec<Record>, SourceError> {
        let table = TableRef::parse(table)?;
        let columns = columns.clone();
        let conn = Arc::clone(&self.conn);

        // The driver blocks; keep it off the runtime so a fetch deadline can fire.
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| SourceError::Interrupted("DuckDB Mutex Poisoned".into()))?;
            fetch_all(&conn, &table, &columns)
        })
        .await
        .map_err(|e| SourceError::Interrupted(e.to_string()))?
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

/// `table` or `schema.table`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRef {
    raw: String,
    schema: String,
    table: String,
}

impl TableRef {
    fn parse(raw: &str) -> Result<Self, SourceError> {
        let invalid = || SourceError::InvalidTableName(raw.to_string());
        let parts: Vec<&str> = raw.trim().split('.').collect();
        let (schema, table) = match parts.as_slice() {
            [table] => (DEFAULT_SCHEMA, *table),
            [schema, table] => (*schema, *table),
            _ => return Err(invalid()),
        };
        if schema.is_empty() || table.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            raw: raw.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn fetch_all(
    conn: &Connection,
    table: &TableRef,
    columns: &ColumnMapping,
) -> Result<Vec<Record>, SourceError> {
    let (schema, name, header) = describe(conn, table)?;
    if header.is_empty() {
        return Err(SourceError::TableNotFound(table.raw.clone()));
    }

    let resolved = columns
        .resolve(&header)
        .map_err(|missing| SourceError::SchemaMismatch {
            table: table.raw.clone(),
            missing,
        })?;

    // Every column as text, whatever its declared type
    let projection = header
        .iter()
        .map(|c| format!("CAST({} AS VARCHAR)", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM {}.{}",
        projection,
        quote_ident(&schema),
        quote_ident(&name)
    );
    debug!(%sql, "Fetching rows");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let cells = (0..header.len())
            .map(|i| row.get::<_, Option<String>>(i))
            .collect::<Result<Vec<_>, _>>()?;
        let position = records.len() + 1;
        records.push(resolved.build_record(&header, cells, position));
    }

    Ok(records)
}

/// Stored schema name, stored table name and ordered column names.
/// Empty columns when the table does not exist.
fn describe(
    conn: &Connection,
    table: &TableRef,
) -> Result<(String, String, Vec<String>), SourceError> {
    let mut stmt = conn.prepare(
        "SELECT table_schema, table_name, column_name
         FROM information_schema.columns
         WHERE lower(table_schema) = lower(?::VARCHAR) AND lower(table_name) = lower(?::VARCHAR)
         ORDER BY ordinal_position",
    )?;

    let rows = stmt
        .query_map(duckdb::params![table.schema, table.table], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let (schema, name) = match rows.first() {
        Some((schema, name, _)) => (schema.clone(), name.clone()),
        None => (table.schema.clone(), table.table.clone()),
    };
    let header = rows.into_iter().map(|(_, _, column)| column).collect();

    Ok((schema, name, header))
}
