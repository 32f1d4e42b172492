// rowguard-core/src/ports/row_source.rs

// What the pipeline needs from a data store, without knowing which store it is.

use async_trait::async_trait;

use crate::domain::record::{ColumnMapping, Record};
use crate::infrastructure::error::SourceError;

#[async_trait]
pub trait RowSource: Send + Sync {
    /// Every row of `table`, in fetch order, with `name` and `email` resolved
    /// through `columns`. The core never retries a failed fetch.
    async fn fetch_records(
        &self,
        table: &str,
        columns: &ColumnMapping,
    ) -> Result<Vec<Record>, SourceError>;

    fn engine_name(&self) -> &str;
}
