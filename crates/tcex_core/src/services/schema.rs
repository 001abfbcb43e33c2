//! Schema reader: table names visible in one schema.

use crate::error::TcexError;
use crate::services::datasource::DataSource;

/// Ordinary tables in the given schema, in whatever order the server
/// returns them. No ORDER BY and no client-side sorting.
const FETCH_TABLE_NAMES_SQL: &str = r#"
SELECT c.relname AS table_name
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE c.relkind = 'r'
  AND n.nspname = $1
"#;

/// Schema introspection service.
pub struct SchemaService;

impl SchemaService {
    /// Load the table names of the given schema.
    ///
    /// Fail-soft: any database error (including a failed connect) is logged
    /// and an empty list is returned instead of propagating. An empty list
    /// therefore means "no tables or the lookup failed"; the connection is
    /// released on every path.
    pub async fn list_tables(data_source: &DataSource, schema: &str) -> Vec<String> {
        match Self::fetch_table_names(data_source, schema).await {
            Ok(names) => names,
            Err(err) => {
                tracing::error!(error = %err, schema, "unable to fetch table names");
                Vec::new()
            }
        }
    }

    async fn fetch_table_names(
        data_source: &DataSource,
        schema: &str,
    ) -> Result<Vec<String>, TcexError> {
        let conn = data_source.connect().await?;
        let rows = conn.query(FETCH_TABLE_NAMES_SQL, &[&schema]).await?;
        Ok(rows.iter().map(|row| row.get("table_name")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{DATABASE, HOST, PASSWORD, USER};
    use crate::models::ExporterConfig;
    use std::collections::HashMap;

    fn unreachable_data_source() -> DataSource {
        let map = HashMap::from([
            (HOST.to_string(), "127.0.0.1".to_string()),
            (USER.to_string(), "nobody".to_string()),
            (PASSWORD.to_string(), "nothing".to_string()),
            (DATABASE.to_string(), "void".to_string()),
        ]);
        DataSource::new(ExporterConfig::from_map(&map).unwrap())
    }

    #[tokio::test]
    async fn test_list_tables_is_fail_soft_on_connection_failure() {
        let ds = unreachable_data_source();
        let tables = SchemaService::list_tables(&ds, "public").await;
        assert!(tables.is_empty());
    }
}
