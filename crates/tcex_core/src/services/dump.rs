//! Table dumper: full-table scans with column metadata.

use rust_decimal::Decimal;
use tokio_postgres::types::Type;
use tokio_postgres::Row;

use crate::error::TcexError;
use crate::models::{CellValue, DatabaseDump, TableDump};
use crate::services::datasource::{DataSource, DbConnection};

/// Table content dumping service.
pub struct DumpService;

impl DumpService {
    /// Dump the full content of the named tables, with column names.
    ///
    /// One connection serves the whole batch. Table names are interpolated
    /// into the query text without quoting, so they must come from a trusted
    /// source — in practice the schema reader's own output, never free-form
    /// user text.
    ///
    /// Fail-soft: any database error during the batch is logged and an empty
    /// dump is returned, discarding partial results. An empty input list
    /// returns an empty dump without touching the database.
    pub async fn dump_tables(data_source: &DataSource, table_names: &[String]) -> DatabaseDump {
        if table_names.is_empty() {
            return DatabaseDump::default();
        }

        match Self::fetch_tables(data_source, table_names).await {
            Ok(dump) => dump,
            Err(err) => {
                tracing::error!(error = %err, "unable to fetch table content");
                DatabaseDump::default()
            }
        }
    }

    async fn fetch_tables(
        data_source: &DataSource,
        table_names: &[String],
    ) -> Result<DatabaseDump, TcexError> {
        let conn = data_source.connect().await?;
        let mut dump = DatabaseDump::default();
        for name in table_names {
            dump.insert(Self::fetch_table(&conn, name).await?);
        }
        Ok(dump)
    }

    async fn fetch_table(conn: &DbConnection, name: &str) -> Result<TableDump, TcexError> {
        // Preparing first keeps the column metadata even when the table is
        // empty.
        let statement = conn.prepare(&format!("SELECT * FROM {name}")).await?;
        let columns: Vec<String> =
            statement.columns().iter().map(|col| col.name().to_string()).collect();

        let rows = conn.query_statement(&statement, &[]).await?;
        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            data.push(row_values(row)?);
        }

        tracing::debug!(table = name, rows = data.len(), "table content fetched");

        Ok(TableDump { name: name.to_string(), columns, rows: data })
    }
}

/// Decode every cell of a result row into its native value.
fn row_values(row: &Row) -> Result<Vec<CellValue>, TcexError> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        values.push(cell_value(row, idx, column.type_())?);
    }
    Ok(values)
}

fn cell_value(row: &Row, idx: usize, ty: &Type) -> Result<CellValue, TcexError> {
    let value = match ty.name() {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(CellValue::Bool),
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(|v| CellValue::Int(v.into())),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(|v| CellValue::Int(v.into())),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(CellValue::Int),
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|v| CellValue::Float(v.into())),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(CellValue::Float),
        "numeric" => row.try_get::<_, Option<Decimal>>(idx)?.map(CellValue::Decimal),
        "text" | "varchar" | "bpchar" | "name" | "citext" => {
            row.try_get::<_, Option<String>>(idx)?.map(CellValue::Text)
        }
        "bytea" => row.try_get::<_, Option<Vec<u8>>>(idx)?.map(CellValue::Bytes),
        "date" => row.try_get::<_, Option<chrono::NaiveDate>>(idx)?.map(CellValue::Date),
        "time" => row.try_get::<_, Option<chrono::NaiveTime>>(idx)?.map(CellValue::Time),
        "timestamp" => {
            row.try_get::<_, Option<chrono::NaiveDateTime>>(idx)?.map(CellValue::Timestamp)
        }
        "timestamptz" => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map(CellValue::TimestampTz),
        "uuid" => row.try_get::<_, Option<uuid::Uuid>>(idx)?.map(CellValue::Uuid),
        "json" | "jsonb" => row.try_get::<_, Option<serde_json::Value>>(idx)?.map(CellValue::Json),
        other => match row.try_get::<_, Option<String>>(idx) {
            Ok(text) => text.map(CellValue::Text),
            Err(_) => {
                tracing::warn!(
                    column = row.columns()[idx].name(),
                    column_type = other,
                    "unsupported column type, rendering as NULL"
                );
                None
            }
        },
    };
    Ok(value.unwrap_or(CellValue::Null))
}
