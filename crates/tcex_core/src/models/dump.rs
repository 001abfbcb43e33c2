//! In-memory representation of dumped table content.
//!
//! A dump is built fresh for each export request and discarded once the CSV
//! files are written; nothing here is cached or persisted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single database value in its native type.
///
/// Covers the types the dumper decodes directly; anything else is carried as
/// text. [`CellValue::render`] produces the string written to CSV, with NULL
/// rendering as an empty field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// SQL NULL
    Null,
    /// boolean
    Bool(bool),
    /// smallint, integer, bigint
    Int(i64),
    /// real, double precision
    Float(f64),
    /// numeric
    Decimal(Decimal),
    /// text, varchar, char, name
    Text(String),
    /// bytea
    Bytes(Vec<u8>),
    /// date
    Date(NaiveDate),
    /// time without time zone
    Time(NaiveTime),
    /// timestamp without time zone
    Timestamp(NaiveDateTime),
    /// timestamp with time zone
    TimestampTz(DateTime<Utc>),
    /// uuid
    Uuid(Uuid),
    /// json, jsonb
    Json(serde_json::Value),
}

impl CellValue {
    /// Render the value as the string form written to CSV.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::Bytes(v) => {
                // psql-style hex rendering
                let mut out = String::with_capacity(2 + v.len() * 2);
                out.push_str("\\x");
                for byte in v {
                    out.push_str(&format!("{byte:02x}"));
                }
                out
            }
            Self::Date(v) => v.to_string(),
            Self::Time(v) => v.to_string(),
            Self::Timestamp(v) => v.to_string(),
            Self::TimestampTz(v) => v.to_string(),
            Self::Uuid(v) => v.to_string(),
            Self::Json(v) => v.to_string(),
        }
    }

    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Column names and rows fetched for one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDump {
    /// Table name within the dumped schema.
    pub name: String,
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Rows in result order, each cell matching the column at its index.
    pub rows: Vec<Vec<CellValue>>,
}

impl TableDump {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Flatten into CSV-ready records: the header followed by rendered rows.
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.columns.clone());
        for row in &self.rows {
            records.push(row.iter().map(CellValue::render).collect());
        }
        records
    }
}

/// A database dump: one [`TableDump`] per requested table.
///
/// Tables keep the order they were requested in, which is also the order
/// they are exported in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDump {
    tables: Vec<TableDump>,
}

impl DatabaseDump {
    /// Add a table dump, keeping request order.
    pub fn insert(&mut self, table: TableDump) {
        self.tables.push(table);
    }

    /// Look up a table dump by name.
    pub fn get(&self, name: &str) -> Option<&TableDump> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get the dumped tables in request order.
    pub fn tables(&self) -> &[TableDump] {
        &self.tables
    }

    /// Get the number of dumped tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the dump is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renders_as_empty_field() {
        assert_eq!(CellValue::Null.render(), "");
        assert!(CellValue::Null.is_null());
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(CellValue::Bool(true).render(), "true");
        assert_eq!(CellValue::Int(-42).render(), "-42");
        assert_eq!(CellValue::Text("Alice".into()).render(), "Alice");
        assert_eq!(CellValue::Bytes(vec![0xde, 0xad]).render(), "\\xdead");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(CellValue::Date(date).render(), "2024-03-01");
    }

    #[test]
    fn test_to_records_prepends_header() {
        let dump = TableDump {
            name: "users".to_string(),
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec![CellValue::Int(1), CellValue::Text("Alice".into())],
                vec![CellValue::Int(2), CellValue::Null],
            ],
        };
        let records = dump.to_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec!["id", "name"]);
        assert_eq!(records[1], vec!["1", "Alice"]);
        assert_eq!(records[2], vec!["2", ""]);
    }

    #[test]
    fn test_dump_preserves_request_order() {
        let mut dump = DatabaseDump::default();
        for name in ["zebra", "apple", "mango"] {
            dump.insert(TableDump { name: name.to_string(), ..Default::default() });
        }
        let names: Vec<&str> = dump.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "apple", "mango"]);
        assert!(dump.get("apple").is_some());
        assert!(dump.get("pear").is_none());
        assert_eq!(dump.len(), 3);
    }
}
