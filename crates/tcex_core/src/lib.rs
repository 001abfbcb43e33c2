//! Core services for the tcex table content exporter.
//!
//! This crate provides the non-GUI backend of the utility:
//!
//! - **error**: Error handling with PostgreSQL-specific details
//! - **models**: Connection parameters and dumped table content
//! - **services**: Data source, schema reader, table dumper
//! - **export**: CSV writing, status notifications, orchestration
//! - **logging**: Structured logging setup
//!
//! Reads are fail-soft (errors become empty results), CSV writes are
//! fail-loud (errors propagate to the orchestrator, which reports them and
//! moves on to the next file).

pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;

pub use error::TcexError;
pub use export::{
    CsvFileWriter, DataWriter, ExportPhase, ExportSummary, Exporter, LogSink, NullSink, StatusSink,
};
pub use models::{CellValue, DatabaseDump, ExporterConfig, TableDump};
pub use services::{DataSource, DbConnection, DumpService, SchemaService};
