//! Data models for the tcex export services.
//!
//! - `config` - Connection parameter configuration
//! - `dump` - Dumped table content (`CellValue`, `TableDump`, `DatabaseDump`)

pub mod config;
pub mod dump;

pub use config::ExporterConfig;
pub use dump::{CellValue, DatabaseDump, TableDump};
