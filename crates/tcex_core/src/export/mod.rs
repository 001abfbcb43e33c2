//! Export pipeline: CSV writing, status notifications, orchestration.
//!
//! - `writer` - `DataWriter` trait and the CSV file implementation
//! - `status` - Status notification sinks
//! - `exporter` - The export orchestrator and its phase machine

pub mod exporter;
pub mod status;
pub mod writer;

pub use exporter::{ExportPhase, ExportSummary, Exporter};
pub use status::{LogSink, NullSink, StatusSink};
pub use writer::{CsvFileWriter, DataWriter};
