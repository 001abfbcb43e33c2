//! Export orchestrator.
//!
//! Drives the sequence: load table names, take a selection from the caller,
//! dump the selected tables, write one CSV file per table. One action runs
//! at a time, to completion; there is no cancellation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::DatabaseDump;
use crate::services::{DataSource, DumpService, SchemaService};

use super::status::StatusSink;
use super::writer::{CsvFileWriter, DataWriter};

/// Where the orchestrator currently is in its action sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    /// Nothing in flight
    #[default]
    Idle,
    /// Fetching the schema's table names
    LoadingNames,
    /// Table names available, waiting for a selection
    Ready,
    /// Fetching the selected tables' content
    LoadingContent,
    /// Writing CSV files
    Exporting,
}

impl ExportPhase {
    /// Check if no action is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if a selection can be exported.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Outcome of one export action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written, in export order.
    pub written: Vec<PathBuf>,
    /// Tables whose file could not be written.
    pub failed: Vec<String>,
}

impl ExportSummary {
    /// Check if every selected table was written.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives schema loading, content dumping, and CSV writing.
pub struct Exporter {
    data_source: DataSource,
    status: Arc<dyn StatusSink>,
    phase: ExportPhase,
    tables: Vec<String>,
}

impl Exporter {
    /// Create an orchestrator over the given data source, reporting status
    /// to the given sink.
    pub fn new(data_source: DataSource, status: Arc<dyn StatusSink>) -> Self {
        Self { data_source, status, phase: ExportPhase::Idle, tables: Vec::new() }
    }

    /// Get the current phase.
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// Get the selectable table names from the last load.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Load the table names of the given schema and make them selectable.
    ///
    /// Fail-soft like the schema reader underneath: on a database error the
    /// selectable list comes back empty.
    pub async fn load_table_names(&mut self, schema: &str) -> &[String] {
        self.phase = ExportPhase::LoadingNames;
        self.status.on_status("loading started");

        let names = SchemaService::list_tables(&self.data_source, schema).await;
        for name in &names {
            tracing::info!(table = %name, "table discovered");
        }
        self.tables = names;

        self.status.on_status("loading finished");
        self.phase = ExportPhase::Ready;
        &self.tables
    }

    /// Dump the selected tables and write one `<table>.csv` per table into
    /// `out_dir`.
    ///
    /// Only explicitly selected tables are exported; an empty selection
    /// writes nothing. A write failure on one file is reported and does not
    /// abort the remaining files. Returns to idle when done.
    pub async fn load_and_export(&mut self, selected: &[String], out_dir: &Path) -> ExportSummary {
        self.phase = ExportPhase::LoadingContent;
        self.status.on_status("loading started");
        let dump = DumpService::dump_tables(&self.data_source, selected).await;
        self.status.on_status("loading finished");

        self.phase = ExportPhase::Exporting;
        let summary = self.export_dump(&dump, out_dir);
        self.phase = ExportPhase::Idle;
        summary
    }

    /// Write every table of an already-loaded dump, one CSV file each.
    pub fn export_dump(&self, dump: &DatabaseDump, out_dir: &Path) -> ExportSummary {
        let mut summary = ExportSummary::default();

        for table in dump.tables() {
            let file_name = format!("{}.csv", table.name);
            self.status.on_status(&format!("exporting {file_name}"));

            let writer = CsvFileWriter::new(out_dir.join(&file_name), true);
            match writer.write(&table.to_records()) {
                Ok(()) => {
                    tracing::info!(file = %file_name, rows = table.row_count(), "table exported");
                    self.status.on_status(&format!("exporting to {file_name} finished"));
                    summary.written.push(writer.path().to_path_buf());
                }
                Err(err) => {
                    // Already logged by the writer; keep going with the rest.
                    tracing::warn!(file = %file_name, error = %err, "export failed, continuing");
                    self.status.on_status("exporting failed");
                    summary.failed.push(table.name.clone());
                }
            }
        }

        summary
    }
}
