//! CSV file writing.

use std::path::{Path, PathBuf};

use crate::error::TcexError;

/// Something that can persist a block of rows.
pub trait DataWriter {
    /// Write the given rows. Fail-loud: errors are logged and propagated so
    /// the caller can react.
    fn write(&self, rows: &[Vec<String>]) -> Result<(), TcexError>;
}

/// CSV implementation of [`DataWriter`].
///
/// Opens the target file for writing, truncating anything already there.
/// Fields containing the delimiter, quotes, or newlines get standard CSV
/// quoting.
pub struct CsvFileWriter {
    path: PathBuf,
    write_headers: bool,
}

impl CsvFileWriter {
    /// Construct a writer for the given file.
    ///
    /// With `write_headers` set, the first row is written as the header
    /// line; the remaining rows follow as plain records.
    pub fn new(path: impl Into<PathBuf>, write_headers: bool) -> Self {
        Self { path: path.into(), write_headers }
    }

    /// Get the target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_records(&self, rows: &[Vec<String>]) -> Result<(), TcexError> {
        let mut writer = csv::WriterBuilder::new().from_path(&self.path)?;

        let mut records = rows.iter();
        if self.write_headers {
            if let Some(header) = records.next() {
                writer.write_record(header)?;
            }
        }
        for record in records {
            writer.write_record(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl DataWriter for CsvFileWriter {
    fn write(&self, rows: &[Vec<String>]) -> Result<(), TcexError> {
        self.write_records(rows).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "unable to perform CSV export");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter().map(|row| row.iter().map(|s| s.to_string()).collect()).collect()
    }

    #[test]
    fn test_header_and_quoting_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        let writer = CsvFileWriter::new(&path, true);
        writer
            .write(&rows(&[&["id", "name"], &["1", "Alice"], &["2", "Bob, Jr."]]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["id,name", "1,Alice", "2,\"Bob, Jr.\""]);
    }

    #[test]
    fn test_quotes_and_newlines_are_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        let writer = CsvFileWriter::new(&path, false);
        writer.write(&rows(&[&["say \"hi\"", "line1\nline2"]])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "\"say \"\"hi\"\"\",\"line1\nline2\"\n");
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content\nwith lines\n").unwrap();

        let writer = CsvFileWriter::new(&path, false);
        writer.write(&rows(&[&["fresh"]])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_written_dump_round_trips_through_a_csv_reader() {
        use crate::models::{CellValue, TableDump};

        let dump = TableDump {
            name: "events".to_string(),
            columns: vec!["id".to_string(), "label".to_string(), "note".to_string()],
            rows: vec![
                vec![CellValue::Int(1), CellValue::Text("a,b".into()), CellValue::Null],
                vec![CellValue::Int(2), CellValue::Text("plain".into()), CellValue::Bool(false)],
            ],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        CsvFileWriter::new(&path, true).write(&dump.to_records()).unwrap();

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, dump.columns);

        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        let expected: Vec<Vec<String>> = dump
            .rows
            .iter()
            .map(|row| row.iter().map(CellValue::render).collect())
            .collect();
        assert_eq!(records, expected);
    }

    #[test]
    fn test_write_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // The target is a directory, so opening it as a file fails.
        let writer = CsvFileWriter::new(dir.path(), true);
        let err = writer.write(&rows(&[&["id"]])).unwrap_err();
        assert_eq!(err.category(), "Csv");
    }
}
