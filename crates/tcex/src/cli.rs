//! Command-line argument surface.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Export database table contents to CSV files", long_about = None)]
pub struct Cli {
    /// Schema to inspect. Defaults to the configured database name.
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Table to export; may be given multiple times.
    #[arg(short = 't', long = "table", value_name = "NAME")]
    pub tables: Vec<String>,

    /// Export every table in the schema.
    #[arg(long, conflicts_with = "tables")]
    pub all: bool,

    /// List the schema's tables and exit without exporting.
    #[arg(long)]
    pub list: bool,

    /// Directory the CSV files are written to.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Env file with the TCEX_* connection settings. Without this flag a
    /// `.env` in the working directory is picked up when present.
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

/// Resolve the tables to export from the listed ones and the request.
///
/// Only names the schema reader actually returned are exportable; anything
/// else in the request is reported back as unknown rather than interpolated
/// into a query.
pub fn select_tables(available: &[String], requested: &[String], all: bool) -> Selection {
    if all {
        return Selection { selected: available.to_vec(), unknown: Vec::new() };
    }

    let mut selection = Selection::default();
    for name in requested {
        if available.contains(name) {
            if !selection.selected.contains(name) {
                selection.selected.push(name.clone());
            }
        } else {
            selection.unknown.push(name.clone());
        }
    }
    selection
}

/// Outcome of matching the request against the listed tables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Names to export, in request order, deduplicated.
    pub selected: Vec<String>,
    /// Requested names the schema does not have.
    pub unknown: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_selects_every_listed_table() {
        let selection = select_tables(&names(&["a", "b"]), &[], true);
        assert_eq!(selection.selected, names(&["a", "b"]));
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_unknown_names_are_rejected_not_exported() {
        let selection = select_tables(&names(&["a", "b"]), &names(&["b", "nope"]), false);
        assert_eq!(selection.selected, names(&["b"]));
        assert_eq!(selection.unknown, names(&["nope"]));
    }

    #[test]
    fn test_empty_request_selects_nothing() {
        let selection = select_tables(&names(&["a"]), &[], false);
        assert!(selection.selected.is_empty());
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_duplicates_collapse_keeping_request_order() {
        let selection = select_tables(&names(&["a", "b", "c"]), &names(&["c", "a", "c"]), false);
        assert_eq!(selection.selected, names(&["c", "a"]));
    }
}
