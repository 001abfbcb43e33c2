//! tcex - export database table contents to CSV files.
//!
//! Command-line frontend over `tcex_core`: loads connection settings from
//! the environment, lists the schema's tables, and exports the selected
//! ones, one CSV file per table.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tcex_core::logging::{init_logging, log_dir, LogConfig};
use tcex_core::{DataSource, Exporter, ExporterConfig, StatusSink};

use cli::Cli;

/// Prints status notifications where a status bar would show them.
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn on_status(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Connection settings come from the environment, optionally seeded from
    // an env file.
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("cannot read env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let _logging_guard = init_logging(LogConfig::new(log_dir()));

    let config = ExporterConfig::from_env()
        .context("connection settings missing; set the TCEX_* variables or use --env-file")?;
    let schema = args.schema.clone().unwrap_or_else(|| config.database().to_string());

    tracing::info!(url = %config.display_url(), schema, "starting tcex");

    let mut exporter = Exporter::new(DataSource::new(config), Arc::new(ConsoleSink));

    let available = exporter.load_table_names(&schema).await.to_vec();
    if args.list {
        for name in &available {
            println!("{name}");
        }
        return Ok(());
    }

    let selection = cli::select_tables(&available, &args.tables, args.all);
    for name in &selection.unknown {
        tracing::warn!(table = %name, "not in schema, skipping");
    }
    if selection.selected.is_empty() {
        eprintln!("nothing selected; use --table or --all (--list shows the schema's tables)");
        return Ok(());
    }

    let summary = exporter.load_and_export(&selection.selected, &args.out_dir).await;

    for path in &summary.written {
        println!("{}", path.display());
    }
    if !summary.is_clean() {
        anyhow::bail!("{} of {} tables failed to export", summary.failed.len(), selection.selected.len());
    }

    Ok(())
}
