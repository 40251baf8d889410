//! graphsql operator CLI.
//!
//! Provides the `graphsql` binary for managing and inspecting graph tables
//! in a SQLite database file: creating and dropping the schema, counting,
//! listing, and looking up single vertices or edges. Keys are handled as
//! strings and vertex values as arbitrary JSON.
//!
//! Output is pretty-printed JSON on stdout. Logs go to stderr; set
//! `RUST_LOG` to change the filter and `GRAPHSQL_LOG_FORMAT=json` for
//! machine-parseable logs.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graphsql_storage::SqlStore;

use crate::commands::Commands;
use crate::error::CliError;

/// Manage and inspect graph tables stored in SQLite.
#[derive(Parser)]
#[command(name = "graphsql", about = "Manage and inspect graph tables stored in SQLite")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(short, long)]
    db: PathBuf,

    /// TOML file with table names and column types.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the vertices table name.
    #[arg(long)]
    vertices_table: Option<String>,

    /// Override the edges table name.
    #[arg(long)]
    edges_table: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let exit_code = match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            tracing::error!("{}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn init_tracing() {
    let log_format = std::env::var("GRAPHSQL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graphsql=info,graphsql_storage=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Opens the store described by the global options and runs one subcommand.
fn run(cli: &Cli) -> Result<String, CliError> {
    let config = config::load_store_config(
        cli.config.as_deref(),
        cli.vertices_table.clone(),
        cli.edges_table.clone(),
    )?;
    tracing::debug!(db = %cli.db.display(), ?config, "opening database");

    let mut store = SqlStore::open(&cli.db, config)?;
    let output = commands::execute(&mut store, &cli.command)?;
    Ok(serde_json::to_string_pretty(&output)?)
}
