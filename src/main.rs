use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv_search::{SearchOutcome, Table, TableOptions};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Search a CSV file for a value
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file to load
    file: PathBuf,

    /// Value to search for (case-insensitive, whole word or whole cell)
    value: String,

    /// Restrict the search to a header name or zero-based column position
    #[arg(short, long)]
    column: Option<String>,

    /// Treat the first line as column names
    #[arg(long)]
    has_header: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = TableOptions {
        has_header: args.has_header,
    };

    let table = Table::load_csv(&args.file, options)
        .with_context(|| format!("loading {}", args.file.display()))?;
    info!(
        rows = table.row_count(),
        ragged = table.summary().ragged_rows.len(),
        "table ready"
    );

    let outcome = table
        .search(&args.value, args.column.as_deref())
        .context("searching")?;

    match &outcome {
        SearchOutcome::Found { .. } => {
            for row in outcome.display_rows() {
                println!("{}", row.join(","));
            }
        }
        SearchOutcome::NoMatch => println!("Value was not found"),
        SearchOutcome::FoundElsewhere(other) => {
            println!("{other}");
            println!("Do you want to try searching again with other criteria?");
        }
    }

    Ok(())
}
