//! Command-line interface for stockgen.
//!
//! Fills a warehouse SQLite database with a reproducible synthetic
//! movement history (inbound restocks, outbound shipments,
//! inter-warehouse transfers) so that a demand-forecasting module has
//! historical signal to train against.
//!
//! # Usage Examples
//!
//! ```bash
//! # One year of history ending today, default seed
//! stockgen --db kpo.db
//!
//! # Fixed range, explicit seed, only two products
//! stockgen --db kpo.db --seed 7 \
//!   --start 2024-01-01 --end 2024-12-31 \
//!   --products 3,5
//!
//! # Start from a clean slate, removing organic rows too
//! stockgen --db kpo.db --wipe-all
//!
//! # Check what a run would produce without committing
//! stockgen --db kpo.db --dry-run
//! ```

use anyhow::Context;
use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use stockgen::parse_date;
use stockgen_populate_sqlite::{populate, MovementStore, PopulateOptions};

#[derive(Parser)]
#[command(name = "stockgen")]
#[command(
    about = "Fill a warehouse database with reproducible synthetic movements for forecasting"
)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, env = "STOCKGEN_DB")]
    db: PathBuf,

    /// Random seed keeping the generated history stable across runs
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Start date YYYY-MM-DD (default: 364 days before the end date)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// End date YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Comma-separated product ids to generate for (default: all)
    #[arg(long, value_delimiter = ',')]
    products: Vec<i64>,

    /// Delete all existing movements before inserting, organic rows included
    #[arg(long)]
    wipe_all: bool,

    /// Run the full pipeline but roll back instead of committing
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let end = cli.end.unwrap_or_else(|| Local::now().date_naive());
    let start = cli.start.unwrap_or(end - Duration::days(364));
    let products = if cli.products.is_empty() {
        None
    } else {
        Some(cli.products.clone())
    };

    let mut store = MovementStore::open(&cli.db)
        .with_context(|| format!("failed to open store at {}", cli.db.display()))?;
    store
        .migrate()
        .context("failed to prepare the store schema")?;

    let options = PopulateOptions {
        seed: cli.seed,
        start,
        end,
        products,
        wipe_all: cli.wipe_all,
        dry_run: cli.dry_run,
    };
    let counts = populate(&mut store, &options).context("population failed")?;

    println!(
        "Inserted {} inbound, {} outbound, {} transfer synthetic movements into {}.",
        counts.inbound,
        counts.outbound,
        counts.transfers,
        cli.db.display()
    );
    if cli.dry_run {
        println!("Dry run: transaction rolled back, nothing was committed.");
    }
    println!("Range: {start} to {end}");
    Ok(())
}
