// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Command-line interface definitions and parsing

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use clap::Subcommand;
use outbreak::MetricKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Snapshot CSV to load, overriding the configuration
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// List series in tree order instead of date order
    #[arg(long)]
    pub structural: bool,

    /// Threads used to build the store, overriding the configuration
    #[arg(short, long)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the countries in the snapshot
    Countries,
    /// Print a metric series, optionally limited to a date range
    Stats {
        country: String,
        /// newCases, totalCases, newDeaths or totalDeaths
        metric: MetricKind,
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Print the reading of one day
    Point {
        country: String,
        metric: MetricKind,
        /// Date of the reading (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Forecast tomorrow's value of a metric
    Forecast { country: String, metric: MetricKind },
}
