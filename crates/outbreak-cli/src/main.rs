// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use std::fs;
use std::process;

use clap::Parser;
use tracing::error;
use tracing::info;

use outbreak::snapshot;
use outbreak_cli::cli::Cli;
use outbreak_cli::commands::CommandDispatcher;
use outbreak_cli::config::AppConfig;
use outbreak_cli::error::CliError;
use outbreak_cli::error::Result;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e}");
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_configuration(cli)?.with_overrides(cli.structural, cli.threads)?;
    let path = cli
        .snapshot
        .as_ref()
        .or(config.snapshot.as_ref())
        .ok_or_else(|| CliError::Config("no snapshot given; pass --snapshot or set it in the config".to_string()))?;

    info!("Loading snapshot from: {}", path.display());
    let bytes = fs::read(path)?;
    let store = snapshot::load_store(&bytes, &config.store)?;

    CommandDispatcher::execute(&cli.command, &store, cli.json)
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load configuration from file or use defaults
fn load_configuration(cli: &Cli) -> Result<AppConfig> {
    match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            AppConfig::load_from_file(path)
        }
        None => Ok(AppConfig::default()),
    }
}
