use std::io::BufWriter;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use brc::{Config, TableConfig};

/// Prints per-key min/mean/max for a file of `<key>;<value>` lines.
#[derive(Parser)]
#[command(name = "brc", version, about)]
struct Cli {
    /// Input file, one `<key>;<value>` record per line
    file: PathBuf,

    /// Number of parallel workers [default: available parallelism]
    #[arg(long)]
    workers: Option<NonZeroUsize>,

    /// Upper bound on distinct keys; exceeding it is an error
    #[arg(long, default_value_t = brc::config::DEFAULT_MAX_KEYS)]
    max_keys: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(| _ | EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config {
        table: TableConfig::with_max_keys(cli.max_keys)?,
        ..Config::default()
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    let stdout = std::io::stdout();
    let mut lock = BufWriter::new(stdout.lock());
    brc::brc(&cli.file, &config, &mut lock)
        .with_context(|| format!("failed to summarise {}", cli.file.display()))?;
    Ok(())
}
