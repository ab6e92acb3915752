//! sor-backtest
//!
//! Usage:
//!   sor-backtest --data <CSV> [OPTIONS]
//!
//! Example:
//!   sor-backtest --data l1_day.csv --config backtest.json --output report.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sor_allocator::SearchKind;
use sor_runner::{BacktestConfig, Overrides, run_backtest};

#[derive(Parser)]
#[command(name = "sor-backtest")]
#[command(version, about = "Backtest the venue-split optimizer against naive execution")]
struct Cli {
    /// Tick CSV (ts_event, publisher_id, ask_px_00, ask_sz_00)
    #[arg(short, long)]
    data: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parent order size
    #[arg(long)]
    order_size: Option<u64>,

    /// Quantization step
    #[arg(long)]
    step: Option<u64>,

    /// Search engine: frontier or table
    #[arg(long)]
    search: Option<SearchKind>,

    /// Consider at most this many snapshots
    #[arg(long)]
    max_snapshots: Option<usize>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            order_size: self.order_size,
            step: self.step,
            search: self.search,
            max_snapshots: self.max_snapshots,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            BacktestConfig::from_file(path)?
        }
        None => BacktestConfig::default(),
    }
    .with_overrides(&cli.overrides());

    let outcome = run_backtest(&config, &cli.data)
        .with_context(|| format!("backtest over {} failed", cli.data.display()))?;
    let json = outcome.report.to_json_pretty()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
