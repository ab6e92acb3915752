//! Run wiring: tick file in, report out

use std::path::Path;

use log::info;
use sor_allocator::create_search;
use sor_backtest::{Backtest, BacktestError, BacktestOutcome};
use sor_feed::{CsvSnapshotSource, FeedError};
use thiserror::Error;

use crate::config::{BacktestConfig, ConfigError};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Backtest error: {0}")]
    Backtest(#[from] BacktestError),
}

pub type RunResult<T> = std::result::Result<T, RunError>;

/// Load the tick file and run the configured backtest over it
///
/// The configuration is validated before the file is opened.
pub fn run_backtest(config: &BacktestConfig, data: impl AsRef<Path>) -> RunResult<BacktestOutcome> {
    config.validate()?;

    let source = CsvSnapshotSource::new(config.fees.clone());
    let (snapshots, stats) = source.load_path(data)?;
    info!(
        "[RUN] {} snapshots loaded ({} rows, {} quotes)",
        snapshots.len(),
        stats.rows,
        stats.quotes
    );

    let backtest = Backtest::new(
        create_search(config.search, config.allow_remainder),
        config.simulator_config(),
    )
    .with_grid(config.grid.clone())
    .with_parallel(config.parallel);

    Ok(backtest.run(&snapshots)?)
}
