//! Backtest orchestration
//!
//! Grid search over the penalty weights, then the baselines over the same
//! snapshots, then the report.

use log::info;
use sor_core::Snapshot;
use sor_ports::AllocationSearch;

use crate::baseline::BaselineSet;
use crate::error::BacktestResult;
use crate::grid::{GridResult, GridSearch, ParameterGrid};
use crate::report::BacktestReport;
use crate::simulator::{ExecutionSimulator, SimulatorConfig};

/// Everything a backtest produced
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub grid: GridResult,
    pub baselines: BaselineSet,
    pub report: BacktestReport,
}

pub struct Backtest {
    search: Box<dyn AllocationSearch>,
    config: SimulatorConfig,
    grid: GridSearch,
}

impl Backtest {
    pub fn new(search: Box<dyn AllocationSearch>, config: SimulatorConfig) -> Self {
        Self {
            search,
            config,
            grid: GridSearch::new(ParameterGrid::default()),
        }
    }

    pub fn with_grid(mut self, grid: ParameterGrid) -> Self {
        self.grid = GridSearch::new(grid);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.grid = self.grid.with_parallel(parallel);
        self
    }

    /// Run the backtest over `snapshots`
    pub fn run(&self, snapshots: &[Snapshot]) -> BacktestResult<BacktestOutcome> {
        self.config.validate()?;
        self.grid.grid().validate()?;

        info!(
            "[BACKTEST] {} search, order {} step {}, {} snapshots",
            self.search.name(),
            self.config.order_size,
            self.config.step,
            snapshots.len()
        );

        let simulator = ExecutionSimulator::new(self.search.as_ref(), self.config);
        let grid = self.grid.run(&simulator, snapshots)?;
        let baselines = BaselineSet::estimate(snapshots, self.config.order_size);
        let report = BacktestReport::new(&grid.best, &baselines);

        Ok(BacktestOutcome {
            grid,
            baselines,
            report,
        })
    }
}
