//! Penalty grid search
//!
//! Every (λ_over, λ_under, θ_queue) combination of the grid is simulated
//! over the same snapshots. Runs are collected in grid order and reduced by
//! one sequential fold, so the winner does not depend on whether the runs
//! were evaluated in parallel.

use log::{info, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sor_core::{CostParams, Snapshot};

use crate::error::{BacktestError, BacktestResult};
use crate::simulator::{ExecutionRun, ExecutionSimulator};

fn default_axis() -> Vec<Decimal> {
    vec![dec!(0.001), dec!(0.01)]
}

/// Candidate values per penalty weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGrid {
    #[serde(default = "default_axis")]
    pub lambda_over: Vec<Decimal>,
    #[serde(default = "default_axis")]
    pub lambda_under: Vec<Decimal>,
    #[serde(default = "default_axis")]
    pub theta_queue: Vec<Decimal>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            lambda_over: default_axis(),
            lambda_under: default_axis(),
            theta_queue: default_axis(),
        }
    }
}

impl ParameterGrid {
    pub fn new(
        lambda_over: Vec<Decimal>,
        lambda_under: Vec<Decimal>,
        theta_queue: Vec<Decimal>,
    ) -> Self {
        Self {
            lambda_over,
            lambda_under,
            theta_queue,
        }
    }

    /// Grid with a single point
    pub fn single(params: CostParams) -> Self {
        Self::new(
            vec![params.lambda_over],
            vec![params.lambda_under],
            vec![params.theta_queue],
        )
    }

    pub fn validate(&self) -> BacktestResult<()> {
        for (name, axis) in self.axes() {
            if axis.is_empty() {
                return Err(BacktestError::EmptyGrid(name));
            }
            if axis.iter().any(|w| w.is_sign_negative()) {
                return Err(BacktestError::NegativeWeight(name));
            }
        }
        Ok(())
    }

    fn axes(&self) -> [(&'static str, &Vec<Decimal>); 3] {
        [
            ("lambda_over", &self.lambda_over),
            ("lambda_under", &self.lambda_under),
            ("theta_queue", &self.theta_queue),
        ]
    }

    pub fn len(&self) -> usize {
        self.lambda_over.len() * self.lambda_under.len() * self.theta_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All triples, λ_over outermost and θ_queue innermost
    pub fn candidates(&self) -> Vec<CostParams> {
        let mut out = Vec::with_capacity(self.len());
        for &lambda_over in &self.lambda_over {
            for &lambda_under in &self.lambda_under {
                for &theta_queue in &self.theta_queue {
                    out.push(CostParams::new(lambda_over, lambda_under, theta_queue));
                }
            }
        }
        out
    }
}

/// Winner of a grid search
#[derive(Debug, Clone)]
pub struct GridResult {
    pub best: ExecutionRun,
    /// Parameter sets simulated
    pub evaluated: usize,
    /// Runs that filled the whole order
    pub complete: usize,
}

/// Runs the simulator over every grid point
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ParameterGrid,
    parallel: bool,
}

impl GridSearch {
    pub fn new(grid: ParameterGrid) -> Self {
        Self {
            grid,
            parallel: true,
        }
    }

    /// Evaluate grid points on the rayon pool (default) or one by one
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Simulate every grid point and keep the cheapest complete run
    ///
    /// Incomplete runs never win. Among complete runs with equal cash the
    /// first in grid order is kept.
    pub fn run(
        &self,
        simulator: &ExecutionSimulator<'_>,
        snapshots: &[Snapshot],
    ) -> BacktestResult<GridResult> {
        self.grid.validate()?;
        let candidates = self.grid.candidates();

        info!(
            "[GRID] Evaluating {} parameter sets over {} snapshots ({})",
            candidates.len(),
            snapshots.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let runs: Vec<BacktestResult<ExecutionRun>> = if self.parallel {
            candidates
                .par_iter()
                .map(|params| simulator.run(snapshots, params))
                .collect()
        } else {
            candidates
                .iter()
                .map(|params| simulator.run(snapshots, params))
                .collect()
        };

        let evaluated = runs.len();
        let mut complete = 0;
        let mut best: Option<ExecutionRun> = None;

        for run in runs {
            let run = run?;
            if !run.is_complete() {
                warn!(
                    "[GRID] {} did not complete: filled {}/{}",
                    run.params, run.filled, run.order_size
                );
                continue;
            }
            complete += 1;
            match &best {
                Some(current) if run.cash_spent >= current.cash_spent => {}
                _ => best = Some(run),
            }
        }

        let best = best.ok_or(BacktestError::NoCompleteRun {
            evaluated,
            order_size: simulator.config().order_size,
        })?;

        info!(
            "[GRID] Best {} spent {} ({} of {} runs complete)",
            best.params, best.cash_spent, complete, evaluated
        );

        Ok(GridResult {
            best,
            evaluated,
            complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SimulatorConfig;
    use chrono::{TimeZone, Utc};
    use sor_allocator::FrontierSearch;
    use sor_core::{Allocation, Quantity, VenueQuote};
    use sor_ports::{AllocationResult, AllocationSearch, SearchOutcome};

    /// Sends everything to the first venue unless θ_queue is large, in which
    /// case it sends everything to the last one
    struct ThetaSwitch;

    impl AllocationSearch for ThetaSwitch {
        fn search(
            &self,
            order_size: Quantity,
            snapshot: &Snapshot,
            params: &CostParams,
            _step: Quantity,
        ) -> AllocationResult<SearchOutcome> {
            let mut split = vec![0; snapshot.len()];
            let target = if params.theta_queue > dec!(0.005) {
                snapshot.len() - 1
            } else {
                0
            };
            split[target] = order_size;
            Ok(SearchOutcome::new(Allocation::new(split), Decimal::ZERO))
        }

        fn name(&self) -> &str {
            "ThetaSwitch"
        }
    }

    fn snapshots() -> Vec<Snapshot> {
        vec![Snapshot::new(
            Utc.with_ymd_and_hms(2024, 8, 1, 13, 36, 32).unwrap(),
            vec![
                VenueQuote::new(1u32, dec!(10.2), 5000),
                VenueQuote::new(2u32, dec!(10.1), 5000),
            ],
        )]
    }

    #[test]
    fn test_candidates_nested_order() {
        let grid = ParameterGrid::default();
        let candidates = grid.candidates();

        assert_eq!(candidates.len(), 8);
        assert_eq!(
            candidates[0],
            CostParams::new(dec!(0.001), dec!(0.001), dec!(0.001))
        );
        assert_eq!(
            candidates[1],
            CostParams::new(dec!(0.001), dec!(0.001), dec!(0.01))
        );
        assert_eq!(
            candidates[2],
            CostParams::new(dec!(0.001), dec!(0.01), dec!(0.001))
        );
        assert_eq!(
            candidates[7],
            CostParams::new(dec!(0.01), dec!(0.01), dec!(0.01))
        );
    }

    #[test]
    fn test_validate() {
        assert!(ParameterGrid::default().validate().is_ok());

        let mut grid = ParameterGrid::default();
        grid.lambda_under.clear();
        assert_eq!(grid.validate(), Err(BacktestError::EmptyGrid("lambda_under")));

        let mut grid = ParameterGrid::default();
        grid.theta_queue.push(dec!(-0.1));
        assert_eq!(
            grid.validate(),
            Err(BacktestError::NegativeWeight("theta_queue"))
        );
    }

    #[test]
    fn test_cheapest_complete_run_wins() {
        let search = ThetaSwitch;
        let sim = ExecutionSimulator::new(&search, SimulatorConfig::new(1000, 100));

        let result = GridSearch::new(ParameterGrid::default())
            .run(&sim, &snapshots())
            .unwrap();

        // θ_queue = 0.01 routes to the cheaper venue; the first such triple wins
        assert_eq!(
            result.best.params,
            CostParams::new(dec!(0.001), dec!(0.001), dec!(0.01))
        );
        assert_eq!(result.best.cash_spent, dec!(10100));
        assert_eq!(result.evaluated, 8);
        assert_eq!(result.complete, 8);
    }

    #[test]
    fn test_first_triple_wins_ties() {
        let search = FrontierSearch::new();
        let sim = ExecutionSimulator::new(&search, SimulatorConfig::new(1000, 100));

        let result = GridSearch::new(ParameterGrid::default())
            .run(&sim, &snapshots())
            .unwrap();

        assert_eq!(
            result.best.params,
            CostParams::new(dec!(0.001), dec!(0.001), dec!(0.001))
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let search = ThetaSwitch;
        let sim = ExecutionSimulator::new(&search, SimulatorConfig::new(1000, 100));
        let grid = ParameterGrid::new(
            vec![dec!(0), dec!(0.001), dec!(0.01)],
            vec![dec!(0.001), dec!(0.01)],
            vec![dec!(0.001), dec!(0.002), dec!(0.01), dec!(0.02)],
        );

        let parallel = GridSearch::new(grid.clone()).run(&sim, &snapshots()).unwrap();
        let sequential = GridSearch::new(grid)
            .with_parallel(false)
            .run(&sim, &snapshots())
            .unwrap();

        assert_eq!(parallel.best, sequential.best);
        assert_eq!(parallel.evaluated, 24);
    }

    #[test]
    fn test_no_complete_run() {
        let search = FrontierSearch::new();
        let sim = ExecutionSimulator::new(&search, SimulatorConfig::new(20000, 100));

        let err = GridSearch::new(ParameterGrid::default())
            .run(&sim, &snapshots())
            .unwrap_err();

        assert_eq!(
            err,
            BacktestError::NoCompleteRun {
                evaluated: 8,
                order_size: 20000
            }
        );
    }
}
