//! SOR Backtest
//!
//! Replays recorded snapshots through an allocation search and measures the
//! result against naive execution.
//!
//! ## Architecture
//!
//! ```text
//! Snapshots ──► ┌─────────────────────────────────────────┐
//!               │            Grid Search                  │
//!               │  for each (λo, λu, θq) in the grid:     │
//!               │  ┌───────────────────────────────────┐  │
//!               │  │  Execution Simulator              │  │
//!               │  │  - split the unfilled remainder   │  │
//!               │  │  - skip empty / infeasible        │  │
//!               │  │  - accumulate cash and fill       │  │
//!               │  └───────────────────────────────────┘  │
//!               │  cheapest complete run wins             │
//!               └───────────────────┬─────────────────────┘
//!                                   │
//! Snapshots ──► Baselines ──────────┼──► Report (JSON)
//!               (best ask, TWAP, VWAP)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sor_allocator::{SearchKind, create_search};
//! use sor_backtest::{Backtest, SimulatorConfig};
//!
//! let backtest = Backtest::new(
//!     create_search(SearchKind::Frontier, false),
//!     SimulatorConfig::new(5000, 100),
//! );
//! let outcome = backtest.run(&snapshots)?;
//! println!("{}", outcome.report.to_json_pretty()?);
//! ```

pub mod backtest;
pub mod baseline;
pub mod error;
pub mod grid;
pub mod report;
pub mod simulator;

// Re-export main types
pub use backtest::{Backtest, BacktestOutcome};
pub use baseline::{
    Baseline, BaselineEstimate, BaselineKind, BaselineSet, BestAskSweep, Twap, Vwap,
};
pub use error::{BacktestError, BacktestResult};
pub use grid::{GridResult, GridSearch, ParameterGrid};
pub use report::{BacktestReport, BaselineSummary, savings_bps};
pub use simulator::{ChildFill, ExecutionRun, ExecutionSimulator, RunStatus, SimulatorConfig};
