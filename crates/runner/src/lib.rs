//! SOR Runner - Backtest Wiring
//!
//! Loads the configuration, reads the tick file and runs the backtest:
//!
//! - **Config**: JSON file plus command line overrides
//! - **App**: feed → grid search → baselines → report
//!
//! ## Architecture
//!
//! ```text
//!  config.json ──┐        ┌──────────────────┐
//!  CLI flags ────┴──────► │  BacktestConfig  │
//!                         └────────┬─────────┘
//!                                  │ fees
//!                                  ▼
//!  ticks.csv ───────────► CsvSnapshotSource ──► snapshots
//!                                                  │
//!                                                  ▼
//!                                   ┌──────────────────────────┐
//!                                   │  Backtest                │
//!                                   │  grid × simulator        │
//!                                   │  baselines               │
//!                                   └────────────┬─────────────┘
//!                                                │
//!                                                ▼
//!                                         report (JSON)
//! ```

pub mod app;
pub mod config;

// Re-export main types
pub use app::{RunError, RunResult, run_backtest};
pub use config::{BacktestConfig, ConfigError, ConfigResult, Overrides};
