//! Backtest configuration
//!
//! JSON file with every field optional:
//!
//! ```json
//! {
//!   "order_size": 5000,
//!   "step": 100,
//!   "allow_remainder": false,
//!   "max_snapshots": null,
//!   "search": "frontier",
//!   "parallel": true,
//!   "grid": {
//!     "lambda_over": [0.001, 0.01],
//!     "lambda_under": [0.001, 0.01],
//!     "theta_queue": [0.001, 0.01]
//!   },
//!   "fees": {
//!     "default": { "fee": 0.0, "rebate": 0.0 },
//!     "venues": { "2": { "fee": 0.003, "rebate": 0.002 } }
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sor_allocator::SearchKind;
use sor_backtest::{ParameterGrid, SimulatorConfig};
use sor_core::{FeeTable, Quantity};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn default_order_size() -> Quantity {
    5000
}

fn default_step() -> Quantity {
    100
}

fn default_parallel() -> bool {
    true
}

/// Root configuration of a backtest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Parent order size
    #[serde(default = "default_order_size")]
    pub order_size: Quantity,

    /// Quantization step for child quantities
    #[serde(default = "default_step")]
    pub step: Quantity,

    /// Try off-grid remainders as candidates
    #[serde(default)]
    pub allow_remainder: bool,

    /// Consider at most this many snapshots in the simulator
    #[serde(default)]
    pub max_snapshots: Option<usize>,

    /// Search engine
    #[serde(default)]
    pub search: SearchKind,

    /// Evaluate the grid in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Penalty weights to try
    #[serde(default)]
    pub grid: ParameterGrid,

    /// Fee schedule
    #[serde(default)]
    pub fees: FeeTable,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            order_size: default_order_size(),
            step: default_step(),
            allow_remainder: false,
            max_snapshots: None,
            search: SearchKind::default(),
            parallel: default_parallel(),
            grid: ParameterGrid::default(),
            fees: FeeTable::default(),
        }
    }
}

/// Values given on the command line, applied over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub order_size: Option<Quantity>,
    pub step: Option<Quantity>,
    pub search: Option<SearchKind>,
    pub max_snapshots: Option<usize>,
}

impl BacktestConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(order_size) = overrides.order_size {
            self.order_size = order_size;
        }
        if let Some(step) = overrides.step {
            self.step = step;
        }
        if let Some(search) = overrides.search {
            self.search = search;
        }
        if overrides.max_snapshots.is_some() {
            self.max_snapshots = overrides.max_snapshots;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.order_size == 0 {
            return Err(ConfigError::Invalid("order_size must be positive".into()));
        }
        if self.step == 0 {
            return Err(ConfigError::Invalid("step must be positive".into()));
        }
        if self.max_snapshots == Some(0) {
            return Err(ConfigError::Invalid("max_snapshots must be positive".into()));
        }
        self.grid
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.fees.is_valid() {
            return Err(ConfigError::Invalid(
                "fees and rebates must not be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            order_size: self.order_size,
            step: self.step,
            max_snapshots: self.max_snapshots,
        }
    }
}
