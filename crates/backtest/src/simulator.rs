//! Execution Simulator
//!
//! Walks the snapshot sequence in time order and, at each timestamp, asks
//! the allocation search how to split what is still unfilled. Executed
//! child quantities are accumulated until the parent order is complete or
//! the snapshots (or the configured horizon) run out.
//!
//! Empty snapshots and snapshots with no feasible split are skipped; any
//! other allocation error aborts the run.

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sor_core::{CostParams, Price, Quantity, Snapshot, Timestamp, VenueId};
use sor_ports::{AllocationError, AllocationSearch};

use crate::error::{BacktestError, BacktestResult};

/// Simulator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Parent order size
    pub order_size: Quantity,
    /// Quantization step handed to the search
    pub step: Quantity,
    /// Consider at most this many snapshots
    pub max_snapshots: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            order_size: 5000,
            step: 100,
            max_snapshots: None,
        }
    }
}

impl SimulatorConfig {
    pub fn new(order_size: Quantity, step: Quantity) -> Self {
        Self {
            order_size,
            step,
            max_snapshots: None,
        }
    }

    /// Cap the number of snapshots considered
    pub fn with_max_snapshots(mut self, max_snapshots: usize) -> Self {
        self.max_snapshots = Some(max_snapshots);
        self
    }

    pub fn validate(&self) -> BacktestResult<()> {
        if self.order_size == 0 {
            return Err(BacktestError::InvalidOrderSize);
        }
        if self.step == 0 {
            return Err(AllocationError::InvalidStep.into());
        }
        Ok(())
    }
}

/// One executed child order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildFill {
    pub timestamp: Timestamp,
    pub venue_id: VenueId,
    pub quantity: Quantity,
    /// Price paid per unit, fee included
    pub price: Price,
}

impl ChildFill {
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// How a simulated run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Parent order fully filled
    Complete,
    /// Snapshots ran out first
    Exhausted,
}

/// Outcome of simulating one parameter set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRun {
    pub params: CostParams,
    pub order_size: Quantity,
    pub filled: Quantity,
    /// Total cash paid, fees included
    pub cash_spent: Decimal,
    /// Snapshots looked at (skipped ones included)
    pub snapshots_consumed: usize,
    /// Snapshots skipped as empty or infeasible
    pub skipped: usize,
    pub fills: Vec<ChildFill>,
    pub status: RunStatus,
}

impl ExecutionRun {
    fn new(params: CostParams, order_size: Quantity) -> Self {
        Self {
            params,
            order_size,
            filled: 0,
            cash_spent: Decimal::ZERO,
            snapshots_consumed: 0,
            skipped: 0,
            fills: Vec::new(),
            status: RunStatus::Exhausted,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    pub fn remaining(&self) -> Quantity {
        self.order_size.saturating_sub(self.filled)
    }

    /// Average price per unit filled
    pub fn avg_fill_price(&self) -> Option<Price> {
        if self.filled == 0 {
            None
        } else {
            Some(self.cash_spent / Decimal::from(self.filled))
        }
    }

    fn record(&mut self, fill: ChildFill) {
        self.cash_spent += fill.notional();
        self.filled += fill.quantity;
        self.fills.push(fill);
    }
}

/// Replays snapshots through an allocation search
pub struct ExecutionSimulator<'a> {
    search: &'a dyn AllocationSearch,
    config: SimulatorConfig,
}

impl<'a> ExecutionSimulator<'a> {
    pub fn new(search: &'a dyn AllocationSearch, config: SimulatorConfig) -> Self {
        Self { search, config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate one parameter set over the snapshot sequence
    pub fn run(&self, snapshots: &[Snapshot], params: &CostParams) -> BacktestResult<ExecutionRun> {
        let order_size = self.config.order_size;
        let horizon = self
            .config
            .max_snapshots
            .map_or(snapshots.len(), |cap| cap.min(snapshots.len()));

        let mut run = ExecutionRun::new(*params, order_size);

        for snapshot in &snapshots[..horizon] {
            if run.filled >= order_size {
                break;
            }
            run.snapshots_consumed += 1;

            let outcome = if snapshot.is_empty() {
                Err(AllocationError::EmptySnapshot)
            } else {
                self.search
                    .search(run.remaining(), snapshot, params, self.config.step)
            };

            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) if e.is_recoverable() => {
                    debug!("[SIM] {} skipped at {}: {}", params, snapshot.timestamp, e);
                    run.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            for (quote, &allocated) in snapshot.iter().zip(outcome.allocation.iter()) {
                let quantity = allocated.min(quote.ask_size);
                if quantity == 0 {
                    continue;
                }
                run.record(ChildFill {
                    timestamp: snapshot.timestamp,
                    venue_id: quote.venue_id,
                    quantity,
                    price: quote.all_in_price(),
                });
                if run.filled >= order_size {
                    break;
                }
            }
            debug!(
                "[SIM] {} at {}: split {} -> filled {}/{}",
                params, snapshot.timestamp, outcome.allocation, run.filled, order_size
            );
        }

        if run.filled >= order_size {
            run.status = RunStatus::Complete;
        }

        info!(
            "[SIM] {} {:?}: filled {}/{} for {} over {} snapshots ({} skipped)",
            params,
            run.status,
            run.filled,
            order_size,
            run.cash_spent,
            run.snapshots_consumed,
            run.skipped
        );

        Ok(run)
    }
}
