use rust_decimal::Decimal;
use sor_core::{Allocation, CostParams, Quantity, Snapshot};

use crate::error::AllocationResult;

/// Winning allocation of one search and its cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub allocation: Allocation,
    pub cost: Decimal,
}

impl SearchOutcome {
    pub fn new(allocation: Allocation, cost: Decimal) -> Self {
        Self { allocation, cost }
    }
}

/// Port for allocation search engines
///
/// Different implementations trade memory for speed:
/// - Frontier expansion (enumerates every exact split)
/// - Dynamic-programming table over (venue, cumulative quantity)
///
/// Every implementation must return the same allocation for the same inputs,
/// including which split wins on equal cost (the lexicographically smallest
/// one, venue 0 first).
pub trait AllocationSearch: Send + Sync {
    /// Find the minimum-cost split of `order_size` across `snapshot`
    ///
    /// Candidate quantities are multiples of `step`. Only splits summing
    /// exactly to `order_size` are scored.
    fn search(
        &self,
        order_size: Quantity,
        snapshot: &Snapshot,
        params: &CostParams,
        step: Quantity,
    ) -> AllocationResult<SearchOutcome>;

    /// Get the name of the engine
    fn name(&self) -> &str;
}
