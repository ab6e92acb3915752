//! Cost model
//!
//! Scores one allocation against the snapshot it was drawn from:
//!
//! ```text
//! cost = Σ executed_i × (ask_i + fee_i)
//!      − Σ (allocated_i − executed_i) × rebate_i
//!      + θ_queue × (underfill + overfill)
//!      + λ_under × underfill + λ_over × overfill
//! ```
//!
//! where `executed_i = min(allocated_i, ask_size_i)`. No rounding happens
//! here; the report rounds at the very end.

use rust_decimal::Decimal;
use sor_core::{Allocation, CostParams, Quantity, Snapshot, VenueQuote};
use sor_ports::{AllocationError, AllocationResult};

/// Every term of one cost evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    /// Quantity that can execute against displayed size
    pub executed: Quantity,
    /// Cash paid for the executed quantity, fees included
    pub cash_spent: Decimal,
    /// Credit for allocated quantity that rests instead of executing
    pub maker_rebate: Decimal,
    /// Order quantity left unexecuted
    pub underfill: Quantity,
    /// Quantity executed beyond the order size
    pub overfill: Quantity,
    /// θ_queue × total mismatch
    pub risk_penalty: Decimal,
    /// λ_under × underfill + λ_over × overfill
    pub cost_penalty: Decimal,
}

impl CostBreakdown {
    /// Total score (lower is better)
    pub fn total(&self) -> Decimal {
        self.cash_spent - self.maker_rebate + self.risk_penalty + self.cost_penalty
    }

    /// Total mismatch between executed quantity and order size
    pub fn mismatch(&self) -> Quantity {
        self.underfill + self.overfill
    }
}

/// Net cash contribution of sending `allocated` units to one venue
///
/// Both search engines build their objective from this term, so it must stay
/// consistent with [`breakdown`].
pub(crate) fn venue_term(quote: &VenueQuote, allocated: Quantity) -> Decimal {
    let executed = allocated.min(quote.ask_size);
    let resting = allocated - executed;
    Decimal::from(executed) * quote.all_in_price() - Decimal::from(resting) * quote.rebate
}

/// Evaluate every cost term of an allocation
pub fn breakdown(
    allocation: &Allocation,
    snapshot: &Snapshot,
    order_size: Quantity,
    params: &CostParams,
) -> AllocationResult<CostBreakdown> {
    if allocation.len() != snapshot.len() {
        return Err(AllocationError::ShapeMismatch {
            allocation: allocation.len(),
            venues: snapshot.len(),
        });
    }

    let mut executed: Quantity = 0;
    let mut cash_spent = Decimal::ZERO;
    let mut maker_rebate = Decimal::ZERO;

    for (&allocated, quote) in allocation.iter().zip(snapshot.iter()) {
        let exe = allocated.min(quote.ask_size);
        executed += exe;
        cash_spent += Decimal::from(exe) * quote.all_in_price();
        maker_rebate += Decimal::from(allocated - exe) * quote.rebate;
    }

    let underfill = order_size.saturating_sub(executed);
    let overfill = executed.saturating_sub(order_size);
    let risk_penalty = params.theta_queue * Decimal::from(underfill + overfill);
    let cost_penalty = params.lambda_under * Decimal::from(underfill)
        + params.lambda_over * Decimal::from(overfill);

    Ok(CostBreakdown {
        executed,
        cash_spent,
        maker_rebate,
        underfill,
        overfill,
        risk_penalty,
        cost_penalty,
    })
}

/// Score an allocation (lower is better)
pub fn score(
    allocation: &Allocation,
    snapshot: &Snapshot,
    order_size: Quantity,
    params: &CostParams,
) -> AllocationResult<Decimal> {
    breakdown(allocation, snapshot, order_size, params).map(|b| b.total())
}
