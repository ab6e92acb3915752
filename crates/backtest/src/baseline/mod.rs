//! Naive execution baselines
//!
//! | Baseline | Execution |
//! |----------|-----------|
//! | **Best ask** | Take the cheapest venue at every timestamp until filled |
//! | **TWAP** | Equal slices per timestamp at the mean ask across venues |
//! | **VWAP** | Whole order at the size-weighted ask over all quotes |
//!
//! All baselines price at the all-in ask (fee included) so their cash is
//! comparable with the simulated runs. They see the full snapshot sequence.

mod best_ask;
mod twap;
mod vwap;

pub use best_ask::BestAskSweep;
pub use twap::Twap;
pub use vwap::Vwap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sor_core::{Price, Quantity, Snapshot};

/// Which baseline produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineKind {
    BestAsk,
    Twap,
    Vwap,
}

impl std::fmt::Display for BaselineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaselineKind::BestAsk => write!(f, "best_ask"),
            BaselineKind::Twap => write!(f, "twap"),
            BaselineKind::Vwap => write!(f, "vwap"),
        }
    }
}

/// Cash and price a baseline strategy would have achieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEstimate {
    pub kind: BaselineKind,
    /// Cash spent; None when the baseline is undefined
    pub cash_spent: Option<Decimal>,
    /// Average price per unit; None when nothing was filled
    pub avg_fill_price: Option<Price>,
    pub filled: Quantity,
}

impl BaselineEstimate {
    /// Estimate from accumulated cash and fill
    pub(crate) fn from_fills(kind: BaselineKind, cash_spent: Decimal, filled: Quantity) -> Self {
        let avg_fill_price = if filled == 0 {
            None
        } else {
            Some(cash_spent / Decimal::from(filled))
        };
        Self {
            kind,
            cash_spent: Some(cash_spent),
            avg_fill_price,
            filled,
        }
    }

    /// Baseline with no defined cash or price
    pub(crate) fn undefined(kind: BaselineKind) -> Self {
        Self {
            kind,
            cash_spent: None,
            avg_fill_price: None,
            filled: 0,
        }
    }
}

/// A naive strategy the optimizer is measured against
pub trait Baseline: Send + Sync {
    fn kind(&self) -> BaselineKind;

    fn estimate(&self, snapshots: &[Snapshot], order_size: Quantity) -> BaselineEstimate;
}

/// Estimates of all three baselines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSet {
    pub best_ask: BaselineEstimate,
    pub twap: BaselineEstimate,
    pub vwap: BaselineEstimate,
}

impl BaselineSet {
    pub fn estimate(snapshots: &[Snapshot], order_size: Quantity) -> Self {
        Self {
            best_ask: BestAskSweep.estimate(snapshots, order_size),
            twap: Twap.estimate(snapshots, order_size),
            vwap: Vwap.estimate(snapshots, order_size),
        }
    }
}
