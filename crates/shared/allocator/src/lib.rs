//! SOR Allocation Engines
//!
//! Splits one parent order across the venues of a snapshot so the total cost
//! (cash, fees, rebates and fill penalties) is minimal.
//!
//! ```text
//! Snapshot ──► candidate quantities per venue (multiples of step)
//!                     │
//!                     ▼
//!          exact splits of order_size ──► cost model ──► cheapest split
//! ```
//!
//! Two engines implement [`AllocationSearch`]:
//! - [`FrontierSearch`]: expands every prefix venue by venue, then scores
//!   all exact splits.
//! - [`TableSearch`]: dynamic programming over (venue, cumulative quantity).
//!   Same answer, far fewer states when many venues are quoted.

pub mod cost;
mod frontier;
mod quantize;
mod table;

pub use cost::{CostBreakdown, breakdown, score};
pub use frontier::FrontierSearch;
pub use quantize::candidate_quantities;
pub use table::TableSearch;

// Re-export the trait from ports for convenience
pub use sor_ports::{AllocationError, AllocationResult, AllocationSearch, SearchOutcome};

use serde::{Deserialize, Serialize};

/// Available allocation search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Per-venue frontier expansion
    #[default]
    Frontier,
    /// Dynamic-programming table
    Table,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::Frontier => write!(f, "frontier"),
            SearchKind::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frontier" => Ok(SearchKind::Frontier),
            "table" | "dp" => Ok(SearchKind::Table),
            other => Err(format!("unknown search engine: {other}")),
        }
    }
}

/// Factory function to create search engines by kind
pub fn create_search(kind: SearchKind, allow_remainder: bool) -> Box<dyn AllocationSearch> {
    match kind {
        SearchKind::Frontier => Box::new(FrontierSearch::new().with_remainder(allow_remainder)),
        SearchKind::Table => Box::new(TableSearch::new().with_remainder(allow_remainder)),
    }
}
