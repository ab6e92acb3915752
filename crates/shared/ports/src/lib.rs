//! SOR Ports
//!
//! Port definitions (traits) for the venue-split optimizer.
//! These define the boundaries between the allocation engines and the
//! drivers that call them.

mod error;
mod search;

pub use error::{AllocationError, AllocationResult};
pub use search::{AllocationSearch, SearchOutcome};
