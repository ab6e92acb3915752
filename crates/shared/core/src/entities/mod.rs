mod allocation;
mod fee;
mod params;
mod quote;
mod snapshot;

pub use allocation::Allocation;
pub use fee::{FeeTable, VenueFees};
pub use params::CostParams;
pub use quote::{VenueId, VenueQuote};
pub use snapshot::Snapshot;
