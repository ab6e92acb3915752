//! SOR Core Domain
//!
//! Pure domain types for the venue-split optimizer.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Allocation types
    Allocation,
    CostParams,
    // Fee types
    FeeTable,
    Snapshot,
    VenueFees,
    // Market data
    VenueId,
    VenueQuote,
};
pub use values::{Price, Quantity, Timestamp};
