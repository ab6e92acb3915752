//! SOR Feed
//!
//! Snapshot source for the venue-split optimizer. Reads recorded
//! top-of-book ticks (one row per venue update) and groups them into
//! per-timestamp [`Snapshot`]s.
//!
//! ## Pipeline
//!
//! ```text
//! CSV rows (ts_event, publisher_id, ask_px_00, ask_sz_00, ...)
//!         │
//!    ┌────▼─────┐
//!    │  Decode  │  missing / unparsable cells become None
//!    └────┬─────┘
//!    ┌────▼─────┐
//!    │  Group   │  by (ts_event, publisher_id), first non-missing value wins
//!    └────┬─────┘
//!    ┌────▼─────┐
//!    │  Filter  │  venues without price or size are dropped, fees applied
//!    └────┬─────┘
//!         ▼
//!  Vec<Snapshot> ordered by timestamp, venues ordered by publisher id
//! ```
//!
//! Every timestamp yields a snapshot, even when all of its venues were
//! dropped, so time-based baselines see the full clock.

pub mod error;
pub mod grouping;
pub mod record;
pub mod source;

// Re-export commonly used types
pub use error::{FeedError, FeedResult};
pub use grouping::{FeedStats, group_snapshots};
pub use record::{TickRecord, parse_timestamp};
pub use source::CsvSnapshotSource;

pub use sor_core::Snapshot;
