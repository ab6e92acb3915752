//! Snapshot grouping
//!
//! Rows are grouped by (timestamp, venue). Within a group the first
//! non-missing value of each column wins, so a row that only carries a size
//! can complete an earlier row that only carried a price.

use std::collections::BTreeMap;

use log::{debug, info};
use rust_decimal::Decimal;
use sor_core::{FeeTable, Snapshot, Timestamp, VenueId};

use crate::error::FeedResult;
use crate::record::{TickRecord, parse_timestamp};

/// Counters collected while grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Rows read
    pub rows: usize,
    /// Distinct timestamps (= snapshots produced)
    pub timestamps: usize,
    /// Venue quotes kept
    pub quotes: usize,
    /// Venue quotes dropped for missing price or size
    pub dropped: usize,
}

/// First non-missing ask price / size seen for one (timestamp, venue)
#[derive(Debug, Default)]
struct MergedQuote {
    ask_price: Option<Decimal>,
    ask_size: Option<u64>,
}

impl MergedQuote {
    fn merge(&mut self, record: &TickRecord) {
        if self.ask_price.is_none() {
            self.ask_price = record.ask_price();
        }
        if self.ask_size.is_none() {
            self.ask_size = record.ask_size();
        }
    }
}

/// Group decoded rows into snapshots ordered by timestamp
///
/// Venues inside a snapshot are ordered by publisher id and carry the fees
/// of `fees`.
pub fn group_snapshots(
    records: impl IntoIterator<Item = TickRecord>,
    fees: &FeeTable,
) -> FeedResult<(Vec<Snapshot>, FeedStats)> {
    let mut stats = FeedStats::default();
    let mut groups: BTreeMap<Timestamp, BTreeMap<u32, MergedQuote>> = BTreeMap::new();

    for record in records {
        stats.rows += 1;
        let ts = parse_timestamp(&record.ts_event)?;
        groups
            .entry(ts)
            .or_default()
            .entry(record.publisher_id)
            .or_default()
            .merge(&record);
    }

    let mut snapshots = Vec::with_capacity(groups.len());
    for (ts, venues) in groups {
        let mut quotes = Vec::with_capacity(venues.len());
        for (publisher_id, merged) in venues {
            match (merged.ask_price, merged.ask_size) {
                (Some(price), Some(size)) => {
                    quotes.push(fees.quote(VenueId(publisher_id), price, size));
                }
                _ => {
                    debug!("[FEED] {} dropped at {}: missing price or size", VenueId(publisher_id), ts);
                    stats.dropped += 1;
                }
            }
        }
        stats.quotes += quotes.len();
        snapshots.push(Snapshot::new(ts, quotes));
    }
    stats.timestamps = snapshots.len();

    info!(
        "[FEED] {} rows -> {} snapshots ({} quotes kept, {} dropped)",
        stats.rows, stats.timestamps, stats.quotes, stats.dropped
    );

    Ok((snapshots, stats))
}
