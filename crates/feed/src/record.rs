//! Raw tick rows
//!
//! Column names follow the MBP-1 CSV layout. Only the columns below are read;
//! any other column in the file is ignored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use sor_core::{Price, Quantity, Timestamp};

use crate::error::{FeedError, FeedResult};

/// Columns a tick file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["ts_event", "publisher_id", "ask_px_00", "ask_sz_00"];

/// One decoded CSV row
#[derive(Debug, Clone, Deserialize)]
pub struct TickRecord {
    /// Event time, RFC 3339 or integer nanoseconds since epoch
    pub ts_event: String,
    /// Venue identifier
    pub publisher_id: u32,
    /// Best ask price (None when empty or unparsable)
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ask_px_00: Option<Decimal>,
    /// Best ask size (None when empty or unparsable)
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ask_sz_00: Option<Decimal>,
}

impl TickRecord {
    /// Ask price, if present and positive
    pub fn ask_price(&self) -> Option<Price> {
        self.ask_px_00.filter(|p| *p > Decimal::ZERO)
    }

    /// Ask size in whole units, if present and non-negative
    pub fn ask_size(&self) -> Option<Quantity> {
        self.ask_sz_00.and_then(|s| s.trunc().to_u64())
    }
}

/// Parse an event timestamp
///
/// Accepts RFC 3339 (`2024-08-01T13:36:32.491911683Z`) or integer
/// nanoseconds since the Unix epoch.
pub fn parse_timestamp(raw: &str) -> FeedResult<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(nanos) = raw.parse::<i64>() {
        return Ok(DateTime::from_timestamp_nanos(nanos));
    }
    Err(FeedError::InvalidTimestamp(raw.to_string()))
}
