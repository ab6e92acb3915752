use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal so sums are exact and order-independent
pub type Price = Decimal;

/// Quantity value - displayed sizes and child quantities are whole units
pub type Quantity = u64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
