use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// Identifier of a trading venue (the feed's publisher id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub u32);

impl VenueId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "venue-{}", self.0)
    }
}

impl From<u32> for VenueId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Top-of-book ask displayed by one venue at one timestamp
///
/// Quotes are built once by the snapshot source and only read afterwards;
/// nothing in the allocator mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueQuote {
    pub venue_id: VenueId,
    /// Best ask price
    pub ask_price: Price,
    /// Displayed size at the best ask
    pub ask_size: Quantity,
    /// Taker fee per unit executed
    pub fee: Decimal,
    /// Maker rebate per unit posted but not executed
    pub rebate: Decimal,
}

impl VenueQuote {
    /// Create a quote with zero fee and rebate
    pub fn new(venue_id: impl Into<VenueId>, ask_price: Price, ask_size: Quantity) -> Self {
        Self {
            venue_id: venue_id.into(),
            ask_price,
            ask_size,
            fee: Decimal::ZERO,
            rebate: Decimal::ZERO,
        }
    }

    /// Set taker fee
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = fee;
        self
    }

    /// Set maker rebate
    pub fn with_rebate(mut self, rebate: Decimal) -> Self {
        self.rebate = rebate;
        self
    }

    /// Price paid per unit taken, fee included
    pub fn all_in_price(&self) -> Price {
        self.ask_price + self.fee
    }

    /// Whether the venue shows any liquidity
    pub fn has_liquidity(&self) -> bool {
        self.ask_size > 0
    }
}
