use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::{VenueId, VenueQuote};

/// Per-unit fee structure of one venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VenueFees {
    /// Fee per unit taken (removes liquidity)
    #[serde(default, with = "rust_decimal::serde::float")]
    pub fee: Decimal,

    /// Credit per unit posted (adds liquidity)
    #[serde(default, with = "rust_decimal::serde::float")]
    pub rebate: Decimal,
}

impl VenueFees {
    /// Create a new fee structure
    pub fn new(fee: Decimal, rebate: Decimal) -> Self {
        Self { fee, rebate }
    }

    /// Stamp these fees onto a quote
    pub fn apply(&self, quote: VenueQuote) -> VenueQuote {
        quote.with_fee(self.fee).with_rebate(self.rebate)
    }
}

/// Fee configuration for all venues
///
/// Venues without an explicit entry use the default fees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeTable {
    /// Fees for venues without an override
    #[serde(default)]
    pub default: VenueFees,

    /// Per-venue overrides keyed by publisher id
    #[serde(default)]
    pub venues: BTreeMap<u32, VenueFees>,
}

impl FeeTable {
    /// Create a fee table with default settings (no fees, no rebates)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom default fees
    pub fn with_default_fees(fee: Decimal, rebate: Decimal) -> Self {
        Self {
            default: VenueFees::new(fee, rebate),
            ..Default::default()
        }
    }

    /// Set fees for a specific venue
    pub fn set_venue_fees(&mut self, venue_id: VenueId, fees: VenueFees) {
        self.venues.insert(venue_id.as_u32(), fees);
    }

    /// Fees in effect for a venue
    pub fn fees_for(&self, venue_id: VenueId) -> VenueFees {
        self.venues
            .get(&venue_id.as_u32())
            .copied()
            .unwrap_or(self.default)
    }

    /// Build a quote for a venue with its fees applied
    pub fn quote(
        &self,
        venue_id: VenueId,
        ask_price: Decimal,
        ask_size: crate::values::Quantity,
    ) -> VenueQuote {
        self.fees_for(venue_id)
            .apply(VenueQuote::new(venue_id, ask_price, ask_size))
    }

    /// No fee or rebate is negative
    pub fn is_valid(&self) -> bool {
        std::iter::once(&self.default)
            .chain(self.venues.values())
            .all(|f| !f.fee.is_sign_negative() && !f.rebate.is_sign_negative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_table_is_free() {
        let table = FeeTable::new();
        let quote = table.quote(VenueId(1), dec!(10), 100);
        assert_eq!(quote.fee, Decimal::ZERO);
        assert_eq!(quote.rebate, Decimal::ZERO);
    }

    #[test]
    fn test_per_venue_override() {
        let mut table = FeeTable::with_default_fees(dec!(0.003), dec!(0.001));
        table.set_venue_fees(VenueId(2), VenueFees::new(dec!(0.0025), dec!(0.002)));

        // Venue 2 uses its own schedule
        let q2 = table.quote(VenueId(2), dec!(10), 100);
        assert_eq!(q2.fee, dec!(0.0025));
        assert_eq!(q2.rebate, dec!(0.002));

        // Venue 3 falls back to the default
        let q3 = table.quote(VenueId(3), dec!(10), 100);
        assert_eq!(q3.fee, dec!(0.003));
        assert_eq!(q3.rebate, dec!(0.001));
    }

    #[test]
    fn test_negative_fee_invalid() {
        let mut table = FeeTable::new();
        assert!(table.is_valid());
        table.set_venue_fees(VenueId(9), VenueFees::new(dec!(-0.001), dec!(0)));
        assert!(!table.is_valid());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"default": {"fee": 0.003}, "venues": {"2": {"fee": 0.001, "rebate": 0.002}}}"#;
        let table: FeeTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.default.fee, dec!(0.003));
        assert_eq!(table.default.rebate, Decimal::ZERO);
        assert_eq!(table.fees_for(VenueId(2)).rebate, dec!(0.002));
    }
}
