use log::{debug, warn};
use rust_decimal::Decimal;
use sor_core::{Quantity, Snapshot};

use super::{Baseline, BaselineEstimate, BaselineKind};

/// Whole order at the size-weighted ask over every quote in the sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct Vwap;

impl Vwap {
    /// Σ price·size / Σ size over all quotes, None when no size is shown
    pub fn price(snapshots: &[Snapshot]) -> Option<Decimal> {
        let mut notional = Decimal::ZERO;
        let mut volume: Quantity = 0;
        for quote in snapshots.iter().flat_map(|s| s.iter()) {
            notional += quote.all_in_price() * Decimal::from(quote.ask_size);
            volume += quote.ask_size;
        }
        if volume == 0 {
            return None;
        }
        Some(notional / Decimal::from(volume))
    }
}

impl Baseline for Vwap {
    fn kind(&self) -> BaselineKind {
        BaselineKind::Vwap
    }

    fn estimate(&self, snapshots: &[Snapshot], order_size: Quantity) -> BaselineEstimate {
        match Self::price(snapshots) {
            Some(price) => {
                let cash = Decimal::from(order_size) * price;
                debug!("[BASELINE] vwap {} -> {}", price, cash);
                BaselineEstimate::from_fills(self.kind(), cash, order_size)
            }
            None => {
                warn!("[BASELINE] vwap undefined: no displayed size");
                BaselineEstimate::undefined(self.kind())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use sor_core::{Timestamp, VenueQuote};

    fn at(i: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 8, 1, 13, 36, 32).unwrap() + Duration::milliseconds(i)
    }

    #[test]
    fn test_vwap_two_quotes() {
        let snapshots = vec![
            Snapshot::new(at(0), vec![VenueQuote::new(1u32, dec!(10), 100)]),
            Snapshot::new(at(1), vec![VenueQuote::new(2u32, dec!(12), 100)]),
        ];

        let estimate = Vwap.estimate(&snapshots, 100);

        assert_eq!(estimate.avg_fill_price, Some(dec!(11)));
        assert_eq!(estimate.cash_spent, Some(dec!(1100)));
        assert_eq!(estimate.filled, 100);
    }

    #[test]
    fn test_weighted_by_size() {
        let snapshots = vec![Snapshot::new(
            at(0),
            vec![
                VenueQuote::new(1u32, dec!(10), 300),
                VenueQuote::new(2u32, dec!(14), 100),
            ],
        )];
        assert_eq!(Vwap::price(&snapshots), Some(dec!(11)));
    }

    #[test]
    fn test_zero_volume_is_undefined() {
        let snapshots = vec![
            Snapshot::empty(at(0)),
            Snapshot::new(at(1), vec![VenueQuote::new(1u32, dec!(10), 0)]),
        ];

        let estimate = Vwap.estimate(&snapshots, 100);
        assert_eq!(estimate.cash_spent, None);
        assert_eq!(estimate.avg_fill_price, None);
    }
}
