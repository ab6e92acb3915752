use log::debug;
use rust_decimal::Decimal;
use sor_core::{Quantity, Snapshot};

use super::{Baseline, BaselineEstimate, BaselineKind};

/// Equal slices across timestamps
///
/// The slice is `order_size / timestamps + 1`, counting every timestamp
/// including empty ones. Each non-empty timestamp buys up to one slice at
/// the mean ask across its venues, limited by the combined displayed size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Twap;

impl Twap {
    pub fn slice_size(order_size: Quantity, timestamps: usize) -> Option<Quantity> {
        if timestamps == 0 {
            return None;
        }
        Some(order_size / timestamps as Quantity + 1)
    }
}

impl Baseline for Twap {
    fn kind(&self) -> BaselineKind {
        BaselineKind::Twap
    }

    fn estimate(&self, snapshots: &[Snapshot], order_size: Quantity) -> BaselineEstimate {
        let Some(slice) = Self::slice_size(order_size, snapshots.len()) else {
            return BaselineEstimate::undefined(self.kind());
        };

        let mut filled: Quantity = 0;
        let mut cash = Decimal::ZERO;

        for snapshot in snapshots {
            if filled >= order_size {
                break;
            }
            if snapshot.is_empty() {
                continue;
            }
            let available = snapshot.total_ask_size();
            if available == 0 {
                continue;
            }
            let mean_ask = snapshot.iter().map(|q| q.all_in_price()).sum::<Decimal>()
                / Decimal::from(snapshot.len());

            let quantity = slice.min(order_size - filled).min(available);
            cash += Decimal::from(quantity) * mean_ask;
            filled += quantity;
        }

        debug!(
            "[BASELINE] twap slice {} filled {}/{} for {}",
            slice, filled, order_size, cash
        );
        BaselineEstimate::from_fills(self.kind(), cash, filled)
    }
}
