use log::debug;
use rust_decimal::Decimal;
use sor_core::{Quantity, Snapshot};

use super::{Baseline, BaselineEstimate, BaselineKind};

/// Sweep the lowest ask of each timestamp until the order is filled
///
/// Only the single cheapest venue is taken per timestamp; the first venue
/// wins on equal prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestAskSweep;

impl Baseline for BestAskSweep {
    fn kind(&self) -> BaselineKind {
        BaselineKind::BestAsk
    }

    fn estimate(&self, snapshots: &[Snapshot], order_size: Quantity) -> BaselineEstimate {
        let mut filled: Quantity = 0;
        let mut cash = Decimal::ZERO;

        for snapshot in snapshots {
            if filled >= order_size {
                break;
            }
            let Some(best) = snapshot.best_ask() else {
                continue;
            };
            if !best.has_liquidity() {
                continue;
            }
            let quantity = (order_size - filled).min(best.ask_size);
            cash += Decimal::from(quantity) * best.all_in_price();
            filled += quantity;
        }

        debug!("[BASELINE] best ask filled {}/{} for {}", filled, order_size, cash);
        BaselineEstimate::from_fills(self.kind(), cash, filled)
    }
}
