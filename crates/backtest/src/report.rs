//! Backtest report
//!
//! The JSON document printed at the end of a backtest. Amounts are kept at
//! full precision everywhere else and only rounded here: cash to 2 decimal
//! places, prices to 4, savings to 2.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sor_core::CostParams;

use crate::baseline::{BaselineEstimate, BaselineSet};
use crate::error::{BacktestError, BacktestResult};
use crate::simulator::ExecutionRun;

const CASH_DP: u32 = 2;
const PRICE_DP: u32 = 4;
const BPS_DP: u32 = 2;

/// Savings of the optimized cash against a baseline, in basis points
///
/// Positive means the optimizer spent less. None when the baseline cash is
/// missing or not positive.
pub fn savings_bps(baseline_cash: Option<Decimal>, optimized_cash: Decimal) -> Option<Decimal> {
    let baseline = baseline_cash.filter(|c| c.is_sign_positive() && !c.is_zero())?;
    Some((baseline - optimized_cash) / baseline * dec!(10000))
}

/// Cash and price of one baseline as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSummary {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_cash_spent: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_fill_price: Option<Decimal>,
}

impl From<&BaselineEstimate> for BaselineSummary {
    fn from(estimate: &BaselineEstimate) -> Self {
        Self {
            total_cash_spent: estimate.cash_spent.map(|c| c.round_dp(CASH_DP)),
            average_fill_price: estimate.avg_fill_price.map(|p| p.round_dp(PRICE_DP)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub best_params: CostParams,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cash_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_fill_price: Option<Decimal>,
    pub baseline_best_ask: BaselineSummary,
    pub baseline_twap: BaselineSummary,
    pub baseline_vwap: BaselineSummary,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub savings_vs_best_ask_bps: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub savings_vs_twap_bps: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub savings_vs_vwap_bps: Option<Decimal>,
}

impl BacktestReport {
    /// Build the report from the winning run and the baselines
    ///
    /// Savings are computed from unrounded amounts.
    pub fn new(best: &ExecutionRun, baselines: &BaselineSet) -> Self {
        let cash = best.cash_spent;
        let bps = |estimate: &BaselineEstimate| {
            savings_bps(estimate.cash_spent, cash).map(|s| s.round_dp(BPS_DP))
        };

        Self {
            best_params: best.params,
            total_cash_spent: cash.round_dp(CASH_DP),
            average_fill_price: best.avg_fill_price().map(|p| p.round_dp(PRICE_DP)),
            baseline_best_ask: (&baselines.best_ask).into(),
            baseline_twap: (&baselines.twap).into(),
            baseline_vwap: (&baselines.vwap).into(),
            savings_vs_best_ask_bps: bps(&baselines.best_ask),
            savings_vs_twap_bps: bps(&baselines.twap),
            savings_vs_vwap_bps: bps(&baselines.vwap),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> BacktestResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BacktestError::Serialization(e.to_string()))
    }
}
