use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Penalty weights of the cost model
///
/// - `lambda_over`: cost per unit executed beyond the order size
/// - `lambda_under`: cost per unit of the order left unexecuted
/// - `theta_queue`: queue/fill-risk cost per unit of mismatch in either direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CostParams {
    #[serde(with = "rust_decimal::serde::float")]
    pub lambda_over: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lambda_under: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub theta_queue: Decimal,
}

impl CostParams {
    pub fn new(lambda_over: Decimal, lambda_under: Decimal, theta_queue: Decimal) -> Self {
        Self {
            lambda_over,
            lambda_under,
            theta_queue,
        }
    }

    /// All weights are non-negative
    pub fn is_valid(&self) -> bool {
        !self.lambda_over.is_sign_negative()
            && !self.lambda_under.is_sign_negative()
            && !self.theta_queue.is_sign_negative()
    }
}

impl std::fmt::Display for CostParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(λo={}, λu={}, θq={})",
            self.lambda_over, self.lambda_under, self.theta_queue
        )
    }
}
