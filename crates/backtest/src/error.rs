//! Backtest errors

use sor_core::Quantity;
use sor_ports::AllocationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BacktestError {
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Order size must be positive")]
    InvalidOrderSize,

    #[error("Parameter grid axis '{0}' is empty")]
    EmptyGrid(&'static str),

    #[error("Parameter grid axis '{0}' contains a negative weight")]
    NegativeWeight(&'static str),

    #[error("None of the {evaluated} parameter sets filled the order of {order_size}")]
    NoCompleteRun {
        evaluated: usize,
        order_size: Quantity,
    },

    #[error("Report serialization failed: {0}")]
    Serialization(String),
}

pub type BacktestResult<T> = std::result::Result<T, BacktestError>;
