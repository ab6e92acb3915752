use sor_core::Quantity;
use thiserror::Error;

/// Domain-level errors for allocation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error(
        "No feasible allocation: order_size={order_size}, venues={venues}, capacity={capacity}, step={step}"
    )]
    NoFeasibleAllocation {
        order_size: Quantity,
        venues: usize,
        capacity: Quantity,
        step: Quantity,
    },

    #[error("Snapshot has no usable venues")]
    EmptySnapshot,

    #[error("Quantization step must be positive")]
    InvalidStep,

    #[error("Allocation has {allocation} entries but snapshot has {venues} venues")]
    ShapeMismatch { allocation: usize, venues: usize },
}

impl AllocationError {
    /// Whether a driver may skip the snapshot and carry on with the next one
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AllocationError::NoFeasibleAllocation { .. } | AllocationError::EmptySnapshot
        )
    }
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let infeasible = AllocationError::NoFeasibleAllocation {
            order_size: 5000,
            venues: 1,
            capacity: 2000,
            step: 100,
        };
        assert!(infeasible.is_recoverable());
        assert!(AllocationError::EmptySnapshot.is_recoverable());
        assert!(!AllocationError::InvalidStep.is_recoverable());
        assert!(
            !AllocationError::ShapeMismatch {
                allocation: 2,
                venues: 3
            }
            .is_recoverable()
        );
    }
}
