use serde::{Deserialize, Serialize};

use crate::values::Quantity;

/// Child quantities per venue index
///
/// `Allocation[i]` is the quantity sent to venue `i` of the snapshot the
/// allocation was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(Vec<Quantity>);

impl Allocation {
    pub fn new(quantities: Vec<Quantity>) -> Self {
        Self(quantities)
    }

    /// All-zero allocation over `venues` venues
    pub fn zeros(venues: usize) -> Self {
        Self(vec![0; venues])
    }

    /// Sum of child quantities
    pub fn total(&self) -> Quantity {
        self.0.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Quantity] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quantity> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Quantity> {
        self.0
    }
}

impl From<Vec<Quantity>> for Allocation {
    fn from(quantities: Vec<Quantity>) -> Self {
        Self(quantities)
    }
}

impl std::ops::Index<usize> for Allocation {
    type Output = Quantity;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
