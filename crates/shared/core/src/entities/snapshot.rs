use serde::{Deserialize, Serialize};

use super::quote::VenueQuote;
use crate::values::{Quantity, Timestamp};

/// All usable venue quotes sharing one timestamp
///
/// The position of a quote in `venues` is its index for the duration of one
/// allocation search. Quotes with missing price or size never get here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: Timestamp,
    pub venues: Vec<VenueQuote>,
}

impl Snapshot {
    pub fn new(timestamp: Timestamp, venues: Vec<VenueQuote>) -> Self {
        Self { timestamp, venues }
    }

    /// Snapshot with no usable venues
    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            venues: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VenueQuote> {
        self.venues.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VenueQuote> {
        self.venues.iter()
    }

    /// Combined displayed size across venues
    pub fn total_ask_size(&self) -> Quantity {
        self.venues.iter().map(|v| v.ask_size).sum()
    }

    /// Lowest ask; the first venue wins on equal prices
    pub fn best_ask(&self) -> Option<&VenueQuote> {
        self.venues
            .iter()
            .fold(None, |best: Option<&VenueQuote>, quote| match best {
                Some(b) if b.ask_price <= quote.ask_price => Some(b),
                _ => Some(quote),
            })
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a VenueQuote;
    type IntoIter = std::slice::Iter<'a, VenueQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.venues.iter()
    }
}
