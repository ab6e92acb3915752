use log::debug;
use rust_decimal::Decimal;
use sor_core::{Allocation, CostParams, Quantity, Snapshot};
use sor_ports::{AllocationError, AllocationResult, AllocationSearch, SearchOutcome};

use crate::cost;
use crate::quantize::candidate_quantities;

/// Exhaustive search by per-venue frontier expansion
///
/// Starting from the empty prefix, each venue extends every prefix with all
/// quantities it can still take (bounded by its displayed size and by what
/// the order still needs). After the last venue only splits summing exactly
/// to the order size are scored; the first cheapest split wins.
///
/// The frontier grows roughly as `(order_size / step + 1)^venues`, so this
/// engine suits a handful of venues and a coarse step. [`TableSearch`]
/// returns the same answers with far fewer states.
///
/// [`TableSearch`]: crate::TableSearch
#[derive(Debug, Clone, Default)]
pub struct FrontierSearch {
    allow_remainder: bool,
}

impl FrontierSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also try each venue's off-grid cap as a candidate
    pub fn with_remainder(mut self, allow_remainder: bool) -> Self {
        self.allow_remainder = allow_remainder;
        self
    }

    /// Expand prefixes venue by venue; returns complete splits in
    /// enumeration order (venue-major, ascending quantity)
    fn expand(&self, order_size: Quantity, snapshot: &Snapshot, step: Quantity) -> Vec<Vec<Quantity>> {
        // (prefix, sum of prefix)
        let mut frontier: Vec<(Vec<Quantity>, Quantity)> = vec![(Vec::new(), 0)];

        for quote in snapshot.iter() {
            let mut next = Vec::with_capacity(frontier.len());
            for (prefix, used) in &frontier {
                let cap = (order_size - used).min(quote.ask_size);
                for q in candidate_quantities(cap, step, self.allow_remainder) {
                    let mut extended = Vec::with_capacity(snapshot.len());
                    extended.extend_from_slice(prefix);
                    extended.push(q);
                    next.push((extended, used + q));
                }
            }
            frontier = next;
        }

        frontier
            .into_iter()
            .filter(|(_, total)| *total == order_size)
            .map(|(split, _)| split)
            .collect()
    }
}

impl AllocationSearch for FrontierSearch {
    fn name(&self) -> &str {
        "Frontier"
    }

    fn search(
        &self,
        order_size: Quantity,
        snapshot: &Snapshot,
        params: &CostParams,
        step: Quantity,
    ) -> AllocationResult<SearchOutcome> {
        if step == 0 {
            return Err(AllocationError::InvalidStep);
        }
        if snapshot.is_empty() && order_size > 0 {
            return Err(infeasible(order_size, snapshot, step));
        }

        let splits = self.expand(order_size, snapshot, step);
        debug!(
            "[SEARCH] frontier: {} venues, {} exact splits for {}",
            snapshot.len(),
            splits.len(),
            order_size
        );

        let mut best: Option<(Allocation, Decimal)> = None;
        for split in splits {
            let allocation = Allocation::new(split);
            let cost = cost::score(&allocation, snapshot, order_size, params)?;
            // Strict comparison keeps the first split on ties
            let improves = match &best {
                Some((_, best_cost)) => cost < *best_cost,
                None => true,
            };
            if improves {
                best = Some((allocation, cost));
            }
        }

        best.map(|(allocation, cost)| SearchOutcome::new(allocation, cost))
            .ok_or_else(|| infeasible(order_size, snapshot, step))
    }
}

pub(crate) fn infeasible(order_size: Quantity, snapshot: &Snapshot, step: Quantity) -> AllocationError {
    AllocationError::NoFeasibleAllocation {
        order_size,
        venues: snapshot.len(),
        capacity: snapshot.total_ask_size(),
        step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sor_core::VenueQuote;

    fn snapshot(venues: Vec<VenueQuote>) -> Snapshot {
        Snapshot::new(Utc::now(), venues)
    }

    fn default_params() -> CostParams {
        CostParams::new(dec!(0.01), dec!(0.01), dec!(0.01))
    }

    #[test]
    fn test_cheaper_venue_first() {
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10), 3000),
            VenueQuote::new(2u32, dec!(11), 3000),
        ]);
        let outcome = FrontierSearch::new()
            .search(5000, &snap, &default_params(), 1000)
            .unwrap();

        assert_eq!(outcome.allocation.as_slice(), &[3000, 2000]);
        assert_eq!(outcome.cost, dec!(52000));
    }

    #[test]
    fn test_cheaper_venue_second() {
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(11), 3000),
            VenueQuote::new(2u32, dec!(10), 3000),
        ]);
        let outcome = FrontierSearch::new()
            .search(5000, &snap, &default_params(), 1000)
            .unwrap();

        assert_eq!(outcome.allocation.as_slice(), &[2000, 3000]);
        assert_eq!(outcome.cost, dec!(52000));
    }

    #[test]
    fn test_capacity_shortfall() {
        let snap = snapshot(vec![VenueQuote::new(1u32, dec!(10), 2000)]);
        let err = FrontierSearch::new()
            .search(5000, &snap, &default_params(), 100)
            .unwrap_err();

        assert_eq!(
            err,
            AllocationError::NoFeasibleAllocation {
                order_size: 5000,
                venues: 1,
                capacity: 2000,
                step: 100,
            }
        );
    }

    #[test]
    fn test_step_granularity_prevents_exact_sum() {
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10), 5000),
            VenueQuote::new(2u32, dec!(10), 5000),
        ]);
        let err = FrontierSearch::new()
            .search(250, &snap, &default_params(), 100)
            .unwrap_err();
        assert!(matches!(err, AllocationError::NoFeasibleAllocation { .. }));
    }

    #[test]
    fn test_remainder_allows_off_grid_cap() {
        // Venue 1 shows 250; with remainders it can be swept in full
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10), 250),
            VenueQuote::new(2u32, dec!(11), 5000),
        ]);
        let outcome = FrontierSearch::new()
            .with_remainder(true)
            .search(1000, &snap, &default_params(), 100)
            .unwrap();

        // 1000 - 250 = 750 is also off-grid, taken as the second venue's remainder
        assert_eq!(outcome.allocation.as_slice(), &[250, 750]);
        assert_eq!(outcome.cost, dec!(2500) + dec!(8250));
    }

    #[test]
    fn test_zero_order_size() {
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10), 3000),
            VenueQuote::new(2u32, dec!(11), 3000),
        ]);
        let outcome = FrontierSearch::new()
            .search(0, &snap, &default_params(), 100)
            .unwrap();

        assert_eq!(outcome.allocation.as_slice(), &[0, 0]);
        assert_eq!(outcome.cost, Decimal::ZERO);
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = snapshot(vec![]);
        let err = FrontierSearch::new()
            .search(100, &snap, &default_params(), 100)
            .unwrap_err();
        assert!(matches!(err, AllocationError::NoFeasibleAllocation { .. }));

        // Nothing to buy: the empty split is exact
        let outcome = FrontierSearch::new()
            .search(0, &snap, &default_params(), 100)
            .unwrap();
        assert!(outcome.allocation.is_empty());
        assert_eq!(outcome.cost, Decimal::ZERO);
    }

    #[test]
    fn test_zero_step_rejected() {
        let snap = snapshot(vec![VenueQuote::new(1u32, dec!(10), 3000)]);
        let err = FrontierSearch::new()
            .search(100, &snap, &default_params(), 0)
            .unwrap_err();
        assert_eq!(err, AllocationError::InvalidStep);
    }

    #[test]
    fn test_first_split_wins_on_ties() {
        // Identical venues: every split costs the same, the first one enumerated
        // puts as little as possible on venue 0
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10), 1000),
            VenueQuote::new(2u32, dec!(10), 1000),
        ]);
        let outcome = FrontierSearch::new()
            .search(1000, &snap, &default_params(), 500)
            .unwrap();
        assert_eq!(outcome.allocation.as_slice(), &[0, 1000]);
    }

    #[test]
    fn test_fee_shifts_allocation() {
        // Venue 1 is cheaper on price but its fee makes it dearer all-in
        let snap = snapshot(vec![
            VenueQuote::new(1u32, dec!(10.00), 1000).with_fee(dec!(0.05)),
            VenueQuote::new(2u32, dec!(10.02), 1000),
        ]);
        let outcome = FrontierSearch::new()
            .search(1000, &snap, &default_params(), 100)
            .unwrap();
        assert_eq!(outcome.allocation.as_slice(), &[0, 1000]);
        assert_eq!(outcome.cost, dec!(10020));
    }
}
