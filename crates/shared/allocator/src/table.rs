use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rust_decimal::Decimal;
use sor_core::{Allocation, CostParams, Quantity, Snapshot};
use sor_ports::{AllocationError, AllocationResult, AllocationSearch, SearchOutcome};

use crate::cost::{self, venue_term};
use crate::frontier::infeasible;
use crate::quantize::candidate_quantities;

/// Dynamic-programming search keyed by (venue index, cumulative quantity)
///
/// Only exact splits are ever scored, so the mismatch penalties are constant
/// and the objective decomposes into one term per venue. The table stores,
/// for every reachable cumulative quantity before venue `i`, the cheapest way
/// to finish the order with venues `i..`. Reconstruction walks forward taking
/// the smallest quantity that stays optimal, which reproduces the frontier's
/// first-found tie-break exactly (decimal sums are exact).
#[derive(Debug, Clone, Default)]
pub struct TableSearch {
    allow_remainder: bool,
}

impl TableSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also try each venue's off-grid cap as a candidate
    pub fn with_remainder(mut self, allow_remainder: bool) -> Self {
        self.allow_remainder = allow_remainder;
        self
    }

    fn candidates(
        &self,
        order_size: Quantity,
        used: Quantity,
        ask_size: Quantity,
        step: Quantity,
    ) -> impl Iterator<Item = Quantity> {
        let cap = (order_size - used).min(ask_size);
        candidate_quantities(cap, step, self.allow_remainder)
    }

    /// Cumulative quantities reachable before each venue (index `n` = after the last)
    fn reachable(
        &self,
        order_size: Quantity,
        snapshot: &Snapshot,
        step: Quantity,
    ) -> Vec<BTreeSet<Quantity>> {
        let mut layers = Vec::with_capacity(snapshot.len() + 1);
        layers.push(BTreeSet::from([0]));

        for (i, quote) in snapshot.iter().enumerate() {
            let mut next = BTreeSet::new();
            for &used in &layers[i] {
                for q in self.candidates(order_size, used, quote.ask_size, step) {
                    next.insert(used + q);
                }
            }
            layers.push(next);
        }
        layers
    }

    /// Cheapest completion cost for every (venue, cumulative) state that can
    /// still land exactly on `order_size`
    fn suffix_costs(
        &self,
        order_size: Quantity,
        snapshot: &Snapshot,
        step: Quantity,
        reachable: &[BTreeSet<Quantity>],
    ) -> Vec<BTreeMap<Quantity, Decimal>> {
        let n = snapshot.len();
        let mut table = vec![BTreeMap::new(); n + 1];
        if reachable[n].contains(&order_size) {
            table[n].insert(order_size, Decimal::ZERO);
        }

        for i in (0..n).rev() {
            let quote = &snapshot.venues[i];
            let mut layer = BTreeMap::new();
            for &used in &reachable[i] {
                let mut best: Option<Decimal> = None;
                for q in self.candidates(order_size, used, quote.ask_size, step) {
                    let Some(rest) = table[i + 1].get(&(used + q)) else {
                        continue;
                    };
                    let total = venue_term(quote, q) + *rest;
                    if best.is_none_or(|b| total < b) {
                        best = Some(total);
                    }
                }
                if let Some(total) = best {
                    layer.insert(used, total);
                }
            }
            table[i] = layer;
        }
        table
    }
}

impl AllocationSearch for TableSearch {
    fn name(&self) -> &str {
        "Table"
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

        let reachable = self.reachable(order_size, snapshot, step);
        let table = self.suffix_costs(order_size, snapshot, step, &reachable);
        debug!(
            "[SEARCH] table: {} venues, {} states",
            snapshot.len(),
            table.iter().map(|layer| layer.len()).sum::<usize>()
        );

        if !table[0].contains_key(&0) {
            return Err(infeasible(order_size, snapshot, step));
        }

        let mut used: Quantity = 0;
        let mut quantities = Vec::with_capacity(snapshot.len());
        for (i, quote) in snapshot.iter().enumerate() {
            let target = table[i]
                .get(&used)
                .copied()
                .ok_or_else(|| infeasible(order_size, snapshot, step))?;
            let q = self
                .candidates(order_size, used, quote.ask_size, step)
                .find(|&q| {
                    table[i + 1]
                        .get(&(used + q))
                        .is_some_and(|rest| venue_term(quote, q) + *rest == target)
                })
                .ok_or_else(|| infeasible(order_size, snapshot, step))?;
            quantities.push(q);
            used += q;
        }

        let allocation = Allocation::new(quantities);
        let cost = cost::score(&allocation, snapshot, order_size, params)?;
        Ok(SearchOutcome::new(allocation, cost))
    }
}
