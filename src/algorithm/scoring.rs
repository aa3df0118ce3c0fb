//! Cost model for choosing between successful pushes
//!
//! Several push directions can clear the target region. Each one is scored by how
//! much of the existing layout it disturbs and the cheapest wins. Candidates are
//! compared in priority order and a later one must be strictly cheaper to replace
//! an earlier one.

use crate::algorithm::configuration::ItemConfiguration;
use crate::io::configuration::{
    WEIGHT_DISPLACED_AREA, WEIGHT_DISPLACED_ITEMS, WEIGHT_TOTAL_DISTANCE,
};
use crate::spatial::cell::ItemId;

/// Relative weight of each cost component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushWeights {
    /// Cost per displaced item
    pub displaced_items: i64,
    /// Cost per cell of Manhattan travel
    pub total_distance: i64,
    /// Cost per cell of displaced area
    pub displaced_area: i64,
}

impl Default for PushWeights {
    fn default() -> Self {
        Self {
            displaced_items: WEIGHT_DISPLACED_ITEMS,
            total_distance: WEIGHT_TOTAL_DISTANCE,
            displaced_area: WEIGHT_DISPLACED_AREA,
        }
    }
}

/// Raw disturbance measured between two configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PushCost {
    /// Items whose rectangle changed
    pub displaced_items: usize,
    /// Sum of Manhattan distances travelled by displaced items
    pub total_distance: i64,
    /// Sum of the areas of displaced items
    pub displaced_area: i64,
}

impl PushCost {
    /// Measure how far `after` moved items relative to `before`
    ///
    /// The moving item is left out; it is expected to move.
    pub fn between(
        before: &ItemConfiguration,
        after: &ItemConfiguration,
        moving: Option<ItemId>,
    ) -> Self {
        after
            .displacements(|item| before.get(item).copied(), moving)
            .iter()
            .fold(Self::default(), |cost, displacement| Self {
                displaced_items: cost.displaced_items + 1,
                total_distance: cost.total_distance
                    + i64::from(displacement.before.manhattan_distance(&displacement.after)),
                displaced_area: cost.displaced_area + i64::from(displacement.after.area()),
            })
    }

    /// Collapse the components into one comparable number
    pub const fn weighted(&self, weights: &PushWeights) -> i64 {
        self.displaced_items as i64 * weights.displaced_items
            + self.total_distance * weights.total_distance
            + self.displaced_area * weights.displaced_area
    }
}

/// Index of the cheapest candidate, preferring the earliest on ties
pub fn select_cheapest(costs: &[PushCost], weights: &PushWeights) -> Option<usize> {
    costs
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, i64)>, (index, cost)| {
            let score = cost.weighted(weights);
            match best {
                Some((_, best_score)) if best_score <= score => best,
                _ => Some((index, score)),
            }
        })
        .map(|(index, _)| index)
}
