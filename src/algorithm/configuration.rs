//! Candidate grid states explored by the solver
//!
//! An [`ItemConfiguration`] is built fresh for every evaluation, mutated in place by
//! push attempts, and either written back to the layout or dropped. Speculative
//! moves are bracketed by [`ItemConfiguration::save`] and
//! [`ItemConfiguration::restore`].

use std::collections::BTreeMap;

use crate::spatial::cell::{CellAndSpan, ItemId};

/// One item's tentative placement compared with where it started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// Item that moved
    pub item: ItemId,
    /// Rectangle before the evaluation
    pub before: CellAndSpan,
    /// Rectangle in the solution
    pub after: CellAndSpan,
}

impl Displacement {
    /// Whole-cell offset of the top-left corner
    pub const fn delta(&self) -> (i32, i32) {
        (
            self.after.cell_x - self.before.cell_x,
            self.after.cell_y - self.before.cell_y,
        )
    }
}

/// A candidate placement of every participating item
///
/// Items are kept in a `BTreeMap` so iteration order is the handle order and every
/// evaluation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemConfiguration {
    /// Placement chosen for the moving item, including any span reduction
    pub bounds: CellAndSpan,
    map: BTreeMap<ItemId, CellAndSpan>,
    saved_map: BTreeMap<ItemId, CellAndSpan>,
    /// Order in which items are considered during a push
    pub sorted_views: Vec<ItemId>,
    /// Items that overlapped the moving item's target before any push
    pub intersecting_views: Vec<ItemId>,
    /// Whether this configuration was accepted as a solution
    pub is_solution: bool,
}

impl ItemConfiguration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item at a rectangle
    ///
    /// Seeds a zeroed snapshot slot and appends the item to the push order.
    ///
    /// # Panics
    ///
    /// Panics if the item is already registered.
    pub fn add(&mut self, item: ItemId, rect: CellAndSpan) {
        assert!(
            !self.map.contains_key(&item),
            "item {item} added to a configuration twice"
        );
        self.map.insert(item, rect);
        self.saved_map.insert(item, CellAndSpan::default());
        self.sorted_views.push(item);
    }

    /// Current rectangle of an item
    pub fn get(&self, item: ItemId) -> Option<&CellAndSpan> {
        self.map.get(&item)
    }

    /// Mutable rectangle of an item
    pub fn get_mut(&mut self, item: ItemId) -> Option<&mut CellAndSpan> {
        self.map.get_mut(&item)
    }

    /// Whether the item participates in this configuration
    pub fn contains(&self, item: ItemId) -> bool {
        self.map.contains_key(&item)
    }

    /// Number of participating items
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no items participate
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Items and their rectangles in handle order
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &CellAndSpan)> + '_ {
        self.map.iter().map(|(&item, rect)| (item, rect))
    }

    /// Drop every item and reset all bookkeeping
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot every item's current rectangle
    pub fn save(&mut self) {
        for (item, rect) in &self.map {
            if let Some(slot) = self.saved_map.get_mut(item) {
                *slot = *rect;
            }
        }
    }

    /// Roll every item back to the last snapshot
    pub fn restore(&mut self) {
        for (item, saved) in &self.saved_map {
            if let Some(rect) = self.map.get_mut(item) {
                *rect = *saved;
            }
        }
    }

    /// Cell area of the moving item's placement
    pub const fn area(&self) -> i32 {
        self.bounds.area()
    }

    /// Union of the current rectangles of `views`
    ///
    /// # Panics
    ///
    /// Panics if `views` is empty.
    pub fn bounding_rect_for_views(&self, views: &[ItemId]) -> CellAndSpan {
        assert!(
            !views.is_empty(),
            "bounding rectangle requested for an empty view list"
        );
        views
            .iter()
            .filter_map(|view| self.map.get(view))
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default()
    }

    /// Check that no two rectangles overlap and all lie inside the grid
    ///
    /// The moving item is represented by [`bounds`](Self::bounds); its own map
    /// entry, if any, is skipped.
    pub fn is_valid_solution(&self, count_x: i32, count_y: i32, moving: Option<ItemId>) -> bool {
        let mut rects: Vec<&CellAndSpan> = self
            .map
            .iter()
            .filter(|(item, _)| Some(**item) != moving)
            .map(|(_, rect)| rect)
            .collect();
        if !self.bounds.is_empty() {
            rects.push(&self.bounds);
        }

        if !rects.iter().all(|rect| rect.fits_within(count_x, count_y)) {
            return false;
        }
        rects.iter().enumerate().all(|(index, rect)| {
            rects
                .iter()
                .skip(index + 1)
                .all(|other| !rect.intersects(other))
        })
    }

    /// Items whose rectangle differs from `before`
    ///
    /// Items unknown to `before` and the `moving` item are skipped.
    pub fn displacements<F>(&self, before: F, moving: Option<ItemId>) -> Vec<Displacement>
    where
        F: Fn(ItemId) -> Option<CellAndSpan>,
    {
        self.map
            .iter()
            .filter(|(item, _)| Some(**item) != moving)
            .filter_map(|(&item, &after)| {
                before(item)
                    .filter(|start| *start != after)
                    .map(|start| Displacement {
                        item,
                        before: start,
                        after,
                    })
            })
            .collect()
    }
}
