use bitvec::prelude::*;
use std::fmt;

use crate::spatial::cell::ItemId;

/// Growable bitset of item handles
///
/// Indexed directly by [`ItemId::index`], so membership tests are O(1) and the
/// set never allocates per member. Used to track which items belong to a push
/// cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemSet {
    bits: BitVec,
}

impl ItemSet {
    /// Create an empty set sized for handles below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set holding the given items
    pub fn from_items(items: &[ItemId], capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        for &item in items {
            set.insert(item);
        }
        set
    }

    /// Add an item, growing the backing storage if needed
    ///
    /// Returns whether the item was newly added.
    pub fn insert(&mut self, item: ItemId) -> bool {
        let index = item.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        let was_present = self.contains(item);
        self.bits.set(index, true);
        !was_present
    }

    /// Remove an item
    pub fn remove(&mut self, item: ItemId) {
        if item.index() < self.bits.len() {
            self.bits.set(item.index(), false);
        }
    }

    /// Test membership
    pub fn contains(&self, item: ItemId) -> bool {
        self.bits.get(item.index()).as_deref() == Some(&true)
    }

    /// Test if no items are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of items in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Members in ascending handle order
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.bits.iter_ones().map(ItemId)
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.iter().map(|item| item.to_string()).collect();
        write!(f, "ItemSet({} items: [{}])", self.count(), members.join(", "))
    }
}
