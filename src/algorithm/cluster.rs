//! Rigid clusters of items moved together by a push
//!
//! A cluster keeps one extreme coordinate per row or column on each of its four
//! sides. Asking whether another item touches a side is then a walk over that
//! item's span instead of a scan of the whole grid. The edge tables are rebuilt
//! lazily: every mutation marks all four stale, and a side is recomputed only when
//! it is next queried.

use crate::algorithm::configuration::ItemConfiguration;
use crate::algorithm::itemset::ItemSet;
use crate::math::direction::Edge;
use crate::spatial::cell::{CellAndSpan, ItemId};

bitflags::bitflags! {
    /// Set of cluster sides, used to track which edge tables are stale
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EdgeSet: u8 {
        /// Side facing decreasing `x`
        const LEFT = 0b0001;
        /// Side facing decreasing `y`
        const TOP = 0b0010;
        /// Side facing increasing `x`
        const RIGHT = 0b0100;
        /// Side facing increasing `y`
        const BOTTOM = 0b1000;
    }
}

impl EdgeSet {
    /// Flag for a single side
    pub const fn of(edge: Edge) -> Self {
        match edge {
            Edge::Left => Self::LEFT,
            Edge::Top => Self::TOP,
            Edge::Right => Self::RIGHT,
            Edge::Bottom => Self::BOTTOM,
        }
    }
}

/// Marker for a row or column the cluster does not occupy
pub const NO_EDGE: i32 = -1;

/// A group of items treated as one rigid body during a push
///
/// The cluster borrows the configuration it was built from and moves its members'
/// rectangles in place.
#[derive(Debug)]
pub struct ViewCluster<'c> {
    views: Vec<ItemId>,
    members: ItemSet,
    config: &'c mut ItemConfiguration,
    left_edge: Vec<i32>,
    right_edge: Vec<i32>,
    top_edge: Vec<i32>,
    bottom_edge: Vec<i32>,
    dirty_edges: EdgeSet,
    bounding_rect: CellAndSpan,
    bounding_rect_dirty: bool,
}

impl<'c> ViewCluster<'c> {
    /// Create a cluster over `views` in a `count_x` by `count_y` grid
    ///
    /// # Panics
    ///
    /// Panics if `views` is empty.
    pub fn new(
        views: &[ItemId],
        config: &'c mut ItemConfiguration,
        count_x: i32,
        count_y: i32,
    ) -> Self {
        assert!(!views.is_empty(), "a cluster needs at least one item");

        let capacity = config.items().map(|(item, _)| item.index() + 1).max().unwrap_or(0);
        let rows = count_y.max(0) as usize;
        let columns = count_x.max(0) as usize;

        let mut cluster = Self {
            views: views.to_vec(),
            members: ItemSet::from_items(views, capacity),
            config,
            left_edge: vec![NO_EDGE; rows],
            right_edge: vec![NO_EDGE; rows],
            top_edge: vec![NO_EDGE; columns],
            bottom_edge: vec![NO_EDGE; columns],
            dirty_edges: EdgeSet::all(),
            bounding_rect: CellAndSpan::default(),
            bounding_rect_dirty: true,
        };
        cluster.reset_edges();
        cluster
    }

    /// Members in the order they joined
    pub fn views(&self) -> &[ItemId] {
        &self.views
    }

    /// Whether an item belongs to the cluster
    pub fn contains(&self, view: ItemId) -> bool {
        self.members.contains(view)
    }

    /// Number of members
    pub const fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false; a cluster is never built empty
    pub const fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Configuration the cluster moves
    pub fn config(&self) -> &ItemConfiguration {
        &*self.config
    }

    /// Sides whose tables must be rebuilt before the next query
    pub const fn dirty_edges(&self) -> EdgeSet {
        self.dirty_edges
    }

    /// Invalidate all four edge tables and the bounding rectangle
    pub fn reset_edges(&mut self) {
        self.left_edge.fill(NO_EDGE);
        self.right_edge.fill(NO_EDGE);
        self.top_edge.fill(NO_EDGE);
        self.bottom_edge.fill(NO_EDGE);
        self.dirty_edges = EdgeSet::all();
        self.bounding_rect_dirty = true;
    }

    /// Rebuild one edge table from the members' current rectangles
    ///
    /// Left and top keep the smallest coordinate per row or column, right and
    /// bottom the largest exclusive boundary.
    pub fn compute_edge(&mut self, edge: Edge) {
        for view in &self.views {
            let Some(cs) = self.config.get(*view) else {
                continue;
            };
            match edge {
                Edge::Left => {
                    for row in cs.cell_y..cs.bottom() {
                        if let Some(slot) = edge_slot(&mut self.left_edge, row) {
                            if cs.cell_x < *slot || *slot < 0 {
                                *slot = cs.cell_x;
                            }
                        }
                    }
                }
                Edge::Right => {
                    for row in cs.cell_y..cs.bottom() {
                        if let Some(slot) = edge_slot(&mut self.right_edge, row) {
                            *slot = (*slot).max(cs.right());
                        }
                    }
                }
                Edge::Top => {
                    for column in cs.cell_x..cs.right() {
                        if let Some(slot) = edge_slot(&mut self.top_edge, column) {
                            if cs.cell_y < *slot || *slot < 0 {
                                *slot = cs.cell_y;
                            }
                        }
                    }
                }
                Edge::Bottom => {
                    for column in cs.cell_x..cs.right() {
                        if let Some(slot) = edge_slot(&mut self.bottom_edge, column) {
                            *slot = (*slot).max(cs.bottom());
                        }
                    }
                }
            }
        }
        self.dirty_edges.remove(EdgeSet::of(edge));
    }

    fn ensure_edge(&mut self, edge: Edge) {
        if self.dirty_edges.contains(EdgeSet::of(edge)) {
            self.compute_edge(edge);
        }
    }

    /// Edge table for one side, rebuilt first if stale
    ///
    /// Left and right tables have one entry per row, top and bottom one per column.
    pub fn edge_values(&mut self, edge: Edge) -> &[i32] {
        self.ensure_edge(edge);
        match edge {
            Edge::Left => &self.left_edge,
            Edge::Right => &self.right_edge,
            Edge::Top => &self.top_edge,
            Edge::Bottom => &self.bottom_edge,
        }
    }

    /// Whether `view` sits flush against the given side of the cluster
    ///
    /// For the left side this means some row spanned by `view` has the cluster's
    /// leftmost cell exactly at `view`'s right boundary; the other sides mirror it.
    pub fn is_view_touching_edge(&mut self, view: ItemId, edge: Edge) -> bool {
        let Some(cs) = self.config.get(view).copied() else {
            return false;
        };
        self.ensure_edge(edge);

        match edge {
            Edge::Left => (cs.cell_y..cs.bottom())
                .any(|row| edge_at(&self.left_edge, row) == Some(cs.right())),
            Edge::Right => (cs.cell_y..cs.bottom())
                .any(|row| edge_at(&self.right_edge, row) == Some(cs.cell_x)),
            Edge::Top => (cs.cell_x..cs.right())
                .any(|column| edge_at(&self.top_edge, column) == Some(cs.bottom())),
            Edge::Bottom => (cs.cell_x..cs.right())
                .any(|column| edge_at(&self.bottom_edge, column) == Some(cs.cell_y)),
        }
    }

    /// Translate every member by `delta` cells towards the given side
    pub fn shift(&mut self, edge: Edge, delta: i32) {
        let (step_x, step_y) = edge.step();
        for view in &self.views {
            if let Some(rect) = self.config.get_mut(*view) {
                *rect = rect.translated(step_x * delta, step_y * delta);
            }
        }
        self.reset_edges();
    }

    /// Absorb another item into the cluster
    pub fn add_view(&mut self, view: ItemId) {
        if self.members.insert(view) {
            self.views.push(view);
        }
        self.reset_edges();
    }

    /// Union of the members' current rectangles, cached until the next mutation
    pub fn bounding_rect(&mut self) -> CellAndSpan {
        if self.bounding_rect_dirty {
            self.bounding_rect = self.config.bounding_rect_for_views(&self.views);
            self.bounding_rect_dirty = false;
        }
        self.bounding_rect
    }

    /// Reorder the configuration's push order for a push led by `edge`
    ///
    /// Items closest to the leading side come first: for a leftward push, the
    /// item whose right boundary is furthest right leads. The sort is stable so
    /// equal items keep their previous order.
    pub fn sort_configuration_for_edge_push(&mut self, edge: Edge) {
        let mut order = std::mem::take(&mut self.config.sorted_views);
        let config = &*self.config;
        order.sort_by_key(|view| {
            config.get(*view).map_or(i32::MAX, |cs| match edge {
                Edge::Left => -cs.right(),
                Edge::Right => cs.cell_x,
                Edge::Top => -cs.bottom(),
                Edge::Bottom => cs.cell_y,
            })
        });
        self.config.sorted_views = order;
    }
}

fn edge_slot(edge: &mut [i32], index: i32) -> Option<&mut i32> {
    usize::try_from(index).ok().and_then(|i| edge.get_mut(i))
}

fn edge_at(edge: &[i32], index: i32) -> Option<i32> {
    usize::try_from(index).ok().and_then(|i| edge.get(i)).copied()
}
