//! Cell-space rectangles and item handles
//!
//! Every position the solver reasons about is expressed in whole grid cells with
//! the origin at the top-left corner. Rectangles are half-open on both axes, so an
//! item at `cell_x = 2, span_x = 1` covers column 2 only.

use std::fmt;

/// Opaque, stable handle for an item placed on a grid
///
/// Handles are issued by [`CellLayout`](crate::spatial::layout::CellLayout) and act
/// as arena indices. The solver only borrows them for the duration of one
/// evaluation; ownership of the underlying icon or widget stays with the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

impl ItemId {
    /// Arena index backing this handle
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cell position plus span of a rectangular occupant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellAndSpan {
    /// Leftmost column covered
    pub cell_x: i32,
    /// Topmost row covered
    pub cell_y: i32,
    /// Number of columns covered
    pub span_x: i32,
    /// Number of rows covered
    pub span_y: i32,
}

impl CellAndSpan {
    /// Create a rectangle from its top-left cell and span
    pub const fn new(cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> Self {
        Self {
            cell_x,
            cell_y,
            span_x,
            span_y,
        }
    }

    /// Exclusive right boundary
    pub const fn right(&self) -> i32 {
        self.cell_x + self.span_x
    }

    /// Exclusive bottom boundary
    pub const fn bottom(&self) -> i32 {
        self.cell_y + self.span_y
    }

    /// Number of cells covered
    pub const fn area(&self) -> i32 {
        self.span_x * self.span_y
    }

    /// Whether the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.span_x <= 0 || self.span_y <= 0
    }

    /// Half-open overlap test on both axes
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.cell_x < other.right()
            && other.cell_x < self.right()
            && self.cell_y < other.bottom()
            && other.cell_y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    ///
    /// An empty rectangle contains nothing.
    pub const fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && self.cell_x <= other.cell_x
            && self.cell_y <= other.cell_y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Whether the given cell lies inside this rectangle
    pub const fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= self.cell_x && x < self.right() && y >= self.cell_y && y < self.bottom()
    }

    /// Smallest rectangle covering both inputs
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let left = self.cell_x.min(other.cell_x);
        let top = self.cell_y.min(other.cell_y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Copy of this rectangle moved by whole cells
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.cell_x + dx, self.cell_y + dy, self.span_x, self.span_y)
    }

    /// Whether the rectangle lies within a `count_x` by `count_y` grid
    pub const fn fits_within(&self, count_x: i32, count_y: i32) -> bool {
        self.cell_x >= 0 && self.cell_y >= 0 && self.right() <= count_x && self.bottom() <= count_y
    }

    /// Manhattan distance between the top-left cells of two rectangles
    pub const fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.cell_x - other.cell_x).abs() + (self.cell_y - other.cell_y).abs()
    }
}

impl fmt::Display for CellAndSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.cell_x, self.cell_y, self.span_x, self.span_y
        )
    }
}
