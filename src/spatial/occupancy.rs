//! Boolean occupancy map over a fixed cell grid

use ndarray::Array2;

use crate::spatial::cell::CellAndSpan;

/// Which cells of a `count_x` by `count_y` grid are taken
///
/// Indexed `[x, y]`. Writes that fall outside the grid are clipped, reads outside
/// the grid report `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOccupancy {
    cells: Array2<bool>,
}

impl GridOccupancy {
    /// Create an empty occupancy map
    pub fn new(count_x: usize, count_y: usize) -> Self {
        Self {
            cells: Array2::from_elem((count_x, count_y), false),
        }
    }

    /// Number of columns
    pub fn count_x(&self) -> usize {
        self.cells.dim().0
    }

    /// Number of rows
    pub fn count_y(&self) -> usize {
        self.cells.dim().1
    }

    /// Occupancy of a single cell, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get([x as usize, y as usize]).copied()
    }

    /// Whether a cell is taken; cells outside the grid count as taken
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).unwrap_or(true)
    }

    /// Set every cell of a region to `value`
    pub fn mark_region(&mut self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32, value: bool) {
        for x in cell_x.max(0)..cell_x + span_x {
            for y in cell_y.max(0)..cell_y + span_y {
                if let Some(cell) = self.cells.get_mut([x as usize, y as usize]) {
                    *cell = value;
                }
            }
        }
    }

    /// Set every cell covered by `rect` to `value`
    pub fn mark_cells(&mut self, rect: &CellAndSpan, value: bool) {
        self.mark_region(rect.cell_x, rect.cell_y, rect.span_x, rect.span_y, value);
    }

    /// Whether the region lies inside the grid and none of its cells are taken
    pub fn is_region_vacant(&self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> bool {
        (cell_x..cell_x + span_x)
            .all(|x| (cell_y..cell_y + span_y).all(|y| self.get(x, y) == Some(false)))
    }

    /// Release every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Overwrite `other` with this map's state
    pub fn copy_to(&self, other: &mut Self) {
        other.cells.clone_from(&self.cells);
    }

    /// Number of taken cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}
