//! Cell layout: grid dimensions, pixel metrics and placed items
//!
//! A layout owns two occupancy maps. The committed map mirrors the items' persisted
//! positions; the temporary map mirrors the positions shown while a drag is in
//! progress. Solutions are written to the temporary side first and only reach the
//! committed side through [`CellLayout::commit_temp_placement`].

use std::fmt;

use crate::algorithm::configuration::ItemConfiguration;
use crate::io::configuration::{
    DEFAULT_BORDER_SPACE_X, DEFAULT_BORDER_SPACE_Y, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH,
};
use crate::io::error::{ReorderError, Result, invalid_parameter};
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::occupancy::GridOccupancy;

/// Container a layout belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Container {
    /// A regular home screen page
    #[default]
    Desktop,
    /// The fixed bottom dock
    Hotseat,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => f.write_str("desktop"),
            Self::Hotseat => f.write_str("hotseat"),
        }
    }
}

/// Pixel geometry of one cell and the gaps around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Width of a single cell
    pub cell_width: i32,
    /// Height of a single cell
    pub cell_height: i32,
    /// Horizontal gap between adjacent cells
    pub border_space_x: i32,
    /// Vertical gap between adjacent cells
    pub border_space_y: i32,
    /// Offset of the first column from the layout's left edge
    pub padding_left: i32,
    /// Offset of the first row from the layout's top edge
    pub padding_top: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            border_space_x: DEFAULT_BORDER_SPACE_X,
            border_space_y: DEFAULT_BORDER_SPACE_Y,
            padding_left: 0,
            padding_top: 0,
        }
    }
}

impl CellMetrics {
    /// Horizontal distance between the origins of adjacent columns
    pub const fn stride_x(&self) -> i32 {
        self.cell_width + self.border_space_x
    }

    /// Vertical distance between the origins of adjacent rows
    pub const fn stride_y(&self) -> i32 {
        self.cell_height + self.border_space_y
    }
}

/// Axis-aligned pixel rectangle, right and bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

impl PixelRect {
    /// Width in pixels
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in pixels
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Horizontal centre, rounded towards zero
    pub const fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    /// Vertical centre, rounded towards zero
    pub const fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }
}

/// An item placed on a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    /// Handle of this item
    pub id: ItemId,
    /// Committed position
    pub cell: CellAndSpan,
    /// Position shown while a reorder is previewed
    pub tmp: CellAndSpan,
    /// Whether the solver may displace this item
    pub can_reorder: bool,
}

/// A fixed-size cell grid holding rectangular items
#[derive(Debug, Clone)]
pub struct CellLayout {
    count_x: i32,
    count_y: i32,
    metrics: CellMetrics,
    screen_id: i32,
    container: Container,
    items: Vec<PlacedItem>,
    occupied: GridOccupancy,
    tmp_occupied: GridOccupancy,
}

impl CellLayout {
    /// Create an empty desktop layout with default pixel metrics
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is smaller than one cell
    pub fn new(count_x: i32, count_y: i32) -> Result<Self> {
        Self::with_metrics(count_x, count_y, CellMetrics::default())
    }

    /// Create an empty desktop layout with explicit pixel metrics
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is smaller than one cell or a cell has
    /// no pixel size
    pub fn with_metrics(count_x: i32, count_y: i32, metrics: CellMetrics) -> Result<Self> {
        if count_x < 1 {
            return Err(invalid_parameter("count_x", &count_x, &"must be at least 1"));
        }
        if count_y < 1 {
            return Err(invalid_parameter("count_y", &count_y, &"must be at least 1"));
        }
        if metrics.cell_width < 1 || metrics.cell_height < 1 {
            return Err(invalid_parameter(
                "metrics",
                &format!("{}x{}", metrics.cell_width, metrics.cell_height),
                &"cells must be at least one pixel wide and tall",
            ));
        }

        Ok(Self {
            count_x,
            count_y,
            metrics,
            screen_id: 0,
            container: Container::Desktop,
            items: Vec::new(),
            occupied: GridOccupancy::new(count_x as usize, count_y as usize),
            tmp_occupied: GridOccupancy::new(count_x as usize, count_y as usize),
        })
    }

    /// Tag the layout with the screen and container it represents
    #[must_use]
    pub const fn on_screen(mut self, screen_id: i32, container: Container) -> Self {
        self.screen_id = screen_id;
        self.container = container;
        self
    }

    /// Number of columns
    pub const fn count_x(&self) -> i32 {
        self.count_x
    }

    /// Number of rows
    pub const fn count_y(&self) -> i32 {
        self.count_y
    }

    /// Pixel metrics
    pub const fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    /// Screen this layout represents; `-1` for the hotseat
    pub const fn screen_id(&self) -> i32 {
        match self.container {
            Container::Desktop => self.screen_id,
            Container::Hotseat => -1,
        }
    }

    /// Container this layout represents
    pub const fn container(&self) -> Container {
        self.container
    }

    /// Committed occupancy
    pub const fn occupied(&self) -> &GridOccupancy {
        &self.occupied
    }

    /// Occupancy of the temporary positions
    pub const fn tmp_occupied(&self) -> &GridOccupancy {
        &self.tmp_occupied
    }

    /// All placed items in insertion order
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// Look up a placed item
    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.get(id.index())
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut PlacedItem> {
        self.items.get_mut(id.index())
    }

    /// Place a new item at a vacant committed position
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle is empty, leaves the grid or overlaps an
    /// existing item
    pub fn add_item(&mut self, cell: CellAndSpan, can_reorder: bool) -> Result<ItemId> {
        if cell.is_empty() || !cell.fits_within(self.count_x, self.count_y) {
            return Err(ReorderError::InvalidPlacement {
                rect: cell,
                reason: format!("must lie within the {}x{} grid", self.count_x, self.count_y),
            });
        }
        if !self
            .occupied
            .is_region_vacant(cell.cell_x, cell.cell_y, cell.span_x, cell.span_y)
        {
            return Err(ReorderError::InvalidPlacement {
                rect: cell,
                reason: "overlaps an existing item".to_string(),
            });
        }

        let id = ItemId(self.items.len());
        self.items.push(PlacedItem {
            id,
            cell,
            tmp: cell,
            can_reorder,
        });
        self.occupied.mark_cells(&cell, true);
        self.tmp_occupied.mark_cells(&cell, true);
        Ok(id)
    }

    /// Move an item to a new committed position and rebuild both occupancy maps
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown or the rectangle leaves the grid
    pub fn move_item(&mut self, id: ItemId, cell: CellAndSpan) -> Result<()> {
        if cell.is_empty() || !cell.fits_within(self.count_x, self.count_y) {
            return Err(ReorderError::InvalidPlacement {
                rect: cell,
                reason: format!("must lie within the {}x{} grid", self.count_x, self.count_y),
            });
        }
        let item = self.item_mut(id).ok_or(ReorderError::UnknownItem { item: id })?;
        item.cell = cell;
        item.tmp = cell;
        self.rebuild_occupancy();
        Ok(())
    }

    fn rebuild_occupancy(&mut self) {
        self.occupied.clear();
        self.tmp_occupied.clear();
        for item in &self.items {
            self.occupied.mark_cells(&item.cell, true);
            self.tmp_occupied.mark_cells(&item.tmp, true);
        }
    }

    /// Committed occupancy with one item's cells released
    pub fn occupancy_without(&self, ignore: Option<ItemId>) -> GridOccupancy {
        let mut occupancy = self.occupied.clone();
        if let Some(item) = ignore.and_then(|id| self.item(id)) {
            occupancy.mark_cells(&item.cell, false);
        }
        occupancy
    }

    /// Pixel rectangle covered by a cell region
    pub const fn cell_to_rect(&self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> PixelRect {
        let m = &self.metrics;
        let left = m.padding_left + cell_x * m.stride_x();
        let top = m.padding_top + cell_y * m.stride_y();
        let width = span_x * m.cell_width + (span_x - 1) * m.border_space_x;
        let height = span_y * m.cell_height + (span_y - 1) * m.border_space_y;
        PixelRect {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Top-left pixel of a cell
    pub const fn cell_to_point(&self, cell_x: i32, cell_y: i32) -> (i32, i32) {
        let rect = self.cell_to_rect(cell_x, cell_y, 1, 1);
        (rect.left, rect.top)
    }

    /// Centre pixel of a cell
    pub const fn cell_to_center_point(&self, cell_x: i32, cell_y: i32) -> (i32, i32) {
        self.region_to_center_point(cell_x, cell_y, 1, 1)
    }

    /// Centre pixel of a cell region
    pub const fn region_to_center_point(
        &self,
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
    ) -> (i32, i32) {
        let rect = self.cell_to_rect(cell_x, cell_y, span_x, span_y);
        (rect.center_x(), rect.center_y())
    }

    /// Cell containing a pixel, clamped to the grid
    pub fn point_to_cell(&self, pixel_x: i32, pixel_y: i32) -> (i32, i32) {
        let m = &self.metrics;
        let x = (pixel_x - m.padding_left) / m.stride_x();
        let y = (pixel_y - m.padding_top) / m.stride_y();
        (x.clamp(0, self.count_x - 1), y.clamp(0, self.count_y - 1))
    }

    /// Nearest placement for an item dragged with its centre at a pixel
    ///
    /// With `occupied` set, only vacant regions of at least the minimum span are
    /// candidates and each one grows towards the full span, alternating between
    /// columns and rows. A region inside an earlier candidate is passed over, and a
    /// candidate that contains the current best replaces it regardless of distance.
    /// On equal distance the later candidate wins. With `occupied` unset every
    /// position of the full span is a candidate.
    pub fn find_nearest_area(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        min_span_x: i32,
        min_span_y: i32,
        span_x: i32,
        span_y: i32,
        occupied: Option<&GridOccupancy>,
    ) -> Option<CellAndSpan> {
        if min_span_x <= 0
            || min_span_y <= 0
            || span_x <= 0
            || span_y <= 0
            || span_x < min_span_x
            || span_y < min_span_y
        {
            return None;
        }

        // The pointer marks the item's centre but candidates are keyed by top-left cell
        let m = &self.metrics;
        let target_x = (pixel_x as f32 - m.stride_x() as f32 * (span_x - 1) as f32 / 2.0) as i32;
        let target_y = (pixel_y as f32 - m.stride_y() as f32 * (span_y - 1) as f32 / 2.0) as i32;

        let mut best: Option<(f64, CellAndSpan)> = None;
        let mut valid_regions: Vec<CellAndSpan> = Vec::new();

        for y in 0..self.count_y - (min_span_y - 1) {
            for x in 0..self.count_x - (min_span_x - 1) {
                let current = match occupied {
                    Some(grid) => {
                        if !grid.is_region_vacant(x, y, min_span_x, min_span_y) {
                            continue;
                        }
                        let (size_x, size_y) =
                            self.grow_region(grid, x, y, min_span_x, min_span_y, span_x, span_y);
                        CellAndSpan::new(x, y, size_x, size_y)
                    }
                    None => CellAndSpan::new(x, y, span_x, span_y),
                };

                let contained = valid_regions.iter().any(|region| region.contains(&current));
                valid_regions.push(current);

                let (center_x, center_y) = self.cell_to_center_point(x, y);
                let distance = f64::from(center_x - target_x).hypot(f64::from(center_y - target_y));

                let replaces = match best {
                    None => !contained,
                    Some((best_distance, best_rect)) => {
                        (distance <= best_distance && !contained) || current.contains(&best_rect)
                    }
                };
                if replaces {
                    best = Some((distance, current));
                }
            }
        }

        best.map(|(_, rect)| rect)
    }

    fn grow_region(
        &self,
        grid: &GridOccupancy,
        x: i32,
        y: i32,
        min_span_x: i32,
        min_span_y: i32,
        span_x: i32,
        span_y: i32,
    ) -> (i32, i32) {
        let mut size_x = min_span_x;
        let mut size_y = min_span_y;
        let mut inc_x = true;
        let mut hit_max_x = size_x >= span_x;
        let mut hit_max_y = size_y >= span_y;

        while !(hit_max_x && hit_max_y) {
            if inc_x && !hit_max_x {
                if x + size_x > self.count_x - 1
                    || (0..size_y).any(|j| grid.is_occupied(x + size_x, y + j))
                {
                    hit_max_x = true;
                } else {
                    size_x += 1;
                }
            } else if !hit_max_y {
                if y + size_y > self.count_y - 1
                    || (0..size_x).any(|i| grid.is_occupied(x + i, y + size_y))
                {
                    hit_max_y = true;
                } else {
                    size_y += 1;
                }
            }
            hit_max_x |= size_x >= span_x;
            hit_max_y |= size_y >= span_y;
            inc_x = !inc_x;
        }
        (size_x, size_y)
    }

    /// Nearest top-left cell for the full span, ignoring occupancy
    pub fn find_nearest_area_ignore_occupied(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        span_x: i32,
        span_y: i32,
    ) -> Option<CellAndSpan> {
        self.find_nearest_area(pixel_x, pixel_y, span_x, span_y, span_x, span_y, None)
    }

    /// Nearest vacant region of at least the minimum span
    ///
    /// The `ignore` item's own cells count as vacant, as they do for the item
    /// being dragged.
    pub fn find_nearest_vacant_area(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        min_span_x: i32,
        min_span_y: i32,
        span_x: i32,
        span_y: i32,
        ignore: Option<ItemId>,
    ) -> Option<CellAndSpan> {
        let occupancy = self.occupancy_without(ignore);
        self.find_nearest_area(
            pixel_x,
            pixel_y,
            min_span_x,
            min_span_y,
            span_x,
            span_y,
            Some(&occupancy),
        )
    }

    /// Items whose committed rectangle overlaps `region`, plus the union of
    /// `region` with all of them
    pub fn items_intersecting_region(
        &self,
        region: &CellAndSpan,
        ignore: Option<ItemId>,
    ) -> (Vec<ItemId>, CellAndSpan) {
        let mut bounds = *region;
        let mut hits = Vec::new();
        for item in &self.items {
            if Some(item.id) == ignore {
                continue;
            }
            if region.intersects(&item.cell) {
                hits.push(item.id);
                bounds = bounds.union(&item.cell);
            }
        }
        (hits, bounds)
    }

    /// Whether the nearest full-span placement for a pixel overlaps another item
    ///
    /// Returns the placement alongside the answer.
    pub fn is_nearest_drop_location_occupied(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        span_x: i32,
        span_y: i32,
        ignore: Option<ItemId>,
    ) -> (bool, Option<CellAndSpan>) {
        self.find_nearest_area_ignore_occupied(pixel_x, pixel_y, span_x, span_y)
            .map_or((true, None), |target| {
                let (hits, _) = self.items_intersecting_region(&target, ignore);
                (!hits.is_empty(), Some(target))
            })
    }

    /// Seed a configuration with every item's committed or temporary position
    pub fn copy_current_state_to_solution(&self, solution: &mut ItemConfiguration, temp: bool) {
        for item in &self.items {
            let rect = if temp { item.tmp } else { item.cell };
            solution.add(item.id, rect);
        }
    }

    /// Write a solution into the temporary positions
    ///
    /// The dragged item keeps its temporary position. Its target region is marked
    /// in the temporary occupancy only with `mark_drag`. Returns the items whose
    /// temporary position changed.
    pub fn copy_solution_to_temp_state(
        &mut self,
        solution: &ItemConfiguration,
        drag: Option<ItemId>,
        mark_drag: bool,
    ) -> Vec<ItemId> {
        self.tmp_occupied.clear();
        let mut moved = Vec::new();

        for item in &mut self.items {
            if Some(item.id) == drag {
                continue;
            }
            if let Some(rect) = solution.get(item.id) {
                if item.tmp != *rect {
                    moved.push(item.id);
                }
                item.tmp = *rect;
                self.tmp_occupied.mark_cells(rect, true);
            }
        }
        if mark_drag {
            self.tmp_occupied.mark_cells(&solution.bounds, true);
        }
        moved
    }

    /// Make every temporary position the committed one
    ///
    /// Returns the items other than `drag` whose committed rectangle changed.
    pub fn commit_temp_placement(&mut self, drag: Option<ItemId>) -> Vec<ItemId> {
        self.tmp_occupied.copy_to(&mut self.occupied);

        let mut changed = Vec::new();
        for item in &mut self.items {
            if Some(item.id) == drag {
                continue;
            }
            if item.cell != item.tmp {
                changed.push(item.id);
                item.cell = item.tmp;
            }
        }
        changed
    }

    /// Reset every temporary position to the committed one
    ///
    /// Returns the items that moved back.
    pub fn revert_temp_state(&mut self) -> Vec<ItemId> {
        let mut reverted = Vec::new();
        for item in &mut self.items {
            if item.tmp != item.cell {
                item.tmp = item.cell;
                reverted.push(item.id);
            }
        }
        self.occupied.copy_to(&mut self.tmp_occupied);
        reverted
    }

    /// Whether every cell of the region is free in the committed occupancy
    pub fn is_region_vacant(&self, region: &CellAndSpan) -> bool {
        self.occupied
            .is_region_vacant(region.cell_x, region.cell_y, region.span_x, region.span_y)
    }
}
