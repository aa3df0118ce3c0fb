//! Reorder solver: finds room for a dragged item by pushing others aside
//!
//! One evaluation produces up to three candidate configurations and keeps the best:
//!
//! - a push solution, where the items under the target are shoved along a
//!   compass direction as rigid clusters, falling back to moving them as a block
//!   or one by one, and shrinking the dragged item towards its minimum span
//! - the closest empty region, possibly at a reduced span
//! - a drop in place, valid only when nothing overlaps the nearest placement
//!
//! Speculative pushes are made on cloned configurations, so a rejected attempt
//! never leaves a partially shifted state behind.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::algorithm::cluster::ViewCluster;
use crate::algorithm::configuration::ItemConfiguration;
use crate::algorithm::parameters::ReorderParameters;
use crate::algorithm::scoring::{PushCost, PushWeights, select_cheapest};
use crate::math::direction::{Direction, Edge, compute_direction_vector};
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::layout::CellLayout;
use crate::spatial::occupancy::GridOccupancy;

/// Which of the three strategies produced the accepted configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolutionKind {
    /// Existing items were pushed or moved to make room
    Push,
    /// The item goes into the nearest vacant region without moving anything
    ClosestEmptySpace,
    /// The nearest placement was already free
    DropInPlace,
}

/// Counters describing the work done by a solver
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderStats {
    /// Cluster pushes attempted
    pub push_attempts: usize,
    /// Pushes that settled inside the grid
    pub successful_pushes: usize,
    /// Pushes rejected for leaving the grid or hitting a pinned item
    pub rejected_pushes: usize,
    /// Items absorbed into clusters over all pushes
    pub absorbed_items: usize,
    /// Absorption scans over all shift steps
    pub absorption_passes: usize,
    /// Most absorption scans needed by any single shift step
    pub longest_absorption: usize,
}

impl ReorderStats {
    /// Fold another set of counters into this one
    pub fn accumulate(&mut self, other: &Self) {
        self.push_attempts += other.push_attempts;
        self.successful_pushes += other.successful_pushes;
        self.rejected_pushes += other.rejected_pushes;
        self.absorbed_items += other.absorbed_items;
        self.absorption_passes += other.absorption_passes;
        self.longest_absorption = self.longest_absorption.max(other.longest_absorption);
    }
}

/// Solver bound to one layout for the duration of an evaluation
#[derive(Debug)]
pub struct ReorderAlgorithm<'l> {
    layout: &'l CellLayout,
    tmp_occupied: GridOccupancy,
    weights: PushWeights,
    stats: ReorderStats,
}

impl<'l> ReorderAlgorithm<'l> {
    /// Create a solver over the layout's committed state
    pub fn new(layout: &'l CellLayout) -> Self {
        Self {
            layout,
            tmp_occupied: layout.occupied().clone(),
            weights: PushWeights::default(),
            stats: ReorderStats::default(),
        }
    }

    /// Replace the push scoring weights
    #[must_use]
    pub const fn with_weights(mut self, weights: PushWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Layout being solved
    pub const fn layout(&self) -> &'l CellLayout {
        self.layout
    }

    /// Work counters accumulated so far
    pub const fn stats(&self) -> &ReorderStats {
        &self.stats
    }

    /// Scratch occupancy as left by the last evaluation
    pub const fn tmp_occupied(&self) -> &GridOccupancy {
        &self.tmp_occupied
    }

    /// Pick the best of the push, closest-space and drop-in-place strategies
    ///
    /// The push solution wins when it keeps at least the area the closest empty
    /// region offers, so an item is not shrunk just to avoid a push. The winner is
    /// written to the request's solution slot. When nothing works the slot holds
    /// the failed push attempt and `None` is returned.
    pub fn calculate_reorder(&mut self, params: &mut ReorderParameters) -> Option<SolutionKind> {
        let (pixel_x, pixel_y) = params.pixel();
        let (span_x, span_y) = params.span();
        let drag = params.drag_view();

        let direction = self.direction_vector_for_drop(pixel_x, pixel_y, span_x, span_y, drag);
        let drop_in_place = self.drop_in_place_solution(pixel_x, pixel_y, span_x, span_y, drag);
        self.find_reorder_solution(params, direction, true);
        let closest = self.closest_empty_space_reorder(params);

        let swap = params.solution();
        let choice = if swap.is_solution && swap.area() >= closest.area() {
            Some(SolutionKind::Push)
        } else if closest.is_solution {
            *params.solution_mut() = closest;
            Some(SolutionKind::ClosestEmptySpace)
        } else if drop_in_place.is_solution {
            *params.solution_mut() = drop_in_place;
            Some(SolutionKind::DropInPlace)
        } else {
            None
        };

        debug!(
            pixel_x,
            pixel_y,
            %direction,
            ?choice,
            placement = %params.solution().bounds,
            "reorder calculated"
        );
        choice
    }

    /// Search for a push solution, shrinking the item if needed
    ///
    /// Writes the result to the request's solution slot and reports whether it
    /// is a solution. `dec_x` selects which axis shrinks first.
    pub fn find_reorder_solution(
        &mut self,
        params: &mut ReorderParameters,
        direction: Direction,
        dec_x: bool,
    ) -> bool {
        let (pixel_x, pixel_y) = params.pixel();
        let (span_x, span_y) = params.span();
        let (min_span_x, min_span_y) = params.min_span();
        let solution = self.solve_push(
            pixel_x,
            pixel_y,
            (min_span_x, min_span_y),
            (span_x, span_y),
            direction,
            params.drag_view(),
            dec_x,
        );
        let found = solution.is_solution;
        *params.solution_mut() = solution;
        found
    }

    /// Push search for explicit coordinates, returning the configuration
    ///
    /// The span shrinks by one cell at a time, alternating between axes, until a
    /// rearrangement exists or both axes reach their minimum.
    pub fn solve_push(
        &mut self,
        pixel_x: i32,
        pixel_y: i32,
        min_span: (i32, i32),
        span: (i32, i32),
        direction: Direction,
        drag: Option<ItemId>,
        dec_x: bool,
    ) -> ItemConfiguration {
        let (min_span_x, min_span_y) = min_span;
        let (mut span_x, mut span_y) = span;
        let mut dec_x = dec_x;

        loop {
            let mut solution = self.current_state();
            self.tmp_occupied = self.layout.occupancy_without(drag);

            let target = self
                .layout
                .find_nearest_area_ignore_occupied(pixel_x, pixel_y, span_x, span_y);
            if let Some(target) = target {
                if self.rearrangement_exists(
                    target.cell_x,
                    target.cell_y,
                    span_x,
                    span_y,
                    direction,
                    drag,
                    &mut solution,
                ) {
                    solution.is_solution = true;
                    solution.bounds = CellAndSpan::new(target.cell_x, target.cell_y, span_x, span_y);
                    return solution;
                }
            }

            if span_x > min_span_x && (min_span_y == span_y || dec_x) {
                span_x -= 1;
                dec_x = false;
            } else if span_y > min_span_y {
                span_y -= 1;
                dec_x = true;
            } else {
                trace!(pixel_x, pixel_y, "no rearrangement at any span");
                let mut failed = self.current_state();
                failed.is_solution = false;
                return failed;
            }
            trace!(span_x, span_y, "shrinking item to retry");
        }
    }

    fn current_state(&self) -> ItemConfiguration {
        let mut state = ItemConfiguration::new();
        self.layout.copy_current_state_to_solution(&mut state, false);
        state
    }

    fn can_reorder(&self, item: ItemId) -> bool {
        self.layout.item(item).is_some_and(|placed| placed.can_reorder)
    }

    /// Whether the items overlapping a target region can all be moved out of it
    ///
    /// Tries the push mechanic first, then a rigid block move, then moving each
    /// overlapping item on its own. A pinned item under the target fails
    /// immediately.
    pub fn rearrangement_exists(
        &mut self,
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
        direction: Direction,
        drag: Option<ItemId>,
        solution: &mut ItemConfiguration,
    ) -> bool {
        if cell_x < 0 || cell_y < 0 {
            return false;
        }
        let occupied_rect = CellAndSpan::new(cell_x, cell_y, span_x, span_y);

        if let Some(rect) = drag.and_then(|item| solution.get_mut(item)) {
            rect.cell_x = cell_x;
            rect.cell_y = cell_y;
        }

        let mut intersecting = Vec::new();
        for (item, rect) in solution.items() {
            if Some(item) == drag || !occupied_rect.intersects(rect) {
                continue;
            }
            if !self.can_reorder(item) {
                trace!(%item, "pinned item under target");
                return false;
            }
            intersecting.push(item);
        }
        solution.intersecting_views.clone_from(&intersecting);

        if intersecting.is_empty() {
            return true;
        }

        if self.attempt_push_in_direction(&intersecting, &occupied_rect, direction, drag, solution) {
            return true;
        }

        let before = solution.clone();
        let before_occupancy = self.tmp_occupied.clone();
        let (count_x, count_y) = (self.layout.count_x(), self.layout.count_y());
        let settled = |candidate: &mut ItemConfiguration| {
            candidate.bounds = occupied_rect;
            candidate.is_valid_solution(count_x, count_y, drag)
        };

        if self.add_views_to_temp_location(&intersecting, &occupied_rect, direction, solution)
            && settled(solution)
        {
            debug!(items = intersecting.len(), "moved overlapping items as a block");
            return true;
        }
        solution.clone_from(&before);
        self.tmp_occupied.clone_from(&before_occupancy);

        let moved_each = intersecting
            .iter()
            .all(|&view| self.add_view_to_temp_location(view, &occupied_rect, direction, solution));
        if moved_each && settled(solution) {
            debug!(items = intersecting.len(), "moved overlapping items individually");
            return true;
        }
        *solution = before;
        self.tmp_occupied = before_occupancy;
        false
    }

    /// Try pushing the overlapping items along each candidate direction
    ///
    /// Every direction of [`Direction::push_order`] is evaluated on its own copy of
    /// the configuration. The successful push with the lowest [`PushCost`] is
    /// applied; equal costs keep the earlier direction.
    pub fn attempt_push_in_direction(
        &mut self,
        intersecting: &[ItemId],
        occupied_rect: &CellAndSpan,
        direction: Direction,
        drag: Option<ItemId>,
        solution: &mut ItemConfiguration,
    ) -> bool {
        let direction = if direction.is_zero() {
            Direction::RIGHT
        } else {
            direction
        };
        let (count_x, count_y) = (self.layout.count_x(), self.layout.count_y());

        let mut candidates = Vec::new();
        for candidate_direction in direction.push_order() {
            let mut state = solution.clone();
            let mut occupancy = self.tmp_occupied.clone();
            if !self.push_views_to_temp_location(
                intersecting,
                occupied_rect,
                candidate_direction,
                drag,
                &mut state,
                &mut occupancy,
            ) {
                continue;
            }

            state.bounds = *occupied_rect;
            if !state.is_valid_solution(count_x, count_y, drag) {
                trace!(%candidate_direction, "push settled with overlaps");
                continue;
            }
            let cost = PushCost::between(solution, &state, drag);
            trace!(%candidate_direction, ?cost, "push candidate");
            candidates.push((candidate_direction, state, occupancy, cost));
        }

        let costs: Vec<PushCost> = candidates.iter().map(|(_, _, _, cost)| *cost).collect();
        let Some(best) = select_cheapest(&costs, &self.weights) else {
            return false;
        };
        let Some((chosen, state, occupancy, cost)) = candidates.into_iter().nth(best) else {
            return false;
        };

        debug!(direction = %chosen, ?cost, "push accepted");
        *solution = state;
        self.tmp_occupied = occupancy;
        true
    }

    /// Shove a cluster of items out of `occupied_rect` along one direction
    ///
    /// The cluster moves one cell at a time. Before each step every item flush
    /// against the leading edge joins the cluster; scans repeat until one absorbs
    /// nothing, so each step needs at most one scan per item plus one. The push
    /// is rejected when it would absorb a pinned item or the settled cluster
    /// leaves the grid, in which case `state` is restored.
    pub fn push_views_to_temp_location(
        &mut self,
        views: &[ItemId],
        occupied_rect: &CellAndSpan,
        direction: Direction,
        drag: Option<ItemId>,
        state: &mut ItemConfiguration,
        occupancy: &mut GridOccupancy,
    ) -> bool {
        if views.is_empty() {
            return true;
        }
        self.stats.push_attempts += 1;

        let edge = direction.leading_edge();
        let cluster_rect = state.bounding_rect_for_views(views);
        let mut push_distance = match edge {
            Edge::Left => cluster_rect.right() - occupied_rect.cell_x,
            Edge::Right => occupied_rect.right() - cluster_rect.cell_x,
            Edge::Top => cluster_rect.bottom() - occupied_rect.cell_y,
            Edge::Bottom => occupied_rect.bottom() - cluster_rect.cell_y,
        };
        if push_distance <= 0 {
            self.stats.rejected_pushes += 1;
            return false;
        }

        for view in views {
            if let Some(rect) = state.get(*view) {
                occupancy.mark_cells(rect, false);
            }
        }
        state.save();

        let (count_x, count_y) = (self.layout.count_x(), self.layout.count_y());
        let mut cluster = ViewCluster::new(views, state, count_x, count_y);
        cluster.sort_configuration_for_edge_push(edge);

        let mut fail = false;
        while push_distance > 0 && !fail {
            let mut passes = 0;
            loop {
                passes += 1;
                let mut absorbed = false;
                let order = cluster.config().sorted_views.clone();
                for view in order {
                    if cluster.contains(view) || Some(view) == drag {
                        continue;
                    }
                    if !cluster.is_view_touching_edge(view, edge) {
                        continue;
                    }
                    if !self.can_reorder(view) {
                        fail = true;
                        break;
                    }
                    cluster.add_view(view);
                    absorbed = true;
                    self.stats.absorbed_items += 1;
                    if let Some(rect) = cluster.config().get(view) {
                        occupancy.mark_cells(rect, false);
                    }
                }
                if fail || !absorbed {
                    break;
                }
            }
            self.stats.absorption_passes += passes;
            self.stats.longest_absorption = self.stats.longest_absorption.max(passes);

            push_distance -= 1;
            cluster.shift(edge, 1);
        }

        let settled_rect = cluster.bounding_rect();
        let members = cluster.views().to_vec();

        let found = !fail && settled_rect.fits_within(count_x, count_y);
        if found {
            self.stats.successful_pushes += 1;
        } else {
            self.stats.rejected_pushes += 1;
            state.restore();
        }
        trace!(%edge, found, members = members.len(), "push resolved");

        for view in &members {
            if let Some(rect) = state.get(*view) {
                occupancy.mark_cells(rect, true);
            }
        }
        found
    }

    /// Move a group of items together to the nearest region that fits them
    ///
    /// Only cells actually covered by group members must be free, so the group
    /// may interlock with other items.
    pub fn add_views_to_temp_location(
        &mut self,
        views: &[ItemId],
        occupied_rect: &CellAndSpan,
        direction: Direction,
        state: &mut ItemConfiguration,
    ) -> bool {
        if views.is_empty() {
            return true;
        }

        let bounding = state.bounding_rect_for_views(views);
        for view in views {
            if let Some(rect) = state.get(*view) {
                self.tmp_occupied.mark_cells(rect, false);
            }
        }

        let mut block = GridOccupancy::new(bounding.span_x as usize, bounding.span_y as usize);
        for view in views {
            if let Some(rect) = state.get(*view) {
                block.mark_region(
                    rect.cell_x - bounding.cell_x,
                    rect.cell_y - bounding.cell_y,
                    rect.span_x,
                    rect.span_y,
                    true,
                );
            }
        }
        self.tmp_occupied.mark_cells(occupied_rect, true);

        let location = self.find_nearest_area(
            bounding.cell_x,
            bounding.cell_y,
            bounding.span_x,
            bounding.span_y,
            direction,
            &self.tmp_occupied,
            Some(&block),
        );

        if let Some((x, y)) = location {
            let (delta_x, delta_y) = (x - bounding.cell_x, y - bounding.cell_y);
            for view in views {
                if let Some(rect) = state.get_mut(*view) {
                    *rect = rect.translated(delta_x, delta_y);
                }
            }
        }

        for view in views {
            if let Some(rect) = state.get(*view) {
                self.tmp_occupied.mark_cells(rect, true);
            }
        }
        location.is_some()
    }

    /// Move one item to the nearest vacant region that fits it
    pub fn add_view_to_temp_location(
        &mut self,
        view: ItemId,
        occupied_rect: &CellAndSpan,
        direction: Direction,
        state: &mut ItemConfiguration,
    ) -> bool {
        let Some(current) = state.get(view).copied() else {
            return false;
        };
        self.tmp_occupied.mark_cells(&current, false);
        self.tmp_occupied.mark_cells(occupied_rect, true);

        let location = self.find_nearest_area(
            current.cell_x,
            current.cell_y,
            current.span_x,
            current.span_y,
            direction,
            &self.tmp_occupied,
            None,
        );

        let placed = location.map_or(current, |(x, y)| {
            CellAndSpan::new(x, y, current.span_x, current.span_y)
        });
        if let Some(rect) = state.get_mut(view) {
            *rect = placed;
        }
        self.tmp_occupied.mark_cells(&placed, true);
        location.is_some()
    }

    /// Nearest free top-left cell for a region, measured in whole cells
    ///
    /// The smallest Euclidean distance from `(cell_x, cell_y)` wins; on equal
    /// distance the candidate whose direction agrees best with `direction` wins.
    /// With `block` given, only cells the block marks need to be free.
    pub fn find_nearest_area(
        &self,
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
        direction: Direction,
        occupied: &GridOccupancy,
        block: Option<&GridOccupancy>,
    ) -> Option<(i32, i32)> {
        let mut best: Option<(f32, i32, (i32, i32))> = None;

        for y in 0..self.layout.count_y() - (span_y - 1) {
            for x in 0..self.layout.count_x() - (span_x - 1) {
                let blocked = (0..span_x).any(|i| {
                    (0..span_y).any(|j| {
                        occupied.is_occupied(x + i, y + j)
                            && block.is_none_or(|cells| cells.get(i, j) == Some(true))
                    })
                });
                if blocked {
                    continue;
                }

                let (dx, dy) = (x - cell_x, y - cell_y);
                let distance = (dx as f32).hypot(dy as f32);
                let score = direction.dot(compute_direction_vector(f64::from(dx), f64::from(dy)));

                let better = best.is_none_or(|(best_distance, best_score, _)| {
                    match distance.total_cmp(&best_distance) {
                        Ordering::Less => true,
                        Ordering::Equal => score > best_score,
                        Ordering::Greater => false,
                    }
                });
                if better {
                    best = Some((distance, score, (x, y)));
                }
            }
        }
        best.map(|(_, _, cell)| cell)
    }

    /// Direction items should be pushed for a drop at a pixel
    ///
    /// Points from the drag position towards the centre of the region covered by
    /// the target and the items under it, scaled down by the item's span. An axis
    /// on which the region or the item spans the whole grid contributes nothing.
    /// Falls back to a rightward push when undetermined.
    pub fn direction_vector_for_drop(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        span_x: i32,
        span_y: i32,
        drag: Option<ItemId>,
    ) -> Direction {
        let Some(target) = self
            .layout
            .find_nearest_area_ignore_occupied(pixel_x, pixel_y, span_x, span_y)
        else {
            return Direction::RIGHT;
        };

        let (_, drop_region) = self.layout.items_intersecting_region(&target, drag);
        let region_px = self.layout.cell_to_rect(
            drop_region.cell_x,
            drop_region.cell_y,
            drop_region.span_x,
            drop_region.span_y,
        );

        let mut delta_x = (region_px.center_x() - pixel_x) / span_x;
        let mut delta_y = (region_px.center_y() - pixel_y) / span_y;

        if drop_region.span_x == self.layout.count_x() || span_x == self.layout.count_x() {
            delta_x = 0;
        }
        if drop_region.span_y == self.layout.count_y() || span_y == self.layout.count_y() {
            delta_y = 0;
        }

        if delta_x == 0 && delta_y == 0 {
            Direction::RIGHT
        } else {
            compute_direction_vector(f64::from(delta_x), f64::from(delta_y))
        }
    }

    /// Accept the nearest full-span placement only if nothing overlaps it
    pub fn drop_in_place_solution(
        &self,
        pixel_x: i32,
        pixel_y: i32,
        span_x: i32,
        span_y: i32,
        drag: Option<ItemId>,
    ) -> ItemConfiguration {
        let mut solution = self.current_state();
        let target = self
            .layout
            .find_nearest_area_ignore_occupied(pixel_x, pixel_y, span_x, span_y);

        if let Some(target) = target {
            let occupied = solution
                .items()
                .any(|(item, rect)| Some(item) != drag && target.intersects(rect));
            if !occupied {
                solution.bounds = target;
                solution.is_solution = true;
            }
        }
        solution
    }

    /// Place the item in the nearest vacant region without moving anything
    ///
    /// The region may be smaller than the requested span but never below the
    /// minimum.
    pub fn closest_empty_space_reorder(&self, params: &ReorderParameters) -> ItemConfiguration {
        let (pixel_x, pixel_y) = params.pixel();
        let (span_x, span_y) = params.span();
        let (min_span_x, min_span_y) = params.min_span();

        let mut solution = ItemConfiguration::new();
        if let Some(area) = self.layout.find_nearest_vacant_area(
            pixel_x,
            pixel_y,
            min_span_x,
            min_span_y,
            span_x,
            span_y,
            params.drag_view(),
        ) {
            self.layout.copy_current_state_to_solution(&mut solution, false);
            solution.bounds = area;
            solution.is_solution = true;
        }
        solution
    }

    /// Push solution that clears the whole bottom row by pushing upwards
    pub fn make_space_for_bottom_row(&mut self) -> ItemConfiguration {
        let count_x = self.layout.count_x();
        let (pixel_x, pixel_y) = self.layout.cell_to_point(0, self.layout.count_y());
        self.solve_push(
            pixel_x,
            pixel_y,
            (count_x, 1),
            (count_x, 1),
            Direction::UP,
            None,
            false,
        )
    }

    /// Whether an item of the given span fits anywhere after rearranging
    ///
    /// Tries a push solution anchored at every cell of the grid.
    pub fn has_reorder_solution(&mut self, span: (i32, i32), min_span: (i32, i32)) -> bool {
        for cell_x in 0..self.layout.count_x() {
            for cell_y in 0..self.layout.count_y() {
                let (pixel_x, pixel_y) = self.layout.cell_to_point(cell_x, cell_y);
                if self
                    .solve_push(pixel_x, pixel_y, min_span, span, Direction::RIGHT, None, true)
                    .is_solution
                {
                    return true;
                }
            }
        }
        false
    }
}
