//! Drag gesture lifecycle on one layout
//!
//! A [`DragSession`] lives from the moment a drag enters a layout until it drops or
//! leaves. It caches the last solution so the preview, the hint and the drop all
//! agree, owns the gesture's preview animations, and is the only place that writes
//! solutions back into the layout.

use tracing::debug;

use crate::algorithm::configuration::{Displacement, ItemConfiguration};
use crate::algorithm::parameters::{CellInfo, ReorderParameters};
use crate::algorithm::reorder::{ReorderAlgorithm, ReorderStats, SolutionKind};
use crate::algorithm::scoring::PushWeights;
use crate::animation::preview::PreviewMode;
use crate::animation::shake::ShakeAnimators;
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::Result;
use crate::math::direction::Direction;
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::layout::CellLayout;

/// What a reorder evaluation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderMode {
    /// Recompute and show where overlapping items would go
    ShowReorderHint,
    /// Move items to their temporary positions while the drag hovers
    DragOver,
    /// Commit the drop of an item that lives on this layout
    OnDrop,
    /// Commit the drop of an item coming from elsewhere
    OnDropExternal,
    /// Only report whether a drop would be accepted
    AcceptDrop,
}

impl ReorderMode {
    /// Whether the mode ends the gesture
    pub const fn is_drop(self) -> bool {
        matches!(self, Self::OnDrop | Self::OnDropExternal)
    }
}

/// Where the dragged item lands and what moved to make room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Cells given to the dragged item, with its possibly reduced span
    pub cell: CellAndSpan,
    /// Strategy that produced the placement
    pub kind: SolutionKind,
    /// Other items moved relative to their committed positions
    pub displacements: Vec<Displacement>,
}

/// State of one drag gesture over one layout
#[derive(Debug)]
pub struct DragSession {
    drag_info: Option<CellInfo>,
    previous_solution: Option<(SolutionKind, ItemConfiguration)>,
    shake: ShakeAnimators,
    placement_dirty: bool,
    weights: PushWeights,
    stats: ReorderStats,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DragSession {
    /// Create a session whose animation jitter is seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            drag_info: None,
            previous_solution: None,
            shake: ShakeAnimators::new(seed),
            placement_dirty: false,
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

    /// Start tracking a drag described by `info`
    pub fn on_drag_enter(&mut self, info: CellInfo) {
        debug!(%info, "drag entered");
        self.drag_info = Some(info);
        self.previous_solution = None;
    }

    /// Stop tracking the drag and undo any previewed moves
    pub fn on_drag_exit(&mut self, layout: &mut CellLayout) -> Vec<ItemId> {
        self.drag_info = None;
        self.previous_solution = None;
        self.revert_temp_state(layout)
    }

    /// Drag being tracked
    pub const fn drag_info(&self) -> Option<&CellInfo> {
        self.drag_info.as_ref()
    }

    /// Preview animations of this gesture
    pub const fn shake(&self) -> &ShakeAnimators {
        &self.shake
    }

    /// Whether temporary positions differ from committed ones
    pub const fn is_placement_dirty(&self) -> bool {
        self.placement_dirty
    }

    /// Solver work done during this gesture
    pub const fn stats(&self) -> &ReorderStats {
        &self.stats
    }

    /// Solution reused by the next evaluation, if any
    pub fn previous_solution(&self) -> Option<&ItemConfiguration> {
        self.previous_solution.as_ref().map(|(_, solution)| solution)
    }

    /// Dragged item if it lives on `layout`
    ///
    /// A drag started on another screen or container has no item here.
    pub fn drag_handle(&self, layout: &CellLayout) -> Option<ItemId> {
        self.drag_info
            .filter(|info| {
                info.screen_id == layout.screen_id() && info.container == layout.container()
            })
            .and_then(|info| info.cell)
    }

    /// Evaluate a drag position and apply the result as `mode` asks
    ///
    /// A hint, or any mode with no cached solution, recomputes; other modes reuse
    /// the cached solution, and a drop clears it. Returns `None` when the item
    /// cannot be placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the spans are invalid or the dropped item cannot be
    /// moved to its placement
    pub fn perform_reorder(
        &mut self,
        layout: &mut CellLayout,
        pixel_x: i32,
        pixel_y: i32,
        min_span: (i32, i32),
        span: (i32, i32),
        mode: ReorderMode,
    ) -> Result<Option<Placement>> {
        let drag = self.drag_handle(layout);

        if mode == ReorderMode::ShowReorderHint || self.previous_solution.is_none() {
            let mut params = ReorderParameters::new(pixel_x, pixel_y, span, min_span, drag)?;
            let mut algorithm = ReorderAlgorithm::new(layout).with_weights(self.weights);
            let kind = algorithm.calculate_reorder(&mut params);
            self.stats.accumulate(algorithm.stats());
            self.previous_solution = kind.map(|kind| (kind, params.into_solution()));
        }

        let cached = if mode.is_drop() {
            self.previous_solution.take()
        } else {
            self.previous_solution.clone()
        };
        let Some((kind, solution)) = cached else {
            debug!(pixel_x, pixel_y, ?mode, "no placement");
            return Ok(None);
        };
        let placement = Placement {
            cell: solution.bounds,
            kind,
            displacements: solution
                .displacements(|item| layout.item(item).map(|placed| placed.cell), drag),
        };

        self.apply_solution(layout, &solution, drag, mode)?;
        Ok(Some(placement))
    }

    fn apply_solution(
        &mut self,
        layout: &mut CellLayout,
        solution: &ItemConfiguration,
        drag: Option<ItemId>,
        mode: ReorderMode,
    ) -> Result<()> {
        match mode {
            ReorderMode::ShowReorderHint => {
                self.shake
                    .begin_or_adjust(layout, solution, drag, PreviewMode::Hint);
            }
            ReorderMode::AcceptDrop => {}
            ReorderMode::DragOver | ReorderMode::OnDrop | ReorderMode::OnDropExternal => {
                let moved =
                    layout.copy_solution_to_temp_state(solution, drag, mode == ReorderMode::OnDrop);
                self.placement_dirty = true;

                if mode.is_drop() {
                    let changed = layout.commit_temp_placement(drag);
                    if let Some(item) = drag {
                        layout.move_item(item, solution.bounds)?;
                    }
                    self.shake.complete_and_clear();
                    self.placement_dirty = false;
                    debug!(changed = changed.len(), placement = %solution.bounds, "drop committed");
                } else {
                    self.shake
                        .begin_or_adjust(layout, solution, drag, PreviewMode::Preview);
                    debug!(moved = moved.len(), "preview updated");
                }
            }
        }
        Ok(())
    }

    /// Send animations home and restore every item's committed position
    pub fn revert_temp_state(&mut self, layout: &mut CellLayout) -> Vec<ItemId> {
        self.shake.complete_and_clear();
        if !self.placement_dirty {
            return Vec::new();
        }
        self.placement_dirty = false;
        let reverted = layout.revert_temp_state();
        debug!(reverted = reverted.len(), "temporary placement reverted");
        reverted
    }

    /// Make room for `item` resized in place to `cell`
    ///
    /// Only pushes are tried and the span never shrinks. With `commit` the new
    /// positions and the item's new span are written to the layout; otherwise they
    /// are previewed.
    ///
    /// # Errors
    ///
    /// Returns an error if the resized item cannot be moved to `cell`
    pub fn create_area_for_resize(
        &mut self,
        layout: &mut CellLayout,
        cell: CellAndSpan,
        item: ItemId,
        direction: Direction,
        commit: bool,
    ) -> Result<bool> {
        let (pixel_x, pixel_y) =
            layout.region_to_center_point(cell.cell_x, cell.cell_y, cell.span_x, cell.span_y);
        let span = (cell.span_x, cell.span_y);

        let mut algorithm = ReorderAlgorithm::new(layout).with_weights(self.weights);
        let solution =
            algorithm.solve_push(pixel_x, pixel_y, span, span, direction, Some(item), true);
        self.stats.accumulate(algorithm.stats());

        if !solution.is_solution {
            return Ok(false);
        }

        layout.copy_solution_to_temp_state(&solution, Some(item), commit);
        self.placement_dirty = true;
        if commit {
            layout.commit_temp_placement(Some(item));
            layout.move_item(item, solution.bounds)?;
            self.shake.complete_and_clear();
            self.placement_dirty = false;
            debug!(%item, placement = %solution.bounds, "resize committed");
        } else {
            self.shake
                .begin_or_adjust(layout, &solution, Some(item), PreviewMode::Preview);
        }
        Ok(true)
    }

    /// Advance the gesture's animations
    pub fn tick(&mut self, dt_ms: u32) {
        self.shake.tick(dt_ms);
    }
}

/// Clear the bottom row by pushing items upwards
///
/// With `commit` the pushed positions become the committed ones and the bottom
/// row is left vacant. Returns whether room could be made.
pub fn make_space_for_hotseat_migration(layout: &mut CellLayout, commit: bool) -> bool {
    let solution = ReorderAlgorithm::new(layout).make_space_for_bottom_row();
    if !solution.is_solution {
        debug!("no room for the bottom row");
        return false;
    }
    if commit {
        layout.copy_solution_to_temp_state(&solution, None, false);
        let changed = layout.commit_temp_placement(None);
        debug!(changed = changed.len(), "bottom row cleared");
    }
    true
}
