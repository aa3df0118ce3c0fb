//! Tests for the reorder solver: strategy arbitration, pushes, fallbacks and
//! nearest-area search

#[cfg(test)]
mod tests {
    use gridreorder::algorithm::configuration::ItemConfiguration;
    use gridreorder::algorithm::parameters::ReorderParameters;
    use gridreorder::algorithm::reorder::{ReorderAlgorithm, SolutionKind};
    use gridreorder::math::direction::Direction;
    use gridreorder::spatial::cell::{CellAndSpan, ItemId};
    use gridreorder::spatial::layout::CellLayout;
    use gridreorder::spatial::occupancy::GridOccupancy;

    fn layout_with(count_x: i32, count_y: i32, items: &[(CellAndSpan, bool)]) -> CellLayout {
        let mut layout = CellLayout::new(count_x, count_y).expect("valid grid");
        for (rect, can_reorder) in items {
            layout.add_item(*rect, *can_reorder).expect("vacant cells");
        }
        layout
    }

    fn icon(x: i32, y: i32) -> (CellAndSpan, bool) {
        (CellAndSpan::new(x, y, 1, 1), true)
    }

    fn pinned(x: i32, y: i32) -> (CellAndSpan, bool) {
        (CellAndSpan::new(x, y, 1, 1), false)
    }

    fn request(
        layout: &CellLayout,
        cell: (i32, i32),
        span: (i32, i32),
        min_span: (i32, i32),
        drag: Option<ItemId>,
    ) -> ReorderParameters {
        let (x, y) = layout.region_to_center_point(cell.0, cell.1, span.0, span.1);
        ReorderParameters::new(x, y, span, min_span, drag).expect("valid spans")
    }

    // Tests that dropping onto a neighbour pushes it one cell along the drag
    // Verified by reversing the push order so the leftward push wins ties
    #[test]
    fn test_simple_push() {
        let layout = layout_with(4, 4, &[icon(0, 0), icon(1, 0)]);
        let mut params = request(&layout, (1, 0), (1, 1), (1, 1), Some(ItemId(0)));

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let kind = algorithm.calculate_reorder(&mut params);

        assert_eq!(kind, Some(SolutionKind::Push));
        let solution = params.solution();
        assert!(solution.is_solution);
        assert_eq!(solution.bounds, CellAndSpan::new(1, 0, 1, 1));
        assert_eq!(solution.get(ItemId(1)), Some(&CellAndSpan::new(2, 0, 1, 1)));
        assert_eq!(solution.intersecting_views, vec![ItemId(1)]);
        assert!(solution.is_valid_solution(4, 4, Some(ItemId(0))));
    }

    // Tests that a full grid yields no placement
    // Verified by accepting pushes whose cluster leaves the grid
    #[test]
    fn test_full_grid_has_no_solution() {
        let layout = layout_with(2, 1, &[icon(0, 0), icon(1, 0)]);
        let mut params = request(&layout, (0, 0), (1, 1), (1, 1), None);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(algorithm.calculate_reorder(&mut params), None);
        assert!(!params.solution().is_solution);
        assert!(algorithm.stats().rejected_pushes > 0);
        assert_eq!(algorithm.stats().successful_pushes, 0);
    }

    // Tests that a free target is taken without moving anything
    // Verified by requiring an intersecting item in rearrangement_exists
    #[test]
    fn test_free_target_needs_no_push() {
        let layout = layout_with(3, 1, &[icon(0, 0)]);
        let mut params = request(&layout, (2, 0), (1, 1), (1, 1), None);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.calculate_reorder(&mut params),
            Some(SolutionKind::Push)
        );
        assert_eq!(params.solution().bounds, CellAndSpan::new(2, 0, 1, 1));
        assert!(params.solution().intersecting_views.is_empty());
        assert_eq!(algorithm.stats().push_attempts, 0);

        let drop_in_place = algorithm.drop_in_place_solution(
            params.pixel_x(),
            params.pixel_y(),
            1,
            1,
            None,
        );
        assert!(drop_in_place.is_solution);
        assert_eq!(drop_in_place.bounds, CellAndSpan::new(2, 0, 1, 1));
    }

    // Tests that a pinned item under the target forces the closest empty space
    // Verified by letting pinned items join a push
    #[test]
    fn test_pinned_item_falls_back_to_closest_space() {
        let layout = layout_with(3, 1, &[pinned(1, 0)]);
        let mut params = request(&layout, (0, 0), (2, 1), (1, 1), None);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.calculate_reorder(&mut params),
            Some(SolutionKind::ClosestEmptySpace)
        );
        assert_eq!(params.solution().bounds, CellAndSpan::new(0, 0, 1, 1));
        assert_eq!(params.solution().get(ItemId(0)), Some(&CellAndSpan::new(1, 0, 1, 1)));
    }

    // Tests that the item shrinks towards its minimum span to find a push
    // Verified by never decrementing the span in solve_push
    #[test]
    fn test_push_after_shrinking() {
        let layout = layout_with(2, 1, &[icon(1, 0)]);
        let mut params = request(&layout, (0, 0), (2, 1), (1, 1), None);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.calculate_reorder(&mut params),
            Some(SolutionKind::Push)
        );
        assert_eq!(params.solution().bounds, CellAndSpan::new(1, 0, 1, 1));
        assert_eq!(params.solution().get(ItemId(0)), Some(&CellAndSpan::new(0, 0, 1, 1)));
    }

    // Tests that items flush against the pushed cluster are absorbed
    // Verified by skipping absorption so the chain collides
    #[test]
    fn test_push_absorbs_touching_items() {
        let layout = layout_with(5, 1, &[icon(1, 0), icon(2, 0), icon(3, 0)]);
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);
        let mut occupancy = layout.occupied().clone();

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let target = CellAndSpan::new(1, 0, 1, 1);
        let pushed = algorithm.push_views_to_temp_location(
            &[ItemId(0)],
            &target,
            Direction::RIGHT,
            None,
            &mut solution,
            &mut occupancy,
        );

        assert!(pushed);
        for (item, x) in [(0, 2), (1, 3), (2, 4)] {
            assert_eq!(solution.get(ItemId(item)), Some(&CellAndSpan::new(x, 0, 1, 1)));
        }
        assert_eq!(algorithm.stats().absorbed_items, 2);
        assert_eq!(algorithm.stats().longest_absorption, 2);
        assert_eq!(occupancy.occupied_count(), 3);
        assert_eq!(occupancy.get(1, 0), Some(false));
    }

    // Tests that a rejected push leaves the configuration untouched
    // Verified by removing the restore on failure
    #[test]
    fn test_rejected_push_restores_state() {
        let layout = layout_with(3, 1, &[icon(1, 0), icon(2, 0)]);
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);
        let original = solution.clone();
        let mut occupancy = layout.occupied().clone();

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let pushed = algorithm.push_views_to_temp_location(
            &[ItemId(0)],
            &CellAndSpan::new(1, 0, 1, 1),
            Direction::RIGHT,
            None,
            &mut solution,
            &mut occupancy,
        );

        assert!(!pushed);
        for (item, rect) in original.items() {
            assert_eq!(solution.get(item), Some(rect));
        }
        assert_eq!(occupancy, *layout.occupied());
        assert_eq!(algorithm.stats().rejected_pushes, 1);
    }

    // Tests that a push absorbing a pinned item is rejected
    // Verified by ignoring can_reorder during absorption
    #[test]
    fn test_push_rejects_pinned_neighbour() {
        let layout = layout_with(4, 1, &[icon(1, 0), pinned(2, 0)]);
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);
        let mut occupancy = layout.occupied().clone();

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert!(!algorithm.push_views_to_temp_location(
            &[ItemId(0)],
            &CellAndSpan::new(1, 0, 1, 1),
            Direction::RIGHT,
            None,
            &mut solution,
            &mut occupancy,
        ));
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(1, 0, 1, 1)));
    }

    // Tests that the cheaper of two valid pushes is chosen
    // Verified by always taking the first successful direction
    #[test]
    fn test_cheapest_direction_wins() {
        let layout = layout_with(6, 1, &[icon(1, 0), icon(2, 0), icon(3, 0), icon(4, 0)]);
        let mut params = request(&layout, (1, 0), (1, 1), (1, 1), None);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.calculate_reorder(&mut params),
            Some(SolutionKind::Push)
        );

        let solution = params.solution();
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(0, 0, 1, 1)));
        assert_eq!(solution.get(ItemId(3)), Some(&CellAndSpan::new(4, 0, 1, 1)));

        let stats = algorithm.stats();
        assert_eq!(stats.push_attempts, 4);
        assert_eq!(stats.successful_pushes, 2);
        assert_eq!(stats.absorbed_items, 3);
        assert!(stats.longest_absorption <= 4 + 1);
    }

    // Tests that overlapping items move as a block when pushing fails
    // Verified by skipping the block fallback
    #[test]
    fn test_block_move_fallback() {
        // Two stacked icons under the target; pinned icons block every push
        let layout = layout_with(
            3,
            3,
            &[icon(1, 0), icon(1, 1), pinned(0, 0), pinned(2, 0), pinned(1, 2)],
        );
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let found = algorithm.rearrangement_exists(1, 0, 1, 2, Direction::RIGHT, None, &mut solution);

        assert!(found);
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(2, 1, 1, 1)));
        assert_eq!(solution.get(ItemId(1)), Some(&CellAndSpan::new(2, 2, 1, 1)));
        assert_eq!(solution.bounds, CellAndSpan::new(1, 0, 1, 2));
        assert_eq!(algorithm.stats().successful_pushes, 0);
    }

    // Tests moving overlapping items one by one when no block shape fits
    // Verified by returning false from add_view_to_temp_location
    #[test]
    fn test_individual_move_fallback() {
        let layout = layout_with(3, 2, &[icon(1, 0), icon(1, 1), pinned(0, 0), pinned(2, 0)]);
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let found = algorithm.rearrangement_exists(1, 0, 1, 2, Direction::RIGHT, None, &mut solution);

        assert!(found);
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(2, 1, 1, 1)));
        assert_eq!(solution.get(ItemId(1)), Some(&CellAndSpan::new(0, 1, 1, 1)));
        assert_eq!(solution.intersecting_views, vec![ItemId(0), ItemId(1)]);
    }

    // Tests that failed fallbacks leave the configuration as it was
    // Verified by removing the restore after the individual moves fail
    #[test]
    fn test_failed_fallbacks_restore_state() {
        let layout = layout_with(
            3,
            2,
            &[
                (CellAndSpan::new(0, 0, 2, 1), true),
                pinned(2, 0),
                pinned(1, 1),
            ],
        );
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        let found = algorithm.rearrangement_exists(1, 0, 1, 1, Direction::DOWN, None, &mut solution);

        assert!(!found);
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(0, 0, 2, 1)));
        assert_eq!(algorithm.tmp_occupied(), layout.occupied());
    }

    // Tests that a pinned item under the target fails immediately
    // Verified by skipping the can_reorder check for intersecting items
    #[test]
    fn test_pinned_item_under_target() {
        let layout = layout_with(3, 1, &[pinned(1, 0)]);
        let mut solution = ItemConfiguration::new();
        layout.copy_current_state_to_solution(&mut solution, false);

        let mut algorithm = ReorderAlgorithm::new(&layout);
        assert!(!algorithm.rearrangement_exists(1, 0, 1, 1, Direction::RIGHT, None, &mut solution));
        assert_eq!(algorithm.stats().push_attempts, 0);
        assert!(!algorithm.rearrangement_exists(-1, 0, 1, 1, Direction::RIGHT, None, &mut solution));
    }

    // Tests that equal distances are broken by agreement with the direction
    // Verified by ignoring the direction score
    #[test]
    fn test_find_nearest_area_prefers_direction() {
        let layout = layout_with(3, 1, &[]);
        let mut occupied = GridOccupancy::new(3, 1);
        occupied.mark_region(1, 0, 1, 1, true);

        let algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.find_nearest_area(1, 0, 1, 1, Direction::RIGHT, &occupied, None),
            Some((2, 0))
        );
        assert_eq!(
            algorithm.find_nearest_area(1, 0, 1, 1, Direction::LEFT, &occupied, None),
            Some((0, 0))
        );
    }

    // Tests that a block mask only requires its own cells to be free
    // Verified by treating every cell of the block's bounding box as solid
    #[test]
    fn test_find_nearest_area_with_block_mask() {
        let layout = layout_with(2, 2, &[]);
        let mut occupied = GridOccupancy::new(2, 2);
        occupied.mark_region(1, 0, 1, 1, true);
        let mut block = GridOccupancy::new(2, 2);
        block.mark_region(0, 0, 1, 2, true);
        block.mark_region(1, 1, 1, 1, true);

        let algorithm = ReorderAlgorithm::new(&layout);
        assert_eq!(
            algorithm.find_nearest_area(0, 0, 2, 2, Direction::RIGHT, &occupied, Some(&block)),
            Some((0, 0))
        );
        assert_eq!(
            algorithm.find_nearest_area(0, 0, 2, 2, Direction::RIGHT, &occupied, None),
            None
        );
    }

    // Tests the push direction derived from the drag position
    // Verified by measuring from the target instead of the covered region
    #[test]
    fn test_direction_vector_for_drop() {
        let layout = layout_with(4, 4, &[(CellAndSpan::new(1, 1, 2, 1), true)]);
        let algorithm = ReorderAlgorithm::new(&layout);

        let (x, y) = layout.cell_to_center_point(1, 1);
        assert_eq!(algorithm.direction_vector_for_drop(x, y, 1, 1, None), Direction::RIGHT);

        let (x, y) = layout.cell_to_center_point(2, 1);
        assert_eq!(algorithm.direction_vector_for_drop(x, y, 1, 1, None), Direction::LEFT);

        let (x, y) = layout.cell_to_center_point(0, 3);
        assert_eq!(algorithm.direction_vector_for_drop(x, y, 1, 1, None), Direction::RIGHT);
    }

    // Tests that a full-width item contributes no horizontal direction
    // Verified by removing the full-span axis check
    #[test]
    fn test_direction_vector_ignores_full_span_axis() {
        let layout = layout_with(2, 3, &[(CellAndSpan::new(0, 1, 2, 2), true)]);
        let algorithm = ReorderAlgorithm::new(&layout);

        let (x, y) = layout.region_to_center_point(0, 1, 2, 1);
        assert_eq!(algorithm.direction_vector_for_drop(x, y, 2, 1, None), Direction::DOWN);
    }

    // Tests that the closest empty space respects the minimum span
    // Verified by passing the full span as the minimum
    #[test]
    fn test_closest_empty_space_reorder() {
        let layout = layout_with(3, 1, &[icon(1, 0)]);
        let algorithm = ReorderAlgorithm::new(&layout);

        let params = request(&layout, (0, 0), (2, 1), (1, 1), None);
        let closest = algorithm.closest_empty_space_reorder(&params);
        assert!(closest.is_solution);
        assert_eq!(closest.bounds, CellAndSpan::new(0, 0, 1, 1));
        assert_eq!(closest.len(), 1);

        let strict = request(&layout, (0, 0), (2, 1), (2, 1), None);
        assert!(!algorithm.closest_empty_space_reorder(&strict).is_solution);
    }

    // Tests clearing the bottom row by pushing everything upwards
    // Verified by pushing towards the bottom edge
    #[test]
    fn test_make_space_for_bottom_row() {
        let layout = layout_with(3, 3, &[icon(0, 1), icon(0, 2), icon(2, 2)]);
        let mut algorithm = ReorderAlgorithm::new(&layout);
        let solution = algorithm.make_space_for_bottom_row();

        assert!(solution.is_solution);
        assert_eq!(solution.bounds, CellAndSpan::new(0, 2, 3, 1));
        assert_eq!(solution.get(ItemId(0)), Some(&CellAndSpan::new(0, 0, 1, 1)));
        assert_eq!(solution.get(ItemId(1)), Some(&CellAndSpan::new(0, 1, 1, 1)));
        assert_eq!(solution.get(ItemId(2)), Some(&CellAndSpan::new(2, 1, 1, 1)));
    }

    // Tests that a pinned item in the bottom row blocks making space
    // Verified by skipping the pinned check in rearrangement_exists
    #[test]
    fn test_make_space_blocked_by_pinned_item() {
        let layout = layout_with(3, 2, &[pinned(1, 1)]);
        let mut algorithm = ReorderAlgorithm::new(&layout);

        assert!(!algorithm.make_space_for_bottom_row().is_solution);
    }

    // Tests whether any anchor admits an item of a given span
    // Verified by returning true after the first anchor regardless of result
    #[test]
    fn test_has_reorder_solution() {
        let full = layout_with(2, 1, &[icon(0, 0), icon(1, 0)]);
        assert!(!ReorderAlgorithm::new(&full).has_reorder_solution((1, 1), (1, 1)));

        let roomy = layout_with(3, 1, &[icon(0, 0), icon(1, 0)]);
        assert!(ReorderAlgorithm::new(&roomy).has_reorder_solution((1, 1), (1, 1)));
        assert!(!ReorderAlgorithm::new(&roomy).has_reorder_solution((2, 1), (2, 1)));
    }
}
