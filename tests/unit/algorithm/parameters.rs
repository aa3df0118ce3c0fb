//! Tests for drag descriptors and solver requests

#[cfg(test)]
mod tests {
    use gridreorder::ReorderError;
    use gridreorder::algorithm::parameters::{CellInfo, ReorderParameters};
    use gridreorder::spatial::cell::{CellAndSpan, ItemId};
    use gridreorder::spatial::layout::{CellLayout, Container};

    // Tests that requests keep their inputs and start with an empty solution
    // Verified by swapping span and min_span in the constructor
    #[test]
    fn test_new_keeps_inputs() {
        let params = ReorderParameters::new(10, 20, (2, 3), (1, 2), Some(ItemId(4)))
            .expect("valid spans");

        assert_eq!(params.pixel(), (10, 20));
        assert_eq!(params.pixel_x(), 10);
        assert_eq!(params.pixel_y(), 20);
        assert_eq!(params.span(), (2, 3));
        assert_eq!(params.min_span(), (1, 2));
        assert_eq!(params.drag_view(), Some(ItemId(4)));
        assert!(params.solution().is_empty());
        assert!(!params.into_solution().is_solution);
    }

    // Tests that empty spans and minimums above the span are rejected
    // Verified by removing the min_span upper bound check
    #[test]
    fn test_new_rejects_invalid_spans() {
        assert!(matches!(
            ReorderParameters::new(0, 0, (0, 1), (0, 1), None),
            Err(ReorderError::InvalidParameter { parameter: "span", .. })
        ));
        assert!(matches!(
            ReorderParameters::new(0, 0, (2, 2), (0, 1), None),
            Err(ReorderError::InvalidParameter { parameter: "min_span", .. })
        ));
        assert!(matches!(
            ReorderParameters::new(0, 0, (2, 2), (3, 1), None),
            Err(ReorderError::InvalidParameter { parameter: "min_span", .. })
        ));
    }

    // Tests that the solution slot can be written in place
    // Verified by returning a copy from solution_mut
    #[test]
    fn test_solution_slot_is_writable() {
        let mut params = ReorderParameters::new(0, 0, (1, 1), (1, 1), None).expect("valid spans");
        params.solution_mut().is_solution = true;
        params.solution_mut().bounds = CellAndSpan::new(1, 1, 1, 1);

        assert!(params.solution().is_solution);
        assert_eq!(params.solution().area(), 1);
    }

    // Tests that a drag snapshot records the item's screen and rectangle
    // Verified by reading the stored screen id instead of the hotseat marker
    #[test]
    fn test_cell_info_for_item() {
        let mut layout = CellLayout::new(5, 1)
            .expect("valid grid")
            .on_screen(2, Container::Hotseat);
        let item = layout
            .add_item(CellAndSpan::new(3, 0, 1, 1), true)
            .expect("vacant");

        let info = CellInfo::for_item(&layout, item).expect("placed item");
        assert_eq!(info.cell, Some(item));
        assert_eq!(info.screen_id, -1);
        assert_eq!(info.container, Container::Hotseat);
        assert_eq!(info.rect, CellAndSpan::new(3, 0, 1, 1));
        assert_eq!(info.to_string(), "Cell[item=#0, x=3, y=0]");

        assert!(CellInfo::for_item(&layout, ItemId(1)).is_none());
    }

    // Tests drags that have no backing item
    // Verified by giving detached drags a default handle
    #[test]
    fn test_cell_info_detached() {
        let info = CellInfo::detached(0, Container::Desktop, CellAndSpan::new(1, 2, 2, 2));

        assert_eq!(info.cell, None);
        assert_eq!(info.to_string(), "Cell[item=none, x=1, y=2]");
    }
}
