//! Tests for solver constants and runtime defaults

#[cfg(test)]
mod tests {
    use gridreorder::io::configuration::{
        BOARD_EXTENSION, CHILD_DIVIDEND, CHILD_SCALE, DEFAULT_BORDER_SPACE_X,
        DEFAULT_BORDER_SPACE_Y, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_ICON_SIZE_PX,
        DEFAULT_SEED, MAX_INDIVIDUAL_PROGRESS_BARS, MAX_START_DELAY_MS, OUTPUT_SUFFIX,
        PREVIEW_DURATION_MS, REORDER_ANIMATION_DURATION_MS, REORDER_PREVIEW_MAGNITUDE,
        REORDER_TIMEOUT_MS, WEIGHT_DISPLACED_AREA, WEIGHT_DISPLACED_ITEMS,
        WEIGHT_TOTAL_DISTANCE,
    };

    // Tests the default cell metrics
    // Verified by changing the cell size
    #[test]
    fn test_cell_metrics() {
        assert_eq!(DEFAULT_CELL_WIDTH, 96);
        assert_eq!(DEFAULT_CELL_HEIGHT, 112);
        assert_eq!(DEFAULT_BORDER_SPACE_X, 16);
        assert_eq!(DEFAULT_BORDER_SPACE_Y, 16);
    }

    // Tests the preview nudge stays a small fraction of an icon
    // Verified by raising the magnitude above one
    #[test]
    fn test_preview_magnitude() {
        let magnitude = REORDER_PREVIEW_MAGNITUDE * DEFAULT_ICON_SIZE_PX;

        assert!((magnitude - 7.68).abs() < 1e-4);
        assert!(CHILD_DIVIDEND < DEFAULT_CELL_WIDTH as f32);
        assert!((CHILD_SCALE - 1.0).abs() < f32::EPSILON);
    }

    // Tests animation timings relative to each other
    // Verified by making the start delay longer than a bounce
    #[test]
    fn test_animation_timings() {
        assert_eq!(PREVIEW_DURATION_MS, 300);
        assert_eq!(REORDER_TIMEOUT_MS, 650);
        assert_eq!(REORDER_ANIMATION_DURATION_MS, 150);
        assert!(MAX_START_DELAY_MS < PREVIEW_DURATION_MS);
    }

    // Tests that item count dominates distance which dominates area
    // Verified by swapping the item and distance weights
    #[test]
    fn test_scoring_weights_ordered() {
        assert_eq!(WEIGHT_DISPLACED_ITEMS, 100);
        assert_eq!(WEIGHT_TOTAL_DISTANCE, 10);
        assert_eq!(WEIGHT_DISPLACED_AREA, 1);
    }

    // Tests output and display settings
    // Verified by changing the output suffix
    #[test]
    fn test_output_settings() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert_eq!(BOARD_EXTENSION, "board");
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(DEFAULT_SEED, 42);
    }
}
