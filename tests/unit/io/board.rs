//! Tests for plain-text boards: parsing, printing, files and generation

#[cfg(test)]
mod tests {
    use gridreorder::ReorderError;
    use gridreorder::io::board::{Board, BoardItem, BoardItemKind};
    use gridreorder::spatial::cell::{CellAndSpan, ItemId};

    const SAMPLE: &str = "ii-a\nx-Ba\n";

    fn sample() -> Board {
        Board::parse(SAMPLE).expect("valid board")
    }

    fn parse_error_position(text: &str) -> Option<(usize, usize)> {
        match Board::parse(text) {
            Err(ReorderError::BoardParse { line, column, .. }) => Some((line, column)),
            _ => None,
        }
    }

    // Tests that items are read in reading order of their top-left cell
    // Verified by scanning columns before rows
    #[test]
    fn test_parse_items() {
        let board = sample();

        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 2);
        assert_eq!(
            board.items(),
            &[
                BoardItem {
                    kind: BoardItemKind::Icon,
                    rect: CellAndSpan::new(0, 0, 1, 1),
                },
                BoardItem {
                    kind: BoardItemKind::Icon,
                    rect: CellAndSpan::new(1, 0, 1, 1),
                },
                BoardItem {
                    kind: BoardItemKind::Widget('a'),
                    rect: CellAndSpan::new(3, 0, 1, 2),
                },
                BoardItem {
                    kind: BoardItemKind::PinnedIcon,
                    rect: CellAndSpan::new(0, 1, 1, 1),
                },
                BoardItem {
                    kind: BoardItemKind::Folder('B'),
                    rect: CellAndSpan::new(2, 1, 1, 1),
                },
            ]
        );
    }

    // Tests that comments and blank lines are skipped
    // Verified by treating comment lines as rows
    #[test]
    fn test_parse_skips_comments() {
        let board: Board = "# home screen\n\nii-a\nx-Ba\n".parse().expect("valid board");

        assert_eq!(board, sample());
    }

    // Tests that printing reproduces the parsed text
    // Verified by printing columns as rows
    #[test]
    fn test_display_matches_input() {
        assert_eq!(sample().to_string(), SAMPLE);
    }

    // Tests error positions for malformed boards
    // Verified by reporting zero-based positions
    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_error_position("ii\ni"), Some((2, 2)));
        assert_eq!(parse_error_position("i?"), Some((1, 2)));
        assert_eq!(parse_error_position("aa\na-"), Some((1, 1)));
        assert_eq!(parse_error_position("# only a comment\n"), Some((1, 1)));
    }

    // Tests that widgets become single rectangles in the layout
    // Verified by adding widget cells as separate items
    #[test]
    fn test_to_layout() {
        let layout = sample().to_layout().expect("valid layout");

        assert_eq!(layout.items().len(), 5);
        assert_eq!(layout.occupied().occupied_count(), 6);
        let widget = layout.item(ItemId(2)).expect("widget placed");
        assert_eq!(widget.cell, CellAndSpan::new(3, 0, 1, 2));
        assert!(widget.can_reorder);
        assert!(!layout.item(ItemId(3)).expect("pinned placed").can_reorder);
    }

    // Tests copying positions back from a layout
    // Verified by keeping the board's own positions
    #[test]
    fn test_with_positions() {
        let board = sample();
        let mut layout = board.to_layout().expect("valid layout");
        layout
            .move_item(ItemId(1), CellAndSpan::new(2, 0, 1, 1))
            .expect("vacant cell");

        let moved = board.with_positions(&layout).expect("same items");

        assert_eq!(moved.to_string(), "i-ia\nx-Ba\n");
        assert_eq!(moved.signature(), board.signature());
    }

    // Tests the kind given to dropped items
    // Verified by always dropping icons
    #[test]
    fn test_dropped_item_kind() {
        let board = sample();

        assert_eq!(
            board.dropped_item_kind(&CellAndSpan::new(1, 0, 1, 1)),
            BoardItemKind::Icon
        );
        assert_eq!(
            board.dropped_item_kind(&CellAndSpan::new(0, 0, 2, 2)),
            BoardItemKind::Widget('b')
        );
    }

    // Tests placing an item onto vacant and occupied cells
    // Verified by skipping the overlap check
    #[test]
    fn test_place() {
        let mut board = sample();

        board
            .place(BoardItem {
                kind: BoardItemKind::Icon,
                rect: CellAndSpan::new(2, 0, 1, 1),
            })
            .expect("vacant cell");
        assert_eq!(board.to_string(), "iiia\nx-Ba\n");

        let overlap = board.place(BoardItem {
            kind: BoardItemKind::Icon,
            rect: CellAndSpan::new(0, 0, 1, 1),
        });
        assert!(matches!(overlap, Err(ReorderError::InvalidPlacement { .. })));

        let outside = board.place(BoardItem {
            kind: BoardItemKind::Icon,
            rect: CellAndSpan::new(4, 0, 1, 1),
        });
        assert!(matches!(outside, Err(ReorderError::InvalidPlacement { .. })));
    }

    // Tests saving and loading through the file system
    // Verified by writing the debug representation
    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("home.board");

        sample().save(&path).expect("writable");
        let loaded = Board::load(&path).expect("readable");

        assert_eq!(loaded, sample());
        assert!(matches!(
            Board::load(&dir.path().join("missing.board")),
            Err(ReorderError::FileSystem { .. })
        ));
    }

    // Tests generated boards are reproducible and reparse to themselves
    // Verified by letting neighbouring widgets share a letter
    #[test]
    fn test_random_boards() {
        for seed in 0..20 {
            let board = Board::random(seed, 6, 5).expect("valid size");
            assert_eq!(board, Board::random(seed, 6, 5).expect("valid size"));

            let reparsed = Board::parse(&board.to_string()).expect("generated board parses");
            assert_eq!(reparsed, board);
            assert!(board.to_layout().is_ok());
        }

        assert!(Board::random(1, 0, 4).is_err());
    }
}
