//! Solver constants and runtime configuration defaults

// Pixel metrics of a cell layout when none are supplied
/// Default cell width in pixels
pub const DEFAULT_CELL_WIDTH: i32 = 96;
/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: i32 = 112;
/// Default horizontal gap between neighbouring cells
pub const DEFAULT_BORDER_SPACE_X: i32 = 16;
/// Default vertical gap between neighbouring cells
pub const DEFAULT_BORDER_SPACE_Y: i32 = 16;
/// Default icon size, the base for the preview nudge distance
pub const DEFAULT_ICON_SIZE_PX: f32 = 64.0;

// Preview animation tuning
/// Preview nudge distance as a fraction of the icon size
pub const REORDER_PREVIEW_MAGNITUDE: f32 = 0.12;
/// Period of one preview oscillation in milliseconds
pub const PREVIEW_DURATION_MS: u32 = 300;
/// Delay before a held drag commits a reorder, also the hint duration
pub const REORDER_TIMEOUT_MS: u32 = 650;
/// Duration of settle animations in milliseconds
pub const REORDER_ANIMATION_DURATION_MS: u32 = 150;
/// Upper bound of the random start delay given to each preview
pub const MAX_START_DELAY_MS: u32 = 60;
/// Pixels removed from an item's width by the preview shrink
pub const CHILD_DIVIDEND: f32 = 4.0;
/// Resting scale of a displaced item
pub const CHILD_SCALE: f32 = 1.0;
/// Ease-out factor used when a preview settles back to baseline
pub const DECELERATE_FACTOR: f32 = 1.5;

// Push scoring weights; lower weighted cost wins
/// Cost of each item a push displaces
pub const WEIGHT_DISPLACED_ITEMS: i64 = 100;
/// Cost per cell of Manhattan travel summed over displaced items
pub const WEIGHT_TOTAL_DISTANCE: i64 = 10;
/// Cost per cell of area covered by displaced items
pub const WEIGHT_DISPLACED_AREA: i64 = 1;

// Board generation
/// Fixed seed for reproducible animation jitter and random boards
pub const DEFAULT_SEED: u64 = 42;
/// Widest widget span produced by the random board generator
pub const MAX_RANDOM_WIDGET_SPAN: i32 = 3;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of board files picked up from a directory
pub const BOARD_EXTENSION: &str = "board";
