//! Visual feedback for previewed reorders

/// Tick-driven value animator
pub mod animator;
/// Nudge animation for a single displaced item
pub mod preview;
/// Per-gesture map of running preview animations
pub mod shake;
