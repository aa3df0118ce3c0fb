//! Board files, command line, progress display and error handling

/// Plain-text board format and random board generation
pub mod board;
/// Command-line arguments and batch file processing
pub mod cli;
/// Tuning constants and defaults
pub mod configuration;
/// Error type, result alias and path context
pub mod error;
/// Batch progress bars
pub mod progress;
