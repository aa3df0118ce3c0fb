//! Push-based reorder solver for launcher-style cell grids
//!
//! When an icon or widget is dragged over occupied cells, the solver pushes the
//! items underneath aside as rigid clusters, falling back to moving them as a block
//! or one at a time, shrinking resizable items, or using the nearest empty region.
//! Accepted solutions are previewed with small per-item nudge animations and
//! committed on drop.

#![forbid(unsafe_code)]

/// Solver: configurations, clusters, requests, scoring and drag sessions
pub mod algorithm;
/// Preview animations for displaced items
pub mod animation;
/// Board files, command line, progress and errors
pub mod io;
/// Direction vectors and interpolation curves
pub mod math;
/// Cell rectangles, occupancy and layouts
pub mod spatial;

pub use io::error::{ReorderError, Result};
