//! Cell grids and the items placed on them
//!
//! This module contains:
//! - Cell rectangles and item handles
//! - Boolean occupancy maps
//! - The cell layout with its pixel geometry and nearest-area searches

/// Cell rectangles and item handles
pub mod cell;
/// Cell layout, pixel metrics and placed items
pub mod layout;
/// Boolean occupancy over a cell grid
pub mod occupancy;

pub use cell::{CellAndSpan, ItemId};
pub use layout::CellLayout;
