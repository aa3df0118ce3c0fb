//! Drag descriptors and solver requests

use std::fmt;

use crate::algorithm::configuration::ItemConfiguration;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::layout::{CellLayout, Container};

/// Snapshot of the item a drag gesture started from
///
/// Built once when the gesture begins and never changed afterwards. `cell` is
/// `None` for drags that do not originate from a placed item, such as a new widget
/// pulled from a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    /// Item being dragged, if it already lives on a layout
    pub cell: Option<ItemId>,
    /// Screen the item came from; `-1` for the hotseat
    pub screen_id: i32,
    /// Container the item came from
    pub container: Container,
    /// Rectangle the item occupied when the drag started
    pub rect: CellAndSpan,
}

impl CellInfo {
    /// Describe a placed item at the start of a drag
    pub fn for_item(layout: &CellLayout, item: ItemId) -> Option<Self> {
        layout.item(item).map(|placed| Self {
            cell: Some(item),
            screen_id: layout.screen_id(),
            container: layout.container(),
            rect: placed.cell,
        })
    }

    /// Describe a drag with no backing item, such as an external drop
    pub const fn detached(screen_id: i32, container: Container, rect: CellAndSpan) -> Self {
        Self {
            cell: None,
            screen_id,
            container,
            rect,
        }
    }
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell {
            Some(item) => write!(f, "Cell[item={item}")?,
            None => f.write_str("Cell[item=none")?,
        }
        write!(f, ", x={}, y={}]", self.rect.cell_x, self.rect.cell_y)
    }
}

/// One solver request
///
/// Every field except `solution` is a read-only input. `solution` is the output
/// slot: the solver fills it in place and the caller reads it back after the call
/// returns.
#[derive(Debug, Clone)]
pub struct ReorderParameters {
    pixel_x: i32,
    pixel_y: i32,
    span_x: i32,
    span_y: i32,
    min_span_x: i32,
    min_span_y: i32,
    drag_view: Option<ItemId>,
    solution: ItemConfiguration,
}

impl ReorderParameters {
    /// Create a request for an item of `span` that may shrink to `min_span`
    ///
    /// # Errors
    ///
    /// Returns an error if a span is smaller than one cell or the minimum exceeds
    /// the requested span
    pub fn new(
        pixel_x: i32,
        pixel_y: i32,
        span: (i32, i32),
        min_span: (i32, i32),
        drag_view: Option<ItemId>,
    ) -> Result<Self> {
        let (span_x, span_y) = span;
        let (min_span_x, min_span_y) = min_span;

        if span_x < 1 || span_y < 1 {
            return Err(invalid_parameter(
                "span",
                &format!("{span_x}x{span_y}"),
                &"spans must be at least 1",
            ));
        }
        if min_span_x < 1 || min_span_y < 1 {
            return Err(invalid_parameter(
                "min_span",
                &format!("{min_span_x}x{min_span_y}"),
                &"spans must be at least 1",
            ));
        }
        if min_span_x > span_x || min_span_y > span_y {
            return Err(invalid_parameter(
                "min_span",
                &format!("{min_span_x}x{min_span_y}"),
                &format!("cannot exceed the item span {span_x}x{span_y}"),
            ));
        }

        Ok(Self {
            pixel_x,
            pixel_y,
            span_x,
            span_y,
            min_span_x,
            min_span_y,
            drag_view,
            solution: ItemConfiguration::new(),
        })
    }

    /// Drag position in layout pixels
    pub const fn pixel(&self) -> (i32, i32) {
        (self.pixel_x, self.pixel_y)
    }

    /// Horizontal drag position
    pub const fn pixel_x(&self) -> i32 {
        self.pixel_x
    }

    /// Vertical drag position
    pub const fn pixel_y(&self) -> i32 {
        self.pixel_y
    }

    /// Requested span
    pub const fn span(&self) -> (i32, i32) {
        (self.span_x, self.span_y)
    }

    /// Smallest span the item accepts
    pub const fn min_span(&self) -> (i32, i32) {
        (self.min_span_x, self.min_span_y)
    }

    /// Item being dragged, if it lives on the layout being solved
    pub const fn drag_view(&self) -> Option<ItemId> {
        self.drag_view
    }

    /// Output slot as last written by the solver
    pub const fn solution(&self) -> &ItemConfiguration {
        &self.solution
    }

    /// Mutable access to the output slot
    pub const fn solution_mut(&mut self) -> &mut ItemConfiguration {
        &mut self.solution
    }

    /// Take the output slot, consuming the request
    pub fn into_solution(self) -> ItemConfiguration {
        self.solution
    }
}
