//! Plain-text boards
//!
//! A board is a block of equal-length lines, one character per cell:
//!
//! - `-` empty
//! - `i` icon
//! - `x` icon that may not be moved
//! - `A` to `Z` a folder, always one cell
//! - any other lowercase letter a widget; all cells of one widget form a solid
//!   rectangle of the same letter
//!
//! Blank lines and lines starting with `#` are ignored. Items are numbered in
//! reading order of their top-left cell, which is also the order of the handles a
//! layout built from the board hands out.

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::configuration::MAX_RANDOM_WIDGET_SPAN;
use crate::io::error::{ReorderError, Result, WithPath, board_parse_error, invalid_parameter};
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::layout::CellLayout;
use crate::spatial::occupancy::GridOccupancy;

/// Symbol of an empty cell
pub const EMPTY: char = '-';
/// Symbol of a movable icon
pub const ICON: char = 'i';
/// Symbol of a pinned icon
pub const PINNED_ICON: char = 'x';

const WIDGET_SYMBOLS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't',
    'u', 'v', 'w', 'y', 'z',
];

/// What occupies a board rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardItemKind {
    /// Single-cell icon
    Icon,
    /// Single-cell icon that may not be moved
    PinnedIcon,
    /// Single-cell folder with its letter
    Folder(char),
    /// Rectangular widget with its letter
    Widget(char),
}

impl BoardItemKind {
    /// Classify a cell symbol; `None` for an empty cell
    ///
    /// # Errors
    ///
    /// Returns the symbol back if it is not part of the board alphabet
    pub const fn from_symbol(symbol: char) -> std::result::Result<Option<Self>, char> {
        match symbol {
            EMPTY => Ok(None),
            ICON => Ok(Some(Self::Icon)),
            PINNED_ICON => Ok(Some(Self::PinnedIcon)),
            'A'..='Z' => Ok(Some(Self::Folder(symbol))),
            'a'..='z' => Ok(Some(Self::Widget(symbol))),
            _ => Err(symbol),
        }
    }

    /// Character drawn for this kind
    pub const fn symbol(self) -> char {
        match self {
            Self::Icon => ICON,
            Self::PinnedIcon => PINNED_ICON,
            Self::Folder(letter) | Self::Widget(letter) => letter,
        }
    }

    /// Whether the solver may move items of this kind
    pub const fn can_reorder(self) -> bool {
        !matches!(self, Self::PinnedIcon)
    }
}

/// One item on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardItem {
    /// Kind of item
    pub kind: BoardItemKind,
    /// Cells it covers
    pub rect: CellAndSpan,
}

/// A grid of items in text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    items: Vec<BoardItem>,
}

impl Board {
    /// Parse board text
    ///
    /// # Errors
    ///
    /// Returns a [`ReorderError::BoardParse`] at the first ragged line, unknown
    /// symbol or widget that is not a solid rectangle
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<(usize, Vec<char>)> = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_number, line)| (line_number, line.chars().collect()))
            .collect();

        let Some((_, first)) = rows.first() else {
            return Err(board_parse_error(1, 1, &"board has no rows"));
        };
        let width = first.len();
        let height = rows.len();

        let mut symbols = Array2::from_elem((width, height), EMPTY);
        for (y, (line_number, row)) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(board_parse_error(
                    *line_number,
                    row.len().min(width) + 1,
                    &format!("expected {width} cells, found {}", row.len()),
                ));
            }
            for (x, symbol) in row.iter().enumerate() {
                if let Err(unknown) = BoardItemKind::from_symbol(*symbol) {
                    return Err(board_parse_error(
                        *line_number,
                        x + 1,
                        &format!("unknown symbol '{unknown}'"),
                    ));
                }
                if let Some(cell) = symbols.get_mut([x, y]) {
                    *cell = *symbol;
                }
            }
        }

        let mut visited = Array2::from_elem((width, height), false);
        let mut items = Vec::new();
        for (y, (line_number, _)) in rows.iter().enumerate() {
            for x in 0..width {
                if visited.get([x, y]).copied().unwrap_or(true) {
                    continue;
                }
                let symbol = symbols.get([x, y]).copied().unwrap_or(EMPTY);
                let Ok(Some(kind)) = BoardItemKind::from_symbol(symbol) else {
                    continue;
                };

                let rect = match kind {
                    BoardItemKind::Widget(letter) => {
                        let (rect, cells) = flood_widget(&symbols, &mut visited, x, y, letter);
                        if cells != rect.area() as usize {
                            return Err(board_parse_error(
                                *line_number,
                                x + 1,
                                &format!("widget '{letter}' is not a solid rectangle"),
                            ));
                        }
                        rect
                    }
                    _ => {
                        if let Some(seen) = visited.get_mut([x, y]) {
                            *seen = true;
                        }
                        CellAndSpan::new(x as i32, y as i32, 1, 1)
                    }
                };
                items.push(BoardItem { kind, rect });
            }
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            items,
        })
    }

    /// Read and parse a board file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_path(path, "read board")?;
        Self::parse(&text)
    }

    /// Write the board to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).with_path(path, "write board")
    }

    /// Generate a random board
    ///
    /// Cells are visited in reading order and each vacant one becomes empty, an
    /// icon, a pinned icon, a folder or the top-left corner of a widget. Widgets
    /// shrink until they fit and never touch another widget of the same letter.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is smaller than one cell
    pub fn random(seed: u64, width: i32, height: i32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(invalid_parameter(
                "board size",
                &format!("{width}x{height}"),
                &"must be at least 1x1",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut occupancy = GridOccupancy::new(width as usize, height as usize);
        let mut board = Self {
            width,
            height,
            items: Vec::new(),
        };

        for y in 0..height {
            for x in 0..width {
                if occupancy.is_occupied(x, y) {
                    continue;
                }
                let roll: f64 = rng.random();
                let item = if roll < 0.4 {
                    continue;
                } else if roll < 0.7 {
                    BoardItem {
                        kind: BoardItemKind::Icon,
                        rect: CellAndSpan::new(x, y, 1, 1),
                    }
                } else if roll < 0.75 {
                    BoardItem {
                        kind: BoardItemKind::PinnedIcon,
                        rect: CellAndSpan::new(x, y, 1, 1),
                    }
                } else if roll < 0.8 {
                    let letter = char::from(b'A' + rng.random_range(0..26u8));
                    BoardItem {
                        kind: BoardItemKind::Folder(letter),
                        rect: CellAndSpan::new(x, y, 1, 1),
                    }
                } else {
                    let mut span_x = rng.random_range(1..=MAX_RANDOM_WIDGET_SPAN);
                    let mut span_y = rng.random_range(1..=MAX_RANDOM_WIDGET_SPAN);
                    while !(x + span_x <= width
                        && y + span_y <= height
                        && occupancy.is_region_vacant(x, y, span_x, span_y))
                    {
                        if span_x >= span_y && span_x > 1 {
                            span_x -= 1;
                        } else {
                            span_y -= 1;
                        }
                    }
                    let rect = CellAndSpan::new(x, y, span_x, span_y);
                    BoardItem {
                        kind: BoardItemKind::Widget(board.fresh_widget_letter(&rect)),
                        rect,
                    }
                };
                occupancy.mark_cells(&item.rect, true);
                board.items.push(item);
            }
        }
        Ok(board)
    }

    fn fresh_widget_letter(&self, rect: &CellAndSpan) -> char {
        let widgets = self
            .items
            .iter()
            .filter(|item| matches!(item.kind, BoardItemKind::Widget(_)))
            .count();
        let grown = CellAndSpan::new(rect.cell_x - 1, rect.cell_y - 1, rect.span_x + 2, rect.span_y + 2);

        (0..WIDGET_SYMBOLS.len())
            .filter_map(|offset| WIDGET_SYMBOLS.get((widgets + offset) % WIDGET_SYMBOLS.len()))
            .copied()
            .find(|letter| {
                !self.items.iter().any(|item| {
                    item.kind == BoardItemKind::Widget(*letter) && grown.intersects(&item.rect)
                })
            })
            .unwrap_or('z')
    }

    /// Number of columns
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Items in handle order
    pub fn items(&self) -> &[BoardItem] {
        &self.items
    }

    /// Build a layout holding the board's items
    ///
    /// The item at index `n` receives handle `ItemId(n)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board's items overlap or leave the grid
    pub fn to_layout(&self) -> Result<CellLayout> {
        let mut layout = CellLayout::new(self.width, self.height)?;
        for item in &self.items {
            layout.add_item(item.rect, item.kind.can_reorder())?;
        }
        Ok(layout)
    }

    /// Copy of this board with every item at its committed position in `layout`
    ///
    /// `layout` must have been built by [`to_layout`](Self::to_layout).
    ///
    /// # Errors
    ///
    /// Returns an error if the layout has no item for one of the board's items
    pub fn with_positions(&self, layout: &CellLayout) -> Result<Self> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let id = ItemId(index);
                layout
                    .item(id)
                    .map(|placed| BoardItem {
                        kind: item.kind,
                        rect: placed.cell,
                    })
                    .ok_or(ReorderError::UnknownItem { item: id })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            width: layout.count_x(),
            height: layout.count_y(),
            items,
        })
    }

    /// Kind given to a newly dropped item covering `rect`
    ///
    /// A single cell becomes an icon, anything larger a widget with a letter no
    /// neighbouring widget uses.
    pub fn dropped_item_kind(&self, rect: &CellAndSpan) -> BoardItemKind {
        if rect.area() == 1 {
            BoardItemKind::Icon
        } else {
            BoardItemKind::Widget(self.fresh_widget_letter(rect))
        }
    }

    /// Add an item, as when a dragged item is dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the item leaves the board or overlaps another item
    pub fn place(&mut self, item: BoardItem) -> Result<()> {
        if !item.rect.fits_within(self.width, self.height) {
            return Err(ReorderError::InvalidPlacement {
                rect: item.rect,
                reason: format!("must lie within the {}x{} board", self.width, self.height),
            });
        }
        if self.items.iter().any(|other| other.rect.intersects(&item.rect)) {
            return Err(ReorderError::InvalidPlacement {
                rect: item.rect,
                reason: "overlaps an existing item".to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Kinds and spans of all items, sorted
    ///
    /// Two boards with equal signatures hold the same items, wherever they sit.
    pub fn signature(&self) -> Vec<(BoardItemKind, i32, i32)> {
        let mut signature: Vec<_> = self
            .items
            .iter()
            .map(|item| (item.kind, item.rect.span_x, item.rect.span_y))
            .collect();
        signature.sort_unstable();
        signature
    }

    fn symbols(&self) -> Array2<char> {
        let mut symbols = Array2::from_elem(
            (self.width.max(0) as usize, self.height.max(0) as usize),
            EMPTY,
        );
        for item in &self.items {
            for x in item.rect.cell_x..item.rect.right() {
                for y in item.rect.cell_y..item.rect.bottom() {
                    if let Some(cell) = symbols.get_mut([x.max(0) as usize, y.max(0) as usize]) {
                        *cell = item.kind.symbol();
                    }
                }
            }
        }
        symbols
    }
}

impl FromStr for Board {
    type Err = ReorderError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.symbols();
        for row in symbols.columns() {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn flood_widget(
    symbols: &Array2<char>,
    visited: &mut Array2<bool>,
    x: usize,
    y: usize,
    letter: char,
) -> (CellAndSpan, usize) {
    let mut queue = VecDeque::from([(x, y)]);
    if let Some(seen) = visited.get_mut([x, y]) {
        *seen = true;
    }
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
    let mut cells = 0;

    while let Some((cx, cy)) = queue.pop_front() {
        cells += 1;
        min_x = min_x.min(cx);
        min_y = min_y.min(cy);
        max_x = max_x.max(cx);
        max_y = max_y.max(cy);

        let neighbours = [
            cx.checked_sub(1).map(|nx| (nx, cy)),
            cy.checked_sub(1).map(|ny| (cx, ny)),
            Some((cx + 1, cy)),
            Some((cx, cy + 1)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            if symbols.get([nx, ny]) != Some(&letter) {
                continue;
            }
            if let Some(seen) = visited.get_mut([nx, ny]) {
                if !*seen {
                    *seen = true;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    let rect = CellAndSpan::new(
        min_x as i32,
        min_y as i32,
        (max_x - min_x + 1) as i32,
        (max_y - min_y + 1) as i32,
    );
    (rect, cells)
}
