//! Command-line interface for dropping items onto board files in batch

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};

use crate::algorithm::parameters::CellInfo;
use crate::algorithm::session::{DragSession, ReorderMode, make_space_for_hotseat_migration};
use crate::io::board::{Board, BoardItem};
use crate::io::configuration::{BOARD_EXTENSION, DEFAULT_SEED, OUTPUT_SUFFIX};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::progress::{FileOutcome, ProgressManager};
use crate::spatial::cell::CellAndSpan;
use crate::spatial::layout::{CellLayout, Container};

#[derive(Parser, Debug)]
#[command(name = "gridreorder")]
#[command(
    author,
    version,
    about = "Drop items onto launcher grids, pushing existing items aside"
)]
/// Command-line arguments for the reorder tool
// Flags map one-to-one onto user-facing switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Board file or directory of board files to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Top-left cell of the dropped item, as X,Y
    #[arg(short, long, value_parser = parse_cell)]
    pub cell: Option<(i32, i32)>,

    /// Span of the dropped item, as WxH
    #[arg(short, long, value_parser = parse_span, default_value = "1x1")]
    pub span: (i32, i32),

    /// Smallest span the item may shrink to, as WxH; defaults to the span
    #[arg(short, long, value_parser = parse_span)]
    pub min_span: Option<(i32, i32)>,

    /// Clear the bottom row by pushing items upwards instead of dropping an item
    #[arg(long)]
    pub make_space: bool,

    /// Seed for animation timing jitter
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log solver decisions
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Minimum span, falling back to the span
    pub fn effective_min_span(&self) -> (i32, i32) {
        self.min_span.unwrap_or(self.span)
    }
}

fn parse_pair(text: &str, separator: char) -> std::result::Result<(i32, i32), String> {
    let (first, second) = text
        .split_once(separator)
        .ok_or_else(|| format!("expected two numbers separated by '{separator}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| format!("'{part}': {err}"))
    };
    Ok((parse(first)?, parse(second)?))
}

/// Parse a cell given as `X,Y`
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_cell(text: &str) -> std::result::Result<(i32, i32), String> {
    parse_pair(text, ',')
}

/// Parse a span given as `WxH`
///
/// # Errors
///
/// Returns a message if the text is not two positive integers separated by `x`
pub fn parse_span(text: &str) -> std::result::Result<(i32, i32), String> {
    let (width, height) = parse_pair(text, 'x')?;
    if width < 1 || height < 1 {
        return Err(format!("span {width}x{height} must be at least 1x1"));
    }
    Ok((width, height))
}

/// Orchestrates batch processing of board files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the outcome of every processed board in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are inconsistent, the target is not a
    /// board file or directory, or a board cannot be read, parsed or written
    pub fn process(&mut self) -> Result<Vec<(PathBuf, FileOutcome)>> {
        if !self.cli.make_space && self.cli.cell.is_none() {
            return Err(invalid_parameter(
                "cell",
                &"none",
                &"a drop cell is required unless --make-space is given",
            ));
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(pm) = self.progress_manager.as_mut() {
            pm.initialize(files.len());
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let outcome = self.process_file(file, index)?;
            outcomes.push((file.clone(), outcome));
        }

        if let Some(pm) = self.progress_manager.as_ref() {
            pm.finish();
        }
        Ok(outcomes)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_board_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("file must have the .{BOARD_EXTENSION} extension"),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if is_board_file(&path) && !is_output_file(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a board file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback when a board has no solution
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<FileOutcome> {
        if let Some(pm) = self.progress_manager.as_mut() {
            pm.start_file(index, input_path);
        }

        let board = Board::load(input_path)?;
        let mut layout = board.to_layout()?;
        self.advance(index, 1);

        let result = if self.cli.make_space {
            make_space_for_hotseat_migration(&mut layout, true)
                .then(|| board.with_positions(&layout))
                .transpose()?
        } else {
            self.drop_item(&board, &mut layout)?
        };
        self.advance(index, 2);

        let outcome = match result {
            Some(solved) => {
                let output = output_path(input_path);
                solved.save(&output)?;
                info!(input = %input_path.display(), output = %output.display(), "board solved");
                FileOutcome::Solved
            }
            None => {
                if !self.cli.quiet {
                    eprintln!("No solution: {}", input_path.display());
                }
                FileOutcome::NoSolution
            }
        };

        if let Some(pm) = self.progress_manager.as_mut() {
            pm.complete_file(index, outcome);
        }
        Ok(outcome)
    }

    fn drop_item(&self, board: &Board, layout: &mut CellLayout) -> Result<Option<Board>> {
        let (cell_x, cell_y) = self.cli.cell.unwrap_or_default();
        let (span_x, span_y) = self.cli.span;
        let (pixel_x, pixel_y) = layout.region_to_center_point(cell_x, cell_y, span_x, span_y);

        let mut session = DragSession::new(self.cli.seed);
        session.on_drag_enter(CellInfo::detached(
            layout.screen_id(),
            Container::Desktop,
            CellAndSpan::new(cell_x, cell_y, span_x, span_y),
        ));

        let placement = session.perform_reorder(
            layout,
            pixel_x,
            pixel_y,
            self.cli.effective_min_span(),
            self.cli.span,
            ReorderMode::OnDropExternal,
        )?;
        let Some(placement) = placement else {
            return Ok(None);
        };
        debug!(placement = %placement.cell, kind = ?placement.kind, "item dropped");

        let mut solved = board.with_positions(layout)?;
        let kind = solved.dropped_item_kind(&placement.cell);
        solved.place(BoardItem {
            kind,
            rect: placement.cell,
        })?;
        Ok(Some(solved))
    }

    fn advance(&mut self, index: usize, step: usize) {
        if let Some(pm) = self.progress_manager.as_mut() {
            pm.advance(index, step);
        }
    }
}

fn is_board_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(BOARD_EXTENSION)
}

fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}

/// Path the result for `input_path` is written to
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        BOARD_EXTENSION
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
