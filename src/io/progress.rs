//! Multi-file progress display for board batches

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};

/// Stages a board goes through
pub const FILE_STEPS: usize = 3;

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// How a board finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// A placement was found and written
    Solved,
    /// No arrangement made room for the item
    NoSolution,
}

#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    step: usize,
}

/// Progress bars for a batch of boards
///
/// Small batches get one bar per board. Larger batches add an overall bar and
/// show only the most recent boards.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create an empty display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create the bars for `file_count` boards
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(FILE_STEPS as u64);
            bar.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Number of boards that have been started
    pub fn started_count(&self) -> usize {
        self.file_states.iter().filter(|state| !state.name.is_empty()).count()
    }

    /// Register a board as started
    pub fn start_file(&mut self, index: usize, path: &Path) {
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            state.name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            state.step = 0;
        }
        self.update_bars();
    }

    /// Report that a board reached `step` of [`FILE_STEPS`]
    pub fn advance(&mut self, index: usize, step: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.step = step.min(FILE_STEPS);
        }
        self.update_bars();
    }

    /// Mark a board as done
    pub fn complete_file(&mut self, index: usize, outcome: FileOutcome) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.file_states.get_mut(index) {
            let mark = match outcome {
                FileOutcome::Solved => '✓',
                FileOutcome::NoSolution => '✗',
            };
            state.name = format!("{mark} {}", state.name);
            state.step = FILE_STEPS;
        }
        self.update_bars();
    }

    /// Remove the display
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All boards processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let first_visible = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(first_visible..).unwrap_or(&[]);

        for (bar, state) in self.file_bars.iter().zip(visible) {
            bar.set_position(state.step as u64);
            bar.set_message(format!("{}/{FILE_STEPS}", state.step));
            bar.set_prefix(state.name.clone());
        }
        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
