//! Frame-driven value animator
//!
//! Time is supplied by the caller in milliseconds through [`ValueAnimator::tick`];
//! nothing here reads a clock.

use crate::math::interpolation::{Interpolator, lerp};

/// Repeat behaviour once the first cycle completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Run a single cycle and stop
    Once,
    /// Run forever, reversing direction on every cycle
    Reverse,
}

/// Lifecycle of an animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Waiting out its start delay
    Pending,
    /// Producing values
    Running,
    /// Reached its final value
    Ended,
    /// Stopped before finishing
    Cancelled,
}

/// Outcome of advancing an animator by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorEvent {
    /// Animated value after the frame
    pub value: f32,
    /// Whether at least one cycle boundary was crossed during the frame
    pub repeated: bool,
    /// Whether the animator ended during the frame
    pub ended: bool,
}

/// Animates a float between two values
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration_ms: u32,
    start_delay_ms: u32,
    elapsed_ms: u64,
    repeat: RepeatMode,
    interpolator: Interpolator,
    state: AnimatorState,
    iteration: u64,
    value: f32,
}

impl ValueAnimator {
    /// Create an animator from `from` to `to` over `duration_ms`
    pub const fn new(from: f32, to: f32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            start_delay_ms: 0,
            elapsed_ms: 0,
            repeat: RepeatMode::Once,
            interpolator: Interpolator::AccelerateDecelerate,
            state: AnimatorState::Pending,
            iteration: 0,
            value: from,
        }
    }

    /// Delay before the first value change
    #[must_use]
    pub const fn with_start_delay(mut self, start_delay_ms: u32) -> Self {
        self.start_delay_ms = start_delay_ms;
        self
    }

    /// Repeat behaviour
    #[must_use]
    pub const fn with_repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    /// Timing curve
    #[must_use]
    pub const fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> AnimatorState {
        self.state
    }

    /// Value as of the last frame
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Completed cycles
    pub const fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Whether the animator is still pending or running
    pub const fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Pending | AnimatorState::Running)
    }

    /// Stop without reaching the end value
    pub const fn cancel(&mut self) {
        if self.is_running() {
            self.state = AnimatorState::Cancelled;
        }
    }

    /// Advance by `dt_ms` milliseconds
    ///
    /// During the start delay the value stays at `from`. A [`RepeatMode::Reverse`]
    /// animator runs backwards on every odd cycle.
    pub fn tick(&mut self, dt_ms: u32) -> AnimatorEvent {
        if !self.is_running() {
            return AnimatorEvent {
                value: self.value,
                repeated: false,
                ended: false,
            };
        }

        self.elapsed_ms += u64::from(dt_ms);
        let delay = u64::from(self.start_delay_ms);
        if self.elapsed_ms < delay {
            self.value = self.from;
            return AnimatorEvent {
                value: self.value,
                repeated: false,
                ended: false,
            };
        }
        self.state = AnimatorState::Running;

        let active = self.elapsed_ms - delay;
        let duration = u64::from(self.duration_ms.max(1));
        let cycle = active / duration;
        let within = (active % duration) as f32 / duration as f32;

        match self.repeat {
            RepeatMode::Once if cycle >= 1 => {
                self.iteration = 1;
                self.state = AnimatorState::Ended;
                self.value = self.to;
                AnimatorEvent {
                    value: self.value,
                    repeated: false,
                    ended: true,
                }
            }
            RepeatMode::Once => {
                self.value = self.sample(within);
                AnimatorEvent {
                    value: self.value,
                    repeated: false,
                    ended: false,
                }
            }
            RepeatMode::Reverse => {
                let repeated = cycle > self.iteration;
                self.iteration = cycle;
                let fraction = if cycle % 2 == 0 { within } else { 1.0 - within };
                self.value = self.sample(fraction);
                AnimatorEvent {
                    value: self.value,
                    repeated,
                    ended: false,
                }
            }
        }
    }

    fn sample(&self, fraction: f32) -> f32 {
        lerp(self.from, self.to, self.interpolator.interpolate(fraction))
    }
}
