//! Per-item nudge shown while a reorder is previewed
//!
//! A displaced item leans a few pixels along the line between its committed cell
//! and the cell the solution gives it, and shrinks slightly. In preview mode the
//! nudge bounces back and forth until the item is finished; in hint mode it plays
//! once towards the destination.

use rand::Rng;

use crate::animation::animator::{RepeatMode, ValueAnimator};
use crate::io::configuration::{
    CHILD_DIVIDEND, CHILD_SCALE, DECELERATE_FACTOR, DEFAULT_ICON_SIZE_PX, MAX_START_DELAY_MS,
    PREVIEW_DURATION_MS, REORDER_ANIMATION_DURATION_MS, REORDER_PREVIEW_MAGNITUDE,
    REORDER_TIMEOUT_MS,
};
use crate::math::direction::sign;
use crate::math::interpolation::{Interpolator, lerp};
use crate::spatial::cell::{CellAndSpan, ItemId};
use crate::spatial::layout::CellLayout;

/// Kind of feedback an animation gives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewMode {
    /// Single excursion towards where the item will go
    Hint,
    /// Continuous bounce back towards where the item came from
    Preview,
}

/// Visual displacement of an item relative to its laid-out position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceState {
    /// Horizontal offset in pixels
    pub offset_x: f32,
    /// Vertical offset in pixels
    pub offset_y: f32,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for BounceState {
    fn default() -> Self {
        Self::baseline(CHILD_SCALE)
    }
}

impl BounceState {
    /// Undisturbed state at the given resting scale
    pub const fn baseline(scale: f32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale,
        }
    }

    /// Blend between two states
    #[must_use]
    pub fn lerp(&self, to: &Self, progress: f32) -> Self {
        Self {
            offset_x: lerp(self.offset_x, to.offset_x, progress),
            offset_y: lerp(self.offset_y, to.offset_y, progress),
            scale: lerp(self.scale, to.scale, progress),
        }
    }
}

/// Tunables for preview animations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSettings {
    /// Nudge distance in pixels
    pub magnitude: f32,
    /// Resting scale of an item
    pub child_scale: f32,
    /// Length of one preview bounce
    pub preview_duration_ms: u32,
    /// Length of a hint excursion
    pub hint_duration_ms: u32,
    /// Length of the return to rest
    pub finish_duration_ms: u32,
    /// Upper bound (exclusive) of the random start delay
    pub max_start_delay_ms: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            magnitude: REORDER_PREVIEW_MAGNITUDE * DEFAULT_ICON_SIZE_PX,
            child_scale: CHILD_SCALE,
            preview_duration_ms: PREVIEW_DURATION_MS,
            hint_duration_ms: REORDER_TIMEOUT_MS,
            finish_duration_ms: REORDER_ANIMATION_DURATION_MS,
            max_start_delay_ms: MAX_START_DELAY_MS,
        }
    }
}

/// Nudge animation for one displaced item
#[derive(Debug, Clone)]
pub struct ReorderPreviewAnimation {
    item: ItemId,
    mode: PreviewMode,
    initial: BounceState,
    target: BounceState,
    baseline: BounceState,
    progress: f32,
    animator: Option<ValueAnimator>,
    finishing: bool,
}

impl ReorderPreviewAnimation {
    /// Build the nudge for an item moving from `from` to `to`
    ///
    /// Both centre points are taken with the destination span. `current` is the
    /// item's bounce state right now, so a replacement picks up where the old
    /// animation left off.
    pub fn new(
        layout: &CellLayout,
        item: ItemId,
        mode: PreviewMode,
        from: (i32, i32),
        to: &CellAndSpan,
        current: BounceState,
        settings: &PreviewSettings,
    ) -> Self {
        let (x0, y0) = layout.region_to_center_point(from.0, from.1, to.span_x, to.span_y);
        let (x1, y1) = layout.region_to_center_point(to.cell_x, to.cell_y, to.span_x, to.span_y);
        let (delta_x, delta_y) = (x1 - x0, y1 - y0);

        let item_width = layout.cell_to_rect(0, 0, to.span_x, to.span_y).width().max(1) as f32;
        let target_scale = (CHILD_DIVIDEND / item_width).mul_add(-current.scale, settings.child_scale);
        let (offset_x, offset_y) = nudge_offset(delta_x, delta_y, mode, settings.magnitude);

        Self {
            item,
            mode,
            initial: current,
            target: BounceState {
                offset_x,
                offset_y,
                scale: target_scale,
            },
            baseline: BounceState::baseline(settings.child_scale),
            progress: 0.0,
            animator: None,
            finishing: false,
        }
    }

    /// Item this animation drives
    pub const fn item(&self) -> ItemId {
        self.item
    }

    /// Feedback kind
    pub const fn mode(&self) -> PreviewMode {
        self.mode
    }

    /// State at progress 0
    pub const fn initial(&self) -> &BounceState {
        &self.initial
    }

    /// State at progress 1
    pub const fn target(&self) -> &BounceState {
        &self.target
    }

    /// Whether the item leans at all
    pub const fn has_movement(&self) -> bool {
        self.target.offset_x.abs() > f32::EPSILON || self.target.offset_y.abs() > f32::EPSILON
    }

    /// Whether the animation is returning to rest
    pub const fn is_finishing(&self) -> bool {
        self.finishing
    }

    /// State at progress `p`
    pub fn state_at(&self, progress: f32) -> BounceState {
        self.initial.lerp(&self.target, progress)
    }

    /// State at the current progress
    pub fn current(&self) -> BounceState {
        self.state_at(self.progress)
    }

    /// Start the animator after a random delay
    pub fn start<R: Rng>(&mut self, rng: &mut R, settings: &PreviewSettings) {
        let delay = if settings.max_start_delay_ms > 0 {
            rng.random_range(0..settings.max_start_delay_ms)
        } else {
            0
        };
        let (duration, repeat) = match self.mode {
            PreviewMode::Preview => (settings.preview_duration_ms, RepeatMode::Reverse),
            PreviewMode::Hint => (settings.hint_duration_ms, RepeatMode::Once),
        };
        self.progress = 0.0;
        self.finishing = false;
        self.animator = Some(
            ValueAnimator::new(0.0, 1.0, duration)
                .with_start_delay(delay)
                .with_repeat(repeat),
        );
    }

    /// Advance by `dt_ms` and return the item's new bounce state
    ///
    /// After the first bounce the animation starts from rest, so later cycles
    /// swing between the baseline and the nudge.
    pub fn tick(&mut self, dt_ms: u32) -> BounceState {
        if let Some(animator) = self.animator.as_mut() {
            let event = animator.tick(dt_ms);
            if event.repeated && !self.finishing {
                self.initial = self.baseline;
            }
            self.progress = event.value;
        }
        self.current()
    }

    /// Stop where it is
    pub const fn cancel(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.cancel();
        }
    }

    /// Whether nothing is left to play
    pub fn is_finished(&self) -> bool {
        self.animator.as_ref().is_none_or(|animator| !animator.is_running())
    }

    /// Return smoothly from the current state to rest
    ///
    /// The current state becomes the far end of a decelerating run back to the
    /// baseline, so the item never jumps.
    pub fn finish_animation(&mut self, settings: &PreviewSettings) {
        self.cancel();
        self.target = self.current();
        self.initial = self.baseline;
        self.progress = 1.0;
        self.finishing = true;
        self.animator = Some(
            ValueAnimator::new(1.0, 0.0, settings.finish_duration_ms).with_interpolator(
                Interpolator::Decelerate {
                    factor: DECELERATE_FACTOR,
                },
            ),
        );
    }
}

/// Pixel offset of the nudge for a centre-to-centre delta
///
/// Preview mode leans against the movement, hint mode along it. Diagonal offsets
/// are split by angle and truncated to whole pixels.
pub fn nudge_offset(delta_x: i32, delta_y: i32, mode: PreviewMode, magnitude: f32) -> (f32, f32) {
    let dir = match mode {
        PreviewMode::Hint => -1.0,
        PreviewMode::Preview => 1.0,
    };
    let sign_x = sign(f64::from(delta_x)) as f32;
    let sign_y = sign(f64::from(delta_y)) as f32;

    match (delta_x, delta_y) {
        (0, 0) => (0.0, 0.0),
        (_, 0) => (-dir * sign_x * magnitude, 0.0),
        (0, _) => (0.0, -dir * sign_y * magnitude),
        _ => {
            let angle = (delta_y as f32 / delta_x as f32).atan();
            let x = (-dir * sign_x * (angle.cos() * magnitude).abs()).trunc();
            let y = (-dir * sign_y * (angle.sin() * magnitude).abs()).trunc();
            (x, y)
        }
    }
}
