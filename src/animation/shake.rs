//! Per-gesture bookkeeping of running preview animations

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

use crate::algorithm::configuration::ItemConfiguration;
use crate::animation::preview::{
    BounceState, PreviewMode, PreviewSettings, ReorderPreviewAnimation,
};
use crate::spatial::cell::ItemId;
use crate::spatial::layout::CellLayout;

/// Running preview animations keyed by item, owned by one drag gesture
///
/// At most one animation per item is active. A replaced animation is either
/// cancelled or, when the replacement has nothing to show, moved to the finishing
/// list where it eases back to rest.
#[derive(Debug)]
pub struct ShakeAnimators {
    active: HashMap<ItemId, ReorderPreviewAnimation>,
    finishing: Vec<ReorderPreviewAnimation>,
    bounce: HashMap<ItemId, BounceState>,
    rng: StdRng,
    settings: PreviewSettings,
}

impl ShakeAnimators {
    /// Create an empty map with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(PreviewSettings::default(), seed)
    }

    /// Create an empty map with explicit settings
    pub fn with_settings(settings: PreviewSettings, seed: u64) -> Self {
        Self {
            active: HashMap::new(),
            finishing: Vec::new(),
            bounce: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            settings,
        }
    }

    /// Animation settings
    pub const fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Running animation for an item
    pub fn get(&self, item: ItemId) -> Option<&ReorderPreviewAnimation> {
        self.active.get(&item)
    }

    /// Number of items with an active animation
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of animations easing back to rest
    pub fn finishing_count(&self) -> usize {
        self.finishing.len()
    }

    /// Whether nothing is animating
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.finishing.is_empty()
    }

    /// Current bounce state of an item; rest if it never moved
    pub fn bounce_state(&self, item: ItemId) -> BounceState {
        self.bounce
            .get(&item)
            .copied()
            .unwrap_or_else(|| BounceState::baseline(self.settings.child_scale))
    }

    /// Install an animation, replacing any running one for the same item
    pub fn animate(&mut self, mut animation: ReorderPreviewAnimation) {
        let item = animation.item();
        let no_movement = !animation.has_movement();

        if let Some(mut old) = self.active.remove(&item) {
            if no_movement {
                old.finish_animation(&self.settings);
                self.finishing.retain(|other| other.item() != item);
                self.finishing.push(old);
                trace!(%item, "preview finished");
                return;
            }
            old.cancel();
        }
        if no_movement {
            return;
        }

        self.finishing.retain(|other| other.item() != item);
        animation.start(&mut self.rng, &self.settings);
        trace!(%item, mode = ?animation.mode(), "preview started");
        self.active.insert(item, animation);
    }

    /// Start or adjust animations for every item the solution places
    ///
    /// Hint mode only animates the items that overlapped the target.
    pub fn begin_or_adjust(
        &mut self,
        layout: &CellLayout,
        solution: &ItemConfiguration,
        drag: Option<ItemId>,
        mode: PreviewMode,
    ) {
        for placed in layout.items() {
            if Some(placed.id) == drag {
                continue;
            }
            let Some(target) = solution.get(placed.id) else {
                continue;
            };
            if mode == PreviewMode::Hint && !solution.intersecting_views.contains(&placed.id) {
                continue;
            }

            let animation = ReorderPreviewAnimation::new(
                layout,
                placed.id,
                mode,
                (placed.cell.cell_x, placed.cell.cell_y),
                target,
                self.bounce_state(placed.id),
                &self.settings,
            );
            self.animate(animation);
        }
    }

    /// Send every active animation back to rest
    pub fn complete_and_clear(&mut self) {
        let settings = self.settings;
        for (_, mut animation) in self.active.drain() {
            animation.finish_animation(&settings);
            self.finishing.push(animation);
        }
    }

    /// Advance every animation by `dt_ms`
    pub fn tick(&mut self, dt_ms: u32) {
        for (item, animation) in &mut self.active {
            self.bounce.insert(*item, animation.tick(dt_ms));
        }
        for animation in &mut self.finishing {
            self.bounce.insert(animation.item(), animation.tick(dt_ms));
        }
        self.finishing.retain(|animation| !animation.is_finished());
    }
}
