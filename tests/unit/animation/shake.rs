//! Tests for per-gesture preview bookkeeping

#[cfg(test)]
mod tests {
    use gridreorder::algorithm::configuration::ItemConfiguration;
    use gridreorder::animation::preview::{
        BounceState, PreviewMode, PreviewSettings, ReorderPreviewAnimation,
    };
    use gridreorder::animation::shake::ShakeAnimators;
    use gridreorder::spatial::cell::{CellAndSpan, ItemId};
    use gridreorder::spatial::layout::CellLayout;

    const EPSILON: f32 = 1e-4;

    fn settings() -> PreviewSettings {
        PreviewSettings {
            max_start_delay_ms: 0,
            ..PreviewSettings::default()
        }
    }

    fn layout() -> CellLayout {
        let mut layout = CellLayout::new(4, 4).expect("valid grid");
        layout
            .add_item(CellAndSpan::new(1, 0, 1, 1), true)
            .expect("vacant cell");
        layout
            .add_item(CellAndSpan::new(0, 1, 1, 1), true)
            .expect("vacant cell");
        layout
    }

    fn nudge(layout: &CellLayout, item: ItemId, from: (i32, i32), to: CellAndSpan) -> ReorderPreviewAnimation {
        ReorderPreviewAnimation::new(
            layout,
            item,
            PreviewMode::Preview,
            from,
            &to,
            BounceState::default(),
            &settings(),
        )
    }

    // Tests that an animation with movement becomes active
    // Verified by dropping animations before inserting them
    #[test]
    fn test_animate_installs_active() {
        let layout = layout();
        let mut shake = ShakeAnimators::with_settings(settings(), 7);

        shake.animate(nudge(&layout, ItemId(0), (1, 0), CellAndSpan::new(2, 0, 1, 1)));

        assert_eq!(shake.active_count(), 1);
        assert_eq!(shake.finishing_count(), 0);
        assert!(shake.get(ItemId(0)).is_some());
        assert!(!shake.is_idle());
    }

    // Tests that a still replacement sends the running animation back to rest
    // Verified by cancelling the old animation instead of finishing it
    #[test]
    fn test_still_replacement_finishes_old() {
        let layout = layout();
        let mut shake = ShakeAnimators::with_settings(settings(), 7);
        shake.animate(nudge(&layout, ItemId(0), (1, 0), CellAndSpan::new(2, 0, 1, 1)));

        shake.animate(nudge(&layout, ItemId(0), (1, 0), CellAndSpan::new(1, 0, 1, 1)));

        assert_eq!(shake.active_count(), 0);
        assert_eq!(shake.finishing_count(), 1);
    }

    // Tests that a still animation for an idle item is ignored
    // Verified by installing animations without movement
    #[test]
    fn test_still_animation_ignored() {
        let layout = layout();
        let mut shake = ShakeAnimators::with_settings(settings(), 7);

        shake.animate(nudge(&layout, ItemId(1), (0, 1), CellAndSpan::new(0, 1, 1, 1)));

        assert!(shake.is_idle());
    }

    // Tests that hints only animate the items overlapping the target
    // Verified by ignoring intersecting_views in hint mode
    #[test]
    fn test_hint_animates_intersecting_only() {
        let layout = layout();
        let mut solution = ItemConfiguration::new();
        solution.add(ItemId(0), CellAndSpan::new(2, 0, 1, 1));
        solution.add(ItemId(1), CellAndSpan::new(0, 2, 1, 1));
        solution.intersecting_views = vec![ItemId(0)];

        let mut hint = ShakeAnimators::with_settings(settings(), 7);
        hint.begin_or_adjust(&layout, &solution, None, PreviewMode::Hint);
        assert_eq!(hint.active_count(), 1);
        assert!(hint.get(ItemId(0)).is_some());

        let mut preview = ShakeAnimators::with_settings(settings(), 7);
        preview.begin_or_adjust(&layout, &solution, None, PreviewMode::Preview);
        assert_eq!(preview.active_count(), 2);

        let mut dragging = ShakeAnimators::with_settings(settings(), 7);
        dragging.begin_or_adjust(&layout, &solution, Some(ItemId(1)), PreviewMode::Preview);
        assert_eq!(dragging.active_count(), 1);
        assert!(dragging.get(ItemId(1)).is_none());
    }

    // Tests that ticking records bounce states and clearing settles them
    // Verified by not advancing finishing animations
    #[test]
    fn test_tick_and_complete() {
        let layout = layout();
        let settings = settings();
        let mut shake = ShakeAnimators::with_settings(settings, 7);
        shake.animate(nudge(&layout, ItemId(0), (1, 0), CellAndSpan::new(2, 0, 1, 1)));

        shake.tick(settings.preview_duration_ms / 2);
        let leaning = shake.bounce_state(ItemId(0));
        assert!((leaning.offset_x + settings.magnitude / 2.0).abs() < EPSILON);

        shake.complete_and_clear();
        assert_eq!(shake.active_count(), 0);
        assert_eq!(shake.finishing_count(), 1);

        shake.tick(settings.finish_duration_ms);
        assert!(shake.is_idle());
        let rest = shake.bounce_state(ItemId(0));
        assert!(rest.offset_x.abs() < EPSILON);
        assert!((rest.scale - settings.child_scale).abs() < EPSILON);
    }

    // Tests the bounce state of an item that never moved
    // Verified by returning a zero scale for unknown items
    #[test]
    fn test_bounce_state_defaults_to_rest() {
        let shake = ShakeAnimators::new(7);

        assert_eq!(shake.bounce_state(ItemId(3)), BounceState::default());
        assert_eq!(shake.settings(), &PreviewSettings::default());
    }
}
