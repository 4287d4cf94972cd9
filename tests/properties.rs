//! Property-based tests for the composer and the history.
//!
//! 1. Hex encode/decode round-trips
//! 2. Lightening never darkens a channel
//! 3. Linked corners collapse to one radius value
//! 4. Minification is idempotent
//! 5. Generation is deterministic and never panics
//! 6. Undo then redo returns to the same present
//! 7. The history never exceeds its capacity

use card_styler::{
    composer::{minify::minify, rules::border_radius_value},
    generate, hex_to_rgb, lighten, to_hex, Corner, History, HistoryConfig, StyleConfig,
};
use palette::Srgb;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn color_strategy() -> impl Strategy<Value = Srgb<u8>> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Srgb::new(r, g, b))
}

fn corner_strategy() -> impl Strategy<Value = Corner> {
    prop_oneof![
        Just(Corner::TopLeft),
        Just(Corner::TopRight),
        Just(Corner::BottomLeft),
        Just(Corner::BottomRight),
    ]
}

/// A config with arbitrary, possibly malformed, form values.
fn config_strategy() -> impl Strategy<Value = StyleConfig> {
    (
        "\\PC{0,8}",
        "#[0-9a-f]{6}|[a-z#]{0,7}",
        "[0-9.]{0,5}",
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u8..=100,
    )
        .prop_map(
            |(width, color, opacity, hover, animations, minify, prefixes, card_opacity)| {
                let mut config = StyleConfig::default();
                config.card_width = width;
                config.bg_gradient_from = color.clone();
                config.shadow_color = color;
                config.bg_opacity_from = opacity.clone();
                config.shadow_y = opacity;
                config.enable_hover_effects = hover;
                config.enable_animations = animations;
                config.output.minify_css = minify;
                config.output.include_prefixes = prefixes;
                config.card_opacity = card_opacity;
                config
            },
        )
}

#[derive(Debug, Clone)]
enum Op {
    Record(u8),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Record),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

// ── Colors ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn hex_round_trip(color in color_strategy()) {
        let hex = to_hex(color);
        prop_assert_eq!(hex_to_rgb(&hex), Some(color));
        prop_assert_eq!(hex_to_rgb(&hex.to_uppercase()), Some(color));
    }

    #[test]
    fn lighten_is_monotonic(color in color_strategy(), percent in 0.0f64..200.0) {
        let lighter = hex_to_rgb(&lighten(&to_hex(color), percent)).unwrap();
        prop_assert!(lighter.red >= color.red);
        prop_assert!(lighter.green >= color.green);
        prop_assert!(lighter.blue >= color.blue);
    }
}

// ── Composer ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn linked_radius_is_single_value(corner in corner_strategy(), value in "[0-9]{1,3}") {
        let mut config = StyleConfig::default();
        config.set_corner(corner, value.clone());
        prop_assert!(config.corners_uniform());
        prop_assert_eq!(border_radius_value(&config), format!("{value}px"));
    }

    #[test]
    fn minify_is_idempotent(config in config_strategy()) {
        let once = minify(&generate(&config));
        prop_assert_eq!(minify(&once), once.clone());
    }

    #[test]
    fn generation_is_deterministic(config in config_strategy()) {
        let css = generate(&config);
        prop_assert_eq!(&css, &generate(&config));
        prop_assert!(css.contains(".obsidian-card"));
    }
}

// ── History ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn undo_redo_round_trip(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut history = History::new(0u8);
        for op in ops {
            match op {
                Op::Record(v) => { history.record(v); }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
            }
        }

        let before = *history.present();
        if history.undo().is_some() {
            prop_assert_eq!(history.redo().copied(), Some(before));
        }
        prop_assert_eq!(*history.present(), before);
    }

    #[test]
    fn record_clears_future(values in prop::collection::vec(1u8..=254, 2..20)) {
        let mut history = History::new(0u8);
        for v in &values {
            history.record(*v);
        }
        history.undo();
        prop_assert!(history.can_redo());
        // 255 never appears in the history, so this always changes the present
        history.record(255);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn capacity_is_enforced(max in 1usize..60, extra in 0usize..10) {
        let mut history = History::with_config(0usize, HistoryConfig::new(max));
        for i in 1..=max + extra {
            history.record(i);
        }
        prop_assert_eq!(history.past().len(), max);
        // oldest entries are the ones dropped
        prop_assert_eq!(history.past().next().copied(), Some(extra));
    }
}

#[test]
fn capacity_plus_five_drops_the_oldest() {
    let mut history = History::new(0usize);
    for i in 1..=55 {
        history.record(i);
    }
    assert_eq!(history.past().len(), 50);
    assert_eq!(history.past().next(), Some(&5));
}
