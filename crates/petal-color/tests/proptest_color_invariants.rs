//! Property-based invariant tests for the color model.
//!
//! Verifies:
//! 1. Hex roundtrip: hex_to_rgb(rgb_to_hex(c)) == c for every channel triple
//! 2. Luminance stays in [0, 1]
//! 3. Contrast is symmetric and stays in [1, 21]
//! 4. Blend endpoints return the inputs; output lies between them
//! 5. Brightness shifts move every channel in the requested direction
//! 6. Gradient average lies inside the per-channel stop range
//! 7. Serialized gradients parse back to the same stops

use petal_color::{
    Color, ColorStop, Gradient, adjust_brightness, blend, contrast_ratio, hex_to_rgb, luminance,
    parse_gradient, rgb_to_hex,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn arb_stops() -> impl Strategy<Value = Vec<ColorStop>> {
    prop::collection::vec((arb_color(), 0u8..=100), 1..6).prop_map(|stops| {
        stops
            .into_iter()
            .map(|(c, pos)| ColorStop::new(c, f32::from(pos)))
            .collect()
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Hex roundtrip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hex_roundtrip(c in arb_color()) {
        let hex = rgb_to_hex(f64::from(c.r), f64::from(c.g), f64::from(c.b));
        prop_assert_eq!(hex.len(), 7);
        prop_assert_eq!(hex_to_rgb(&hex), Some(c), "roundtrip failed for {}", hex);
    }

    #[test]
    fn hex_parse_never_panics(s in ".{0,12}") {
        let _ = hex_to_rgb(&s);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Luminance and contrast ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn luminance_in_unit_range(c in arb_color()) {
        let lum = luminance(c);
        prop_assert!((0.0..=1.0).contains(&lum), "luminance {} out of range", lum);
    }

    #[test]
    fn contrast_symmetric_and_bounded(a in arb_color(), b in arb_color()) {
        let ab = contrast_ratio(a, b);
        let ba = contrast_ratio(b, a);
        prop_assert!((ab - ba).abs() < 1e-12, "asymmetric: {} vs {}", ab, ba);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ab), "ratio {} out of range", ab);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Blend and brightness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn blend_endpoints(a in arb_color(), b in arb_color()) {
        prop_assert_eq!(blend(a, b, 100.0), a);
        prop_assert_eq!(blend(a, b, 0.0), b);
    }

    #[test]
    fn blend_stays_between_inputs(a in arb_color(), b in arb_color(), pct in 0.0f64..=100.0) {
        let mixed = blend(a, b, pct);
        for (m, (x, y)) in mixed.channels().into_iter().zip(a.channels().into_iter().zip(b.channels())) {
            prop_assert!(m >= x.min(y) && m <= x.max(y), "{} not between {} and {}", m, x, y);
        }
    }

    #[test]
    fn brightness_direction(c in arb_color(), pct in 0.0f64..=100.0) {
        let up = adjust_brightness(c, pct);
        let down = adjust_brightness(c, -pct);
        for ((u, d), o) in up.channels().into_iter().zip(down.channels()).zip(c.channels()) {
            prop_assert!(u >= o, "lighten lowered {} to {}", o, u);
            prop_assert!(d <= o, "darken raised {} to {}", o, d);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6–7. Gradients
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gradient_average_within_stop_range(stops in arb_stops()) {
        let gradient = Gradient::linear(90.0, stops);
        let avg = gradient.average().channels();
        let colors = gradient.stop_colors();
        for channel in 0..3 {
            let lo = colors.iter().map(|c| c.channels()[channel]).min().unwrap();
            let hi = colors.iter().map(|c| c.channels()[channel]).max().unwrap();
            prop_assert!(avg[channel] >= lo && avg[channel] <= hi);
        }
    }

    #[test]
    fn gradient_text_reparses(stops in arb_stops(), angle in 0u16..360) {
        let gradient = Gradient::linear(f32::from(angle), stops);
        let text = gradient.to_string();
        let back = parse_gradient(&text);
        prop_assert_eq!(back, Ok(gradient), "failed to reparse {}", text);
    }
}
