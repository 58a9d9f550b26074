//! Property-based invariant tests for enforcement and diagnostics.
//!
//! Verifies:
//! 1. After a pass, every candidate meets its threshold or sits at black/white
//! 2. A second pass makes zero writes
//! 3. Anything the audit still flags after a pass is pinned at black/white
//! 4. Every layered background gets at most one overlay
//! 5. Diagnostics never write

use petal_color::{Color, contrast_ratio, parse_color};
use petal_contrast::{
    ContrastEnforcer, ElementSpec, EnforcerConfig, MemoryTree, VisualTree, diagnose,
    effective_background,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn arb_background() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    prop_oneof![
        Just((None, None)),
        arb_color().prop_map(|c| (Some(c.to_string()), None)),
        (arb_color(), 0u8..255).prop_map(|(c, a)| {
            (Some(format!("rgba({}, {}, {}, {:.2})", c.r, c.g, c.b, f32::from(a) / 255.0)), None)
        }),
        (arb_color(), arb_color(), 0u16..360)
            .prop_map(|(a, b, deg)| (None, Some(format!("linear-gradient({deg}deg, {a}, {b})")))),
        Just((None, Some("url(photo.jpg)".to_string()))),
    ]
}

fn arb_element(depth: u32) -> BoxedStrategy<ElementSpec> {
    let tags = prop::sample::select(vec!["div", "p", "span", "section", "nav", "a", "h2"]);
    let classes = prop::sample::subsequence(vec!["hero", "card", "nav-link", "btn"], 0..2);
    let leaf = (tags, classes, arb_background(), prop::option::of(arb_color()), "[a-z ]{0,12}")
        .prop_map(|(tag, classes, (bg, image), color, text)| {
            let mut spec = ElementSpec::new(tag).text(&text);
            spec.classes = classes.into_iter().map(String::from).collect();
            spec.background = bg;
            spec.background_image = image;
            spec.color = color.map(|c| c.to_string());
            spec
        });
    if depth == 0 {
        return leaf.boxed();
    }
    (leaf, prop::collection::vec(arb_element(depth - 1), 0..4))
        .prop_map(|(mut spec, children)| {
            spec.children = children;
            spec
        })
        .boxed()
}

fn arb_tree() -> impl Strategy<Value = MemoryTree> {
    (arb_color(), arb_element(3)).prop_map(|(root_bg, body)| {
        MemoryTree::from_spec(ElementSpec::new("body").background(&root_bg.to_string()).child(body))
    })
}

fn foreground(tree: &MemoryTree, node: petal_contrast::NodeId) -> Color {
    parse_color(&tree.style(node).unwrap().color).unwrap().color
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Enforcement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn candidates_comply_or_hit_extreme(mut tree in arb_tree()) {
        let mut enforcer = ContrastEnforcer::new(EnforcerConfig::default());
        let report = enforcer.enforce(&mut tree).unwrap();
        prop_assert_eq!(report.skipped, 0);
        for i in 0..tree.len() {
            let node = petal_contrast::NodeId(i);
            if tree.inline_foreground(node).is_none() {
                continue;
            }
            let fg = foreground(&tree, node);
            let bg = effective_background(&tree, node).unwrap().color;
            let ok = contrast_ratio(bg, fg) >= 4.5 || fg == Color::BLACK || fg == Color::WHITE;
            prop_assert!(ok, "{} on {}", fg, bg);
        }
    }

    #[test]
    fn second_pass_is_silent(mut tree in arb_tree()) {
        let mut enforcer = ContrastEnforcer::new(EnforcerConfig::default());
        enforcer.enforce(&mut tree).unwrap();
        let writes = tree.writes();
        let again = enforcer.enforce(&mut tree).unwrap();
        prop_assert_eq!(tree.writes(), writes);
        prop_assert_eq!(again.adjusted, 0);
        prop_assert_eq!(again.overlays, 0);
    }

    #[test]
    fn audit_leftovers_are_extremes(mut tree in arb_tree()) {
        let mut enforcer = ContrastEnforcer::new(EnforcerConfig::default());
        enforcer.enforce(&mut tree).unwrap();
        let report = diagnose(&tree, 4.5).unwrap();
        for v in &report.violations {
            prop_assert!(v.foreground == Color::BLACK || v.foreground == Color::WHITE, "{:?}", v);
        }
    }

    #[test]
    fn at_most_one_overlay_per_owner(mut tree in arb_tree()) {
        let mut enforcer = ContrastEnforcer::new(EnforcerConfig::default());
        enforcer.enforce(&mut tree).unwrap();
        for i in 0..tree.len() {
            prop_assert!(tree.overlays(petal_contrast::NodeId(i)).len() <= 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Diagnostics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn diagnose_is_read_only(tree in arb_tree(), min in 1.0f64..21.0) {
        let report = diagnose(&tree, min).unwrap();
        prop_assert_eq!(tree.writes(), 0);
        prop_assert!(report.violations.iter().all(|v| v.ratio < min));
    }
}
