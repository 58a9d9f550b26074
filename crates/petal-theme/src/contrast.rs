//! Accessible text color search.
//!
//! Thresholds follow WCAG 2.1:
//!
//! - Body text: contrast ratio >= 4.5:1 (AA)
//! - Prominent text (navigation, hero titles, buttons, links): >= 7:1 (AAA)
//! - Non-text UI glyphs and muted captions: >= 3:1
//! - Decorative borders: >= 1.5:1
//!
//! The search walks a seed color in fixed steps of 5 per channel toward
//! black or white, so results stay close to the designer's hue for as long
//! as possible and always terminate.

use petal_color::{Color, Gradient, contrast_ratio, luminance};

/// WCAG AA for normal text.
pub const AA: f64 = 4.5;
/// WCAG AAA for normal text.
pub const AAA: f64 = 7.0;
/// Non-text UI components.
pub const UI: f64 = 3.0;
/// Decorative separators and borders.
pub const BORDER: f64 = 1.5;

/// Per-channel change applied on each search step.
pub const SEARCH_STEP: u8 = 5;
/// Step budget. 51 × 5 covers the full 0–255 channel range.
pub const SEARCH_ITERATIONS: usize = 51;

/// Return the first candidate reaching `min_ratio` against `bg`.
///
/// When none does, the first candidate is handed to
/// [`adjust_for_contrast`]. An empty candidate list yields whichever of
/// black or white contrasts better.
#[must_use]
pub fn pick_first_meeting_threshold(bg: Color, candidates: &[Color], min_ratio: f64) -> Color {
    let Some(&first) = candidates.first() else {
        return better_extreme(bg);
    };
    candidates
        .iter()
        .copied()
        .find(|&c| contrast_ratio(bg, c) >= min_ratio)
        .unwrap_or_else(|| adjust_for_contrast(bg, first, min_ratio))
}

/// Step `seed` away from `bg` until the pair reaches `min_ratio`.
///
/// Direction: darken when `bg` is lighter than the seed, otherwise lighten.
/// Every channel moves by [`SEARCH_STEP`] (saturating) per iteration and
/// the ratio is re-checked after each step; the first compliant color wins.
/// If the budget runs out the pure extreme in the chosen direction is
/// returned. Never fails, and a compliant seed comes back unchanged.
#[must_use]
pub fn adjust_for_contrast(bg: Color, seed: Color, min_ratio: f64) -> Color {
    if contrast_ratio(bg, seed) >= min_ratio {
        return seed;
    }

    let darken = luminance(bg) > luminance(seed);
    let mut candidate = seed;
    for _ in 0..SEARCH_ITERATIONS {
        candidate = if darken {
            candidate.darken_by(SEARCH_STEP)
        } else {
            candidate.lighten_by(SEARCH_STEP)
        };
        if contrast_ratio(bg, candidate) >= min_ratio {
            return candidate;
        }
    }

    if darken { Color::BLACK } else { Color::WHITE }
}

/// Black or white, whichever contrasts more with `bg`. Ties go to black.
#[must_use]
pub fn better_extreme(bg: Color) -> Color {
    if contrast_ratio(bg, Color::BLACK) >= contrast_ratio(bg, Color::WHITE) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Best contrast any text color can reach on `bg`.
#[must_use]
pub fn headroom(bg: Color) -> f64 {
    contrast_ratio(bg, better_extreme(bg))
}

/// [`pick_first_meeting_threshold`], falling back to the better extreme
/// when the search result is still below `min_ratio`.
///
/// On a background with [`headroom`] of at least `min_ratio` the result is
/// always compliant.
#[must_use]
pub fn pick_readable(bg: Color, preferred: &[Color], min_ratio: f64) -> Color {
    let picked = pick_first_meeting_threshold(bg, preferred, min_ratio);
    if contrast_ratio(bg, picked) >= min_ratio {
        picked
    } else {
        better_extreme(bg)
    }
}

/// Nudge a background until some text color can reach `min_ratio` on it.
///
/// Mid-luminance backgrounds cap out around 4.6:1 against either extreme,
/// so AAA text on them is impossible. The background is moved away from
/// its better text extreme with the same stepping search, which guarantees
/// headroom for any `min_ratio <= 21`.
#[must_use]
pub fn ensure_headroom(bg: Color, min_ratio: f64) -> Color {
    if headroom(bg) >= min_ratio {
        return bg;
    }
    adjust_for_contrast(better_extreme(bg), bg, min_ratio)
}

/// Rounds of ±10 % brightness applied by [`ensure_gradient_headroom`].
pub const GRADIENT_ROUNDS: usize = 50;

/// Gradient counterpart of [`ensure_headroom`]: shift every stop by 10 %
/// brightness per round until the stop average has headroom for
/// `min_ratio`.
///
/// Stops are lightened when the average already favours black text and
/// darkened otherwise. Stop positions and alpha are kept.
#[must_use]
pub fn ensure_gradient_headroom(gradient: &Gradient, min_ratio: f64) -> Gradient {
    let mut current = gradient.clone();
    if headroom(current.average()) >= min_ratio {
        return current;
    }
    let percent = if better_extreme(current.average()) == Color::BLACK { 10.0 } else { -10.0 };
    for _ in 0..GRADIENT_ROUNDS {
        current = current.map_colors(|c| c.adjust_brightness(percent));
        if headroom(current.average()) >= min_ratio {
            break;
        }
    }
    current
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use petal_color::ColorStop;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> Color {
        Color::hex(s).unwrap()
    }

    // ── adjust_for_contrast ─────────────────────────────────────────

    #[test]
    fn compliant_seed_is_returned_unchanged() {
        let seed = hex("#1e293b");
        assert_eq!(adjust_for_contrast(Color::WHITE, seed, AA), seed);
    }

    #[test]
    fn grey_on_white_darkens_to_first_compliant_step() {
        // #777777 sits just under 4.5 on white; one step of 5 clears it.
        let adjusted = adjust_for_contrast(Color::WHITE, hex("#777777"), AA);
        assert_eq!(adjusted, hex("#727272"));
        let ratio = contrast_ratio(Color::WHITE, adjusted);
        assert!(ratio >= AA, "Adjusted ratio: {ratio}");
    }

    #[test]
    fn dark_on_dark_lightens() {
        let bg = hex("#111827");
        let adjusted = adjust_for_contrast(bg, hex("#374151"), AA);
        assert!(adjusted.luminance() > hex("#374151").luminance());
        let ratio = contrast_ratio(bg, adjusted);
        assert!(ratio >= AA, "Dark background ratio: {ratio}");
    }

    #[test]
    fn unreachable_target_falls_back_to_extreme() {
        // Only black on white reaches 21:1, so both searches run dry.
        let bg = hex("#777777");
        let adjusted = adjust_for_contrast(bg, hex("#808080"), 21.0);
        assert_eq!(adjusted, Color::WHITE);
        let adjusted = adjust_for_contrast(bg, hex("#606060"), 21.0);
        assert_eq!(adjusted, Color::BLACK);
    }

    #[test]
    fn near_black_on_black_lightens_to_aaa() {
        let seed = hex("#111111");
        let adjusted = adjust_for_contrast(Color::BLACK, seed, AAA);
        assert!(adjusted.luminance() > seed.luminance());
        let ratio = contrast_ratio(Color::BLACK, adjusted);
        assert!(ratio >= AAA, "Black background ratio: {ratio}");
    }

    #[test]
    fn adjustment_is_idempotent() {
        let bg = hex("#fce7f3");
        let once = adjust_for_contrast(bg, hex("#f472b6"), AAA);
        assert_eq!(adjust_for_contrast(bg, once, AAA), once);
    }

    // ── pick_first_meeting_threshold ────────────────────────────────

    #[test]
    fn first_compliant_candidate_wins() {
        let pick = pick_first_meeting_threshold(
            Color::WHITE,
            &[hex("#eeeeee"), hex("#333333"), Color::BLACK],
            AA,
        );
        assert_eq!(pick, hex("#333333"));
    }

    #[test]
    fn pink_on_white_darkens_to_aa() {
        let seed = hex("#ec4899");
        assert!(contrast_ratio(Color::WHITE, seed) < AA);
        let pick = pick_first_meeting_threshold(Color::WHITE, &[seed], AA);
        assert!(pick.luminance() < seed.luminance());
        let ratio = contrast_ratio(Color::WHITE, pick);
        assert!(ratio >= AA, "Pink ratio: {ratio}");
    }

    #[test]
    fn no_compliant_candidate_adjusts_the_first() {
        let pick = pick_first_meeting_threshold(Color::WHITE, &[hex("#eeeeee"), hex("#dddddd")], AA);
        assert!(contrast_ratio(Color::WHITE, pick) >= AA);
        assert_eq!(pick, adjust_for_contrast(Color::WHITE, hex("#eeeeee"), AA));
    }

    #[test]
    fn empty_candidates_pick_better_extreme() {
        assert_eq!(pick_first_meeting_threshold(Color::WHITE, &[], AA), Color::BLACK);
        assert_eq!(pick_first_meeting_threshold(hex("#0f172a"), &[], AA), Color::WHITE);
    }

    // ── headroom ────────────────────────────────────────────────────

    #[test]
    fn mid_luminance_background_lacks_aaa_headroom() {
        let bg = hex("#777777");
        assert!(headroom(bg) < AAA, "Headroom: {}", headroom(bg));
        let anchored = ensure_headroom(bg, AAA);
        assert!(headroom(anchored) >= AAA, "Anchored headroom: {}", headroom(anchored));
        let text = pick_readable(anchored, &[hex("#888888")], AAA);
        assert!(contrast_ratio(anchored, text) >= AAA);
    }

    #[test]
    fn headroom_leaves_extreme_backgrounds_alone() {
        assert_eq!(ensure_headroom(hex("#fefbff"), AAA), hex("#fefbff"));
        assert_eq!(ensure_headroom(hex("#020617"), AAA), hex("#020617"));
    }

    #[test]
    fn pick_readable_falls_back_when_search_stalls() {
        // The stepping search may stall short of 7:1; the extreme fallback
        // covers it once the background is anchored.
        let bg = ensure_headroom(hex("#777777"), AAA);
        let text = pick_readable(bg, &[hex("#999999")], AAA);
        assert!(contrast_ratio(bg, text) >= AAA);
    }

    #[test]
    fn gradient_headroom_shifts_every_stop() {
        let gradient = Gradient::linear(
            135.0,
            vec![ColorStop::new(hex("#db2777"), 0.0), ColorStop::new(hex("#2563eb"), 100.0)],
        );
        assert!(headroom(gradient.average()) < AAA);
        let anchored = ensure_gradient_headroom(&gradient, AAA);
        assert_eq!(anchored.stops.len(), 2);
        assert_eq!(anchored.stops[1].position, Some(100.0));
        assert!(headroom(anchored.average()) >= AAA);
    }
}
