// SPDX-License-Identifier: MIT
//
// petal color model — 8-bit sRGB with WCAG 2.1 luminance and contrast.
//
// Single-character channel names (r, g, b) follow the usual color-science
// convention.
#![allow(clippy::many_single_char_names)]
//
// Everything here is pure. Colors are plain `Copy` values; nothing is cached
// because every derived quantity is a handful of float operations.
//
// Brightness and blending work on the gamma-encoded channels, the same
// space stylesheet authors think in. Only luminance linearizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CssError;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use petal_color::Color;
///
/// let teal = Color::hex("#0d9488").unwrap();
/// assert_eq!(teal.to_string(), "#0d9488");
/// assert!(teal.contrast(Color::WHITE) > 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from float channels on the 0–255 scale.
    ///
    /// Values are rounded to the nearest integer and clamped.
    #[must_use]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Parse a 6-digit hex color, with or without the leading `#`.
    ///
    /// Case-insensitive. Anything else yields `None`.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();
        if digits.len() != 6 {
            return None;
        }
        Some(Self::rgb(
            parse_hex_byte(&digits[0..2])?,
            parse_hex_byte(&digits[2..4])?,
            parse_hex_byte(&digits[4..6])?,
        ))
    }

    /// `#rrggbb`, lowercase, always seven characters.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// WCAG 2.1 relative luminance in `[0.0, 1.0]`.
    #[must_use]
    pub fn luminance(self) -> f64 {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }

    /// WCAG 2.1 contrast ratio against `other`, in `[1.0, 21.0]`.
    ///
    /// Symmetric in its arguments.
    #[must_use]
    pub fn contrast(self, other: Self) -> f64 {
        let la = self.luminance();
        let lb = other.luminance();
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// True when luminance is strictly above one half.
    #[must_use]
    pub fn is_light(self) -> bool {
        self.luminance() > 0.5
    }

    /// Linear interpolation per channel. `percent_of_self` is clamped to
    /// `[0, 100]`; 100 returns `self`, 0 returns `other`.
    #[must_use]
    pub fn blend(self, other: Self, percent_of_self: f64) -> Self {
        let t = percent_of_self.clamp(0.0, 100.0) / 100.0;
        let mix = |a: u8, b: u8| f64::from(a).mul_add(t, f64::from(b) * (1.0 - t));
        Self::from_f64(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Move every channel toward 255 (positive `percent`) or 0 (negative)
    /// by that fraction of the remaining distance. Clamped to `[-100, 100]`.
    #[must_use]
    pub fn adjust_brightness(self, percent: f64) -> Self {
        let p = percent.clamp(-100.0, 100.0) / 100.0;
        let shift = |c: u8| {
            let c = f64::from(c);
            if p >= 0.0 {
                (255.0 - c).mul_add(p, c)
            } else {
                c.mul_add(p, c)
            }
        };
        Self::from_f64(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Subtract `step` from every channel, saturating at 0.
    #[must_use]
    pub const fn darken_by(self, step: u8) -> Self {
        Self::rgb(
            self.r.saturating_sub(step),
            self.g.saturating_sub(step),
            self.b.saturating_sub(step),
        )
    }

    /// Add `step` to every channel, saturating at 255.
    #[must_use]
    pub const fn lighten_by(self, step: u8) -> Self {
        Self::rgb(
            self.r.saturating_add(step),
            self.g.saturating_add(step),
            self.b.saturating_add(step),
        )
    }

    /// Per-channel arithmetic mean, rounded. An empty slice averages to white.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(colors: &[Self]) -> Self {
        if colors.is_empty() {
            return Self::WHITE;
        }
        let n = colors.len() as f64;
        let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
            (r + u32::from(c.r), g + u32::from(c.g), b + u32::from(c.b))
        });
        Self::from_f64(f64::from(r) / n, f64::from(g) / n, f64::from(b) / n)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = CssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::hex(trimmed)
            .ok_or_else(|| CssError::InvalidHex(trimmed.trim_start_matches('#').to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Free-function surface ───────────────────────────────────────────────────

/// Parse `#rrggbb` / `rrggbb` into a color.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Color> {
    Color::hex(hex)
}

/// Format float channels as `#rrggbb`, rounding and clamping each.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Color::from_f64(r, g, b).to_hex()
}

#[must_use]
pub fn luminance(color: Color) -> f64 {
    color.luminance()
}

#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    a.contrast(b)
}

#[must_use]
pub fn is_light(color: Color) -> bool {
    color.is_light()
}

#[must_use]
pub fn blend(a: Color, b: Color, percent_of_a: f64) -> Color {
    a.blend(b, percent_of_a)
}

#[must_use]
pub fn adjust_brightness(color: Color, percent: f64) -> Color {
    color.adjust_brightness(percent)
}

/// Linearize one gamma-encoded channel (WCAG threshold 0.03928).
#[must_use]
pub fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

pub(crate) const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
pub(crate) fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(*bytes.first()?)?;
    let lo = parse_hex_digit(*bytes.get(1)?)?;
    Some(hi << 4 | lo)
}

/// Round and clamp a 0–255 float to a channel byte.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // NaN saturates to 0 through the cast.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Hex ─────────────────────────────────────────────────────────

    #[test]
    fn hex_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(hex_to_rgb("ff8000"), Some(Color::rgb(255, 128, 0)));
    }

    #[test]
    fn hex_is_case_insensitive() {
        assert_eq!(hex_to_rgb("#ABCDEF"), hex_to_rgb("#abcdef"));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "#gg0000", "rgb(0,0,0)", "#ffé000"] {
            assert_eq!(hex_to_rgb(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn rgb_to_hex_rounds_and_clamps() {
        assert_eq!(rgb_to_hex(127.5, 0.4, 254.6), "#8000ff");
        assert_eq!(rgb_to_hex(-20.0, 300.0, 16.0), "#00ff10");
        assert_eq!(rgb_to_hex(f64::NAN, 0.0, 0.0), "#000000");
    }

    #[test]
    fn display_is_seven_chars() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn from_str_reports_bad_hex() {
        let err = "#zzzzzz".parse::<Color>().unwrap_err();
        assert_eq!(err, CssError::InvalidHex("zzzzzz".into()));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(16, 32, 48)).unwrap();
        assert_eq!(json, "\"#102030\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(16, 32, 48));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    // ── Luminance & contrast ────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(Color::BLACK.luminance(), 0.0, 1e-9));
        assert!(approx_eq(Color::WHITE.luminance(), 1.0, 1e-9));
    }

    #[test]
    fn luminance_pure_green() {
        let lum = luminance(Color::rgb(0, 255, 0));
        assert!(approx_eq(lum, 0.7152, 1e-9), "Green luminance: {lum}");
    }

    #[test]
    fn low_channels_use_linear_segment() {
        // 10/255 = 0.0392 sits just under the 0.03928 knee.
        let lin = srgb_to_linear(10);
        assert!(approx_eq(lin, 10.0 / 255.0 / 12.92, 1e-12), "{lin}");
    }

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Color::rgb(90, 140, 200);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-12));
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::rgb(204, 51, 77);
        let b = Color::rgb(26, 26, 102);
        assert!(approx_eq(a.contrast(b), b.contrast(a), 1e-12));
    }

    #[test]
    fn grey_777_on_white_is_just_under_aa() {
        let ratio = Color::rgb(0x77, 0x77, 0x77).contrast(Color::WHITE);
        assert!(ratio > 4.4 && ratio < 4.5, "#777 on white: {ratio}");
    }

    #[test]
    fn is_light_threshold() {
        assert!(is_light(Color::WHITE));
        assert!(!is_light(Color::BLACK));
        // Mid grey is perceptually middling but well under 0.5 luminance.
        assert!(!is_light(Color::rgb(128, 128, 128)));
    }

    // ── Blend & brightness ──────────────────────────────────────────

    #[test]
    fn blend_endpoints_and_midpoint() {
        let a = Color::rgb(200, 100, 0);
        let b = Color::rgb(0, 100, 200);
        assert_eq!(blend(a, b, 100.0), a);
        assert_eq!(blend(a, b, 0.0), b);
        assert_eq!(blend(a, b, 50.0), Color::rgb(100, 100, 100));
        assert_eq!(blend(a, b, 250.0), a);
    }

    #[test]
    fn brightness_moves_toward_extremes() {
        let c = Color::rgb(100, 200, 0);
        assert_eq!(adjust_brightness(c, 50.0), Color::rgb(178, 228, 128));
        assert_eq!(adjust_brightness(c, -50.0), Color::rgb(50, 100, 0));
        assert_eq!(adjust_brightness(c, 100.0), Color::WHITE);
        assert_eq!(adjust_brightness(c, -100.0), Color::BLACK);
        assert_eq!(adjust_brightness(c, 0.0), c);
    }

    #[test]
    fn saturating_steps() {
        assert_eq!(Color::rgb(3, 100, 255).darken_by(5), Color::rgb(0, 95, 250));
        assert_eq!(Color::rgb(3, 100, 252).lighten_by(5), Color::rgb(8, 105, 255));
    }

    // ── Average ─────────────────────────────────────────────────────

    #[test]
    fn average_black_white_is_808080() {
        assert_eq!(Color::average(&[Color::BLACK, Color::WHITE]).to_hex(), "#808080");
    }

    #[test]
    fn average_of_nothing_is_white() {
        assert_eq!(Color::average(&[]), Color::WHITE);
    }
}
