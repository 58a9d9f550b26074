//! Base palettes — the small set of designer-chosen colors a theme starts
//! from.
//!
//! A [`BaseTheme`] is input data (builtin presets or a JSON file). Optional
//! roles are filled in by [`BaseTheme::resolve`] so the expander always
//! works from a complete [`Palette`].

use petal_color::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// A theme's base colors as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseTheme {
    pub id: String,
    pub name: String,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_hover: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_tertiary: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_tertiary: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_light: Option<Color>,
}

/// Every base role, with optional ones derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub primary_hover: Color,
    pub secondary: Color,
    pub accent: Color,
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub border_light: Color,
}

impl BaseTheme {
    /// Parse a palette from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Json`] on malformed JSON, unknown fields, or a
    /// color that is not `#rrggbb`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ThemeError::Json)
    }

    /// Fill in the optional roles.
    ///
    /// - hover: primary darkened 20 %
    /// - tertiary background: secondary background pulled 10 % toward the text
    /// - tertiary text: secondary text pulled 30 % toward the page
    /// - light border: page pulled 15 % toward the text
    #[must_use]
    pub fn resolve(&self) -> Palette {
        Palette {
            primary: self.primary,
            primary_hover: self
                .primary_hover
                .unwrap_or_else(|| self.primary.adjust_brightness(-20.0)),
            secondary: self.secondary,
            accent: self.accent,
            bg_primary: self.bg_primary,
            bg_secondary: self.bg_secondary,
            bg_tertiary: self
                .bg_tertiary
                .unwrap_or_else(|| self.bg_secondary.blend(self.text_primary, 90.0)),
            text_primary: self.text_primary,
            text_secondary: self.text_secondary,
            text_tertiary: self
                .text_tertiary
                .unwrap_or_else(|| self.text_secondary.blend(self.bg_primary, 70.0)),
            border_light: self
                .border_light
                .unwrap_or_else(|| self.bg_primary.blend(self.text_primary, 85.0)),
        }
    }

    /// True when the page background is light.
    #[must_use]
    pub fn is_light(&self) -> bool {
        self.bg_primary.is_light()
    }
}
