// SPDX-License-Identifier: MIT
//
// Enforcer configuration. Every field has a default, so `{}` is a valid
// config file.

use petal_theme::contrast::{AA, AAA};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// When to place an overlay over gradient and image backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPolicy {
    /// Whenever the background is a gradient or image.
    #[default]
    Always,
    /// Only when the corrected pair is still under its threshold.
    BelowThreshold,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnforcerConfig {
    pub min_ratio: f64,
    /// Threshold inside navigation and hero regions. `None` uses
    /// `min_ratio` everywhere.
    pub emphasis_min_ratio: Option<f64>,
    pub overlay_policy: OverlayPolicy,
    /// Opacity of the black overlay on light backgrounds.
    pub light_overlay_opacity: f32,
    /// Opacity of the white overlay on dark backgrounds.
    pub dark_overlay_opacity: f32,
    /// Pause between publishing a theme and re-checking the page.
    pub settle_delay_ms: u64,
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            min_ratio: AA,
            emphasis_min_ratio: Some(AAA),
            overlay_policy: OverlayPolicy::Always,
            light_overlay_opacity: 0.3,
            dark_overlay_opacity: 0.2,
            settle_delay_ms: 0,
        }
    }
}

impl EnforcerConfig {
    /// # Errors
    ///
    /// [`crate::ContrastError::Json`] on malformed JSON or unknown keys.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Same config with a different base threshold.
    #[must_use]
    pub const fn with_min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self
    }
}
