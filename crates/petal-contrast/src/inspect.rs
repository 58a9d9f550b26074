// SPDX-License-Identifier: MIT
//
// Resolve and measure one candidate. Shared by the enforcer and the
// diagnostic scan so both see the same numbers.

use petal_color::{Color, contrast_ratio, parse_color};

use crate::background::{EffectiveBackground, effective_background};
use crate::config::EnforcerConfig;
use crate::error::{ContrastError, Result};
use crate::select::{Candidate, Region};
use crate::tree::{NodeId, VisualTree};

/// Base and emphasis thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub base: f64,
    pub emphasis: Option<f64>,
}

impl Thresholds {
    /// One threshold for every region.
    #[must_use]
    pub const fn flat(min_ratio: f64) -> Self {
        Self { base: min_ratio, emphasis: None }
    }

    /// Emphasis regions never get a laxer threshold than the base.
    #[must_use]
    pub fn for_region(self, region: Region) -> f64 {
        match self.emphasis {
            Some(emphasis) if region.is_emphasis() => emphasis.max(self.base),
            _ => self.base,
        }
    }
}

impl From<&EnforcerConfig> for Thresholds {
    fn from(config: &EnforcerConfig) -> Self {
        Self { base: config.min_ratio, emphasis: config.emphasis_min_ratio }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub node: NodeId,
    pub background: EffectiveBackground,
    pub foreground: Color,
    pub ratio: f64,
    pub threshold: f64,
}

impl Measurement {
    #[must_use]
    pub fn passes(&self) -> bool {
        self.ratio >= self.threshold
    }
}

/// Measure `candidate` against its effective background.
///
/// The foreground is the computed color with alpha ignored.
///
/// # Errors
///
/// Unknown node or malformed style values.
pub fn measure<T: VisualTree + ?Sized>(
    tree: &T,
    candidate: Candidate,
    thresholds: Thresholds,
) -> Result<Measurement> {
    let style = tree.style(candidate.node).ok_or(ContrastError::UnknownNode(candidate.node))?;
    let foreground = parse_color(&style.color)?.color;
    let background = effective_background(tree, candidate.node)?;
    let ratio = contrast_ratio(background.color, foreground);
    Ok(Measurement {
        node: candidate.node,
        background,
        foreground,
        ratio,
        threshold: thresholds.for_region(candidate.region),
    })
}
