// SPDX-License-Identifier: MIT
//
// The contrast enforcer.
//
// A pass selects candidates under a root, measures each against its
// effective background, and rewrites the inline foreground of any that
// fall short with the nearest compliant color. Gradient and image
// backgrounds also get one translucent overlay on the element that paints
// them.
//
// The enforcer remembers which nodes it recolored and which background
// owners it overlaid. A second pass over an unchanged tree finds every
// candidate compliant and every overlay already placed, so it writes
// nothing. `reset` undoes all of it before a theme change.

use std::collections::{BTreeMap, BTreeSet};

use petal_color::{Color, contrast_ratio};
use petal_theme::contrast::adjust_for_contrast;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::{EnforcerConfig, OverlayPolicy};
use crate::error::{ContrastError, Result};
use crate::inspect::{Thresholds, measure};
use crate::select::{Candidate, Region, ancestor_region, select};
use crate::tree::{NodeId, Overlay, OverlayId, VisualTreeMut};

/// Counts from one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnforcementReport {
    /// Visible elements walked.
    pub examined: usize,
    pub selected: usize,
    /// Foregrounds rewritten.
    pub adjusted: usize,
    /// Overlays inserted.
    pub overlays: usize,
    /// Elements abandoned after a per-element error.
    pub skipped: usize,
}

/// What happened to one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeOutcome {
    /// New foreground, when one was written.
    pub recolored: Option<Color>,
    pub overlaid: bool,
    /// Ratio after correction.
    pub ratio: f64,
    pub threshold: f64,
}

/// Enforces contrast on one tree.
///
/// Node ids are remembered between passes, so an enforcer belongs to the
/// tree it ran on. When that tree is replaced wholesale (for example by
/// [`MemoryTree::set_root`](crate::MemoryTree::set_root)), call
/// [`forget`](Self::forget) before the next pass; `reset` would otherwise
/// write to whatever nodes now carry those ids.
#[derive(Debug, Clone, Default)]
pub struct ContrastEnforcer {
    config: EnforcerConfig,
    recolored: BTreeSet<NodeId>,
    overlays: BTreeMap<NodeId, OverlayId>,
}

impl ContrastEnforcer {
    #[must_use]
    pub fn new(config: EnforcerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub const fn config(&self) -> &EnforcerConfig {
        &self.config
    }

    /// Nodes whose foreground this enforcer has overridden.
    pub fn recolored(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.recolored.iter().copied()
    }

    /// Background owners carrying one of this enforcer's overlays.
    pub fn overlaid(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.overlays.keys().copied()
    }

    /// Full pass from the document root.
    ///
    /// # Errors
    ///
    /// [`ContrastError::NoRoot`] when the tree has no root. Per-element
    /// failures are logged and counted in [`EnforcementReport::skipped`].
    pub fn enforce<T: VisualTreeMut + ?Sized>(&mut self, tree: &mut T) -> Result<EnforcementReport> {
        let root = tree.document_root().ok_or(ContrastError::NoRoot)?;
        self.enforce_subtree(tree, root)
    }

    /// Pass over `root` and its descendants with the configured tiers.
    ///
    /// # Errors
    ///
    /// [`ContrastError::UnknownNode`] when `root` is not in the tree.
    pub fn enforce_subtree<T: VisualTreeMut + ?Sized>(
        &mut self,
        tree: &mut T,
        root: NodeId,
    ) -> Result<EnforcementReport> {
        let thresholds = Thresholds::from(&self.config);
        self.enforce_subtree_with(tree, root, thresholds)
    }

    /// Pass over a subtree with explicit thresholds, for targeted passes
    /// such as a form or the navigation bar.
    ///
    /// # Errors
    ///
    /// [`ContrastError::UnknownNode`] when `root` is not in the tree.
    pub fn enforce_subtree_with<T: VisualTreeMut + ?Sized>(
        &mut self,
        tree: &mut T,
        root: NodeId,
        thresholds: Thresholds,
    ) -> Result<EnforcementReport> {
        let _span = info_span!("enforce", %root).entered();
        let selection = select(&*tree, root)?;
        let mut report = EnforcementReport {
            examined: selection.examined,
            selected: selection.candidates.len(),
            ..EnforcementReport::default()
        };
        for candidate in selection.candidates {
            match self.process(tree, candidate, thresholds) {
                Ok(outcome) => {
                    report.adjusted += usize::from(outcome.recolored.is_some());
                    report.overlays += usize::from(outcome.overlaid);
                }
                Err(err) => {
                    warn!(node = %candidate.node, error = %err, "skipping element");
                    report.skipped += 1;
                }
            }
        }
        info!(
            examined = report.examined,
            selected = report.selected,
            adjusted = report.adjusted,
            overlays = report.overlays,
            skipped = report.skipped,
            "contrast pass complete"
        );
        Ok(report)
    }

    /// Check and fix a single element, whether or not a walk would select
    /// it. Its region includes every ancestor's.
    ///
    /// # Errors
    ///
    /// Unknown node or malformed style values, returned rather than logged.
    pub fn enforce_node<T: VisualTreeMut + ?Sized>(&mut self, tree: &mut T, node: NodeId) -> Result<NodeOutcome> {
        let meta = tree.meta(node).ok_or(ContrastError::UnknownNode(node))?;
        let region = ancestor_region(&*tree, node) | Region::of(meta);
        let thresholds = Thresholds::from(&self.config);
        self.process(tree, Candidate { node, region }, thresholds)
    }

    fn process<T: VisualTreeMut + ?Sized>(
        &mut self,
        tree: &mut T,
        candidate: Candidate,
        thresholds: Thresholds,
    ) -> Result<NodeOutcome> {
        let m = measure(&*tree, candidate, thresholds)?;
        let mut outcome = NodeOutcome { recolored: None, overlaid: false, ratio: m.ratio, threshold: m.threshold };

        if !m.passes() {
            let corrected = adjust_for_contrast(m.background.color, m.foreground, m.threshold);
            if corrected != m.foreground {
                tree.set_foreground(candidate.node, corrected)?;
                self.recolored.insert(candidate.node);
                outcome.recolored = Some(corrected);
                outcome.ratio = contrast_ratio(m.background.color, corrected);
                debug!(
                    node = %candidate.node,
                    background = %m.background.color,
                    from = %m.foreground,
                    to = %corrected,
                    before = m.ratio,
                    after = outcome.ratio,
                    threshold = m.threshold,
                    "foreground adjusted"
                );
            }
        }

        if let (true, Some(owner)) = (m.background.is_layered(), m.background.source) {
            let wanted = match self.config.overlay_policy {
                OverlayPolicy::Always => true,
                OverlayPolicy::BelowThreshold => outcome.ratio < m.threshold,
                OverlayPolicy::Never => false,
            };
            if wanted && !self.overlays.contains_key(&owner) {
                let overlay = self.overlay_for(m.background.color);
                let id = tree.insert_overlay(owner, overlay)?;
                self.overlays.insert(owner, id);
                outcome.overlaid = true;
                debug!(%owner, color = %overlay.color, opacity = overlay.opacity, "overlay inserted");
            }
        }

        Ok(outcome)
    }

    /// Black on light backgrounds, white on dark ones.
    fn overlay_for(&self, background: Color) -> Overlay {
        if background.is_light() {
            Overlay { color: Color::BLACK, opacity: self.config.light_overlay_opacity }
        } else {
            Overlay { color: Color::WHITE, opacity: self.config.dark_overlay_opacity }
        }
    }

    /// Remove every overlay and foreground override this enforcer made.
    /// Returns the number of writes undone.
    pub fn reset<T: VisualTreeMut + ?Sized>(&mut self, tree: &mut T) -> usize {
        let mut undone = 0;
        for (owner, id) in std::mem::take(&mut self.overlays) {
            match tree.remove_overlay(owner, id) {
                Ok(()) => undone += 1,
                Err(err) => warn!(%owner, error = %err, "overlay already gone"),
            }
        }
        for node in std::mem::take(&mut self.recolored) {
            match tree.clear_foreground(node) {
                Ok(()) => undone += 1,
                Err(err) => warn!(%node, error = %err, "could not clear foreground"),
            }
        }
        if undone > 0 {
            info!(undone, "previous contrast fixes removed");
        }
        undone
    }

    /// Drop every remembered node without touching any tree. Returns how
    /// many entries were dropped.
    pub fn forget(&mut self) -> usize {
        let dropped = self.recolored.len() + self.overlays.len();
        self.recolored.clear();
        self.overlays.clear();
        if dropped > 0 {
            debug!(dropped, "enforcer state dropped");
        }
        dropped
    }
}
