// SPDX-License-Identifier: MIT
//
// Read-only contrast audit. Same selection and measurement as the
// enforcer, but reports failures instead of fixing them.

use std::fmt::Write as _;

use petal_color::Color;
use petal_theme::contrast::UI;
use serde::Serialize;
use tracing::{info, info_span, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{ContrastError, Result};
use crate::inspect::{Thresholds, measure};
use crate::select::select;
use crate::tree::{NodeId, VisualTree};

/// Graphemes of element text kept in a descriptor.
const PREVIEW_GRAPHEMES: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastViolation {
    pub node: NodeId,
    /// `tag#id.class "text preview"`.
    pub descriptor: String,
    pub background: Color,
    pub foreground: Color,
    pub ratio: f64,
    pub threshold: f64,
}

impl ContrastViolation {
    /// Below the 3:1 floor for any text at all.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.ratio < UI
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub elements_checked: usize,
    pub violations: Vec<ContrastViolation>,
    /// Elements that could not be measured.
    pub skipped: usize,
}

impl DiagnosticReport {
    pub fn critical(&self) -> impl Iterator<Item = &ContrastViolation> {
        self.violations.iter().filter(|v| v.is_critical())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Human-readable label for an element.
#[must_use]
pub fn describe<T: VisualTree + ?Sized>(tree: &T, node: NodeId) -> String {
    let mut out = tree.meta(node).map_or_else(|| node.to_string(), ToString::to_string);
    let text = tree.text(node);
    let text = text.trim();
    if !text.is_empty() {
        let mut graphemes = text.graphemes(true);
        let preview: String = graphemes.by_ref().take(PREVIEW_GRAPHEMES).collect();
        let ellipsis = if graphemes.next().is_some() { "…" } else { "" };
        let _ = write!(out, " \"{preview}{ellipsis}\"");
    }
    out
}

/// Every candidate under `root` below `min_ratio`. Emphasis regions are
/// not treated specially.
///
/// # Errors
///
/// [`ContrastError::UnknownNode`] when `root` is not in the tree.
pub fn scan<T: VisualTree + ?Sized>(tree: &T, root: NodeId, min_ratio: f64) -> Result<Vec<ContrastViolation>> {
    Ok(scan_with(tree, root, Thresholds::flat(min_ratio))?.violations)
}

/// Audit under `root` with tiered thresholds.
///
/// # Errors
///
/// [`ContrastError::UnknownNode`] when `root` is not in the tree.
pub fn scan_with<T: VisualTree + ?Sized>(tree: &T, root: NodeId, thresholds: Thresholds) -> Result<DiagnosticReport> {
    let _span = info_span!("diagnose", %root).entered();
    let selection = select(tree, root)?;
    let mut report = DiagnosticReport { elements_checked: selection.candidates.len(), ..DiagnosticReport::default() };
    for candidate in selection.candidates {
        match measure(tree, candidate, thresholds) {
            Ok(m) if !m.passes() => report.violations.push(ContrastViolation {
                node: m.node,
                descriptor: describe(tree, m.node),
                background: m.background.color,
                foreground: m.foreground,
                ratio: m.ratio,
                threshold: m.threshold,
            }),
            Ok(_) => {}
            Err(err) => {
                warn!(node = %candidate.node, error = %err, "could not measure element");
                report.skipped += 1;
            }
        }
    }
    info!(
        checked = report.elements_checked,
        violations = report.violations.len(),
        critical = report.critical().count(),
        "contrast audit complete"
    );
    Ok(report)
}

/// Audit the whole document at a flat `min_ratio`.
///
/// # Errors
///
/// [`ContrastError::NoRoot`] when the tree has no root.
pub fn diagnose<T: VisualTree + ?Sized>(tree: &T, min_ratio: f64) -> Result<DiagnosticReport> {
    let root = tree.document_root().ok_or(ContrastError::NoRoot)?;
    scan_with(tree, root, Thresholds::flat(min_ratio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, MemoryTree};
    use pretty_assertions::assert_eq;

    fn page() -> MemoryTree {
        MemoryTree::from_spec(
            ElementSpec::new("body")
                .background("#ffffff")
                .color("#111111")
                .child(ElementSpec::new("p").id("ok").text("Readable"))
                .child(ElementSpec::new("p").id("faint").class("note").color("#b7b7b7").text("Faint")),
        )
    }

    // ── Scan ────────────────────────────────────────────────────────

    #[test]
    fn reports_single_violation() {
        let tree = page();
        let violations = scan(&tree, tree.document_root().unwrap(), 4.5).unwrap();
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.node, tree.find("faint").unwrap());
        assert!((v.ratio - 2.0).abs() < 0.05, "ratio {}", v.ratio);
        assert_eq!(v.threshold, 4.5);
        assert_eq!(v.descriptor, "p#faint.note \"Faint\"");
        assert!(v.is_critical());
    }

    #[test]
    fn scan_does_not_write() {
        let tree = page();
        scan(&tree, tree.document_root().unwrap(), 4.5).unwrap();
        assert_eq!(tree.writes(), 0);
    }

    #[test]
    fn lower_threshold_passes_everything() {
        let tree = page();
        assert!(scan(&tree, tree.document_root().unwrap(), 1.5).unwrap().is_empty());
    }

    #[test]
    fn unmeasurable_elements_are_skipped() {
        let tree = MemoryTree::from_spec(
            ElementSpec::new("body").child(ElementSpec::new("p").color("rgba(").text("x")),
        );
        let report = diagnose(&tree, 4.5).unwrap();
        assert_eq!(report.skipped, 1);
        assert!(report.is_clean());
    }

    // ── Report ──────────────────────────────────────────────────────

    #[test]
    fn report_counts_and_critical() {
        let tree = MemoryTree::from_spec(
            ElementSpec::new("body")
                .background("#ffffff")
                .child(ElementSpec::new("p").color("#b7b7b7").text("critical"))
                .child(ElementSpec::new("p").color("#808080").text("borderline")),
        );
        let report = diagnose(&tree, 4.5).unwrap();
        assert_eq!(report.elements_checked, 3);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.critical().count(), 1);
    }

    #[test]
    fn no_root() {
        assert!(matches!(diagnose(&MemoryTree::new(), 4.5), Err(ContrastError::NoRoot)));
    }

    // ── Descriptor ──────────────────────────────────────────────────

    #[test]
    fn descriptor_truncates_on_graphemes() {
        let long = "👩‍👩‍👧‍👦".repeat(30);
        let tree = MemoryTree::from_spec(ElementSpec::new("span").text(&long));
        let root = tree.document_root().unwrap();
        let expected = format!("span \"{}…\"", "👩‍👩‍👧‍👦".repeat(PREVIEW_GRAPHEMES));
        assert_eq!(describe(&tree, root), expected);
    }

    #[test]
    fn descriptor_quotes_short_text_whole() {
        let tree = MemoryTree::from_spec(ElementSpec::new("a").class("cta").text("  Shop now "));
        assert_eq!(describe(&tree, tree.document_root().unwrap()), "a.cta \"Shop now\"");
    }

    #[test]
    fn descriptor_without_text() {
        let tree = MemoryTree::from_spec(ElementSpec::new("button").id("go"));
        assert_eq!(describe(&tree, tree.document_root().unwrap()), "button#go");
    }
}
