// SPDX-License-Identifier: MIT
//
// Candidate selection.
//
// One depth-first walk from a pass root. Hidden elements are skipped along
// with everything under them. An element is a candidate when it carries
// text (its own or a descendant's) or matches the structural allow-list,
// so empty buttons and cards are still checked.

use crate::error::{ContrastError, Result};
use crate::tree::{ElementMeta, NodeId, VisualTree};

/// Tags that are always candidates.
pub const TEXT_TAGS: &[&str] = &[
    "p", "span", "div", "a", "h1", "h2", "h3", "h4", "h5", "h6", "label", "small", "strong",
    "em", "blockquote", "li", "td", "th", "button",
];

/// Classes that are always candidates.
pub const TEXT_CLASSES: &[&str] = &[
    "btn",
    "card",
    "feature-item",
    "testimonial-card",
    "product-card",
    "nav-link",
    "brand-text",
    "nav-icon",
    "navbar-brand",
    "nav-actions",
    "footer-section",
    "hero-title",
    "hero-subtitle",
    "carousel-caption",
];

const NAV_CLASSES: &[&str] = &["navbar", "nav-container", "nav-link", "navbar-brand", "nav-icon"];
const HERO_CLASSES: &[&str] = &["hero", "hero-section", "hero-title", "hero-subtitle"];

bitflags::bitflags! {
    /// Page regions that hold text to the stricter tier.
    ///
    /// Regions accumulate downward: anything inside a `nav` is in
    /// `NAVIGATION` whatever its own classes say.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Region: u8 {
        const NAVIGATION = 0b0000_0001;
        const HERO       = 0b0000_0010;
    }
}

impl Region {
    /// Regions this element opens by itself.
    #[must_use]
    pub fn of(meta: &ElementMeta) -> Self {
        let mut region = Self::empty();
        if meta.is_tag("nav") || NAV_CLASSES.iter().any(|c| meta.has_class(c)) {
            region |= Self::NAVIGATION;
        }
        if HERO_CLASSES.iter().any(|c| meta.has_class(c)) {
            region |= Self::HERO;
        }
        region
    }

    #[must_use]
    pub const fn is_emphasis(self) -> bool {
        !self.is_empty()
    }
}

#[must_use]
pub fn is_allow_listed(meta: &ElementMeta) -> bool {
    TEXT_TAGS.iter().any(|t| meta.is_tag(t)) || TEXT_CLASSES.iter().any(|c| meta.has_class(c))
}

/// Union of the regions opened by the strict ancestors of `node`.
pub fn ancestor_region<T: VisualTree + ?Sized>(tree: &T, node: NodeId) -> Region {
    let mut region = Region::empty();
    let mut current = tree.parent(node);
    while let Some(id) = current {
        if let Some(meta) = tree.meta(id) {
            region |= Region::of(meta);
        }
        current = tree.parent(id);
    }
    region
}

/// A selected element and the regions it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub node: NodeId,
    pub region: Region,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    /// Visible elements walked.
    pub examined: usize,
}

/// Walk from `root` in document order.
///
/// # Errors
///
/// [`ContrastError::UnknownNode`] when `root` is not in the tree.
pub fn select<T: VisualTree + ?Sized>(tree: &T, root: NodeId) -> Result<Selection> {
    if tree.meta(root).is_none() {
        return Err(ContrastError::UnknownNode(root));
    }
    let mut selection = Selection::default();
    let mut stack = vec![(root, ancestor_region(tree, root))];
    while let Some((node, inherited)) = stack.pop() {
        let (Some(meta), Some(style)) = (tree.meta(node), tree.style(node)) else {
            continue;
        };
        if style.hidden {
            continue;
        }
        selection.examined += 1;
        let region = inherited | Region::of(meta);
        if tree.has_text(node) || is_allow_listed(meta) {
            selection.candidates.push(Candidate { node, region });
        }
        stack.extend(tree.children(node).into_iter().rev().map(|c| (c, region)));
    }
    Ok(selection)
}
