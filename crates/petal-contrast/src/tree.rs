// SPDX-License-Identifier: MIT
//
// The visual-tree capability the engine runs against.
//
// The engine never reaches for a global document. Hosts hand it something
// implementing `VisualTree` (reads) and, for enforcement, `VisualTreeMut`
// (the only two kinds of writes the engine ever makes: inline foreground
// colors and its own translucent overlays).

use std::fmt;

use petal_color::Color;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque handle to an element in a host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Handle to an overlay the engine inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub usize);

/// Structural identity of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMeta {
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl ElementMeta {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), ..Self::default() }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

impl fmt::Display for ElementMeta {
    /// CSS-selector-like form: `tag#id.class1.class2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        if let Some(id) = &self.html_id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// Computed style values, as CSS text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub background_color: String,
    pub background_image: String,
    pub color: String,
    /// `display: none` or `visibility: hidden`.
    pub hidden: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            background_color: "transparent".into(),
            background_image: "none".into(),
            color: "#000000".into(),
            hidden: false,
        }
    }
}

/// A translucent layer placed over an element's background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub color: Color,
    pub opacity: f32,
}

/// Read access to a rendered element tree.
pub trait VisualTree {
    /// The document root, if the tree has one.
    fn document_root(&self) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children in document order. Engine overlays are not included.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn meta(&self, node: NodeId) -> Option<&ElementMeta>;

    fn style(&self, node: NodeId) -> Option<ComputedStyle>;

    /// True when the element or any descendant carries non-blank text.
    fn has_text(&self, node: NodeId) -> bool;

    /// The element's own text, for descriptions.
    fn text(&self, node: NodeId) -> String;
}

/// Write access: the engine's only side effects.
pub trait VisualTreeMut: VisualTree {
    /// Override the element's foreground color inline.
    ///
    /// # Errors
    ///
    /// Fails when `node` is not in the tree.
    fn set_foreground(&mut self, node: NodeId, color: Color) -> Result<()>;

    /// Drop an inline foreground override set by [`Self::set_foreground`].
    ///
    /// # Errors
    ///
    /// Fails when `node` is not in the tree.
    fn clear_foreground(&mut self, node: NodeId) -> Result<()>;

    /// Place `overlay` over the background of `node`.
    ///
    /// # Errors
    ///
    /// Fails when `node` is not in the tree.
    fn insert_overlay(&mut self, node: NodeId, overlay: Overlay) -> Result<OverlayId>;

    /// Remove an overlay returned by [`Self::insert_overlay`].
    ///
    /// # Errors
    ///
    /// Fails when the node or overlay is unknown.
    fn remove_overlay(&mut self, node: NodeId, overlay: OverlayId) -> Result<()>;
}
