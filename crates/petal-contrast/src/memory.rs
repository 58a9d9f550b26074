// SPDX-License-Identifier: MIT
//
// An arena-backed visual tree.
//
// Used by tests and by the CLI, which loads trees from nested JSON. Styles
// are declared per element as CSS text and may reference theme variables
// with `var(--name, fallback)`; the tree doubles as a `StyleSink`, so
// publishing a theme into it changes what `style()` reports. The `color`
// property inherits from the parent like it does in CSS.

use std::collections::BTreeMap;

use petal_color::Color;
use petal_theme::StyleSink;
use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};
use crate::tree::{ComputedStyle, ElementMeta, NodeId, Overlay, OverlayId, VisualTree, VisualTreeMut};

/// Nested `var()` references are followed at most this deep.
const MAX_VAR_DEPTH: usize = 16;

/// Declarative description of an element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Declared `background-color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Declared `background-image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Declared `color`. Inherited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Self::default() }
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    #[must_use]
    pub fn background(mut self, value: &str) -> Self {
        self.background = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn background_image(mut self, value: &str) -> Self {
        self.background_image = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn color(mut self, value: &str) -> Self {
        self.color = Some(value.to_string());
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    meta: ElementMeta,
    background: Option<String>,
    background_image: Option<String>,
    color: Option<String>,
    hidden: bool,
    text: String,
    inline_color: Option<Color>,
    overlays: Vec<(OverlayId, Overlay)>,
}

/// In-memory [`VisualTree`] + [`StyleSink`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    variables: BTreeMap<String, String>,
    next_overlay: usize,
    writes: usize,
}

impl MemoryTree {
    /// An empty tree with no root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_spec(root: ElementSpec) -> Self {
        let mut tree = Self::new();
        tree.set_root(root);
        tree
    }

    /// Load a tree from a nested JSON element description.
    ///
    /// # Errors
    ///
    /// [`ContrastError::Json`] on malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> Result<Self> {
        let spec: ElementSpec = serde_json::from_str(text)?;
        Ok(Self::from_spec(spec))
    }

    /// Replace the whole tree with `spec`. Published variables are kept.
    pub fn set_root(&mut self, spec: ElementSpec) -> NodeId {
        self.nodes.clear();
        self.next_overlay = 0;
        let root = self.insert(None, spec);
        self.root = Some(root);
        root
    }

    /// Append `spec` (and its subtree) as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// [`ContrastError::UnknownNode`] when `parent` is not in the tree.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(ContrastError::UnknownNode(parent));
        }
        Ok(self.insert(Some(parent), spec))
    }

    fn insert(&mut self, parent: Option<NodeId>, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        let ElementSpec { tag, id: html_id, classes, background, background_image, color, hidden, text, children } =
            spec;
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            meta: ElementMeta { tag: tag.to_ascii_lowercase(), html_id, classes },
            background,
            background_image,
            color,
            hidden,
            text,
            inline_color: None,
            overlays: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        for child in children {
            self.insert(Some(id), child);
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(ContrastError::UnknownNode(id))
    }

    /// First element whose `id` attribute is `html_id`.
    #[must_use]
    pub fn find(&self, html_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.meta.html_id.as_deref() == Some(html_id))
            .map(NodeId)
    }

    /// Inline foreground override, if the engine set one.
    #[must_use]
    pub fn inline_foreground(&self, node: NodeId) -> Option<Color> {
        self.node(node).and_then(|n| n.inline_color)
    }

    /// Overlays currently placed on `node`.
    #[must_use]
    pub fn overlays(&self, node: NodeId) -> Vec<Overlay> {
        self.node(node)
            .map(|n| n.overlays.iter().map(|(_, o)| *o).collect())
            .unwrap_or_default()
    }

    /// Total mutations made through [`VisualTreeMut`].
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    fn resolve(&self, value: &str) -> String {
        substitute_vars(value, &self.variables, 0)
    }

    fn computed_color(&self, id: NodeId) -> String {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            if let Some(inline) = node.inline_color {
                return inline.to_string();
            }
            if let Some(declared) = &node.color {
                return self.resolve(declared);
            }
            current = node.parent;
        }
        ComputedStyle::default().color
    }
}

impl VisualTree for MemoryTree {
    fn document_root(&self) -> Option<NodeId> {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn meta(&self, node: NodeId) -> Option<&ElementMeta> {
        self.node(node).map(|n| &n.meta)
    }

    fn style(&self, node: NodeId) -> Option<ComputedStyle> {
        let n = self.node(node)?;
        let defaults = ComputedStyle::default();
        Some(ComputedStyle {
            background_color: n
                .background
                .as_deref()
                .map_or(defaults.background_color, |v| self.resolve(v)),
            background_image: n
                .background_image
                .as_deref()
                .map_or(defaults.background_image, |v| self.resolve(v)),
            color: self.computed_color(node),
            hidden: n.hidden,
        })
    }

    fn has_text(&self, node: NodeId) -> bool {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.node(id) else { continue };
            if !n.text.trim().is_empty() {
                return true;
            }
            stack.extend(n.children.iter().copied());
        }
        false
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.text.clone()).unwrap_or_default()
    }
}

impl VisualTreeMut for MemoryTree {
    fn set_foreground(&mut self, node: NodeId, color: Color) -> Result<()> {
        self.node_mut(node)?.inline_color = Some(color);
        self.writes += 1;
        Ok(())
    }

    fn clear_foreground(&mut self, node: NodeId) -> Result<()> {
        self.node_mut(node)?.inline_color = None;
        self.writes += 1;
        Ok(())
    }

    fn insert_overlay(&mut self, node: NodeId, overlay: Overlay) -> Result<OverlayId> {
        let id = OverlayId(self.next_overlay);
        self.node_mut(node)?.overlays.push((id, overlay));
        self.next_overlay += 1;
        self.writes += 1;
        Ok(id)
    }

    fn remove_overlay(&mut self, node: NodeId, overlay: OverlayId) -> Result<()> {
        let overlays = &mut self.node_mut(node)?.overlays;
        let index = overlays
            .iter()
            .position(|(id, _)| *id == overlay)
            .ok_or(ContrastError::UnknownOverlay(node))?;
        overlays.remove(index);
        self.writes += 1;
        Ok(())
    }
}

impl StyleSink for MemoryTree {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn clear_variables(&mut self) {
        self.variables.clear();
    }
}

// ─── var() substitution ──────────────────────────────────────────────────────

/// Replace every `var(--name[, fallback])` in `value`. Unknown names take
/// the fallback, or the empty string when there is none.
fn substitute_vars(value: &str, vars: &BTreeMap<String, String>, depth: usize) -> String {
    if depth > MAX_VAR_DEPTH {
        return String::new();
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let body_start = start + "var(".len();
        let Some(len) = closing_paren(&rest[body_start..]) else {
            out.push_str(&rest[start..]);
            return out;
        };
        let body = &rest[body_start..body_start + len];
        let (name, fallback) = match top_level_comma(body) {
            Some(i) => (body[..i].trim(), Some(body[i + 1..].trim())),
            None => (body.trim(), None),
        };
        let replacement = vars.get(name).map(String::as_str).or(fallback).unwrap_or("");
        out.push_str(&substitute_vars(replacement, vars, depth + 1));
        rest = &rest[body_start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `)` closing an already-open paren.
fn closing_paren(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn top_level_comma(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
