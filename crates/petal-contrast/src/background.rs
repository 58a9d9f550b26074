// SPDX-License-Identifier: MIT
//
// Effective background resolution.
//
// What an element's text is actually drawn on: the nearest ancestor-or-self
// with an opaque background color, a gradient, or an image. A partially
// transparent color counts as transparent (no compositing). Past the root,
// the root's color is used with its alpha ignored, or white when it has
// none.

use petal_color::{BackgroundImage, Color, ColorStop, Gradient, parse_background_image, parse_color};

use crate::error::{ContrastError, Result};
use crate::tree::{ComputedStyle, NodeId, VisualTree};

/// The kind of background found.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundDescriptor {
    Solid(Color),
    Gradient(Gradient),
    /// No layer anywhere up the tree; the document fallback applies.
    Transparent,
    /// A non-gradient image. Its pixels are unknown.
    Image,
}

/// A resolved background and the color used to measure contrast against it.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveBackground {
    pub descriptor: BackgroundDescriptor,
    /// Solid color, gradient average, or the backdrop behind an image.
    pub color: Color,
    /// Element that paints the background. `None` for the document fallback.
    pub source: Option<NodeId>,
}

impl EffectiveBackground {
    /// Gradients and images are where overlays go.
    #[must_use]
    pub const fn is_layered(&self) -> bool {
        matches!(self.descriptor, BackgroundDescriptor::Gradient(_) | BackgroundDescriptor::Image)
    }
}

/// Mean of the painted stop colors, `None` for an empty list. Fully
/// transparent stops are skipped; if nothing is left the mean is white.
#[must_use]
pub fn average_of(stops: &[ColorStop]) -> Option<Color> {
    if stops.is_empty() {
        return None;
    }
    let colors: Vec<Color> =
        stops.iter().filter(|s| !s.color.is_transparent()).map(|s| s.color.color).collect();
    Some(Color::average(&colors))
}

/// Inspect a single element's background layers. `None` means it paints
/// nothing and the parent shows through.
///
/// # Errors
///
/// Malformed background color or image values.
pub fn inspect_layer(style: &ComputedStyle) -> Result<Option<BackgroundDescriptor>> {
    let color = parse_color(&style.background_color)?;
    if color.is_opaque() {
        return Ok(Some(BackgroundDescriptor::Solid(color.color)));
    }
    Ok(match parse_background_image(&style.background_image)? {
        BackgroundImage::None => None,
        BackgroundImage::Gradient(g) => Some(BackgroundDescriptor::Gradient(g)),
        BackgroundImage::Image => Some(BackgroundDescriptor::Image),
    })
}

/// Resolve the background behind `node`.
///
/// # Errors
///
/// [`ContrastError::UnknownNode`] when `node` has no style, or a
/// [`ContrastError::Css`] from a malformed value on the way up.
pub fn effective_background<T: VisualTree + ?Sized>(tree: &T, node: NodeId) -> Result<EffectiveBackground> {
    let mut current = Some(node);
    while let Some(id) = current {
        let style = tree.style(id).ok_or(ContrastError::UnknownNode(id))?;
        match inspect_layer(&style)? {
            Some(BackgroundDescriptor::Solid(color)) => {
                return Ok(EffectiveBackground {
                    descriptor: BackgroundDescriptor::Solid(color),
                    color,
                    source: Some(id),
                });
            }
            Some(BackgroundDescriptor::Gradient(gradient)) => {
                let color = gradient.average();
                return Ok(EffectiveBackground {
                    descriptor: BackgroundDescriptor::Gradient(gradient),
                    color,
                    source: Some(id),
                });
            }
            Some(BackgroundDescriptor::Image) => {
                let color = match tree.parent(id) {
                    Some(parent) => effective_background(tree, parent)?.color,
                    None => document_fallback(tree)?,
                };
                return Ok(EffectiveBackground {
                    descriptor: BackgroundDescriptor::Image,
                    color,
                    source: Some(id),
                });
            }
            Some(BackgroundDescriptor::Transparent) | None => current = tree.parent(id),
        }
    }
    Ok(EffectiveBackground {
        descriptor: BackgroundDescriptor::Transparent,
        color: document_fallback(tree)?,
        source: None,
    })
}

/// Root background with alpha ignored, or white.
fn document_fallback<T: VisualTree + ?Sized>(tree: &T) -> Result<Color> {
    let Some(style) = tree.document_root().and_then(|root| tree.style(root)) else {
        return Ok(Color::WHITE);
    };
    let color = parse_color(&style.background_color)?;
    Ok(if color.is_transparent() { Color::WHITE } else { color.color })
}
