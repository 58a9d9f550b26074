// SPDX-License-Identifier: MIT
//
// petal-color — the color model underneath petal's contrast engine.
//
// Two halves: `color` is the pure sRGB algebra (hex, WCAG luminance and
// contrast, blending, brightness), and `css` reads the computed style
// strings a host hands back (rgb()/rgba()/hex colors and gradient
// background images) into typed values.

pub mod color;
pub mod css;
pub mod error;

pub use color::{
    Color, adjust_brightness, blend, contrast_ratio, hex_to_rgb, is_light, luminance,
    rgb_to_hex,
};
pub use css::{
    BackgroundImage, ColorStop, CssColor, Gradient, GradientKind, parse_background_image,
    parse_color, parse_gradient,
};
pub use error::{CssError, Result};
