// SPDX-License-Identifier: MIT
//
// CSS value reader for computed colors and background images.
//
// A small tokenizer feeds a recursive-descent parser over this grammar:
//
//   background-image := "none" | layer ("," layer)*
//   layer            := gradient | url(...) | other-function(...)
//   gradient         := ["repeating-"] (linear|radial|conic) "-gradient(" args ")"
//   args             := [preamble ","] color-stop ("," (color-stop | hint))*
//   color-stop       := color [length-percentage [length-percentage]]
//   color            := #hex | rgb(...) | rgba(...) | transparent | white | black
//
// Only what contrast work needs is kept from a gradient: its kind, its
// angle in degrees, and its color stops. Failures are always explicit; a
// gradient that names no color stops is `CssError::NoColorStops`.

use std::fmt;

use crate::color::{Color, parse_hex_digit};
use crate::error::{CssError, Result};

// ─── Values ──────────────────────────────────────────────────────────────────

/// A computed color value with its alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub color: Color,
    /// Opacity in `[0.0, 1.0]`.
    pub alpha: f32,
}

impl CssColor {
    pub const TRANSPARENT: Self = Self { color: Color::BLACK, alpha: 0.0 };

    #[must_use]
    pub const fn opaque(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.color)
        } else {
            let Color { r, g, b } = self.color;
            write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    const fn function_name(self) -> &'static str {
        match self {
            Self::Linear => "linear-gradient",
            Self::Radial => "radial-gradient",
            Self::Conic => "conic-gradient",
        }
    }
}

/// One color stop. `position` is kept only when given as a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: CssColor,
    pub position: Option<f32>,
}

impl ColorStop {
    #[must_use]
    pub const fn new(color: Color, position: f32) -> Self {
        Self { color: CssColor::opaque(color), position: Some(position) }
    }
}

/// A parsed gradient layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub repeating: bool,
    /// Angle in degrees. Directions (`to right`) and non-degree units are
    /// recorded as 0.
    pub angle: f32,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// A linear gradient at `angle` degrees.
    #[must_use]
    pub const fn linear(angle: f32, stops: Vec<ColorStop>) -> Self {
        Self { kind: GradientKind::Linear, repeating: false, angle, stops }
    }

    /// Stop colors without alpha, in order.
    #[must_use]
    pub fn stop_colors(&self) -> Vec<Color> {
        self.stops.iter().map(|s| s.color.color).collect()
    }

    /// Stop colors that paint something. Fully transparent stops are left
    /// out; partial alpha is ignored.
    #[must_use]
    pub fn painted_colors(&self) -> Vec<Color> {
        self.stops.iter().filter(|s| !s.color.is_transparent()).map(|s| s.color.color).collect()
    }

    /// Per-channel mean of the painted stop colors. White when every stop
    /// is transparent.
    #[must_use]
    pub fn average(&self) -> Color {
        Color::average(&self.painted_colors())
    }

    /// The same gradient with every stop color replaced by `f(color)`.
    #[must_use]
    pub fn map_colors(&self, f: impl Fn(Color) -> Color) -> Self {
        let stops = self
            .stops
            .iter()
            .map(|s| ColorStop {
                color: CssColor { color: f(s.color.color), alpha: s.color.alpha },
                position: s.position,
            })
            .collect();
        Self { stops, ..self.clone() }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeating {
            f.write_str("repeating-")?;
        }
        write!(f, "{}(", self.kind.function_name())?;
        match self.kind {
            GradientKind::Linear => write!(f, "{}deg, ", self.angle)?,
            GradientKind::Conic if self.angle != 0.0 => write!(f, "from {}deg, ", self.angle)?,
            GradientKind::Conic | GradientKind::Radial => {}
        }
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", stop.color)?;
            if let Some(pos) = stop.position {
                write!(f, " {pos}%")?;
            }
        }
        f.write_str(")")
    }
}

/// The topmost meaningful layer of a `background-image` value.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundImage {
    None,
    Gradient(Gradient),
    /// A `url(...)` or other non-gradient image layer.
    Image,
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Parse a single color value: `#rgb[a]`, `#rrggbb[aa]`, `rgb()`, `rgba()`,
/// `transparent`, `white`, or `black`.
///
/// # Errors
///
/// Returns a [`CssError`] describing the first malformed token.
pub fn parse_color(text: &str) -> Result<CssColor> {
    let mut parser = Parser::new(text)?;
    let color = parser.color()?;
    parser.finish()?;
    Ok(color)
}

/// Parse a single gradient function.
///
/// # Errors
///
/// Fails on anything that is not exactly one well-formed gradient.
pub fn parse_gradient(text: &str) -> Result<Gradient> {
    let mut parser = Parser::new(text)?;
    let gradient = match parser.next()? {
        Token::Function(name) => {
            let (kind, repeating) = gradient_kind(&name).ok_or(CssError::UnknownFunction(name))?;
            parser.gradient_body(kind, repeating)?
        }
        other => return Err(CssError::UnexpectedToken(other.to_string())),
    };
    parser.finish()?;
    Ok(gradient)
}

/// Parse a computed `background-image` value and report its top layer.
///
/// # Errors
///
/// Fails when a gradient layer is malformed or names no color stops.
pub fn parse_background_image(text: &str) -> Result<BackgroundImage> {
    if text.trim().is_empty() {
        return Ok(BackgroundImage::None);
    }
    let mut parser = Parser::new(text)?;
    let mut top = None;
    loop {
        let layer = match parser.next()? {
            Token::Ident(id) if id.eq_ignore_ascii_case("none") => BackgroundImage::None,
            Token::Url(_) => BackgroundImage::Image,
            Token::Function(name) => match gradient_kind(&name) {
                Some((kind, repeating)) => {
                    BackgroundImage::Gradient(parser.gradient_body(kind, repeating)?)
                }
                None => {
                    parser.skip_block()?;
                    BackgroundImage::Image
                }
            },
            other => return Err(CssError::UnexpectedToken(other.to_string())),
        };
        if top.is_none() && layer != BackgroundImage::None {
            top = Some(layer);
        }
        if parser.at_end() {
            break;
        }
        parser.expect(&Token::Comma)?;
    }
    Ok(top.unwrap_or(BackgroundImage::None))
}

fn gradient_kind(name: &str) -> Option<(GradientKind, bool)> {
    let (base, repeating) = match name.strip_prefix("repeating-") {
        Some(rest) => (rest, true),
        None => (name, false),
    };
    let kind = match base {
        "linear-gradient" => GradientKind::Linear,
        "radial-gradient" => GradientKind::Radial,
        "conic-gradient" => GradientKind::Conic,
        _ => return None,
    };
    Some((kind, repeating))
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Unit {
    None,
    Percent,
    Dimension(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Hash(String),
    Number(f64, Unit),
    /// Function name, lowercased, with its `(` consumed.
    Function(String),
    Url(String),
    Comma,
    Slash,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => f.write_str(s),
            Self::Hash(s) => write!(f, "#{s}"),
            Self::Number(n, Unit::None) => write!(f, "{n}"),
            Self::Number(n, Unit::Percent) => write!(f, "{n}%"),
            Self::Number(n, Unit::Dimension(u)) => write!(f, "{n}{u}"),
            Self::Function(name) => write!(f, "{name}("),
            Self::Url(u) => write!(f, "url({u})"),
            Self::Comma => f.write_str(","),
            Self::Slash => f.write_str("/"),
            Self::Close => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'#' => {
                let end = scan_while(bytes, i + 1, |b| b.is_ascii_alphanumeric());
                tokens.push(Token::Hash(input[i + 1..end].to_string()));
                i = end;
            }
            _ if starts_number(bytes, i) => {
                let (token, end) = number(input, i)?;
                tokens.push(token);
                i = end;
            }
            _ if starts_ident(bytes, i) => {
                let end = scan_while(bytes, i, is_ident_byte);
                let name = &input[i..end];
                if bytes.get(end) == Some(&b'(') {
                    if name.eq_ignore_ascii_case("url") {
                        let close = input[end..].find(')').ok_or(CssError::UnexpectedEnd)? + end;
                        let raw = input[end + 1..close].trim().trim_matches(['"', '\'']);
                        tokens.push(Token::Url(raw.to_string()));
                        i = close + 1;
                    } else {
                        tokens.push(Token::Function(name.to_ascii_lowercase()));
                        i = end + 1;
                    }
                } else {
                    tokens.push(Token::Ident(name.to_string()));
                    i = end;
                }
            }
            _ => {
                let ch = input[i..].chars().next().ok_or(CssError::UnexpectedEnd)?;
                return Err(CssError::UnexpectedChar(ch));
            }
        }
    }
    Ok(tokens)
}

fn scan_while(bytes: &[u8], mut i: usize, pred: impl Fn(u8) -> bool) -> usize {
    while i < bytes.len() && pred(bytes[i]) {
        i += 1;
    }
    i
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn starts_ident(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => true,
        b'-' => bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic() || *b == b'-'),
        _ => false,
    }
}

fn starts_number(bytes: &[u8], i: usize) -> bool {
    let digit_at = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);
    match bytes[i] {
        b'0'..=b'9' => true,
        b'.' => digit_at(i + 1),
        b'+' | b'-' => digit_at(i + 1) || (bytes.get(i + 1) == Some(&b'.') && digit_at(i + 2)),
        _ => false,
    }
}

fn number(input: &str, start: usize) -> Result<(Token, usize)> {
    let bytes = input.as_bytes();
    let mut i = start;
    if matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    i = scan_while(bytes, i, |b| b.is_ascii_digit());
    if bytes.get(i) == Some(&b'.') {
        i = scan_while(bytes, i + 1, |b| b.is_ascii_digit());
    }
    if matches!(bytes.get(i), Some(b'e' | b'E'))
        && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+')
    {
        i = scan_while(bytes, i + 2, |b| b.is_ascii_digit());
    }
    let text = &input[start..i];
    let value: f64 = text.parse().map_err(|_| CssError::InvalidNumber(text.to_string()))?;

    let unit = if bytes.get(i) == Some(&b'%') {
        i += 1;
        Unit::Percent
    } else if bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
        let end = scan_while(bytes, i, |b| b.is_ascii_alphabetic());
        let unit = input[i..end].to_ascii_lowercase();
        i = end;
        Unit::Dimension(unit)
    } else {
        Unit::None
    };
    Ok((Token::Number(value, unit), i))
}

// ─── Parser ──────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Self { tokens: tokenize(input)?, pos: 0 })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token> {
        let token = self.tokens.get(self.pos).cloned().ok_or(CssError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, want: &Token) -> Result<()> {
        let got = self.next()?;
        if &got == want {
            Ok(())
        } else {
            Err(CssError::UnexpectedToken(got.to_string()))
        }
    }

    fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => {
                let rest: Vec<String> =
                    self.tokens[self.pos..].iter().map(ToString::to_string).collect();
                Err(CssError::TrailingInput(rest.join(" ")))
            }
        }
    }

    /// Consume tokens up to and including the `)` that closes the current
    /// function.
    fn skip_block(&mut self) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next()? {
                Token::Function(_) => depth += 1,
                Token::Close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn starts_color(&self) -> bool {
        match self.peek() {
            Some(Token::Hash(_)) => true,
            Some(Token::Function(name)) => name == "rgb" || name == "rgba",
            Some(Token::Ident(id)) => color_keyword(id).is_some(),
            _ => false,
        }
    }

    fn color(&mut self) -> Result<CssColor> {
        match self.next()? {
            Token::Hash(digits) => hash_color(&digits),
            Token::Ident(id) => color_keyword(&id).ok_or(CssError::UnknownColor(id)),
            Token::Function(name) if name == "rgb" || name == "rgba" => self.rgb_body(),
            Token::Function(name) => Err(CssError::UnknownFunction(name)),
            other => Err(CssError::UnexpectedToken(other.to_string())),
        }
    }

    /// `r g b [/ a]` or `r, g, b[, a]`, after `rgb(` / `rgba(`.
    fn rgb_body(&mut self) -> Result<CssColor> {
        let mut channels = [0.0f64; 3];
        for (i, slot) in channels.iter_mut().enumerate() {
            if i > 0 && self.peek() == Some(&Token::Comma) {
                self.pos += 1;
            }
            *slot = match self.next()? {
                Token::Number(n, Unit::None) => n,
                Token::Number(n, Unit::Percent) => n * 255.0 / 100.0,
                other => return Err(CssError::UnexpectedToken(other.to_string())),
            };
        }
        let mut alpha = 1.0f64;
        if matches!(self.peek(), Some(Token::Comma | Token::Slash)) {
            self.pos += 1;
            alpha = match self.next()? {
                Token::Number(n, Unit::None) => n,
                Token::Number(n, Unit::Percent) => n / 100.0,
                other => return Err(CssError::UnexpectedToken(other.to_string())),
            };
        }
        self.expect(&Token::Close)?;
        let [r, g, b] = channels;
        #[allow(clippy::cast_possible_truncation)]
        let alpha = alpha.clamp(0.0, 1.0) as f32;
        Ok(CssColor { color: Color::from_f64(r, g, b), alpha })
    }

    /// Everything after `<kind>-gradient(` up to and including its `)`.
    fn gradient_body(&mut self, kind: GradientKind, repeating: bool) -> Result<Gradient> {
        let mut angle = 0.0f32;
        let mut stops = Vec::new();
        let mut first = true;

        loop {
            match self.peek() {
                None => return Err(CssError::UnexpectedEnd),
                Some(Token::Close) => {
                    self.pos += 1;
                    break;
                }
                _ => {}
            }

            if first && !self.starts_color() {
                if let Some(deg) = self.preamble()? {
                    angle = deg;
                }
            } else if self.starts_color() {
                stops.push(self.color_stop()?);
            } else {
                // Color hint: a bare position between two stops.
                match self.next()? {
                    Token::Number(..) => {}
                    other => return Err(CssError::UnexpectedToken(other.to_string())),
                }
            }
            first = false;

            match self.next()? {
                Token::Comma => {}
                Token::Close => break,
                other => return Err(CssError::UnexpectedToken(other.to_string())),
            }
        }

        if stops.is_empty() {
            return Err(CssError::NoColorStops);
        }
        Ok(Gradient { kind, repeating, angle, stops })
    }

    /// Leading direction / shape argument. Returns an angle when one is
    /// given in degrees; stops before the argument's trailing `,` or `)`.
    fn preamble(&mut self) -> Result<Option<f32>> {
        let mut angle = None;
        while !matches!(self.peek(), Some(Token::Comma | Token::Close) | None) {
            match self.next()? {
                Token::Number(n, Unit::Dimension(unit)) if unit == "deg" => {
                    #[allow(clippy::cast_possible_truncation)]
                    let deg = n as f32;
                    angle.get_or_insert(deg);
                }
                Token::Function(_) => self.skip_block()?,
                Token::Ident(_) | Token::Number(..) => {}
                other => return Err(CssError::UnexpectedToken(other.to_string())),
            }
        }
        Ok(angle)
    }

    fn color_stop(&mut self) -> Result<ColorStop> {
        let color = self.color()?;
        let mut position = None;
        while let Some(Token::Number(n, unit)) = self.peek() {
            if position.is_none() && *unit == Unit::Percent {
                #[allow(clippy::cast_possible_truncation)]
                let pct = *n as f32;
                position = Some(pct);
            }
            self.pos += 1;
        }
        Ok(ColorStop { color, position })
    }
}

fn color_keyword(id: &str) -> Option<CssColor> {
    if id.eq_ignore_ascii_case("transparent") {
        Some(CssColor::TRANSPARENT)
    } else if id.eq_ignore_ascii_case("white") {
        Some(CssColor::opaque(Color::WHITE))
    } else if id.eq_ignore_ascii_case("black") {
        Some(CssColor::opaque(Color::BLACK))
    } else {
        None
    }
}

fn hash_color(digits: &str) -> Result<CssColor> {
    let bad = || CssError::InvalidHex(digits.to_string());
    let nibbles: Vec<u8> =
        digits.bytes().map(parse_hex_digit).collect::<Option<_>>().ok_or_else(bad)?;
    let (rgb, alpha) = match nibbles[..] {
        [r, g, b] => ([r * 17, g * 17, b * 17], 255),
        [r, g, b, a] => ([r * 17, g * 17, b * 17], a * 17),
        [r1, r0, g1, g0, b1, b0] => ([r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0], 255),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            ([r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0], a1 << 4 | a0)
        }
        _ => return Err(bad()),
    };
    let [r, g, b] = rgb;
    Ok(CssColor { color: Color::rgb(r, g, b), alpha: f32::from(alpha) / 255.0 })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Colors ──────────────────────────────────────────────────────

    #[test]
    fn computed_rgb_and_rgba() {
        assert_eq!(parse_color("rgb(255, 128, 0)").unwrap(), CssColor::opaque(Color::rgb(255, 128, 0)));
        let c = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c.color, Color::BLACK);
        assert!((c.alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn space_separated_rgb_with_slash_alpha() {
        let c = parse_color("rgb(10 20 30 / 25%)").unwrap();
        assert_eq!(c.color, Color::rgb(10, 20, 30));
        assert!((c.alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#fff").unwrap(), CssColor::opaque(Color::WHITE));
        assert_eq!(parse_color("#123456").unwrap().color, Color::rgb(0x12, 0x34, 0x56));
        assert!(parse_color("#12345600").unwrap().is_transparent());
        assert!(parse_color("#0000").unwrap().is_transparent());
    }

    #[test]
    fn keywords() {
        assert!(parse_color("transparent").unwrap().is_transparent());
        assert_eq!(parse_color("WHITE").unwrap(), CssColor::opaque(Color::WHITE));
    }

    #[test]
    fn malformed_colors_are_errors() {
        assert_eq!(parse_color("#12345"), Err(CssError::InvalidHex("12345".into())));
        assert_eq!(parse_color("rebeccapurple"), Err(CssError::UnknownColor("rebeccapurple".into())));
        assert_eq!(parse_color("hsl(0, 0%, 0%)"), Err(CssError::UnknownFunction("hsl".into())));
        assert_eq!(parse_color("rgb(1, 2"), Err(CssError::UnexpectedEnd));
        assert_eq!(parse_color(""), Err(CssError::UnexpectedEnd));
        assert!(matches!(parse_color("#fff #000"), Err(CssError::TrailingInput(_))));
        assert_eq!(parse_color("rgb(1, 2, 3) ;"), Err(CssError::UnexpectedChar(';')));
    }

    // ── Gradients ───────────────────────────────────────────────────

    #[test]
    fn linear_gradient_with_angle() {
        let g = parse_gradient("linear-gradient(135deg, rgb(0, 0, 0) 0%, rgb(255, 255, 255) 100%)").unwrap();
        assert_eq!(g.kind, GradientKind::Linear);
        assert!((g.angle - 135.0).abs() < f32::EPSILON);
        assert_eq!(g.stop_colors(), vec![Color::BLACK, Color::WHITE]);
        assert_eq!(g.stops[1].position, Some(100.0));
        assert_eq!(g.average().to_hex(), "#808080");
    }

    #[test]
    fn transparent_stops_do_not_darken_the_average() {
        let g = parse_gradient("linear-gradient(180deg, #ffffff, transparent)").unwrap();
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.average(), Color::WHITE);

        let g = parse_gradient("linear-gradient(#000000, rgba(0, 0, 0, 0), #ffffff00, #ffffff)").unwrap();
        assert_eq!(g.painted_colors(), vec![Color::BLACK, Color::WHITE]);
        assert_eq!(g.average().to_hex(), "#808080");
    }

    #[test]
    fn all_transparent_gradient_averages_to_white() {
        let g = parse_gradient("linear-gradient(transparent, transparent)").unwrap();
        assert!(g.painted_colors().is_empty());
        assert_eq!(g.average(), Color::WHITE);
    }

    #[test]
    fn direction_keyword_records_zero_angle() {
        let g = parse_gradient("linear-gradient(to right, #ff0000, #0000ff)").unwrap();
        assert!(g.angle.abs() < f32::EPSILON);
        assert_eq!(g.stops.len(), 2);
    }

    #[test]
    fn turn_units_record_zero_angle() {
        let g = parse_gradient("linear-gradient(0.25turn, #000, #fff)").unwrap();
        assert!(g.angle.abs() < f32::EPSILON);
    }

    #[test]
    fn radial_preamble_is_skipped() {
        let g = parse_gradient(
            "radial-gradient(circle at 20% 30%, rgba(255, 255, 255, 0.4) 10px, transparent 60%)",
        )
        .unwrap();
        assert_eq!(g.kind, GradientKind::Radial);
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].position, None);
        assert_eq!(g.stops[1].position, Some(60.0));
    }

    #[test]
    fn conic_from_angle_and_repeating() {
        let g = parse_gradient("repeating-conic-gradient(from 90deg at 50% 50%, #111 0deg, #eee 90deg)").unwrap();
        assert_eq!(g.kind, GradientKind::Conic);
        assert!(g.repeating);
        assert!((g.angle - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn color_hints_and_double_positions() {
        let g = parse_gradient("linear-gradient(#000 0% 20%, 40%, #fff 60% 100%)").unwrap();
        assert_eq!(g.stop_colors(), vec![Color::BLACK, Color::WHITE]);
        assert_eq!(g.stops[0].position, Some(0.0));
    }

    #[test]
    fn gradient_without_stops_is_explicit() {
        assert_eq!(parse_gradient("linear-gradient(45deg)"), Err(CssError::NoColorStops));
        assert_eq!(parse_gradient("linear-gradient()"), Err(CssError::NoColorStops));
    }

    #[test]
    fn unterminated_gradient_is_an_error() {
        assert_eq!(parse_gradient("linear-gradient(#000, #fff"), Err(CssError::UnexpectedEnd));
    }

    #[test]
    fn display_round_trips_through_parser() {
        let g = Gradient::linear(
            135.0,
            vec![ColorStop::new(Color::rgb(10, 20, 30), 0.0), ColorStop::new(Color::WHITE, 100.0)],
        );
        let text = g.to_string();
        assert_eq!(text, "linear-gradient(135deg, #0a141e 0%, #ffffff 100%)");
        assert_eq!(parse_gradient(&text).unwrap(), g);
    }

    // ── Background image ────────────────────────────────────────────

    #[test]
    fn background_image_layers() {
        assert_eq!(parse_background_image("none").unwrap(), BackgroundImage::None);
        assert_eq!(parse_background_image("url(\"hero.jpg\")").unwrap(), BackgroundImage::Image);
        assert_eq!(
            parse_background_image("image-set(url(a.png) 1x), none").unwrap(),
            BackgroundImage::Image
        );
        let layered = parse_background_image(
            "none, linear-gradient(180deg, #000000 0%, #333333 100%), url(texture.png)",
        )
        .unwrap();
        assert!(matches!(layered, BackgroundImage::Gradient(g) if g.stops.len() == 2));
    }

    #[test]
    fn background_image_propagates_gradient_errors() {
        assert_eq!(parse_background_image("linear-gradient(to top)"), Err(CssError::NoColorStops));
    }
}
