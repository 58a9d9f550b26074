//! The theme variable schema.
//!
//! [`Var`] is the closed set of role keys a theme expands into. Each key
//! maps to one CSS custom property (`Var::NavTextPrimary` →
//! `--nav-text-primary`). A [`ThemeVariableSet`] holds one [`VarValue`] per
//! key, built in one go by [`crate::expand::expand`] and never mutated.

use std::fmt;

use petal_color::{Color, Gradient, contrast_ratio};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::contrast::{AA, AAA, BORDER, UI};
use crate::sink::StyleSink;

macro_rules! theme_vars {
    ($($variant:ident => $name:literal,)+) => {
        /// A themed role key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Var {
            $($variant,)+
        }

        impl Var {
            /// Every key, in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Kebab-case property name without the leading `--`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

theme_vars! {
    // Base
    ThemePrimary => "theme-primary",
    ThemePrimaryHover => "theme-primary-hover",
    ThemeSecondary => "theme-secondary",
    ThemeAccent => "theme-accent",
    ThemeBgPrimary => "theme-bg-primary",
    ThemeBgSecondary => "theme-bg-secondary",
    ThemeBgTertiary => "theme-bg-tertiary",
    ThemeTextPrimary => "theme-text-primary",
    ThemeTextSecondary => "theme-text-secondary",
    ThemeTextTertiary => "theme-text-tertiary",
    ThemeBorderLight => "theme-border-light",

    // Navigation
    NavBgPrimary => "nav-bg-primary",
    NavBgSecondary => "nav-bg-secondary",
    NavBgDark => "nav-bg-dark",
    NavTextPrimary => "nav-text-primary",
    NavTextSecondary => "nav-text-secondary",
    NavTextLight => "nav-text-light",
    NavLinkHover => "nav-link-hover",
    NavLinkActive => "nav-link-active",
    NavIconColor => "nav-icon-color",
    NavBorder => "nav-border",
    NavShadow => "nav-shadow",

    // Breadcrumb
    BreadcrumbBg => "breadcrumb-bg",
    BreadcrumbText => "breadcrumb-text",
    BreadcrumbTextActive => "breadcrumb-text-active",
    BreadcrumbSeparator => "breadcrumb-separator",
    BreadcrumbBorder => "breadcrumb-border",

    // Hero
    HeroBgPrimary => "hero-bg-primary",
    HeroBgGradient => "hero-bg-gradient",
    HeroTextPrimary => "hero-text-primary",
    HeroTextSecondary => "hero-text-secondary",
    HeroTextDark => "hero-text-dark",
    HeroOverlay => "hero-overlay",

    // Carousel
    CarouselBg => "carousel-bg",
    CarouselBgDark => "carousel-bg-dark",
    CarouselBorder => "carousel-border",
    CarouselControlBg => "carousel-control-bg",
    CarouselControlIcon => "carousel-control-icon",
    CarouselIndicatorActive => "carousel-indicator-active",
    CarouselIndicatorInactive => "carousel-indicator-inactive",
    CarouselShadow => "carousel-shadow",

    // Products
    ProductsBg => "products-bg",
    ProductsBorder => "products-border",
    ProductsCardBg => "products-card-bg",
    ProductsCardText => "products-card-text",
    ProductsCardBorder => "products-card-border",
    ProductsCardHover => "products-card-hover",
    ProductsCardShadow => "products-card-shadow",
    ProductsPriceBg => "products-price-bg",
    ProductsPriceText => "products-price-text",

    // Product detail
    ProductDetailBgPrimary => "product-detail-bg-primary",
    ProductDetailBgSecondary => "product-detail-bg-secondary",
    ProductDetailBorder => "product-detail-border",
    ProductDetailText => "product-detail-text",
    ProductDetailBadgeBg => "product-detail-badge-bg",
    ProductDetailBadgeText => "product-detail-badge-text",
    ProductDetailShadow => "product-detail-shadow",

    // Cart
    CartBg => "cart-bg",
    CartBgCard => "cart-bg-card",
    CartText => "cart-text",
    CartTextMuted => "cart-text-muted",
    CartBorder => "cart-border",
    CartTotalBg => "cart-total-bg",
    CartTotalText => "cart-total-text",
    CartShadow => "cart-shadow",

    // Forms
    FormBg => "form-bg",
    FormBorder => "form-border",
    FormBorderFocus => "form-border-focus",
    FormText => "form-text",
    FormTextFocus => "form-text-focus",
    FormPlaceholder => "form-placeholder",
    FormLabel => "form-label",

    // Buttons
    BtnBgPrimary => "btn-bg-primary",
    BtnBgPrimaryHover => "btn-bg-primary-hover",
    BtnTextPrimary => "btn-text-primary",
    BtnBgSecondary => "btn-bg-secondary",
    BtnTextSecondary => "btn-text-secondary",
    BtnBorder => "btn-border",
    BtnShadow => "btn-shadow",

    // Links
    LinkColor => "link-color",
    LinkTextColor => "link-text-color",
    LinkHover => "link-hover",
    LinkVisited => "link-visited",

    // Testimonials
    TestimonialBg => "testimonial-bg",
    TestimonialCardBg => "testimonial-card-bg",
    TestimonialText => "testimonial-text",
    TestimonialAuthor => "testimonial-author",
    TestimonialBorder => "testimonial-border",
    TestimonialShadow => "testimonial-shadow",

    // Features
    FeaturesBg => "features-bg",
    FeaturesCardBg => "features-card-bg",
    FeaturesText => "features-text",
    FeaturesBorder => "features-border",
    FeaturesIconPrimary => "features-icon-primary",
    FeaturesIconSecondary => "features-icon-secondary",

    // Footer
    FooterBg => "footer-bg",
    FooterBgGradient => "footer-bg-gradient",
    FooterText => "footer-text",
    FooterTextLight => "footer-text-light",
    FooterTextMuted => "footer-text-muted",
    FooterLink => "footer-link",
    FooterBorder => "footer-border",
}

impl Var {
    /// `--name`, as published to a style sink.
    #[must_use]
    pub fn custom_property(self) -> String {
        format!("--{}", self.name())
    }

    /// Look a key up by its kebab-case name, with or without `--`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("--").unwrap_or(name);
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// A resolved variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Color(Color),
    /// A color drawn at partial opacity, e.g. glass cards and overlays.
    Translucent { color: Color, alpha: f32 },
    Gradient(Gradient),
    /// Non-color text such as box shadows.
    Literal(String),
}

impl VarValue {
    /// The single color used when measuring contrast: the color itself,
    /// or a gradient's stop average. Literals have none.
    ///
    /// Translucent values are measured as if opaque, so the pair check in
    /// [`ThemeVariableSet::pair_violations`] holds against the surface
    /// color alone. Only near-opaque surfaces are published translucent.
    /// A live tree treats any partial alpha as transparent and measures
    /// against whatever paints behind, which the enforcer then repairs.
    #[must_use]
    pub fn representative(&self) -> Option<Color> {
        match self {
            Self::Color(c) | Self::Translucent { color: c, .. } => Some(*c),
            Self::Gradient(g) => Some(g.average()),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{c}"),
            Self::Translucent { color, alpha } => {
                write!(f, "rgba({}, {}, {}, {alpha})", color.r, color.g, color.b)
            }
            Self::Gradient(g) => write!(f, "{g}"),
            Self::Literal(s) => f.write_str(s),
        }
    }
}

impl Serialize for VarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ─── Contrast pairs ──────────────────────────────────────────────────────────

/// A text role and the background it is read on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastPair {
    pub text: Var,
    pub background: Var,
    pub min_ratio: f64,
}

const fn pair(text: Var, background: Var, min_ratio: f64) -> ContrastPair {
    ContrastPair { text, background, min_ratio }
}

/// Every text/background pairing an expanded theme guarantees.
pub const CONTRAST_PAIRS: &[ContrastPair] = &[
    pair(Var::ThemeTextPrimary, Var::ThemeBgPrimary, AA),
    pair(Var::ThemeTextSecondary, Var::ThemeBgPrimary, AA),
    pair(Var::ThemeTextTertiary, Var::ThemeBgPrimary, UI),
    pair(Var::NavTextPrimary, Var::NavBgPrimary, AAA),
    pair(Var::NavTextSecondary, Var::NavBgPrimary, AA),
    pair(Var::NavTextLight, Var::NavBgDark, AA),
    pair(Var::NavLinkHover, Var::NavBgPrimary, AA),
    pair(Var::NavLinkActive, Var::NavBgPrimary, AA),
    pair(Var::NavIconColor, Var::NavBgPrimary, UI),
    pair(Var::NavBorder, Var::NavBgPrimary, BORDER),
    pair(Var::BreadcrumbText, Var::BreadcrumbBg, AA),
    pair(Var::BreadcrumbTextActive, Var::BreadcrumbBg, AAA),
    pair(Var::BreadcrumbSeparator, Var::BreadcrumbBg, UI),
    pair(Var::HeroTextPrimary, Var::HeroBgGradient, AAA),
    pair(Var::HeroTextSecondary, Var::HeroBgGradient, AA),
    pair(Var::HeroTextDark, Var::HeroBgPrimary, AA),
    pair(Var::CarouselControlIcon, Var::CarouselControlBg, AA),
    pair(Var::CarouselIndicatorActive, Var::CarouselBg, UI),
    pair(Var::ProductsCardText, Var::ProductsCardBg, AA),
    pair(Var::ProductsCardHover, Var::ProductsCardBg, UI),
    pair(Var::ProductsPriceText, Var::ProductsPriceBg, AA),
    pair(Var::ProductDetailText, Var::ProductDetailBgPrimary, AA),
    pair(Var::ProductDetailBadgeText, Var::ProductDetailBadgeBg, AA),
    pair(Var::CartText, Var::CartBgCard, AA),
    pair(Var::CartTextMuted, Var::CartBgCard, UI),
    pair(Var::CartTotalText, Var::CartTotalBg, AA),
    pair(Var::FormText, Var::FormBg, AA),
    pair(Var::FormTextFocus, Var::FormBg, AAA),
    pair(Var::FormPlaceholder, Var::FormBg, AA),
    pair(Var::FormLabel, Var::FormBg, AA),
    pair(Var::FormBorderFocus, Var::FormBg, UI),
    pair(Var::BtnTextPrimary, Var::BtnBgPrimary, AAA),
    pair(Var::BtnTextSecondary, Var::BtnBgSecondary, AA),
    pair(Var::LinkColor, Var::ThemeBgPrimary, AA),
    pair(Var::LinkTextColor, Var::ThemeBgPrimary, AAA),
    pair(Var::LinkHover, Var::ThemeBgPrimary, AA),
    pair(Var::LinkVisited, Var::ThemeBgPrimary, AA),
    pair(Var::TestimonialText, Var::TestimonialCardBg, AA),
    pair(Var::TestimonialAuthor, Var::TestimonialCardBg, AAA),
    pair(Var::FeaturesText, Var::FeaturesCardBg, AA),
    pair(Var::FeaturesIconPrimary, Var::FeaturesCardBg, UI),
    pair(Var::FeaturesIconSecondary, Var::FeaturesCardBg, UI),
    pair(Var::FooterText, Var::FooterBg, AAA),
    pair(Var::FooterTextLight, Var::FooterBg, AA),
    pair(Var::FooterTextMuted, Var::FooterBg, UI),
    pair(Var::FooterLink, Var::FooterBg, AA),
    pair(Var::FooterBorder, Var::FooterBg, BORDER),
];

// ─── Variable set ────────────────────────────────────────────────────────────

/// One fully expanded theme: a value for every [`Var`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeVariableSet {
    theme_id: String,
    values: Vec<VarValue>,
}

impl ThemeVariableSet {
    /// Build a set by evaluating `derive` once per key in schema order.
    pub(crate) fn from_fn(theme_id: &str, derive: impl FnMut(Var) -> VarValue) -> Self {
        Self {
            theme_id: theme_id.to_string(),
            values: Var::ALL.iter().copied().map(derive).collect(),
        }
    }

    #[must_use]
    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    #[must_use]
    pub fn get(&self, var: Var) -> &VarValue {
        &self.values[var.index()]
    }

    /// Representative color of `var`, if it has one.
    #[must_use]
    pub fn color(&self, var: Var) -> Option<Color> {
        self.get(var).representative()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, &VarValue)> + '_ {
        Var::ALL.iter().copied().zip(self.values.iter())
    }

    /// Measured ratio of one pairing.
    #[must_use]
    pub fn pair_ratio(&self, pair: &ContrastPair) -> Option<f64> {
        Some(contrast_ratio(self.color(pair.text)?, self.color(pair.background)?))
    }

    /// Pairings from [`CONTRAST_PAIRS`] that fall below their minimum,
    /// with the measured ratio. Empty for every expanded theme.
    #[must_use]
    pub fn pair_violations(&self) -> Vec<(ContrastPair, f64)> {
        CONTRAST_PAIRS
            .iter()
            .filter_map(|p| {
                let ratio = self.pair_ratio(p).unwrap_or(0.0);
                (ratio < p.min_ratio).then_some((*p, ratio))
            })
            .collect()
    }

    /// A `:root { ... }` stylesheet block declaring every variable.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (var, value) in self.iter() {
            css.push_str("  --");
            css.push_str(var.name());
            css.push_str(": ");
            css.push_str(&value.to_string());
            css.push_str(";\n");
        }
        css.push_str("}\n");
        css
    }

    /// Write every variable to `sink`, replacing whatever it held.
    pub fn publish(&self, sink: &mut dyn StyleSink) {
        sink.clear_variables();
        for (var, value) in self.iter() {
            sink.set_variable(&var.custom_property(), &value.to_string());
        }
    }
}

struct Variables<'a>(&'a ThemeVariableSet);

impl Serialize for Variables<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(var, value)| (var.name(), value)))
    }
}

impl Serialize for ThemeVariableSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ThemeVariableSet", 2)?;
        state.serialize_field("theme_id", &self.theme_id)?;
        state.serialize_field("variables", &Variables(self))?;
        state.end()
    }
}
