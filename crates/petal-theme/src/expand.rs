//! Base palette → full variable set.
//!
//! ```text
//! BaseTheme
//!     │ resolve()            fill optional roles
//!     ▼
//! Palette
//!     │ Anchors::new()       role backgrounds, nudged for headroom
//!     ▼
//! Anchors
//!     │ derive(var)          one exhaustive match, one arm per key
//!     ▼
//! ThemeVariableSet
//! ```
//!
//! Text colors are chosen with [`pick_readable`] against the exact
//! background value published for their role, and every role background is
//! first anchored with [`ensure_headroom`] for its strictest pairing. That
//! is what makes every entry of [`CONTRAST_PAIRS`] hold for any input
//! palette, including mid-luminance brand colors.
//!
//! [`CONTRAST_PAIRS`]: crate::vars::CONTRAST_PAIRS

use petal_color::{Color, ColorStop, Gradient};
use tracing::debug;

use crate::contrast::{
    AA, AAA, BORDER, UI, ensure_gradient_headroom, ensure_headroom, pick_readable,
};
use crate::palette::{BaseTheme, Palette};
use crate::vars::{ThemeVariableSet, Var, VarValue};

// Tailwind greys used as neutral text candidates.
const NEAR_WHITE: Color = Color::rgb(0xf9, 0xfa, 0xfb);
const GREY_100: Color = Color::rgb(0xf3, 0xf4, 0xf6);
const GREY_200: Color = Color::rgb(0xe5, 0xe7, 0xeb);
const GREY_300: Color = Color::rgb(0xd1, 0xd5, 0xdb);
const GREY_400: Color = Color::rgb(0x9c, 0xa3, 0xaf);
const GREY_700: Color = Color::rgb(0x37, 0x41, 0x51);
const GREY_800: Color = Color::rgb(0x1f, 0x29, 0x37);

/// Expand a base palette into a complete variable set.
///
/// Pure, total and deterministic: the same palette always yields the same
/// set, and every [`Var`] gets a value.
#[must_use]
pub fn expand(base: &BaseTheme) -> ThemeVariableSet {
    let anchors = Anchors::new(base.resolve());
    let set = ThemeVariableSet::from_fn(&base.id, |var| anchors.derive(var));
    debug!(theme = %base.id, variables = Var::ALL.len(), "expanded theme");
    set
}

/// Role backgrounds shared by several keys.
struct Anchors {
    p: Palette,
    /// Page, cards and forms. AAA headroom.
    surface: Color,
    /// Secondary sections and secondary buttons. AA headroom.
    surface_alt: Color,
    /// Dark navigation band. AA headroom.
    nav_dark: Color,
    /// Footer. AAA headroom.
    footer: Color,
    hero: Gradient,
    hero_soft: Gradient,
    /// Primary buttons. AAA headroom.
    button: Color,
    button_hover: Color,
    /// Price tags and cart totals. AA headroom.
    accent_wash: Color,
    badge: Color,
    /// Cart glass card. AA headroom.
    card: Color,
    carousel_control: Color,
    testimonial: Gradient,
    footer_gradient: Gradient,
}

fn two_stop(angle: f32, from: Color, to: Color) -> Gradient {
    Gradient::linear(angle, vec![ColorStop::new(from, 0.0), ColorStop::new(to, 100.0)])
}

impl Anchors {
    fn new(p: Palette) -> Self {
        let surface = ensure_headroom(p.bg_primary, AAA);
        let surface_alt = ensure_headroom(p.bg_secondary, AA);
        let badge = pick_readable(
            surface_alt,
            &[p.secondary.adjust_brightness(30.0), p.secondary.adjust_brightness(-30.0)],
            UI,
        );
        let card_lift = if surface.is_light() { 60.0 } else { 8.0 };

        Self {
            surface,
            surface_alt,
            nav_dark: ensure_headroom(p.bg_tertiary, AA),
            footer: ensure_headroom(p.bg_tertiary, AAA),
            hero: ensure_gradient_headroom(
                &two_stop(
                    135.0,
                    p.primary.adjust_brightness(-20.0),
                    p.secondary.adjust_brightness(-20.0),
                ),
                AAA,
            ),
            hero_soft: ensure_gradient_headroom(&two_stop(135.0, p.bg_primary, p.bg_secondary), AA),
            button: ensure_headroom(p.primary, AAA),
            button_hover: ensure_headroom(p.primary_hover, AAA),
            accent_wash: ensure_headroom(p.primary.adjust_brightness(40.0), AA),
            badge: ensure_headroom(badge, AA),
            card: ensure_headroom(surface.adjust_brightness(card_lift), AA),
            carousel_control: pick_readable(surface, &[Color::WHITE, Color::BLACK], UI),
            testimonial: ensure_gradient_headroom(
                &two_stop(
                    135.0,
                    p.primary.adjust_brightness(35.0),
                    p.secondary.adjust_brightness(15.0),
                ),
                AA,
            ),
            footer_gradient: Gradient::linear(
                135.0,
                vec![
                    ColorStop::new(p.bg_tertiary.adjust_brightness(-10.0), 0.0),
                    ColorStop::new(p.bg_tertiary.adjust_brightness(-5.0), 50.0),
                    ColorStop::new(p.primary, 100.0),
                ],
            ),
            p,
        }
    }

    fn text(bg: Color, preferred: &[Color], min_ratio: f64) -> VarValue {
        VarValue::Color(pick_readable(bg, preferred, min_ratio))
    }

    fn shadow(&self, geometry: &str, light_alpha: &str, dark_alpha: &str) -> VarValue {
        let alpha = if self.surface.is_light() { light_alpha } else { dark_alpha };
        VarValue::Literal(format!("{geometry} rgba(0, 0, 0, {alpha})"))
    }

    #[allow(clippy::too_many_lines)]
    fn derive(&self, var: Var) -> VarValue {
        use VarValue::Color as Solid;

        let p = &self.p;
        let surface = self.surface;
        let border = |bg: Color| Self::text(bg, &[p.border_light], BORDER);

        match var {
            // Base
            Var::ThemePrimary => Solid(p.primary),
            Var::ThemePrimaryHover => Solid(p.primary_hover),
            Var::ThemeSecondary => Solid(p.secondary),
            Var::ThemeAccent => Solid(p.accent),
            Var::ThemeBgPrimary => Solid(surface),
            Var::ThemeBgSecondary => Solid(self.surface_alt),
            Var::ThemeBgTertiary => Solid(p.bg_tertiary),
            Var::ThemeTextPrimary => Self::text(surface, &[p.text_primary], AA),
            Var::ThemeTextSecondary => {
                Self::text(surface, &[p.text_secondary, p.text_primary], AA)
            }
            Var::ThemeTextTertiary => {
                Self::text(surface, &[p.text_tertiary, p.text_secondary], UI)
            }
            Var::ThemeBorderLight => Solid(p.border_light),

            // Navigation
            Var::NavBgPrimary => Solid(surface),
            Var::NavBgSecondary => Solid(self.surface_alt),
            Var::NavBgDark => Solid(self.nav_dark),
            Var::NavTextPrimary => Self::text(surface, &[p.text_primary, GREY_800, GREY_700], AAA),
            Var::NavTextSecondary => Self::text(surface, &[p.text_secondary, p.text_primary], AA),
            Var::NavTextLight => {
                Self::text(self.nav_dark, &[Color::WHITE, NEAR_WHITE, p.bg_primary], AA)
            }
            Var::NavLinkHover => Self::text(surface, &[p.primary, p.primary_hover], AA),
            Var::NavLinkActive => Self::text(surface, &[p.primary_hover, p.primary], AA),
            Var::NavIconColor => Self::text(surface, &[p.primary, p.text_secondary], UI),
            Var::NavBorder => border(surface),
            Var::NavShadow => self.shadow("0 4px 6px -1px", "0.1", "0.4"),

            // Breadcrumb
            Var::BreadcrumbBg => Solid(surface),
            Var::BreadcrumbText => Self::text(surface, &[p.text_secondary], AA),
            Var::BreadcrumbTextActive => Self::text(surface, &[p.primary, p.primary_hover], AAA),
            Var::BreadcrumbSeparator => Self::text(surface, &[p.text_tertiary], UI),
            Var::BreadcrumbBorder => border(surface),

            // Hero
            Var::HeroBgPrimary => VarValue::Gradient(self.hero_soft.clone()),
            Var::HeroBgGradient => VarValue::Gradient(self.hero.clone()),
            Var::HeroTextPrimary => Self::text(self.hero.average(), &[Color::WHITE, NEAR_WHITE], AAA),
            Var::HeroTextSecondary => {
                Self::text(self.hero.average(), &[GREY_100, GREY_200, Color::WHITE], AA)
            }
            Var::HeroTextDark => Self::text(self.hero_soft.average(), &[p.text_primary], AA),
            Var::HeroOverlay => VarValue::Translucent { color: Color::BLACK, alpha: 0.25 },

            // Carousel
            Var::CarouselBg => Solid(surface),
            Var::CarouselBgDark => Solid(self.nav_dark),
            Var::CarouselBorder => border(surface),
            Var::CarouselControlBg => {
                VarValue::Translucent { color: self.carousel_control, alpha: 0.9 }
            }
            Var::CarouselControlIcon => {
                Self::text(self.carousel_control, &[p.text_primary, p.primary], AA)
            }
            Var::CarouselIndicatorActive => Self::text(surface, &[p.primary], UI),
            Var::CarouselIndicatorInactive => {
                Self::text(surface, &[p.text_tertiary, p.border_light], BORDER)
            }
            Var::CarouselShadow => self.shadow("0 10px 15px -3px", "0.1", "0.5"),

            // Products
            Var::ProductsBg => Solid(self.surface_alt),
            Var::ProductsBorder | Var::ProductsCardBorder => border(surface),
            Var::ProductsCardBg => Solid(surface),
            Var::ProductsCardText => Self::text(surface, &[p.text_primary], AA),
            Var::ProductsCardHover => Self::text(surface, &[p.primary], UI),
            Var::ProductsCardShadow => self.shadow("0 1px 3px 0", "0.1", "0.4"),
            Var::ProductsPriceBg => Solid(self.accent_wash),
            Var::ProductsPriceText => {
                Self::text(self.accent_wash, &[p.primary_hover, p.text_primary], AA)
            }

            // Product detail
            Var::ProductDetailBgPrimary => Solid(surface),
            Var::ProductDetailBgSecondary => Solid(self.surface_alt),
            Var::ProductDetailBorder => border(surface),
            Var::ProductDetailText => Self::text(surface, &[p.text_primary], AA),
            Var::ProductDetailBadgeBg => Solid(self.badge),
            Var::ProductDetailBadgeText => {
                Self::text(self.badge, &[Color::WHITE, p.text_primary], AA)
            }
            Var::ProductDetailShadow => self.shadow("0 20px 25px -5px", "0.1", "0.5"),

            // Cart
            Var::CartBg => Solid(surface),
            Var::CartBgCard => VarValue::Translucent { color: self.card, alpha: 0.95 },
            Var::CartText => Self::text(self.card, &[p.text_primary], AA),
            Var::CartTextMuted => Self::text(self.card, &[p.text_secondary], UI),
            Var::CartBorder => border(self.card),
            Var::CartTotalBg => Solid(self.accent_wash),
            Var::CartTotalText => Self::text(self.accent_wash, &[p.text_primary], AA),
            Var::CartShadow => self.shadow("0 20px 60px", "0.15", "0.6"),

            // Forms
            Var::FormBg => Solid(surface),
            Var::FormBorder => border(surface),
            Var::FormBorderFocus => Self::text(surface, &[p.primary], UI),
            Var::FormText => Self::text(surface, &[p.text_primary], AA),
            Var::FormTextFocus => Self::text(surface, &[p.text_primary], AAA),
            Var::FormPlaceholder => Self::text(surface, &[p.text_tertiary, p.text_secondary], AA),
            Var::FormLabel => Self::text(surface, &[p.text_secondary], AA),

            // Buttons
            Var::BtnBgPrimary => Solid(self.button),
            Var::BtnBgPrimaryHover => Solid(self.button_hover),
            Var::BtnTextPrimary => Self::text(self.button, &[Color::WHITE, NEAR_WHITE], AAA),
            Var::BtnBgSecondary => Solid(self.surface_alt),
            Var::BtnTextSecondary => Self::text(self.surface_alt, &[p.text_primary], AA),
            Var::BtnBorder => border(self.surface_alt),
            Var::BtnShadow => self.shadow("0 4px 14px 0", "0.15", "0.5"),

            // Links
            Var::LinkColor => Self::text(surface, &[p.primary, p.primary_hover], AA),
            Var::LinkTextColor => Self::text(surface, &[p.primary_hover, p.primary], AAA),
            Var::LinkHover => Self::text(surface, &[p.primary_hover], AA),
            Var::LinkVisited => Self::text(surface, &[p.accent, p.primary_hover], AA),

            // Testimonials
            Var::TestimonialBg => VarValue::Gradient(self.testimonial.clone()),
            Var::TestimonialCardBg => Solid(surface),
            Var::TestimonialText => Self::text(surface, &[p.text_secondary], AA),
            Var::TestimonialAuthor => Self::text(surface, &[p.text_primary], AAA),
            Var::TestimonialBorder => border(surface),
            Var::TestimonialShadow => self.shadow("0 10px 30px", "0.08", "0.4"),

            // Features
            Var::FeaturesBg => Solid(self.surface_alt),
            Var::FeaturesCardBg => Solid(surface),
            Var::FeaturesText => Self::text(surface, &[p.text_secondary], AA),
            Var::FeaturesBorder => border(surface),
            Var::FeaturesIconPrimary => Self::text(surface, &[p.primary], UI),
            Var::FeaturesIconSecondary => Self::text(surface, &[p.secondary], UI),

            // Footer
            Var::FooterBg => Solid(self.footer),
            Var::FooterBgGradient => VarValue::Gradient(self.footer_gradient.clone()),
            Var::FooterText => {
                Self::text(self.footer, &[Color::WHITE, NEAR_WHITE, GREY_200], AAA)
            }
            Var::FooterTextLight => Self::text(self.footer, &[GREY_300, GREY_200], AA),
            Var::FooterTextMuted => Self::text(self.footer, &[GREY_400], UI),
            Var::FooterLink => {
                Self::text(self.footer, &[p.primary.adjust_brightness(40.0), p.primary], AA)
            }
            Var::FooterBorder => Self::text(self.footer, &[GREY_700, p.border_light], BORDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{builtin_names, builtin_theme};
    use crate::contrast::headroom;
    use crate::vars::CONTRAST_PAIRS;
    use petal_color::contrast_ratio;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> Color {
        Color::hex(s).unwrap()
    }

    /// Mid-luminance everything: no extreme reaches 7:1 on any base color.
    fn mid_grey_theme() -> BaseTheme {
        BaseTheme {
            id: "grey".into(),
            name: "Grey".into(),
            primary: hex("#777777"),
            secondary: hex("#757575"),
            accent: hex("#787878"),
            bg_primary: hex("#777777"),
            bg_secondary: hex("#7a7a7a"),
            text_primary: hex("#808080"),
            text_secondary: hex("#6e6e6e"),
            primary_hover: None,
            bg_tertiary: None,
            text_tertiary: None,
            border_light: None,
        }
    }

    #[test]
    fn every_builtin_satisfies_every_pair() {
        for name in builtin_names() {
            let set = expand(&builtin_theme(name).unwrap());
            let failures = set.pair_violations();
            assert!(failures.is_empty(), "{name}: {failures:?}");
        }
    }

    #[test]
    fn mid_luminance_palette_still_reaches_aaa() {
        let base = mid_grey_theme();
        assert!(headroom(base.bg_primary) < AAA);
        let set = expand(&base);
        assert_eq!(set.pair_violations(), vec![]);

        let bg = set.color(Var::NavBgPrimary).unwrap();
        let text = set.color(Var::NavTextPrimary).unwrap();
        let ratio = contrast_ratio(bg, text);
        assert!(ratio >= AAA, "nav primary: {ratio}");
    }

    #[test]
    fn switching_themes_changes_values() {
        let light = expand(&builtin_theme("light").unwrap());
        let dark = expand(&builtin_theme("dark").unwrap());
        assert_eq!(light.theme_id(), "light");
        assert_eq!(dark.theme_id(), "dark");
        assert_ne!(light.color(Var::ThemeBgPrimary), dark.color(Var::ThemeBgPrimary));
        assert_ne!(light.color(Var::ThemeTextPrimary), dark.color(Var::ThemeTextPrimary));
        let differing = light.iter().zip(dark.iter()).filter(|((_, a), (_, b))| a != b).count();
        assert!(differing > Var::ALL.len() / 2, "only {differing} variables differ");
        assert_eq!(light.pair_violations(), vec![]);
        assert_eq!(dark.pair_violations(), vec![]);
    }

    #[test]
    fn expansion_is_deterministic() {
        let base = builtin_theme("kids").unwrap();
        assert_eq!(expand(&base), expand(&base));
    }

    #[test]
    fn compliant_base_text_passes_through() {
        let set = expand(&builtin_theme("light").unwrap());
        assert_eq!(set.color(Var::ThemeTextPrimary), Some(hex("#1e293b")));
        assert_eq!(set.color(Var::ThemeBgPrimary), Some(hex("#fefbff")));
    }

    #[test]
    fn hero_gradient_darkens_brand_colors() {
        let base = builtin_theme("dark").unwrap();
        let set = expand(&base);
        let VarValue::Gradient(hero) = set.get(Var::HeroBgGradient) else {
            panic!("hero background is not a gradient");
        };
        assert!((hero.angle - 135.0).abs() < f32::EPSILON);
        assert_eq!(hero.stops.len(), 2);
        assert!(hero.stops[0].color.color.luminance() <= base.primary.adjust_brightness(-20.0).luminance());
    }

    #[test]
    fn shadows_are_literals() {
        let set = expand(&builtin_theme("light").unwrap());
        assert_eq!(
            set.get(Var::NavShadow),
            &VarValue::Literal("0 4px 6px -1px rgba(0, 0, 0, 0.1)".into())
        );
    }

    #[test]
    fn every_pair_has_colors() {
        let set = expand(&builtin_theme("wood").unwrap());
        for pair in CONTRAST_PAIRS {
            assert!(set.pair_ratio(pair).is_some(), "{} / {}", pair.text, pair.background);
        }
    }

    #[test]
    fn css_block_declares_every_var() {
        let css = expand(&builtin_theme("halloween").unwrap()).to_css();
        assert!(css.starts_with(":root {\n"));
        assert_eq!(css.matches(";\n").count(), Var::ALL.len());
        assert!(css.contains("  --footer-bg: #"));
    }
}
