//! Named preset palettes — ready-to-use inputs for the expander.
//!
//! These are storefront palettes as designed, not pre-corrected. Several
//! of them (pastel pinks, neon on black) rely on the expander to pull
//! text and backgrounds back into compliance.

use petal_color::Color;

use crate::error::{Result, ThemeError};
use crate::palette::BaseTheme;

struct Preset {
    id: &'static str,
    name: &'static str,
    primary: u32,
    primary_hover: Option<u32>,
    secondary: u32,
    accent: u32,
    /// primary, secondary, tertiary
    bg: [u32; 3],
    /// primary, secondary, tertiary
    text: [u32; 3],
    border_light: u32,
}

const PRESETS: &[Preset] = &[
    Preset {
        id: "light",
        name: "Pastel Light",
        primary: 0xf4_72_b6,
        primary_hover: Some(0xdb_27_77),
        secondary: 0x60_a5_fa,
        accent: 0xa7_8b_fa,
        bg: [0xfe_fb_ff, 0xfc_e7_f3, 0xed_e9_fe],
        text: [0x1e_29_3b, 0x47_55_69, 0x64_74_8b],
        border_light: 0xe2_e8_f0,
    },
    Preset {
        id: "dark",
        name: "Pro Dark",
        primary: 0xf4_3f_5e,
        primary_hover: Some(0xbe_12_3c),
        secondary: 0x94_a3_b8,
        accent: 0x38_bd_f8,
        bg: [0x02_06_17, 0x0f_17_2a, 0x1e_29_3b],
        text: [0xf8_fa_fc, 0xcb_d5_e1, 0x94_a3_b8],
        border_light: 0x1e_29_3b,
    },
    Preset {
        id: "darkula",
        name: "Cyber Gaming",
        primary: 0xd9_46_ef,
        primary_hover: Some(0xa2_1c_af),
        secondary: 0x22_d3_ee,
        accent: 0xfa_cc_15,
        bg: [0x09_09_0b, 0x18_18_1b, 0x27_27_2a],
        text: [0xfa_fa_fa, 0xd4_d4_d8, 0xa1_a1_aa],
        border_light: 0x27_27_2a,
    },
    Preset {
        id: "kids",
        name: "Kids",
        primary: 0xfa_cc_15,
        primary_hover: Some(0xca_8a_04),
        secondary: 0x38_bd_f8,
        accent: 0xfb_71_85,
        bg: [0xff_fb_eb, 0xff_ff_ff, 0xf0_f9_ff],
        text: [0x45_1a_03, 0x78_35_0f, 0x92_40_0e],
        border_light: 0xfd_e6_8a,
    },
    Preset {
        id: "wood",
        name: "Wood",
        primary: 0x6d_4c_41,
        primary_hover: None,
        secondary: 0xc8_79_41,
        accent: 0xcd_85_3f,
        bg: [0xfa_f6_f1, 0xf5_eb_e0, 0xe8_dc_c9],
        text: [0x3e_27_23, 0x5d_40_37, 0x79_55_48],
        border_light: 0xd7_cc_c8,
    },
    Preset {
        id: "high-contrast-light",
        name: "High Contrast Light",
        primary: 0x00_00_00,
        primary_hover: Some(0x1a_1a_1a),
        secondary: 0x00_00_ff,
        accent: 0xcc_00_00,
        bg: [0xff_ff_ff, 0xff_ff_ff, 0xf0_f0_f0],
        text: [0x00_00_00, 0x00_00_00, 0x1a_1a_1a],
        border_light: 0x00_00_00,
    },
    Preset {
        id: "neon-cyberpunk",
        name: "Neon Cyberpunk",
        primary: 0xff_00_6e,
        primary_hover: None,
        secondary: 0x00_f5_ff,
        accent: 0xff_b7_00,
        bg: [0x0a_0a_0a, 0x1a_1a_1a, 0x2a_2a_2a],
        text: [0xff_ff_ff, 0xf1_f5_f9, 0xcb_d5_e1],
        border_light: 0x6d_28_d9,
    },
    Preset {
        id: "halloween",
        name: "Halloween",
        primary: 0xff_6b_35,
        primary_hover: None,
        secondary: 0xff_9f_1c,
        accent: 0xc9_2a_2a,
        bg: [0x1a_0f_0a, 0x2d_18_10, 0x40_20_15],
        text: [0xff_ec_99, 0xff_d4_3b, 0xfa_b0_05],
        border_light: 0xff_6b_35,
    },
];

#[allow(clippy::cast_possible_truncation)]
const fn rgb(hex: u32) -> Color {
    Color::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Preset {
    fn to_base(&self) -> BaseTheme {
        BaseTheme {
            id: self.id.to_string(),
            name: self.name.to_string(),
            primary: rgb(self.primary),
            secondary: rgb(self.secondary),
            accent: rgb(self.accent),
            bg_primary: rgb(self.bg[0]),
            bg_secondary: rgb(self.bg[1]),
            text_primary: rgb(self.text[0]),
            text_secondary: rgb(self.text[1]),
            primary_hover: self.primary_hover.map(rgb),
            bg_tertiary: Some(rgb(self.bg[2])),
            text_tertiary: Some(rgb(self.text[2])),
            border_light: Some(rgb(self.border_light)),
        }
    }
}

/// Look up a builtin palette by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<BaseTheme> {
    let name = if name == "default" { "light" } else { name };
    PRESETS.iter().find(|p| p.id == name).map(Preset::to_base)
}

/// Like [`builtin_theme`], as an error for callers that need one.
///
/// # Errors
///
/// [`ThemeError::UnknownTheme`] when `name` is not a builtin.
pub fn require_builtin(name: &str) -> Result<BaseTheme> {
    builtin_theme(name).ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
}

/// List all available builtin palette names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &[
        "light",
        "dark",
        "darkula",
        "kids",
        "wood",
        "high-contrast-light",
        "neon-cyberpunk",
        "halloween",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_builtins_resolve() {
        for name in builtin_names() {
            let theme = builtin_theme(name);
            assert!(theme.is_some(), "builtin '{name}' failed to resolve");
            assert_eq!(theme.unwrap().id, *name);
        }
    }

    #[test]
    fn names_cover_every_preset() {
        assert_eq!(builtin_names().len(), PRESETS.len());
    }

    #[test]
    fn unknown_returns_none() {
        assert!(builtin_theme("nonexistent").is_none());
        assert!(matches!(require_builtin("nonexistent"), Err(ThemeError::UnknownTheme(n)) if n == "nonexistent"));
    }

    #[test]
    fn default_is_light() {
        assert_eq!(builtin_theme("default"), builtin_theme("light"));
    }

    #[test]
    fn dark_is_dark() {
        assert!(!builtin_theme("dark").unwrap().is_light());
        assert!(builtin_theme("light").unwrap().is_light());
    }

    #[test]
    fn hex_unpacking() {
        let t = builtin_theme("light").unwrap();
        assert_eq!(t.primary.to_hex(), "#f472b6");
        assert_eq!(t.primary_hover.map(Color::to_hex).as_deref(), Some("#db2777"));
        assert!(builtin_theme("wood").unwrap().primary_hover.is_none());
    }
}
