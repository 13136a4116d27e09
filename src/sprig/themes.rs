use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub primary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub subtext: &'static str,
    pub active: &'static str,
    pub active_text: &'static str,
    pub inactive_icon: &'static str,
    pub dark_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Green,
    Blue,
    Warm,
}

impl ThemeId {
    pub const ALL: [ThemeId; 3] = [ThemeId::Green, ThemeId::Blue, ThemeId::Warm];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Green => "green",
            ThemeId::Blue => "blue",
            ThemeId::Warm => "warm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeId::Green => "Green",
            ThemeId::Blue => "Blue",
            ThemeId::Warm => "Warm",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeId::Green => Palette {
                bg: "#809671",
                primary: "#436850",
                accent: "#E5D2B8",
                text: "#FBFADA",
                subtext: "#E5D2B8",
                active: "#D2AB80",
                active_text: "#725C3A",
                inactive_icon: "#B3B792",
                dark_text: "#12372A",
            },
            ThemeId::Blue => Palette {
                bg: "#5B7C99",
                primary: "#3D5A80",
                accent: "#C8D5E0",
                text: "#E8F1F5",
                subtext: "#C8D5E0",
                active: "#94A3B8",
                active_text: "#1E293B",
                inactive_icon: "#94A3B8",
                dark_text: "#1E293B",
            },
            ThemeId::Warm => Palette {
                bg: "#C48B5C",
                primary: "#A0522D",
                accent: "#F5DEB3",
                text: "#FFF8E7",
                subtext: "#F5DEB3",
                active: "#DEB887",
                active_text: "#4A2511",
                inactive_icon: "#E6CCB2",
                dark_text: "#4A2511",
            },
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "green" => Ok(ThemeId::Green),
            "blue" => Ok(ThemeId::Blue),
            "warm" => Ok(ThemeId::Warm),
            other => Err(format!(
                "unknown theme '{}' (expected green, blue or warm)",
                other
            )),
        }
    }
}

/// Parses a `#RRGGBB` color into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
