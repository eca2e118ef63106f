//! Light and dark color themes.

use serde::{Deserialize, Serialize};

/// Color scheme passed to every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Hex colors for every role a bar or cell can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    /// Bars named by the current step
    pub active: &'static str,
    pub sorted: &'static str,
    pub unsorted: &'static str,
    /// Bars inside a pending quicksort partition
    pub partitioned: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub wall: &'static str,
    pub visited: &'static str,
    pub path: &'static str,
    /// The cell the current step is about
    pub current: &'static str,
}

const SHARED: Palette = Palette {
    background: "#ffffff",
    foreground: "#1e293b",
    active: "#f72585",
    sorted: "#4cc9f0",
    unsorted: "#4361ee",
    partitioned: "#7209b7",
    start: "#4ade80",
    end: "#f43f5e",
    wall: "#334155",
    visited: "#4cc9f0",
    path: "#f59e0b",
    current: "#8b5cf6",
};

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => SHARED,
            Self::Dark => Palette {
                background: "#1e293b",
                foreground: "#ffffff",
                wall: "#1e293b",
                ..SHARED
            },
        }
    }
}

/// Parse `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_flag_selects_theme() {
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
    }

    #[test]
    fn dark_palette_swaps_background_only_where_needed() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_ne!(light.background, dark.background);
        assert_eq!(light.active, dark.active);
        assert_eq!(light.path, dark.path);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#f72585"), Some((0xf7, 0x25, 0x85)));
        assert_eq!(hex_to_rgb("f72585"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}
