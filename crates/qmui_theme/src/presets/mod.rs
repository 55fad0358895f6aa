//! Built-in theme presets.
//!
//! Every preset shares one of two base palettes (light or dark) and differs
//! in its brand color.

use crate::theme::{Theme, ThemeColors};
use qmui_core::Color;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Light theme with the QMUI blue tint.
    Default,
    /// Dark counterpart of the default theme.
    Dark,
    Grapefruit,
    Grass,
    PinkRose,
    Ocean,
    Lavender,
    Sunset,
    Mint,
    Slate,
    /// Dark theme with an indigo tint.
    Midnight,
}

impl ThemePreset {
    /// Stable preset id, used as the registry identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Grapefruit => "grapefruit",
            Self::Grass => "grass",
            Self::PinkRose => "pinkrose",
            Self::Ocean => "ocean",
            Self::Lavender => "lavender",
            Self::Sunset => "sunset",
            Self::Mint => "mint",
            Self::Slate => "slate",
            Self::Midnight => "midnight",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dark => "Dark",
            Self::Grapefruit => "Grapefruit",
            Self::Grass => "Grass",
            Self::PinkRose => "Pink Rose",
            Self::Ocean => "Ocean",
            Self::Lavender => "Lavender",
            Self::Sunset => "Sunset",
            Self::Mint => "Mint",
            Self::Slate => "Slate",
            Self::Midnight => "Midnight",
        }
    }

    /// Full preset list, in registration order.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 11] = [
            ThemePreset::Default,
            ThemePreset::Dark,
            ThemePreset::Grapefruit,
            ThemePreset::Grass,
            ThemePreset::PinkRose,
            ThemePreset::Ocean,
            ThemePreset::Lavender,
            ThemePreset::Sunset,
            ThemePreset::Mint,
            ThemePreset::Slate,
            ThemePreset::Midnight,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    pub fn is_dark_mode(self) -> bool {
        matches!(self, Self::Dark | Self::Midnight)
    }

    fn primary(self) -> Color {
        match self {
            Self::Default => Color::from_hex(0x31BDF3),
            Self::Dark => Color::from_hex(0x3C9BFF),
            Self::Grapefruit => Color::from_hex(0xEF5362),
            Self::Grass => Color::from_hex(0x6BBF56),
            Self::PinkRose => Color::from_hex(0xE78EB5),
            Self::Ocean => Color::from_hex(0x1E6FD9),
            Self::Lavender => Color::from_hex(0x9B7BE0),
            Self::Sunset => Color::from_hex(0xF2853B),
            Self::Mint => Color::from_hex(0x3EC9A7),
            Self::Slate => Color::from_hex(0x5B6B82),
            Self::Midnight => Color::from_hex(0x7A8CFF),
        }
    }

    /// Build the theme record for this preset.
    pub fn theme(self) -> Theme {
        Theme::new(
            self.id(),
            self.display_name(),
            palette(self.primary(), self.is_dark_mode()),
            self.is_dark_mode(),
        )
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Base palette around a brand color
///
/// Hover states are derived from `primary`; links follow `primary`.
pub(crate) fn palette(primary: Color, dark: bool) -> ThemeColors {
    if dark {
        ThemeColors {
            primary,
            primary_hover: Color::lerp(&primary, &Color::WHITE, 0.15),
            secondary: Color::from_hex(0x8E8E93),
            background: Color::from_hex(0x1C1C1E),
            surface: Color::from_hex(0x2C2C2E),
            separator: Color::from_hex(0x3A3A3C),
            text_primary: Color::from_hex(0xF2F2F7),
            text_secondary: Color::from_hex(0x98989F),
            text_inverse: Color::from_hex(0x1C1C1E),
            success: Color::from_hex(0x30D158),
            warning: Color::from_hex(0xFFD60A),
            error: Color::from_hex(0xFF453A),
            link: primary,
            extra: FxHashMap::default(),
        }
    } else {
        ThemeColors {
            primary,
            primary_hover: Color::lerp(&primary, &Color::BLACK, 0.12),
            secondary: Color::from_hex(0x8E8E93),
            background: Color::from_hex(0xF6F7F9),
            surface: Color::WHITE,
            separator: Color::from_hex(0xDEE0E2),
            text_primary: Color::from_hex(0x333333),
            text_secondary: Color::from_hex(0x999999),
            text_inverse: Color::WHITE,
            success: Color::from_hex(0x4CAF50),
            warning: Color::from_hex(0xF5A623),
            error: Color::from_hex(0xF54B4B),
            link: primary,
            extra: FxHashMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_resolvable() {
        for preset in ThemePreset::all() {
            assert_eq!(ThemePreset::from_id(preset.id()), Some(*preset));
        }
        assert_eq!(ThemePreset::from_id("neon"), None);
    }

    #[test]
    fn test_hover_differs_from_primary() {
        for preset in ThemePreset::all() {
            let colors = preset.theme().colors().clone();
            assert_ne!(colors.primary, colors.primary_hover, "preset={preset}");
        }
    }
}
