//! Theme records and their semantic colors

use qmui_core::Color;
use rustc_hash::FxHashMap;
use std::fmt;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Brand colors
    Primary,
    PrimaryHover,
    Secondary,

    // Surface colors
    Background,
    Surface,
    Separator,

    // Text colors
    TextPrimary,
    TextSecondary,
    TextInverse,

    // Status colors
    Success,
    Warning,
    Error,

    Link,
}

impl ColorToken {
    /// All tokens, in declaration order
    pub fn all() -> &'static [ColorToken] {
        const TOKENS: [ColorToken; 13] = [
            ColorToken::Primary,
            ColorToken::PrimaryHover,
            ColorToken::Secondary,
            ColorToken::Background,
            ColorToken::Surface,
            ColorToken::Separator,
            ColorToken::TextPrimary,
            ColorToken::TextSecondary,
            ColorToken::TextInverse,
            ColorToken::Success,
            ColorToken::Warning,
            ColorToken::Error,
            ColorToken::Link,
        ];
        &TOKENS
    }

    /// Snake-case key used in theme files
    pub fn key(self) -> &'static str {
        match self {
            ColorToken::Primary => "primary",
            ColorToken::PrimaryHover => "primary_hover",
            ColorToken::Secondary => "secondary",
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::Separator => "separator",
            ColorToken::TextPrimary => "text_primary",
            ColorToken::TextSecondary => "text_secondary",
            ColorToken::TextInverse => "text_inverse",
            ColorToken::Success => "success",
            ColorToken::Warning => "warning",
            ColorToken::Error => "error",
            ColorToken::Link => "link",
        }
    }

    pub fn from_key(key: &str) -> Option<ColorToken> {
        Self::all().iter().copied().find(|token| token.key() == key)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Complete set of semantic colors for one theme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeColors {
    // Brand colors
    pub primary: Color,
    pub primary_hover: Color,
    pub secondary: Color,

    // Surface colors
    pub background: Color,
    pub surface: Color,
    pub separator: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_inverse: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub link: Color,

    /// Colors outside the semantic set, by name
    pub extra: FxHashMap<String, Color>,
}

impl ThemeColors {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryHover => self.primary_hover,
            ColorToken::Secondary => self.secondary,
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::Separator => self.separator,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextInverse => self.text_inverse,
            ColorToken::Success => self.success,
            ColorToken::Warning => self.warning,
            ColorToken::Error => self.error,
            ColorToken::Link => self.link,
        }
    }

    /// Replace the color behind a token
    pub fn set(&mut self, token: ColorToken, color: Color) {
        let slot = match token {
            ColorToken::Primary => &mut self.primary,
            ColorToken::PrimaryHover => &mut self.primary_hover,
            ColorToken::Secondary => &mut self.secondary,
            ColorToken::Background => &mut self.background,
            ColorToken::Surface => &mut self.surface,
            ColorToken::Separator => &mut self.separator,
            ColorToken::TextPrimary => &mut self.text_primary,
            ColorToken::TextSecondary => &mut self.text_secondary,
            ColorToken::TextInverse => &mut self.text_inverse,
            ColorToken::Success => &mut self.success,
            ColorToken::Warning => &mut self.warning,
            ColorToken::Error => &mut self.error,
            ColorToken::Link => &mut self.link,
        };
        *slot = color;
    }

    /// Look up a semantic token key or an extra color name
    pub fn named(&self, name: &str) -> Option<Color> {
        ColorToken::from_key(name)
            .map(|token| self.get(token))
            .or_else(|| self.extra.get(name).copied())
    }

    /// Add an extra named color
    pub fn with_extra(mut self, name: impl Into<String>, color: Color) -> Self {
        self.extra.insert(name.into(), color);
        self
    }
}

/// Immutable theme record
///
/// Themes are shared as `Arc<Theme>` once registered; listeners and lookups
/// all see the same record.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    identifier: String,
    name: String,
    colors: ThemeColors,
    is_dark_mode: bool,
}

impl Theme {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        colors: ThemeColors,
        is_dark_mode: bool,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            colors,
            is_dark_mode,
        }
    }

    /// Stable registry key
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// User-facing display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn color(&self, token: ColorToken) -> Color {
        self.colors.get(token)
    }

    pub fn primary_color(&self) -> Color {
        self.colors.primary
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ThemePreset;

    #[test]
    fn test_token_keys_round_trip() {
        for token in ColorToken::all() {
            assert_eq!(ColorToken::from_key(token.key()), Some(*token));
        }
        assert_eq!(ColorToken::from_key("chartreuse"), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut colors = ThemePreset::Default.theme().colors().clone();
        for token in ColorToken::all() {
            colors.set(*token, Color::from_hex(0x123456));
            assert_eq!(colors.get(*token), Color::from_hex(0x123456));
        }
    }

    #[test]
    fn test_named_prefers_semantic_tokens() {
        let colors = ThemePreset::Default
            .theme()
            .colors()
            .clone()
            .with_extra("badge", Color::from_hex(0xFF0000))
            .with_extra("primary", Color::BLACK);

        assert_eq!(colors.named("badge"), Some(Color::from_hex(0xFF0000)));
        assert_eq!(colors.named("primary"), Some(colors.primary));
        assert_eq!(colors.named("missing"), None);
    }
}
