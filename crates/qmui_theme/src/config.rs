//! Theme files
//!
//! Themes can be declared in TOML and added to a registry at runtime:
//!
//! ```toml
//! [[theme]]
//! id = "forest"
//! name = "Forest"
//! primary = "#2E7D32"
//!
//! [theme.colors]
//! link = "#1B5E20"
//!
//! [theme.extra]
//! badge = "#FF5722"
//! ```
//!
//! Slots not listed under `colors` come from the base palette built around
//! `primary` (the dark one when `dark = true`). `name` defaults to `id`.

use crate::error::{Result, ThemeError};
use crate::presets::palette;
use crate::registry::ThemeRegistry;
use crate::theme::{ColorToken, Theme};
use qmui_core::Color;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Top level of a theme file
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeFile {
    #[serde(default, rename = "theme")]
    pub themes: Vec<ThemeDefinition>,
}

/// One `[[theme]]` table
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dark: bool,
    pub primary: String,
    /// Semantic slot overrides, keyed by [`ColorToken::key`]
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ThemeDefinition {
    fn parse_color(&self, field: &str, value: &str) -> Result<Color> {
        Color::parse_hex(value).map_err(|source| ThemeError::InvalidColor {
            theme: self.id.clone(),
            field: field.to_string(),
            source,
        })
    }

    /// Resolve into a theme record
    pub fn into_theme(self) -> Result<Theme> {
        let primary = self.parse_color("primary", &self.primary)?;
        let mut colors = palette(primary, self.dark);

        for (key, value) in &self.colors {
            let token = ColorToken::from_key(key).ok_or_else(|| ThemeError::UnknownColorToken {
                theme: self.id.clone(),
                token: key.clone(),
            })?;
            colors.set(token, self.parse_color(key, value)?);
        }

        for (name, value) in &self.extra {
            let color = self.parse_color(name, value)?;
            colors.extra.insert(name.clone(), color);
        }

        let name = self.name.unwrap_or_else(|| self.id.clone());
        Ok(Theme::new(self.id, name, colors, self.dark))
    }
}

/// Parse every theme in a TOML document
pub fn themes_from_toml(source: &str) -> Result<Vec<Theme>> {
    let file: ThemeFile = toml::from_str(source)?;
    file.themes
        .into_iter()
        .map(ThemeDefinition::into_theme)
        .collect()
}

impl ThemeRegistry {
    /// Register the themes declared in a TOML document
    ///
    /// Nothing is registered unless every theme parses and none conflicts
    /// with a registered one. Returns the identifiers in file order.
    pub fn load_toml(&self, source: &str) -> Result<Vec<String>> {
        let themes = themes_from_toml(source)?;
        let ids = themes
            .iter()
            .map(|theme| theme.identifier().to_string())
            .collect();
        self.register_themes(themes)?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slots_inherit_palette() {
        let themes = themes_from_toml(
            r##"
            [[theme]]
            id = "forest"
            primary = "#2E7D32"
            dark = true
            "##,
        )
        .unwrap();

        let forest = &themes[0];
        let expected = palette(Color::from_hex(0x2E7D32), true);
        assert_eq!(forest.name(), "forest");
        assert!(forest.is_dark_mode());
        assert_eq!(forest.colors(), &expected);
    }

    #[test]
    fn test_overrides_and_extras() {
        let themes = themes_from_toml(
            r##"
            [[theme]]
            id = "forest"
            name = "Forest"
            primary = "2E7D32"

            [theme.colors]
            link = "#1B5E20"

            [theme.extra]
            badge = "#F52"
            "##,
        )
        .unwrap();

        let forest = &themes[0];
        assert_eq!(forest.name(), "Forest");
        assert_eq!(forest.color(ColorToken::Link), Color::from_hex(0x1B5E20));
        assert_eq!(forest.colors().named("badge"), Some(Color::from_hex(0xFF5522)));
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = themes_from_toml(
            r##"
            [[theme]]
            id = "forest"
            primary = "#2E7D32"

            [theme.colors]
            chartreuse = "#7FFF00"
            "##,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ThemeError::UnknownColorToken { ref theme, ref token }
                if theme == "forest" && token == "chartreuse"
        ));
    }

    #[test]
    fn test_bad_color_names_the_field() {
        let err = themes_from_toml(
            r##"
            [[theme]]
            id = "forest"
            primary = "#GGGGGG"
            "##,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ThemeError::InvalidColor { ref field, .. } if field == "primary"
        ));
    }

    #[test]
    fn test_syntax_error_maps_to_parse() {
        assert!(matches!(
            themes_from_toml("[[theme]\nid ="),
            Err(ThemeError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_document_has_no_themes() {
        assert!(themes_from_toml("").unwrap().is_empty());
    }
}
