//! Theme error types

use qmui_core::ColorParseError;
use thiserror::Error;

/// Theme registry errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No theme is registered under this identifier
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    /// The identifier is already bound to a different theme
    #[error("theme {0:?} is already registered with different colors")]
    DuplicateIdentifier(String),

    /// A registry needs at least one theme to have a current one
    #[error("a theme registry needs at least one theme")]
    Empty,

    /// A theme file named a color slot that does not exist
    #[error("unknown color token {token:?} in theme {theme:?}")]
    UnknownColorToken { theme: String, token: String },

    /// A theme file contained a malformed color
    #[error("invalid color {field:?} in theme {theme:?}: {source}")]
    InvalidColor {
        theme: String,
        field: String,
        #[source]
        source: ColorParseError,
    },

    /// The theme file was not valid TOML
    #[error("failed to parse theme file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
