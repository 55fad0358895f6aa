//! QMUI Theme System
//!
//! A registry of named color themes with one current selection and
//! notification when it changes.
//!
//! # Quick Start
//!
//! ```rust
//! use qmui_theme::{ColorToken, ThemeRegistry};
//!
//! let registry = ThemeRegistry::new();
//! registry.add_theme_change_listener(|theme| {
//!     println!("now using {}", theme.name());
//! });
//!
//! registry.set_current_theme("dark");
//! let background = registry.current_theme().color(ColorToken::Background);
//! # let _ = background;
//! ```
//!
//! # Themes
//!
//! Eleven presets are registered by [`ThemeRegistry::new`], see
//! [`ThemePreset`]. More can be added in code with
//! [`ThemeRegistry::register_theme`] or from TOML with
//! [`ThemeRegistry::load_toml`].

pub mod config;
pub mod error;
pub mod presets;
pub mod registry;
pub mod theme;

pub use config::{themes_from_toml, ThemeDefinition, ThemeFile};
pub use error::{Result, ThemeError};
pub use presets::ThemePreset;
pub use registry::{ListenerId, ThemeListener, ThemeRegistry};
pub use theme::{ColorToken, Theme, ThemeColors};
