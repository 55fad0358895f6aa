//! Cycles through every registered theme, printing its palette.
//!
//! Run with `RUST_LOG=debug cargo run -p qmui_theme --example theme_picker`
//! to see the registry's own logging.

use qmui_theme::{ColorToken, ThemeRegistry};
use tracing_subscriber::EnvFilter;

const EXTRA_THEMES: &str = r##"
[[theme]]
id = "forest"
name = "Forest"
primary = "#2E7D32"
"##;

fn main() -> qmui_theme::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = ThemeRegistry::shared();
    registry.load_toml(EXTRA_THEMES)?;

    registry.add_theme_change_listener(|theme| {
        let mode = if theme.is_dark_mode() { "dark" } else { "light" };
        tracing::info!("{} ({})", theme.name(), mode);
        for token in ColorToken::all() {
            tracing::info!("  {:<14} {}", token.key(), theme.color(*token));
        }
    });

    for _ in 0..registry.len() {
        registry.cycle_theme();
    }
    Ok(())
}
