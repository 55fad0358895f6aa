//! Fades a color across the easing catalog, logging each frame.
//!
//! Run with `RUST_LOG=trace cargo run -p qmui_animation --example fade`.

use qmui_animation::{animate_color, AnimationConfig, Easing};
use qmui_core::Color;
use std::thread;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AnimationConfig::default();
    let from = Color::from_hex(0xFFFFFF);
    let to = Color::from_hex(0x31BD65);

    for easing in [Easing::EaseOutCubic, Easing::EaseOutBack, Easing::EaseOutBounce] {
        tracing::info!("easing {}", easing);
        let animation = animate_color(from, to, config.default_duration(), Some(easing), |c| {
            tracing::info!("  {}", c);
        });
        while animation.is_running() {
            thread::sleep(config.tick_interval());
        }
    }
}
