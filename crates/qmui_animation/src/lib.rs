//! QMUI Animation System
//!
//! Time-based animations with easing curves, driven on background threads.
//!
//! # Features
//!
//! - **Easing Library**: Polynomial, sine, expo, circ, back, elastic, bounce,
//!   cubic-bezier and spring curves, selectable by name
//! - **Animation Driver**: Fixed-cadence ticking with cooperative start/stop
//!   and exactly-once completion
//! - **Animator**: Start or stop groups of animations together
//! - **Interpolation**: Helpers animating floats, colors, points and sizes

pub mod animator;
pub mod config;
pub mod driver;
pub mod easing;
pub mod values;

pub use animator::{AnimationId, Animator};
pub use config::AnimationConfig;
pub use driver::{
    Animation, AnimationBuilder, AnimationState, CompleteCallback, UpdateCallback,
    DEFAULT_TICK_INTERVAL,
};
pub use easing::{Easing, ParseEasingError};
pub use values::{
    animate, animate_color, animate_float, animate_point, animate_size, animate_with, Interpolate,
};
