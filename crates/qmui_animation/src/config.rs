//! Animation defaults loaded from configuration
//!
//! ```rust
//! use qmui_animation::{AnimationConfig, Easing};
//!
//! let config: AnimationConfig =
//!     serde_json::from_str(r#"{ "default_easing": "ease-out-bounce" }"#).unwrap();
//! assert_eq!(config.default_easing, Easing::EaseOutBounce);
//! assert_eq!(config.tick_interval_ms, 16);
//! ```

use crate::easing::Easing;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Defaults applied by [`Animation::with_config`](crate::Animation::with_config)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Tick cadence in milliseconds
    pub tick_interval_ms: u64,
    /// Duration used when a transition does not name one
    pub default_duration_ms: u64,
    /// Easing by catalog name, e.g. `"ease-in-out-sine"` or `"spring(12, 180)"`
    #[serde(deserialize_with = "deserialize_easing")]
    pub default_easing: Easing,
}

impl AnimationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            default_duration_ms: 250,
            default_easing: Easing::EaseOutCubic,
        }
    }
}

fn deserialize_easing<'de, D>(deserializer: D) -> Result<Easing, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{ "default_duration_ms": 400 }"#).unwrap();
        assert_eq!(config.default_duration(), Duration::from_millis(400));
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
        assert_eq!(config.default_easing, Easing::EaseOutCubic);
    }

    #[test]
    fn test_parameterized_easing() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{ "default_easing": "spring(12, 180)" }"#).unwrap();
        assert_eq!(
            config.default_easing,
            Easing::Spring {
                damping: 12.0,
                stiffness: 180.0
            }
        );
    }

    #[test]
    fn test_unknown_easing_is_an_error() {
        let result: Result<AnimationConfig, _> =
            serde_json::from_str(r#"{ "default_easing": "wobble" }"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown easing"), "{err}");
    }
}
