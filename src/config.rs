//! Overlay configuration
//!
//! Hosts embedding the assistant tune it here; the demo binary runs with
//! the defaults.

use serde::{Deserialize, Serialize};

use crate::{Result, SibylError};

/// Configuration for the assistant overlay
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// How long the button takes to expand into the overlay, milliseconds
    pub reveal_time_ms: u64,

    /// Diameter of the floating assistant button, points
    pub button_size: f32,

    /// Use the dark palette
    pub dark_theme: bool,

    /// Uppercase the first letter of recognized speech
    pub capitalize_recognition: bool,

    /// Channel capacity used when wiring an engine
    pub channel_buffer: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reveal_time_ms: 300,
            button_size: 64.0,
            dark_theme: true,
            capitalize_recognition: true,
            channel_buffer: 16,
        }
    }
}

impl AssistantConfig {
    pub fn reveal_time_secs(&self) -> f32 {
        self.reveal_time_ms as f32 / 1000.0
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.button_size <= 0.0 {
            return Err(SibylError::ConfigError(
                "button_size must be positive".to_string(),
            ));
        }
        if self.channel_buffer == 0 {
            return Err(SibylError::ConfigError(
                "channel_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reveal_time_ms, 300);
        assert!(config.capitalize_recognition);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AssistantConfig =
            serde_json::from_str(r#"{ "dark_theme": false }"#).unwrap();
        assert!(!config.dark_theme);
        assert_eq!(config.button_size, 64.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AssistantConfig {
            button_size: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
