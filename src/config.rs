//! Configuration for the race scheduler.
//!
//! Load configuration from TOML to control the optimizer and spectator
//! notifications without code changes.
//!
//! ```
//! use u_race::config::RaceConfig;
//!
//! let config = RaceConfig::from_toml_str(r#"
//!     [optimizer]
//!     bound_pruning = false
//!
//!     [notification]
//!     message_template = "{name} is on!"
//! "#).unwrap();
//!
//! assert!(!config.optimizer.bound_pruning);
//! assert_eq!(config.notification.render("Pond Cup"), "Pond Cup is on!");
//! ```
//!
//! Missing files fall back to defaults:
//!
//! ```
//! use u_race::config::RaceConfig;
//!
//! let config = RaceConfig::load("race.toml").unwrap_or_default();
//! assert!(config.optimizer.bound_pruning);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the event name in notification templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RaceConfig {
    /// Assignment optimizer settings.
    pub optimizer: OptimizerConfig,
    /// Spectator notification settings.
    pub notification: NotificationConfig,
}

/// Assignment optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Skip branches whose partial makespan already reaches the best one.
    /// Never changes the result, only the search effort.
    pub bound_pruning: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            bound_pruning: true,
        }
    }
}

/// Spectator notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Message sent to spectators; `{name}` is replaced by the event name.
    pub message_template: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            message_template: format!("Race Event {NAME_PLACEHOLDER} has started!"),
        }
    }
}

impl NotificationConfig {
    /// Renders the race-start message for an event.
    pub fn render(&self, event_name: &str) -> String {
        self.message_template.replace(NAME_PLACEHOLDER, event_name)
    }
}

impl RaceConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`RaceConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value constraints that TOML parsing cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification.message_template.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notification.message_template cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Enables or disables bound pruning.
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.optimizer.bound_pruning = enabled;
        self
    }

    /// Sets the notification template.
    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.notification.message_template = template.into();
        self
    }
}
