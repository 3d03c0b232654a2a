//! Configuration validation.

use super::types::{AppConfig, DisplayConfig, HistoryConfig, TuiConfig, UpdateConfig};
use crate::diff::MAX_CONTEXT_LINES;
use crate::tui::ThemeChoice;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.tui.validate());
        errors.extend(self.display.validate());
        errors.extend(self.history.validate());
        errors.extend(self.update.validate());

        if let Some(tool) = &self.runner.tool {
            if tool.trim().is_empty() {
                errors.push(ConfigError {
                    field: "runner.tool".to_string(),
                    message: "Tool name must not be empty".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if ThemeChoice::from_name(&self.theme).is_none() {
            errors.push(ConfigError {
                field: "tui.theme".to_string(),
                message: format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    ThemeChoice::NAMES.join(", ")
                ),
            });
        }
        if !(16..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError {
                field: "tui.tick_rate_ms".to_string(),
                message: format!(
                    "Tick rate must be between 16 and 5000 ms, got {}",
                    self.tick_rate_ms
                ),
            });
        }
        errors
    }
}

impl Validatable for DisplayConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.context_lines > MAX_CONTEXT_LINES {
            errors.push(ConfigError {
                field: "display.context_lines".to_string(),
                message: format!(
                    "Context lines must be at most {MAX_CONTEXT_LINES}, got {}",
                    self.context_lines
                ),
            });
        }
        if self.decode_keys.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError {
                field: "display.decode_keys".to_string(),
                message: "Decode keys must not be empty strings".to_string(),
            });
        }
        errors
    }
}

impl Validatable for HistoryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_entries == 0 {
            errors.push(ConfigError {
                field: "history.max_entries".to_string(),
                message: "Must keep at least one entry".to_string(),
            });
        }
        errors
    }
}

impl Validatable for UpdateConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.interval_hours == 0 {
            errors.push(ConfigError {
                field: "update.interval_hours".to_string(),
                message: "Check interval must be at least one hour".to_string(),
            });
        }
        errors
    }
}
