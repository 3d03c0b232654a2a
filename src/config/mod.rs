//! Configuration for planscope.
//!
//! - Typed configuration sections with serde defaults
//! - Field-level validation through [`Validatable`]
//! - YAML file discovery and loading
//! - Persisted viewer preferences
//!
//! # Configuration File
//!
//! Place a `.planscope.yaml` file in your project root or
//! `~/.config/planscope/`:
//!
//! ```yaml
//! tui:
//!   theme: light
//! display:
//!   context_lines: 5
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, DisplayConfig, HistoryConfig, RunnerConfig, TuiConfig, TuiPreferences,
    UpdateConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_json_schema();
        for section in ["tui", "display", "history", "update", "runner"] {
            assert!(schema.contains(section), "missing {section}");
        }
    }
}
