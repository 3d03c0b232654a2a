//! Configuration types for planscope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file or defaulted.
///
/// CLI flags are applied on top of this after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Interactive viewer settings
    pub tui: TuiConfig,
    /// How resource bodies are rendered
    pub display: DisplayConfig,
    /// Stored plan history
    pub history: HistoryConfig,
    /// Release check
    pub update: UpdateConfig,
    /// Provisioning tool invocation
    pub runner: RunnerConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// TUI Preferences (persisted)
// ============================================================================

/// Viewer preferences remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiPreferences {
    /// Theme name: "auto", "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("planscope").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load preferences from a specific file.
    #[must_use]
    pub fn load_from(path: &std::path::Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save preferences to a specific file, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Interactive viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "auto", "dark", "light", or "high-contrast"
    pub theme: String,
    /// Enable mouse wheel scrolling
    pub mouse_enabled: bool,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 16, max = 5000))]
    pub tick_rate_ms: u64,
    /// Hide resources that do not match an active search
    pub narrow_search: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            mouse_enabled: true,
            tick_rate_ms: 250,
            narrow_search: true,
        }
    }
}

/// Resource body rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DisplayConfig {
    /// Unchanged lines kept around each change in embedded diffs
    #[schemars(range(max = 50))]
    pub context_lines: usize,
    /// Attribute names whose values are decoded for display
    pub decode_keys: Vec<String>,
    /// Word-wrap long body lines to the terminal width
    pub wrap: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            context_lines: crate::diff::DEFAULT_CONTEXT_LINES,
            decode_keys: vec!["user_data".to_string(), "user_data_base64".to_string()],
            wrap: true,
        }
    }
}

/// Plan history storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HistoryConfig {
    /// Save plans produced by `plan` and `apply`
    pub enabled: bool,
    /// Storage directory (defaults to the user data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Entries kept when pruning
    #[schemars(range(min = 1))]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
            max_entries: 100,
        }
    }
}

/// Release check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpdateConfig {
    /// Check for a newer release in the background
    pub enabled: bool,
    /// Hours between network checks
    #[schemars(range(min = 1))]
    pub interval_hours: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: 24,
        }
    }
}

/// Provisioning tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RunnerConfig {
    /// Binary to run ("terraform" or "tofu"); detected from PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("tui:\n  theme: light\n").unwrap();
        assert_eq!(config.tui.theme, "light");
        assert!(config.tui.mouse_enabled);
        assert_eq!(config.display.context_lines, 3);
        assert_eq!(config.history.max_entries, 100);
    }

    #[test]
    fn test_preferences_roundtrip_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("preferences.json");
        let prefs = TuiPreferences {
            theme: "high-contrast".to_string(),
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(TuiPreferences::load_from(&path), Some(prefs));
    }
}
