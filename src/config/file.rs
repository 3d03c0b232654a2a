//! Configuration file loading and discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Config file names searched for in each location.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".planscope.yaml",
    ".planscope.yml",
    "planscope.yaml",
    "planscope.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/planscope/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = cwd
        .as_deref()
        .and_then(find_git_root)
        .and_then(|root| find_config_in_dir(&root))
    {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("planscope")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for crate::error::PlanscopeError {
    fn from(err: ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# planscope configuration
# Place this file at .planscope.yaml in your project root or
# ~/.config/planscope/planscope.yaml for a global default.
# CLI flags always override file settings.

tui:
  # Theme: auto, dark, light, high-contrast
  theme: auto
  mouse_enabled: true
  tick_rate_ms: 250
  # Hide resources that do not match the active search
  narrow_search: true

display:
  # Unchanged lines kept around each change in decoded diffs
  context_lines: 3
  # Attribute values decoded from base64/gzip/hex for display
  decode_keys:
    - user_data
    - user_data_base64
  wrap: true

history:
  enabled: true
  # directory: ~/.local/share/planscope/history
  max_entries: 100

update:
  enabled: true
  interval_hours: 24

# Provisioning tool; detected from PATH (terraform, then tofu) when unset
runner: {}
#   tool: tofu
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".planscope.yaml");
        std::fs::write(&config_path, "tui:\n  theme: light\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
display:
  context_lines: 5
  decode_keys: [custom_data]
history:
  enabled: false
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.display.context_lines, 5);
        assert_eq!(config.display.decode_keys, vec!["custom_data".to_string()]);
        assert!(!config.history.enabled);
        assert_eq!(config.tui.theme, "auto");
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "tui: [not, a, map]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_example_config_parses() {
        let example = generate_example_config();
        let config: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: dark\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
