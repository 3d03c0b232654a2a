//! Background check for a newer release.
//!
//! The check never blocks the viewer and never fails a command: it runs on
//! its own thread, and the only thing it can produce is one version string
//! sent over a channel. Results are cached on disk so the network is hit at
//! most once per configured interval.

use crate::config::UpdateConfig;
use crate::error::{PlanscopeError, Result};
use crate::utils::is_newer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Version of this build.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Latest-release endpoint queried by the check.
pub const RELEASE_API_URL: &str =
    "https://api.github.com/repos/planscope/planscope/releases/latest";

const CACHE_FILE: &str = "update-check.json";

/// Result of the last network check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCache {
    /// Unix seconds of the last successful check
    pub last_check: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

impl UpdateCache {
    /// Whether the cached result is younger than `interval_hours`.
    #[must_use]
    pub fn is_fresh(&self, now: i64, interval_hours: u64) -> bool {
        let interval = i64::try_from(interval_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
        now.saturating_sub(self.last_check) < interval
    }

    #[must_use]
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PlanscopeError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| PlanscopeError::io(path, e))
    }
}

/// `<config dir>/planscope/update-check.json`
#[must_use]
pub fn cache_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("planscope").join(CACHE_FILE))
}

/// Newer version than `current`, consulting the cache first.
///
/// `fetch` is only called when the cache is missing or stale.
pub fn check_with_cache<F>(
    current: &str,
    interval_hours: u64,
    cache: Option<&Path>,
    now: i64,
    fetch: F,
) -> Result<Option<String>>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(cached) = cache.and_then(UpdateCache::load) {
        if cached.is_fresh(now, interval_hours) {
            tracing::debug!("using cached release check");
            return Ok(cached
                .latest_version
                .filter(|latest| is_newer(current, latest)));
        }
    }

    let latest = fetch()?;
    tracing::debug!(%latest, "fetched latest release");

    if let Some(path) = cache {
        let entry = UpdateCache {
            last_check: now,
            latest_version: Some(latest.clone()),
        };
        if let Err(e) = entry.save(path) {
            tracing::debug!("could not write update cache: {e}");
        }
    }

    Ok(is_newer(current, &latest).then_some(latest))
}

#[cfg(feature = "update-check")]
fn fetch_latest() -> Result<String> {
    #[derive(Deserialize)]
    struct Release {
        tag_name: String,
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .user_agent(concat!("planscope/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PlanscopeError::update(e.to_string()))?;

    let response = client
        .get(RELEASE_API_URL)
        .header("Accept", "application/vnd.github+json")
        .send()
        .map_err(|e| PlanscopeError::update(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PlanscopeError::update(format!(
            "release API returned {}",
            response.status()
        )));
    }

    let release: Release = response
        .json()
        .map_err(|e| PlanscopeError::update(e.to_string()))?;
    Ok(release.tag_name.trim_start_matches('v').to_string())
}

/// Start the release check in the background.
///
/// The receiver yields at most one version string, and only when a newer
/// release exists. When the check is disabled it never yields.
#[must_use]
pub fn spawn_check(config: &UpdateConfig) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    if !config.enabled {
        return rx;
    }
    spawn_inner(config.interval_hours, tx);
    rx
}

#[cfg(feature = "update-check")]
fn spawn_inner(interval_hours: u64, tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        let now = chrono::Utc::now().timestamp();
        let cache = cache_path();
        match check_with_cache(CURRENT_VERSION, interval_hours, cache.as_deref(), now, fetch_latest) {
            Ok(Some(version)) => {
                // The viewer may already be gone.
                let _ = tx.send(version);
            }
            Ok(None) => tracing::debug!("running the latest release"),
            Err(e) => tracing::debug!("release check failed: {e}"),
        }
    });
}

#[cfg(not(feature = "update-check"))]
fn spawn_inner(_interval_hours: u64, _tx: mpsc::Sender<String>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_cache_freshness() {
        let cache = UpdateCache {
            last_check: 1_000,
            latest_version: None,
        };
        assert!(cache.is_fresh(1_000 + 3599, 1));
        assert!(!cache.is_fresh(1_000 + 3600, 1));
    }

    #[test]
    fn test_fetch_result_cached() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join(CACHE_FILE);
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok("0.9.0".to_string())
        };

        let newer = check_with_cache("0.1.0", 24, Some(&path), 10_000, fetch).expect("check");
        assert_eq!(newer.as_deref(), Some("0.9.0"));
        assert_eq!(calls.get(), 1);

        let fetch_again = || {
            calls.set(calls.get() + 1);
            Ok("1.0.0".to_string())
        };
        let newer = check_with_cache("0.1.0", 24, Some(&path), 10_100, fetch_again).expect("check");
        assert_eq!(newer.as_deref(), Some("0.9.0"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_stale_cache_refetches() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join(CACHE_FILE);
        UpdateCache {
            last_check: 0,
            latest_version: Some("0.2.0".to_string()),
        }
        .save(&path)
        .expect("save");

        let newer = check_with_cache("0.2.0", 1, Some(&path), 7_200, || Ok("0.3.0".to_string()))
            .expect("check");
        assert_eq!(newer.as_deref(), Some("0.3.0"));
        assert_eq!(
            UpdateCache::load(&path).and_then(|c| c.latest_version).as_deref(),
            Some("0.3.0")
        );
    }

    #[test]
    fn test_not_newer_yields_none() {
        let newer = check_with_cache("1.2.0", 24, None, 0, || Ok("1.2.0".to_string()))
            .expect("check");
        assert_eq!(newer, None);
    }

    #[test]
    fn test_disabled_never_yields() {
        let config = UpdateConfig {
            enabled: false,
            ..UpdateConfig::default()
        };
        let rx = spawn_check(&config);
        assert!(rx.try_recv().is_err());
    }
}
