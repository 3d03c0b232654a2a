//! Saved plan and apply output.
//!
//! Every `plan` or `apply` run keeps its captured output as a text file so it
//! can be reopened in the viewer later. The file name carries everything the
//! listing needs:
//!
//! ```text
//! 2026-01-09_10-30-00_apply_success.txt
//! └──── timestamp ────┘ └cmd┘ └status┘
//! ```
//!
//! Entries are listed newest first and addressed by a 1-based id in that
//! order, so id 1 is always the most recent run.

use crate::config::HistoryConfig;
use crate::error::{ErrorContext, HistoryErrorKind, PlanscopeError, Result};
use crate::parsers::{parse_summary, PlanSummary};
use chrono::{Duration, Local, NaiveDateTime};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const EXTENSION: &str = ".txt";

/// Command that produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    Plan,
    Apply,
    Destroy,
    View,
}

impl HistoryCommand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::View => "view",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plan" => Some(Self::Plan),
            "apply" => Some(Self::Apply),
            "destroy" => Some(Self::Destroy),
            "view" => Some(Self::View),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome recorded for apply and destroy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl HistoryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// One saved run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based position in the newest-first listing
    pub id: usize,
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
    pub command: HistoryCommand,
    pub status: Option<HistoryStatus>,
}

impl HistoryEntry {
    #[must_use]
    pub fn file_name(&self) -> String {
        file_name(self.timestamp, self.command, self.status)
    }

    /// One listing line: id, time, command, status and optional totals.
    #[must_use]
    pub fn display_line(&self, summary: Option<&PlanSummary>) -> String {
        let status = self
            .status
            .map(|s| format!(" [{}]", s.as_str().to_uppercase()))
            .unwrap_or_default();
        let totals = summary
            .map(|s| format!("  +{} ~{} -{}", s.add, s.change, s.destroy))
            .unwrap_or_default();
        format!(
            "{:>3}  {}  {:<8}{status}{totals}",
            self.id,
            self.timestamp.format(DISPLAY_FORMAT),
            self.command.as_str(),
        )
    }
}

/// Build a history file name.
#[must_use]
pub fn file_name(
    timestamp: NaiveDateTime,
    command: HistoryCommand,
    status: Option<HistoryStatus>,
) -> String {
    let mut name = format!("{}_{}", timestamp.format(TIMESTAMP_FORMAT), command.as_str());
    if let Some(status) = status {
        name.push('_');
        name.push_str(status.as_str());
    }
    name.push_str(EXTENSION);
    name
}

/// Parse a history file name into `(timestamp, command, status)`.
pub fn parse_file_name(
    name: &str,
) -> std::result::Result<(NaiveDateTime, HistoryCommand, Option<HistoryStatus>), HistoryErrorKind>
{
    let invalid = || HistoryErrorKind::InvalidName(name.to_string());

    let base = name.strip_suffix(EXTENSION).ok_or_else(invalid)?;
    // The timestamp itself contains one underscore.
    let mut parts = base.splitn(4, '_');
    let (Some(date), Some(time), Some(command)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let timestamp = NaiveDateTime::parse_from_str(&format!("{date}_{time}"), TIMESTAMP_FORMAT)
        .map_err(|_| invalid())?;
    let command = HistoryCommand::parse(command).ok_or_else(invalid)?;
    let status = match parts.next() {
        Some(s) => Some(HistoryStatus::parse(s).ok_or_else(invalid)?),
        None => None,
    };

    Ok((timestamp, command, status))
}

/// Directory-backed history of captured runs.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            dir: dir.into(),
            max_entries: max_entries.max(1),
        }
    }

    /// Store at the configured directory, or `<data dir>/planscope/history`.
    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        let dir = match &config.directory {
            Some(dir) => dir.clone(),
            None => default_dir().ok_or_else(|| {
                PlanscopeError::history("locating data directory", HistoryErrorKind::NoDirectory)
            })?,
        };
        Ok(Self::new(dir, config.max_entries))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save captured output under the current local time.
    pub fn save(
        &self,
        command: HistoryCommand,
        status: Option<HistoryStatus>,
        content: &str,
    ) -> Result<PathBuf> {
        self.save_at(Local::now().naive_local(), command, status, content)
    }

    /// Save captured output under a given time. If a file for that second
    /// already exists the time is moved forward until the name is free.
    pub fn save_at(
        &self,
        timestamp: NaiveDateTime,
        command: HistoryCommand,
        status: Option<HistoryStatus>,
        content: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| PlanscopeError::io(&self.dir, e))?;

        let mut timestamp = timestamp;
        let mut path = self.dir.join(file_name(timestamp, command, status));
        while path.exists() {
            timestamp += Duration::seconds(1);
            path = self.dir.join(file_name(timestamp, command, status));
        }

        fs::write(&path, content).map_err(|e| PlanscopeError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "saved history entry");
        Ok(path)
    }

    /// All entries, newest first. A missing directory is an empty history.
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&self.dir).map_err(|e| PlanscopeError::io(&self.dir, e))?;
        for item in read_dir {
            let item = item.map_err(|e| PlanscopeError::io(&self.dir, e))?;
            let name = item.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match parse_file_name(name) {
                Ok((timestamp, command, status)) => entries.push(HistoryEntry {
                    id: 0,
                    path: item.path(),
                    timestamp,
                    command,
                    status,
                }),
                Err(e) => tracing::debug!("skipping {name}: {e}"),
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.id = i + 1;
        }
        Ok(entries)
    }

    /// Entry by id together with its content.
    pub fn get(&self, id: usize) -> Result<(HistoryEntry, String)> {
        let entries = self.list()?;
        let available = entries.len();
        let entry = id
            .checked_sub(1)
            .and_then(|i| entries.into_iter().nth(i))
            .ok_or_else(|| {
                PlanscopeError::history(
                    "looking up entry",
                    HistoryErrorKind::NotFound { id, available },
                )
            })?;
        let content = fs::read_to_string(&entry.path)
            .map_err(|e| PlanscopeError::io(&entry.path, e))
            .context("reading history entry")?;
        Ok((entry, content))
    }

    /// Totals parsed from an entry's content, for listings.
    pub fn summary(&self, entry: &HistoryEntry) -> Result<Option<PlanSummary>> {
        let content = fs::read_to_string(&entry.path).map_err(|e| PlanscopeError::io(&entry.path, e))?;
        let lines: Vec<&str> = content.lines().collect();
        Ok(parse_summary(&lines))
    }

    /// Record a status by renaming the entry's file. Returns the new path.
    pub fn set_status(&self, path: &Path, status: HistoryStatus) -> Result<PathBuf> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PlanscopeError::history(
                    "updating status",
                    HistoryErrorKind::InvalidName(path.display().to_string()),
                )
            })?;
        let (timestamp, command, _) =
            parse_file_name(name).map_err(|e| PlanscopeError::history("updating status", e))?;

        let new_path = path.with_file_name(file_name(timestamp, command, Some(status)));
        fs::rename(path, &new_path).map_err(|e| PlanscopeError::io(path, e))?;
        tracing::debug!(path = %new_path.display(), status = status.as_str(), "history status updated");
        Ok(new_path)
    }

    /// Append text to an entry, e.g. the apply result.
    pub fn append(&self, path: &Path, content: &str) -> Result<()> {
        use std::io::Write;
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| PlanscopeError::io(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| PlanscopeError::io(path, e))
    }

    /// Delete the oldest entries beyond the configured maximum. Returns how
    /// many were removed.
    pub fn prune(&self) -> Result<usize> {
        let entries = self.list()?;
        let mut removed = 0;
        for entry in entries.iter().skip(self.max_entries) {
            fs::remove_file(&entry.path).map_err(|e| PlanscopeError::io(&entry.path, e))?;
            removed += 1;
        }
        if removed > 0 {
            tracing::info!(removed, "pruned history");
        }
        Ok(removed)
    }
}

fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("planscope").join("history"))
}

/// Banner written at the top of a saved run.
#[must_use]
pub fn run_header(tool: &str, command: HistoryCommand, args: &[String]) -> String {
    let rule = "=".repeat(80);
    let cwd = std::env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "{rule}\nplanscope history\n{rule}\nTimestamp:   {}\nCommand:     {tool} {command}\nWorking Dir: {cwd}\nArguments:   {}\n{rule}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S %Z"),
        args.join(" "),
    )
}

/// Footer appended once apply finishes.
#[must_use]
pub fn apply_footer(success: bool, error: Option<&str>) -> String {
    let rule = "=".repeat(80);
    let status = if success { "SUCCESS" } else { "FAILED" };
    let error = error.map(|e| format!("\nError: {e}")).unwrap_or_default();
    format!(
        "\n{rule}\nApply Result: {status}\nCompleted:    {}{error}\n{rule}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S %Z"),
    )
}
