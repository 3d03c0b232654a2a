//! Invoking `terraform` or `tofu`.
//!
//! `plan` output is captured so it can be parsed and saved; `apply` inherits
//! the terminal so the tool's own prompts and progress reach the user.

use crate::error::{PlanscopeError, Result, RunnerErrorKind};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Binaries tried, in order, when no tool is configured.
pub const KNOWN_TOOLS: [&str; 2] = ["terraform", "tofu"];

/// A resolved provisioning tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    name: String,
    path: PathBuf,
}

impl Tool {
    /// Resolve the tool to run: `preferred` if given, otherwise the first of
    /// [`KNOWN_TOOLS`] found on `PATH`.
    pub fn detect(preferred: Option<&str>) -> Result<Self> {
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        Self::detect_in(preferred, &path_var)
    }

    /// [`Tool::detect`] against an explicit `PATH` value.
    pub fn detect_in(preferred: Option<&str>, path_var: &OsStr) -> Result<Self> {
        let candidates: Vec<&str> = match preferred {
            Some(name) => vec![name],
            None => KNOWN_TOOLS.to_vec(),
        };

        for name in &candidates {
            if let Some(path) = find_on_path(name, path_var) {
                tracing::debug!(tool = *name, path = %path.display(), "resolved tool");
                return Ok(Self {
                    name: (*name).to_string(),
                    path,
                });
            }
        }

        Err(PlanscopeError::runner(
            candidates.join("/"),
            "looking up executable",
            RunnerErrorKind::ToolNotFound,
        ))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `plan -no-color [-out=FILE] ARGS...` and return stdout followed by
    /// stderr.
    pub fn plan(&self, args: &[String], out_file: Option<&Path>) -> Result<String> {
        let mut command = Command::new(&self.path);
        command.arg("plan").arg("-no-color");
        if let Some(out) = out_file {
            command.arg(format!("-out={}", out.display()));
        }
        command.args(args).stdin(Stdio::null());

        tracing::info!(tool = %self.name, ?args, "running plan");
        let output = command
            .output()
            .map_err(|e| PlanscopeError::runner(&self.name, "plan", RunnerErrorKind::Spawn(e)))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(PlanscopeError::runner(
                &self.name,
                format!("plan failed:\n{}", text.trim_end()),
                RunnerErrorKind::ExitStatus {
                    code: output.status.code(),
                },
            ));
        }
        Ok(text)
    }

    /// Run `apply PLANFILE` attached to the terminal.
    pub fn apply(&self, plan_file: &Path) -> Result<()> {
        tracing::info!(tool = %self.name, plan = %plan_file.display(), "running apply");
        let status = Command::new(&self.path)
            .arg("apply")
            .arg(plan_file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| PlanscopeError::runner(&self.name, "apply", RunnerErrorKind::Spawn(e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(PlanscopeError::runner(
                &self.name,
                "apply",
                RunnerErrorKind::ExitStatus {
                    code: status.code(),
                },
            ))
        }
    }
}

/// Full path of an executable named `name` in a `PATH`-style list.
#[must_use]
pub fn find_on_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(name);
        return path.is_file().then_some(path);
    }
    std::env::split_paths(path_var).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Add `-destroy` unless the caller already passed it.
#[must_use]
pub fn ensure_destroy_flag(mut args: Vec<String>) -> Vec<String> {
    if !args.iter().any(|a| a == "-destroy") {
        args.insert(0, "-destroy".to_string());
    }
    args
}

/// Saved-plan path for this process, under the temp directory.
#[must_use]
pub fn temp_plan_file() -> PathBuf {
    std::env::temp_dir().join(format!("planscope-{}.tfplan", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_prefers_terraform() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("tofu"), "").expect("write");
        std::fs::write(tmp.path().join("terraform"), "").expect("write");

        let tool = Tool::detect_in(None, tmp.path().as_os_str()).expect("detect");
        assert_eq!(tool.name(), "terraform");

        let tool = Tool::detect_in(Some("tofu"), tmp.path().as_os_str()).expect("detect");
        assert_eq!(tool.name(), "tofu");
    }

    #[test]
    fn test_detect_falls_back_to_tofu() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("tofu"), "").expect("write");
        let tool = Tool::detect_in(None, tmp.path().as_os_str()).expect("detect");
        assert_eq!(tool.name(), "tofu");
    }

    #[test]
    fn test_tool_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let err = Tool::detect_in(None, tmp.path().as_os_str()).unwrap_err();
        assert!(matches!(
            err,
            PlanscopeError::Runner {
                source: RunnerErrorKind::ToolNotFound,
                ..
            }
        ));
        assert!(err.to_string().contains("terraform/tofu"));
    }

    #[test]
    fn test_ensure_destroy_flag() {
        assert_eq!(
            ensure_destroy_flag(vec!["-var=x=1".to_string()]),
            vec!["-destroy".to_string(), "-var=x=1".to_string()]
        );
        let args = vec!["-destroy".to_string()];
        assert_eq!(ensure_destroy_flag(args.clone()), args);
    }
}
