//! Unified error types for planscope.
//!
//! Parsing, diffing and decoding never fail, so everything here belongs to
//! the collaborators around the viewer: reading input, the terminal, the
//! history store, configuration, the release check and the provisioning tool.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for planscope operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlanscopeError {
    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal setup, drawing or restore failed
    #[error("Terminal error: {context}")]
    Terminal {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors from the history store
    #[error("History error: {context}")]
    History {
        context: String,
        #[source]
        source: HistoryErrorKind,
    },

    /// Errors while invoking terraform or tofu
    #[error("Failed to run {tool}: {context}")]
    Runner {
        tool: String,
        context: String,
        #[source]
        source: RunnerErrorKind,
    },

    /// Errors from the release check
    #[error("Update check failed: {0}")]
    Update(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific history error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HistoryErrorKind {
    #[error("No history entry with id {id} ({available} available)")]
    NotFound { id: usize, available: usize },

    #[error("Unrecognized history file name: {0}")]
    InvalidName(String),

    #[error("History directory unavailable")]
    NoDirectory,
}

/// Specific runner error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RunnerErrorKind {
    #[error("neither tofu nor terraform was found on PATH")]
    ToolNotFound,

    #[error("could not start process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("process exited with status {code:?}")]
    ExitStatus { code: Option<i32> },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, PlanscopeError>;

// ============================================================================
// Convenience constructors
// ============================================================================

impl PlanscopeError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a terminal error
    pub fn terminal(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            context: context.into(),
            source,
        }
    }

    /// Create a history error
    pub fn history(context: impl Into<String>, source: HistoryErrorKind) -> Self {
        Self::History {
            context: context.into(),
            source,
        }
    }

    /// Create a runner error
    pub fn runner(
        tool: impl Into<String>,
        context: impl Into<String>,
        source: RunnerErrorKind,
    ) -> Self {
        Self::Runner {
            tool: tool.into(),
            context: context.into(),
            source,
        }
    }

    /// Create an update-check error
    pub fn update(message: impl Into<String>) -> Self {
        Self::Update(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Exit code reported by the provisioning tool, if this error carries one.
    #[must_use]
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Self::Runner {
                source: RunnerErrorKind::ExitStatus { code },
                ..
            } => *code,
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PlanscopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PlanscopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON: {err}"))
    }
}

impl From<serde_yaml::Error> for PlanscopeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(format!("YAML: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so a chain
/// of calls reads outermost first.
///
/// ```ignore
/// use planscope::error::ErrorContext;
///
/// let text = std::fs::read_to_string(&path)
///     .with_context(|| format!("reading plan from {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PlanscopeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: PlanscopeError, new_ctx: &str) -> PlanscopeError {
    match err {
        PlanscopeError::Io {
            path,
            message,
            source,
        } => PlanscopeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PlanscopeError::Terminal { context, source } => PlanscopeError::Terminal {
            context: chain_context(new_ctx, &context),
            source,
        },
        PlanscopeError::History { context, source } => PlanscopeError::History {
            context: chain_context(new_ctx, &context),
            source,
        },
        PlanscopeError::Runner {
            tool,
            context,
            source,
        } => PlanscopeError::Runner {
            tool,
            context: chain_context(new_ctx, &context),
            source,
        },
        PlanscopeError::Update(msg) => PlanscopeError::Update(chain_context(new_ctx, &msg)),
        PlanscopeError::Config(msg) => PlanscopeError::Config(chain_context(new_ctx, &msg)),
        PlanscopeError::Validation(msg) => {
            PlanscopeError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| PlanscopeError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PlanscopeError::io("/tmp/plan.txt", io_err);

        assert!(err.to_string().contains("/tmp/plan.txt"));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(PlanscopeError::history(
                "base",
                HistoryErrorKind::NoDirectory,
            ))
        }

        let result = inner().context("middle layer").context("outer layer");
        match result {
            Err(PlanscopeError::History { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected History error, got {other:?}"),
        }
    }

    #[test]
    fn test_runner_exit_code() {
        let err = PlanscopeError::runner(
            "terraform",
            "apply",
            RunnerErrorKind::ExitStatus { code: Some(3) },
        );
        assert_eq!(err.tool_exit_code(), Some(3));
        assert!(err.to_string().contains("terraform"));

        let err = PlanscopeError::config("bad");
        assert_eq!(err.tool_exit_code(), None);
    }

    #[test]
    fn test_option_context() {
        let missing: Option<u8> = None;
        let err = missing.context_none("nothing here").unwrap_err();
        assert!(matches!(err, PlanscopeError::Validation(ref m) if m == "nothing here"));
    }
}
