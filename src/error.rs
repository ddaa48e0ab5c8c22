//! Error types and handling for the compose tool
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Exit status when the operator declines the overwrite prompt.
pub const EXIT_CANCELLED: i32 = 1;
/// Exit status for a failed or timed-out subprocess.
pub const EXIT_SUBPROCESS: i32 = 2;
/// Exit status for file system failures while preparing the project.
pub const EXIT_IO: i32 = 3;

/// Main error type for compose operations
#[derive(Error, Diagnostic, Debug)]
pub enum ComposeError {
    #[error("Installation cancelled!")]
    #[diagnostic(
        code(compose::install::cancelled),
        help("Re-run with --force to replace an existing directory without prompting")
    )]
    UserCancelled,

    // Subprocess errors
    #[error("Command failed{}: {command}", .exit_code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    #[diagnostic(code(compose::process::failed))]
    SubprocessFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("Command timed out after {timeout_secs}s: {command}")]
    #[diagnostic(
        code(compose::process::timed_out),
        help("Check your network connection and re-run the installer")
    )]
    SubprocessTimedOut { command: String, timeout_secs: u64 },

    #[error("Failed to spawn command: {command}")]
    #[diagnostic(
        code(compose::process::spawn_failed),
        help("Check that composer and php are installed and on your PATH")
    )]
    SpawnFailed { command: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(compose::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(compose::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(compose::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(compose::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Failed to read confirmation: {reason}")]
    #[diagnostic(code(compose::prompt::failed))]
    PromptFailed { reason: String },
}

impl ComposeError {
    /// Map the error to the process exit status reported to the operator.
    ///
    /// Cancellation is distinct from failure so wrapper scripts can tell
    /// "operator said no" apart from "something broke".
    pub fn exit_code(&self) -> i32 {
        match self {
            ComposeError::UserCancelled => EXIT_CANCELLED,
            ComposeError::SubprocessFailed { .. }
            | ComposeError::SubprocessTimedOut { .. }
            | ComposeError::SpawnFailed { .. } => EXIT_SUBPROCESS,
            ComposeError::FileNotFound { .. }
            | ComposeError::FileReadFailed { .. }
            | ComposeError::FileWriteFailed { .. }
            | ComposeError::IoError { .. }
            | ComposeError::PromptFailed { .. } => EXIT_IO,
        }
    }
}

impl From<std::io::Error> for ComposeError {
    fn from(err: std::io::Error) -> Self {
        ComposeError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ComposeError>;
