use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Discovery problems never change the exit code: they are recovered by
/// omitting the affected item. Only configuration and output failures do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - document written
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid config, output write failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for runtime SBOM generation.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("External tool '{tool}' failed for {target}\nDetails: {details}")]
    ExternalToolFailure {
        tool: String,
        target: PathBuf,
        details: String,
    },

    #[error("External tool '{tool}' timed out after {timeout:?} for {target}")]
    ExternalToolTimeout {
        tool: String,
        target: PathBuf,
        timeout: Duration,
    },

    #[error("Process table unavailable: {path}\nDetails: {details}\n\n💡 Hint: Process inspection requires a readable /proc filesystem")]
    ProcessTableUnavailable { path: PathBuf, details: String },

    #[error("Failed to parse library event feed: {path}\nDetails: {details}\n\n💡 Hint: The feed must be a JSON array of {{\"name\", \"version\", \"path\"}} records")]
    EventFeedParseError { path: PathBuf, details: String },

    /// Validation error for value objects and settings
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Failure to digest a file.
///
/// `Missing` means the file is gone (removed between discovery and read);
/// `Unreadable` covers every other I/O failure such as permission denied.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("File not found for hashing: {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read file for hashing: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            HashError::Missing { path }
        } else {
            HashError::Unreadable { path, source: err }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, HashError::Missing { .. })
    }
}
