//! Error types for configuration loading and lookup.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::path::PathError;

/// Errors produced while reading or querying the configuration.
///
/// Malformed numeric and boolean values are reported here rather than
/// aborting; the binary decides to terminate via
/// [`report_fatal`](crate::lifecycle::startup::report_fatal).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contains a statement the parser does not understand.
    #[error("{message} on line {line}")]
    Syntax { line: u32, message: String },

    /// An option name outside the known enumeration.
    #[error("unrecognized parameter '{name}' on line {line}")]
    UnknownOption { name: String, line: u32 },

    /// A non-repeatable option appeared more than once.
    #[error(
        "config parameter '{name}' is first defined on line {first} and redefined on line {line}"
    )]
    Redefined { name: &'static str, first: u32, line: u32 },

    /// A block option lacks a mandatory block parameter.
    #[error("Missing \"{name}\" in block on line {line}")]
    MissingBlockParam { name: &'static str, line: u32 },

    #[error("Expected boolean value (yes, true, 1) or (no, false, 0) on line {line}")]
    InvalidBool { line: u32 },

    #[error("Not a valid non-negative number in line {line}")]
    InvalidUnsigned { line: u32 },

    #[error("Not a valid number in line {line}")]
    InvalidNumber { line: u32 },

    #[error("Not a positive number in line {line}")]
    NotPositive { line: u32 },

    /// The installed registry is shared with readers and cannot be extended.
    #[error("configuration is in use by {readers} reader(s); not loading more")]
    InUse { readers: usize },

    /// Path normalization failed; recoverable.
    #[error("Invalid path at line {line}: {source}")]
    InvalidPath {
        line: u32,
        #[source]
        source: PathError,
    },
}

impl ConfigError {
    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            ConfigError::Io { .. } | ConfigError::InUse { .. } => None,
            ConfigError::Syntax { line, .. }
            | ConfigError::UnknownOption { line, .. }
            | ConfigError::Redefined { line, .. }
            | ConfigError::MissingBlockParam { line, .. }
            | ConfigError::InvalidBool { line }
            | ConfigError::InvalidUnsigned { line }
            | ConfigError::InvalidNumber { line }
            | ConfigError::NotPositive { line }
            | ConfigError::InvalidPath { line, .. } => Some(*line),
        }
    }

    /// Whether the startup path should abort on this error.
    ///
    /// Path failures are the one lookup error callers may recover from.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConfigError::InvalidPath { .. })
    }

    pub(crate) fn syntax(line: u32, message: impl Into<String>) -> Self {
        ConfigError::Syntax {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
